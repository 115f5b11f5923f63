use crate::error::{CoreError, Result};

#[derive(Debug, Clone)]
pub struct CoreConfig {
    pub database_url: String,
    pub event_channel_capacity: usize,
    pub default_currency: String,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            database_url: "postgresql://localhost/servly_development".to_string(),
            event_channel_capacity: 1000,
            default_currency: "USD".to_string(),
        }
    }
}

impl CoreConfig {
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(db_url) = std::env::var("DATABASE_URL") {
            config.database_url = db_url;
        }

        if let Ok(capacity) = std::env::var("SERVLY_EVENT_CHANNEL_CAPACITY") {
            config.event_channel_capacity = capacity.parse().map_err(|e| {
                CoreError::Configuration(format!("Invalid event_channel_capacity: {e}"))
            })?;
        }

        if let Ok(currency) = std::env::var("SERVLY_DEFAULT_CURRENCY") {
            if currency.len() != 3 {
                return Err(CoreError::Configuration(format!(
                    "Invalid default_currency (expected ISO 4217 code): {currency}"
                )));
            }
            config.default_currency = currency;
        }

        Ok(config)
    }
}
