use serde::{Deserialize, Serialize};
use std::fmt;

/// Job status definitions for the booking lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobState {
    /// Initial state when a booking request is created
    Pending,
    /// Vendor is reviewing the request
    Reviewing,
    /// Vendor has sent a quote
    Quoted,
    /// Vendor has accepted the request
    Accepted,
    /// Vendor declined the request
    Rejected,
    /// Customer has confirmed the engagement
    Confirmed,
    /// Work is underway
    InProgress,
    /// Vendor has finished the work
    Completed,
    /// Customer has received the deliverables
    Delivered,
    /// Either party cancelled the booking
    Cancelled,
    /// Customer contested the completed work
    Disputed,
    /// Engagement is settled and archived
    Closed,
}

impl JobState {
    /// Check if this is a terminal state (no further transitions allowed)
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Rejected | Self::Cancelled | Self::Closed)
    }

    /// Check if this is an active state (work is being performed)
    pub fn is_active(&self) -> bool {
        matches!(self, Self::InProgress)
    }

    /// Check if this state still awaits a vendor decision
    pub fn is_awaiting_vendor(&self) -> bool {
        matches!(self, Self::Pending | Self::Reviewing)
    }
}

impl fmt::Display for JobState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Reviewing => write!(f, "reviewing"),
            Self::Quoted => write!(f, "quoted"),
            Self::Accepted => write!(f, "accepted"),
            Self::Rejected => write!(f, "rejected"),
            Self::Confirmed => write!(f, "confirmed"),
            Self::InProgress => write!(f, "in_progress"),
            Self::Completed => write!(f, "completed"),
            Self::Delivered => write!(f, "delivered"),
            Self::Cancelled => write!(f, "cancelled"),
            Self::Disputed => write!(f, "disputed"),
            Self::Closed => write!(f, "closed"),
        }
    }
}

impl std::str::FromStr for JobState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "reviewing" => Ok(Self::Reviewing),
            "quoted" => Ok(Self::Quoted),
            "accepted" => Ok(Self::Accepted),
            "rejected" => Ok(Self::Rejected),
            "confirmed" => Ok(Self::Confirmed),
            "in_progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            "delivered" => Ok(Self::Delivered),
            "cancelled" => Ok(Self::Cancelled),
            "disputed" => Ok(Self::Disputed),
            "closed" => Ok(Self::Closed),
            _ => Err(format!("Invalid job state: {s}")),
        }
    }
}

/// Default state for new bookings
impl Default for JobState {
    fn default() -> Self {
        Self::Pending
    }
}

/// All states, in lifecycle order. Used by table-driven tests and by
/// callers that need to enumerate the full status space.
pub const ALL_STATES: [JobState; 12] = [
    JobState::Pending,
    JobState::Reviewing,
    JobState::Quoted,
    JobState::Accepted,
    JobState::Rejected,
    JobState::Confirmed,
    JobState::InProgress,
    JobState::Completed,
    JobState::Delivered,
    JobState::Cancelled,
    JobState::Disputed,
    JobState::Closed,
];
