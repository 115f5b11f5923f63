#![allow(clippy::doc_markdown)] // Allow technical terms like PostgreSQL, SQLx in docs
#![allow(clippy::missing_errors_doc)] // Allow public functions without # Errors sections
#![allow(clippy::must_use_candidate)] // Allow methods without must_use when context is clear

//! # Servly Core
//!
//! Rust core for the booking lifecycle of the Servly services marketplace.
//!
//! ## Overview
//!
//! Most of the marketplace is CRUD served elsewhere; this crate owns the one
//! part with real invariants: the job state machine. A booking moves from
//! `pending` to `closed` only along the edges of a static transition table,
//! every transition is gated by the caller's resolved role (customer or
//! vendor), each accepted transition applies its side effects and audit
//! entries atomically, and each commit announces itself on a broadcast
//! channel for the analytics subsystem.
//!
//! ## Module Organization
//!
//! - [`models`] - Job entity and its value types
//! - [`state_machine`] - Transition table, side effects, and the engine
//! - [`activity`] - Append-only messaging, attachments, and view tracking
//! - [`repository`] - Persistence boundary (in-memory and PostgreSQL)
//! - [`actors`] - Actor role resolution boundary
//! - [`catalog`] - Read-only catalog lookup boundary
//! - [`services`] - Booking creation flow
//! - [`events`] - Post-commit lifecycle event publishing
//! - [`config`] - Configuration management
//! - [`error`] - Structured error handling
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use servly_core::actors::PartyResolver;
//! use servly_core::events::EventPublisher;
//! use servly_core::repository::InMemoryJobRepository;
//! use servly_core::state_machine::{JobState, JobStateMachine, TransitionRequest};
//! use uuid::Uuid;
//!
//! # async fn example(job_id: Uuid, vendor_id: Uuid) -> Result<(), Box<dyn std::error::Error>> {
//! let machine = JobStateMachine::new(
//!     Arc::new(InMemoryJobRepository::new()),
//!     Arc::new(PartyResolver),
//!     EventPublisher::default(),
//! );
//!
//! let outcome = machine
//!     .request_transition(job_id, JobState::Accepted, vendor_id, TransitionRequest::default())
//!     .await?;
//! println!("job moved from {} to {}", outcome.previous_status, outcome.job.status);
//! # Ok(())
//! # }
//! ```

pub mod activity;
pub mod actors;
pub mod catalog;
pub mod config;
pub mod constants;
pub mod error;
pub mod events;
pub mod logging;
pub mod models;
pub mod repository;
pub mod services;
pub mod state_machine;

pub use activity::ActivityLog;
pub use actors::{ActorResolver, PartyResolver};
pub use catalog::{CatalogLookup, Offering, StaticCatalog};
pub use config::CoreConfig;
pub use error::{CoreError, Result};
pub use events::EventPublisher;
pub use models::{Job, NewJobRequest};
pub use repository::{InMemoryJobRepository, JobRepository, RepositoryError};
#[cfg(feature = "postgres")]
pub use repository::PgJobRepository;
pub use services::BookingService;
pub use state_machine::{
    ActorRole, JobState, JobStateMachine, LifecycleError, LifecycleResult, TransitionOutcome,
    TransitionRequest,
};
