//! Data layer for the booking lifecycle core.

pub mod job;

pub use job::{
    Attachment, Cancellation, CompletedDeliverable, DurationEstimate, Job, Message, MessageKind,
    NewJobRequest, Pricing, PricingModel, Scheduling, StatusHistoryEntry,
};
