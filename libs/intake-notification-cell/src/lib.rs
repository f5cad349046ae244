//! # Intake Notification Cell
//!
//! Finds appointments starting soon whose patients have not completed their
//! intake paperwork and sends the assigned provider a one-time reminder
//! through Healthie's messaging API.
//!
//! ```text
//! +-----------------------------------------------------+
//! |              Intake Notification Cell               |
//! +-----------------------------------------------------+
//! |  models.rs        |  Worklist records & outcomes    |
//! |  error.rs         |  Fatal setup errors             |
//! |  services/        |                                 |
//! |    window.rs      |  [now, now + H] resolution      |
//! |    collector.rs   |  Dedup, filter, order           |
//! |    message.rs     |  Reminder subject/body text     |
//! |    dispatcher.rs  |  Conversation + note workflow   |
//! |    orchestrator.rs|  Stage sequencing               |
//! |    report.rs      |  Cards and run summary          |
//! +-----------------------------------------------------+
//! ```
//!
//! A run is strictly sequential: one GraphQL call in flight at a time.

pub mod error;
pub mod models;
pub mod services;

pub use error::NotificationError;
pub use models::{
    AppointmentRecord, DispatchOutcome, DispatchReport, FailureStage, IntakeStatus,
    NotificationOutcome, PatientRef, ProviderRef, RunStage, RunSummary, SenderIdentity,
    SkipReason, TimeWindow,
};
pub use services::{
    AppointmentCollector, NotificationDispatcher, RunOrchestrator, TimeWindowResolver,
};
