pub mod collector;
pub mod dispatcher;
pub mod message;
pub mod orchestrator;
pub mod report;
pub mod window;

pub use collector::AppointmentCollector;
pub use dispatcher::NotificationDispatcher;
pub use orchestrator::RunOrchestrator;
pub use window::TimeWindowResolver;
