use std::sync::Arc;

use tracing::{debug, error, info, instrument};
use uuid::Uuid;

use shared_api_client::HealthieClient;
use shared_config::{AppConfig, TimeWindowConfig};

use crate::error::NotificationError;
use crate::models::{RunStage, RunSummary, SenderIdentity};
use crate::services::collector::AppointmentCollector;
use crate::services::dispatcher::NotificationDispatcher;
use crate::services::report::render_summary;
use crate::services::window::TimeWindowResolver;

/// Runs one notification pass:
/// connectivity -> identity -> collection -> dispatch -> summary.
///
/// Errors in the first three stages abort the run. Dispatch never fails as a
/// whole; per-record problems end up in the summary counts.
pub struct RunOrchestrator {
    client: Arc<HealthieClient>,
    time_window: TimeWindowConfig,
}

impl RunOrchestrator {
    pub fn new(config: &AppConfig) -> Self {
        Self::with_client(Arc::new(HealthieClient::new(config)), config.time_window.clone())
    }

    pub fn with_client(client: Arc<HealthieClient>, time_window: TimeWindowConfig) -> Self {
        Self { client, time_window }
    }

    #[instrument(skip(self), fields(run_id = %Uuid::new_v4()))]
    pub async fn run(&self) -> Result<RunSummary, NotificationError> {
        let result = self.run_stages().await;

        if let Err(e) = &result {
            error!("Run aborted during {:?} stage: {}", e.stage(), e);
        }
        result
    }

    async fn run_stages(&self) -> Result<RunSummary, NotificationError> {
        self.verify_connectivity().await?;
        let sender = self.resolve_sender().await?;

        enter(RunStage::Collection);
        let window = TimeWindowResolver::resolve(&self.time_window);
        info!("Fetching all users and their appointments...");
        let users = self
            .client
            .users_with_appointments()
            .await
            .map_err(NotificationError::Collection)?;
        info!("Found {} total users in the system", users.len());

        let collection = AppointmentCollector::collect(&users, &window);
        if collection.records.is_empty() {
            info!("No upcoming appointments found within the configured time window.");
            return Ok(RunSummary {
                window: Some(window),
                stats: collection.stats,
                ..RunSummary::default()
            });
        }
        info!(
            "Found {} appointment(s) within the time window. Processing in chronological order...",
            collection.records.len()
        );

        enter(RunStage::Dispatch);
        let dispatcher = NotificationDispatcher::new(Arc::clone(&self.client), &self.time_window);
        let report = dispatcher.dispatch(&collection.records, &sender).await;

        enter(RunStage::Summary);
        let summary = RunSummary::from_report(
            window,
            collection.stats,
            collection.records.len(),
            &report,
        );
        info!("\n{}", render_summary(&summary));

        Ok(summary)
    }

    /// Minimal identity query proving the endpoint and key work.
    pub async fn verify_connectivity(&self) -> Result<(), NotificationError> {
        enter(RunStage::Connectivity);
        self.client
            .current_user()
            .await
            .map_err(NotificationError::Connectivity)?;
        info!("API connection and key verified successfully.");
        Ok(())
    }

    /// Identity notes are attributed to.
    pub async fn resolve_sender(&self) -> Result<SenderIdentity, NotificationError> {
        enter(RunStage::Identity);
        let user = self
            .client
            .current_user()
            .await
            .map_err(|e| NotificationError::Identity(e.to_string()))?
            .ok_or_else(|| NotificationError::Identity("no current user returned".to_string()))?;

        let id = user
            .id
            .ok_or_else(|| NotificationError::Identity("current user has no id".to_string()))?;
        let sender = SenderIdentity {
            id,
            first_name: user.first_name.unwrap_or_default(),
            last_name: user.last_name.unwrap_or_default(),
        };

        info!(
            "Authenticated as user: {} {} (ID: {})",
            sender.first_name, sender.last_name, sender.id
        );
        Ok(sender)
    }
}

fn enter(stage: RunStage) {
    debug!("Entering {:?} stage", stage);
}
