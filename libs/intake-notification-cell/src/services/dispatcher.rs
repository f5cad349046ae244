use std::sync::Arc;

use chrono::FixedOffset;
use tracing::{error, info, instrument, warn};

use shared_api_client::HealthieClient;
use shared_config::TimeWindowConfig;
use shared_models::healthie::FieldMessage;

use crate::models::{
    ActionableAppointment, AppointmentRecord, DispatchOutcome, DispatchReport, FailureStage,
    IntakeStatus, NotificationOutcome, SenderIdentity, SkipReason,
};
use crate::services::message::{
    compose_reminder, format_appointment_time, sent_log_line, MessageMode,
};
use crate::services::report::render_appointment_card;

/// Walks the worklist in order and runs the conversation + note workflow
/// for every patient with an incomplete intake.
///
/// Records are processed one at a time. Any failure is recorded against its
/// record and the walk moves on.
pub struct NotificationDispatcher {
    client: Arc<HealthieClient>,
    mode: MessageMode,
    display_offset: Option<FixedOffset>,
}

impl NotificationDispatcher {
    pub fn new(client: Arc<HealthieClient>, config: &TimeWindowConfig) -> Self {
        Self {
            client,
            mode: MessageMode::from_config(config),
            display_offset: config.display_offset,
        }
    }

    pub async fn dispatch(
        &self,
        records: &[AppointmentRecord],
        sender: &SenderIdentity,
    ) -> DispatchReport {
        let mut report = DispatchReport::default();

        for (index, record) in records.iter().enumerate() {
            let outcome = self.process_record(index, records.len(), record, sender).await;
            report.outcomes.push(outcome);
        }

        report
    }

    #[instrument(skip_all, fields(appointment_id = %record.id))]
    async fn process_record(
        &self,
        index: usize,
        total: usize,
        record: &AppointmentRecord,
        sender: &SenderIdentity,
    ) -> DispatchOutcome {
        let Some(target) = record.actionable() else {
            warn!(
                "Skipping appointment ID {}: Missing patient or provider information",
                record.id
            );
            return DispatchOutcome::Skipped {
                appointment_id: record.id.clone(),
                reason: SkipReason::MissingLinkage,
            };
        };

        info!("\n{}", render_appointment_card(index, total, record, self.display_offset.as_ref()));

        match target.patient.intake_status {
            IntakeStatus::Completed => {
                info!(
                    "No notification needed: Patient {} has completed their intake form",
                    target.patient.full_name()
                );
                DispatchOutcome::Satisfied { appointment_id: record.id.clone() }
            }
            IntakeStatus::Unknown => {
                warn!(
                    "Intake status unknown for Patient {}; not sending a notification",
                    target.patient.full_name()
                );
                DispatchOutcome::Skipped {
                    appointment_id: record.id.clone(),
                    reason: SkipReason::UnknownIntakeStatus,
                }
            }
            IntakeStatus::Incomplete => {
                info!("Patient has not completed intake form. Sending notification to provider...");
                self.notify(target, sender).await
            }
        }
    }

    async fn notify(
        &self,
        target: ActionableAppointment<'_>,
        sender: &SenderIdentity,
    ) -> DispatchOutcome {
        let appointment_id = target.record.id.clone();
        let appointment_time = format_appointment_time(target.record.date, self.display_offset.as_ref());
        let message = compose_reminder(self.mode, target.provider, target.patient, &appointment_time);

        let conversation_id = match self.start_conversation(&target, &message.subject).await {
            Ok(id) => id,
            Err(detail) => {
                error!(
                    "Failed to create conversation for Appointment ID {}. Reason: {}",
                    appointment_id, detail
                );
                return DispatchOutcome::Failed {
                    appointment_id,
                    stage: FailureStage::Conversation,
                    detail,
                };
            }
        };

        info!("Sending message in conversation {}...", conversation_id);
        let detail = match self
            .client
            .create_note(&sender.id, &message.body, &conversation_id)
            .await
        {
            Ok(payload) if payload.note.is_some() => {
                let line = sent_log_line(target.provider, target.patient, &appointment_time);
                info!("SUCCESS: {}", line);
                return DispatchOutcome::Sent(NotificationOutcome {
                    appointment_id,
                    message: line,
                });
            }
            Ok(payload) => match payload.messages.as_deref() {
                Some(messages) if !messages.is_empty() => FieldMessage::join(messages),
                _ => "no note returned".to_string(),
            },
            Err(e) => e.to_string(),
        };

        error!(
            "Failed to send note for Appointment ID {}. Reason: {}",
            appointment_id, detail
        );
        DispatchOutcome::Failed {
            appointment_id,
            stage: FailureStage::Note,
            detail,
        }
    }

    /// Opens a conversation with the provider. `Err` carries the reason.
    async fn start_conversation(
        &self,
        target: &ActionableAppointment<'_>,
        subject: &str,
    ) -> Result<String, String> {
        info!(
            "Creating conversation with provider {}...",
            target.provider.full_name()
        );

        let payload = self
            .client
            .create_conversation(target.doc_share_id, subject)
            .await
            .map_err(|e| e.to_string())?;

        match payload.conversation_id() {
            Some(id) => Ok(id.to_string()),
            None => Err(FieldMessage::join(payload.messages.as_deref().unwrap_or_default())),
        }
    }
}
