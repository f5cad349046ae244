use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Closed interval `[start, end]` used to admit appointments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeWindow {
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant <= self.end
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderRef {
    pub id: Option<String>,
    pub first_name: String,
    pub last_name: String,
    /// Target for starting a conversation; without it the record is not actionable.
    pub doc_share_id: Option<String>,
}

impl ProviderRef {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Three-way reading of `has_completed_intake_forms`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntakeStatus {
    Completed,
    Incomplete,
    /// Field absent or null upstream. Never triggers a notification.
    Unknown,
}

impl From<Option<bool>> for IntakeStatus {
    fn from(value: Option<bool>) -> Self {
        match value {
            Some(true) => IntakeStatus::Completed,
            Some(false) => IntakeStatus::Incomplete,
            None => IntakeStatus::Unknown,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientRef {
    /// Not needed to notify; only shown in reports.
    pub id: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub intake_status: IntakeStatus,
}

impl PatientRef {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// One appointment admitted into the worklist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppointmentRecord {
    pub id: String,
    pub date: DateTime<Utc>,
    pub location: Option<String>,
    pub provider: Option<ProviderRef>,
    pub patient: Option<PatientRef>,
}

/// A record that passed the actionability gate.
#[derive(Debug, Clone, Copy)]
pub struct ActionableAppointment<'a> {
    pub record: &'a AppointmentRecord,
    pub provider: &'a ProviderRef,
    pub patient: &'a PatientRef,
    pub doc_share_id: &'a str,
}

impl AppointmentRecord {
    /// Returns the linked provider and patient when the record can be acted on.
    pub fn actionable(&self) -> Option<ActionableAppointment<'_>> {
        let provider = self.provider.as_ref()?;
        let patient = self.patient.as_ref()?;
        let doc_share_id = provider.doc_share_id.as_deref().filter(|id| !id.is_empty())?;

        Some(ActionableAppointment {
            record: self,
            provider,
            patient,
            doc_share_id,
        })
    }
}

/// Counters gathered while scanning the users response.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionStats {
    pub users: usize,
    pub users_with_next_app: usize,
    pub listed_appointments: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CollectionResult {
    pub records: Vec<AppointmentRecord>,
    pub stats: CollectionStats,
}

/// Sender identity notes are attributed to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SenderIdentity {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
}

/// A confirmed delivery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationOutcome {
    pub appointment_id: String,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    MissingLinkage,
    UnknownIntakeStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureStage {
    Conversation,
    Note,
}

/// What happened to one worklist record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum DispatchOutcome {
    Sent(NotificationOutcome),
    /// Intake already completed; nothing owed.
    Satisfied { appointment_id: String },
    Skipped { appointment_id: String, reason: SkipReason },
    Failed { appointment_id: String, stage: FailureStage, detail: String },
}

impl DispatchOutcome {
    pub fn appointment_id(&self) -> &str {
        match self {
            DispatchOutcome::Sent(outcome) => &outcome.appointment_id,
            DispatchOutcome::Satisfied { appointment_id }
            | DispatchOutcome::Skipped { appointment_id, .. }
            | DispatchOutcome::Failed { appointment_id, .. } => appointment_id,
        }
    }
}

/// Per-record outcomes, in worklist order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchReport {
    pub outcomes: Vec<DispatchOutcome>,
}

impl DispatchReport {
    pub fn sent(&self) -> Vec<&NotificationOutcome> {
        self.outcomes
            .iter()
            .filter_map(|o| match o {
                DispatchOutcome::Sent(outcome) => Some(outcome),
                _ => None,
            })
            .collect()
    }

    pub fn sent_messages(&self) -> Vec<String> {
        self.sent().into_iter().map(|o| o.message.clone()).collect()
    }

    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, DispatchOutcome::Skipped { .. }))
    }

    pub fn satisfied(&self) -> usize {
        self.count(|o| matches!(o, DispatchOutcome::Satisfied { .. }))
    }

    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, DispatchOutcome::Failed { .. }))
    }

    fn count(&self, predicate: impl Fn(&DispatchOutcome) -> bool) -> usize {
        self.outcomes.iter().filter(|o| predicate(o)).count()
    }
}

/// Stages of a run. Failures before `Dispatch` abort the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStage {
    Connectivity,
    Identity,
    Collection,
    Dispatch,
    Summary,
}

/// Result of a run that got past setup.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub window: Option<TimeWindow>,
    pub stats: CollectionStats,
    pub appointments_found: usize,
    pub notifications_sent: usize,
    pub skipped: usize,
    pub satisfied: usize,
    pub failed: usize,
    /// Appointment ids in the order they were handled.
    pub processed: Vec<String>,
    pub sent_messages: Vec<String>,
}

impl RunSummary {
    pub fn from_report(
        window: TimeWindow,
        stats: CollectionStats,
        appointments_found: usize,
        report: &DispatchReport,
    ) -> Self {
        let sent_messages = report.sent_messages();
        Self {
            window: Some(window),
            stats,
            appointments_found,
            notifications_sent: sent_messages.len(),
            skipped: report.skipped(),
            satisfied: report.satisfied(),
            failed: report.failed(),
            processed: report
                .outcomes
                .iter()
                .map(|outcome| outcome.appointment_id().to_string())
                .collect(),
            sent_messages,
        }
    }
}
