use chrono::{DateTime, FixedOffset, Local, Utc};

use shared_config::TimeWindowConfig;

use crate::models::{PatientRef, ProviderRef};

const PRODUCTION_SUBJECT: &str = "Incomplete Intake Form Reminder";
const TEST_SUBJECT: &str = "[TEST] Incomplete Intake Form Reminder";

/// Whether outgoing text is real clinical content or must be labelled as test output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageMode {
    Production,
    Test { hours_to_check: u32 },
}

impl MessageMode {
    pub fn from_config(config: &TimeWindowConfig) -> Self {
        if config.is_production_defaults() {
            MessageMode::Production
        } else {
            MessageMode::Test { hours_to_check: config.hours_to_check }
        }
    }
}

/// Subject and body of one reminder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderMessage {
    pub subject: String,
    pub body: String,
}

const APPOINTMENT_TIME_FORMAT: &str = "%A, %B %-d, %Y at %-I:%M %p";

/// Renders an appointment time like `Thursday, April 24, 2025 at 10:30 AM`,
/// in `offset` when given and in the host time zone otherwise.
pub fn format_appointment_time(date: DateTime<Utc>, offset: Option<&FixedOffset>) -> String {
    match offset {
        Some(offset) => date.with_timezone(offset).format(APPOINTMENT_TIME_FORMAT).to_string(),
        None => date.with_timezone(&Local).format(APPOINTMENT_TIME_FORMAT).to_string(),
    }
}

pub fn compose_reminder(
    mode: MessageMode,
    provider: &ProviderRef,
    patient: &PatientRef,
    appointment_time: &str,
) -> ReminderMessage {
    let opening = format!(
        "Hi Dr. {},\n\nYour patient, {}, has not yet completed their intake form for the upcoming appointment at {}.\n\n",
        provider.last_name,
        patient.full_name(),
        appointment_time
    );
    let closing = "Please remind them at the beginning of the session to complete it.\n\nThank you.";

    match mode {
        MessageMode::Production => ReminderMessage {
            subject: PRODUCTION_SUBJECT.to_string(),
            body: format!("{opening}{closing}"),
        },
        MessageMode::Test { hours_to_check } => ReminderMessage {
            subject: TEST_SUBJECT.to_string(),
            body: format!(
                "{opening}[THIS IS A TEST MESSAGE - Using {hours_to_check} hour window]\n\n{closing}"
            ),
        },
    }
}

/// Line recorded for a confirmed delivery.
pub fn sent_log_line(provider: &ProviderRef, patient: &PatientRef, appointment_time: &str) -> String {
    format!(
        "Sent message to Provider {} about Patient {}'s incomplete intake form for appointment on {}",
        provider.full_name(),
        patient.full_name(),
        appointment_time
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Offset, TimeZone};

    use crate::models::IntakeStatus;

    fn provider() -> ProviderRef {
        ProviderRef {
            id: Some("p-1".into()),
            first_name: "Gregory".into(),
            last_name: "House".into(),
            doc_share_id: Some("ds-1".into()),
        }
    }

    fn patient() -> PatientRef {
        PatientRef {
            id: Some("u-1".into()),
            first_name: "Pat".into(),
            last_name: "Doe".into(),
            intake_status: IntakeStatus::Incomplete,
        }
    }

    fn window_config(use_test_mode: bool, hours_to_check: u32) -> TimeWindowConfig {
        TimeWindowConfig {
            use_test_mode,
            hours_to_check,
            test_time: Utc.with_ymd_and_hms(2025, 4, 24, 17, 0, 0).unwrap(),
            display_offset: Some(Utc.fix()),
        }
    }

    #[test]
    fn test_format_appointment_time_in_offset() {
        let date = Utc.with_ymd_and_hms(2025, 4, 24, 17, 30, 0).unwrap();
        let pacific = FixedOffset::west_opt(7 * 3600).unwrap();

        assert_eq!(
            format_appointment_time(date, Some(&pacific)),
            "Thursday, April 24, 2025 at 10:30 AM"
        );
    }

    #[test]
    fn test_host_zone_is_resolved_per_date() {
        let winter = Utc.with_ymd_and_hms(2025, 1, 15, 17, 30, 0).unwrap();
        let summer = Utc.with_ymd_and_hms(2025, 7, 15, 17, 30, 0).unwrap();

        for date in [winter, summer] {
            let expected = date.with_timezone(&Local).format(APPOINTMENT_TIME_FORMAT).to_string();
            assert_eq!(format_appointment_time(date, None), expected);
        }
    }

    #[test]
    fn test_mode_follows_production_defaults() {
        assert_eq!(MessageMode::from_config(&window_config(false, 1)), MessageMode::Production);
        assert_eq!(
            MessageMode::from_config(&window_config(true, 1)),
            MessageMode::Test { hours_to_check: 1 }
        );
        assert_eq!(
            MessageMode::from_config(&window_config(false, 24)),
            MessageMode::Test { hours_to_check: 24 }
        );
    }

    #[test]
    fn test_production_reminder_has_no_test_marker() {
        let msg = compose_reminder(MessageMode::Production, &provider(), &patient(), "noon");

        assert_eq!(msg.subject, "Incomplete Intake Form Reminder");
        assert!(msg.body.starts_with("Hi Dr. House,\n\nYour patient, Pat Doe,"));
        assert!(!msg.body.contains("TEST"));
        assert!(msg.body.ends_with("Thank you."));
    }

    #[test]
    fn test_test_reminder_is_labelled() {
        let msg = compose_reminder(
            MessageMode::Test { hours_to_check: 24 },
            &provider(),
            &patient(),
            "noon",
        );

        assert_eq!(msg.subject, "[TEST] Incomplete Intake Form Reminder");
        assert!(msg.body.contains("[THIS IS A TEST MESSAGE - Using 24 hour window]"));
    }

    #[test]
    fn test_sent_log_line() {
        assert_eq!(
            sent_log_line(&provider(), &patient(), "noon"),
            "Sent message to Provider Gregory House about Patient Pat Doe's incomplete intake form for appointment on noon"
        );
    }
}
