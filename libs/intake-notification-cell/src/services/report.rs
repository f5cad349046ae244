//! Plain-text rendering of per-appointment cards and the run summary.

use chrono::FixedOffset;

use crate::models::{AppointmentRecord, IntakeStatus, RunSummary};
use crate::services::message::format_appointment_time;

pub fn render_appointment_card(
    index: usize,
    total: usize,
    record: &AppointmentRecord,
    offset: Option<&FixedOffset>,
) -> String {
    let provider = record
        .provider
        .as_ref()
        .map(|p| format!("{} (ID: {})", p.full_name(), p.id.as_deref().unwrap_or("unknown")))
        .unwrap_or_else(|| "Not linked".to_string());
    let (patient, intake) = match record.patient.as_ref() {
        Some(p) => (
            format!("{} (ID: {})", p.full_name(), p.id.as_deref().unwrap_or("unknown")),
            match p.intake_status {
                IntakeStatus::Completed => "Yes",
                IntakeStatus::Incomplete => "No",
                IntakeStatus::Unknown => "Unknown",
            },
        ),
        None => ("Not linked".to_string(), "Unknown"),
    };

    format!(
        "APPOINTMENT {} OF {}\n\
         Appointment ID:   {}\n\
         Date & Time:      {}\n\
         Location:         {}\n\
         Provider:         {}\n\
         Patient:          {}\n\
         Intake Completed: {}",
        index + 1,
        total,
        record.id,
        format_appointment_time(record.date, offset),
        record.location.as_deref().unwrap_or("Not specified"),
        provider,
        patient,
        intake
    )
}

pub fn render_summary(summary: &RunSummary) -> String {
    let mut out = String::from("=== NOTIFICATION PROCESS SUMMARY ===\n");
    out.push_str(&format!("Total appointments found: {}\n", summary.appointments_found));
    out.push_str(&format!("Total notifications sent: {}\n", summary.notifications_sent));
    out.push_str(&format!(
        "Satisfied: {}  Skipped: {}  Failed: {}\n",
        summary.satisfied, summary.skipped, summary.failed
    ));

    if summary.sent_messages.is_empty() {
        out.push_str("\nNo messages were required or sent.");
    } else {
        out.push_str("\nMessages sent:");
        for (index, line) in summary.sent_messages.iter().enumerate() {
            out.push_str(&format!("\n{}. {}", index + 1, line));
        }
    }

    out
}
