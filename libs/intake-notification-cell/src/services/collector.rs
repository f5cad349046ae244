use std::collections::HashSet;

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use shared_models::healthie::{AppointmentNode, UserNode};

use crate::models::{
    AppointmentRecord, CollectionResult, CollectionStats, IntakeStatus, PatientRef, ProviderRef,
    TimeWindow,
};

/// Timestamp layouts Healthie is known to emit besides RFC 3339.
const UPSTREAM_DATE_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S %z", "%Y-%m-%d %H:%M:%S%.f %z"];

pub fn parse_upstream_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    UPSTREAM_DATE_FORMATS
        .iter()
        .find_map(|fmt| DateTime::parse_from_str(raw, fmt).ok())
        .map(|dt| dt.with_timezone(&Utc))
}

/// Builds the deduplicated, chronologically ordered worklist.
pub struct AppointmentCollector;

impl AppointmentCollector {
    pub fn collect(users: &[UserNode], window: &TimeWindow) -> CollectionResult {
        let mut stats = CollectionStats {
            users: users.len(),
            ..CollectionStats::default()
        };
        let mut seen: HashSet<String> = HashSet::new();
        let mut records: Vec<AppointmentRecord> = Vec::new();

        // Pass 1: each user's next upcoming appointment.
        for user in users {
            let Some(appt) = user
                .next_app
                .as_ref()
                .filter(|a| a.date.as_deref().is_some_and(|d| !d.is_empty()))
            else {
                continue;
            };
            stats.users_with_next_app += 1;

            if let Some(record) = Self::admit(user, appt, window, &seen) {
                seen.insert(record.id.clone());
                records.push(record);
            }
        }
        info!("Found {} users with next_app set", stats.users_with_next_app);

        // Pass 2: full appointment lists; first-seen id wins.
        for user in users {
            let listed = user.appointments.as_deref().unwrap_or_default();
            stats.listed_appointments += listed.len();

            for appt in listed.iter().flatten() {
                if let Some(record) = Self::admit(user, appt, window, &seen) {
                    seen.insert(record.id.clone());
                    records.push(record);
                }
            }
        }
        info!(
            "Found {} total appointments across {} users",
            stats.listed_appointments, stats.users
        );

        // Stable: equal dates keep discovery order.
        records.sort_by_key(|r| r.date);

        CollectionResult { records, stats }
    }

    fn admit(
        user: &UserNode,
        appt: &AppointmentNode,
        window: &TimeWindow,
        seen: &HashSet<String>,
    ) -> Option<AppointmentRecord> {
        let raw_date = appt.date.as_deref()?;
        let Some(date) = parse_upstream_date(raw_date) else {
            debug!("Dropping appointment {:?}: unparseable date {:?}", appt.id, raw_date);
            return None;
        };
        if !window.contains(date) {
            return None;
        }
        let Some(id) = appt.id.clone() else {
            debug!("Dropping appointment dated {}: missing id", raw_date);
            return None;
        };
        if seen.contains(&id) {
            debug!("Appointment {} already collected", id);
            return None;
        }

        Some(AppointmentRecord {
            id,
            date,
            location: appt.location.clone().filter(|l| !l.is_empty()),
            provider: appt.provider.as_ref().map(|p| ProviderRef {
                id: p.id.clone(),
                first_name: p.first_name.clone().unwrap_or_default(),
                last_name: p.last_name.clone().unwrap_or_default(),
                doc_share_id: p.doc_share_id.clone(),
            }),
            patient: Some(Self::patient_of(user)),
        })
    }

    fn patient_of(user: &UserNode) -> PatientRef {
        PatientRef {
            id: user.id.clone(),
            first_name: user.first_name.clone().unwrap_or_default(),
            last_name: user.last_name.clone().unwrap_or_default(),
            intake_status: IntakeStatus::from(user.has_completed_intake_forms),
        }
    }
}
