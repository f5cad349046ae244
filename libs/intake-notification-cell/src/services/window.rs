use chrono::{DateTime, Duration, Utc};
use tracing::{info, warn};

use shared_config::TimeWindowConfig;

use crate::models::TimeWindow;
use crate::services::message::format_appointment_time;

pub struct TimeWindowResolver;

impl TimeWindowResolver {
    /// Window starting at the configured test instant, or at the wall clock.
    pub fn resolve(config: &TimeWindowConfig) -> TimeWindow {
        Self::resolve_at(config, Utc::now())
    }

    /// Same as [`resolve`](Self::resolve) with an explicit wall clock.
    /// `clock` is ignored in test mode.
    pub fn resolve_at(config: &TimeWindowConfig, clock: DateTime<Utc>) -> TimeWindow {
        let start = if config.use_test_mode {
            config.test_time
        } else {
            clock
        };
        let end = start
            .checked_add_signed(Duration::hours(i64::from(config.hours_to_check)))
            .unwrap_or_else(|| {
                warn!(
                    "{} hour window overflows the calendar, capping at {}",
                    config.hours_to_check,
                    DateTime::<Utc>::MAX_UTC
                );
                DateTime::<Utc>::MAX_UTC
            });

        info!(
            "Checking for appointments between {} and {}",
            format_appointment_time(start, config.display_offset.as_ref()),
            format_appointment_time(end, config.display_offset.as_ref())
        );
        if config.use_test_mode {
            info!(
                "*** TEST MODE ENABLED - Using {} hour window and simulated time ***",
                config.hours_to_check
            );
        }

        TimeWindow { start, end }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Offset, TimeZone};

    fn config(use_test_mode: bool, hours_to_check: u32) -> TimeWindowConfig {
        TimeWindowConfig {
            use_test_mode,
            hours_to_check,
            test_time: Utc.with_ymd_and_hms(2025, 4, 24, 17, 0, 0).unwrap(),
            display_offset: Some(Utc.fix()),
        }
    }

    #[test]
    fn test_test_mode_uses_fixed_instant() {
        let clock = Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap();
        let window = TimeWindowResolver::resolve_at(&config(true, 24), clock);

        assert_eq!(window.start, Utc.with_ymd_and_hms(2025, 4, 24, 17, 0, 0).unwrap());
        assert_eq!(window.end, Utc.with_ymd_and_hms(2025, 4, 25, 17, 0, 0).unwrap());
    }

    #[test]
    fn test_real_mode_uses_clock() {
        let clock = Utc.with_ymd_and_hms(2030, 1, 1, 8, 0, 0).unwrap();
        let window = TimeWindowResolver::resolve_at(&config(false, 1), clock);

        assert_eq!(window.start, clock);
        assert_eq!(window.end, clock + Duration::hours(1));
    }

    #[test]
    fn test_oversized_window_caps_instead_of_overflowing() {
        let window = TimeWindowResolver::resolve_at(&config(true, u32::MAX), Utc::now());

        assert_eq!(window.start, Utc.with_ymd_and_hms(2025, 4, 24, 17, 0, 0).unwrap());
        assert_eq!(window.end, DateTime::<Utc>::MAX_UTC);
        assert!(window.contains(Utc.with_ymd_and_hms(9999, 1, 1, 0, 0, 0).unwrap()));
    }

    #[test]
    fn test_resolution_is_repeatable_in_test_mode() {
        let cfg = config(true, 3);
        assert_eq!(TimeWindowResolver::resolve(&cfg), TimeWindowResolver::resolve(&cfg));
    }
}
