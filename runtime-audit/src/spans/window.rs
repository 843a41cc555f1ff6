//! Aggregation window resolution.

use super::SpanError;
use crate::config::SpanWindow;
use chrono::{DateTime, Months, NaiveDate, Utc};

/// Resolves a window into the `(from, to)` strings sent to the API.
///
/// Relative windows are passed through for the API to interpret. A
/// previous-month window becomes two absolute RFC 3339 timestamps.
///
/// # Errors
///
/// Returns [`SpanError::Window`] if the month arithmetic or hour is invalid.
pub fn resolve_window(window: &SpanWindow, now: DateTime<Utc>) -> Result<(String, String), SpanError> {
    match window {
        SpanWindow::Relative { from, to } => Ok((from.clone(), to.clone())),
        SpanWindow::PreviousMonth { hour } => {
            let month_ago = now
                .checked_sub_months(Months::new(1))
                .ok_or_else(|| SpanError::Window(format!("no month before {now}")))?;

            Ok((
                at_hour(month_ago.date_naive(), *hour)?,
                at_hour(now.date_naive(), *hour)?,
            ))
        }
    }
}

fn at_hour(date: NaiveDate, hour: u32) -> Result<String, SpanError> {
    date.and_hms_opt(hour, 0, 0)
        .map(|time| time.and_utc().format("%Y-%m-%dT%H:%M:%SZ").to_string())
        .ok_or_else(|| SpanError::Window(format!("invalid hour {hour}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn relative_window_passes_through() {
        let (from, to) = resolve_window(&SpanWindow::default(), Utc::now()).unwrap();
        assert_eq!((from.as_str(), to.as_str()), ("now-2w", "now"));
    }

    #[test]
    fn previous_month_uses_fixed_hour() {
        let now = Utc.with_ymd_and_hms(2024, 5, 20, 14, 45, 10).unwrap();

        let (from, to) = resolve_window(&SpanWindow::PreviousMonth { hour: 3 }, now).unwrap();

        assert_eq!(from, "2024-04-20T03:00:00Z");
        assert_eq!(to, "2024-05-20T03:00:00Z");
    }

    #[test]
    fn previous_month_clamps_to_month_end() {
        let now = Utc.with_ymd_and_hms(2024, 3, 31, 0, 0, 0).unwrap();

        let (from, _) = resolve_window(&SpanWindow::PreviousMonth { hour: 3 }, now).unwrap();

        assert_eq!(from, "2024-02-29T03:00:00Z");
    }

    #[test]
    fn rejects_invalid_hour() {
        let result = resolve_window(&SpanWindow::PreviousMonth { hour: 25 }, Utc::now());
        assert!(matches!(result, Err(SpanError::Window(_))));
    }
}
