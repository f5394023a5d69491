//! DateTime display utilities.

use std::fmt;

use jiff::{tz::TimeZone, Timestamp};

use crate::grouping::parse_created_at;

/// Formats a timestamp as `YYYY-MM-DD HH:MM:SS TZ` in the system time zone.
pub struct LocalDateTime<'a>(pub &'a Timestamp);

impl<'a> fmt::Display for LocalDateTime<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            self.0
                .to_zoned(TimeZone::system())
                .strftime("%Y-%m-%d %H:%M:%S %Z")
        )
    }
}

/// A session creation time as stored by the backend.
///
/// Parseable values are shown in local time. Anything else is shown as
/// "unknown" so that the session still lists.
pub struct CreatedAt<'a>(pub Option<&'a str>);

impl<'a> fmt::Display for CreatedAt<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tz = TimeZone::system();
        let at = parse_created_at(self.0, &tz);
        if at == Timestamp::MIN {
            write!(f, "unknown")
        } else {
            write!(f, "{}", LocalDateTime(&at))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_created_at_unknown() {
        assert_eq!(CreatedAt(None).to_string(), "unknown");
        assert_eq!(CreatedAt(Some("yesterday-ish")).to_string(), "unknown");
    }

    #[test]
    fn test_created_at_valid() {
        let shown = CreatedAt(Some("2024-03-05T10:00:00Z")).to_string();
        assert!(shown.starts_with("2024-03-0"));
    }
}
