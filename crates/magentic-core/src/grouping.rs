//! Recency grouping and ordering of sessions for the sidebar.
//!
//! Sessions are bucketed against calendar-day boundaries computed from a
//! caller-supplied `now`, so results are deterministic and testable. The time
//! zone of `now` decides where midnight falls and how creation times without
//! an offset are read.
//!
//! A `created_at` that is missing or cannot be parsed is treated as
//! [`Timestamp::MIN`]: such sessions always land in the "older" bucket and
//! sort after every session with a valid timestamp.

use jiff::{
    civil::{Date, DateTime},
    tz::TimeZone,
    Timestamp, ToSpan, Zoned,
};

use crate::models::{Session, SessionGroups, SessionSidebar};

/// Parses a backend creation time.
///
/// Accepts instants with an offset (`2025-03-15T09:00:00Z`), civil date-times
/// without one (`2025-03-15T09:00:00.123456`, `2025-03-15 09:00:00`) and bare
/// dates. Civil values are interpreted in `tz`, so a bare date means midnight
/// in `tz` rather than midnight UTC. Anything else, including a missing value,
/// yields [`Timestamp::MIN`].
pub fn parse_created_at(raw: Option<&str>, tz: &TimeZone) -> Timestamp {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Timestamp::MIN;
    };

    if let Ok(ts) = raw.parse::<Timestamp>() {
        return ts;
    }
    if let Ok(dt) = raw.parse::<DateTime>() {
        if let Ok(zoned) = dt.to_zoned(tz.clone()) {
            return zoned.timestamp();
        }
    }
    if let Ok(date) = raw.parse::<Date>() {
        if let Ok(zoned) = date.to_zoned(tz.clone()) {
            return zoned.timestamp();
        }
    }

    log::debug!("Unparseable session timestamp {raw:?}, treating as oldest");
    Timestamp::MIN
}

/// Recency bucket of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bucket {
    Today,
    Yesterday,
    Last7Days,
    Last30Days,
    Older,
}

/// Lower bounds of the recency buckets, derived from a reference time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayBoundaries {
    pub today: Timestamp,
    pub yesterday: Timestamp,
    pub last7_days: Timestamp,
    pub last30_days: Timestamp,
}

impl DayBoundaries {
    /// Computes the boundaries for `now`: local midnight of its date, then
    /// one, seven and thirty calendar days before that.
    pub fn from_now(now: &Zoned) -> Self {
        // Only the far ends of the representable range can fail here.
        let today = now.start_of_day().unwrap_or_else(|_| now.clone());
        let days_before = |days: i64| {
            today
                .checked_sub(days.days())
                .map(|z| z.timestamp())
                .unwrap_or(Timestamp::MIN)
        };

        Self {
            today: today.timestamp(),
            yesterday: days_before(1),
            last7_days: days_before(7),
            last30_days: days_before(30),
        }
    }

    /// Classifies an instant using half-open intervals, checked from the most
    /// recent bucket down.
    pub fn bucket(&self, at: Timestamp) -> Bucket {
        if at >= self.today {
            Bucket::Today
        } else if at >= self.yesterday {
            Bucket::Yesterday
        } else if at >= self.last7_days {
            Bucket::Last7Days
        } else if at >= self.last30_days {
            Bucket::Last30Days
        } else {
            Bucket::Older
        }
    }
}

/// Partitions sessions into recency buckets, keeping input order within each
/// bucket.
pub fn group_sessions(sessions: &[Session], now: &Zoned) -> SessionGroups {
    let boundaries = DayBoundaries::from_now(now);
    let tz = now.time_zone();

    let mut groups = SessionGroups::default();
    for session in sessions {
        let bucket = match boundaries.bucket(session.created_timestamp(tz)) {
            Bucket::Today => &mut groups.today,
            Bucket::Yesterday => &mut groups.yesterday,
            Bucket::Last7Days => &mut groups.last7_days,
            Bucket::Last30Days => &mut groups.last30_days,
            Bucket::Older => &mut groups.older,
        };
        bucket.push(session.clone());
    }
    groups
}

/// Returns the sessions newest first. Sessions created at the same instant
/// keep their input order.
pub fn sort_sessions_desc(sessions: &[Session], tz: &TimeZone) -> Vec<Session> {
    let mut keyed: Vec<(Timestamp, &Session)> = sessions
        .iter()
        .map(|session| (session.created_timestamp(tz), session))
        .collect();

    // `sort_by` is stable.
    keyed.sort_by(|(a, _), (b, _)| b.cmp(a));

    keyed.into_iter().map(|(_, session)| session.clone()).collect()
}

/// Builds the sidebar view: sessions sorted newest first, then bucketed.
pub fn build_sidebar(sessions: &[Session], now: &Zoned) -> SessionSidebar {
    let sorted = sort_sessions_desc(sessions, now.time_zone());
    let groups = group_sessions(&sorted, now);
    SessionSidebar { sorted, groups }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use jiff::{civil::date, tz};

    use super::*;

    fn session(id: i64, created_at: Option<&str>) -> Session {
        Session {
            id,
            name: format!("Session {id}"),
            created_at: created_at.map(String::from),
            team_id: None,
        }
    }

    fn now_utc() -> Zoned {
        date(2025, 3, 15)
            .at(14, 30, 0, 0)
            .to_zoned(TimeZone::UTC)
            .expect("valid zoned time")
    }

    fn ids(sessions: &[Session]) -> Vec<i64> {
        sessions.iter().map(|s| s.id).collect()
    }

    #[test]
    fn test_boundaries_are_calendar_days_before_midnight() {
        let b = DayBoundaries::from_now(&now_utc());
        assert_eq!(b.today.to_string(), "2025-03-15T00:00:00Z");
        assert_eq!(b.yesterday.to_string(), "2025-03-14T00:00:00Z");
        assert_eq!(b.last7_days.to_string(), "2025-03-08T00:00:00Z");
        assert_eq!(b.last30_days.to_string(), "2025-02-13T00:00:00Z");
    }

    #[test]
    fn test_bucket_edges_are_half_open() {
        let sessions = vec![
            session(1, Some("2025-03-15T00:00:00Z")),
            session(2, Some("2025-03-14T23:59:59Z")),
            session(3, Some("2025-03-14T00:00:00Z")),
            session(4, Some("2025-03-13T23:59:59Z")),
            session(5, Some("2025-03-08T00:00:00Z")),
            session(6, Some("2025-03-07T23:59:59Z")),
            session(7, Some("2025-02-13T00:00:00Z")),
            session(8, Some("2025-02-12T23:59:59Z")),
        ];

        let groups = group_sessions(&sessions, &now_utc());

        assert_eq!(ids(&groups.today), vec![1]);
        assert_eq!(ids(&groups.yesterday), vec![2, 3]);
        assert_eq!(ids(&groups.last7_days), vec![4, 5]);
        assert_eq!(ids(&groups.last30_days), vec![6, 7]);
        assert_eq!(ids(&groups.older), vec![8]);
    }

    #[test]
    fn test_future_sessions_count_as_today() {
        let sessions = vec![session(1, Some("2025-03-20T08:00:00Z"))];
        let groups = group_sessions(&sessions, &now_utc());
        assert_eq!(ids(&groups.today), vec![1]);
    }

    #[test]
    fn test_malformed_timestamps_fall_into_older() {
        let sessions = vec![
            session(1, None),
            session(2, Some("")),
            session(3, Some("not a date")),
            session(4, Some("2025-13-45T99:00:00Z")),
        ];

        let groups = group_sessions(&sessions, &now_utc());

        assert_eq!(ids(&groups.older), vec![1, 2, 3, 4]);
        assert_eq!(groups.len(), 4);
    }

    #[test]
    fn test_civil_timestamps_use_the_reference_zone() {
        let tokyo = TimeZone::fixed(tz::offset(9));
        let now = date(2025, 3, 15)
            .at(10, 0, 0, 0)
            .to_zoned(tokyo)
            .expect("valid zoned time");

        let sessions = vec![
            // 05:00 on the 15th in UTC+9
            session(1, Some("2025-03-14T20:00:00Z")),
            // civil time, read as UTC+9
            session(2, Some("2025-03-14T23:30:00.250000")),
            session(3, Some("2025-03-14 08:00:00")),
            session(4, Some("2025-03-14")),
        ];

        let groups = group_sessions(&sessions, &now);

        assert_eq!(ids(&groups.today), vec![1]);
        assert_eq!(ids(&groups.yesterday), vec![2, 3, 4]);
    }

    #[test]
    fn test_bare_date_is_midnight_in_reference_zone() {
        let tokyo = TimeZone::fixed(tz::offset(9));
        let parsed = parse_created_at(Some("2025-03-14"), &tokyo);
        let expected: Timestamp = "2025-03-13T15:00:00Z".parse().expect("valid timestamp");
        assert_eq!(parsed, expected);
    }

    #[test]
    fn test_buckets_are_disjoint_and_exhaustive() {
        let now = now_utc();
        let sessions: Vec<Session> = (0..120)
            .map(|i| {
                let created = now
                    .timestamp()
                    .checked_sub((i * 9).hours())
                    .expect("in range")
                    .to_string();
                let raw = if i % 17 == 0 { "garbage".to_string() } else { created };
                session(i, Some(&raw))
            })
            .collect();

        let groups = group_sessions(&sessions, &now);

        let mut seen = HashSet::new();
        for (_, bucket) in groups.labelled() {
            for s in bucket {
                assert!(seen.insert(s.id), "session {} in two buckets", s.id);
            }
        }
        let all: HashSet<i64> = sessions.iter().map(|s| s.id).collect();
        assert_eq!(seen, all);
    }

    #[test]
    fn test_sort_is_descending_and_stable() {
        let sessions = vec![
            session(1, Some("2025-03-01T10:00:00Z")),
            session(2, Some("2025-03-10T10:00:00Z")),
            session(3, Some("bad")),
            session(4, Some("2025-03-01T10:00:00Z")),
            session(5, Some("2025-03-12T10:00:00Z")),
            session(6, None),
        ];

        let sorted = sort_sessions_desc(&sessions, &TimeZone::UTC);

        assert_eq!(ids(&sorted), vec![5, 2, 1, 4, 3, 6]);
    }

    #[test]
    fn test_sort_places_pre_epoch_before_malformed() {
        let sessions = vec![session(1, Some("junk")), session(2, Some("1969-07-20T20:17:00Z"))];
        let sorted = sort_sessions_desc(&sessions, &TimeZone::UTC);
        assert_eq!(ids(&sorted), vec![2, 1]);
    }

    #[test]
    fn test_sidebar_groups_are_newest_first() {
        let sessions = vec![
            session(1, Some("2025-03-15T08:00:00Z")),
            session(2, Some("2025-03-15T12:00:00Z")),
            session(3, Some("2025-01-01T12:00:00Z")),
        ];

        let sidebar = build_sidebar(&sessions, &now_utc());

        assert_eq!(ids(&sidebar.sorted), vec![2, 1, 3]);
        assert_eq!(ids(&sidebar.groups.today), vec![2, 1]);
        assert_eq!(ids(&sidebar.groups.older), vec![3]);
    }
}
