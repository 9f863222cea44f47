use chrono::{DateTime, TimeZone, Utc};

/// One elapsed day reads `Yesterday` only below this many hours
const YESTERDAY_HOURS: i64 = 36;

/// Human label for how long ago `created` was, seen from `now`.
///
/// Elapsed time is floored to whole units and only elapsed time decides the
/// label. One elapsed day reads `Yesterday` below 36 hours and `1d ago` from
/// 36 hours up to 48. From seven days on the absolute date is shown using
/// `date_format` (a chrono format string) in `now`'s zone.
pub fn format_relative_time<Tz: TimeZone>(
    created: DateTime<Utc>,
    now: &DateTime<Tz>,
    date_format: &str,
) -> String
where
    Tz::Offset: std::fmt::Display,
{
    let elapsed = now.clone().with_timezone(&Utc) - created;
    let mins = elapsed.num_minutes();
    let hours = elapsed.num_hours();
    let days = elapsed.num_days();

    if mins < 1 {
        return "Just now".to_string();
    }
    if mins < 60 {
        return format!("{mins}m ago");
    }
    if hours < 24 {
        return format!("{hours}h ago");
    }

    if days == 1 && hours < YESTERDAY_HOURS {
        return "Yesterday".to_string();
    }
    if days < 7 {
        return format!("{days}d ago");
    }
    created
        .with_timezone(&now.timezone())
        .format(date_format)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, FixedOffset};

    const DATE_FMT: &str = "%-m/%-d/%Y";

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 10, 10, 0, 0).unwrap()
    }

    fn label(ago: Duration) -> String {
        format_relative_time(now() - ago, &now(), DATE_FMT)
    }

    #[test]
    fn under_a_minute_is_just_now() {
        assert_eq!(label(Duration::zero()), "Just now");
        assert_eq!(label(Duration::seconds(59)), "Just now");
    }

    #[test]
    fn future_timestamps_are_just_now() {
        assert_eq!(label(Duration::minutes(-5)), "Just now");
    }

    #[test]
    fn minutes() {
        assert_eq!(label(Duration::seconds(60)), "1m ago");
        assert_eq!(label(Duration::minutes(45)), "45m ago");
        assert_eq!(label(Duration::seconds(59 * 60 + 59)), "59m ago");
    }

    #[test]
    fn hours() {
        assert_eq!(label(Duration::minutes(60)), "1h ago");
        assert_eq!(label(Duration::minutes(23 * 60 + 59)), "23h ago");
    }

    #[test]
    fn one_day_boundary_ignores_time_of_day() {
        let cases = [
            (24, "Yesterday"),
            (35, "Yesterday"),
            (36, "1d ago"),
            (47, "1d ago"),
            (48, "2d ago"),
        ];
        for (h, m) in [(0, 0), (10, 0), (12, 0), (13, 0), (22, 0), (23, 59)] {
            let now = Utc.with_ymd_and_hms(2024, 3, 10, h, m, 0).unwrap();
            for (ago, expected) in cases {
                let created = now - Duration::hours(ago);
                assert_eq!(
                    format_relative_time(created, &now, DATE_FMT),
                    expected,
                    "{ago}h before {h:02}:{m:02}"
                );
            }
        }
    }

    #[test]
    fn thirty_six_hours_late_in_the_day_is_one_day_ago() {
        let now = Utc.with_ymd_and_hms(2024, 3, 10, 22, 0, 0).unwrap();
        assert_eq!(
            format_relative_time(now - Duration::hours(36), &now, DATE_FMT),
            "1d ago"
        );
    }

    #[test]
    fn days() {
        assert_eq!(label(Duration::days(2)), "2d ago");
        assert_eq!(label(Duration::days(6) + Duration::hours(23)), "6d ago");
    }

    #[test]
    fn a_week_or_more_is_an_absolute_date() {
        assert_eq!(label(Duration::days(7)), "3/3/2024");
        assert_eq!(label(Duration::days(8)), "3/2/2024");
    }

    #[test]
    fn absolute_dates_follow_the_viewer_zone() {
        let tz = FixedOffset::east_opt(11 * 3600).unwrap();
        // 2024-03-10 10:00 UTC is 21:00 local
        let local_now = now().with_timezone(&tz);
        let created = now() - Duration::hours(25);
        assert_eq!(format_relative_time(created, &local_now, DATE_FMT), "Yesterday");
        // 8 days earlier at 10:00 UTC is 3/2 21:00 local
        let created = now() - Duration::days(8);
        assert_eq!(format_relative_time(created, &local_now, DATE_FMT), "3/2/2024");
    }
}
