//! Weekend arithmetic for WeekendBot. The weekend runs from Saturday
//! 00:00 until Sunday ends, in the configured UTC offset.

use time::{Duration, OffsetDateTime, Time, UtcOffset, Weekday};

pub fn is_weekend(now: OffsetDateTime, offset: UtcOffset) -> bool {
    matches!(now.to_offset(offset).weekday(), Weekday::Saturday | Weekday::Sunday)
}

/// The time left until Saturday 00:00, or zero during the weekend.
pub fn time_until_weekend(now: OffsetDateTime, offset: UtcOffset) -> Duration {
    let local = now.to_offset(offset);

    if is_weekend(local, offset) {
        return Duration::ZERO;
    }

    let days_left = i64::from(local.weekday().number_days_from_monday());
    let saturday = local.date() + Duration::days(5 - days_left);
    let start = saturday.with_time(Time::MIDNIGHT).assume_offset(offset);

    start - local
}

/// Formats a duration as "2 days, 3 hours and 1 minute", rounding
/// up to the next minute.
pub fn describe(duration: Duration) -> String {
    let minutes = (duration.whole_seconds() + 59) / 60;
    let (days, hours, minutes) = (minutes / (24 * 60), minutes / 60 % 24, minutes % 60);

    let parts: Vec<String> = [(days, "day"), (hours, "hour"), (minutes, "minute")]
        .iter()
        .filter(|(n, _)| *n > 0)
        .map(|(n, unit)| format!("{} {}{}", n, unit, if *n == 1 { "" } else { "s" }))
        .collect();

    match parts.split_last() {
        None => "less than a minute".to_owned(),
        Some((last, [])) => last.clone(),
        Some((last, rest)) => format!("{} and {}", rest.join(", "), last),
    }
}

#[cfg(test)]
mod tests {
    use time::macros::{datetime, offset};
    use time::Duration;

    use super::{describe, is_weekend, time_until_weekend};

    #[test]
    fn saturday_and_sunday_are_weekend() {
        assert!(is_weekend(datetime!(2024-06-08 00:00 UTC), offset!(UTC)));
        assert!(is_weekend(datetime!(2024-06-09 23:59 UTC), offset!(UTC)));
        assert!(!is_weekend(datetime!(2024-06-10 00:00 UTC), offset!(UTC)));
        assert!(!is_weekend(datetime!(2024-06-07 23:59 UTC), offset!(UTC)));
    }

    #[test]
    fn offset_moves_the_weekend() {
        // Friday 23:00 UTC is already Saturday in UTC+2
        assert!(is_weekend(datetime!(2024-06-07 23:00 UTC), offset!(+2)));
        assert!(!is_weekend(datetime!(2024-06-07 23:00 UTC), offset!(UTC)));
    }

    #[test]
    fn countdown_to_saturday() {
        assert_eq!(
            time_until_weekend(datetime!(2024-06-07 18:30 UTC), offset!(UTC)),
            Duration::minutes(5 * 60 + 30)
        );
        assert_eq!(
            time_until_weekend(datetime!(2024-06-03 00:00 UTC), offset!(UTC)),
            Duration::days(5)
        );
        assert_eq!(
            time_until_weekend(datetime!(2024-06-08 12:00 UTC), offset!(UTC)),
            Duration::ZERO
        );
    }

    #[test]
    fn durations_read_naturally() {
        assert_eq!(describe(Duration::days(5)), "5 days");
        assert_eq!(describe(Duration::minutes(61)), "1 hour and 1 minute");
        assert_eq!(
            describe(Duration::days(2) + Duration::hours(3) + Duration::seconds(30)),
            "2 days, 3 hours and 1 minute"
        );
        assert_eq!(describe(Duration::ZERO), "less than a minute");
    }
}
