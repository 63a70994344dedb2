use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use super::{
    error::ScheduleError,
    window::{parse_class_date, parse_class_time, TimeWindow},
};

/// Where a class sits relative to its live window. Always derived, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassStatus {
    Upcoming,
    Live,
    Completed,
}

impl ClassStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClassStatus::Upcoming => "upcoming",
            ClassStatus::Live => "live",
            ClassStatus::Completed => "completed",
        }
    }
}

pub fn classify(now: NaiveDateTime, class_date: NaiveDate, class_time: NaiveTime) -> ClassStatus {
    TimeWindow::for_class(class_date, class_time).status_at(now)
}

/// Same as [`classify`], for date and time strings straight off an API record.
pub fn classify_raw(
    now: NaiveDateTime,
    class_date: &str,
    class_time: &str,
) -> Result<ClassStatus, ScheduleError> {
    let date = parse_class_date(class_date)?;
    let time = parse_class_time(class_time)?;
    Ok(classify(now, date, time))
}

/// The join action is only offered while the class is live.
pub fn can_join(now: NaiveDateTime, class_date: NaiveDate, class_time: NaiveTime) -> bool {
    classify(now, class_date, class_time) == ClassStatus::Live
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;

    fn class_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
    }

    fn class_time() -> NaiveTime {
        NaiveTime::from_hms_opt(10, 0, 0).unwrap()
    }

    fn start() -> NaiveDateTime {
        class_date().and_time(class_time())
    }

    #[test]
    fn before_start_is_upcoming() {
        for offset in [TimeDelta::days(3), TimeDelta::minutes(1), TimeDelta::milliseconds(1)] {
            assert_eq!(
                classify(start() - offset, class_date(), class_time()),
                ClassStatus::Upcoming
            );
        }
    }

    #[test]
    fn live_window_is_closed_on_both_ends() {
        let end = start() + TimeDelta::minutes(60);
        for now in [start(), start() + TimeDelta::minutes(30), end] {
            assert_eq!(classify(now, class_date(), class_time()), ClassStatus::Live);
        }
    }

    #[test]
    fn after_end_is_completed() {
        let end = start() + TimeDelta::minutes(60);
        for now in [end + TimeDelta::milliseconds(1), end + TimeDelta::days(1)] {
            assert_eq!(
                classify(now, class_date(), class_time()),
                ClassStatus::Completed
            );
        }
    }

    #[test]
    fn classification_is_idempotent() {
        let now = start() + TimeDelta::minutes(59);
        let first = classify(now, class_date(), class_time());
        let second = classify(now, class_date(), class_time());
        assert_eq!(first, second);
    }

    #[test]
    fn raw_strings_classify_or_fail_loudly() {
        let now = start() + TimeDelta::minutes(5);
        assert_eq!(
            classify_raw(now, "2024-01-15", "10:00 AM").unwrap(),
            ClassStatus::Live
        );
        assert!(classify_raw(now, "2024-13-40", "10:00").is_err());
    }

    #[test]
    fn join_enabled_only_while_live() {
        assert!(!can_join(start() - TimeDelta::seconds(1), class_date(), class_time()));
        assert!(can_join(start(), class_date(), class_time()));
        assert!(!can_join(
            start() + TimeDelta::minutes(61),
            class_date(),
            class_time()
        ));
    }
}
