use chrono::NaiveDateTime;
use serde::Serialize;

use crate::{
    schedule::{next_class, ClassSession, ClassStatus},
    timer::CountdownState,
};

use super::{
    badge::{Badge, Presentable},
    countdown::CountdownDisplay,
};

pub const EMPTY_MESSAGE: &str = "No upcoming classes scheduled";
pub const JOIN_LABEL: &str = "Join Now (Live)";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledClass {
    pub class_id: String,
    pub batch_name: String,
    pub topic: Option<String>,
    pub starts_at: NaiveDateTime,
    pub status: ClassStatus,
    pub badge: Badge,
    pub countdown: CountdownDisplay,
    pub join_enabled: bool,
}

/// Dashboard card for the class a tutor or student should attend next.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum NextClassCard {
    Empty,
    Scheduled(ScheduledClass),
}

impl NextClassCard {
    pub fn build(next: Option<&ClassSession>, now: NaiveDateTime) -> Self {
        let Some(session) = next else {
            return NextClassCard::Empty;
        };

        let starts_at = session.starts_at();
        let status = session.status_at(now);
        let countdown =
            CountdownDisplay::select(CountdownState::between(now, starts_at), starts_at);

        NextClassCard::Scheduled(ScheduledClass {
            class_id: session.id.clone(),
            batch_name: session.display_name().to_string(),
            topic: session.topic.clone(),
            starts_at,
            status,
            badge: status.badge(),
            countdown,
            join_enabled: status == ClassStatus::Live,
        })
    }

    pub fn from_sessions(sessions: &[ClassSession], now: NaiveDateTime) -> Self {
        Self::build(next_class(sessions, now), now)
    }

    pub fn scheduled(&self) -> Option<&ScheduledClass> {
        match self {
            NextClassCard::Scheduled(class) => Some(class),
            NextClassCard::Empty => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presentation::BadgeStyle;
    use crate::schedule::{ingest, ClassScheduleRecord};
    use chrono::TimeDelta;

    fn sessions() -> Vec<ClassSession> {
        ingest(vec![ClassScheduleRecord {
            id: Some("c1".into()),
            batch_id: "b1".into(),
            batch_name: Some("Maths X".into()),
            class_date: "2024-01-15".into(),
            class_time: "10:00".into(),
            topic: Some("Quadratics".into()),
            ..Default::default()
        }])
        .accepted
    }

    fn start() -> NaiveDateTime {
        sessions()[0].starts_at()
    }

    #[test]
    fn empty_when_nothing_is_ahead() {
        let card = NextClassCard::from_sessions(&sessions(), start() + TimeDelta::hours(2));
        assert_eq!(card, NextClassCard::Empty);
        assert!(card.scheduled().is_none());
    }

    #[test]
    fn upcoming_class_counts_down_without_join() {
        let card = NextClassCard::from_sessions(&sessions(), start() - TimeDelta::seconds(90));
        let class = card.scheduled().unwrap();

        assert_eq!(class.batch_name, "Maths X");
        assert_eq!(class.status, ClassStatus::Upcoming);
        assert_eq!(class.badge.style, BadgeStyle::Info);
        assert!(!class.join_enabled);
        assert_eq!(
            class.countdown,
            CountdownDisplay::StartsIn {
                hours: 0,
                minutes: 1,
                seconds: 30
            }
        );
    }

    #[test]
    fn live_class_enables_join() {
        let card = NextClassCard::from_sessions(&sessions(), start() + TimeDelta::minutes(10));
        let class = card.scheduled().unwrap();

        assert_eq!(class.status, ClassStatus::Live);
        assert_eq!(class.badge.style, BadgeStyle::Live);
        assert!(class.join_enabled);
        assert_eq!(class.countdown, CountdownDisplay::Passed);
    }
}
