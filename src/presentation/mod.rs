pub mod badge;
pub mod class_card;
pub mod countdown;

pub use badge::{present, style_for, Badge, BadgeStyle, Presentable};
pub use class_card::{NextClassCard, ScheduledClass, EMPTY_MESSAGE, JOIN_LABEL};
pub use countdown::{format_date_time, CountdownDisplay, ABSOLUTE_DISPLAY_THRESHOLD_HOURS};
