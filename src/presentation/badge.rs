use serde::Serialize;

use crate::{
    models::{EnquiryStatus, InviteStatus, PaymentStatus, SubmissionStatus},
    schedule::{ClassStatus, ScheduleStatus},
};

/// Visual treatment of a status badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum BadgeStyle {
    /// Success colouring that also pulses, reserved for classes in progress.
    Live,
    Success,
    Warning,
    Error,
    Info,
    Neutral,
}

impl BadgeStyle {
    pub fn css_class(&self) -> &'static str {
        match self {
            BadgeStyle::Live => "badge-live",
            BadgeStyle::Success => "badge-success",
            BadgeStyle::Warning => "badge-warning",
            BadgeStyle::Error => "badge-error",
            BadgeStyle::Info => "badge-info",
            BadgeStyle::Neutral => "badge-default",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Badge {
    pub label: String,
    pub style: BadgeStyle,
}

impl Badge {
    pub fn style_class(&self) -> &'static str {
        self.style.css_class()
    }
}

/// Style for a status string coming off the wire. Case-insensitive; anything
/// unrecognised is neutral.
pub fn style_for(status: &str) -> BadgeStyle {
    match status.trim().to_ascii_lowercase().as_str() {
        "live" => BadgeStyle::Live,
        "success" | "completed" | "paid" | "enrolled" | "accepted" | "reviewed" => {
            BadgeStyle::Success
        }
        "warning" | "partial" | "rescheduled" | "contacted" | "pending" => BadgeStyle::Warning,
        "error" | "danger" | "unpaid" | "cancelled" | "rejected" => BadgeStyle::Error,
        "info" | "upcoming" | "scheduled" | "new" | "submitted" => BadgeStyle::Info,
        _ => BadgeStyle::Neutral,
    }
}

/// Badge for a raw status string, labelled with the string as given.
pub fn present(status: &str) -> Badge {
    Badge {
        label: status.to_string(),
        style: style_for(status),
    }
}

/// Closed status enums map to badges without any fallback case.
pub trait Presentable {
    fn label(&self) -> &'static str;
    fn style(&self) -> BadgeStyle;

    fn badge(&self) -> Badge {
        Badge {
            label: self.label().to_string(),
            style: self.style(),
        }
    }
}

impl Presentable for ClassStatus {
    fn label(&self) -> &'static str {
        self.as_str()
    }

    fn style(&self) -> BadgeStyle {
        match self {
            ClassStatus::Upcoming => BadgeStyle::Info,
            ClassStatus::Live => BadgeStyle::Live,
            ClassStatus::Completed => BadgeStyle::Success,
        }
    }
}

impl Presentable for ScheduleStatus {
    fn label(&self) -> &'static str {
        self.as_str()
    }

    fn style(&self) -> BadgeStyle {
        match self {
            ScheduleStatus::Scheduled => BadgeStyle::Info,
            ScheduleStatus::Completed => BadgeStyle::Success,
            ScheduleStatus::Cancelled => BadgeStyle::Error,
            ScheduleStatus::Rescheduled => BadgeStyle::Warning,
        }
    }
}

impl Presentable for PaymentStatus {
    fn label(&self) -> &'static str {
        self.as_str()
    }

    fn style(&self) -> BadgeStyle {
        match self {
            PaymentStatus::Paid => BadgeStyle::Success,
            PaymentStatus::Partial => BadgeStyle::Warning,
            PaymentStatus::Unpaid => BadgeStyle::Error,
        }
    }
}

impl Presentable for EnquiryStatus {
    fn label(&self) -> &'static str {
        self.as_str()
    }

    fn style(&self) -> BadgeStyle {
        match self {
            EnquiryStatus::New => BadgeStyle::Info,
            EnquiryStatus::Contacted => BadgeStyle::Warning,
            EnquiryStatus::Enrolled => BadgeStyle::Success,
            EnquiryStatus::Rejected => BadgeStyle::Error,
        }
    }
}

impl Presentable for InviteStatus {
    fn label(&self) -> &'static str {
        self.as_str()
    }

    fn style(&self) -> BadgeStyle {
        match self {
            InviteStatus::Pending => BadgeStyle::Warning,
            InviteStatus::Accepted => BadgeStyle::Success,
        }
    }
}

impl Presentable for SubmissionStatus {
    fn label(&self) -> &'static str {
        self.as_str()
    }

    fn style(&self) -> BadgeStyle {
        match self {
            SubmissionStatus::Submitted => BadgeStyle::Info,
            SubmissionStatus::Reviewed => BadgeStyle::Success,
        }
    }
}
