use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::UnknownStatus;

/// Lead pipeline: new, then contacted, ending enrolled or rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum EnquiryStatus {
    #[default]
    New,
    Contacted,
    Enrolled,
    Rejected,
}

impl EnquiryStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EnquiryStatus::New => "new",
            EnquiryStatus::Contacted => "contacted",
            EnquiryStatus::Enrolled => "enrolled",
            EnquiryStatus::Rejected => "rejected",
        }
    }

    pub fn is_closed(&self) -> bool {
        matches!(self, EnquiryStatus::Enrolled | EnquiryStatus::Rejected)
    }
}

impl FromStr for EnquiryStatus {
    type Err = UnknownStatus;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "new" => Ok(EnquiryStatus::New),
            "contacted" => Ok(EnquiryStatus::Contacted),
            "enrolled" => Ok(EnquiryStatus::Enrolled),
            "rejected" => Ok(EnquiryStatus::Rejected),
            _ => Err(UnknownStatus {
                kind: "enquiry",
                value: value.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum InviteStatus {
    #[default]
    Pending,
    Accepted,
}

impl InviteStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InviteStatus::Pending => "pending",
            InviteStatus::Accepted => "accepted",
        }
    }
}

impl FromStr for InviteStatus {
    type Err = UnknownStatus;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(InviteStatus::Pending),
            "accepted" => Ok(InviteStatus::Accepted),
            _ => Err(UnknownStatus {
                kind: "invite",
                value: value.to_string(),
            }),
        }
    }
}
