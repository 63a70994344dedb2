use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::UnknownStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionStatus {
    #[default]
    Submitted,
    Reviewed,
}

impl SubmissionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubmissionStatus::Submitted => "submitted",
            SubmissionStatus::Reviewed => "reviewed",
        }
    }
}

impl FromStr for SubmissionStatus {
    type Err = UnknownStatus;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "submitted" => Ok(SubmissionStatus::Submitted),
            "reviewed" => Ok(SubmissionStatus::Reviewed),
            _ => Err(UnknownStatus {
                kind: "submission",
                value: value.to_string(),
            }),
        }
    }
}
