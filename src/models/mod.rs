pub mod enquiry;
pub mod homework;
pub mod payment;

use thiserror::Error;

pub use enquiry::{EnquiryStatus, InviteStatus};
pub use homework::SubmissionStatus;
pub use payment::{PaymentStatus, StudentBalance};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} status '{value}'")]
pub struct UnknownStatus {
    pub kind: &'static str,
    pub value: String,
}
