use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::UnknownStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Paid,
    Partial,
    Unpaid,
}

impl PaymentStatus {
    /// Fully paid once the running total covers the fees; anything above zero
    /// short of that is partial.
    pub fn from_amounts(paid_amount: f64, total_fees: f64) -> Self {
        if paid_amount >= total_fees {
            PaymentStatus::Paid
        } else if paid_amount > 0.0 {
            PaymentStatus::Partial
        } else {
            PaymentStatus::Unpaid
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Paid => "paid",
            PaymentStatus::Partial => "partial",
            PaymentStatus::Unpaid => "unpaid",
        }
    }
}

impl FromStr for PaymentStatus {
    type Err = UnknownStatus;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "paid" => Ok(PaymentStatus::Paid),
            "partial" => Ok(PaymentStatus::Partial),
            "unpaid" => Ok(PaymentStatus::Unpaid),
            _ => Err(UnknownStatus {
                kind: "payment",
                value: value.to_string(),
            }),
        }
    }
}

/// A student's fee position, summed from their payment records.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentBalance {
    pub total_fees: f64,
    pub paid_amount: f64,
}

impl StudentBalance {
    pub fn from_payments<I>(total_fees: f64, amounts: I) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        Self {
            total_fees,
            paid_amount: amounts.into_iter().sum(),
        }
    }

    pub fn status(&self) -> PaymentStatus {
        PaymentStatus::from_amounts(self.paid_amount, self.total_fees)
    }

    pub fn outstanding(&self) -> f64 {
        (self.total_fees - self.paid_amount).max(0.0)
    }
}
