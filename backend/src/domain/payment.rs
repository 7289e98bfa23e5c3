//! Payment appointments: reminders that a bill is due.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};

use super::PaymentId;
use super::record::{FieldPatch, OwnedRecord, RecordValidationError, RequiredText};

/// Amount owed. Finite and never negative.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Amount(f64);

impl Amount {
    /// Validate a raw amount.
    ///
    /// # Examples
    /// ```
    /// use clarity::domain::Amount;
    ///
    /// assert!(Amount::new(12.5).is_ok());
    /// assert!(Amount::new(-1.0).is_err());
    /// assert!(Amount::new(f64::NAN).is_err());
    /// ```
    pub fn new(value: f64) -> Result<Self, RecordValidationError> {
        if !value.is_finite() || value < 0.0 {
            return Err(RecordValidationError::InvalidAmount);
        }
        Ok(Self(value))
    }

    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }
}

/// Whether the appointment has been settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PaymentStatus {
    #[default]
    Pending,
    Paid,
}

impl PaymentStatus {
    /// Wire and storage label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Paid => "Paid",
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentStatus {
    type Err = RecordValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pending" => Ok(Self::Pending),
            "Paid" => Ok(Self::Paid),
            other => Err(RecordValidationError::UnknownStatus {
                field: "status",
                allowed: "\"Pending\", \"Paid\"",
                value: other.to_owned(),
            }),
        }
    }
}

/// Kind-specific fields of a payment appointment.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentFields {
    pub title: RequiredText,
    pub amount: Amount,
    pub date: DateTime<Utc>,
    pub status: PaymentStatus,
    pub notes: Option<String>,
}

impl PaymentFields {
    /// Validate creation input.
    pub fn try_new(
        title: &str,
        amount: f64,
        date: DateTime<Utc>,
        status: Option<PaymentStatus>,
        notes: Option<String>,
    ) -> Result<Self, RecordValidationError> {
        Ok(Self {
            title: RequiredText::new("title", title)?,
            amount: Amount::new(amount)?,
            date,
            status: status.unwrap_or_default(),
            notes,
        })
    }
}

/// A user's payment appointment.
pub type PaymentAppointment = OwnedRecord<PaymentId, PaymentFields>;

/// Partial update for a payment appointment; `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PaymentPatch {
    pub title: Option<RequiredText>,
    pub amount: Option<Amount>,
    pub date: Option<DateTime<Utc>>,
    pub status: Option<PaymentStatus>,
    pub notes: Option<String>,
}

impl FieldPatch<PaymentFields> for PaymentPatch {
    fn apply_to(self, fields: &mut PaymentFields) {
        if let Some(title) = self.title {
            fields.title = title;
        }
        if let Some(amount) = self.amount {
            fields.amount = amount;
        }
        if let Some(date) = self.date {
            fields.date = date;
        }
        if let Some(status) = self.status {
            fields.status = status;
        }
        if let Some(notes) = self.notes {
            fields.notes = Some(notes);
        }
    }
}
