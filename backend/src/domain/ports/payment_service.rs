//! Driving port for payment appointment handlers.

use async_trait::async_trait;

use crate::domain::{Error, PaymentAppointment, PaymentFields, PaymentId, PaymentPatch, UserId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PaymentService: Send + Sync {
    async fn list(&self, caller: &UserId) -> Result<Vec<PaymentAppointment>, Error>;

    async fn create(
        &self,
        caller: &UserId,
        fields: PaymentFields,
    ) -> Result<PaymentAppointment, Error>;

    /// Load one appointment, applying the ownership guard.
    async fn fetch(&self, caller: &UserId, id: &PaymentId) -> Result<PaymentAppointment, Error>;

    async fn update(
        &self,
        caller: &UserId,
        id: &PaymentId,
        patch: PaymentPatch,
    ) -> Result<PaymentAppointment, Error>;

    async fn delete(&self, caller: &UserId, id: &PaymentId) -> Result<(), Error>;
}
