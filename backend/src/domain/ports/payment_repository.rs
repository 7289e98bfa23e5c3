//! Driven port for payment appointment storage.

use async_trait::async_trait;

use crate::domain::{PaymentAppointment, PaymentId, UserId};

use super::RecordPersistenceError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PaymentRepository: Send + Sync {
    async fn insert(&self, payment: &PaymentAppointment) -> Result<(), RecordPersistenceError>;

    /// Overwrite a stored appointment. Last write wins.
    async fn update(&self, payment: &PaymentAppointment) -> Result<(), RecordPersistenceError>;

    /// Remove an appointment, reporting whether it existed.
    async fn delete(&self, id: &PaymentId) -> Result<bool, RecordPersistenceError>;

    async fn find_by_id(
        &self,
        id: &PaymentId,
    ) -> Result<Option<PaymentAppointment>, RecordPersistenceError>;

    /// Appointments owned by `owner` in insertion order.
    async fn list_for_owner(
        &self,
        owner: &UserId,
    ) -> Result<Vec<PaymentAppointment>, RecordPersistenceError>;
}
