//! PostgreSQL-backed `PaymentRepository`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{PaymentRepository, RecordPersistenceError};
use crate::domain::{PaymentAppointment, PaymentId, UserId};

use super::error_mapping::{record_diesel_error, record_pool_error};
use super::models::{PaymentChangeset, PaymentRow};
use super::pool::DbPool;
use super::schema::payment_appointments;

/// Diesel-backed implementation of the [`PaymentRepository`] port.
#[derive(Clone)]
pub struct DieselPaymentRepository {
    pool: DbPool,
}

impl DieselPaymentRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PaymentRepository for DieselPaymentRepository {
    async fn insert(&self, payment: &PaymentAppointment) -> Result<(), RecordPersistenceError> {
        let mut conn = self.pool.get().await.map_err(record_pool_error)?;
        diesel::insert_into(payment_appointments::table)
            .values(&PaymentRow::from(payment))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(record_diesel_error)
    }

    async fn update(&self, payment: &PaymentAppointment) -> Result<(), RecordPersistenceError> {
        let mut conn = self.pool.get().await.map_err(record_pool_error)?;
        diesel::update(payment_appointments::table.find(payment.id().as_uuid()))
            .set(&PaymentChangeset::from(payment))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(record_diesel_error)
    }

    async fn delete(&self, id: &PaymentId) -> Result<bool, RecordPersistenceError> {
        let mut conn = self.pool.get().await.map_err(record_pool_error)?;
        diesel::delete(payment_appointments::table.find(id.as_uuid()))
            .execute(&mut conn)
            .await
            .map(|affected| affected > 0)
            .map_err(record_diesel_error)
    }

    async fn find_by_id(
        &self,
        id: &PaymentId,
    ) -> Result<Option<PaymentAppointment>, RecordPersistenceError> {
        let mut conn = self.pool.get().await.map_err(record_pool_error)?;
        let row: Option<PaymentRow> = payment_appointments::table
            .find(id.as_uuid())
            .select(PaymentRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(record_diesel_error)?;
        row.map(PaymentAppointment::try_from).transpose()
    }

    async fn list_for_owner(
        &self,
        owner: &UserId,
    ) -> Result<Vec<PaymentAppointment>, RecordPersistenceError> {
        let mut conn = self.pool.get().await.map_err(record_pool_error)?;
        let rows: Vec<PaymentRow> = payment_appointments::table
            .filter(payment_appointments::owner_id.eq(owner.as_uuid()))
            .order((
                payment_appointments::created_at.asc(),
                payment_appointments::id.asc(),
            ))
            .select(PaymentRow::as_select())
            .load(&mut conn)
            .await
            .map_err(record_diesel_error)?;
        rows.into_iter().map(PaymentAppointment::try_from).collect()
    }
}
