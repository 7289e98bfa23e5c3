//! Payment appointment handlers.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::info;

use super::ports::{PaymentRepository, PaymentService};
use super::store_errors::map_record_store_error;
use super::{
    Error, PaymentAppointment, PaymentFields, PaymentId, PaymentPatch, UserId, assert_owned,
};

const KIND: &str = "payment";

/// Payment handler implementing [`PaymentService`].
#[derive(Clone)]
pub struct PaymentHandler<R> {
    payments: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> PaymentHandler<R> {
    pub fn new(payments: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { payments, clock }
    }
}

impl<R> PaymentHandler<R>
where
    R: PaymentRepository,
{
    async fn load_owned(
        &self,
        caller: &UserId,
        id: &PaymentId,
    ) -> Result<PaymentAppointment, Error> {
        let payment = self
            .payments
            .find_by_id(id)
            .await
            .map_err(|err| map_record_store_error(KIND, err))?
            .ok_or_else(|| Error::not_found("Payment not found"))?;
        assert_owned(&payment, caller)?;
        Ok(payment)
    }
}

#[async_trait]
impl<R> PaymentService for PaymentHandler<R>
where
    R: PaymentRepository,
{
    async fn list(&self, caller: &UserId) -> Result<Vec<PaymentAppointment>, Error> {
        self.payments
            .list_for_owner(caller)
            .await
            .map_err(|err| map_record_store_error(KIND, err))
    }

    async fn create(
        &self,
        caller: &UserId,
        fields: PaymentFields,
    ) -> Result<PaymentAppointment, Error> {
        let payment =
            PaymentAppointment::create(PaymentId::random(), *caller, fields, self.clock.utc());
        self.payments
            .insert(&payment)
            .await
            .map_err(|err| map_record_store_error(KIND, err))?;
        info!(owner = %caller, payment_id = %payment.id(), "payment appointment created");
        Ok(payment)
    }

    async fn fetch(&self, caller: &UserId, id: &PaymentId) -> Result<PaymentAppointment, Error> {
        self.load_owned(caller, id).await
    }

    async fn update(
        &self,
        caller: &UserId,
        id: &PaymentId,
        patch: PaymentPatch,
    ) -> Result<PaymentAppointment, Error> {
        let mut payment = self.load_owned(caller, id).await?;
        payment.apply(patch, self.clock.utc());
        self.payments
            .update(&payment)
            .await
            .map_err(|err| map_record_store_error(KIND, err))?;
        Ok(payment)
    }

    async fn delete(&self, caller: &UserId, id: &PaymentId) -> Result<(), Error> {
        self.load_owned(caller, id).await?;
        if !self
            .payments
            .delete(id)
            .await
            .map_err(|err| map_record_store_error(KIND, err))?
        {
            return Err(Error::not_found("Payment not found"));
        }
        info!(owner = %caller, payment_id = %id, "payment appointment deleted");
        Ok(())
    }
}
