//! In-memory user store.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{Email, UserAccount};

/// In-memory [`UserRepository`] keyed by email.
#[derive(Default)]
pub struct InMemoryUserRepository {
    accounts: Mutex<Vec<UserAccount>>,
}

impl InMemoryUserRepository {
    fn accounts(
        &self,
    ) -> Result<std::sync::MutexGuard<'_, Vec<UserAccount>>, UserPersistenceError> {
        self.accounts
            .lock()
            .map_err(|_| UserPersistenceError::connection("in-memory store lock poisoned"))
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, account: &UserAccount) -> Result<(), UserPersistenceError> {
        let mut accounts = self.accounts()?;
        if accounts.iter().any(|stored| stored.email() == account.email()) {
            return Err(UserPersistenceError::duplicate_email(account.email().as_ref()));
        }
        accounts.push(account.clone());
        Ok(())
    }

    async fn find_by_email(
        &self,
        email: &Email,
    ) -> Result<Option<UserAccount>, UserPersistenceError> {
        Ok(self
            .accounts()?
            .iter()
            .find(|stored| stored.email() == email)
            .cloned())
    }
}
