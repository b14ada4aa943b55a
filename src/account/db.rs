use std::collections::hash_map::Entry;

use async_trait::async_trait;
use mongodb::bson;
use mongodb::error::{Error as DatabaseError, ErrorKind, WriteFailure};

use crate::database::{MemoryAccountStore, MongoAccountStore};
use crate::error::Error;

use super::Account;

const DUPLICATE_KEY: i32 = 11000;

#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Fails with `DuplicateAccount` if the username is already taken.
    async fn insert_account(&self, account: &Account) -> Result<(), Error>;

    async fn fetch_account_by_username(&self, username: &str) -> Result<Option<Account>, Error>;
}

#[async_trait]
impl AccountStore for MongoAccountStore {
    #[tracing::instrument(skip(self, account), fields(username = %account.username))]
    async fn insert_account(&self, account: &Account) -> Result<(), Error> {
        match self.insert_one(account, None).await {
            Ok(_) => Ok(()),
            Err(err) if is_duplicate_key(&err) => Err(Error::DuplicateAccount {
                username: account.username.clone(),
            }),
            Err(err) => Err(err.into()),
        }
    }

    #[tracing::instrument(skip(self))]
    async fn fetch_account_by_username(&self, username: &str) -> Result<Option<Account>, Error> {
        let account: Option<Account> = self.find_one(bson::doc! { "_id": username }, None).await?;

        Ok(account)
    }
}

#[async_trait]
impl AccountStore for MemoryAccountStore {
    #[tracing::instrument(skip(self, account), fields(username = %account.username))]
    async fn insert_account(&self, account: &Account) -> Result<(), Error> {
        match self.lock().entry(account.username.clone()) {
            Entry::Occupied(_) => Err(Error::DuplicateAccount {
                username: account.username.clone(),
            }),
            Entry::Vacant(entry) => {
                entry.insert(account.clone());
                Ok(())
            }
        }
    }

    #[tracing::instrument(skip(self))]
    async fn fetch_account_by_username(&self, username: &str) -> Result<Option<Account>, Error> {
        Ok(self.lock().get(username).cloned())
    }
}

fn is_duplicate_key(err: &DatabaseError) -> bool {
    matches!(
        err.kind.as_ref(),
        ErrorKind::Write(WriteFailure::WriteError(write_error)) if write_error.code == DUPLICATE_KEY
    )
}
