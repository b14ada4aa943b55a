use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use mongodb::{bson, Collection};

use crate::account::db::AccountStore;
use crate::account::Account;
use crate::error::Error;
use crate::session::db::SessionStore;
use crate::session::{Session, SessionId};

pub type MongoAccountStore = Collection<Account>;
pub type MongoSessionStore = Collection<Session>;

pub trait Database: Send + Sync {
    fn accounts(&self) -> &dyn AccountStore;
    fn sessions(&self) -> &dyn SessionStore;
}

#[derive(Debug, Clone)]
pub struct MongoDatabase {
    accounts: Collection<Account>,
    sessions: Collection<Session>,
}

impl MongoDatabase {
    pub async fn initialize(db: mongodb::Database) -> Result<MongoDatabase, Error> {
        // ping the database to ensure connection is established
        db.run_command(bson::doc! { "ping": 1 }, None).await?;

        Ok(MongoDatabase {
            accounts: db.collection("accounts"),
            sessions: db.collection("sessions"),
        })
    }
}

impl Database for MongoDatabase {
    fn accounts(&self) -> &dyn AccountStore {
        &self.accounts
    }

    fn sessions(&self) -> &dyn SessionStore {
        &self.sessions
    }
}

/// Keeps everything in process memory, so accounts and sessions are lost on
/// restart. Used for local runs and tests.
#[derive(Debug, Default)]
pub struct MemoryDatabase {
    accounts: MemoryAccountStore,
    sessions: MemorySessionStore,
}

impl MemoryDatabase {
    pub fn new() -> MemoryDatabase {
        MemoryDatabase::default()
    }
}

impl Database for MemoryDatabase {
    fn accounts(&self) -> &dyn AccountStore {
        &self.accounts
    }

    fn sessions(&self) -> &dyn SessionStore {
        &self.sessions
    }
}

#[derive(Debug, Default)]
pub struct MemoryAccountStore(Mutex<HashMap<String, Account>>);

impl MemoryAccountStore {
    pub(crate) fn lock(&self) -> MutexGuard<'_, HashMap<String, Account>> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[derive(Debug, Default)]
pub struct MemorySessionStore(Mutex<HashMap<SessionId, Session>>);

impl MemorySessionStore {
    pub(crate) fn lock(&self) -> MutexGuard<'_, HashMap<SessionId, Session>> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
