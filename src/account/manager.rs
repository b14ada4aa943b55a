use chrono::Utc;
use tracing::{info, warn};

use crate::database::Database;
use crate::error::Error;
use crate::session::{self, Session, SessionId};

use super::password::PasswordHash;
use super::Account;

/// Registers the account and makes it current in a fresh session. A
/// `previous` session held by the caller is ended first.
#[tracing::instrument(skip(db, password))]
pub async fn signup(
    db: &dyn Database,
    previous: Option<SessionId>,
    username: String,
    password: &str,
) -> Result<Session, Error> {
    if username.trim().is_empty() {
        return Err(Error::InvalidUsername);
    }

    let account = Account {
        username,
        password: PasswordHash::new(password),
        created_at: Utc::now(),
    };

    db.accounts().insert_account(&account).await?;
    info!("account created");

    replace_session(db, previous, &account).await
}

#[tracing::instrument(skip(db, password))]
pub async fn login(
    db: &dyn Database,
    previous: Option<SessionId>,
    username: &str,
    password: &str,
) -> Result<Session, Error> {
    let account = db
        .accounts()
        .fetch_account_by_username(username)
        .await?
        .filter(|account| account.password.verify(password));

    let account = match account {
        Some(account) => account,
        None => {
            warn!("rejected login");
            return Err(Error::InvalidCredentials);
        }
    };

    replace_session(db, previous, &account).await
}

async fn replace_session(
    db: &dyn Database,
    previous: Option<SessionId>,
    account: &Account,
) -> Result<Session, Error> {
    if let Some(previous) = previous {
        session::manager::end_session(db, previous).await?;
    }

    session::manager::begin_session(db, account).await
}
