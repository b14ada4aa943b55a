use chrono::Utc;
use tracing::info;

use crate::account::Account;
use crate::campaign::Ledger;
use crate::database::Database;
use crate::error::Error;

use super::{Session, SessionId};

#[tracing::instrument(skip(db, account), fields(username = %account.username))]
pub async fn begin_session(db: &dyn Database, account: &Account) -> Result<Session, Error> {
    let session = Session {
        id: SessionId::new(),
        username: account.username.clone(),
        created_at: Utc::now(),
        ledger: Ledger::new(),
    };

    db.sessions().insert_session(&session).await?;
    info!(session_id = %session.id, "session started");

    Ok(session)
}

#[tracing::instrument(skip(db))]
pub async fn end_session(db: &dyn Database, session_id: SessionId) -> Result<(), Error> {
    db.sessions().delete_session(session_id).await?;
    info!("session ended");

    Ok(())
}

#[tracing::instrument(skip(db))]
pub async fn expect_session(db: &dyn Database, session_id: SessionId) -> Result<Session, Error> {
    let session = db
        .sessions()
        .fetch_session_by_id(session_id)
        .await?
        .ok_or(Error::NotAuthenticated)?;

    Ok(session)
}

/// The session named by the token, if it is still alive.
#[tracing::instrument(skip(db))]
pub async fn current_session(
    db: &dyn Database,
    session_id: Option<SessionId>,
) -> Result<Option<Session>, Error> {
    let session_id = match session_id {
        Some(session_id) => session_id,
        None => return Ok(None),
    };

    let session = db.sessions().fetch_session_by_id(session_id).await?;

    Ok(session)
}

pub async fn is_authenticated(
    db: &dyn Database,
    session_id: Option<SessionId>,
) -> Result<bool, Error> {
    Ok(current_session(db, session_id).await?.is_some())
}
