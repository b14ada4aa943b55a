use async_trait::async_trait;
use mongodb::bson;

use crate::campaign::CampaignRecord;
use crate::database::{MemorySessionStore, MongoSessionStore};
use crate::error::Error;

use super::{Session, SessionId};

#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn insert_session(&self, session: &Session) -> Result<(), Error>;

    async fn fetch_session_by_id(&self, session_id: SessionId) -> Result<Option<Session>, Error>;

    /// Removing a session that does not exist is not an error.
    async fn delete_session(&self, session_id: SessionId) -> Result<(), Error>;

    /// Appends to the end of the session's ledger. Fails with
    /// `NotAuthenticated` if the session no longer exists.
    async fn push_campaign(
        &self,
        session_id: SessionId,
        record: &CampaignRecord,
    ) -> Result<(), Error>;
}

#[async_trait]
impl SessionStore for MongoSessionStore {
    #[tracing::instrument(skip(self, session), fields(session_id = %session.id))]
    async fn insert_session(&self, session: &Session) -> Result<(), Error> {
        self.insert_one(session, None).await?;

        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn fetch_session_by_id(&self, session_id: SessionId) -> Result<Option<Session>, Error> {
        let session: Option<Session> = self
            .find_one(bson::doc! { "_id": session_id }, None)
            .await?;

        Ok(session)
    }

    #[tracing::instrument(skip(self))]
    async fn delete_session(&self, session_id: SessionId) -> Result<(), Error> {
        self.delete_one(bson::doc! { "_id": session_id }, None)
            .await?;

        Ok(())
    }

    #[tracing::instrument(skip(self, record))]
    async fn push_campaign(
        &self,
        session_id: SessionId,
        record: &CampaignRecord,
    ) -> Result<(), Error> {
        let record = bson::to_bson(record)?;
        let result = self
            .update_one(
                bson::doc! { "_id": session_id },
                bson::doc! { "$push": { "ledger": record } },
                None,
            )
            .await?;

        if result.matched_count == 0 {
            return Err(Error::NotAuthenticated);
        }

        Ok(())
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    #[tracing::instrument(skip(self, session), fields(session_id = %session.id))]
    async fn insert_session(&self, session: &Session) -> Result<(), Error> {
        self.lock().insert(session.id, session.clone());

        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn fetch_session_by_id(&self, session_id: SessionId) -> Result<Option<Session>, Error> {
        Ok(self.lock().get(&session_id).cloned())
    }

    #[tracing::instrument(skip(self))]
    async fn delete_session(&self, session_id: SessionId) -> Result<(), Error> {
        self.lock().remove(&session_id);

        Ok(())
    }

    #[tracing::instrument(skip(self, record))]
    async fn push_campaign(
        &self,
        session_id: SessionId,
        record: &CampaignRecord,
    ) -> Result<(), Error> {
        let mut sessions = self.lock();
        let session = sessions
            .get_mut(&session_id)
            .ok_or(Error::NotAuthenticated)?;

        session.ledger.append(record.clone());

        Ok(())
    }
}
