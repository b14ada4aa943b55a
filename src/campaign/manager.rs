use tracing::info;

use crate::database::Database;
use crate::error::Error;
use crate::provider::Provider;
use crate::session::{self, SessionId};

use super::{prompt, share, CampaignRecord, CampaignRequest, Ledger, PendingGenerations};

/// Asks the provider for ad copy and appends the result to the session's
/// ledger. Returns the new record with its index.
#[tracing::instrument(skip(db, provider, pending))]
pub async fn generate_campaign(
    db: &dyn Database,
    provider: &dyn Provider,
    pending: &PendingGenerations,
    session_id: SessionId,
    request: CampaignRequest,
) -> Result<(usize, CampaignRecord), Error> {
    let _guard = pending.acquire(session_id)?;

    let session = session::manager::expect_session(db, session_id).await?;

    let prompt = prompt::render_prompt(&request);
    let ad_copy = provider.generate(&prompt).await?;

    let record = CampaignRecord {
        platform: request.platform,
        product: request.product,
        audience: request.audience,
        ad_copy,
    };

    db.sessions().push_campaign(session_id, &record).await?;
    info!(index = session.ledger.len(), "campaign generated");

    Ok((session.ledger.len(), record))
}

#[tracing::instrument(skip(db))]
pub async fn get_campaigns(db: &dyn Database, session_id: SessionId) -> Result<Ledger, Error> {
    let session = session::manager::expect_session(db, session_id).await?;

    Ok(session.ledger)
}

#[tracing::instrument(skip(db))]
pub async fn export_campaigns(db: &dyn Database, session_id: SessionId) -> Result<String, Error> {
    let session = session::manager::expect_session(db, session_id).await?;

    session.ledger.export_csv()
}

#[tracing::instrument(skip(db))]
pub async fn share_campaign(
    db: &dyn Database,
    session_id: SessionId,
    index: usize,
    base_url: &str,
) -> Result<String, Error> {
    let session = session::manager::expect_session(db, session_id).await?;

    let record = session
        .ledger
        .get(index)
        .ok_or(Error::CampaignNotFound { index })?;

    share::share_link(record, base_url)
}
