use actix_web::web::{Data, Json};
use actix_web::{delete, get, post, HttpResponse};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::account::{self, CredentialsBody};
use crate::database::Database;
use crate::error::Error;

use super::{manager, Session, SessionId, SessionToken};

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct SessionBody {
    pub session_id: SessionId,
    pub username: String,
    pub created_at: DateTime<Utc>,
}

impl SessionBody {
    pub fn render(session: Session) -> SessionBody {
        SessionBody {
            session_id: session.id,
            username: session.username,
            created_at: session.created_at,
        }
    }
}

#[post("/sessions")]
#[tracing::instrument(skip(db, body))]
pub async fn login(
    db: Data<dyn Database>,
    token: Option<SessionToken>,
    body: Json<CredentialsBody>,
) -> Result<Json<SessionBody>, Error> {
    let body = body.into_inner();

    let session = account::manager::login(
        db.get_ref(),
        token.map(|token| token.0),
        &body.username,
        &body.password,
    )
    .await?;

    Ok(Json(SessionBody::render(session)))
}

#[get("/sessions/current")]
#[tracing::instrument(skip(db))]
pub async fn get_current_session(
    db: Data<dyn Database>,
    token: Option<SessionToken>,
) -> Result<Json<SessionBody>, Error> {
    let session = manager::current_session(db.get_ref(), token.map(|token| token.0))
        .await?
        .ok_or(Error::NotAuthenticated)?;

    Ok(Json(SessionBody::render(session)))
}

#[delete("/sessions/current")]
#[tracing::instrument(skip(db))]
pub async fn logout(db: Data<dyn Database>, token: SessionToken) -> Result<HttpResponse, Error> {
    manager::end_session(db.get_ref(), token.0).await?;

    Ok(HttpResponse::NoContent().finish())
}
