use actix_web::post;
use actix_web::web::{Data, Json};
use serde::{Deserialize, Serialize};

use crate::database::Database;
use crate::error::Error;
use crate::session::{SessionBody, SessionToken};

use super::manager;

#[derive(Clone, Deserialize, Serialize)]
pub struct CredentialsBody {
    pub username: String,
    pub password: String,
}

#[post("/accounts")]
#[tracing::instrument(skip(db, body))]
pub async fn signup(
    db: Data<dyn Database>,
    token: Option<SessionToken>,
    body: Json<CredentialsBody>,
) -> Result<Json<SessionBody>, Error> {
    let body = body.into_inner();

    let session = manager::signup(
        db.get_ref(),
        token.map(|token| token.0),
        body.username,
        &body.password,
    )
    .await?;

    Ok(Json(SessionBody::render(session)))
}
