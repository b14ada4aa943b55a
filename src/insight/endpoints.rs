use actix_web::post;
use actix_web::web::{Bytes, Data, Json};
use serde::{Deserialize, Serialize};

use crate::database::Database;
use crate::error::Error;
use crate::session::{self, SessionToken};

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct InsightBody {
    pub past_data: String,
}

/// Accepts a raw csv upload and returns the hint to send along with
/// `POST /campaigns`.
#[post("/insights")]
#[tracing::instrument(skip(db, body), fields(bytes = body.len()))]
pub async fn upload_insights(
    db: Data<dyn Database>,
    token: SessionToken,
    body: Bytes,
) -> Result<Json<InsightBody>, Error> {
    session::manager::expect_session(db.get_ref(), token.0).await?;

    let past_data = super::past_data_from_csv(&body)?;

    Ok(Json(InsightBody { past_data }))
}
