use actix_web::http::header::{ContentDisposition, DispositionParam, DispositionType};
use actix_web::web::{Data, Json, Path};
use actix_web::{get, post, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::database::Database;
use crate::error::Error;
use crate::provider::Provider;
use crate::session::SessionToken;

use super::{manager, CampaignRecord, CampaignRequest, PendingGenerations, Platform};

pub const EXPORT_FILE_NAME: &str = "ad_campaigns.csv";

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct CreateCampaignBody {
    pub platform: Platform,
    pub product: String,
    pub audience: String,
    #[serde(default)]
    pub past_data: Option<String>,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct CampaignBody {
    pub index: usize,
    pub platform: Platform,
    pub product: String,
    pub audience: String,
    pub ad_copy: String,
}

impl CampaignBody {
    pub fn render(index: usize, record: CampaignRecord) -> CampaignBody {
        CampaignBody {
            index,
            platform: record.platform,
            product: record.product,
            audience: record.audience,
            ad_copy: record.ad_copy,
        }
    }
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct ShareBody {
    pub link: String,
}

#[post("/campaigns")]
#[tracing::instrument(skip(db, provider, pending))]
pub async fn create_campaign(
    db: Data<dyn Database>,
    provider: Data<dyn Provider>,
    pending: Data<PendingGenerations>,
    token: SessionToken,
    body: Json<CreateCampaignBody>,
) -> Result<Json<CampaignBody>, Error> {
    let body = body.into_inner();

    let request = CampaignRequest {
        platform: body.platform,
        product: body.product,
        audience: body.audience,
        past_data: body.past_data,
    };

    let (index, record) = manager::generate_campaign(
        db.get_ref(),
        provider.get_ref(),
        pending.get_ref(),
        token.0,
        request,
    )
    .await?;

    Ok(Json(CampaignBody::render(index, record)))
}

#[get("/campaigns")]
#[tracing::instrument(skip(db))]
pub async fn get_campaigns(
    db: Data<dyn Database>,
    token: SessionToken,
) -> Result<Json<Vec<CampaignBody>>, Error> {
    let ledger = manager::get_campaigns(db.get_ref(), token.0).await?;

    let body = ledger
        .iter()
        .cloned()
        .enumerate()
        .map(|(index, record)| CampaignBody::render(index, record))
        .collect();

    Ok(Json(body))
}

#[get("/campaigns/export")]
#[tracing::instrument(skip(db))]
pub async fn export_campaigns(
    db: Data<dyn Database>,
    token: SessionToken,
) -> Result<HttpResponse, Error> {
    let csv = manager::export_campaigns(db.get_ref(), token.0).await?;

    Ok(HttpResponse::Ok()
        .content_type("text/csv; charset=utf-8")
        .insert_header(ContentDisposition {
            disposition: DispositionType::Attachment,
            parameters: vec![DispositionParam::Filename(EXPORT_FILE_NAME.into())],
        })
        .body(csv))
}

#[get("/campaigns/{index}/share")]
#[tracing::instrument(skip(db, config))]
pub async fn share_campaign(
    db: Data<dyn Database>,
    config: Data<Config>,
    token: SessionToken,
    params: Path<usize>,
) -> Result<Json<ShareBody>, Error> {
    let index = params.into_inner();

    let link = manager::share_campaign(db.get_ref(), token.0, index, &config.public_url).await?;

    Ok(Json(ShareBody { link }))
}
