use std::sync::Arc;

use actix_web::web::{self, Data, JsonConfig, PathConfig, QueryConfig};
use actix_web::{App, HttpResponse, HttpServer};
use mongodb::Client;
use tracing::info;
use tracing_actix_web::TracingLogger;

pub mod account;
pub mod campaign;
pub mod config;
pub mod database;
pub mod error;
pub mod insight;
pub mod provider;
pub mod session;
pub mod typedid;

pub use error::Error;

use crate::campaign::PendingGenerations;
use crate::config::{Config, StorageConfig};
use crate::database::{Database, MemoryDatabase, MongoDatabase};
use crate::provider::{OpenAiProvider, Provider};

/// Registers every endpoint along with the extractor error formats. The app
/// must also carry `Data<dyn Database>`, `Data<dyn Provider>`,
/// `Data<PendingGenerations>` and `Data<Config>`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(JsonConfig::default().error_handler(|err, _req| {
        // format json errors with custom format
        Error::InvalidJson(err).into()
    }))
    .app_data(PathConfig::default().error_handler(|err, _req| {
        // format path errors with custom format
        Error::InvalidPath(err).into()
    }))
    .app_data(QueryConfig::default().error_handler(|err, _req| {
        // format query errors with custom format
        Error::InvalidQuery(err).into()
    }))
    .service(account::endpoints::signup)
    .service(session::endpoints::login)
    .service(session::endpoints::get_current_session)
    .service(session::endpoints::logout)
    .service(campaign::endpoints::create_campaign)
    .service(campaign::endpoints::get_campaigns)
    .service(campaign::endpoints::export_campaigns)
    .service(campaign::endpoints::share_campaign)
    .service(insight::endpoints::upload_insights);
}

pub async fn path_does_not_exist() -> Result<HttpResponse, Error> {
    Err(Error::PathDoesNotExist)
}

async fn connect(storage: &StorageConfig) -> Result<Arc<dyn Database>, Error> {
    match storage {
        StorageConfig::Mongo { uri, database } => {
            info!("connecting to db: {}", uri);
            let db = Client::with_uri_str(uri).await?.database(database);
            Ok(Arc::new(MongoDatabase::initialize(db).await?))
        }
        StorageConfig::Memory => {
            info!("using in-memory storage");
            Ok(Arc::new(MemoryDatabase::new()))
        }
    }
}

pub async fn run(config: Config) -> Result<(), Error> {
    let db = Data::from(connect(&config.storage).await?);
    let provider: Arc<dyn Provider> = Arc::new(OpenAiProvider::new(&config.provider)?);
    let provider = Data::from(provider);
    let pending = Data::new(PendingGenerations::new());
    let bind_address = config.bind_address.clone();
    let config = Data::new(config);

    info!("listening on {}", bind_address);
    HttpServer::new(move || {
        App::new()
            .app_data(db.clone())
            .app_data(provider.clone())
            .app_data(pending.clone())
            .app_data(config.clone())
            .wrap(TracingLogger::default())
            .configure(configure)
            .default_service(web::to(path_does_not_exist))
    })
    .bind(bind_address)?
    .run()
    .await?;

    Ok(())
}
