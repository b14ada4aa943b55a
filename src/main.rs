use tracing_subscriber::fmt::format::FmtSpan;

use adgenius::config::Config;
use adgenius::Error;

#[actix_web::main]
async fn main() -> Result<(), Error> {
    let config = Config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(config.env_filter())
        .with_span_events(FmtSpan::NEW)
        .compact()
        .init();

    adgenius::run(config).await
}
