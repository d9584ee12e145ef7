use actix_web::middleware::NormalizePath;
use actix_web::web::Data;
use actix_web::{App, HttpServer};
use anyhow::Context;

mod api;
mod auth;
mod config;
mod db;
mod docs;
mod error;
mod leave;
mod model;
mod models;
mod routes;
mod store;
mod utils;

use config::Config;
use db::init_db;

use crate::docs::ApiDoc;
use crate::store::mysql::MySqlLeaveStore;
use crate::utils::name_cache::{NameCache, warmup_name_cache};
use tracing::{error, info};
use tracing_appender::rolling;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;

    // Rolling daily log
    let file_appender = rolling::daily(&config.log_dir, "app.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_target(false)
        .with_level(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .pretty()
        .init();

    info!("Server starting...");

    let pool = init_db(&config.database_url).await?;
    let store = Data::new(MySqlLeaveStore::new(pool));
    let names = Data::new(NameCache::new(
        config.name_cache_capacity,
        config.name_cache_ttl,
    ));
    let rate_limit = routes::build_limiter(config.rate_protected_per_min)?;

    let warmup_store = store.clone();
    let warmup_cache = names.clone();
    actix_web::rt::spawn(async move {
        if let Err(e) = warmup_name_cache(warmup_store.pool(), &warmup_cache, 250).await {
            error!(error = ?e, "Failed to warmup employee name cache");
        }
    });

    let server_addr = config.server_addr.clone();
    let config_data = Data::new(config);

    HttpServer::new(move || {
        App::new()
            .wrap(actix_web::middleware::Logger::default())
            .wrap(NormalizePath::trim())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}") // wildcard matches the JS/CSS assets
                    .url("/api-doc/openapi.json", ApiDoc::openapi()),
            )
            .app_data(store.clone())
            .app_data(names.clone())
            .app_data(config_data.clone())
            .configure(|cfg| {
                routes::configure::<MySqlLeaveStore>(cfg, &config_data, &rate_limit)
            })
    })
    .bind(&server_addr)
    .with_context(|| format!("Failed to bind {server_addr}"))?
    .run()
    .await?;

    Ok(())
}
