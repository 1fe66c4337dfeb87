use std::time::Duration;

use actix_web::{
    middleware,
    web::{self, Data},
    App, HttpServer,
};
use log::info;
use sqlx::SqlitePool;

mod config;
mod db;
mod errors;
mod routes;
mod structs;
#[cfg(test)]
mod test_support;
mod utils;

use config::Config;

/// Shared handler state; built once in `main` and handed to every worker.
#[derive(Debug, Clone)]
pub struct AppState {
    db_pool: SqlitePool,
    query_timeout: Duration,
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = Config::from_env().map_err(|e| {
        log::error!("FATAL: {}", e);
        e
    })?;

    let db_pool = db::connect(&config).await.map_err(|e| {
        log::error!("FATAL: could not open database: {}", e);
        e
    })?;
    db::init_schema(&db_pool).await.map_err(|e| {
        log::error!("FATAL: could not create schema: {}", e);
        e
    })?;

    let state = AppState {
        db_pool: db_pool.clone(),
        query_timeout: config.query_timeout,
    };

    info!(
        "Starting HTTP server on http://{}:{}/",
        config.host, config.port
    );

    HttpServer::new(move || {
        App::new()
            // enable automatic response compression - usually register this first
            .wrap(middleware::Compress::default())
            // enable logger - always register Actix Web Logger middleware last
            .wrap(middleware::Logger::default())
            .app_data(Data::new(state.clone()))
            .configure(routes::configure)
            .default_service(web::to(routes::default_handler))
    })
    .shutdown_timeout(30)
    .bind((config.host.as_str(), config.port))?
    .run()
    .await?;

    info!("HTTP server stopped, closing database pool");
    db_pool.close().await;
    Ok(())
}
