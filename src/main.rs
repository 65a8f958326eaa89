mod api;
mod config;
mod db;
mod error;
mod student_id;
mod types;

use std::sync::Arc;

use actix_web::{middleware, web, App, HttpServer};
use anyhow::Context;
use secrecy::ExposeSecret;
use tracing_subscriber::EnvFilter;

use crate::config::AppConfig;
use crate::db::{GradeRepository, GradeStore, MongoClient};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env().context("failed to load configuration")?;

    let client = MongoClient::new(config.database.uri.expose_secret(), &config.database.name)
        .await
        .context("failed to create MongoDB client")?;
    client
        .ping()
        .await
        .context("failed to reach MongoDB")?;
    tracing::info!(
        "Connected to MongoDB database {} (collection {})",
        config.database.name,
        config.database.collection
    );

    let store: Arc<dyn GradeStore> =
        Arc::new(GradeRepository::new(client, config.database.collection.clone()));
    let store = web::Data::from(store);

    let (host, port) = (config.server.host.clone(), config.server.port);
    tracing::info!("Starting server at http://{}:{}", host, port);

    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .app_data(store.clone())
            .configure(api::configure)
    })
    .bind((host.as_str(), port))
    .with_context(|| format!("failed to bind {}:{}", host, port))?
    .run()
    .await?;

    Ok(())
}
