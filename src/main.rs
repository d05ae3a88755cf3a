mod config;
mod domain;
mod catalog;
mod filter;
mod repo;
mod notifier;
mod job;

#[cfg(test)]
mod test_server;

use crate::catalog::GamerPowerClient;
use crate::notifier::{MatrixClient, Notifier};
use crate::repo::StateStore;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    #[cfg(debug_assertions)]
    dotenvy::dotenv().ok();

    pretty_env_logger::formatted_timed_builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let app_config = config::AppConfig::from_env()?;
    let matrix_config = config::MatrixConfig::from_env()?;

    log::info!("homeserver: {}", matrix_config.homeserver);
    log::info!("posting as {} into {}", matrix_config.user, matrix_config.room_id);
    log::info!("allowed platforms: {}", app_config.allowed_platforms);

    let http = reqwest::Client::builder()
        .timeout(app_config.http_timeout)
        .build()?;
    let job = job::Job::new(
        GamerPowerClient::new(http.clone(), app_config.catalog_url.clone()),
        Notifier::new(MatrixClient::new(http, matrix_config)),
        StateStore::new(app_config.state_file.clone()),
        app_config.allowed_platforms.clone(),
    );

    match app_config.run_interval {
        Some(interval) => job.run_forever(interval).await,
        None => {
            let summary = job.run_once().await?;
            log::info!("run finished: {summary}");
        }
    }
    Ok(())
}
