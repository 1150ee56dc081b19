use tracing_subscriber::EnvFilter;

use slimehop_host::config::HostConfig;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    tracing::info!("Slimehop host starting");

    let config = HostConfig::load();
    match slimehop_host::run(config).await {
        Ok(score) => tracing::info!(score, "Final score"),
        Err(e) => {
            tracing::error!(error = %e, "Host failed");
            std::process::exit(1);
        },
    }
}
