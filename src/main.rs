use fugle_price::api;
use fugle_price::config::Settings;
use fugle_price::telemetry;
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    telemetry::init_tracing(telemetry::DEFAULT_FILTER);
    telemetry::init_metrics()?;

    // Refuse to start without the vendor credential.
    let settings = match Settings::from_env() {
        Ok(settings) => settings,
        Err(e) => {
            error!(error = %e, "invalid configuration");
            return Err(e.into());
        }
    };
    info!(?settings, "configuration loaded");

    api::serve(&settings).await
}
