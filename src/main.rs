use anyhow::Context;
use portfolio_kernel::settings::Settings;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load().context("failed to load portfolio settings")?;
    portfolio_telemetry::init(&settings.telemetry)?;

    tracing::info!(
        env = ?settings.environment,
        content = %settings.content.root.display(),
        "portfolio-site starting"
    );

    portfolio_site::serve(&settings).await?;

    tracing::info!("portfolio-site stopped");
    Ok(())
}
