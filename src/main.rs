use biosite::configuration::get_configuration;
use biosite::startup::Application;
use biosite::telemetry::init_subscriber;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let configuration = get_configuration()?;
    init_subscriber(
        "biosite".into(),
        "info".into(),
        std::io::stdout,
        &configuration.telemetry,
    )?;

    let application = Application::build(configuration).await?;
    tracing::info!("Listening on port {}", application.port());
    application.run_until_stopped().await?;
    Ok(())
}
