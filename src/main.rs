use anyhow::Context;
use bookshelf_kernel::settings::Settings;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load().with_context(|| "failed to load bookshelf settings")?;
    bookshelf_telemetry::init(&settings.telemetry);

    tracing::info!(
        env = ?settings.environment,
        addr = %settings.server.bind_addr(),
        "bookshelf bootstrap starting"
    );

    bookshelf::run(settings).await?;

    tracing::info!("bookshelf shut down cleanly");
    Ok(())
}
