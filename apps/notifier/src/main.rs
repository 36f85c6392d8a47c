use stepin_notifier::{init_tracing, run_once, Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    init_tracing();
    tracing::info!("Starting Step In subscription check");

    if let Err(e) = run_once(&config).await {
        tracing::error!("Error in main process: {:#}", e);
        return Err(e);
    }
    Ok(())
}
