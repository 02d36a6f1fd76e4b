use anyhow::Result;
use notify_relay::cli;

#[tokio::main]
async fn main() -> Result<()> {
    cli::run().await
}
