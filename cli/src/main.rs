use clap::Parser;
use presentation::cli::{Cli, CliApp};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    shared::telemetry::init_logging();
    let cli = Cli::parse();
    let app = CliApp::new()?;
    app.run(cli).await?;
    Ok(())
}
