use anyhow::Result;
use clap::Parser;

use onico::{logging, App, Cli};
use onico_auth::Settings;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let (log_path, _log_guard) = logging::init_logging()?;
    tracing::info!(path = %log_path.display(), "Logging initialized");

    let settings = match &cli.config {
        Some(path) => Settings::from_file(&path.to_string_lossy())?,
        None => Settings::new()?,
    };

    let app = App::connect(&settings)?;
    app.run(cli.command, &mut std::io::stdout()).await?;

    Ok(())
}
