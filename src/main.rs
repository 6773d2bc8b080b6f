// What you SEE:
// • A gold card sits on top of a programming joke.
// • Hold Left Mouse and drag to scratch it off; past half scratched, confetti pops.
// • "New Joke" fetches another one and covers the card again. ESC quits.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use scratch_laugh::app::App;
use scratch_laugh::config::Settings;
use scratch_laugh::joke::{JokeApi, JokeLoader};
use scratch_laugh::logging::{init_logging, LoggingConfig};

fn main() -> Result<()> {
    let settings = Settings::parse();
    init_logging(LoggingConfig { env_filter: settings.log.clone(), ..Default::default() });
    settings.validate().context("invalid settings")?;

    /* --- Background runtime for HTTP ---
       The window loop stays on this thread; fetches run on one worker. */
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .enable_all()
        .build()
        .context("failed to start async runtime")?;

    let source = Arc::new(JokeApi::new(settings.endpoint.clone()));
    let loader = JokeLoader::new(runtime.handle().clone(), source);
    log::info!("jokes from {}", settings.endpoint);

    let mut app = App::new(&settings, loader).context("failed to open window")?;
    app.run()?;
    Ok(())
}
