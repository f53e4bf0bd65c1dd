use std::{io, process::ExitCode, sync::Arc};

use clap::Parser;
use salestrack::{
    app::App,
    config::{CliArgs, Config},
    storage::{CsvStorage, Store},
};

fn main() -> ExitCode {
    let cli = CliArgs::parse();
    let config = Config::load(&cli);
    config.logging.init();

    let backend = Arc::new(CsvStorage::new(config.store.path.clone()));
    let app = App::new(Store::new(backend), &config.chart);
    tracing::debug!(data = %config.store.path.display(), "Starting {:?}", cli.command);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match app.run(&cli.command, &mut out) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Command failed");
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
