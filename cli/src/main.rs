use std::io;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;

use cli::app::App;
use cli::args::{Action, Args};
use cli::error::{CliError, CliResult};
use cli::notifier::PanelNotifier;
use cli::state::store::Store;
use cli::{logging, oneshot};
use netcam::{Config, Dispatcher, JsonClient, LogNotifier};

fn main() -> ExitCode {
    let args = Args::parse();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        // the one-shot report already printed the message
        Err(CliError::CommandFailed(_)) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("netcam: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> CliResult<()> {
    let config = args.resolve_config()?;

    match &args.action {
        None => run_panel(&config),
        Some(Action::Emulate { port }) => {
            logging::init_term_logger(&config)?;
            oneshot::emulate(*port)
        }
        Some(action) => {
            logging::init_term_logger(&config)?;
            let client = JsonClient::new(&config.url, config.timeout())?;
            let dispatcher = Dispatcher::new(client, Arc::new(LogNotifier));

            if let Some(command) = action.to_command() {
                oneshot::execute(&dispatcher, command, &mut io::stdout().lock())?;
            }
            Ok(())
        }
    }
}

fn run_panel(config: &Config) -> CliResult<()> {
    logging::init_file_logger(config)?;

    let store = Arc::new(Store::with_server_url(config.url.clone()));
    let client = JsonClient::new(&config.url, config.timeout())?;
    let dispatcher = Dispatcher::new(client, Arc::new(PanelNotifier::new(Arc::clone(&store))));

    log::info!("Control panel started for {}", config.url);

    let mut terminal = ratatui::init();
    let result = App::new(store, dispatcher).run(&mut terminal);
    ratatui::restore();

    result?;
    Ok(())
}
