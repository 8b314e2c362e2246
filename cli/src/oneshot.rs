use std::io::{self, BufRead, Write};
use std::net::SocketAddr;

use netcam::{Command, Dispatcher, MediaServer, Outcome};

use crate::error::{CliError, CliResult};

/// Run one command to completion and print what the server said
pub fn run(dispatcher: &Dispatcher, command: Command) -> CliResult<String> {
    let outcome = dispatcher.send(command);

    match &outcome {
        Outcome::Success { response, .. } => {
            let mut report = outcome.message();
            if !response.fields.is_empty() {
                let fields = serde_json::to_string_pretty(&response.fields)
                    .unwrap_or_else(|_| format!("{:?}", response.fields));
                report.push('\n');
                report.push_str(&fields);
            }
            Ok(report)
        }
        _ => Err(CliError::CommandFailed(outcome.message())),
    }
}

/// Run one command and write its report to `out`, whether it succeeded or not
pub fn execute<W: Write>(dispatcher: &Dispatcher, command: Command, out: &mut W) -> CliResult<()> {
    match run(dispatcher, command) {
        Ok(report) => {
            writeln!(out, "{}", report)?;
            Ok(())
        }
        Err(CliError::CommandFailed(message)) => {
            writeln!(out, "{}", message)?;
            Err(CliError::CommandFailed(message))
        }
        Err(e) => Err(e),
    }
}

/// Serve the emulator in the foreground until a line arrives on stdin
pub fn emulate(port: u16) -> CliResult<()> {
    let mut server = MediaServer::start_on(SocketAddr::from(([127, 0, 0, 1], port)))?;
    println!("Media server emulator at {} (press Enter to stop)", server.base_url());

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;

    server.shutdown()?;
    Ok(())
}
