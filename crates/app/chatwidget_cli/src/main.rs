// Import and re-export the `error` module
pub use self::error::{Error, Result};
mod error;

use std::io::Stdout;

use chatwidget_core::view::memory::MemoryInput;
use chatwidget_core::{ChatInputHandler, HttpTransport, SubmitError};
use clap::Parser;
use cli::{Cli, Commands};
use terminal::{StderrAlerter, TranscriptLog};
use tokio::io::BufReader;
use tokio::runtime::Runtime;

mod cli;
mod logging;
mod session;
mod terminal;

type TerminalHandler =
    ChatInputHandler<HttpTransport, MemoryInput, TranscriptLog<Stdout>, StderrAlerter>;

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let _logger = logging::init()?;

    if let Err(e) = run() {
        if reported_by_handler(&e) {
            log::debug!("{}", e);
        } else {
            log::error!("{}", e);
        }
        std::process::exit(1);
    }
    Ok(())
}

/// The handler has already alerted or logged these.
fn reported_by_handler(e: &Error) -> bool {
    matches!(
        e,
        Error::Submit(
            SubmitError::EmptyInput | SubmitError::Status(_) | SubmitError::Transport(_)
        )
    )
}

fn run() -> Result<()> {
    let args = Cli::parse();

    match &args.command {
        Commands::Version => {
            println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
        }
        Commands::Send { message } => {
            let handler = terminal_handler(&args)?;
            handler.input().set(message.as_str());
            runtime()?.block_on(handler.submit())?;
        }
        Commands::Repl => {
            let handler = terminal_handler(&args)?;
            let stdin = BufReader::new(tokio::io::stdin());
            runtime()?.block_on(session::run(&handler, stdin))?;
        }
    }

    Ok(())
}

fn terminal_handler(args: &Cli) -> Result<TerminalHandler> {
    let config = args.widget.resolve()?;
    log::debug!("Chat endpoint: {}", config.endpoint);

    Ok(ChatInputHandler::new(
        config.handler,
        HttpTransport::new(config.endpoint),
        MemoryInput::default(),
        TranscriptLog::stdout(),
        StderrAlerter,
    ))
}

/// Single-threaded event loop; exchanges are the only suspension points.
fn runtime() -> Result<Runtime> {
    Ok(tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?)
}
