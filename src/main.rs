mod config;
mod parse;
mod predictor;
mod session;
mod store;
mod view;

use std::sync::Arc;

use anyhow::Result;
use config::TrackerConfig;
use predictor::{PredictorEngine, PredictorRouter, RemotePredictor};
use session::{ActionOutcome, Session};
use store::Store;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let config = TrackerConfig::load()?;
    let remote: Option<Arc<dyn PredictorEngine>> = if config.remote.enable {
        let api_key = config::load_api_key()?;
        Some(Arc::new(RemotePredictor::new(
            config.remote.clone(),
            api_key,
        )?))
    } else {
        None
    };
    info!(
        data_path = %config.store.data_path.display(),
        remote_enabled = config.remote.enable,
        model = %config.remote.model,
        "loaded drawtrack config"
    );

    let store = Store::new(config.store.data_path.clone());
    let router = PredictorRouter::new(remote);
    let mut session = Session::open(store, router, config.session.pin.clone()).await?;

    run_repl(&mut session).await
}

enum Flow {
    Continue,
    Quit,
}

async fn run_repl(session: &mut Session) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    view::banner();
    view::pin_prompt();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim().to_string();

        if !session.is_unlocked() {
            if session.authenticate(&line) {
                view::notice("unlocked");
                view::predictions(session.state());
                view::frequency_table(&session.frequency_table());
                view::prompt();
            } else {
                view::pin_rejected();
                view::pin_prompt();
            }
            continue;
        }

        match dispatch(session, &line).await? {
            Flow::Continue => view::prompt(),
            Flow::Quit => break,
        }
    }
    Ok(())
}

async fn dispatch(session: &mut Session, line: &str) -> Result<Flow> {
    let (command, rest) = match line.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (line, ""),
    };

    match command {
        "" => {}
        "help" => view::help(),
        "quit" | "exit" => return Ok(Flow::Quit),
        "table" => view::frequency_table(&session.frequency_table()),
        "add" => match session.submit_numbers(rest).await? {
            ActionOutcome::Applied => {
                view::predictions(session.state());
                view::frequency_table(&session.frequency_table());
            }
            ActionOutcome::Ignored => view::notice("no numbers found in input"),
        },
        "correct" => match session.submit_correction(rest).await? {
            ActionOutcome::Applied => {
                view::banner();
                view::predictions(session.state());
                view::frequency_table(&session.frequency_table());
            }
            ActionOutcome::Ignored => view::notice("no numbers found in input"),
        },
        "wrong" => match session.mark_wrong().await? {
            ActionOutcome::Applied => {
                view::notice("flagged current predictions as wrong");
                view::predictions(session.state());
            }
            ActionOutcome::Ignored => view::notice("nothing to flag yet"),
        },
        "reset" => {
            session.reset().await?;
            view::notice("all recorded data cleared");
        }
        _ => view::notice("unknown command, try `help`"),
    }
    Ok(Flow::Continue)
}
