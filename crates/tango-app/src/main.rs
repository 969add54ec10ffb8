use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tango_config::Config;
use tracing_subscriber::EnvFilter;

pub mod controller;
pub mod events;
pub mod io;
pub mod profile;
pub mod session;
pub mod state;
pub mod ui;

#[cfg(test)]
mod tests;

use self::controller::AppController;
use self::events::finish_card::card_sinks;
use self::profile::{ProfileStore, tango_root};
use self::state::AppState;

#[derive(Parser)]
#[command(name = "tango")]
#[command(about = "Turn vocabulary lists into annotated flashcards")]
#[command(version)]
struct Cli {
    /// User profile to load
    #[arg(long, default_value = "main")]
    profile: String,
    /// Language profile to start with
    #[arg(long, value_enum)]
    language: Option<Language>,
    /// Term list, one term per line
    #[arg(long)]
    queue: Option<PathBuf>,
    /// Do not send cards to Anki
    #[arg(long)]
    no_anki: bool,
    /// Log as JSON lines
    #[arg(long)]
    log_json: bool,
}

#[derive(clap::ValueEnum, Clone, Copy)]
enum Language {
    English,
    Chinese,
}

impl Language {
    fn id(self) -> &'static str {
        match self {
            Language::English => "english",
            Language::Chinese => "chinese",
        }
    }
}

impl Cli {
    /// Command line flags win over the stored profile
    fn apply(&self, config: &mut Config) {
        if let Some(language) = self.language {
            config.session.language = language.id().to_string();
        }
        if let Some(queue) = &self.queue {
            config.session.queue_file = Some(queue.display().to_string());
        }
        if self.no_anki {
            config.anki.enabled = false;
        }
    }
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("tango=info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_tracing(cli.log_json);

    let store = ProfileStore::new(tango_root()?);
    store.init()?;
    let mut config = store.load(&cli.profile)?;
    config.apply_env();
    cli.apply(&mut config);

    let session = session::build_session(&config)?;
    let sinks = card_sinks(&config, &store.cards_path()).await?;

    let state = Arc::new(AppState::new(config));
    let controller = AppController::new(state);

    let (input_tx, input_rx) = kanal::bounded_async(16);
    io::spawn_stdin_reader(input_tx);

    let interactive = atty::is(atty::Stream::Stdin);
    let tasks = controller.spawn_tasks(
        session,
        sinks,
        input_rx,
        Box::new(std::io::stdout()),
        interactive,
    );
    controller.wait(tasks).await;

    Ok(())
}
