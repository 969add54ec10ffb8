use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

use kanal::AsyncSender;
use tango_anki::{AnkiConnectClient, AnkiSink, CardSink, CardTemplate, JsonLinesSink};
use tango_config::Config;
use tango_core::FinishedCard;

use crate::events::AppEvent;

/// Hand a finished card to every sink. A failing sink is reported and the
/// session carries on.
pub async fn handle_finished_card(
    sinks: &mut [Box<dyn CardSink>],
    card: &FinishedCard,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    if sinks.is_empty() {
        tracing::warn!("No card sinks configured, '{}' was dropped", card.term);
    }

    for sink in sinks.iter_mut() {
        match sink.accept(card).await {
            Ok(()) => tracing::debug!("Card '{}' written to {}", card.term, sink.name()),
            Err(e) => {
                tracing::error!("Sink {} failed: {:#}", sink.name(), e);
                app_to_ui_tx
                    .send(AppEvent::Notice(format!("{} failed: {}", sink.name(), e)))
                    .await?;
            }
        }
    }

    Ok(())
}

/// Sinks described by `config`: JSON lines always, Anki when enabled.
/// Cards go to `default_output` unless the config names a file, stdout
/// belongs to the UI.
pub async fn card_sinks(
    config: &Config,
    default_output: &Path,
) -> anyhow::Result<Vec<Box<dyn CardSink>>> {
    let path = match &config.session.output_path {
        Some(path) => config.resolve_path(path),
        None => default_output.to_path_buf(),
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    tracing::info!("Writing cards to {}", path.display());
    let writer: Box<dyn Write + Send> =
        Box::new(OpenOptions::new().create(true).append(true).open(&path)?);

    let mut sinks: Vec<Box<dyn CardSink>> = vec![Box::new(JsonLinesSink::new(writer))];

    if config.anki.enabled {
        let client = AnkiConnectClient::new(config.anki.url.clone());
        match client.check_connection().await {
            Ok(version) => {
                tracing::info!("Connected to AnkiConnect v{}", version);
                match client.deck_names().await {
                    Ok(decks) if !decks.contains(&config.anki.deck) => {
                        tracing::warn!("Anki deck '{}' does not exist yet", config.anki.deck);
                    }
                    Ok(_) => {}
                    Err(e) => tracing::warn!("Failed to list Anki decks: {}", e),
                }
            }
            Err(e) => tracing::warn!("AnkiConnect not reachable at {}: {}", config.anki.url, e),
        }

        let template = CardTemplate::from_config(&config.anki);
        sinks.push(Box::new(AnkiSink::new(client, template, config.anki.tags.clone())));
    } else {
        tracing::info!("Anki integration disabled");
    }

    Ok(sinks)
}
