use std::io::Write;

use anyhow::{Context, Result};
use async_trait::async_trait;
use tango_core::FinishedCard;

use crate::client::AnkiConnectClient;
use crate::template::CardTemplate;

/// Destination for finished cards
#[async_trait]
pub trait CardSink: Send {
    fn name(&self) -> &str;

    async fn accept(&mut self, card: &FinishedCard) -> Result<()>;
}

/// Posts every card to AnkiConnect
pub struct AnkiSink {
    client: AnkiConnectClient,
    template: CardTemplate,
    tags: Vec<String>,
}

impl AnkiSink {
    pub fn new(client: AnkiConnectClient, template: CardTemplate, tags: Vec<String>) -> Self {
        Self {
            client,
            template,
            tags,
        }
    }
}

#[async_trait]
impl CardSink for AnkiSink {
    fn name(&self) -> &str {
        "anki"
    }

    async fn accept(&mut self, card: &FinishedCard) -> Result<()> {
        let fields = self.template.note_fields(card);
        let note_id = self
            .client
            .add_note(&self.template.deck, &self.template.model, &fields, &self.tags)
            .await
            .with_context(|| format!("Failed to add note for '{}'", card.term))?;

        tracing::info!("Added note {} for '{}'", note_id, card.term);
        Ok(())
    }
}

/// Writes one JSON object per card
pub struct JsonLinesSink {
    writer: Box<dyn Write + Send>,
}

impl JsonLinesSink {
    pub fn new(writer: Box<dyn Write + Send>) -> Self {
        Self { writer }
    }
}

#[async_trait]
impl CardSink for JsonLinesSink {
    fn name(&self) -> &str {
        "jsonl"
    }

    async fn accept(&mut self, card: &FinishedCard) -> Result<()> {
        let line = serde_json::to_string(card).context("Failed to serialize card")?;
        writeln!(self.writer, "{}", line).context("Failed to write card")?;
        self.writer.flush().context("Failed to flush card output")?;
        Ok(())
    }
}
