use std::collections::BTreeMap;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::json;

const API_VERSION: u32 = 6;

#[derive(Clone)]
pub struct AnkiConnectClient {
    base_url: String,
    client: reqwest::Client,
}

impl AnkiConnectClient {
    pub fn new(base_url: String) -> Self {
        Self {
            base_url,
            client: reqwest::Client::new(),
        }
    }

    /// AnkiConnect API version, fails when Anki is not running
    pub async fn check_connection(&self) -> Result<u32> {
        self.invoke("version", json!({})).await
    }

    pub async fn deck_names(&self) -> Result<Vec<String>> {
        self.invoke("deckNames", json!({})).await
    }

    /// Add a note to Anki, returns the new note id
    pub async fn add_note(
        &self,
        deck: &str,
        model: &str,
        fields: &BTreeMap<String, String>,
        tags: &[String],
    ) -> Result<u64> {
        self.invoke("addNote", note_params(deck, model, fields, tags)).await
    }

    async fn invoke<T>(&self, action: &str, params: serde_json::Value) -> Result<T>
    where
        T: for<'de> Deserialize<'de>,
    {
        let request = AnkiRequest {
            action,
            version: API_VERSION,
            params,
        };

        let response: AnkiResponse<T> = self
            .client
            .post(&self.base_url)
            .json(&request)
            .send()
            .await
            .with_context(|| format!("AnkiConnect unreachable at {}", self.base_url))?
            .json()
            .await
            .with_context(|| format!("Malformed AnkiConnect reply to {action}"))?;

        response.into_result()
    }
}

fn note_params(
    deck: &str,
    model: &str,
    fields: &BTreeMap<String, String>,
    tags: &[String],
) -> serde_json::Value {
    json!({
        "note": {
            "deckName": deck,
            "modelName": model,
            "fields": fields,
            "tags": tags,
            "options": { "allowDuplicate": false }
        }
    })
}

#[derive(Serialize)]
struct AnkiRequest<'a> {
    action: &'a str,
    version: u32,
    params: serde_json::Value,
}

#[derive(Deserialize)]
struct AnkiResponse<T> {
    result: Option<T>,
    error: Option<String>,
}

impl<T> AnkiResponse<T> {
    fn into_result(self) -> Result<T> {
        match (self.result, self.error) {
            (_, Some(error)) => anyhow::bail!("AnkiConnect error: {}", error),
            (Some(result), None) => Ok(result),
            (None, None) => anyhow::bail!("AnkiConnect returned null result"),
        }
    }
}
