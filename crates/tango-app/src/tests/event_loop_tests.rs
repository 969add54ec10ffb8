use std::io::Write;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use kanal::{AsyncReceiver, AsyncSender};
use tango_anki::{CardSink, JsonLinesSink};
use tango_config::Config;
use tango_core::{FieldKey, Intent, Phase, SessionView};
use tokio::time::timeout;
use tokio_util::sync::CancellationToken;

use crate::events::{AppEvent, event_loop};
use crate::session::build_session;
use crate::state::AppState;

#[derive(Clone, Default)]
struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    fn lines(&self) -> Vec<String> {
        String::from_utf8(self.0.lock().unwrap().clone())
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

struct Harness {
    tx: AsyncSender<AppEvent>,
    rx: AsyncReceiver<AppEvent>,
    cards: SharedBuffer,
    task: tokio::task::JoinHandle<anyhow::Result<()>>,
    _dir: tempfile::TempDir,
}

impl Harness {
    fn start(queue: &str) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let queue_path = dir.path().join("queue.txt");
        std::fs::write(&queue_path, queue).unwrap();

        let mut config = Config::default();
        config.session.language = "english".into();
        config.session.queue_file = Some(queue_path.display().to_string());

        let session = build_session(&config).unwrap();
        let cards = SharedBuffer::default();
        let sinks: Vec<Box<dyn CardSink>> = vec![Box::new(JsonLinesSink::new(Box::new(cards.clone())))];

        let (ui_tx, app_rx) = kanal::unbounded_async();
        let (app_tx, ui_rx) = kanal::unbounded_async();
        let task = tokio::spawn(event_loop(
            Arc::new(AppState::new(config)),
            session,
            sinks,
            app_rx,
            app_tx,
            CancellationToken::new(),
        ));

        Self {
            tx: ui_tx,
            rx: ui_rx,
            cards,
            task,
            _dir: dir,
        }
    }

    async fn recv(&self) -> AppEvent {
        match timeout(Duration::from_secs(2), self.rx.recv()).await {
            Ok(Ok(event)) => event,
            Ok(Err(e)) => panic!("Channel error: {}", e),
            Err(_) => panic!("Timeout - event loop did not answer"),
        }
    }

    async fn render(&self) -> SessionView {
        match self.recv().await {
            AppEvent::Render(view) => view,
            other => panic!("Expected a render, got {:?}", other),
        }
    }

    async fn intent(&self, intent: Intent) -> SessionView {
        self.tx.send(AppEvent::Intent(intent)).await.unwrap();
        self.render().await
    }
}

#[tokio::test]
async fn test_queue_file_is_loaded_before_first_render() {
    let harness = Harness::start("Run\n研究员\n");

    let view = harness.render().await;
    assert_eq!(view.term.as_ref().map(|t| t.as_str()), Some("run"));
    assert_eq!(view.phase, Phase::BrowsingCandidates);
    assert_eq!(view.candidate_count, 5);
    assert_eq!(view.pending, 1);
}

#[tokio::test]
async fn test_full_term_roundtrip_writes_a_card() {
    let harness = Harness::start("Run\n研究员\n");
    harness.render().await;

    let view = harness.intent(Intent::NextCandidate).await;
    assert_eq!(view.candidate_index, 1);
    harness.intent(Intent::PreviousCandidate).await;

    let view = harness.intent(Intent::ConfirmCandidate).await;
    assert_eq!(view.phase, Phase::EditingTerm);

    harness
        .tx
        .send(AppEvent::Intent(Intent::EditField(FieldKey::Notes)))
        .await
        .unwrap();
    assert_eq!(
        harness.recv().await,
        AppEvent::Prefill {
            key: FieldKey::Notes,
            text: String::new()
        }
    );
    let view = harness.render().await;
    assert_eq!(view.editing, Some(FieldKey::Notes));

    let view = harness.intent(Intent::CommitField("past tense: ran".into())).await;
    assert_eq!(view.editing, None);
    assert!(view.fields.iter().any(|f| f.key == FieldKey::Notes && f.edited));

    let view = harness.intent(Intent::Advance).await;
    assert_eq!(view.term.as_ref().map(|t| t.as_str()), Some("研究员"));
    assert_eq!(view.profile, "english");

    let lines = harness.cards.lines();
    assert_eq!(lines.len(), 1);
    let card: serde_json::Value = serde_json::from_str(&lines[0]).unwrap();
    assert_eq!(card["term"], "run");
    assert_eq!(card["profile"], "english");
    assert_eq!(card["fields"]["notes"], "past tense: ran");
    assert_eq!(card["fields"]["partOfSpeech"], "noun");
    assert_eq!(card["fields"]["ipa"], "/rən; rʌn/");
    assert_eq!(card["fields"]["examples"], "");
}

#[tokio::test]
async fn test_switching_profile_re_resolves_the_term() {
    let harness = Harness::start("研究员\n");

    let view = harness.render().await;
    assert_eq!(view.candidate_count, 1);

    let view = harness.intent(Intent::SwitchProfile("chinese".into())).await;
    assert_eq!(view.profile, "chinese");
    assert_eq!(view.candidate_count, 2);
    assert_eq!(view.phase, Phase::BrowsingCandidates);

    let view = harness.intent(Intent::SwitchProfile("klingon".into())).await;
    assert_eq!(view.profile, "chinese");
}

#[tokio::test]
async fn test_unreadable_queue_file_is_reported() {
    let harness = Harness::start("");
    harness.render().await;

    harness
        .tx
        .send(AppEvent::LoadQueueFile("/nonexistent/terms.txt".into()))
        .await
        .unwrap();
    assert!(matches!(harness.recv().await, AppEvent::Notice(_)));
    let view = harness.render().await;
    assert!(view.term.is_none());
}

#[tokio::test]
async fn test_exhausted_queue_and_quit() {
    let harness = Harness::start("quick\n");

    let view = harness.render().await;
    assert_eq!(view.term.as_ref().map(|t| t.as_str()), Some("quick"));

    let view = harness.intent(Intent::Skip).await;
    assert!(view.exhausted);
    assert!(harness.cards.lines().is_empty());

    harness.tx.send(AppEvent::Quit).await.unwrap();
    let result = timeout(Duration::from_secs(2), harness.task).await;
    assert!(matches!(result, Ok(Ok(Ok(())))));
}

#[tokio::test]
async fn test_cards_default_to_a_file_under_home() {
    let dir = tempfile::tempdir().unwrap();
    let default_output = dir.path().join("home").join("cards.jsonl");

    let mut sinks = crate::events::finish_card::card_sinks(&Config::default(), &default_output)
        .await
        .unwrap();
    assert_eq!(sinks.len(), 1);

    let card = tango_core::FinishedCard {
        term: tango_core::Term::parse("quick").unwrap(),
        profile: "english".into(),
        fields: [(FieldKey::Notes, "fast".to_string())].into_iter().collect(),
    };
    sinks[0].accept(&card).await.unwrap();

    let written = std::fs::read_to_string(&default_output).unwrap();
    let line: serde_json::Value = serde_json::from_str(written.trim()).unwrap();
    assert_eq!(line["term"], "quick");
    assert_eq!(line["fields"]["notes"], "fast");
}
