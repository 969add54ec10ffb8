use std::path::PathBuf;
use std::sync::Arc;

use kanal::{AsyncReceiver, AsyncSender};
use tango_anki::CardSink;
use tango_core::{FieldKey, Intent, Session, SessionView};
use tokio_util::sync::CancellationToken;

use crate::state::AppState;

pub mod finish_card;
pub mod load_queue;

use finish_card::handle_finished_card;
use load_queue::handle_queue_file;

/// Messages between the event loop and the UI task
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// UI -> app: apply to the session
    Intent(Intent),
    /// UI -> app: replace the queue with a file's lines
    LoadQueueFile(PathBuf),
    /// App -> UI: fresh snapshot after every handled event
    Render(SessionView),
    /// App -> UI: current value of the field being edited
    Prefill { key: FieldKey, text: String },
    /// App -> UI: something the user should read
    Notice(String),
    Quit,
}

/// App's main loop. Owns the session; nothing else mutates it.
pub async fn event_loop(
    state: Arc<AppState>,
    mut session: Session,
    mut sinks: Vec<Box<dyn CardSink>>,
    ui_to_app_rx: AsyncReceiver<AppEvent>,
    app_to_ui_tx: AsyncSender<AppEvent>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    let queue_file = state.config.read().await.session.queue_file.clone();
    if let Some(path) = queue_file {
        handle_queue_file(&mut session, PathBuf::from(path), &app_to_ui_tx).await?;
    }

    app_to_ui_tx.send(AppEvent::Render(session.view())).await?;

    tracing::info!("[EVENT_LOOP] Starting main loop, waiting for events");
    loop {
        let event = tokio::select! {
            _ = cancel.cancelled() => break,
            event = ui_to_app_rx.recv() => event?,
        };

        tracing::debug!("[EVENT_LOOP] Event received: {:?}", event);
        if matches!(event, AppEvent::Quit) {
            break;
        }

        handle_events(&mut session, &mut sinks, &app_to_ui_tx, event).await?;
    }

    tracing::info!("[EVENT_LOOP] Stopped");
    Ok(())
}

async fn handle_events(
    session: &mut Session,
    sinks: &mut [Box<dyn CardSink>],
    app_to_ui_tx: &AsyncSender<AppEvent>,
    event: AppEvent,
) -> anyhow::Result<()> {
    match event {
        AppEvent::Intent(intent) => {
            let outcome = session.handle(intent);
            if !outcome.applied {
                tracing::debug!("Intent had no effect");
            }
            if let Some(card) = outcome.finished {
                handle_finished_card(sinks, &card, app_to_ui_tx).await?;
            }
            if let (Some(text), Some(key)) = (outcome.prefill, session.resolver().editing()) {
                app_to_ui_tx.send(AppEvent::Prefill { key, text }).await?;
            }
        }
        AppEvent::LoadQueueFile(path) => {
            handle_queue_file(session, path, app_to_ui_tx).await?;
        }
        AppEvent::Render(_) | AppEvent::Prefill { .. } | AppEvent::Notice(_) | AppEvent::Quit => {
            // UI-only events, ignore in backend
            return Ok(());
        }
    }

    app_to_ui_tx.send(AppEvent::Render(session.view())).await?;
    Ok(())
}
