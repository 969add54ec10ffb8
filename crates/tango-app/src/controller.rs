use std::io::Write;
use std::sync::Arc;

use kanal::{AsyncReceiver, AsyncSender};
use tango_anki::CardSink;
use tango_core::Session;
use tokio::signal;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use crate::events::{AppEvent, event_loop};
use crate::state::AppState;
use crate::ui::ui_loop;

/// Centralized channel management
pub struct ChannelSet {
    pub app_to_ui: (AsyncSender<AppEvent>, AsyncReceiver<AppEvent>),
    pub ui_to_app: (AsyncSender<AppEvent>, AsyncReceiver<AppEvent>),
}

impl ChannelSet {
    pub fn new() -> Self {
        Self {
            app_to_ui: kanal::bounded_async(64),
            ui_to_app: kanal::bounded_async(64),
        }
    }
}

/// Application controller for task spawning and lifecycle
pub struct AppController {
    channels: ChannelSet,
    state: Arc<AppState>,
    cancel_token: CancellationToken,
}

impl AppController {
    pub fn new(state: Arc<AppState>) -> Self {
        Self {
            channels: ChannelSet::new(),
            state,
            cancel_token: CancellationToken::new(),
        }
    }

    pub fn spawn_tasks(
        &self,
        session: Session,
        sinks: Vec<Box<dyn CardSink>>,
        input_rx: AsyncReceiver<String>,
        out: Box<dyn Write + Send>,
        interactive: bool,
    ) -> JoinSet<anyhow::Result<()>> {
        let mut tasks = JoinSet::new();

        // Event loop
        tasks.spawn(event_loop(
            self.state.clone(),
            session,
            sinks,
            self.channels.ui_to_app.1.clone(),
            self.channels.app_to_ui.0.clone(),
            self.cancel_token.child_token(),
        ));

        // UI loop
        tasks.spawn(ui_loop(
            self.state.config.clone(),
            input_rx,
            self.channels.app_to_ui.1.clone(),
            self.channels.ui_to_app.0.clone(),
            out,
            interactive,
            self.cancel_token.child_token(),
        ));

        tasks
    }

    pub fn shutdown(&self) {
        self.cancel_token.cancel();
    }

    /// Drive `tasks` to completion. The first task to stop (or Ctrl+C)
    /// cancels the rest.
    pub async fn wait(&self, mut tasks: JoinSet<anyhow::Result<()>>) {
        loop {
            tokio::select! {
                _ = signal::ctrl_c() => {
                    tracing::info!("Shutdown requested");
                    self.shutdown();
                }
                result = tasks.join_next() => {
                    match result {
                        Some(Ok(Ok(()))) => {}
                        Some(Ok(Err(e))) => tracing::error!("Task failed: {:#}", e),
                        Some(Err(e)) => tracing::error!("Task panicked: {}", e),
                        None => break,
                    }
                    self.shutdown();
                }
            }
        }
    }
}
