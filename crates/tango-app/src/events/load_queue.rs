use std::path::PathBuf;

use kanal::AsyncSender;
use tango_core::{Intent, Phase, Session};

use crate::events::AppEvent;

/// Replace the queue with the lines of `path` and start on the first term
/// if nothing is loaded
pub async fn handle_queue_file(
    session: &mut Session,
    path: PathBuf,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let text = match tokio::fs::read_to_string(&path).await {
        Ok(text) => text,
        Err(e) => {
            tracing::warn!("Failed to read queue file {}: {}", path.display(), e);
            app_to_ui_tx
                .send(AppEvent::Notice(format!("Cannot read {}: {}", path.display(), e)))
                .await?;
            return Ok(());
        }
    };

    session.handle(Intent::LoadQueue(text));
    tracing::info!("Queue loaded from {}", path.display());

    if session.resolver().phase() == Phase::Empty {
        session.handle(Intent::Advance);
    }

    Ok(())
}
