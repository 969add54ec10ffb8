use std::fmt::Write as _;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use kanal::{AsyncReceiver, AsyncSender};
use tango_config::Config;
use tango_core::{FieldKey, FieldValue, Intent, Phase, SessionView};
use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;

use crate::events::AppEvent;

const HELP: &str = "\
commands:
  n / p          next / previous candidate
  c              confirm the shown candidate
  x              choose an example
  <number>       pick that example
  e <field>      edit a field, the next line is the new value (:cancel aborts)
  <enter>, done  finish the term and move on
  s              skip the term
  lang <id>      switch language profile
  load <file>    replace the queue with the terms in <file>
  q              quit";

/// What one line of input asks for
#[derive(Debug, Clone, PartialEq)]
pub enum UiCommand {
    Send(AppEvent),
    Help,
    Unknown(String),
}

/// Interpret one input line. While a field is being edited every line except
/// `:cancel` is the new value.
pub fn parse_command(line: &str, editing: Option<FieldKey>) -> UiCommand {
    if editing.is_some() {
        let intent = match line.trim() {
            ":cancel" => Intent::CancelEdit,
            _ => Intent::CommitField(line.to_string()),
        };
        return UiCommand::Send(AppEvent::Intent(intent));
    }

    let line = line.trim();
    let (command, arg) = match line.split_once(char::is_whitespace) {
        Some((command, arg)) => (command, arg.trim()),
        None => (line, ""),
    };

    let intent = match (command, arg) {
        ("" | "done", "") => Intent::Advance,
        ("n", "") => Intent::NextCandidate,
        ("p", "") => Intent::PreviousCandidate,
        ("c", "") => Intent::ConfirmCandidate,
        ("x", "") => Intent::OpenExamples,
        ("s", "") => Intent::Skip,
        ("e", "") => return UiCommand::Unknown("e needs a field name".to_string()),
        ("e", field) => match field.parse::<FieldKey>() {
            Ok(key) => Intent::EditField(key),
            Err(e) => return UiCommand::Unknown(e.to_string()),
        },
        ("lang", id) if !id.is_empty() => Intent::SwitchProfile(id.to_string()),
        ("load", file) if !file.is_empty() => {
            return UiCommand::Send(AppEvent::LoadQueueFile(PathBuf::from(file)));
        }
        ("q" | "quit", "") => return UiCommand::Send(AppEvent::Quit),
        ("h" | "help" | "?", "") => return UiCommand::Help,
        (number, "") if number.chars().all(|c| c.is_ascii_digit()) => match number.parse() {
            Ok(n) => Intent::SelectExample(n),
            Err(_) => return UiCommand::Unknown(format!("Not an example number: {number}")),
        },
        _ => return UiCommand::Unknown(format!("Unknown command: {line}")),
    };

    UiCommand::Send(AppEvent::Intent(intent))
}

/// Terminal front end: input lines in, rendered snapshots out.
///
/// Every event forwarded to the app is answered with a `Render`. No input is
/// read while one is outstanding, so a line typed after `e <field>` is parsed
/// with the edit already open, however fast the lines arrive.
pub async fn ui_loop(
    config: Arc<RwLock<Config>>,
    input_rx: AsyncReceiver<String>,
    app_to_ui_rx: AsyncReceiver<AppEvent>,
    ui_to_app_tx: AsyncSender<AppEvent>,
    mut out: Box<dyn Write + Send>,
    interactive: bool,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    let preview_width = config.read().await.ui.example_preview_width;
    let mut editing: Option<FieldKey> = None;
    // The app renders once on startup
    let mut awaiting_render = true;

    if interactive {
        writeln!(out, "{HELP}")?;
    }

    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,
            event = app_to_ui_rx.recv() => {
                match event? {
                    AppEvent::Render(view) => {
                        editing = view.editing;
                        awaiting_render = false;
                        write!(out, "{}", render_view(&view, preview_width))?;
                        if interactive {
                            write!(out, "> ")?;
                        }
                    }
                    AppEvent::Prefill { key, text } => {
                        writeln!(out, "{} was: {}", key.label(), text)?;
                    }
                    AppEvent::Notice(message) => writeln!(out, "! {message}")?,
                    AppEvent::Quit => break,
                    AppEvent::Intent(_) | AppEvent::LoadQueueFile(_) => {}
                }
                out.flush()?;
            }
            line = input_rx.recv(), if !awaiting_render => {
                let Ok(line) = line else {
                    tracing::debug!("Input closed");
                    ui_to_app_tx.send(AppEvent::Quit).await?;
                    break;
                };

                match parse_command(&line, editing) {
                    UiCommand::Send(AppEvent::Quit) => {
                        ui_to_app_tx.send(AppEvent::Quit).await?;
                        break;
                    }
                    UiCommand::Send(event) => {
                        ui_to_app_tx.send(event).await?;
                        awaiting_render = true;
                    }
                    UiCommand::Help => writeln!(out, "{HELP}")?,
                    UiCommand::Unknown(message) => writeln!(out, "! {message} (h for help)")?,
                }
                out.flush()?;
            }
        }
    }

    Ok(())
}

/// Plain-text rendering of a snapshot
pub fn render_view(view: &SessionView, preview_width: usize) -> String {
    let mut text = String::new();

    let Some(term) = &view.term else {
        if view.exhausted {
            text.push_str("(no more terms) load <file> to continue\n");
        } else {
            let _ = writeln!(text, "({} queued) press enter to start", view.pending);
        }
        return text;
    };

    let _ = writeln!(
        text,
        "[{}] {}  candidate {}/{}, {} queued",
        view.profile,
        term,
        view.candidate_index + 1,
        view.candidate_count,
        view.pending
    );

    for field in &view.fields {
        let Some(value) = &field.value else {
            continue;
        };
        let shown = match value {
            FieldValue::List(items) => format!("{} available", items.len()),
            FieldValue::Text(text) => text.clone(),
        };
        let marker = if field.edited { "*" } else { " " };
        let _ = writeln!(text, " {}{}: {}", marker, field.key.label(), shown);
    }

    for example in &view.examples {
        let _ = writeln!(text, "    {}", truncate(example, preview_width));
    }

    let hint = match (view.editing, view.phase) {
        (Some(key), _) => format!("new {}? (:cancel to keep)", key.label()),
        (None, Phase::BrowsingCandidates) => "n/p browse, c confirm, s skip".to_string(),
        (None, Phase::EditingTerm) => "x examples, e <field> edit, enter to finish".to_string(),
        (None, Phase::BrowsingExamples) => "pick an example number".to_string(),
        (None, Phase::Empty) => String::new(),
    };
    if !hint.is_empty() {
        let _ = writeln!(text, "  ({hint})");
    }

    text
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(width.saturating_sub(1)).collect();
    cut.push('…');
    cut
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncates_by_characters() {
        assert_eq!(truncate("研究员是人", 3), "研究…");
        assert_eq!(truncate("short", 72), "short");
    }
}
