use std::path::PathBuf;

use tango_core::{FieldKey, Intent};

use crate::events::AppEvent;
use crate::ui::{UiCommand, parse_command};

fn intent(line: &str) -> Intent {
    match parse_command(line, None) {
        UiCommand::Send(AppEvent::Intent(intent)) => intent,
        other => panic!("'{line}' parsed to {other:?}"),
    }
}

#[test]
fn test_browse_and_confirm_commands() {
    assert_eq!(intent("n"), Intent::NextCandidate);
    assert_eq!(intent(" p "), Intent::PreviousCandidate);
    assert_eq!(intent("c"), Intent::ConfirmCandidate);
    assert_eq!(intent("x"), Intent::OpenExamples);
    assert_eq!(intent("s"), Intent::Skip);
}

#[test]
fn test_enter_and_done_finish_the_term() {
    assert_eq!(intent(""), Intent::Advance);
    assert_eq!(intent("done"), Intent::Advance);
}

#[test]
fn test_numbers_select_examples() {
    assert_eq!(intent("2"), Intent::SelectExample(2));
    assert_eq!(intent("0"), Intent::SelectExample(0));
}

#[test]
fn test_edit_accepts_keys_and_labels() {
    assert_eq!(intent("e notes"), Intent::EditField(FieldKey::Notes));
    assert_eq!(intent("e pos"), Intent::EditField(FieldKey::PartOfSpeech));
    assert_eq!(intent("e  Definition"), Intent::EditField(FieldKey::Definition));
    assert!(matches!(parse_command("e colour", None), UiCommand::Unknown(_)));
    assert!(matches!(parse_command("e", None), UiCommand::Unknown(_)));
}

#[test]
fn test_lines_while_editing_are_values() {
    let editing = Some(FieldKey::Notes);
    assert_eq!(
        parse_command("n", editing),
        UiCommand::Send(AppEvent::Intent(Intent::CommitField("n".into())))
    );
    assert_eq!(
        parse_command("  keeps spacing ", editing),
        UiCommand::Send(AppEvent::Intent(Intent::CommitField("  keeps spacing ".into())))
    );
    assert_eq!(
        parse_command(":cancel", editing),
        UiCommand::Send(AppEvent::Intent(Intent::CancelEdit))
    );
}

#[test]
fn test_profile_queue_and_quit_commands() {
    assert_eq!(intent("lang chinese"), Intent::SwitchProfile("chinese".into()));
    assert_eq!(
        parse_command("load words.txt", None),
        UiCommand::Send(AppEvent::LoadQueueFile(PathBuf::from("words.txt")))
    );
    assert_eq!(parse_command("q", None), UiCommand::Send(AppEvent::Quit));
    assert_eq!(parse_command("?", None), UiCommand::Help);
    assert!(matches!(parse_command("lang", None), UiCommand::Unknown(_)));
    assert!(matches!(parse_command("fly away", None), UiCommand::Unknown(_)));
}
