use std::collections::BTreeMap;

use tango_config::anki::AnkiConfig;
use tango_core::{FieldKey, FinishedCard};

#[derive(Debug, Clone)]
pub struct CardTemplate {
    pub deck: String,
    pub model: String,
    pub front_template: String,
    pub back_template: String,
}

impl CardTemplate {
    pub fn from_config(config: &AnkiConfig) -> Self {
        Self::new(
            config.deck.clone(),
            config.model.clone(),
            config.front_template.clone(),
            config.back_template.clone(),
        )
    }

    /// Create custom template
    pub fn new(deck: String, model: String, front: String, back: String) -> Self {
        Self {
            deck,
            model,
            front_template: front,
            back_template: back,
        }
    }

    pub fn format_front(&self, card: &FinishedCard) -> String {
        render(&self.front_template, card)
    }

    pub fn format_back(&self, card: &FinishedCard) -> String {
        render(&self.back_template, card)
    }

    /// Note fields for the "Basic" model
    pub fn note_fields(&self, card: &FinishedCard) -> BTreeMap<String, String> {
        BTreeMap::from([
            ("Front".to_string(), self.format_front(card)),
            ("Back".to_string(), self.format_back(card)),
        ])
    }
}

/// Fill `{term}` and every `{<field>}` placeholder. Fields the card does not
/// carry render empty.
fn render(template: &str, card: &FinishedCard) -> String {
    let mut text = template.replace("{term}", card.term.as_str());
    for key in FieldKey::ALL {
        text = text.replace(&format!("{{{}}}", key.as_str()), card.field(key));
    }
    text
}

#[cfg(test)]
mod tests {
    use tango_core::Term;

    use super::*;

    fn card() -> FinishedCard {
        FinishedCard {
            term: Term::parse("run").unwrap(),
            profile: "english".into(),
            fields: BTreeMap::from([
                (FieldKey::Definition, "move fast".to_string()),
                (FieldKey::Ipa, "/rən/".to_string()),
                (FieldKey::Notes, String::new()),
            ]),
        }
    }

    #[test]
    fn renders_term_and_fields() {
        let template = CardTemplate::new(
            "Vocabulary".into(),
            "Basic".into(),
            "{term}".into(),
            "{ipa}{pinyin} - {definition}{notes}".into(),
        );

        assert_eq!(template.format_front(&card()), "run");
        assert_eq!(template.format_back(&card()), "/rən/ - move fast");
    }

    #[test]
    fn unknown_placeholders_are_left_alone() {
        let template = CardTemplate::new("d".into(), "m".into(), "{term} {audio}".into(), String::new());
        assert_eq!(template.format_front(&card()), "run {audio}");
    }

    #[test]
    fn default_config_fills_basic_model() {
        let template = CardTemplate::from_config(&AnkiConfig::default());
        let fields = template.note_fields(&card());

        assert_eq!(fields["Front"], "run");
        assert!(fields["Back"].starts_with("/rən/<br><br>move fast"));
    }
}
