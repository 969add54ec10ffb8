//! Cleanup of CC-CEDICT definition text.
//!
//! Two repairs, each applied until the text stops changing:
//! - numbered pinyin inside `[...]` becomes tone-marked pinyin
//! - `CL:個|个[gè]` and ` 長沙|长沙[Cháng shā]` keep only the first
//!   (traditional) variant with the reading appended: `CL:個gè`, ` 長沙Cháng shā`

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::pinyin::numbered_to_accented;

/// Upper bound on rewrite passes per rule; real entries settle in a handful
const MAX_PASSES: usize = 64;

static ROMANIZATION_SPAN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\[\]]+)\]").expect("romanization span pattern"));

// CL:個|个[gè],項|项[xiàng]
//    ^^^^^^^^^ first rewrite; the prefix then lets the next item match
static CLASSIFIER_VARIANT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(CL:(?:[^\s,;/|\[\]]+,)*)([^\s,;/|\[\]]+)\|[^\s,;/|\[\]]+\[([^\[\]]+)\]")
        .expect("classifier variant pattern")
});

// see also 長沙|长沙[Cháng shā]
//         ^^^^^^^^^^^^^^^^^^^^^^
static CROSS_REFERENCE_VARIANT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(^|\s)([^\s|\[\]]+)\|[^\s|\[\]]+\[([^\[\]]+)\]")
        .expect("cross reference variant pattern")
});

/// Repair one line of dictionary text. Total, deterministic and idempotent.
pub fn normalize(text: &str) -> String {
    let mut current = text.to_string();

    for _ in 0..MAX_PASSES {
        let next = collapse_variants(&accent_romanization(&current));
        if next == current {
            return current;
        }
        current = next;
    }

    tracing::warn!("Dictionary text did not settle after {} passes: {}", MAX_PASSES, text);
    current
}

/// Tone-mark every bracketed romanization span
pub fn accent_romanization(text: &str) -> String {
    to_fixpoint(text, |s| {
        ROMANIZATION_SPAN
            .replace_all(s, |caps: &Captures| format!("[{}]", numbered_to_accented(&caps[1])))
            .into_owned()
    })
}

/// Keep the first character-set variant of each `A|B[R]` construct
pub fn collapse_variants(text: &str) -> String {
    let text = to_fixpoint(text, |s| {
        CLASSIFIER_VARIANT.replace_all(s, "${1}${2}${3}").into_owned()
    });
    to_fixpoint(&text, |s| {
        CROSS_REFERENCE_VARIANT.replace_all(s, "${1}${2}${3}").into_owned()
    })
}

fn to_fixpoint(text: &str, rule: impl Fn(&str) -> String) -> String {
    let mut current = text.to_string();
    for _ in 0..MAX_PASSES {
        let next = rule(&current);
        if next == current {
            break;
        }
        current = next;
    }
    current
}
