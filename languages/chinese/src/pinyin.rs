use std::sync::LazyLock;

use regex::{Captures, Regex};

// A run of letters (CC-CEDICT writes ü as "u:") followed by a tone digit
static NUMBERED_SYLLABLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"((?:[uU]:|[A-Za-zÜü])+)([1-5])").expect("numbered syllable pattern")
});

/// Convert numbered pinyin ("zhong1 guo2") to tone marks ("zhōng guó").
///
/// Tone 5 (neutral) drops the digit. Text without numbered syllables comes
/// back unchanged, so applying this twice is the same as applying it once.
pub fn numbered_to_accented(text: &str) -> String {
    NUMBERED_SYLLABLE
        .replace_all(text, |caps: &Captures| {
            let tone = caps[2].parse::<u8>().unwrap_or(5);
            accent_syllable(&caps[1], tone).unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

/// `None` when the syllable has no vowel to carry the mark
fn accent_syllable(syllable: &str, tone: u8) -> Option<String> {
    let mut chars: Vec<char> = with_umlaut(syllable).chars().collect();
    if tone == 5 {
        return Some(chars.into_iter().collect());
    }

    let lower: Vec<char> = chars
        .iter()
        .map(|c| c.to_lowercase().next().unwrap_or(*c))
        .collect();

    // a/e take the mark, then the o of "ou", otherwise the last vowel
    let position = lower
        .iter()
        .position(|&c| c == 'a' || c == 'e')
        .or_else(|| lower.windows(2).position(|w| w == ['o', 'u']))
        .or_else(|| lower.iter().rposition(|&c| matches!(c, 'i' | 'o' | 'u' | 'ü')))?;

    chars[position] = tone_mark(chars[position], tone);
    Some(chars.into_iter().collect())
}

fn with_umlaut(syllable: &str) -> String {
    let replaced = syllable.replace("u:", "ü").replace("U:", "Ü");
    let lower = replaced.to_lowercase();
    // lv/nv are the keyboard spellings of lü/nü
    if lower.starts_with("lv") || lower.starts_with("nv") {
        let mut chars: Vec<char> = replaced.chars().collect();
        chars[1] = if chars[1] == 'V' { 'Ü' } else { 'ü' };
        return chars.into_iter().collect();
    }
    replaced
}

fn tone_mark(vowel: char, tone: u8) -> char {
    let marks: [char; 4] = match vowel {
        'a' => ['ā', 'á', 'ǎ', 'à'],
        'e' => ['ē', 'é', 'ě', 'è'],
        'i' => ['ī', 'í', 'ǐ', 'ì'],
        'o' => ['ō', 'ó', 'ǒ', 'ò'],
        'u' => ['ū', 'ú', 'ǔ', 'ù'],
        'ü' => ['ǖ', 'ǘ', 'ǚ', 'ǜ'],
        'A' => ['Ā', 'Á', 'Ǎ', 'À'],
        'E' => ['Ē', 'É', 'Ě', 'È'],
        'I' => ['Ī', 'Í', 'Ǐ', 'Ì'],
        'O' => ['Ō', 'Ó', 'Ǒ', 'Ò'],
        'U' => ['Ū', 'Ú', 'Ǔ', 'Ù'],
        'Ü' => ['Ǖ', 'Ǘ', 'Ǚ', 'Ǜ'],
        other => return other,
    };
    match tone {
        1..=4 => marks[usize::from(tone - 1)],
        _ => vowel,
    }
}
