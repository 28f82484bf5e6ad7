//! Search keys for the JSON export.
//!
//! Article codes and model names in these price lists mix Latin and Cyrillic
//! look-alike letters ("АВ-123" typed in Cyrillic vs "AB-123" in Latin). The
//! key folds both spellings onto Latin and drops punctuation so that a plain
//! substring search finds either.

/// Fold a lower-case Cyrillic look-alike onto its Latin twin.
fn fold_homoglyph(c: char) -> char {
    match c {
        'а' => 'a',
        'в' => 'b',
        'с' => 'c',
        'е' => 'e',
        'н' => 'h',
        'к' => 'k',
        'м' => 'm',
        'о' => 'o',
        'р' => 'p',
        'т' => 't',
        'х' => 'x',
        'у' => 'y',
        other => other,
    }
}

fn is_key_char(c: char) -> bool {
    c.is_ascii_lowercase() || c.is_ascii_digit() || ('а'..='я').contains(&c) || c == 'ё'
}

/// Normalized search key: lower-cased, homoglyphs folded, punctuation and
/// whitespace removed.
pub fn search_key(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .map(fold_homoglyph)
        .filter(|&c| is_key_char(c))
        .collect()
}
