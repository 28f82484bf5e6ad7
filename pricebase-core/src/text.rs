//! Field cleaning for names, article codes, prices and quoted catalog text.

/// Collapse every run of two or more whitespace characters into one space.
///
/// A lone whitespace character (a single tab or newline between words) is
/// left as-is.
pub fn collapse_whitespace(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut pending = String::new();

    for c in s.chars() {
        if c.is_whitespace() {
            pending.push(c);
            continue;
        }
        flush_whitespace(&mut out, &mut pending);
        out.push(c);
    }
    flush_whitespace(&mut out, &mut pending);
    out
}

fn flush_whitespace(out: &mut String, pending: &mut String) {
    match pending.chars().count() {
        0 => {}
        1 => out.push_str(pending),
        _ => out.push(' '),
    }
    pending.clear();
}

/// Normalize a product name: trim and collapse whitespace runs.
pub fn clean_name(raw: &str) -> String {
    collapse_whitespace(raw.trim())
}

/// Normalize an article code to its digits.
///
/// `"АБ-123"` becomes `"123"`. This is the join key used against the catalog
/// and the document listing, so every source goes through here.
pub fn clean_article(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}

/// Round to two decimal places.
///
/// Rounds the exact binary value with ties to even, so `2.675` (stored just
/// below the tie) gives `2.67` and `0.125` gives `0.12`.
pub fn round2(value: f64) -> f64 {
    format!("{value:.2}").parse().unwrap_or(value)
}

/// Parse a price cell such as `"1 234,56"`.
///
/// Spaces (including non-breaking ones used as thousands separators) are
/// removed and a decimal comma becomes a dot. Returns `None` for anything
/// that does not parse to a finite number.
pub fn parse_price(raw: &str) -> Option<f64> {
    let compact: String = raw
        .trim()
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| if c == ',' { '.' } else { c })
        .collect();
    if compact.is_empty() {
        return None;
    }
    compact
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .map(round2)
}

/// Strip one pair of outer single quotes and collapse whitespace.
///
/// Catalog exports wrap names and document titles as `'Pump X'`. A value with
/// only one quote is returned trimmed but otherwise untouched.
pub fn strip_outer_quotes(raw: &str) -> String {
    let s = raw.trim();
    let inner = if s.chars().count() >= 2 && s.starts_with('\'') && s.ends_with('\'') {
        &s[1..s.len() - 1]
    } else {
        s
    };
    collapse_whitespace(inner).trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_name_collapses_runs() {
        assert_eq!(clean_name("  Pump   A  "), "Pump A");
        assert_eq!(clean_name("Pump\t\tA"), "Pump A");
        assert_eq!(clean_name(""), "");
    }

    #[test]
    fn test_clean_name_keeps_single_whitespace() {
        assert_eq!(clean_name("Pump\tA"), "Pump\tA");
    }

    #[test]
    fn test_clean_name_has_no_double_whitespace() {
        for raw in ["a  b", "a \t b", " x \n\n y ", "a\u{a0}\u{a0}b"] {
            let cleaned = clean_name(raw);
            let chars: Vec<char> = cleaned.chars().collect();
            assert!(
                chars
                    .windows(2)
                    .all(|w| !(w[0].is_whitespace() && w[1].is_whitespace())),
                "double whitespace left in {cleaned:?}"
            );
        }
    }

    #[test]
    fn test_clean_article_digits_only() {
        assert_eq!(clean_article("АБ-123"), "123");
        assert_eq!(clean_article(" 12 34 "), "1234");
        assert_eq!(clean_article("no digits"), "");
        assert!(clean_article("x1y2z3-٤").chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_parse_price() {
        assert_eq!(parse_price("1 234,56"), Some(1234.56));
        assert_eq!(parse_price("10"), Some(10.0));
        assert_eq!(parse_price("1500"), Some(1500.0));
        assert_eq!(parse_price("99.999"), Some(100.0));
        assert_eq!(parse_price("1\u{a0}000,5"), Some(1000.5));
        assert_eq!(parse_price(""), None);
        assert_eq!(parse_price("   "), None);
        assert_eq!(parse_price("abc"), None);
        assert_eq!(parse_price("inf"), None);
    }

    #[test]
    fn test_price_rounding_matches_binary_value() {
        assert_eq!(parse_price("2.675"), Some(2.67));
        assert_eq!(parse_price("0,125"), Some(0.12));
        assert_eq!(parse_price("0,625"), Some(0.62));
        assert_eq!(parse_price("10.125"), Some(10.12));
        assert_eq!(parse_price("1234.567"), Some(1234.57));
        assert_eq!(round2(-1.005), -1.0);
    }

    #[test]
    fn test_strip_outer_quotes() {
        assert_eq!(strip_outer_quotes("'Pump X'"), "Pump X");
        assert_eq!(strip_outer_quotes("  'Pump   X'  "), "Pump X");
        assert_eq!(strip_outer_quotes("'unterminated"), "'unterminated");
        assert_eq!(strip_outer_quotes(" 'unterminated "), "'unterminated");
        assert_eq!(strip_outer_quotes("''"), "");
        assert_eq!(strip_outer_quotes("'"), "'");
        assert_eq!(strip_outer_quotes("'Насос 'Вихрь''"), "Насос 'Вихрь'");
    }
}
