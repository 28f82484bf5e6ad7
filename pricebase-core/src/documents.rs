//! The "Documents" column: which files to list per article, and in what order.
//!
//! Two sources feed the column. The secondary catalog gives at most one
//! product page per article; the document listing gives any number of
//! `(category, title, url)` rows per article, of which only catalogs,
//! operation manuals and passports in the primary language are kept.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use regex::Regex;

use crate::SiteLinks;
use crate::records::{BaseRecord, OutputRecord};
use crate::text::clean_article;

/// Label put in front of the product page link.
pub const SITE_LABEL: &str = "Сайт";

static EN_PARENS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\(\s*en\s*\)").expect("static pattern"));
static EN_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(en|eng|english)\b").expect("static pattern"));
static CATALOG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)каталог").expect("static pattern"));
static MANUAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)руководств[оа]\s*по\s*эксплуатац").expect("static pattern")
});
static PASSPORT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)паспорт").expect("static pattern"));
static TRAILING_URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(https?://\S+)\s*$").expect("static pattern"));

/// One row of the document listing, already cleaned.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DocumentRow {
    pub article: String,
    pub category: String,
    pub title: String,
    pub url: String,
}

/// Article → formatted `"title url"` entries, in first-seen article order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentsMap {
    groups: Vec<(String, Vec<String>)>,
    index: HashMap<String, usize>,
}

impl DocumentsMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Entries for an article, if it has any.
    pub fn get(&self, article: &str) -> Option<&[String]> {
        self.index.get(article).map(|&i| self.groups[i].1.as_slice())
    }

    /// Number of articles with at least one entry.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Articles and their entries in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.groups.iter().map(|(a, e)| (a.as_str(), e.as_slice()))
    }

    fn group_mut(&mut self, article: &str) -> &mut Vec<String> {
        let idx = match self.index.get(article) {
            Some(&idx) => idx,
            None => {
                self.groups.push((article.to_string(), Vec::new()));
                self.index.insert(article.to_string(), self.groups.len() - 1);
                self.groups.len() - 1
            }
        };
        &mut self.groups[idx].1
    }
}

/// Whether the text describes an English (secondary-language) variant.
///
/// Triggers on a `(En)` marker or a standalone `en` / `eng` / `english` word.
pub fn is_secondary_language(text: &str) -> bool {
    EN_PARENS.is_match(text) || EN_WORD.is_match(text)
}

/// Letters that may not touch a standalone `РЭ`: basic Latin and the
/// contiguous А..я Cyrillic block.
fn is_abbreviation_neighbor(c: char) -> bool {
    c.is_ascii_alphabetic() || ('А'..='я').contains(&c)
}

/// Whether `РЭ` (operation manual abbreviation) appears as its own token.
pub fn has_manual_abbreviation(text: &str) -> bool {
    const ABBR: &str = "РЭ";
    text.match_indices(ABBR).any(|(pos, _)| {
        let before = text[..pos].chars().next_back();
        let after = text[pos + ABBR.len()..].chars().next();
        !before.is_some_and(is_abbreviation_neighbor) && !after.is_some_and(is_abbreviation_neighbor)
    })
}

/// Whether a listing row is a catalog, operation manual or passport in the
/// primary language.
pub fn is_wanted_document(category: &str, title: &str) -> bool {
    let text = format!("{category} {title}");
    if is_secondary_language(&text) {
        return false;
    }
    CATALOG.is_match(&text)
        || MANUAL.is_match(&text)
        || has_manual_abbreviation(&text)
        || PASSPORT.is_match(&text)
}

/// URL at the very end of a document entry, if any.
pub fn extract_trailing_url(entry: &str) -> Option<&str> {
    TRAILING_URL
        .captures(entry)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}

/// Filter, group and deduplicate listing rows.
///
/// Unwanted rows go first, then rows without an article or URL. Within an
/// article the first row for each URL wins.
pub fn group_documents<I>(rows: I) -> DocumentsMap
where
    I: IntoIterator<Item = DocumentRow>,
{
    let mut map = DocumentsMap::new();
    let mut seen: HashMap<String, HashSet<String>> = HashMap::new();

    for row in rows {
        if !is_wanted_document(&row.category, &row.title) {
            continue;
        }
        if row.article.is_empty() || row.url.is_empty() {
            continue;
        }
        if !seen
            .entry(row.article.clone())
            .or_default()
            .insert(row.url.clone())
        {
            continue;
        }
        let entry = format!("{} {}", row.title, row.url).trim().to_string();
        map.group_mut(&row.article).push(entry);
    }

    map
}

/// Build the Documents cell for one article.
///
/// The site link comes first, then listing entries whose URL has not been
/// emitted yet. Entries without a recognizable URL are always kept.
pub fn assemble_documents(article: &str, site_links: &SiteLinks, documents: &DocumentsMap) -> String {
    let mut lines: Vec<String> = Vec::new();
    let mut seen_urls: HashSet<&str> = HashSet::new();

    if let Some(url) = site_links.get(article).filter(|u| !u.is_empty()) {
        lines.push(format!("{SITE_LABEL} {url}"));
        seen_urls.insert(url.as_str());
    }

    for entry in documents.get(article).unwrap_or_default() {
        if let Some(url) = extract_trailing_url(entry) {
            if !seen_urls.insert(url) {
                continue;
            }
        }
        lines.push(entry.clone());
    }

    lines.join("\n")
}

/// Attach the Documents column to every record.
pub fn attach_documents(
    records: Vec<BaseRecord>,
    site_links: &SiteLinks,
    documents: &DocumentsMap,
) -> Vec<OutputRecord> {
    records
        .into_iter()
        .map(|r| {
            let documents = assemble_documents(&clean_article(&r.article), site_links, documents);
            OutputRecord {
                name: r.name,
                article: r.article,
                price: r.price,
                documents,
            }
        })
        .collect()
}

#[cfg(test)]
#[path = "tests/documents_tests.rs"]
mod tests;
