use super::*;

fn doc(article: &str, category: &str, title: &str, url: &str) -> DocumentRow {
    DocumentRow {
        article: article.to_string(),
        category: category.to_string(),
        title: title.to_string(),
        url: url.to_string(),
    }
}

#[test]
fn english_catalog_is_excluded() {
    assert!(!is_wanted_document("", "Catalog (En)"));
    assert!(!is_wanted_document("Каталоги", "Каталог насосов (En)"));
    assert!(!is_wanted_document("Каталоги", "Каталог насосов ENG"));
    assert!(!is_wanted_document("Каталог", "english version"));
}

#[test]
fn manual_abbreviation_is_included() {
    assert!(is_wanted_document("", "РЭ насоса"));
    assert!(is_wanted_document("Документы", "Насос (РЭ)"));
    assert!(is_wanted_document("", "РЭ"));
}

#[test]
fn manual_abbreviation_must_stand_alone() {
    assert!(!has_manual_abbreviation("ТРЭК"));
    assert!(!has_manual_abbreviation("РЭС-5"));
    assert!(!has_manual_abbreviation("xРЭ"));
    assert!(has_manual_abbreviation("1РЭ"));
    assert!(has_manual_abbreviation("ТРЭК, РЭ"));
    assert!(!has_manual_abbreviation("рэ насоса"));
}

#[test]
fn unrelated_titles_are_excluded() {
    assert!(!is_wanted_document("", "Инструкция"));
    assert!(!is_wanted_document("Сертификаты", "Сертификат соответствия"));
}

#[test]
fn catalog_manual_and_passport_are_included() {
    assert!(is_wanted_document("Каталоги", "Общий"));
    assert!(is_wanted_document("", "Руководство по эксплуатации ЦНС"));
    assert!(is_wanted_document("", "руководства по эксплуатации"));
    assert!(is_wanted_document("", "Паспорт изделия"));
}

#[test]
fn standalone_en_word_is_secondary() {
    assert!(is_secondary_language("Manual en"));
    assert!(is_secondary_language("Паспорт ( en )"));
    assert!(!is_secondary_language("Entry"));
    assert!(!is_secondary_language("Паспорт изделия"));
}

#[test]
fn grouping_keeps_order_and_dedups_urls() {
    let rows = vec![
        doc("2", "Каталог", "Каталог B", "http://b/1"),
        doc("1", "Каталог", "Каталог A", "http://a/1"),
        doc("2", "Паспорт", "Паспорт B", "http://b/2"),
        doc("2", "Паспорт", "Паспорт B копия", "http://b/2"),
        doc("1", "", "Инструкция", "http://a/2"),
        doc("", "Каталог", "Без артикула", "http://x"),
        doc("3", "Каталог", "Без ссылки", ""),
    ];
    let map = group_documents(rows);

    assert_eq!(map.len(), 2);
    let order: Vec<&str> = map.iter().map(|(a, _)| a).collect();
    assert_eq!(order, vec!["2", "1"]);
    assert_eq!(
        map.get("2").unwrap(),
        &["Каталог B http://b/1".to_string(), "Паспорт B http://b/2".to_string()]
    );
    assert_eq!(map.get("1").unwrap(), &["Каталог A http://a/1".to_string()]);
    assert!(map.get("3").is_none());
}

#[test]
fn empty_title_formats_as_bare_url() {
    let map = group_documents(vec![doc("5", "Паспорт", "", "http://p")]);
    assert_eq!(map.get("5").unwrap(), &["http://p".to_string()]);
}

#[test]
fn trailing_url_extraction() {
    assert_eq!(extract_trailing_url("Каталог http://x/a.pdf"), Some("http://x/a.pdf"));
    assert_eq!(extract_trailing_url("A http://x B https://y  "), Some("https://y"));
    assert_eq!(extract_trailing_url("http://x then text"), None);
    assert_eq!(extract_trailing_url(""), None);
}

#[test]
fn site_link_comes_first_and_suppresses_duplicate() {
    let site_links = SiteLinks::from([("1".to_string(), "https://site/p1".to_string())]);
    let map = group_documents(vec![
        doc("1", "Каталог", "Каталог", "https://site/p1"),
        doc("1", "Паспорт", "Паспорт", "https://files/p.pdf"),
    ]);

    let cell = assemble_documents("1", &site_links, &map);
    assert_eq!(cell, "Сайт https://site/p1\nПаспорт https://files/p.pdf");
}

#[test]
fn missing_everything_yields_empty_cell() {
    let cell = assemble_documents("404", &SiteLinks::new(), &DocumentsMap::new());
    assert_eq!(cell, "");
}

#[test]
fn assembly_is_idempotent() {
    let site_links = SiteLinks::from([("7".to_string(), "http://s/7".to_string())]);
    let map = group_documents(vec![
        doc("7", "Каталог", "Каталог", "http://c/7"),
        doc("7", "Паспорт", "Паспорт", "http://s/7"),
    ]);
    let first = assemble_documents("7", &site_links, &map);
    let second = assemble_documents("7", &site_links, &map);
    assert_eq!(first, second);
    assert_eq!(first.matches("http://s/7").count(), 1);
}

#[test]
fn attach_documents_keys_by_clean_article() {
    let records = vec![BaseRecord {
        name: "Pump".into(),
        article: "123".into(),
        price: Some(10.0),
    }];
    let site_links = SiteLinks::from([("123".to_string(), "http://s/123".to_string())]);
    let out = attach_documents(records, &site_links, &DocumentsMap::new());
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].documents, "Сайт http://s/123");
    assert_eq!(out[0].price, Some(10.0));
}
