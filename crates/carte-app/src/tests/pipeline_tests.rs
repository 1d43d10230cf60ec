use std::fs;
use std::path::Path;

use carte_config::Config;
use serde_json::Value;

use crate::controller::{RunSummary, run};
use crate::io::{DISHES_FILE, STATS_FILE};

const VOCABULARY: &str = "\
name_zh-Hant\tname_en\twikipedia_url\timage_url\tdescription_en\tdish_cuisine_locale
牛肉麵\tBeef Noodle Soup\thttps://en.wikipedia.org/wiki/Beef_noodle_soup\t\t\tzh-TW
牛肉\tbeef\t\t\t\t
湯\tsoup\t\t\t\t
";

fn menu(lang: &str, section: &str, items: &[&str]) -> String {
    let items: Vec<Value> = items
        .iter()
        .map(|name| serde_json::json!({ "names": { lang: name, "en": "" } }))
        .collect();
    serde_json::json!({
        "menu": {
            "language_codes": [lang, "en"],
            "pages": [{ "sections": [{ "names": { lang: section }, "items": items }] }]
        }
    })
    .to_string()
}

fn write(path: &Path, contents: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

fn read_json(path: &Path) -> Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

fn setup(root: &Path) -> Config {
    let input = root.join("content");
    write(&input.join("taipei/a.json"), &menu("zh-Hant", "湯 類", &["牛肉麵", "牛肉麵", "牛肉湯"]));
    write(&input.join("taipei/b.json"), &menu("zh-Hant", "麵類", &["牛肉麵"]));
    write(&input.join("taipei/c.json"), &menu("zh-Hant", "麵類", &["牛肉麵", "滷肉飯"]));
    write(&input.join("tokyo/d.json"), &menu("ja", "麺類", &["牛肉麵"]));
    write(&input.join("closed.json"), r#"{"author": "nobody"}"#);
    write(&root.join("data/known_terms.tsv"), VOCABULARY);

    let mut config = Config::default();
    config.input_dir = input;
    config.vocabulary.path = root.join("data/known_terms.tsv");
    config.output.dir = root.join("output");
    config
}

#[test]
fn test_run_writes_artifacts() {
    let root = tempfile::tempdir().unwrap();
    let config = setup(root.path());

    let summary = run(&config).unwrap();
    assert_eq!(
        summary,
        RunSummary {
            documents: 5,
            annotated: 3,
            issues: 1,
            dishes: 1,
        }
    );

    let out = root.path().join("output");
    let a = read_json(&out.join("taipei/a.html.json"));
    let section = &a["menu"]["pages"][0]["sections"][0];
    assert_eq!(a["menu"]["_display_language_codes"], serde_json::json!(["zh-Hant", "en"]));
    assert_eq!(section["_id"], "湯類");
    assert_eq!(section["names"]["zh-Hant"], "湯類");
    let item = &section["items"][0];
    assert_eq!(item["reference_url"], "https://en.wikipedia.org/wiki/Beef_noodle_soup");
    assert!(item["_annotated_name"].as_str().unwrap().contains("Beef Noodle Soup"));

    let d = read_json(&out.join("tokyo/d.html.json"));
    assert!(d["menu"]["pages"][0]["sections"][0]["items"][0]
        .get("_annotated_name")
        .is_none());
    assert_eq!(d["menu"]["_display_language_codes"], serde_json::json!(["ja", "en"]));
    assert!(out.join("closed.html.json").exists());

    // Stats cover the whole corpus, including unannotated and menu-less documents
    let stats = read_json(&out.join(STATS_FILE));
    assert_eq!(stats["document_count"], 5);
    assert_eq!(stats["common_dishes"][0]["term"], "牛肉麵");
    assert_eq!(stats["common_dishes"][0]["count"], 4);
    assert_eq!(stats["common_dishes"][0]["label"], "Beef Noodle Soup");

    let dishes = read_json(&out.join(DISHES_FILE));
    assert_eq!(dishes["groups"][0]["category_tag"], "zh-TW");
    assert_eq!(
        dishes["groups"][0]["entries"][0]["documents"],
        serde_json::json!(["taipei/a.html", "taipei/b.html", "taipei/c.html"])
    );
}

#[test]
fn test_invalid_vocabulary_aborts_before_output() {
    let root = tempfile::tempdir().unwrap();
    let config = setup(root.path());
    fs::write(&config.vocabulary.path, "name_zh-Hant\tname_en\n").unwrap();

    assert!(run(&config).is_err());
    assert!(!root.path().join("output").exists());
}

#[test]
fn test_invalid_document_is_an_error() {
    let root = tempfile::tempdir().unwrap();
    let config = setup(root.path());
    write(&config.input_dir.join("broken.json"), "{ not json");

    let err = run(&config).unwrap_err();
    assert!(format!("{err:#}").contains("broken.json"));
}
