use std::fs;
use std::path::PathBuf;

use avrogen_lib::source::{DEFAULT_CONCURRENCY, DEFAULT_GLOB, Source};

use super::input::{InputArgs, InputError, render_unresolved};

fn args(schema_dir: Option<PathBuf>, registry: Option<&str>) -> InputArgs {
    InputArgs {
        schema_dir,
        registry: registry.map(str::to_owned),
        filter: None,
        glob: DEFAULT_GLOB.to_owned(),
        concurrency: DEFAULT_CONCURRENCY,
        remap: Vec::new(),
        fuel: None,
    }
}

fn schema_dir() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("address.avsc"),
        r#"{"type": "record", "name": "Address", "namespace": "com.acme", "fields": [{"name": "country", "type": "Country"}]}"#,
    )
    .unwrap();
    fs::write(
        dir.path().join("country.avsc"),
        r#"{"type": "enum", "name": "Country", "namespace": "com.acme", "symbols": ["NL", "DE"]}"#,
    )
    .unwrap();
    dir
}

#[test]
fn directory_becomes_file_source() {
    let input = args(Some(PathBuf::from("schemas")), None);
    let source = input.source().unwrap();
    assert!(matches!(source, Source::Files(_)));
}

#[test]
fn registry_url_becomes_registry_source() {
    let mut input = args(None, Some("http://localhost:8081"));
    input.concurrency = 3;
    let Source::Registry(registry) = input.source().unwrap() else {
        panic!("expected a registry source");
    };
    assert_eq!(registry.concurrency(), 3);
}

#[test]
fn bad_match_pattern() {
    let mut input = args(Some(PathBuf::from("schemas")), None);
    input.filter = Some("(".to_owned());
    let err = input.source().unwrap_err();
    assert!(matches!(err, InputError::Filter(_)));
    assert!(err.to_string().starts_with("invalid --match pattern"));
}

#[test]
fn bad_registry_url() {
    let input = args(None, Some("not a url"));
    let err = input.source().unwrap_err();
    assert!(matches!(err, InputError::Run(avrogen_lib::Error::Source(_))));
}

#[test]
fn no_input_at_all() {
    let err = args(None, None).source().unwrap_err();
    assert!(matches!(err, InputError::MissingInput));
}

#[test]
fn bad_remap_entry() {
    let mut input = args(Some(PathBuf::from("schemas")), None);
    input.remap = vec!["com.acme".to_owned()];
    let err = input.pipeline().unwrap_err();
    assert!(matches!(err, InputError::Run(avrogen_lib::Error::Remap(_))));
}

#[tokio::test]
async fn resolves_directory_in_any_order() {
    let dir = schema_dir();
    let input = args(Some(dir.path().to_owned()), None);

    let (_, resolution) = input.resolve().await.unwrap();

    assert!(resolution.is_complete());
    assert_eq!(resolution.namespace().len(), 2);
    assert_eq!(render_unresolved(&resolution, false), "");
}

#[tokio::test]
async fn fuel_limit_aborts() {
    let dir = schema_dir();
    let mut input = args(Some(dir.path().to_owned()), None);
    input.fuel = Some(1);

    let err = input.resolve().await.unwrap_err();

    insta::assert_snapshot!(err, @"parse attempt limit of 1 exceeded");
}

#[tokio::test]
async fn unresolved_are_reported() {
    let dir = schema_dir();
    fs::write(
        dir.path().join("broken.avsc"),
        r#"{"type": "record", "name": "Broken", "fields": [{"name": "x", "type": "Nowhere"}]}"#,
    )
    .unwrap();
    let input = args(Some(dir.path().to_owned()), None);

    let (_, resolution) = input.resolve().await.unwrap();
    let report = render_unresolved(&resolution, false);

    assert!(!resolution.is_complete());
    assert!(report.contains("Nowhere"));
    assert!(report.ends_with("warning: unresolved definitions: broken.avsc\n"));
}

#[tokio::test]
async fn unresolved_ids_are_highlighted() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("broken.avsc"), "{").unwrap();
    let input = args(Some(dir.path().to_owned()), None);

    let (_, resolution) = input.resolve().await.unwrap();
    let report = render_unresolved(&resolution, true);

    assert!(report.ends_with("warning: unresolved definitions: \x1b[33mbroken.avsc\x1b[0m\n"));
}
