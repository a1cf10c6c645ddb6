use std::fs;

use crate::Error;
use crate::pipeline::Pipeline;
use crate::remap::NamespaceRemap;
use crate::source::{FileSource, Source};
use crate::typegen::typescript::Generator;

fn schema_dir() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("address.avsc"),
        r#"{"type": "record", "name": "Address", "namespace": "com.acme", "fields": [{"name": "country", "type": "Country"}]}"#,
    )
    .unwrap();
    fs::write(
        dir.path().join("country.avsc"),
        r#"{"type": "enum", "name": "Country", "namespace": "com.acme", "symbols": ["NL"]}"#,
    )
    .unwrap();
    fs::write(
        dir.path().join("broken.avsc"),
        r#"{"type": "record", "name": "Broken", "fields": [{"name": "x", "type": "Nowhere"}]}"#,
    )
    .unwrap();
    dir
}

#[tokio::test]
async fn runs_source_to_artifacts() {
    let dir = schema_dir();
    let source = Source::from(FileSource::new(dir.path()));
    let pipeline = Pipeline::new().with_remap(NamespaceRemap::parse(["com.acme:models"]).unwrap());

    let output = pipeline.run(&source, &Generator::default()).await.unwrap();

    assert_eq!(output.resolution.unresolved_ids(), ["broken.avsc"]);
    let paths: Vec<String> = output
        .artifacts
        .iter()
        .map(|a| a.path.to_string_lossy().into_owned())
        .collect();
    assert_eq!(paths, ["models/Country.ts", "models/Address.ts"]);
}

#[tokio::test]
async fn missing_directory_aborts() {
    let dir = tempfile::tempdir().unwrap();
    let source = Source::from(FileSource::new(dir.path().join("absent")));

    let err = Pipeline::new().load(&source).await.unwrap_err();

    assert!(matches!(err, Error::Source(_)));
}

#[test]
fn fuel_is_forwarded() {
    let dir = schema_dir();
    let definitions = FileSource::new(dir.path()).load().unwrap();

    let err = Pipeline::new()
        .with_attempt_fuel(Some(1))
        .resolve(definitions)
        .unwrap_err();

    assert_eq!(err.to_string(), "parse attempt limit of 1 exceeded");
}
