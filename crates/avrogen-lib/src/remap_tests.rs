use avrogen_core::FullName;

use crate::remap::{NamespaceRemap, RemapError};

#[test]
fn longest_prefix_wins() {
    let remap = NamespaceRemap::parse(["com:root", "com.acme:app.models"]).unwrap();

    assert_eq!(remap.apply("com.acme.billing"), "app.models.billing");
    assert_eq!(remap.apply("com.acme"), "app.models");
    assert_eq!(remap.apply("com.other"), "root.other");
}

#[test]
fn matches_whole_segments_only() {
    let remap = NamespaceRemap::parse(["com.acme:app"]).unwrap();

    assert_eq!(remap.apply("com.acmecorp"), "com.acmecorp");
    assert_eq!(remap.apply("org.acme"), "org.acme");
}

#[test]
fn last_duplicate_wins() {
    let remap = NamespaceRemap::parse(["com.acme:first", "com.acme:second"]).unwrap();

    assert_eq!(remap.len(), 1);
    assert_eq!(remap.apply("com.acme.x"), "second.x");
}

#[test]
fn applies_to_full_names() {
    let remap = NamespaceRemap::parse(["com.acme:app"]).unwrap();

    let moved = remap.apply_name(&FullName::parse("com.acme.geo.Country").unwrap());
    let root = remap.apply_name(&FullName::parse("Country").unwrap());

    assert_eq!(moved.to_string(), "app.geo.Country");
    assert_eq!(root.to_string(), "Country");
}

#[test]
fn rejects_malformed_entries() {
    assert_eq!(
        NamespaceRemap::parse(["com.acme"]),
        Err(RemapError::Malformed("com.acme".to_owned()))
    );
    assert_eq!(
        NamespaceRemap::parse(["a:b:c"]),
        Err(RemapError::Malformed("a:b:c".to_owned()))
    );
    assert_eq!(
        NamespaceRemap::parse([":app"]),
        Err(RemapError::InvalidNamespace {
            entry: ":app".to_owned(),
            namespace: String::new(),
        })
    );
    assert_eq!(
        NamespaceRemap::parse(["com.acme:app-models"])
            .unwrap_err()
            .to_string(),
        "remap `com.acme:app-models`: `app-models` is not a valid namespace"
    );
}

#[test]
fn empty_table_is_identity() {
    let remap = NamespaceRemap::parse(Vec::<String>::new()).unwrap();

    assert!(remap.is_empty());
    assert_eq!(remap.apply("com.acme"), "com.acme");
}
