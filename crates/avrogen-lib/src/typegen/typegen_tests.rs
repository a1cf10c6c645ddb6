use std::path::PathBuf;

use crate::remap::NamespaceRemap;
use crate::test_utils::resolve_avro;
use crate::typegen::typescript::Generator;
use crate::typegen::{Artifact, CodeGenerator, GenError, collect_named, write_artifacts};

#[test]
fn collects_nested_definitions_in_order() {
    let resolution = resolve_avro(&[(
        "order.avsc",
        r#"{"type": "record", "name": "Order", "namespace": "shop", "fields": [
            {"name": "status", "type": {"type": "enum", "name": "Status", "symbols": ["OPEN"]}}
        ]}"#,
    )]);

    let named = collect_named(resolution.resolved(), &NamespaceRemap::new()).unwrap();

    let names: Vec<String> = named.keys().map(ToString::to_string).collect();
    assert_eq!(names, ["shop.Order", "shop.Status"]);
}

#[test]
fn remap_collision_is_a_duplicate() {
    let resolution = resolve_avro(&[
        ("a.avsc", r#"{"type": "fixed", "name": "X", "namespace": "a", "size": 1}"#),
        ("b.avsc", r#"{"type": "fixed", "name": "X", "namespace": "b", "size": 1}"#),
    ]);
    let remap = NamespaceRemap::parse(["a:c", "b:c"]).unwrap();

    let err = Generator::default()
        .generate(resolution.resolved(), &remap)
        .unwrap_err();

    assert!(matches!(&err, GenError::DuplicateType(name) if name.to_string() == "c.X"));
    assert_eq!(
        err.to_string(),
        "`c.X` is defined more than once in the generated batch"
    );
}

#[test]
fn writes_artifacts_creating_directories() {
    let dir = tempfile::tempdir().unwrap();
    let artifacts = vec![
        Artifact {
            path: PathBuf::from("com/acme/Order.ts"),
            contents: "export interface Order {\n}\n".to_owned(),
        },
        Artifact {
            path: PathBuf::from("Root.ts"),
            contents: "export type Root = string;\n".to_owned(),
        },
    ];

    let written = write_artifacts(dir.path(), &artifacts).unwrap();

    assert_eq!(
        written,
        [dir.path().join("com/acme/Order.ts"), dir.path().join("Root.ts")]
    );
    assert_eq!(
        std::fs::read_to_string(dir.path().join("com/acme/Order.ts")).unwrap(),
        "export interface Order {\n}\n"
    );
}
