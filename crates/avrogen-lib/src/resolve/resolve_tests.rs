use avrogen_core::FullName;
use indoc::indoc;

use crate::Error;
use crate::namespace::Namespace;
use crate::resolve::{Attempt, Definition, Resolver, SchemaParser};
use crate::schema::{AvroParser, EnumSchema, ParseError, Schema};
use crate::test_utils::{definitions, resolve_avro};

const ADDRESS: &str = indoc! {r#"
    {
      "type": "record",
      "name": "Address",
      "fields": [
        {"name": "street", "type": "string"},
        {"name": "country", "type": "Country"}
      ]
    }
"#};

const COUNTRY: &str = r#"{"type": "enum", "name": "Country", "symbols": ["NL", "DE"]}"#;

fn resolved_names(resolved: &[Schema]) -> Vec<String> {
    resolved
        .iter()
        .filter_map(Schema::name)
        .map(ToString::to_string)
        .collect()
}

/// `T0 -> T1 -> ... -> T{n-1}`, each record referencing the next.
fn chain(n: usize) -> Vec<(String, String)> {
    (0..n)
        .map(|i| {
            let fields = if i + 1 < n {
                format!(r#"[{{"name": "next", "type": "T{}"}}]"#, i + 1)
            } else {
                "[]".to_owned()
            };
            (
                format!("t{i}.avsc"),
                format!(r#"{{"type": "record", "name": "T{i}", "fields": {fields}}}"#),
            )
        })
        .collect()
}

fn owned(pairs: &[(String, String)]) -> Vec<Definition> {
    pairs
        .iter()
        .map(|(id, content)| Definition::new(id.as_str(), content.as_str()))
        .collect()
}

#[test]
fn forward_reference_resolves_on_second_pass() {
    let resolution = resolve_avro(&[("address.avsc", ADDRESS), ("country.avsc", COUNTRY)]);

    assert!(resolution.is_complete());
    assert_eq!(resolved_names(resolution.resolved()), ["Country", "Address"]);
    assert_eq!(resolution.passes(), 2);
    assert_eq!(resolution.attempts(), 3);
    assert_eq!(resolution.unresolved_line(), None);
    insta::assert_snapshot!(
        resolution.summary(),
        @"resolved 2 of 2 definitions in 2 passes (3 attempts)"
    );
}

#[test]
fn commit_is_visible_within_the_same_pass() {
    let resolution = resolve_avro(&[("country.avsc", COUNTRY), ("address.avsc", ADDRESS)]);

    assert!(resolution.is_complete());
    assert_eq!(resolution.passes(), 1);
    assert_eq!(resolved_names(resolution.resolved()), ["Country", "Address"]);
}

#[test]
fn final_set_is_order_independent() {
    let a = r#"{"type": "record", "name": "A", "fields": [{"name": "b", "type": "B"}]}"#;
    let b = r#"{"type": "record", "name": "B", "fields": [{"name": "c", "type": "C"}]}"#;
    let c = r#"{"type": "fixed", "name": "C", "size": 2}"#;
    let orders = [
        [a, b, c],
        [a, c, b],
        [b, a, c],
        [b, c, a],
        [c, a, b],
        [c, b, a],
    ];

    for order in orders {
        let pairs: Vec<(&str, &str)> = order.iter().map(|s| ("def.avsc", *s)).collect();
        let resolution = resolve_avro(&pairs);

        let mut names = resolved_names(resolution.resolved());
        names.sort();
        assert!(resolution.is_complete());
        assert_eq!(names, ["A", "B", "C"]);

        let mut registered: Vec<String> = resolution.namespace().names().map(ToString::to_string).collect();
        registered.sort();
        assert_eq!(registered, ["A", "B", "C"]);
    }
}

#[test]
fn reports_exactly_the_pending_set() {
    let resolution = resolve_avro(&[
        ("a.avsc", r#"{"type": "record", "name": "A", "fields": [{"name": "m", "type": "Missing"}]}"#),
        ("b.avsc", r#"{"type": "record", "name": "B", "fields": [{"name": "a", "type": "A"}]}"#),
        ("c.avsc", COUNTRY),
    ]);

    assert!(!resolution.is_complete());
    assert_eq!(resolution.unresolved_ids(), ["a.avsc", "b.avsc"]);
    assert_eq!(resolution.passes(), 2);
    assert_eq!(resolved_names(resolution.resolved()), ["Country"]);
    insta::assert_snapshot!(
        resolution.unresolved_line().unwrap(),
        @"unresolved definitions: a.avsc, b.avsc"
    );
    insta::assert_snapshot!(
        resolution.summary(),
        @"resolved 1 of 3 definitions in 2 passes (5 attempts), 2 unresolved"
    );

    let failures: Vec<String> = resolution
        .failures()
        .map(|(id, err)| format!("{id}: {err}"))
        .collect();
    assert_eq!(
        failures,
        ["a.avsc: `Missing` is not defined", "b.avsc: `A` is not defined"]
    );
}

#[test]
fn malformed_and_missing_references_are_both_reported() {
    let resolution = resolve_avro(&[
        ("a.avsc", r#"{"type": "record", "name": "A", "fields": [{"name": "b", "type": "B"}]}"#),
        ("address.avsc", ADDRESS),
        ("c-json.avsc", r#"{"type": "record", "#),
        ("c-fields.avsc", r#"{"type": "record", "name": "C"}"#),
        ("country.avsc", COUNTRY),
    ]);

    assert_eq!(
        resolution.unresolved_ids(),
        ["a.avsc", "c-json.avsc", "c-fields.avsc"]
    );
    assert_eq!(resolved_names(resolution.resolved()), ["Country", "Address"]);
    let registered: Vec<String> = resolution.namespace().names().map(ToString::to_string).collect();
    assert_eq!(registered, ["Country", "Address"]);
    assert_eq!(resolution.passes(), 3);
    assert_eq!(resolution.attempts(), 12);

    let errors: Vec<&ParseError> = resolution.failures().map(|(_, err)| err).collect();
    assert!(matches!(errors[0], ParseError::UnknownType { .. }));
    assert!(matches!(errors[1], ParseError::Json { .. }));
    assert!(matches!(errors[2], ParseError::InvalidSchema { .. }));
}

#[test]
fn non_ascii_malformed_definition_renders() {
    let resolution = resolve_avro(&[("y.avsc", "ééé")]);

    assert_eq!(resolution.unresolved_ids(), ["y.avsc"]);
    let rendered = resolution.diagnostics().render();
    assert!(rendered.contains("y.avsc"));
    assert!(rendered.contains("ééé"));
}

#[test]
fn failed_attempts_leave_no_trace() {
    let order = indoc! {r#"
        {
          "type": "record",
          "name": "Order",
          "fields": [
            {"name": "line", "type": {"type": "record", "name": "Line", "fields": []}},
            {"name": "customer", "type": "Customer"}
          ]
        }
    "#};
    let resolution = resolve_avro(&[("order.avsc", order), ("country.avsc", COUNTRY)]);

    assert_eq!(resolution.unresolved_ids(), ["order.avsc"]);
    let names: Vec<String> = resolution.namespace().names().map(ToString::to_string).collect();
    assert_eq!(names, ["Country"]);
}

#[test]
fn rollback_restores_the_snapshot() {
    struct Poisoned;

    impl SchemaParser for Poisoned {
        type Output = ();
        type Error = String;

        fn parse(&self, content: &str, namespace: &mut Namespace) -> Result<(), String> {
            namespace
                .register(Schema::Enum(EnumSchema {
                    name: FullName::parse(content).map_err(|e| e.to_string())?,
                    doc: None,
                    aliases: vec![],
                    symbols: vec![],
                    default: None,
                }))
                .map_err(|e| e.to_string())?;
            Err("poisoned".to_owned())
        }
    }

    let resolver = Resolver::new(Poisoned);
    let mut namespace = Namespace::new();
    let before = namespace.snapshot();

    let attempt = resolver.attempt(&Definition::new("p", "Leaked"), &mut namespace);

    assert_eq!(attempt, Attempt::RolledBack("poisoned".to_owned()));
    assert_eq!(namespace, before);
}

#[test]
fn reruns_are_idempotent() {
    let pairs = [
        ("address.avsc", ADDRESS),
        ("orphan.avsc", r#"{"type": "record", "name": "O", "fields": [{"name": "x", "type": "Nope"}]}"#),
        ("country.avsc", COUNTRY),
    ];

    let first = resolve_avro(&pairs);
    let second = resolve_avro(&pairs);

    assert_eq!(first.resolved(), second.resolved());
    assert_eq!(first.unresolved_ids(), second.unresolved_ids());
    assert_eq!(first.namespace(), second.namespace());
}

#[test]
fn passes_are_bounded_by_input_size() {
    let pairs = chain(6);
    let resolution = Resolver::new(AvroParser).resolve(owned(&pairs)).unwrap();

    assert!(resolution.is_complete());
    assert_eq!(resolution.passes(), 6);
    assert_eq!(resolution.attempts(), 6 + 5 + 4 + 3 + 2 + 1);
}

#[test]
fn attempt_fuel_aborts_the_run() {
    let pairs = chain(5);

    let starved = Resolver::new(AvroParser)
        .with_attempt_fuel(Some(3))
        .resolve(owned(&pairs));
    assert!(matches!(starved, Err(Error::AttemptFuelExhausted(3))));

    let exact = Resolver::new(AvroParser)
        .with_attempt_fuel(Some(15))
        .resolve(owned(&pairs))
        .unwrap();
    assert!(exact.is_complete());
}

#[test]
fn empty_input_is_complete() {
    let resolution = Resolver::new(AvroParser).resolve(Vec::new()).unwrap();

    assert!(resolution.is_complete());
    assert_eq!(resolution.passes(), 0);
    assert!(resolution.resolved().is_empty());
}

#[test]
fn duplicate_definition_stays_unresolved() {
    let resolution = resolve_avro(&[("first.avsc", COUNTRY), ("second.avsc", COUNTRY)]);

    assert_eq!(resolution.unresolved_ids(), ["second.avsc"]);
    assert!(matches!(
        resolution.unresolved()[0].error,
        ParseError::DuplicateName { .. }
    ));
}

#[test]
fn seeded_namespace_is_visible() {
    let mut seed = Namespace::new();
    AvroParser.parse(COUNTRY, &mut seed).unwrap();

    let resolution = Resolver::new(AvroParser)
        .resolve_with(definitions(&[("address.avsc", ADDRESS)]), seed)
        .unwrap();

    assert!(resolution.is_complete());
    assert_eq!(resolution.passes(), 1);
    assert_eq!(resolution.namespace().len(), 2);
}

#[test]
fn diagnostics_point_into_definition_text() {
    let resolution = resolve_avro(&[("address.avsc", ADDRESS)]);

    let diagnostics = resolution.diagnostics();
    assert_eq!(diagnostics.error_count(), 1);

    let message = diagnostics.iter().next().unwrap();
    assert_eq!(message.definition(), "address.avsc");
    assert_eq!(&ADDRESS[message.span().unwrap()], "Country");
    assert_eq!(message.hints().len(), 1);

    let rendered = diagnostics.render();
    assert!(rendered.contains("`Country` is not defined"));
    assert!(rendered.contains("address.avsc"));
    assert!(rendered.contains("= help:"));
}
