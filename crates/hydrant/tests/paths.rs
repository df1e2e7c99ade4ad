//! Dotted property-path traversal over nested model graphs.

use hydrant::prelude::*;

#[derive(Clone, Debug, Default, Model, PartialEq)]
struct Occupation {
    salary: i64,
}

#[derive(Clone, Debug, Default, Model, PartialEq)]
struct Worker {
    name: String,
    #[model(nested)]
    occupation: Occupation,
    #[model(nested)]
    manager: Option<Occupation>,
}

fn sample() -> Worker {
    Worker {
        name: "Joan".to_string(),
        occupation: Occupation { salary: 90_000 },
        manager: None,
    }
}

#[test]
fn walks_successive_property_lookups() {
    let worker = sample();

    assert_eq!(
        get_at_path(&worker, "occupation.salary", '.').unwrap(),
        Value::Int(90_000)
    );
    assert_eq!(get_at_path(&worker, "name", '.').unwrap(), Value::from("Joan"));
}

#[test]
fn custom_delimiters_are_supported() {
    let worker = sample();

    assert_eq!(
        get_at_path(&worker, "occupation/salary", '/').unwrap(),
        Value::Int(90_000)
    );
}

#[test]
fn strict_traversal_reports_each_failure_mode() {
    let worker = sample();

    let err = get_at_path(&worker, "nope.salary", '.').unwrap_err();
    assert!(matches!(err, AccessError::UnknownProperty { .. }));

    let err = get_at_path(&worker, "name.salary", '.').unwrap_err();
    assert!(matches!(err, AccessError::NotNested { .. }));

    // `manager` is a nested slot currently holding no instance
    let err = get_at_path(&worker, "manager.salary", '.').unwrap_err();
    assert!(matches!(err, AccessError::AbsentNested { .. }));
}

#[test]
fn try_traversal_short_circuits_to_absent() {
    let worker = sample();

    assert_eq!(try_get_at_path(&worker, "nope.salary", '.').unwrap(), None);
    assert_eq!(try_get_at_path(&worker, "name.salary", '.').unwrap(), None);
    assert_eq!(
        try_get_at_path(&worker, "manager.salary", '.').unwrap(),
        None
    );
    assert_eq!(
        try_get_at_path(&worker, "occupation.salary", '.').unwrap(),
        Some(Value::Int(90_000))
    );
}

#[test]
fn extension_methods_default_to_the_dot_delimiter() {
    let mut worker = sample();
    worker.manager = Some(Occupation { salary: 120_000 });

    assert_eq!(
        worker.get_value_at_path("manager.salary").unwrap(),
        Value::Int(120_000)
    );
    assert_eq!(
        worker.try_get_value_at_path("manager.missing").unwrap(),
        None
    );
}
