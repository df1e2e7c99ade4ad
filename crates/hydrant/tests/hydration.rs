//! End-to-end hydration scenarios over derived model graphs.

use hydrant::prelude::*;

#[derive(Clone, Debug, Default, Model, PartialEq)]
struct Address {
    street: String,
    city: Option<String>,
}

#[derive(Clone, Debug, Default, Model, PartialEq)]
struct Person {
    name: String,
    age: i32,
    #[model(nested)]
    address: Address,
}

#[derive(Clone, Debug, Default, Model, PartialEq)]
struct Company {
    title: String,
    #[model(nested)]
    headquarters: Option<Address>,
    #[model(nested)]
    owner: Option<Person>,
}

#[test]
fn the_person_address_scenario() {
    let directory = HydratorDirectory::new();
    let hydrator = directory
        .hydrator::<Person>(&ColumnMap::from_names(["name", "age", "address.street"]))
        .unwrap();

    let result = hydrator
        .hydrate(&[vec![
            Value::from("Ben"),
            Value::Int(1_000),
            Value::from("Main St"),
        ]])
        .unwrap();

    assert_eq!(result[0].name, "Ben");
    assert_eq!(result[0].age, 1_000);
    assert_eq!(result[0].address.street, "Main St");
}

#[test]
fn two_level_nesting_assembles_bottom_up() {
    let directory = HydratorDirectory::new();
    let map = ColumnMap::from_names([
        "title",
        "owner.name",
        "owner.age",
        "owner.address.street",
        "headquarters.street",
    ]);
    let hydrator = directory.hydrator::<Company>(&map).unwrap();

    let companies = hydrator
        .hydrate(&[vec![
            Value::from("Initech"),
            Value::from("Peter"),
            Value::Int(33),
            Value::from("Baker St"),
            Value::from("HQ Plaza"),
        ]])
        .unwrap();

    let company = &companies[0];
    assert_eq!(company.title, "Initech");

    let owner = company.owner.as_ref().unwrap();
    assert_eq!(owner.name, "Peter");
    assert_eq!(owner.age, 33);
    assert_eq!(owner.address.street, "Baker St");

    assert_eq!(
        company.headquarters,
        Some(Address {
            street: "HQ Plaza".to_string(),
            city: None,
        })
    );
}

#[test]
fn optional_children_without_mapped_columns_stay_absent() {
    let directory = HydratorDirectory::new();
    let hydrator = directory
        .hydrator::<Company>(&ColumnMap::from_names(["title"]))
        .unwrap();

    let companies = hydrator.hydrate(&[vec![Value::from("Acme")]]).unwrap();

    assert_eq!(companies[0].owner, None);
    assert_eq!(companies[0].headquarters, None);
}

#[test]
fn nested_nullable_fields_absorb_the_sentinel() {
    let directory = HydratorDirectory::new();
    let hydrator = directory
        .hydrator::<Person>(&ColumnMap::from_names([
            "name",
            "address.street",
            "address.city",
        ]))
        .unwrap();

    let people = hydrator
        .hydrate(&[vec![
            Value::from("Ann"),
            Value::from("Main St"),
            Value::Null,
        ]])
        .unwrap();

    assert_eq!(people[0].address.city, None);
    assert_eq!(people[0].address.street, "Main St");
}

#[test]
fn batches_populate_in_row_order() {
    let directory = HydratorDirectory::new();
    let hydrator = directory
        .hydrator::<Person>(&ColumnMap::from_names(["name", "age"]))
        .unwrap();

    let rows: Vec<Row> = (0..100)
        .map(|i| vec![Value::from(format!("p{i}")), Value::Int(i)])
        .collect();

    let people = hydrator.hydrate(&rows).unwrap();

    assert_eq!(people.len(), 100);
    assert_eq!(people[0].name, "p0");
    assert_eq!(people[99].name, "p99");
    assert_eq!(people[42].age, 42);
}

#[test]
fn one_plan_serves_many_batches() {
    let directory = HydratorDirectory::new();
    let map = ColumnMap::from_names(["name", "age"]);

    let first = directory.hydrator::<Person>(&map).unwrap();
    let second = directory.hydrator::<Person>(&map).unwrap();
    assert_eq!(directory.len(), 1);
    assert_eq!(first.fingerprint(), second.fingerprint());

    // distinct types with the same column names compile distinct plans
    let _company = directory
        .hydrator::<Company>(&ColumnMap::from_names(["title"]))
        .unwrap();
    assert_eq!(directory.len(), 2);
}

#[test]
fn concurrent_hydrator_requests_share_one_plan() {
    let directory = HydratorDirectory::new();
    let map = ColumnMap::from_names(["name", "age", "address.street"]);

    let fingerprints: Vec<u64> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| {
                scope.spawn(|| {
                    let hydrator = directory.hydrator::<Person>(&map).unwrap();
                    let people = hydrator
                        .hydrate(&[vec![
                            Value::from("Ben"),
                            Value::Int(1),
                            Value::from("Main St"),
                        ]])
                        .unwrap();
                    assert_eq!(people[0].address.street, "Main St");

                    hydrator.fingerprint()
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(directory.len(), 1);
    assert!(fingerprints.windows(2).all(|w| w[0] == w[1]));
}

#[test]
fn mismatch_inside_a_nested_child_names_the_child_model() {
    let directory = HydratorDirectory::new();
    let hydrator = directory
        .hydrator::<Person>(&ColumnMap::from_names(["name", "address.street"]))
        .unwrap();

    let err = hydrator
        .hydrate(&[vec![Value::from("Ben"), Value::Int(5)]])
        .unwrap_err();

    let message = err.to_string();
    assert!(message.contains("Address"));
    assert!(message.contains("street"));
    assert!(message.contains("int"));
}
