//! Shared model fixtures for the accessor and hydration tests.

use hydrant_derive::Model;

#[derive(Clone, Debug, Default, Model, PartialEq)]
pub(crate) struct Address {
    pub street: String,
}

#[derive(Clone, Debug, Default, Model, PartialEq)]
pub(crate) struct Person {
    pub name: String,
    pub age: i32,
    #[model(nested)]
    pub address: Address,
}

/// Optional nesting: `home` is absent until a hydrator or caller creates it.
#[derive(Clone, Debug, Default, Model, PartialEq)]
pub(crate) struct Contact {
    pub email: Option<String>,
    pub score: Option<i64>,
    #[model(nested)]
    pub home: Option<Address>,
}

/// Accessor-less fields for the missing-accessor policy tests.
#[derive(Clone, Debug, Default, Model, PartialEq)]
pub(crate) struct Guarded {
    #[model(no_set)]
    pub id: u64,
    #[model(no_get)]
    pub secret: String,
}
