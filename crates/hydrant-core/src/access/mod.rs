use crate::{
    error::AccessError,
    model::{FieldModel, ModelShape},
    traits::{FieldAccess, FieldValue, Model},
    value::Value,
};
use parking_lot::RwLock;
use std::{
    any::Any,
    collections::HashMap,
    sync::{Arc, OnceLock},
};

type GetFn = Box<dyn Fn(&dyn Any) -> Result<Value, AccessError> + Send + Sync>;
type SetFn = Box<dyn Fn(&mut dyn Any, Value) -> Result<(), AccessError> + Send + Sync>;

///
/// MissingAccessorPolicy
///
/// Behavior for fields declared `#[model(no_get)]` / `#[model(no_set)]`.
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum MissingAccessorPolicy {
    /// Getter-less reads yield `Value::Null`; setter-less writes no-op.
    #[default]
    Silent,
    /// Surface `NoGetter` / `NoSetter` errors instead.
    Error,
}

///
/// PropertyAccessor
///
/// One property's captured get/set pair. The closures downcast the
/// type-erased instance to the owning type and dispatch through the
/// generated field surface; after construction they hold no mutable
/// state and are safe for concurrent invocation.
///

pub struct PropertyAccessor {
    name: &'static str,
    field: &'static FieldModel,
    get: GetFn,
    set: SetFn,
}

impl PropertyAccessor {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    #[must_use]
    pub const fn field(&self) -> &'static FieldModel {
        self.field
    }
}

///
/// TypeAccessors
///
/// Ordered accessor table for one type: declaration-order property list
/// plus a name→index map. Immutable once built; index positions stay
/// stable for the lifetime of the cached table.
///

pub struct TypeAccessors {
    shape: &'static ModelShape,
    policy: MissingAccessorPolicy,
    accessors: Vec<PropertyAccessor>,
    index_by_name: HashMap<&'static str, usize>,
}

impl TypeAccessors {
    /// Build the accessor table for `T`. One closure pair per field,
    /// each binding the field index and the owning type's downcast.
    #[must_use]
    pub fn build<T: Model>(policy: MissingAccessorPolicy) -> Self {
        let shape = T::SHAPE;
        let mut accessors = Vec::with_capacity(shape.fields.len());
        let mut index_by_name = HashMap::with_capacity(shape.fields.len());

        for (index, field) in shape.fields.iter().enumerate() {
            let get: GetFn = Box::new(move |instance: &dyn Any| {
                let model = instance
                    .downcast_ref::<T>()
                    .ok_or(AccessError::InstanceType {
                        type_path: shape.path,
                    })?;

                Ok(model.get_field(index).unwrap_or(Value::Null))
            });

            let set: SetFn = Box::new(move |instance: &mut dyn Any, value: Value| {
                let model = instance
                    .downcast_mut::<T>()
                    .ok_or(AccessError::InstanceType {
                        type_path: shape.path,
                    })?;

                model
                    .set_field(index, value)
                    .map_err(|err| AccessError::from_write(shape, field.name, err))
            });

            index_by_name.insert(field.name, index);
            accessors.push(PropertyAccessor {
                name: field.name,
                field,
                get,
                set,
            });
        }

        Self {
            shape,
            policy,
            accessors,
            index_by_name,
        }
    }

    ///
    /// LOOKUP
    ///

    #[must_use]
    pub const fn shape(&self) -> &'static ModelShape {
        self.shape
    }

    #[must_use]
    pub const fn type_path(&self) -> &'static str {
        self.shape.path
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.accessors.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.accessors.is_empty()
    }

    #[must_use]
    pub fn has_property(&self, name: &str) -> bool {
        self.index_by_name.contains_key(name)
    }

    /// Stable declaration-order index of a property.
    #[must_use]
    pub fn property_index(&self, name: &str) -> Option<usize> {
        self.index_by_name.get(name).copied()
    }

    /// Accessors in declaration order.
    pub fn properties(&self) -> impl Iterator<Item = &PropertyAccessor> {
        self.accessors.iter()
    }

    fn accessor(&self, name: &str) -> Result<&PropertyAccessor, AccessError> {
        self.index_by_name
            .get(name)
            .map(|&index| &self.accessors[index])
            .ok_or_else(|| AccessError::UnknownProperty {
                type_path: self.shape.path,
                property: name.to_string(),
            })
    }

    fn accessor_at(&self, index: usize) -> Result<&PropertyAccessor, AccessError> {
        self.accessors
            .get(index)
            .ok_or(AccessError::IndexOutOfRange {
                type_path: self.shape.path,
                index,
                len: self.accessors.len(),
            })
    }

    ///
    /// READ
    ///

    pub fn get(&self, instance: &dyn Any, name: &str) -> Result<Value, AccessError> {
        let accessor = self.accessor(name)?;
        self.invoke_get(accessor, instance)
    }

    pub fn get_at(&self, instance: &dyn Any, index: usize) -> Result<Value, AccessError> {
        let accessor = self.accessor_at(index)?;
        self.invoke_get(accessor, instance)
    }

    /// Absent instead of erroring for an unknown property name.
    pub fn try_get(&self, instance: &dyn Any, name: &str) -> Result<Option<Value>, AccessError> {
        match self.index_by_name.get(name) {
            None => Ok(None),
            Some(&index) => self.invoke_get(&self.accessors[index], instance).map(Some),
        }
    }

    /// Typed read; a failed conversion is a type mismatch, distinct from
    /// not-found.
    pub fn get_as<V: FieldValue>(&self, instance: &dyn Any, name: &str) -> Result<V, AccessError> {
        let value = self.get(instance, name)?;

        V::from_value(&value).ok_or_else(|| AccessError::TypeMismatch {
            value: value.tag(),
            type_path: self.shape.path,
            property: name.to_string(),
        })
    }

    pub fn try_get_as<V: FieldValue>(
        &self,
        instance: &dyn Any,
        name: &str,
    ) -> Result<Option<V>, AccessError> {
        match self.try_get(instance, name)? {
            None => Ok(None),
            Some(value) => V::from_value(&value)
                .map(Some)
                .ok_or_else(|| AccessError::TypeMismatch {
                    value: value.tag(),
                    type_path: self.shape.path,
                    property: name.to_string(),
                }),
        }
    }

    ///
    /// WRITE
    ///

    pub fn set(&self, instance: &mut dyn Any, name: &str, value: Value) -> Result<(), AccessError> {
        let accessor = self.accessor(name)?;
        self.invoke_set(accessor, instance, value)
    }

    pub fn set_at(
        &self,
        instance: &mut dyn Any,
        index: usize,
        value: Value,
    ) -> Result<(), AccessError> {
        let accessor = self.accessor_at(index)?;
        self.invoke_set(accessor, instance, value)
    }

    ///
    /// NESTED
    ///

    /// Borrow the nested child model behind a property.
    pub fn nested_ref<'a>(
        &self,
        instance: &'a dyn FieldAccess,
        name: &str,
    ) -> Result<Option<&'a dyn FieldAccess>, AccessError> {
        let index = self.nested_index(name)?;

        Ok(instance.nested_ref(index))
    }

    /// Mutable variant of [`nested_ref`](Self::nested_ref).
    pub fn nested_mut<'a>(
        &self,
        instance: &'a mut dyn FieldAccess,
        name: &str,
    ) -> Result<Option<&'a mut dyn FieldAccess>, AccessError> {
        let index = self.nested_index(name)?;

        Ok(instance.nested_mut(index))
    }

    fn nested_index(&self, name: &str) -> Result<usize, AccessError> {
        let accessor = self.accessor(name)?;

        if !accessor.field.is_nested() {
            return Err(AccessError::NotNested {
                type_path: self.shape.path,
                property: name.to_string(),
            });
        }

        Ok(self.index_by_name[accessor.name])
    }

    fn invoke_get(
        &self,
        accessor: &PropertyAccessor,
        instance: &dyn Any,
    ) -> Result<Value, AccessError> {
        if !accessor.field.has_getter && self.policy == MissingAccessorPolicy::Error {
            return Err(AccessError::NoGetter {
                type_path: self.shape.path,
                property: accessor.name.to_string(),
            });
        }

        (accessor.get)(instance)
    }

    fn invoke_set(
        &self,
        accessor: &PropertyAccessor,
        instance: &mut dyn Any,
        value: Value,
    ) -> Result<(), AccessError> {
        if !accessor.field.has_setter {
            return match self.policy {
                MissingAccessorPolicy::Silent => Ok(()),
                MissingAccessorPolicy::Error => Err(AccessError::NoSetter {
                    type_path: self.shape.path,
                    property: accessor.name.to_string(),
                }),
            };
        }

        (accessor.set)(instance, value)
    }
}

///
/// AccessorDirectory
///
/// Process-wide (or caller-owned) cache mapping type identity to its
/// accessor table. First requester for a type builds the table under the
/// write lock; every caller, including racers, observes one fully-built
/// instance. Published tables are immutable and read lock-free apart
/// from the map lookup.
///

pub struct AccessorDirectory {
    policy: MissingAccessorPolicy,
    inner: RwLock<HashMap<&'static str, Arc<TypeAccessors>>>,
}

impl AccessorDirectory {
    #[must_use]
    pub fn new() -> Self {
        Self::with_policy(MissingAccessorPolicy::default())
    }

    #[must_use]
    pub fn with_policy(policy: MissingAccessorPolicy) -> Self {
        Self {
            policy,
            inner: RwLock::new(HashMap::new()),
        }
    }

    /// Shared default directory used by the convenience layer.
    #[must_use]
    pub fn global() -> &'static Self {
        static GLOBAL: OnceLock<AccessorDirectory> = OnceLock::new();

        GLOBAL.get_or_init(Self::new)
    }

    /// Accessor table for `T`, building it on first request.
    #[must_use]
    pub fn of<T: Model>(&self) -> Arc<TypeAccessors> {
        self.of_shape(T::SHAPE)
    }

    /// Accessor table for an instance's runtime type.
    #[must_use]
    pub fn of_dyn(&self, instance: &dyn FieldAccess) -> Arc<TypeAccessors> {
        self.of_shape(instance.shape())
    }

    fn of_shape(&self, shape: &'static ModelShape) -> Arc<TypeAccessors> {
        // fast path: uncontended read of a published table
        if let Some(accessors) = self.inner.read().get(shape.path) {
            return Arc::clone(accessors);
        }

        // miss: build under the write lock; losers of the race reuse the
        // winner's entry
        let mut map = self.inner.write();
        Arc::clone(
            map.entry(shape.path)
                .or_insert_with(|| Arc::new((shape.accessors)(self.policy))),
        )
    }

    /// Drop every cached table (test isolation).
    pub fn clear(&self) {
        self.inner.write().clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }
}

impl Default for AccessorDirectory {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::{AccessorDirectory, MissingAccessorPolicy};
    use crate::{
        error::AccessError,
        test_fixtures::{Address, Guarded, Person},
        value::Value,
    };
    use std::sync::Arc;

    #[test]
    fn directory_returns_one_table_per_type() {
        let directory = AccessorDirectory::new();
        let first = directory.of::<Person>();
        let second = directory.of::<Person>();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(directory.len(), 1);

        let via_instance = directory.of_dyn(&Person::default());
        assert!(Arc::ptr_eq(&first, &via_instance));
    }

    #[test]
    fn concurrent_first_requests_share_one_table() {
        let directory = AccessorDirectory::new();

        let tables: Vec<_> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..8).map(|_| scope.spawn(|| directory.of::<Person>())).collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        for table in &tables {
            assert!(Arc::ptr_eq(&tables[0], table));
        }
        assert_eq!(directory.len(), 1);
    }

    #[test]
    fn get_set_round_trip_by_name_and_index() {
        let directory = AccessorDirectory::new();
        let fda = directory.of::<Person>();
        let mut person = Person::default();

        fda.set(&mut person, "name", Value::from("Ben")).unwrap();
        assert_eq!(person.name, "Ben");
        assert_eq!(fda.get(&person, "name").unwrap(), Value::from("Ben"));

        let age_index = fda.property_index("age").unwrap();
        fda.set_at(&mut person, age_index, Value::Int(1_000)).unwrap();
        assert_eq!(person.age, 1_000);
        assert_eq!(fda.get_at(&person, age_index).unwrap(), Value::Int(1_000));
    }

    #[test]
    fn unknown_property_raises_and_try_returns_absent() {
        let directory = AccessorDirectory::new();
        let fda = directory.of::<Person>();
        let person = Person::default();

        let err = fda.get(&person, "no_such_prop").unwrap_err();
        assert!(matches!(err, AccessError::UnknownProperty { .. }));
        assert!(err.to_string().contains("no_such_prop"));
        assert!(err.to_string().contains("Person"));

        assert_eq!(fda.try_get(&person, "no_such_prop").unwrap(), None);
        assert!(!fda.has_property("no_such_prop"));
        assert!(fda.has_property("name"));
    }

    #[test]
    fn typed_get_distinguishes_mismatch_from_not_found() {
        let directory = AccessorDirectory::new();
        let fda = directory.of::<Person>();
        let person = Person {
            age: 7,
            ..Person::default()
        };

        assert_eq!(fda.get_as::<i32>(&person, "age").unwrap(), 7);

        let err = fda.get_as::<String>(&person, "age").unwrap_err();
        assert!(matches!(err, AccessError::TypeMismatch { .. }));

        let err = fda.get_as::<String>(&person, "missing").unwrap_err();
        assert!(matches!(err, AccessError::UnknownProperty { .. }));

        // try form still surfaces the mismatch, only not-found is absorbed
        assert!(fda.try_get_as::<String>(&person, "age").is_err());
        assert_eq!(fda.try_get_as::<String>(&person, "missing").unwrap(), None);
    }

    #[test]
    fn index_out_of_range_is_reported() {
        let directory = AccessorDirectory::new();
        let fda = directory.of::<Address>();

        let err = fda.get_at(&Address::default(), 99).unwrap_err();
        assert!(matches!(err, AccessError::IndexOutOfRange { index: 99, .. }));
    }

    #[test]
    fn foreign_instance_type_is_reported() {
        let directory = AccessorDirectory::new();
        let fda = directory.of::<Person>();

        let err = fda.get(&Address::default(), "name").unwrap_err();
        assert!(matches!(err, AccessError::InstanceType { .. }));
    }

    #[test]
    fn nested_lookup_borrows_the_child() {
        let directory = AccessorDirectory::new();
        let fda = directory.of::<Person>();
        let person = Person {
            address: Address {
                street: "Main St".to_string(),
            },
            ..Person::default()
        };

        let child = fda.nested_ref(&person, "address").unwrap().unwrap();
        assert_eq!(child.shape().model_name, "Address");

        let err = fda.nested_ref(&person, "name").unwrap_err();
        assert!(matches!(err, AccessError::NotNested { .. }));
    }

    #[test]
    fn silent_policy_nulls_missing_getter_and_skips_missing_setter() {
        let directory = AccessorDirectory::new();
        let fda = directory.of::<Guarded>();
        let mut guarded = Guarded {
            id: 42,
            secret: "hidden".to_string(),
        };

        // no_get read yields the absent marker
        assert_eq!(fda.get(&guarded, "secret").unwrap(), Value::Null);

        // no_set write silently does nothing
        fda.set(&mut guarded, "id", Value::Uint(7)).unwrap();
        assert_eq!(guarded.id, 42);
    }

    #[test]
    fn error_policy_surfaces_missing_accessors() {
        let directory = AccessorDirectory::with_policy(MissingAccessorPolicy::Error);
        let fda = directory.of::<Guarded>();
        let mut guarded = Guarded::default();

        let err = fda.get(&guarded, "secret").unwrap_err();
        assert!(matches!(err, AccessError::NoGetter { .. }));

        let err = fda.set(&mut guarded, "id", Value::Uint(7)).unwrap_err();
        assert!(matches!(err, AccessError::NoSetter { .. }));
    }

    #[test]
    fn clear_resets_the_cache() {
        let directory = AccessorDirectory::new();
        let first = directory.of::<Person>();
        directory.clear();
        assert!(directory.is_empty());

        let rebuilt = directory.of::<Person>();
        assert!(!Arc::ptr_eq(&first, &rebuilt));
    }
}
