mod map;
mod plan;


use crate::{
    error::{HydrateError, PlanError},
    traits::Model,
    value::Value,
};
use parking_lot::RwLock;
use std::{
    collections::HashMap,
    marker::PhantomData,
    sync::{Arc, OnceLock},
};

// re-exports
pub use map::{ColumnMap, ColumnSpec, ShapeKey};
pub use plan::HydrationPlan;

/// One row of loosely-typed cell values.
pub type Row = Vec<Value>;

///
/// Hydrator
///
/// Typed handle over one shape's compiled plan. Stateless between calls;
/// each invocation is a single pass over the row batch and retains no
/// reference to the caller's destination.
///

pub struct Hydrator<T: Model> {
    plan: Arc<HydrationPlan>,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Model> std::fmt::Debug for Hydrator<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Hydrator").finish_non_exhaustive()
    }
}

impl<T: Model> Hydrator<T> {
    const fn from_plan(plan: Arc<HydrationPlan>) -> Self {
        Self {
            plan,
            _marker: PhantomData,
        }
    }

    /// Populate `destination` with one instance per row, in row order.
    ///
    /// A failure aborts the pass immediately; instances already pushed for
    /// earlier rows stay visible to the caller.
    pub fn populate(&self, destination: &mut Vec<T>, rows: &[Row]) -> Result<usize, HydrateError> {
        destination.reserve(rows.len());

        for (index, row) in rows.iter().enumerate() {
            if let Some(needed) = self.plan.max_column() {
                if row.len() <= needed {
                    return Err(HydrateError::ShortRow {
                        row: index,
                        needed,
                        found: row.len(),
                    });
                }
            }

            let mut instance = T::default();
            self.plan.populate_instance(&mut instance, row)?;
            destination.push(instance);
        }

        Ok(rows.len())
    }

    /// Convenience wrapper allocating the destination.
    pub fn hydrate(&self, rows: &[Row]) -> Result<Vec<T>, HydrateError> {
        let mut destination = Vec::with_capacity(rows.len());
        self.populate(&mut destination, rows)?;

        Ok(destination)
    }

    /// Diagnostic digest of the shape this hydrator was compiled for.
    #[must_use]
    pub fn fingerprint(&self) -> u64 {
        self.plan.fingerprint()
    }
}

impl<T: Model> Clone for Hydrator<T> {
    fn clone(&self) -> Self {
        Self::from_plan(Arc::clone(&self.plan))
    }
}

///
/// HydratorDirectory
///
/// Shape-keyed cache of compiled plans. Keys are structural, so two
/// requests share a plan exactly when type, column layout, and formats
/// all match; a layout differing only in column order compiles its own
/// plan. Same once-per-key, no-partial-visibility discipline as the
/// accessor directory.
///

pub struct HydratorDirectory {
    inner: RwLock<HashMap<ShapeKey, Arc<HydrationPlan>>>,
}

impl HydratorDirectory {
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(HashMap::new()),
        }
    }

    /// Shared default directory used by the convenience layer.
    #[must_use]
    pub fn global() -> &'static Self {
        static GLOBAL: OnceLock<HydratorDirectory> = OnceLock::new();

        GLOBAL.get_or_init(Self::new)
    }

    /// Hydrator for `(T, map)`, compiling the plan on first request.
    pub fn hydrator<T: Model>(&self, map: &ColumnMap) -> Result<Hydrator<T>, PlanError> {
        let key = ShapeKey::new(T::PATH, map);

        // fast path: uncontended read of a published plan
        if let Some(plan) = self.inner.read().get(&key) {
            return Ok(Hydrator::from_plan(Arc::clone(plan)));
        }

        let mut cache = self.inner.write();
        if let Some(plan) = cache.get(&key) {
            return Ok(Hydrator::from_plan(Arc::clone(plan)));
        }

        // a failed compile publishes nothing
        let plan = Arc::new(HydrationPlan::compile(T::SHAPE, map, key.fingerprint())?);
        cache.insert(key, Arc::clone(&plan));

        Ok(Hydrator::from_plan(plan))
    }

    /// Drop every cached plan (test isolation).
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

impl Default for HydratorDirectory {
    fn default() -> Self {
        Self::new()
    }
}

///
/// format_cell
///
/// Positional write formatting: `{}` and `{0}` substitute the cell's
/// display rendering, `{{`/`}}` escape literal braces, and anything else
/// inside braces is emitted verbatim. Null renders empty.
///

#[must_use]
pub fn format_cell(format: &str, value: &Value) -> String {
    let mut out = String::with_capacity(format.len() + 8);
    let mut chars = format.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '{' if chars.peek() == Some(&'{') => {
                chars.next();
                out.push('{');
            }
            '}' if chars.peek() == Some(&'}') => {
                chars.next();
                out.push('}');
            }
            '{' => {
                let mut spec = String::new();
                let mut closed = false;
                for inner in chars.by_ref() {
                    if inner == '}' {
                        closed = true;
                        break;
                    }
                    spec.push(inner);
                }

                if closed && (spec.is_empty() || spec == "0") {
                    out.push_str(&value.to_string());
                } else {
                    out.push('{');
                    out.push_str(&spec);
                    if closed {
                        out.push('}');
                    }
                }
            }
            _ => out.push(c),
        }
    }

    out
}
