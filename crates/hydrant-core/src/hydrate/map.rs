use std::fmt;
use xxhash_rust::xxh3::xxh3_64;

///
/// ColumnSpec
///
/// One column of a population request: an optional property target
/// (plain name or dotted path into nested models) and an optional write
/// format. Unmapped columns are skipped during population.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ColumnSpec {
    pub target: Option<String>,
    pub format: Option<String>,
}

///
/// ColumnMap
///
/// Ordered column→property layout of one population request. Together
/// with the target type this is the "shape" a hydrator is compiled for.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ColumnMap {
    columns: Vec<ColumnSpec>,
}

impl ColumnMap {
    /// Build a map from per-column targets; `None` marks an unmapped column.
    pub fn new<I, S>(targets: I) -> Self
    where
        I: IntoIterator<Item = Option<S>>,
        S: Into<String>,
    {
        Self {
            columns: targets
                .into_iter()
                .map(|target| ColumnSpec {
                    target: target.map(Into::into),
                    format: None,
                })
                .collect(),
        }
    }

    /// Build a map where every column is mapped.
    pub fn from_names<I, S>(targets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(targets.into_iter().map(Some))
    }

    /// Attach a write format to one column; out-of-range indexes are ignored.
    #[must_use]
    pub fn with_format(mut self, column: usize, format: impl Into<String>) -> Self {
        if let Some(spec) = self.columns.get_mut(column) {
            spec.format = Some(format.into());
        }

        self
    }

    #[must_use]
    pub fn columns(&self) -> &[ColumnSpec] {
        &self.columns
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

///
/// ShapeKey
///
/// Structural cache key for one (type, column layout) shape. Equality and
/// hashing are structural, so distinct shapes can never collide; the xxh3
/// fingerprint exists for diagnostics and display only.
///

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct ShapeKey {
    type_path: &'static str,
    columns: Vec<(Option<String>, Option<String>)>,
}

impl ShapeKey {
    #[must_use]
    pub fn new(type_path: &'static str, map: &ColumnMap) -> Self {
        Self {
            type_path,
            columns: map
                .columns()
                .iter()
                .map(|spec| (spec.target.clone(), spec.format.clone()))
                .collect(),
        }
    }

    #[must_use]
    pub const fn type_path(&self) -> &'static str {
        self.type_path
    }

    /// Stable 64-bit digest of the canonical shape rendering.
    #[must_use]
    pub fn fingerprint(&self) -> u64 {
        // Null-markers keep unmapped columns distinguishable from empty
        // targets, and separators keep adjacent fields unambiguous.
        let mut buf = Vec::with_capacity(self.type_path.len() + self.columns.len() * 8);
        buf.extend_from_slice(self.type_path.as_bytes());
        buf.push(0x00);

        for (target, format) in &self.columns {
            for part in [target, format] {
                match part {
                    Some(text) => {
                        buf.push(0x01);
                        buf.extend_from_slice(text.as_bytes());
                    }
                    None => buf.push(0x00),
                }
                buf.push(0x1f);
            }
            buf.push(0x1e);
        }

        xxh3_64(&buf)
    }
}

impl fmt::Display for ShapeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{:016x}", self.type_path, self.fingerprint())
    }
}
