use crate::{
    error::{HydrateError, PlanError},
    hydrate::{format_cell, map::ColumnMap},
    model::{FieldModel, ModelShape},
    traits::FieldAccess,
    value::{Value, ValueTag},
};

///
/// ScalarOp
/// One resolved column write: cell → field of the owning node.
///

struct ScalarOp {
    column: usize,
    field_index: usize,
    field: &'static FieldModel,
    /// Effective write format: the column's override, else the field's
    /// declared default.
    format: Option<String>,
}

///
/// ChildNode
/// One nested slot reached by the shape, with its own sub-plan.
///

struct ChildNode {
    slot: usize,
    field: &'static FieldModel,
    node: PlanNode,
}

struct PlanNode {
    shape: &'static ModelShape,
    ops: Vec<ScalarOp>,
    children: Vec<ChildNode>,
}

impl PlanNode {
    const fn new(shape: &'static ModelShape) -> Self {
        Self {
            shape,
            ops: Vec::new(),
            children: Vec::new(),
        }
    }
}

///
/// HydrationPlan
///
/// One shape's compiled population routine: per-column writes plus the
/// nesting tree, resolved once and reused for every row batch. Stateless
/// after compilation; a plan owns none of the instances it populates.
///

pub struct HydrationPlan {
    root: PlanNode,
    max_column: Option<usize>,
    fingerprint: u64,
}

impl HydrationPlan {
    /// Resolve a column map against a shape tree. Deterministic: the same
    /// shape always compiles to a structurally interchangeable plan.
    pub(crate) fn compile(
        shape: &'static ModelShape,
        map: &ColumnMap,
        fingerprint: u64,
    ) -> Result<Self, PlanError> {
        let mut root = PlanNode::new(shape);
        let mut max_column = None;

        for (column, spec) in map.columns().iter().enumerate() {
            let Some(target) = &spec.target else {
                continue;
            };
            if target.is_empty() {
                return Err(PlanError::EmptyTarget { column });
            }

            let segments: Vec<&str> = target.split('.').collect();
            let mut node = &mut root;

            // walk intermediate segments through nested slots
            for segment in &segments[..segments.len() - 1] {
                let index = node.shape.field_index(segment).ok_or_else(|| {
                    PlanError::UnknownProperty {
                        column,
                        type_path: node.shape.path,
                        segment: (*segment).to_string(),
                    }
                })?;
                let field: &'static FieldModel = &node.shape.fields[index];
                let child_shape =
                    field
                        .nested_shape()
                        .ok_or_else(|| PlanError::NotNested {
                            column,
                            type_path: node.shape.path,
                            segment: (*segment).to_string(),
                        })?;

                let position = match node.children.iter().position(|c| c.slot == index) {
                    Some(position) => position,
                    None => {
                        node.children.push(ChildNode {
                            slot: index,
                            field,
                            node: PlanNode::new(child_shape),
                        });
                        node.children.len() - 1
                    }
                };
                node = &mut node.children[position].node;
            }

            let leaf = segments[segments.len() - 1];
            if leaf.is_empty() {
                return Err(PlanError::EmptyTarget { column });
            }

            let field_index =
                node.shape
                    .field_index(leaf)
                    .ok_or_else(|| PlanError::UnknownProperty {
                        column,
                        type_path: node.shape.path,
                        segment: leaf.to_string(),
                    })?;
            let field: &'static FieldModel = &node.shape.fields[field_index];
            if field.is_nested() {
                return Err(PlanError::NotAssignable {
                    column,
                    type_path: node.shape.path,
                    segment: leaf.to_string(),
                });
            }

            let format = spec
                .format
                .clone()
                .or_else(|| field.format.map(ToString::to_string));

            node.ops.push(ScalarOp {
                column,
                field_index,
                field,
                format,
            });
            max_column = Some(max_column.map_or(column, |m: usize| m.max(column)));
        }

        Ok(Self {
            root,
            max_column,
            fingerprint,
        })
    }

    /// Highest mapped column index; rows must be wider than this.
    pub(crate) const fn max_column(&self) -> Option<usize> {
        self.max_column
    }

    /// Diagnostic digest of the shape this plan was compiled for.
    #[must_use]
    pub const fn fingerprint(&self) -> u64 {
        self.fingerprint
    }

    /// Populate one instance from one row. Row width was validated by the
    /// caller against `max_column`.
    pub(crate) fn populate_instance(
        &self,
        root: &mut dyn FieldAccess,
        row: &[Value],
    ) -> Result<(), HydrateError> {
        Self::populate_node(&self.root, root, row)
    }

    fn populate_node(
        node: &PlanNode,
        target: &mut dyn FieldAccess,
        row: &[Value],
    ) -> Result<(), HydrateError> {
        for op in &node.ops {
            let cell = &row[op.column];

            let (written_tag, outcome) = match &op.format {
                // format path: render and assign the text directly, no
                // further null handling
                Some(format) => (
                    ValueTag::Text,
                    target.set_field(op.field_index, Value::Text(format_cell(format, cell))),
                ),
                None => (cell.tag(), target.set_field(op.field_index, cell.clone())),
            };

            outcome.map_err(|_| HydrateError::ColumnMismatch {
                column: op.column,
                value: written_tag,
                model: node.shape.path,
                property: op.field.name,
            })?;
        }

        // children assemble bottom-up; the parent link is written only
        // after the child (and transitively its own children) is complete
        for child in &node.children {
            if child.field.preconstructed {
                let Some(instance) = target.nested_mut(child.slot) else {
                    return Err(HydrateError::ChildUnavailable {
                        model: node.shape.path,
                        property: child.field.name,
                    });
                };
                Self::populate_node(&child.node, instance, row)?;
            } else {
                let mut built = (child.node.shape.new_boxed)();
                Self::populate_node(&child.node, built.as_mut(), row)?;
                let built: Box<dyn std::any::Any> = built;
                target
                    .set_nested(child.slot, built)
                    .map_err(|_| HydrateError::ChildUnavailable {
                        model: node.shape.path,
                        property: child.field.name,
                    })?;
            }
        }

        Ok(())
    }
}
