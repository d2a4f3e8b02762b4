use crate::{NODE_COUNT_MULTIPLY, NODE_COUNT_SKIP};
use gql_ast::{
    ArgumentId, FieldId, FragmentDefinitionId, OperationDocument, SchemaDocument, SelectionSetId,
    Visitor, WalkContext, WalkError, Walker,
};
use log::debug;

/// An active cardinality multiplier, pushed when an `@nodeCountMultiply`
/// argument is entered and popped when its field is left.
#[derive(Clone, Copy, Debug)]
struct Multiplier {
    field_ref: FieldId,
    factor: i64,
}

/// Result of [`Estimator::estimate`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Estimate {
    pub node_count: i64,
    pub complexity: i64,
}

/// Walks an operation against its schema, folding `nodeCount` and
/// `complexity`. Reusable across calls: [`Estimator::estimate`] resets
/// the accumulators and truncates the multiplier stack to empty each
/// time, retaining its allocated capacity.
pub struct Estimator {
    multipliers: Vec<Multiplier>,
    node_count: i64,
    complexity: i64,
}

impl Default for Estimator {
    fn default() -> Self {
        Self::new()
    }
}

impl Estimator {
    pub fn new() -> Self {
        Self {
            multipliers: Vec::with_capacity(16),
            node_count: 0,
            complexity: 0,
        }
    }

    pub fn estimate(
        &mut self,
        operation: &OperationDocument,
        schema: &SchemaDocument,
    ) -> Result<Estimate, WalkError> {
        self.node_count = 0;
        self.complexity = 0;
        self.multipliers.clear();

        debug!("estimating complexity over {} operation(s)", operation.operations.len());
        Walker::new().walk(operation, schema, self)?;

        debug_assert!(
            self.multipliers.is_empty(),
            "multiplier stack must be empty at the end of a successful walk"
        );

        let estimate = Estimate {
            node_count: self.node_count,
            complexity: self.complexity,
        };
        debug!("{estimate:?}");
        Ok(estimate)
    }

    fn current_multiplier(&self) -> i64 {
        self.multipliers.iter().map(|m| m.factor).product()
    }
}

impl Visitor for Estimator {
    fn enter_argument(&mut self, ctx: &mut WalkContext, id: ArgumentId) {
        if !ctx.immediate_ancestor_is_field() {
            return;
        }
        let Some(field_id) = ctx.parent_field() else {
            return;
        };
        let Some(field_def) = ctx.field_definition(field_id) else {
            return;
        };
        let arg_name = ctx.operation.argument_name(id);
        let Some(input_value_def) = ctx.argument_input_value_definition(field_def, arg_name) else {
            return;
        };
        if !ctx
            .schema
            .input_value_definition_has_directive(input_value_def, NODE_COUNT_MULTIPLY)
        {
            return;
        }
        let Some(factor) = OperationDocument::int_value_as_int(ctx.operation.argument_value(id))
        else {
            return;
        };
        self.multipliers.push(Multiplier {
            field_ref: field_id,
            factor,
        });
    }

    fn enter_field(&mut self, ctx: &mut WalkContext, id: FieldId) {
        let Some(field_def) = ctx.field_definition(id) else {
            return;
        };
        if ctx.schema.field_definition_has_directive(field_def, NODE_COUNT_SKIP) {
            ctx.skip_node();
            return;
        }
        if !ctx.operation.field_has_selections(id) {
            return;
        }
        self.complexity += self.current_multiplier();
    }

    fn leave_field(&mut self, _ctx: &mut WalkContext, id: FieldId) {
        if matches!(self.multipliers.last(), Some(top) if top.field_ref == id) {
            self.multipliers.pop();
        }
    }

    fn enter_selection_set(&mut self, ctx: &mut WalkContext, _id: SelectionSetId) {
        if ctx.immediate_ancestor_is_field() {
            self.node_count += self.current_multiplier();
        }
    }

    fn enter_fragment_definition(&mut self, ctx: &mut WalkContext, _id: FragmentDefinitionId) {
        ctx.skip_node();
    }
}
