//! A depth-first walker over an [`OperationDocument`], dispatching to a
//! [`Visitor`]'s enter/leave hooks and resolving each field against a
//! [`SchemaDocument`] as it descends.
//!
//! Fragment spreads are inlined at their spread site: the walker never
//! emits `enter_fragment_definition` for a definition reached through a
//! spread, only for fragment definitions it encounters directly among
//! the document's own top-level definitions (where a well-behaved
//! visitor is expected to call [`WalkContext::skip_node`] immediately,
//! since a lone definition contributes nothing on its own).

use crate::document::{
    FieldId, FragmentDefinitionId, InlineFragmentId, OperationDefinitionId, OperationDocument,
    Selection, SelectionSetId,
};
use crate::schema::{FieldDefinitionId, InputValueDefinitionId, SchemaDocument};
use log::trace;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WalkError {
    #[error("fragment spread references unknown fragment `{0}`")]
    UnknownFragment(String),
}

/// One frame of the ancestor stack: the kind of enclosing node and its
/// reference, innermost last.
#[derive(Clone, Copy, Debug)]
pub enum Ancestor {
    Document,
    Operation(OperationDefinitionId),
    SelectionSet(SelectionSetId),
    Field(FieldId),
    InlineFragment(InlineFragmentId),
}

/// Per-walk mutable state handed to every visitor callback: the
/// ancestor stack, the resolved "current type" stack used for
/// field/argument resolution, and the one-shot skip flag.
pub struct WalkContext<'a> {
    pub operation: &'a OperationDocument,
    pub schema: &'a SchemaDocument,
    ancestors: Vec<Ancestor>,
    type_stack: Vec<String>,
    skip: bool,
}

impl<'a> WalkContext<'a> {
    fn new(operation: &'a OperationDocument, schema: &'a SchemaDocument) -> Self {
        Self {
            operation,
            schema,
            ancestors: Vec::with_capacity(16),
            type_stack: vec![schema.query_type_name.clone()],
            skip: false,
        }
    }

    pub fn ancestors(&self) -> &[Ancestor] {
        &self.ancestors
    }

    /// The nearest enclosing `Field`, if any.
    pub fn parent_field(&self) -> Option<FieldId> {
        self.ancestors.iter().rev().find_map(|a| match a {
            Ancestor::Field(id) => Some(*id),
            _ => None,
        })
    }

    /// True if the immediate (last) ancestor is a `Field`.
    pub fn immediate_ancestor_is_field(&self) -> bool {
        matches!(self.ancestors.last(), Some(Ancestor::Field(_)))
    }

    pub fn current_type_name(&self) -> &str {
        self.type_stack.last().expect("type stack is never empty")
    }

    /// Resolve `field`'s schema-side definition against the current
    /// enclosing type.
    pub fn field_definition(&self, field: FieldId) -> Option<FieldDefinitionId> {
        let name = self.operation.field_name(field);
        self.schema.field_definition(self.current_type_name(), name)
    }

    /// Resolve an argument's input-value definition given the field it
    /// belongs to.
    pub fn argument_input_value_definition(
        &self,
        field_def: FieldDefinitionId,
        argument_name: &str,
    ) -> Option<InputValueDefinitionId> {
        self.schema.input_value_definition(field_def, argument_name)
    }

    /// Request that the current node's children not be walked.
    pub fn skip_node(&mut self) {
        self.skip = true;
    }

    fn take_skip(&mut self) -> bool {
        std::mem::replace(&mut self.skip, false)
    }
}

/// Visitor hooks the analyzer (or any other consumer) registers. Every
/// method has a no-op default so a visitor only implements what it
/// needs.
pub trait Visitor {
    fn enter_document(&mut self, _ctx: &mut WalkContext) {}
    fn enter_operation_definition(&mut self, _ctx: &mut WalkContext, _id: OperationDefinitionId) {}
    fn enter_selection_set(&mut self, _ctx: &mut WalkContext, _id: SelectionSetId) {}
    fn leave_selection_set(&mut self, _ctx: &mut WalkContext, _id: SelectionSetId) {}
    fn enter_field(&mut self, _ctx: &mut WalkContext, _id: FieldId) {}
    fn leave_field(&mut self, _ctx: &mut WalkContext, _id: FieldId) {}
    fn enter_argument(&mut self, _ctx: &mut WalkContext, _id: crate::document::ArgumentId) {}
    fn enter_fragment_definition(&mut self, _ctx: &mut WalkContext, _id: FragmentDefinitionId) {}
    fn enter_inline_fragment(&mut self, _ctx: &mut WalkContext, _id: InlineFragmentId) {}
}

/// Drives a depth-first traversal of an [`OperationDocument`].
#[derive(Default)]
pub struct Walker;

impl Walker {
    pub fn new() -> Self {
        Self
    }

    pub fn walk(
        &mut self,
        operation: &OperationDocument,
        schema: &SchemaDocument,
        visitor: &mut dyn Visitor,
    ) -> Result<(), WalkError> {
        let mut ctx = WalkContext::new(operation, schema);
        ctx.ancestors.push(Ancestor::Document);
        visitor.enter_document(&mut ctx);

        for (id, def) in operation.operations.iter_enumerated() {
            ctx.ancestors.push(Ancestor::Operation(id));
            visitor.enter_operation_definition(&mut ctx, id);
            if !ctx.take_skip() {
                walk_selection_set(operation, visitor, &mut ctx, def.selection_set)?;
            }
            ctx.ancestors.pop();
        }

        for (id, _) in operation.fragments.iter_enumerated() {
            visitor.enter_fragment_definition(&mut ctx, id);
            ctx.take_skip(); // a direct top-level fragment definition is never descended into
        }

        Ok(())
    }
}

fn walk_selection_set(
    operation: &OperationDocument,
    visitor: &mut dyn Visitor,
    ctx: &mut WalkContext,
    set_id: SelectionSetId,
) -> Result<(), WalkError> {
    // `enter_selection_set` must see the *enclosing* ancestor (a Field, for
    // a field's sub-selection) on top of the stack, so the set's own frame
    // is only pushed once the callback has fired.
    visitor.enter_selection_set(ctx, set_id);
    let skipped = ctx.take_skip();
    ctx.ancestors.push(Ancestor::SelectionSet(set_id));
    if !skipped {
        for selection in operation.selections(set_id).to_vec() {
            match selection {
                Selection::Field(field_id) => walk_field(operation, visitor, ctx, field_id)?,
                Selection::InlineFragment(inline_id) => {
                    walk_inline_fragment(operation, visitor, ctx, inline_id)?
                }
                spread @ Selection::FragmentSpread { .. } => {
                    walk_fragment_spread(operation, visitor, ctx, spread)?
                }
            }
        }
    }
    visitor.leave_selection_set(ctx, set_id);
    ctx.ancestors.pop();
    Ok(())
}

fn walk_field(
    operation: &OperationDocument,
    visitor: &mut dyn Visitor,
    ctx: &mut WalkContext,
    field_id: FieldId,
) -> Result<(), WalkError> {
    ctx.ancestors.push(Ancestor::Field(field_id));
    visitor.enter_field(ctx, field_id);
    let skipped = ctx.take_skip();

    if !skipped {
        for argument_id in operation.field_arguments(field_id).to_vec() {
            visitor.enter_argument(ctx, argument_id);
        }

        if let Some(set_id) = operation.field_selection_set(field_id) {
            let type_name = ctx
                .field_definition(field_id)
                .map(|def| ctx.schema.field_definition_type_name(def).to_string())
                .unwrap_or_else(|| ctx.current_type_name().to_string());
            ctx.type_stack.push(type_name);
            walk_selection_set(operation, visitor, ctx, set_id)?;
            ctx.type_stack.pop();
        }
    }

    visitor.leave_field(ctx, field_id);
    ctx.ancestors.pop();
    Ok(())
}

fn walk_inline_fragment(
    operation: &OperationDocument,
    visitor: &mut dyn Visitor,
    ctx: &mut WalkContext,
    inline_id: InlineFragmentId,
) -> Result<(), WalkError> {
    let fragment = &operation.inline_fragments[inline_id];
    ctx.ancestors.push(Ancestor::InlineFragment(inline_id));
    visitor.enter_inline_fragment(ctx, inline_id);
    if !ctx.take_skip() {
        let pushed_type = fragment.type_condition.clone();
        if let Some(type_name) = pushed_type {
            ctx.type_stack.push(type_name);
            walk_selection_set(operation, visitor, ctx, fragment.selection_set)?;
            ctx.type_stack.pop();
        } else {
            walk_selection_set(operation, visitor, ctx, fragment.selection_set)?;
        }
    }
    ctx.ancestors.pop();
    Ok(())
}

fn walk_fragment_spread(
    operation: &OperationDocument,
    visitor: &mut dyn Visitor,
    ctx: &mut WalkContext,
    spread: Selection,
) -> Result<(), WalkError> {
    let name = operation
        .fragment_spread_name(spread)
        .expect("caller only passes FragmentSpread selections")
        .to_string();
    let fragment_id = operation.fragment_by_name(&name).ok_or_else(|| {
        trace!("fragment spread references unknown fragment `{name}`");
        WalkError::UnknownFragment(name.clone())
    })?;
    let fragment = &operation.fragments[fragment_id];
    ctx.type_stack.push(fragment.type_condition.clone());
    walk_selection_set(operation, visitor, ctx, fragment.selection_set)?;
    ctx.type_stack.pop();
    Ok(())
}
