//! The operation document: an arena-style AST for a parsed GraphQL
//! operation, addressed by typed node references rather than owned
//! trees of `Box`.
//!
//! There is no parser in this core (an upstream parser is an external
//! collaborator); the `push_*` methods below are the construction API a
//! parser — or a test — uses to build a document.

use gql_util::define_idx;
use gql_util::index_vec::IndexVec;
use std::collections::HashMap;

define_idx!(pub struct FieldId(u32));
define_idx!(pub struct ArgumentId(u32));
define_idx!(pub struct SelectionSetId(u32));
define_idx!(pub struct FragmentDefinitionId(u32));
define_idx!(pub struct InlineFragmentId(u32));
define_idx!(pub struct OperationDefinitionId(u32));

/// A GraphQL value, recursively owned. Values are small and leaf-heavy
/// enough that an arena buys nothing here; unlike `Field`/`Argument`
/// they are never referenced by ID from elsewhere in the document.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Variable(String),
    IntValue(i64),
    FloatValue(f64),
    StringValue(String),
    BooleanValue(bool),
    NullValue,
    EnumValue(String),
    ListValue(Vec<Value>),
    ObjectValue(Vec<(String, Value)>),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OperationType {
    Query,
    Mutation,
    Subscription,
}

#[derive(Clone, Debug)]
pub struct OperationDefinition {
    pub operation_type: OperationType,
    pub name: Option<String>,
    pub selection_set: SelectionSetId,
}

#[derive(Clone, Debug)]
pub struct Field {
    pub name: String,
    pub alias: Option<String>,
    pub arguments: Vec<ArgumentId>,
    pub selection_set: Option<SelectionSetId>,
}

#[derive(Clone, Debug)]
pub struct Argument {
    pub name: String,
    pub value: Value,
}

#[derive(Clone, Copy, Debug)]
pub enum Selection {
    Field(FieldId),
    FragmentSpread { fragment_name_index: usize },
    InlineFragment(InlineFragmentId),
}

#[derive(Clone, Debug, Default)]
pub struct SelectionSet {
    pub selections: Vec<Selection>,
}

#[derive(Clone, Debug)]
pub struct FragmentDefinition {
    pub name: String,
    pub type_condition: String,
    pub selection_set: SelectionSetId,
}

#[derive(Clone, Debug)]
pub struct InlineFragment {
    pub type_condition: Option<String>,
    pub selection_set: SelectionSetId,
}

/// An arena-addressed operation document: one or more executable
/// operations plus the fragment definitions they may spread.
#[derive(Clone, Debug, Default)]
pub struct OperationDocument {
    pub operations: IndexVec<OperationDefinitionId, OperationDefinition>,
    pub fragments: IndexVec<FragmentDefinitionId, FragmentDefinition>,
    fragment_names: Vec<String>,
    fragment_by_name: HashMap<String, FragmentDefinitionId>,
    pub fields: IndexVec<FieldId, Field>,
    pub arguments: IndexVec<ArgumentId, Argument>,
    pub selection_sets: IndexVec<SelectionSetId, SelectionSet>,
    pub inline_fragments: IndexVec<InlineFragmentId, InlineFragment>,
}

impl OperationDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_selection_set(&mut self) -> SelectionSetId {
        self.selection_sets.push(SelectionSet::default())
    }

    pub fn add_selection(&mut self, set: SelectionSetId, selection: Selection) {
        self.selection_sets[set].selections.push(selection);
    }

    pub fn push_field(&mut self, field: Field) -> FieldId {
        self.fields.push(field)
    }

    pub fn push_argument(&mut self, argument: Argument) -> ArgumentId {
        self.arguments.push(argument)
    }

    pub fn push_inline_fragment(&mut self, fragment: InlineFragment) -> InlineFragmentId {
        self.inline_fragments.push(fragment)
    }

    pub fn push_operation(&mut self, operation: OperationDefinition) -> OperationDefinitionId {
        self.operations.push(operation)
    }

    pub fn push_fragment_definition(&mut self, fragment: FragmentDefinition) -> FragmentDefinitionId {
        let name = fragment.name.clone();
        let id = self.fragments.push(fragment);
        self.fragment_by_name.insert(name, id);
        id
    }

    /// A `FragmentSpread` selection referencing `fragment_name` by name.
    pub fn fragment_spread(&mut self, fragment_name: impl Into<String>) -> Selection {
        let index = self.fragment_names.len();
        self.fragment_names.push(fragment_name.into());
        Selection::FragmentSpread {
            fragment_name_index: index,
        }
    }

    pub fn fragment_spread_name(&self, selection: Selection) -> Option<&str> {
        match selection {
            Selection::FragmentSpread { fragment_name_index } => {
                self.fragment_names.get(fragment_name_index).map(String::as_str)
            }
            _ => None,
        }
    }

    pub fn fragment_by_name(&self, name: &str) -> Option<FragmentDefinitionId> {
        self.fragment_by_name.get(name).copied()
    }

    pub fn field_name(&self, id: FieldId) -> &str {
        &self.fields[id].name
    }

    pub fn field_has_selections(&self, id: FieldId) -> bool {
        self.fields[id]
            .selection_set
            .map(|set| !self.selection_sets[set].selections.is_empty())
            .unwrap_or(false)
    }

    pub fn field_selection_set(&self, id: FieldId) -> Option<SelectionSetId> {
        self.fields[id].selection_set
    }

    pub fn field_arguments(&self, id: FieldId) -> &[ArgumentId] {
        &self.fields[id].arguments
    }

    pub fn argument_name(&self, id: ArgumentId) -> &str {
        &self.arguments[id].name
    }

    pub fn argument_value(&self, id: ArgumentId) -> &Value {
        &self.arguments[id].value
    }

    pub fn int_value_as_int(value: &Value) -> Option<i64> {
        match value {
            Value::IntValue(n) => Some(*n),
            _ => None,
        }
    }

    pub fn selections(&self, id: SelectionSetId) -> &[Selection] {
        &self.selection_sets[id].selections
    }
}
