//! The schema document: type and field definitions the analyzer
//! consults to resolve an operation field to its declared return type
//! and to ask whether a definition carries a given directive.

use gql_util::define_idx;
use gql_util::index_vec::IndexVec;
use std::collections::HashMap;

define_idx!(pub struct ObjectTypeId(u32));
define_idx!(pub struct FieldDefinitionId(u32));
define_idx!(pub struct InputValueDefinitionId(u32));

/// A bare directive usage. This core only asks "is a directive named X
/// present", so directive arguments are not modeled.
#[derive(Clone, Debug)]
pub struct SchemaDirective {
    pub name: String,
}

#[derive(Clone, Debug)]
pub struct InputValueDefinition {
    pub name: String,
    pub directives: Vec<SchemaDirective>,
}

#[derive(Clone, Debug)]
pub struct FieldDefinition {
    pub name: String,
    /// The named type the field resolves to, with list/non-null
    /// wrappers already stripped — this core never inspects nullability.
    pub type_name: String,
    pub arguments: Vec<InputValueDefinitionId>,
    pub directives: Vec<SchemaDirective>,
}

#[derive(Clone, Debug, Default)]
pub struct ObjectTypeDefinition {
    pub name: String,
    pub fields: Vec<FieldDefinitionId>,
}

#[derive(Clone, Debug, Default)]
pub struct SchemaDocument {
    pub query_type_name: String,
    pub object_types: IndexVec<ObjectTypeId, ObjectTypeDefinition>,
    object_type_by_name: HashMap<String, ObjectTypeId>,
    pub field_definitions: IndexVec<FieldDefinitionId, FieldDefinition>,
    pub input_value_definitions: IndexVec<InputValueDefinitionId, InputValueDefinition>,
}

impl SchemaDocument {
    pub fn new(query_type_name: impl Into<String>) -> Self {
        Self {
            query_type_name: query_type_name.into(),
            ..Self::default()
        }
    }

    pub fn push_object_type(&mut self, name: impl Into<String>) -> ObjectTypeId {
        let name = name.into();
        let id = self.object_types.push(ObjectTypeDefinition {
            name: name.clone(),
            fields: Vec::new(),
        });
        self.object_type_by_name.insert(name, id);
        id
    }

    pub fn push_field_definition(&mut self, owner: ObjectTypeId, field: FieldDefinition) -> FieldDefinitionId {
        let id = self.field_definitions.push(field);
        self.object_types[owner].fields.push(id);
        id
    }

    pub fn push_input_value_definition(
        &mut self,
        owner: FieldDefinitionId,
        input_value: InputValueDefinition,
    ) -> InputValueDefinitionId {
        let id = self.input_value_definitions.push(input_value);
        self.field_definitions[owner].arguments.push(id);
        id
    }

    pub fn object_type_by_name(&self, name: &str) -> Option<ObjectTypeId> {
        self.object_type_by_name.get(name).copied()
    }

    /// Resolve `field_name` on the object type named `type_name`.
    pub fn field_definition(&self, type_name: &str, field_name: &str) -> Option<FieldDefinitionId> {
        let owner = self.object_type_by_name(type_name)?;
        self.object_types[owner]
            .fields
            .iter()
            .copied()
            .find(|&id| self.field_definitions[id].name == field_name)
    }

    pub fn field_definition_type_name(&self, id: FieldDefinitionId) -> &str {
        &self.field_definitions[id].type_name
    }

    pub fn field_definition_has_directive(&self, id: FieldDefinitionId, name: &str) -> bool {
        self.field_definitions[id]
            .directives
            .iter()
            .any(|d| d.name == name)
    }

    pub fn input_value_definition(
        &self,
        field: FieldDefinitionId,
        arg_name: &str,
    ) -> Option<InputValueDefinitionId> {
        self.field_definitions[field]
            .arguments
            .iter()
            .copied()
            .find(|&id| self.input_value_definitions[id].name == arg_name)
    }

    pub fn input_value_definition_has_directive(&self, id: InputValueDefinitionId, name: &str) -> bool {
        self.input_value_definitions[id]
            .directives
            .iter()
            .any(|d| d.name == name)
    }
}
