//! Arena-style ASTs for a parsed GraphQL operation and the schema it
//! runs against, plus a reusable depth-first [`Walker`] over the
//! operation tree.
//!
//! Both documents are addressed by typed node references ([`gql_util::IndexVec`]
//! indices) rather than owned trees, matching the arena shape a real
//! parser would build incrementally. There is no parser here — an
//! upstream parser is expected to populate a document via its `push_*`
//! methods; this crate only defines the shape and the traversal.

pub mod document;
pub mod schema;
pub mod walker;

pub use document::{
    Argument, ArgumentId, Field, FieldId, FragmentDefinition, FragmentDefinitionId,
    InlineFragment, InlineFragmentId, OperationDefinition, OperationDefinitionId, OperationDocument,
    OperationType, Selection, SelectionSet, SelectionSetId, Value,
};
pub use schema::{
    FieldDefinition, FieldDefinitionId, InputValueDefinition, InputValueDefinitionId,
    ObjectTypeDefinition, ObjectTypeId, SchemaDirective, SchemaDocument,
};
pub use walker::{Ancestor, Visitor, WalkContext, WalkError, Walker};
