//! Query-complexity analysis: walk a parsed operation against its
//! schema and fold two bounded-cost estimates.
//!
//! `nodeCount` upper-bounds the number of result nodes a query can
//! return; `complexity` upper-bounds the number of backend node-lookup
//! operations needed to satisfy it. Schema authors opt fields into the
//! accounting with two directives: `@nodeCountMultiply` marks an
//! integer argument (e.g. `first: 50`) as a cardinality multiplier for
//! everything beneath its field, and `@nodeCountSkip` prunes a subtree
//! out of the count entirely (introspection, metadata fields).

mod estimator;

pub use estimator::{Estimate, Estimator};

/// Directive that marks an integer argument as a subtree multiplier.
pub const NODE_COUNT_MULTIPLY: &str = "nodeCountMultiply";

/// Directive that removes a field's subtree from the count entirely.
pub const NODE_COUNT_SKIP: &str = "nodeCountSkip";
