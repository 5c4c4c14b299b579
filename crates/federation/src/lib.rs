//! Apollo Federation analysis for code generators.
//!
//! Decides which types, fields, scalars and directives a generator emits for a federated
//! schema, and builds the parent type of every entity's reference resolver from its `@key`
//! and `@requires` field sets.

#![forbid(unsafe_code)]

mod classifier;
mod directives;
mod error;
mod field_set;
mod provides;
mod reference;
mod rewriter;
mod spec;

pub use classifier::{is_federation_object_type, ApolloFederation};
pub use directives::{directives_by_name, DirectiveHost};
pub use error::{FederationError, FieldSetError};
pub use field_set::{extract_field_set, ExtractFieldSetResult, FieldSet};
pub use provides::ProvidesMap;
pub use reference::{FieldSetFragment, FieldSetItem, ReferenceType};
pub use rewriter::{add_federation_references_to_schema, remove_federation};
pub use spec::*;
