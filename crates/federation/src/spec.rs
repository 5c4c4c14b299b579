use graphgate_schema::{parse_document, Schema};
use parser::types::{ServiceDocument, TypeSystemDefinition};

pub const KEY_DIRECTIVE: &str = "key";
pub const EXTERNAL_DIRECTIVE: &str = "external";
pub const REQUIRES_DIRECTIVE: &str = "requires";
pub const PROVIDES_DIRECTIVE: &str = "provides";

/// Directives that only carry federation metadata and are never emitted as custom directives.
pub const FEDERATION_DIRECTIVES: [&str; 4] = [
    EXTERNAL_DIRECTIVE,
    REQUIRES_DIRECTIVE,
    PROVIDES_DIRECTIVE,
    KEY_DIRECTIVE,
];

/// The scalar used as the type of the `fields` argument.
pub const FIELD_SET_SCALAR: &str = "_FieldSet";

/// The synthetic field carrying the reference resolver of an entity.
pub const RESOLVE_REFERENCE_FIELD: &str = "__resolveReference";

pub const ENTITIES_FIELD: &str = "_entities";
pub const SERVICE_FIELD: &str = "_service";
pub const SERVICE_TYPE: &str = "_Service";
pub const ENTITY_TYPE: &str = "_Entity";
pub const ANY_SCALAR: &str = "_Any";

/// The federation definitions: the `_FieldSet` scalar and the four federation directives.
pub fn federation_spec() -> ServiceDocument {
    match parse_document(include_str!("federation.graphql")) {
        Ok(document) => document,
        Err(err) => {
            tracing::error!(error = %err, "Failed to parse the federation spec.");
            ServiceDocument {
                definitions: Vec::new(),
            }
        },
    }
}

/// Returns a copy of `schema` with the federation definitions it does not declare itself.
pub fn extend_with_federation_spec(schema: &Schema) -> Schema {
    let definitions: Vec<TypeSystemDefinition> = federation_spec()
        .definitions
        .into_iter()
        .filter(|definition| match definition {
            TypeSystemDefinition::Type(ty) => !schema.types.contains_key(&ty.node.name.node),
            TypeSystemDefinition::Directive(directive) => !schema.directives.contains_key(&directive.node.name.node),
            TypeSystemDefinition::Schema(_) => false,
        })
        .collect();

    tracing::trace!(count = definitions.len(), "Adding federation definitions.");
    let mut extended = schema.clone();
    extended.merge(ServiceDocument { definitions });
    extended
}
