use graphgate_schema::{MetaField, MetaType, Schema};
use indexmap::IndexMap;
use parser::{
    types::{BaseType, Type, TypeKind},
    Pos,
    Positioned,
};
use tracing::instrument;
use value::Name;

use crate::{
    classifier::is_federation_object_type,
    ANY_SCALAR,
    ENTITIES_FIELD,
    ENTITY_TYPE,
    FEDERATION_DIRECTIVES,
    FIELD_SET_SCALAR,
    RESOLVE_REFERENCE_FIELD,
    SERVICE_FIELD,
    SERVICE_TYPE,
};

/// Returns a copy of `schema` where every entity starts with a `__resolveReference` field.
///
/// The field is added to the runtime field map and to the AST node, which is synthesized when
/// the type has none. `schema` itself is left untouched.
#[instrument(level = "trace", skip(schema))]
pub fn add_federation_references_to_schema(schema: &Schema) -> Schema {
    let mut rewritten = schema.clone();

    let entities: Vec<Name> = schema
        .types
        .values()
        .filter(|ty| is_federation_object_type(schema, ty))
        .map(|ty| ty.name.clone())
        .collect();
    for name in &entities {
        if let Some(ty) = rewritten.types.get_mut(name) {
            add_resolve_reference_field(ty);
        }
    }

    tracing::debug!(entities = entities.len(), "Reference resolvers added.");
    rewritten
}

/// Returns a copy of `schema` without the federation meta fields, types and directives.
#[instrument(level = "trace", skip(schema))]
pub fn remove_federation(schema: &Schema) -> Schema {
    let mut rewritten = schema.clone();
    let meta_fields = [ENTITIES_FIELD, SERVICE_FIELD];

    if let Some(query_type) = rewritten.types.get_mut(schema.query_type_name()) {
        for field in meta_fields {
            query_type.fields.shift_remove(field);
        }
        if let Some(node) = &mut query_type.node {
            if let TypeKind::Object(object) = &mut node.node.kind {
                object
                    .fields
                    .retain(|field| !meta_fields.contains(&field.node.name.node.as_str()));
            }
        }
    }

    for name in [SERVICE_TYPE, ENTITY_TYPE, ANY_SCALAR, FIELD_SET_SCALAR] {
        rewritten.types.shift_remove(name);
    }
    for name in FEDERATION_DIRECTIVES {
        rewritten.directives.shift_remove(name);
    }

    rewritten
}

fn add_resolve_reference_field(ty: &mut MetaType) {
    if ty.node.is_none() {
        ty.node = Some(Positioned::new(ty.to_definition(), Pos::default()));
    }

    let name = Name::new(RESOLVE_REFERENCE_FIELD);
    let field = MetaField::new(name.clone(), Type {
        base: BaseType::Named(ty.name.clone()),
        nullable: true,
    });

    if let Some(node) = &mut ty.node {
        if let TypeKind::Object(object) = &mut node.node.kind {
            object.fields.retain(|existing| existing.node.name.node != name);
            object
                .fields
                .insert(0, Positioned::new(field.to_definition(), Pos::default()));
        }
    }

    let mut fields = IndexMap::with_capacity(ty.fields.len() + 1);
    fields.insert(name.clone(), field);
    fields.extend(
        std::mem::take(&mut ty.fields)
            .into_iter()
            .filter(|(field_name, _)| *field_name != name),
    );
    ty.fields = fields;
}
