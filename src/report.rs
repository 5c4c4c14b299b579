use graphgate_federation::{ApolloFederation, FederationError, RESOLVE_REFERENCE_FIELD};
use graphgate_schema::{MetaType, TypeKind, BUILTIN_DIRECTIVES, BUILTIN_SCALARS};
use tracing::instrument;

/// Walks the schema the way a resolver generator does and reports what it would emit.
///
/// Every object type gets a block listing the parent type of each resolver, with
/// `__resolveReference` first on entities and the `@external` fields that are left to
/// other services collected on a `skipped` line.
#[instrument(err(Debug), level = "trace", skip(federation))]
pub fn render(federation: &ApolloFederation<'_>, parent_type_signature: &str) -> Result<String, FederationError> {
    let schema = federation.schema();
    let type_names = federation.filter_type_names(schema.types.keys().map(|name| name.as_str()).collect());
    let types: Vec<&MetaType> = type_names
        .into_iter()
        .filter_map(|name| schema.type_by_name(name))
        .collect();
    let mut blocks = Vec::new();

    let scalars: Vec<&str> = types
        .iter()
        .filter(|ty| ty.kind == TypeKind::Scalar && !BUILTIN_SCALARS.contains(&ty.name.as_str()))
        .map(|ty| ty.name.as_str())
        .filter(|name| !federation.skip_scalar(name))
        .collect();
    if !scalars.is_empty() {
        blocks.push(format!("scalars: {}", scalars.join(", ")));
    }

    let directives: Vec<String> = schema
        .directives
        .keys()
        .map(|name| name.as_str())
        .filter(|name| !BUILTIN_DIRECTIVES.contains(name) && !federation.skip_directive(name))
        .map(|name| format!("@{}", name))
        .collect();
    if !directives.is_empty() {
        blocks.push(format!("directives: {}", directives.join(", ")));
    }

    for ty in types.iter().filter(|ty| ty.is_object() && !ty.is_introspection()) {
        let mut lines = Vec::new();
        if federation.is_federation_object_type(ty) {
            lines.push(format!("type {} (entity)", ty.name));
        } else {
            lines.push(format!("type {}", ty.name));
        }

        if let Some(field) = ty.field_by_name(RESOLVE_REFERENCE_FIELD) {
            if let Some(reference_type) = federation.reference_type(field, ty, parent_type_signature)? {
                lines.push(format!("  {}: {}", field.name, reference_type));
            }
        }

        let mut skipped = Vec::new();
        let field_names = federation.filter_field_names(ty.fields.keys().map(|name| name.as_str()).collect());
        for field_name in field_names {
            let Some(field) = ty.field_by_name(field_name) else {
                continue;
            };
            if federation.skip_field(field, ty) {
                skipped.push(field_name);
                continue;
            }
            let parent_type = federation.transform_parent_type(field, ty, parent_type_signature)?;
            lines.push(format!("  {}: {}", field_name, parent_type));
        }
        if !skipped.is_empty() {
            lines.push(format!("  skipped: {}", skipped.join(", ")));
        }

        blocks.push(lines.join("\n"));
    }

    let mut report = blocks.join("\n\n");
    report.push('\n');
    Ok(report)
}
