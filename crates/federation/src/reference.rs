use std::fmt::{self, Display};

use graphgate_schema::{MetaField, MetaType, Schema, TypeExt};
use parser::types::ConstDirective;
use value::Name;

use crate::{
    directives::directives_by_name,
    extract_field_set,
    FederationError,
    KEY_DIRECTIVE,
    REQUIRES_DIRECTIVE,
};

/// A leaf of a field set, `required` tells whether its type is non-null.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSetItem {
    pub name: Name,
    pub required: bool,
}

/// The fields one directive picks from `parent_type_ref`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSetFragment {
    pub parent_type_ref: String,
    pub fields: Vec<FieldSetItem>,
}

impl Display for FieldSetFragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Pick<{}, ", self.parent_type_ref)?;
        for (idx, field) in self.fields.iter().enumerate() {
            if idx > 0 {
                f.write_str(" | ")?;
            }
            write!(f, "'{}'", field.name)?;
        }
        f.write_str(">")
    }
}

/// What the reference resolver of an entity receives.
///
/// Any one of the `keys` identifies the entity, every `requires` fragment is always present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceType {
    pub type_name: Name,
    pub keys: Vec<FieldSetFragment>,
    pub requires: Vec<FieldSetFragment>,
}

impl ReferenceType {
    pub fn build(
        schema: &Schema,
        parent_type: &MetaType,
        field: &MetaField,
        parent_type_signature: &str,
    ) -> Result<ReferenceType, FederationError> {
        let mut requires: Vec<FieldSetFragment> = Vec::new();
        for directive in directives_by_name(REQUIRES_DIRECTIVE, field) {
            let fragment = resolve_fragment(schema, parent_type, &directive.node, parent_type_signature)?;
            match requires
                .iter_mut()
                .find(|existing| existing.parent_type_ref == fragment.parent_type_ref)
            {
                Some(existing) => {
                    for item in fragment.fields {
                        if !existing.fields.iter().any(|field| field.name == item.name) {
                            existing.fields.push(item);
                        }
                    }
                },
                None if !fragment.fields.is_empty() => requires.push(fragment),
                None => {},
            }
        }

        let mut keys = Vec::new();
        for directive in directives_by_name(KEY_DIRECTIVE, parent_type) {
            let fragment = resolve_fragment(schema, parent_type, &directive.node, parent_type_signature)?;
            if !fragment.fields.is_empty() {
                keys.push(fragment);
            }
        }

        tracing::trace!(
            type_name = %parent_type.name,
            keys = keys.len(),
            requires = requires.len(),
            "Reference type resolved."
        );
        Ok(ReferenceType {
            type_name: parent_type.name.clone(),
            keys,
            requires,
        })
    }

    /// Renders the parent type of the reference resolver, e.g.
    /// `{ __typename: 'User' } & (Pick<ParentType, 'id'> | Pick<ParentType, 'email'>)`.
    pub fn signature(&self) -> String {
        let mut outputs = vec![format!("{{ __typename: '{}' }}", self.type_name)];

        match self.keys.as_slice() {
            [] => {},
            [key] => outputs.push(key.to_string()),
            keys => {
                let keys: Vec<String> = keys.iter().map(ToString::to_string).collect();
                outputs.push(format!("({})", keys.join(" | ")));
            },
        }

        outputs.extend(self.requires.iter().map(ToString::to_string));
        outputs.join(" & ")
    }
}

impl Display for ReferenceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.signature())
    }
}

fn resolve_fragment(
    schema: &Schema,
    parent_type: &MetaType,
    directive: &ConstDirective,
    parent_type_signature: &str,
) -> Result<FieldSetFragment, FederationError> {
    let field_set = extract_field_set(directive, Some(parent_type_signature))?;

    let owner = match &field_set.parent_field {
        None => parent_type,
        Some(parent) => {
            let type_name = lookup_field(parent_type, parent)?.ty.concrete_typename();
            schema
                .type_by_name(type_name)
                .ok_or_else(|| FederationError::UnknownType {
                    type_name: type_name.to_string(),
                })?
        },
    };

    let fields = field_set
        .field_set
        .into_iter()
        .map(|name| -> Result<FieldSetItem, FederationError> {
            let required = lookup_field(owner, &name)?.ty.is_non_null();
            Ok(FieldSetItem { name, required })
        })
        .collect::<Result<Vec<_>, FederationError>>()?;

    Ok(FieldSetFragment {
        parent_type_ref: field_set
            .parent_type_ref
            .unwrap_or_else(|| parent_type_signature.to_string()),
        fields,
    })
}

fn lookup_field<'a>(ty: &'a MetaType, name: &str) -> Result<&'a MetaField, FederationError> {
    ty.field_by_name(name)
        .ok_or_else(|| FederationError::UnresolvableField {
            type_name: ty.name.to_string(),
            field_name: name.to_string(),
        })
}
