use std::{collections::HashMap, ops::Deref};

use graphgate_schema::{Schema, TypeExt};
use indexmap::IndexSet;
use tracing::instrument;
use value::Name;

use crate::{directives::directives_by_name, extract_field_set, FieldSetError, PROVIDES_DIRECTIVE};

/// Fields of each type that some `@provides` in the schema makes resolvable locally.
///
/// A type without an entry has no provided fields.
#[derive(Debug, Default, Clone)]
pub struct ProvidesMap(HashMap<Name, IndexSet<Name>>);

impl Deref for ProvidesMap {
    type Target = HashMap<Name, IndexSet<Name>>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl ProvidesMap {
    /// Walks every field of every object type once.
    ///
    /// `@provides` describes fields of the type the field returns, so the names are recorded
    /// against the field's base type rather than the type owning the field. A nested selection
    /// (`author { name }`) contributes its leaves.
    #[instrument(err(Debug), level = "trace", skip(schema))]
    pub fn build(schema: &Schema) -> Result<ProvidesMap, FieldSetError> {
        let mut provides = ProvidesMap::default();

        for ty in schema.types.values().filter(|ty| ty.is_object()) {
            for field in ty.fields.values() {
                for directive in directives_by_name(PROVIDES_DIRECTIVE, field) {
                    let field_set = extract_field_set(&directive.node, None)?;
                    provides.insert(field.ty.concrete_typename(), field_set.field_set);
                }
            }
        }

        tracing::debug!(types = provides.0.len(), "Provides map built.");
        Ok(provides)
    }

    #[inline]
    pub fn fields(&self, type_name: &str) -> Option<&IndexSet<Name>> {
        self.0.get(type_name)
    }

    #[inline]
    pub fn is_provided(&self, type_name: &str, field_name: &str) -> bool {
        self.0
            .get(type_name)
            .map_or(false, |fields| fields.contains(field_name))
    }

    fn insert(&mut self, type_name: &str, fields: impl IntoIterator<Item = Name>) {
        let mut fields = fields.into_iter().peekable();
        if fields.peek().is_none() {
            return;
        }
        self.0.entry(Name::new(type_name)).or_default().extend(fields);
    }
}
