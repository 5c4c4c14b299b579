use std::borrow::Borrow;

use graphgate_schema::{has_directive, MetaField, MetaType, Schema};

use crate::{
    FederationError,
    ProvidesMap,
    ReferenceType,
    EXTERNAL_DIRECTIVE,
    FEDERATION_DIRECTIVES,
    FIELD_SET_SCALAR,
    KEY_DIRECTIVE,
    RESOLVE_REFERENCE_FIELD,
};

/// An object type that takes part in federation: not a root operation type, not an
/// introspection type and declaring at least one `@key`.
pub fn is_federation_object_type(schema: &Schema, ty: &MetaType) -> bool {
    ty.is_object() &&
        !schema.is_root_type(&ty.name) &&
        !ty.is_introspection() &&
        has_directive(&ty.directives, KEY_DIRECTIVE)
}

/// Answers the federation questions a generator asks while walking a schema.
///
/// One instance lives for one generation run. When constructed disabled every query
/// passes its input through, so generators can call it unconditionally.
#[derive(Debug)]
pub struct ApolloFederation<'a> {
    enabled: bool,
    schema: &'a Schema,
    provides: ProvidesMap,
}

impl<'a> ApolloFederation<'a> {
    pub fn new(enabled: bool, schema: &'a Schema) -> Result<Self, FederationError> {
        let provides = if enabled {
            ProvidesMap::build(schema)?
        } else {
            ProvidesMap::default()
        };

        Ok(Self {
            enabled,
            schema,
            provides,
        })
    }

    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    #[inline]
    pub fn schema(&self) -> &'a Schema {
        self.schema
    }

    #[inline]
    pub fn provides(&self) -> &ProvidesMap {
        &self.provides
    }

    /// Drops the `_FieldSet` scalar.
    pub fn filter_type_names<T: Borrow<str>>(&self, type_names: Vec<T>) -> Vec<T> {
        if !self.enabled {
            return type_names;
        }

        type_names
            .into_iter()
            .filter(|name| <T as Borrow<str>>::borrow(name) != FIELD_SET_SCALAR)
            .collect()
    }

    /// Drops the `__resolveReference` field.
    pub fn filter_field_names<T: Borrow<str>>(&self, field_names: Vec<T>) -> Vec<T> {
        if !self.enabled {
            return field_names;
        }

        field_names
            .into_iter()
            .filter(|name| <T as Borrow<str>>::borrow(name) != RESOLVE_REFERENCE_FIELD)
            .collect()
    }

    pub fn skip_directive(&self, name: &str) -> bool {
        self.enabled && FEDERATION_DIRECTIVES.contains(&name)
    }

    pub fn skip_scalar(&self, name: &str) -> bool {
        self.enabled && name == FIELD_SET_SCALAR
    }

    pub fn is_federation_object_type(&self, ty: &MetaType) -> bool {
        self.enabled && is_federation_object_type(self.schema, ty)
    }

    /// `@external` fields of an entity are resolved by another service, unless a `@provides`
    /// somewhere in the schema makes them available here.
    pub fn skip_field(&self, field: &MetaField, parent_type: &MetaType) -> bool {
        if !self.is_federation_object_type(parent_type) {
            return false;
        }

        has_directive(&field.directives, EXTERNAL_DIRECTIVE) &&
            !self.provides.is_provided(&parent_type.name, &field.name)
    }

    pub fn is_resolve_reference_field(&self, field: &MetaField) -> bool {
        self.enabled && field.name.as_str() == RESOLVE_REFERENCE_FIELD
    }

    /// The parent type of `__resolveReference` on an entity, `parent_type_signature` for any
    /// other field.
    pub fn transform_parent_type(
        &self,
        field: &MetaField,
        parent_type: &MetaType,
        parent_type_signature: &str,
    ) -> Result<String, FederationError> {
        Ok(
            match self.reference_type(field, parent_type, parent_type_signature)? {
                Some(reference_type) => reference_type.signature(),
                None => parent_type_signature.to_string(),
            },
        )
    }

    pub fn reference_type(
        &self,
        field: &MetaField,
        parent_type: &MetaType,
        parent_type_signature: &str,
    ) -> Result<Option<ReferenceType>, FederationError> {
        if !self.is_resolve_reference_field(field) || !self.is_federation_object_type(parent_type) {
            return Ok(None);
        }

        ReferenceType::build(self.schema, parent_type, field, parent_type_signature).map(Some)
    }
}
