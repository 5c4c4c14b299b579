use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldSetError {
    #[error("Directive '@{directive}' requires a string 'fields' argument.")]
    MissingFieldsArgument { directive: String },

    #[error(
        "Nested fields in _FieldSet are not supported for several parents: '{fields}'. Try using duplicate \
         directives, e.g. '@key(fields: \"entity1 {{ a }}\") @key(fields: \"entity2 {{ b }}\")' instead of \
         '@key(fields: \"entity1 {{ a }} entity2 {{ b }}\")'."
    )]
    MultipleNestedParents { fields: String },

    #[error("The nested selection in field set '{fields}' is empty.")]
    EmptyNestedSelection { fields: String },

    #[error("Invalid field set '{fields}': {reason}.")]
    Malformed { fields: String, reason: &'static str },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FederationError {
    #[error(transparent)]
    FieldSet(#[from] FieldSetError),

    #[error("Field '{field_name}' referenced in a field set does not exist on type '{type_name}'.")]
    UnresolvableField { type_name: String, field_name: String },

    #[error("Type '{type_name}' referenced in a field set is not defined in the schema.")]
    UnknownType { type_name: String },
}
