#![forbid(unsafe_code)]

mod error;
mod printer;
mod schema;
mod type_ext;

pub use error::SchemaError;
pub use printer::{print_schema, print_type, PrintOptions};
pub use schema::{
    get_argument,
    get_argument_str,
    has_directive,
    parse_document,
    Deprecation,
    MetaDirective,
    MetaEnumValue,
    MetaField,
    MetaInputValue,
    MetaType,
    Schema,
    TypeKind,
    BUILTIN_DIRECTIVES,
    BUILTIN_SCALARS,
};
pub use type_ext::TypeExt;
