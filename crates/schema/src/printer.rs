use std::fmt::{self, Write as _};

use parser::{
    types::{ConstDirective, DirectiveLocation},
    Positioned,
};
use value::ConstValue;

use crate::{
    Deprecation,
    MetaDirective,
    MetaField,
    MetaInputValue,
    MetaType,
    Schema,
    TypeKind,
    BUILTIN_DIRECTIVES,
    BUILTIN_SCALARS,
};

const DEFAULT_DEPRECATION_REASON: &str = "No longer supported";

#[derive(Debug, Default, Clone, Copy)]
pub struct PrintOptions {
    /// Print the directives applied to types, fields, arguments and enum values.
    ///
    /// `@deprecated` is always printed.
    pub include_directives: bool,
    /// Print descriptions as `#` comments instead of block strings.
    pub comment_descriptions: bool,
}

/// Prints the schema as SDL.
///
/// Builtin scalars, builtin directives and introspection types are left out.
pub fn print_schema(schema: &Schema, options: &PrintOptions) -> String {
    SchemaSdl { schema, options }.to_string()
}

pub fn print_type(ty: &MetaType, options: &PrintOptions) -> String {
    TypeSdl { ty, options }.to_string()
}

struct SchemaSdl<'a> {
    schema: &'a Schema,
    options: &'a PrintOptions,
}

impl fmt::Display for SchemaSdl<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let SchemaSdl { schema, options } = *self;
        let mut write_separator = {
            let mut first_definition = true;
            move |f: &mut fmt::Formatter<'_>| {
                if first_definition {
                    first_definition = false;
                    Ok(())
                } else {
                    f.write_str("\n\n")
                }
            }
        };

        if has_schema_definition(schema) {
            write_separator(f)?;
            write_schema_definition(f, schema)?;
        }

        for directive in schema
            .directives
            .values()
            .filter(|directive| !BUILTIN_DIRECTIVES.contains(&directive.name.as_str()))
        {
            write_separator(f)?;
            write_directive_definition(f, directive, options)?;
        }

        for ty in schema
            .types
            .values()
            .filter(|ty| !ty.is_introspection() && !BUILTIN_SCALARS.contains(&ty.name.as_str()))
        {
            write_separator(f)?;
            write_type(f, ty, options)?;
        }

        f.write_char('\n')
    }
}

struct TypeSdl<'a> {
    ty: &'a MetaType,
    options: &'a PrintOptions,
}

impl fmt::Display for TypeSdl<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_type(f, self.ty, self.options)
    }
}

fn write_type(f: &mut fmt::Formatter<'_>, ty: &MetaType, options: &PrintOptions) -> fmt::Result {
    write_description(f, ty.description.as_deref(), "", options)?;

    let keyword = match ty.kind {
        TypeKind::Scalar => "scalar",
        TypeKind::Object => "type",
        TypeKind::Interface => "interface",
        TypeKind::Union => "union",
        TypeKind::Enum => "enum",
        TypeKind::InputObject => "input",
    };
    write!(f, "{} {}", keyword, ty.name)?;

    if matches!(ty.kind, TypeKind::Object | TypeKind::Interface) && !ty.implements.is_empty() {
        let implements: Vec<&str> = ty.implements.iter().map(|name| name.as_str()).collect();
        write!(f, " implements {}", implements.join(" & "))?;
    }
    if options.include_directives {
        write_directives(f, &ty.directives)?;
    }

    match ty.kind {
        TypeKind::Scalar => Ok(()),
        TypeKind::Object | TypeKind::Interface => {
            f.write_str(" {\n")?;
            for field in ty.fields.values() {
                write_field(f, field, options)?;
            }
            f.write_char('}')
        },
        TypeKind::Union => {
            if ty.possible_types.is_empty() {
                return Ok(());
            }
            let members: Vec<&str> = ty.possible_types.iter().map(|name| name.as_str()).collect();
            write!(f, " = {}", members.join(" | "))
        },
        TypeKind::Enum => {
            f.write_str(" {\n")?;
            for value in ty.enum_values.values() {
                write_description(f, value.description.as_deref(), "  ", options)?;
                write!(f, "  {}", value.value)?;
                write_deprecation(f, &value.deprecation, &value.directives, options)?;
                f.write_char('\n')?;
            }
            f.write_char('}')
        },
        TypeKind::InputObject => {
            f.write_str(" {\n")?;
            for field in ty.input_fields.values() {
                write_description(f, field.description.as_deref(), "  ", options)?;
                f.write_str("  ")?;
                write_input_value(f, field, options)?;
                f.write_char('\n')?;
            }
            f.write_char('}')
        },
    }
}

fn root_types(schema: &Schema) -> [(&'static str, Option<&str>, &'static str); 3] {
    [
        ("query", schema.query_type.as_deref(), "Query"),
        ("mutation", schema.mutation_type.as_deref(), "Mutation"),
        ("subscription", schema.subscription_type.as_deref(), "Subscription"),
    ]
}

fn has_schema_definition(schema: &Schema) -> bool {
    root_types(schema)
        .iter()
        .any(|(_, name, default)| name.map_or(false, |name| name != *default))
}

fn write_schema_definition(f: &mut fmt::Formatter<'_>, schema: &Schema) -> fmt::Result {
    f.write_str("schema {\n")?;
    for (operation, name, _) in root_types(schema) {
        if let Some(name) = name {
            writeln!(f, "  {}: {}", operation, name)?;
        }
    }
    f.write_char('}')
}

fn write_directive_definition(
    f: &mut fmt::Formatter<'_>,
    directive: &MetaDirective,
    options: &PrintOptions,
) -> fmt::Result {
    write_description(f, directive.description.as_deref(), "", options)?;
    write!(f, "directive @{}", directive.name)?;
    write_arguments(f, directive.arguments.values(), options)?;
    if directive.is_repeatable {
        f.write_str(" repeatable")?;
    }
    let locations: Vec<String> = directive.locations.iter().map(location_name).collect();
    write!(f, " on {}", locations.join(" | "))
}

fn write_field(f: &mut fmt::Formatter<'_>, field: &MetaField, options: &PrintOptions) -> fmt::Result {
    write_description(f, field.description.as_deref(), "  ", options)?;
    write!(f, "  {}", field.name)?;
    write_arguments(f, field.arguments.values(), options)?;
    write!(f, ": {}", field.ty)?;
    write_deprecation(f, &field.deprecation, &field.directives, options)?;
    f.write_char('\n')
}

fn write_arguments<'a>(
    f: &mut fmt::Formatter<'_>,
    arguments: impl ExactSizeIterator<Item = &'a MetaInputValue>,
    options: &PrintOptions,
) -> fmt::Result {
    if arguments.len() == 0 {
        return Ok(());
    }

    f.write_char('(')?;
    for (idx, argument) in arguments.enumerate() {
        if idx > 0 {
            f.write_str(", ")?;
        }
        write_input_value(f, argument, options)?;
    }
    f.write_char(')')
}

fn write_input_value(f: &mut fmt::Formatter<'_>, input_value: &MetaInputValue, options: &PrintOptions) -> fmt::Result {
    write!(f, "{}: {}", input_value.name, input_value.ty)?;
    if let Some(default_value) = &input_value.default_value {
        write!(f, " = {}", default_value)?;
    }
    if options.include_directives {
        write_directives(f, &input_value.directives)?;
    }
    Ok(())
}

fn write_deprecation(
    f: &mut fmt::Formatter<'_>,
    deprecation: &Deprecation,
    directives: &[Positioned<ConstDirective>],
    options: &PrintOptions,
) -> fmt::Result {
    if options.include_directives {
        return write_directives(f, directives);
    }

    match deprecation {
        Deprecation::NoDeprecated => Ok(()),
        Deprecation::Deprecated { reason } => match reason.as_deref() {
            Some(reason) if reason != DEFAULT_DEPRECATION_REASON => {
                write!(f, " @deprecated(reason: {})", ConstValue::String(reason.to_string()))
            },
            _ => f.write_str(" @deprecated"),
        },
    }
}

fn write_directives(f: &mut fmt::Formatter<'_>, directives: &[Positioned<ConstDirective>]) -> fmt::Result {
    for directive in directives {
        write!(f, " @{}", directive.node.name.node)?;
        if !directive.node.arguments.is_empty() {
            let arguments: Vec<String> = directive
                .node
                .arguments
                .iter()
                .map(|(name, value)| format!("{}: {}", name.node, value.node))
                .collect();
            write!(f, "({})", arguments.join(", "))?;
        }
    }
    Ok(())
}

fn write_description(
    f: &mut fmt::Formatter<'_>,
    description: Option<&str>,
    indent: &str,
    options: &PrintOptions,
) -> fmt::Result {
    let Some(description) = description else {
        return Ok(());
    };

    if options.comment_descriptions {
        for line in description.lines() {
            writeln!(f, "{}# {}", indent, line)?;
        }
        Ok(())
    } else if description.contains('\n') {
        writeln!(f, "{}\"\"\"", indent)?;
        for line in description.lines() {
            writeln!(f, "{}{}", indent, line.replace("\"\"\"", "\\\"\"\""))?;
        }
        writeln!(f, "{}\"\"\"", indent)
    } else {
        writeln!(f, "{}\"\"\"{}\"\"\"", indent, description.replace("\"\"\"", "\\\"\"\""))
    }
}

/// `FieldDefinition` -> `FIELD_DEFINITION`
fn location_name(location: &DirectiveLocation) -> String {
    let debug = format!("{:?}", location);
    let mut name = String::with_capacity(debug.len() + 4);
    for (idx, ch) in debug.chars().enumerate() {
        if idx > 0 && ch.is_ascii_uppercase() {
            name.push('_');
        }
        name.push(ch.to_ascii_uppercase());
    }
    name
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn location_names_are_screaming_snake_case() {
        assert_eq!(location_name(&DirectiveLocation::FieldDefinition), "FIELD_DEFINITION");
        assert_eq!(location_name(&DirectiveLocation::Object), "OBJECT");
        assert_eq!(location_name(&DirectiveLocation::InputFieldDefinition), "INPUT_FIELD_DEFINITION");
    }
}
