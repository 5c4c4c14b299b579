use indexmap::{IndexMap, IndexSet};
use parser::{
    types::{
        self,
        ConstDirective,
        DirectiveDefinition,
        DirectiveLocation,
        EnumType,
        FieldDefinition,
        InputObjectType,
        InputValueDefinition,
        InterfaceType,
        ObjectType,
        SchemaDefinition,
        ServiceDocument,
        Type,
        TypeDefinition,
        TypeSystemDefinition,
        UnionType,
    },
    Pos,
    Positioned,
};
use tracing::instrument;
use value::{ConstValue, Name};

use crate::SchemaError;

/// Scalars every GraphQL schema has without declaring them.
pub const BUILTIN_SCALARS: [&str; 5] = ["String", "Int", "Float", "Boolean", "ID"];

/// Directives every GraphQL schema has without declaring them.
pub const BUILTIN_DIRECTIVES: [&str; 4] = ["skip", "include", "deprecated", "specifiedBy"];

const DEFAULT_QUERY_TYPE: &str = "Query";
const DEFAULT_MUTATION_TYPE: &str = "Mutation";
const DEFAULT_SUBSCRIPTION_TYPE: &str = "Subscription";

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Deprecation {
    NoDeprecated,
    Deprecated { reason: Option<String> },
}

#[derive(Debug, Clone)]
pub struct MetaField {
    pub description: Option<String>,
    pub name: Name,
    pub arguments: IndexMap<Name, MetaInputValue>,
    pub ty: Type,
    pub deprecation: Deprecation,
    /// Directives applied to the field definition, in declaration order.
    ///
    /// Federation metadata (`@external`, `@requires`, `@provides`) is read from here.
    pub directives: Vec<Positioned<ConstDirective>>,
}

impl MetaField {
    pub fn new(name: Name, ty: Type) -> Self {
        Self {
            description: None,
            name,
            arguments: Default::default(),
            ty,
            deprecation: Deprecation::NoDeprecated,
            directives: Default::default(),
        }
    }

    /// Builds the AST node describing this field.
    pub fn to_definition(&self) -> FieldDefinition {
        FieldDefinition {
            description: self.description.clone().map(positioned),
            name: positioned(self.name.clone()),
            arguments: self
                .arguments
                .values()
                .map(|argument| positioned(argument.to_definition()))
                .collect(),
            ty: positioned(self.ty.clone()),
            directives: self.directives.clone(),
        }
    }
}

#[derive(Debug, Eq, PartialEq, Copy, Clone)]
pub enum TypeKind {
    Scalar,
    Object,
    Interface,
    Union,
    Enum,
    InputObject,
}

#[derive(Debug, Clone)]
pub struct MetaEnumValue {
    pub description: Option<String>,
    pub value: Name,
    pub deprecation: Deprecation,
    pub directives: Vec<Positioned<ConstDirective>>,
}

#[derive(Debug, Clone)]
pub struct MetaInputValue {
    pub description: Option<String>,
    pub name: Name,
    pub ty: Type,
    pub default_value: Option<ConstValue>,
    pub directives: Vec<Positioned<ConstDirective>>,
}

impl MetaInputValue {
    pub fn to_definition(&self) -> InputValueDefinition {
        InputValueDefinition {
            description: self.description.clone().map(positioned),
            name: positioned(self.name.clone()),
            ty: positioned(self.ty.clone()),
            default_value: self.default_value.clone().map(positioned),
            directives: self.directives.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct MetaType {
    pub description: Option<String>,
    pub name: Name,
    pub kind: TypeKind,
    /// Directives applied to the type, including the ones coming from `extend type`.
    pub directives: Vec<Positioned<ConstDirective>>,

    pub implements: IndexSet<Name>,
    pub fields: IndexMap<Name, MetaField>,
    pub possible_types: IndexSet<Name>,
    pub enum_values: IndexMap<Name, MetaEnumValue>,
    pub input_fields: IndexMap<Name, MetaInputValue>,

    /// The AST node the type was built from, with every extension merged in.
    ///
    /// `None` for types that were created programmatically, use [`MetaType::to_definition`]
    /// to get a synthesized one.
    pub node: Option<Positioned<TypeDefinition>>,
}

impl MetaType {
    pub fn new(name: Name, kind: TypeKind) -> Self {
        Self {
            description: None,
            name,
            kind,
            directives: Default::default(),
            implements: Default::default(),
            fields: Default::default(),
            possible_types: Default::default(),
            enum_values: Default::default(),
            input_fields: Default::default(),
            node: None,
        }
    }

    #[inline]
    pub fn field_by_name(&self, name: &str) -> Option<&MetaField> {
        self.fields.get(name)
    }

    #[inline]
    pub fn is_object(&self) -> bool {
        self.kind == TypeKind::Object
    }

    #[inline]
    pub fn is_introspection(&self) -> bool {
        self.name.starts_with("__")
    }

    #[inline]
    pub fn is_possible_type(&self, type_name: &str) -> bool {
        match self.kind {
            TypeKind::Interface | TypeKind::Union => self.possible_types.contains(type_name),
            TypeKind::Object => self.name == type_name,
            _ => false,
        }
    }

    /// Builds an AST node from the runtime description of the type.
    pub fn to_definition(&self) -> TypeDefinition {
        let fields = || {
            self.fields
                .values()
                .map(|field| positioned(field.to_definition()))
                .collect()
        };
        let implements = || self.implements.iter().cloned().map(positioned).collect();

        let kind = match self.kind {
            TypeKind::Scalar => types::TypeKind::Scalar,
            TypeKind::Object => types::TypeKind::Object(ObjectType {
                implements: implements(),
                fields: fields(),
            }),
            TypeKind::Interface => types::TypeKind::Interface(InterfaceType {
                implements: implements(),
                fields: fields(),
            }),
            TypeKind::Union => types::TypeKind::Union(UnionType {
                members: self.possible_types.iter().cloned().map(positioned).collect(),
            }),
            TypeKind::Enum => types::TypeKind::Enum(EnumType {
                values: self
                    .enum_values
                    .values()
                    .map(|value| {
                        positioned(types::EnumValueDefinition {
                            description: value.description.clone().map(positioned),
                            value: positioned(value.value.clone()),
                            directives: value.directives.clone(),
                        })
                    })
                    .collect(),
            }),
            TypeKind::InputObject => types::TypeKind::InputObject(InputObjectType {
                fields: self
                    .input_fields
                    .values()
                    .map(|field| positioned(field.to_definition()))
                    .collect(),
            }),
        };

        TypeDefinition {
            extend: false,
            description: self.description.clone().map(positioned),
            name: positioned(self.name.clone()),
            directives: self.directives.clone(),
            kind,
        }
    }
}

#[derive(Debug, Clone)]
pub struct MetaDirective {
    pub name: Name,
    pub description: Option<String>,
    pub locations: Vec<DirectiveLocation>,
    pub arguments: IndexMap<Name, MetaInputValue>,
    pub is_repeatable: bool,
}

#[derive(Debug, Default, Clone)]
pub struct Schema {
    pub query_type: Option<Name>,
    pub mutation_type: Option<Name>,
    pub subscription_type: Option<Name>,
    pub types: IndexMap<Name, MetaType>,
    pub directives: IndexMap<Name, MetaDirective>,
}

impl Schema {
    #[instrument(err(Debug), level = "trace", skip(document))]
    pub fn parse(document: &str) -> Result<Schema, SchemaError> {
        Ok(Self::new(parse_document(document)?))
    }

    pub fn new(document: ServiceDocument) -> Schema {
        let mut schema = Schema::default();
        schema.merge(document);
        finish_schema(&mut schema);
        schema
    }

    /// Adds the definitions of `document` to the schema.
    ///
    /// Type extensions and redefinitions are merged into the existing type, fields and
    /// directives are appended in declaration order.
    pub fn merge(&mut self, document: ServiceDocument) {
        // Root operation names first, the rest of the document may depend on them
        for definition in document.definitions.iter() {
            if let TypeSystemDefinition::Schema(schema) = definition {
                convert_schema_definition(self, &schema.node);
            }
        }

        for definition in document.definitions {
            match definition {
                TypeSystemDefinition::Schema(_) => {},
                TypeSystemDefinition::Type(type_definition) => {
                    let name = type_definition.node.name.node.clone();
                    match self.types.get_mut(&name) {
                        Some(meta_type) => extend_type_definition(meta_type, type_definition),
                        None => {
                            self.types.insert(name, convert_type_definition(type_definition));
                        },
                    }
                },
                TypeSystemDefinition::Directive(directive_definition) => {
                    self.directives.insert(
                        directive_definition.node.name.node.clone(),
                        convert_directive_definition(directive_definition.node),
                    );
                },
            }
        }
    }

    #[inline]
    pub fn type_by_name(&self, name: &str) -> Option<&MetaType> {
        self.types.get(name)
    }

    #[inline]
    pub fn query_type_name(&self) -> &str {
        self.query_type.as_deref().unwrap_or(DEFAULT_QUERY_TYPE)
    }

    #[inline]
    pub fn mutation_type_name(&self) -> &str {
        self.mutation_type.as_deref().unwrap_or(DEFAULT_MUTATION_TYPE)
    }

    #[inline]
    pub fn subscription_type_name(&self) -> &str {
        self.subscription_type.as_deref().unwrap_or(DEFAULT_SUBSCRIPTION_TYPE)
    }

    #[inline]
    pub fn query_type(&self) -> Option<&MetaType> {
        self.types.get(self.query_type_name())
    }

    pub fn is_root_type(&self, name: &str) -> bool {
        [
            self.query_type_name(),
            self.mutation_type_name(),
            self.subscription_type_name(),
        ]
        .contains(&name)
    }
}

pub fn get_argument<'a>(
    arguments: &'a [(Positioned<Name>, Positioned<ConstValue>)],
    name: &str,
) -> Option<&'a Positioned<ConstValue>> {
    arguments
        .iter()
        .find_map(|d| if d.0.node.as_str() == name { Some(&d.1) } else { None })
}

pub fn get_argument_str<'a>(
    arguments: &'a [(Positioned<Name>, Positioned<ConstValue>)],
    name: &str,
) -> Option<Positioned<&'a str>> {
    get_argument(arguments, name).and_then(|value| match &value.node {
        ConstValue::String(s) => Some(Positioned::new(s.as_str(), value.pos)),
        _ => None,
    })
}

#[inline]
pub fn has_directive(directives: &[Positioned<ConstDirective>], name: &str) -> bool {
    directives
        .iter()
        .any(|directive| directive.node.name.node.as_str() == name)
}

/// Parses an SDL document.
///
/// The parser flags every directive definition as repeatable, so `is_repeatable` is read
/// back from the source text of each definition.
pub fn parse_document(document: &str) -> Result<ServiceDocument, SchemaError> {
    let mut service_document = parser::parse_schema(document)?;
    for definition in &mut service_document.definitions {
        if let TypeSystemDefinition::Directive(directive) = definition {
            directive.node.is_repeatable = declares_repeatable(document, directive.pos);
        }
    }
    Ok(service_document)
}

/// Byte offset of a 1-based line/column position.
fn offset_of(source: &str, pos: Pos) -> usize {
    let line_start: usize = source
        .split_inclusive('\n')
        .take(pos.line.saturating_sub(1))
        .map(str::len)
        .sum();
    source[line_start..]
        .char_indices()
        .nth(pos.column.saturating_sub(1))
        .map_or(source.len(), |(idx, _)| line_start + idx)
}

/// Scans a directive definition starting at `pos` for the `repeatable` keyword.
///
/// Strings, comments, the argument list and the directive name are skipped, the scan stops
/// at the `on` keyword.
fn declares_repeatable(source: &str, pos: Pos) -> bool {
    let bytes = &source.as_bytes()[offset_of(source, pos)..];
    let mut idx = 0;
    let mut depth = 0usize;
    let mut directive_name = false;

    while idx < bytes.len() {
        match bytes[idx] {
            b'"' if bytes[idx..].starts_with(b"\"\"\"") => {
                idx += 3;
                while idx < bytes.len() && !bytes[idx..].starts_with(b"\"\"\"") {
                    idx += if bytes[idx] == b'\\' { 2 } else { 1 };
                }
                idx += 3;
            },
            b'"' => {
                idx += 1;
                while idx < bytes.len() && bytes[idx] != b'"' && bytes[idx] != b'\n' {
                    idx += if bytes[idx] == b'\\' { 2 } else { 1 };
                }
                idx += 1;
            },
            b'#' => {
                while idx < bytes.len() && bytes[idx] != b'\n' {
                    idx += 1;
                }
            },
            b'(' => {
                depth += 1;
                idx += 1;
            },
            b')' => {
                depth = depth.saturating_sub(1);
                idx += 1;
            },
            b'@' => {
                directive_name = true;
                idx += 1;
            },
            ch if ch == b'_' || ch.is_ascii_alphabetic() => {
                let start = idx;
                while idx < bytes.len() && (bytes[idx] == b'_' || bytes[idx].is_ascii_alphanumeric()) {
                    idx += 1;
                }
                let is_name = std::mem::take(&mut directive_name);
                if depth == 0 && !is_name {
                    match &bytes[start..idx] {
                        b"repeatable" => return true,
                        b"on" => return false,
                        _ => {},
                    }
                }
            },
            _ => idx += 1,
        }
    }

    false
}

#[inline]
pub(crate) fn positioned<T>(node: T) -> Positioned<T> {
    Positioned::new(node, Pos::default())
}

fn convert_schema_definition(schema: &mut Schema, schema_definition: &SchemaDefinition) {
    if let Some(query) = &schema_definition.query {
        schema.query_type = Some(query.node.clone());
    }
    if let Some(mutation) = &schema_definition.mutation {
        schema.mutation_type = Some(mutation.node.clone());
    }
    if let Some(subscription) = &schema_definition.subscription {
        schema.subscription_type = Some(subscription.node.clone());
    }
}

fn convert_type_definition(definition: Positioned<TypeDefinition>) -> MetaType {
    let mut node = definition.clone();
    node.node.extend = false;

    let definition = definition.node;
    let mut type_definition = MetaType::new(definition.name.node.clone(), TypeKind::Scalar);
    type_definition.description = definition.description.map(|description| description.node);
    type_definition.directives = definition.directives;
    type_definition.node = Some(node);

    match definition.kind {
        types::TypeKind::Scalar => type_definition.kind = TypeKind::Scalar,
        types::TypeKind::Object(ObjectType { implements, fields }) => {
            type_definition.kind = TypeKind::Object;
            type_definition.implements = implements.into_iter().map(|implement| implement.node).collect();
            type_definition.fields.extend(
                fields
                    .into_iter()
                    .map(|field| (field.node.name.node.clone(), convert_field_definition(field.node))),
            );
        },
        types::TypeKind::Interface(InterfaceType { implements, fields }) => {
            type_definition.kind = TypeKind::Interface;
            type_definition.implements = implements.into_iter().map(|name| name.node).collect();
            type_definition.fields = fields
                .into_iter()
                .map(|field| (field.node.name.node.clone(), convert_field_definition(field.node)))
                .collect();
        },
        types::TypeKind::Union(UnionType { members }) => {
            type_definition.kind = TypeKind::Union;
            type_definition.possible_types = members.into_iter().map(|name| name.node).collect();
        },
        types::TypeKind::Enum(EnumType { values }) => {
            type_definition.kind = TypeKind::Enum;
            type_definition
                .enum_values
                .extend(values.into_iter().map(|value| (value.node.value.node.clone(), convert_enum_value(value.node))));
        },
        types::TypeKind::InputObject(InputObjectType { fields }) => {
            type_definition.kind = TypeKind::InputObject;
            type_definition.input_fields.extend(
                fields
                    .into_iter()
                    .map(|field| (field.node.name.node.clone(), convert_input_value_definition(field.node))),
            );
        },
    }

    type_definition
}

/// Merges an `extend type` (or a repeated definition) into an already known type.
///
/// A definition of a different kind only contributes its directives.
fn extend_type_definition(meta_type: &mut MetaType, extension: Positioned<TypeDefinition>) {
    let extension = extension.node;
    if meta_type.description.is_none() {
        meta_type.description = extension.description.as_ref().map(|description| description.node.clone());
    }
    meta_type.directives.extend(extension.directives.iter().cloned());

    if let Some(node) = &mut meta_type.node {
        node.node.directives.extend(extension.directives.iter().cloned());
        match (&mut node.node.kind, &extension.kind) {
            (types::TypeKind::Object(object), types::TypeKind::Object(extension)) => {
                object.implements.extend(extension.implements.iter().cloned());
                object.fields.extend(extension.fields.iter().cloned());
            },
            (types::TypeKind::Interface(interface), types::TypeKind::Interface(extension)) => {
                interface.implements.extend(extension.implements.iter().cloned());
                interface.fields.extend(extension.fields.iter().cloned());
            },
            (types::TypeKind::Union(union), types::TypeKind::Union(extension)) => {
                union.members.extend(extension.members.iter().cloned());
            },
            (types::TypeKind::Enum(enum_type), types::TypeKind::Enum(extension)) => {
                enum_type.values.extend(extension.values.iter().cloned());
            },
            (types::TypeKind::InputObject(input), types::TypeKind::InputObject(extension)) => {
                input.fields.extend(extension.fields.iter().cloned());
            },
            _ => {},
        }
    }

    match extension.kind {
        types::TypeKind::Object(ObjectType { implements, fields }) |
        types::TypeKind::Interface(InterfaceType { implements, fields }) => {
            meta_type
                .implements
                .extend(implements.into_iter().map(|implement| implement.node));
            meta_type.fields.extend(
                fields
                    .into_iter()
                    .map(|field| (field.node.name.node.clone(), convert_field_definition(field.node))),
            );
        },
        types::TypeKind::Union(UnionType { members }) => {
            meta_type
                .possible_types
                .extend(members.into_iter().map(|member| member.node));
        },
        types::TypeKind::Enum(EnumType { values }) => {
            meta_type
                .enum_values
                .extend(values.into_iter().map(|value| (value.node.value.node.clone(), convert_enum_value(value.node))));
        },
        types::TypeKind::InputObject(InputObjectType { fields }) => {
            meta_type.input_fields.extend(
                fields
                    .into_iter()
                    .map(|field| (field.node.name.node.clone(), convert_input_value_definition(field.node))),
            );
        },
        types::TypeKind::Scalar => {},
    }
}

fn convert_field_definition(definition: FieldDefinition) -> MetaField {
    MetaField {
        description: definition.description.map(|description| description.node),
        name: definition.name.node,
        arguments: definition
            .arguments
            .into_iter()
            .map(|arg| (arg.node.name.node.clone(), convert_input_value_definition(arg.node)))
            .collect(),
        ty: definition.ty.node,
        deprecation: get_deprecated(&definition.directives),
        directives: definition.directives,
    }
}

fn convert_enum_value(value: types::EnumValueDefinition) -> MetaEnumValue {
    MetaEnumValue {
        description: value.description.map(|description| description.node),
        value: value.value.node,
        deprecation: get_deprecated(&value.directives),
        directives: value.directives,
    }
}

fn convert_input_value_definition(arg: InputValueDefinition) -> MetaInputValue {
    MetaInputValue {
        description: arg.description.map(|description| description.node),
        name: arg.name.node,
        ty: arg.ty.node,
        default_value: arg.default_value.map(|default_value| default_value.node),
        directives: arg.directives,
    }
}

fn convert_directive_definition(directive_definition: DirectiveDefinition) -> MetaDirective {
    MetaDirective {
        name: directive_definition.name.node,
        description: directive_definition
            .description
            .map(|directive_definition| directive_definition.node),
        locations: directive_definition
            .locations
            .into_iter()
            .map(|location| location.node)
            .collect(),
        arguments: directive_definition
            .arguments
            .into_iter()
            .map(|arg| (arg.node.name.node.clone(), convert_input_value_definition(arg.node)))
            .collect(),
        is_repeatable: directive_definition.is_repeatable,
    }
}

fn get_deprecated(directives: &[Positioned<ConstDirective>]) -> Deprecation {
    directives
        .iter()
        .find(|directive| directive.node.name.node.as_str() == "deprecated")
        .map(|directive| Deprecation::Deprecated {
            reason: get_argument_str(&directive.node.arguments, "reason").map(|reason| reason.node.to_string()),
        })
        .unwrap_or(Deprecation::NoDeprecated)
}

fn finish_schema(schema: &mut Schema) {
    let builtins = match parse_document(include_str!("builtin.graphql")) {
        Ok(document) => document,
        Err(err) => {
            tracing::error!(error = %err, "Failed to parse builtin definitions.");
            return;
        },
    };

    for definition in builtins.definitions {
        match definition {
            TypeSystemDefinition::Type(type_definition) => {
                schema
                    .types
                    .entry(type_definition.node.name.node.clone())
                    .or_insert_with(|| convert_type_definition(type_definition));
            },
            TypeSystemDefinition::Directive(directive_definition) => {
                schema
                    .directives
                    .entry(directive_definition.node.name.node.clone())
                    .or_insert_with(|| convert_directive_definition(directive_definition.node));
            },
            TypeSystemDefinition::Schema(_) => {},
        }
    }

    let mut possible_types: IndexMap<Name, IndexSet<Name>> = Default::default();
    for ty in schema.types.values() {
        if ty.kind == TypeKind::Object {
            for implement in &ty.implements {
                possible_types
                    .entry(implement.clone())
                    .or_default()
                    .insert(ty.name.clone());
            }
        }
    }
    for (name, types) in possible_types {
        if let Some(ty) = schema.types.get_mut(&name) {
            if ty.kind == TypeKind::Interface {
                ty.possible_types = types;
            }
        }
    }
}
