use graphgate_schema::{MetaField, MetaType};
use parser::{types::ConstDirective, Positioned};

/// Anything federation directives can be attached to.
#[derive(Debug, Clone, Copy)]
pub enum DirectiveHost<'a> {
    ObjectType(&'a MetaType),
    Field(&'a MetaField),
}

impl<'a> DirectiveHost<'a> {
    #[inline]
    pub fn directives(&self) -> &'a [Positioned<ConstDirective>] {
        match self {
            DirectiveHost::ObjectType(ty) => &ty.directives,
            DirectiveHost::Field(field) => &field.directives,
        }
    }
}

impl<'a> From<&'a MetaType> for DirectiveHost<'a> {
    fn from(ty: &'a MetaType) -> Self {
        DirectiveHost::ObjectType(ty)
    }
}

impl<'a> From<&'a MetaField> for DirectiveHost<'a> {
    fn from(field: &'a MetaField) -> Self {
        DirectiveHost::Field(field)
    }
}

/// Every directive called `name` on `host`, in declaration order.
pub fn directives_by_name<'a>(name: &str, host: impl Into<DirectiveHost<'a>>) -> Vec<&'a Positioned<ConstDirective>> {
    host.into()
        .directives()
        .iter()
        .filter(|directive| directive.node.name.node.as_str() == name)
        .collect()
}
