use parser::types::{BaseType, Type};

pub trait TypeExt {
    /// Name of the named type behind every list and non-null wrapper.
    fn concrete_typename(&self) -> &str;

    fn is_non_null(&self) -> bool;
}

impl TypeExt for Type {
    fn concrete_typename(&self) -> &str {
        match &self.base {
            BaseType::Named(name) => name.as_str(),
            BaseType::List(ty) => ty.concrete_typename(),
        }
    }

    #[inline]
    fn is_non_null(&self) -> bool {
        !self.nullable
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn concrete_typename_unwraps_lists() {
        let ty = Type::new("[[User!]]!").unwrap();
        assert_eq!(ty.concrete_typename(), "User");
        assert!(ty.is_non_null());

        let ty = Type::new("ID").unwrap();
        assert_eq!(ty.concrete_typename(), "ID");
        assert!(!ty.is_non_null());
    }
}
