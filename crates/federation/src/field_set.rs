use graphgate_schema::get_argument_str;
use indexmap::IndexSet;
use parser::types::ConstDirective;
use value::Name;

use crate::FieldSetError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token<'a> {
    Name(&'a str),
    Open,
    Close,
}

/// Splits on whitespace, braces are tokens of their own even when glued to a name.
fn tokenize(fields: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    for word in fields.split_whitespace() {
        let mut rest = word;
        while !rest.is_empty() {
            match rest.find(|ch: char| ch == '{' || ch == '}') {
                Some(0) => {
                    tokens.push(if rest.starts_with('{') { Token::Open } else { Token::Close });
                    rest = &rest[1..];
                },
                Some(idx) => {
                    tokens.push(Token::Name(&rest[..idx]));
                    rest = &rest[idx..];
                },
                None => {
                    tokens.push(Token::Name(rest));
                    rest = "";
                },
            }
        }
    }
    tokens
}

/// A parsed `fields` argument of `@key`, `@requires` or `@provides`.
///
/// Either a flat list of field names (`"id name"`) or a single nested selection
/// (`"person { id personalId }"`), in which case `parent` holds the nested field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldSet {
    pub parent: Option<Name>,
    pub fields: IndexSet<Name>,
}

impl FieldSet {
    pub fn parse(fields: &str) -> Result<FieldSet, FieldSetError> {
        let tokens = tokenize(fields);

        if tokens.iter().filter(|token| **token == Token::Open).count() > 1 {
            return Err(FieldSetError::MultipleNestedParents {
                fields: fields.to_string(),
            });
        }

        if !tokens
            .iter()
            .any(|token| matches!(token, Token::Open | Token::Close))
        {
            return Ok(FieldSet {
                parent: None,
                fields: tokens
                    .into_iter()
                    .filter_map(|token| match token {
                        Token::Name(name) => Some(Name::new(name)),
                        _ => None,
                    })
                    .collect(),
            });
        }

        let malformed = |reason| FieldSetError::Malformed {
            fields: fields.to_string(),
            reason,
        };
        let open = tokens.iter().position(|token| *token == Token::Open);
        let close = tokens.iter().position(|token| *token == Token::Close);
        match (open, close) {
            (Some(open), Some(close))
                if open < close && tokens.iter().filter(|token| **token == Token::Close).count() == 1 => {},
            _ => return Err(malformed("unbalanced braces")),
        }

        // The first name is the nested parent, every other name is a leaf wherever it sits.
        let mut names = tokens.iter().filter_map(|token| match token {
            Token::Name(name) => Some(Name::new(name)),
            _ => None,
        });
        let parent = match tokens.first() {
            Some(Token::Name(_)) => names.next(),
            _ => None,
        }
        .ok_or_else(|| malformed("a nested selection needs a parent field, e.g. `parent { field }`"))?;
        let leaves: IndexSet<Name> = names.collect();
        if leaves.is_empty() {
            return Err(FieldSetError::EmptyNestedSelection {
                fields: fields.to_string(),
            });
        }

        Ok(FieldSet {
            parent: Some(parent),
            fields: leaves,
        })
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// `ParentType` -> `ParentType['person']` for a nested selection on `person`.
    pub fn parent_type_ref(&self, parent_type_ref: &str) -> String {
        match &self.parent {
            Some(parent) => format!("{}['{}']", parent_type_ref, parent),
            None => parent_type_ref.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractFieldSetResult {
    /// The reference the leaf fields are picked from, `None` only when no reference was given
    /// and the field set is flat.
    pub parent_type_ref: Option<String>,
    /// The nested field the leaves belong to.
    pub parent_field: Option<Name>,
    pub field_set: IndexSet<Name>,
}

/// Reads and parses the `fields` argument of a federation directive.
pub fn extract_field_set(
    directive: &ConstDirective,
    parent_type_ref: Option<&str>,
) -> Result<ExtractFieldSetResult, FieldSetError> {
    let fields = get_argument_str(&directive.arguments, "fields").ok_or_else(|| {
        FieldSetError::MissingFieldsArgument {
            directive: directive.name.node.to_string(),
        }
    })?;
    let field_set = FieldSet::parse(fields.node)?;

    let parent_type_ref = match &field_set.parent {
        Some(_) => Some(field_set.parent_type_ref(parent_type_ref.unwrap_or_default())),
        None => parent_type_ref.map(ToString::to_string),
    };

    Ok(ExtractFieldSetResult {
        parent_type_ref,
        parent_field: field_set.parent,
        field_set: field_set.fields,
    })
}
