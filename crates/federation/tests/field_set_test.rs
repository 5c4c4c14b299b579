use graphgate_federation::{extract_field_set, FieldSet, FieldSetError};
use parser::{types::ConstDirective, Pos, Positioned};
use pretty_assertions::assert_eq;
use test_case::test_case;
use value::{ConstValue, Name};

fn directive(name: &str, fields: Option<&str>) -> ConstDirective {
    ConstDirective {
        name: Positioned::new(Name::new(name), Pos::default()),
        arguments: fields
            .map(|fields| {
                (
                    Positioned::new(Name::new("fields"), Pos::default()),
                    Positioned::new(ConstValue::String(fields.to_string()), Pos::default()),
                )
            })
            .into_iter()
            .collect(),
    }
}

fn names(field_set: &FieldSet) -> Vec<&str> {
    field_set.fields.iter().map(|name| name.as_str()).collect()
}

#[test_case("id", &["id"] ; "single field")]
#[test_case("id name", &["id", "name"] ; "two fields")]
#[test_case("id id name", &["id", "name"] ; "duplicates are dropped")]
#[test_case("  id\n\tname  ", &["id", "name"] ; "any whitespace separates")]
#[test_case("", &[] ; "empty")]
fn test_flat_field_set(fields: &str, expected: &[&str]) {
    let field_set = FieldSet::parse(fields).unwrap();
    assert_eq!(field_set.parent, None);
    assert_eq!(names(&field_set), expected);
}

#[test_case("person { id personalId }" ; "spaced")]
#[test_case("person{id personalId}" ; "glued braces")]
#[test_case("person {\n  id\n  personalId\n}" ; "multiline")]
#[test_case("person { id personalId id }" ; "duplicate leaf")]
fn test_nested_field_set(fields: &str) {
    let field_set = FieldSet::parse(fields).unwrap();
    assert_eq!(field_set.parent.as_ref().map(|name| name.as_str()), Some("person"));
    assert_eq!(names(&field_set), vec!["id", "personalId"]);
    assert_eq!(field_set.parent_type_ref("ParentType"), "ParentType['person']");
}

#[test_case("person { id } name", "person", &["id", "name"] ; "name after the group")]
#[test_case("id person { name }", "id", &["person", "name"] ; "name before the group")]
#[test_case("person { id } id", "person", &["id"] ; "repeated leaf after the group")]
fn test_names_outside_the_group_are_leaves(fields: &str, parent: &str, expected: &[&str]) {
    let field_set = FieldSet::parse(fields).unwrap();
    assert_eq!(field_set.parent.as_ref().map(|name| name.as_str()), Some(parent));
    assert_eq!(names(&field_set), expected);
}

#[test]
fn test_several_parents_are_rejected() {
    let fields = "author { id } publisher { id }";
    assert_eq!(
        FieldSet::parse(fields),
        Err(FieldSetError::MultipleNestedParents {
            fields: fields.to_string()
        })
    );
}

#[test_case("person { }" ; "spaced")]
#[test_case("person{}" ; "glued")]
fn test_empty_nested_selection(fields: &str) {
    assert_eq!(
        FieldSet::parse(fields),
        Err(FieldSetError::EmptyNestedSelection {
            fields: fields.to_string()
        })
    );
}

#[test_case("person { id" ; "unclosed group")]
#[test_case("{ id }" ; "group without parent")]
#[test_case("person { id } }" ; "extra closing brace")]
#[test_case("person } id" ; "closing brace only")]
fn test_malformed_field_set(fields: &str) {
    let err = FieldSet::parse(fields).unwrap_err();
    assert!(
        matches!(err, FieldSetError::Malformed { .. }),
        "'{}' should be malformed, got {:?}",
        fields,
        err
    );
}

#[test]
fn test_extract_flat_field_set() {
    let result = extract_field_set(&directive("key", Some("id name")), Some("ParentType")).unwrap();
    assert_eq!(result.parent_type_ref.as_deref(), Some("ParentType"));
    assert_eq!(result.parent_field, None);
    assert_eq!(
        result.field_set.iter().map(|name| name.as_str()).collect::<Vec<_>>(),
        vec!["id", "name"]
    );

    let result = extract_field_set(&directive("key", Some("id")), None).unwrap();
    assert_eq!(result.parent_type_ref, None);
}

#[test]
fn test_extract_nested_field_set() {
    let result = extract_field_set(
        &directive("key", Some("person { id personalId }")),
        Some("ParentType"),
    )
    .unwrap();
    assert_eq!(result.parent_type_ref.as_deref(), Some("ParentType['person']"));
    assert_eq!(result.parent_field.as_ref().map(|name| name.as_str()), Some("person"));
    assert_eq!(
        result.field_set.iter().map(|name| name.as_str()).collect::<Vec<_>>(),
        vec!["id", "personalId"]
    );
}

#[test]
fn test_extract_without_fields_argument() {
    assert_eq!(
        extract_field_set(&directive("requires", None), Some("ParentType")),
        Err(FieldSetError::MissingFieldsArgument {
            directive: "requires".to_string()
        })
    );
}

#[test]
fn test_error_message_suggests_duplicate_directives() {
    let err = FieldSet::parse("author { id } publisher { id }").unwrap_err();
    let message = err.to_string();
    assert!(message.contains("several parents"), "{}", message);
    assert!(message.contains("entity1 { a }"), "{}", message);
}
