use graphgate_schema::{print_schema, print_type, PrintOptions, Schema};
use pretty_assertions::assert_eq;

#[test]
fn test_print_schema() {
    let schema = Schema::parse(
        r#"
    "The root"
    type Query {
        users(first: Int = 10): [User!]!
    }

    type User @key(fields: "id") {
        id: ID!
        name: String @deprecated(reason: "Use username")
        status: Status
    }

    enum Status {
        ACTIVE
        BANNED
    }

    union Entity = User

    input UserFilter {
        name: String
    }
    "#,
    )
    .unwrap();

    let sdl = print_schema(&schema, &PrintOptions::default());
    assert_eq!(
        sdl,
        r#""""The root"""
type Query {
  users(first: Int = 10): [User!]!
}

type User {
  id: ID!
  name: String @deprecated(reason: "Use username")
  status: Status
}

enum Status {
  ACTIVE
  BANNED
}

union Entity = User

input UserFilter {
  name: String
}
"#
    );
}

#[test]
fn test_print_schema_with_directives() {
    let schema = Schema::parse(
        r#"
    scalar _FieldSet

    directive @key(fields: _FieldSet!) repeatable on OBJECT | INTERFACE

    type User @key(fields: "id") @key(fields: "name") {
        id: ID!
        name: String
    }
    "#,
    )
    .unwrap();

    let sdl = print_schema(&schema, &PrintOptions {
        include_directives: true,
        ..Default::default()
    });
    assert_eq!(
        sdl,
        r#"directive @key(fields: _FieldSet!) repeatable on OBJECT | INTERFACE

scalar _FieldSet

type User @key(fields: "id") @key(fields: "name") {
  id: ID!
  name: String
}
"#
    );
}

#[test]
fn test_print_comment_descriptions() {
    let schema = Schema::parse(
        r#"
    type Query {
        "The current user"
        me: String
    }
    "#,
    )
    .unwrap();

    let sdl = print_schema(&schema, &PrintOptions {
        comment_descriptions: true,
        ..Default::default()
    });
    assert_eq!(sdl, "type Query {\n  # The current user\n  me: String\n}\n");
}

#[test]
fn test_print_custom_schema_definition() {
    let schema = Schema::parse(
        r#"
    schema {
        query: Root
    }

    type Root {
        version: String
    }
    "#,
    )
    .unwrap();

    let sdl = print_schema(&schema, &PrintOptions::default());
    assert!(sdl.starts_with("schema {\n  query: Root\n}\n\ntype Root {"), "{}", sdl);
}

#[test]
fn test_print_non_repeatable_directive() {
    let schema = Schema::parse(
        r#"
    "Cache hint"
    directive @cacheControl(maxAge: Int) on FIELD_DEFINITION

    type Query {
        hello: String @cacheControl(maxAge: 60)
    }
    "#,
    )
    .unwrap();

    let sdl = print_schema(&schema, &PrintOptions::default());
    assert_eq!(
        sdl,
        r#""""Cache hint"""
directive @cacheControl(maxAge: Int) on FIELD_DEFINITION

type Query {
  hello: String
}
"#
    );
}

#[test]
fn test_print_single_type() {
    let schema = Schema::parse(
        r#"
    enum Color {
        RED
        GREEN @deprecated
    }

    union Shape = Circle | Square

    type Circle {
        radius: Float
    }

    type Square {
        side: Float
    }
    "#,
    )
    .unwrap();
    let options = PrintOptions::default();

    assert_eq!(
        print_type(schema.type_by_name("Color").unwrap(), &options),
        "enum Color {\n  RED\n  GREEN @deprecated\n}"
    );
    assert_eq!(
        print_type(schema.type_by_name("Shape").unwrap(), &options),
        "union Shape = Circle | Square"
    );
}
