use graphgate_schema::{Schema, TypeExt, TypeKind};

#[test]
fn test_parse_object_types() {
    let schema = Schema::parse(
        r#"
    type Query {
        allUsers: [User]
    }

    type User @key(fields: "id") {
        id: ID!
        name: String
        username: String
    }
    "#,
    )
    .expect("Failed to parse schema");

    let user = schema.type_by_name("User").expect("User type not found");
    assert_eq!(user.kind, TypeKind::Object);
    assert_eq!(
        user.fields.keys().map(|name| name.as_str()).collect::<Vec<_>>(),
        vec!["id", "name", "username"]
    );
    assert_eq!(user.directives.len(), 1);
    assert_eq!(user.directives[0].node.name.node.as_str(), "key");
    assert!(user.node.is_some(), "parsed types keep their AST node");

    let all_users = schema.query_type().unwrap().field_by_name("allUsers").unwrap();
    assert_eq!(all_users.ty.concrete_typename(), "User");
    assert!(schema.is_root_type("Query"));
    assert!(!schema.is_root_type("User"));
}

#[test]
fn test_builtin_scalars_are_added() {
    let schema = Schema::parse("type Query { id: ID }").unwrap();
    for name in ["String", "Int", "Float", "Boolean", "ID"] {
        let ty = schema.type_by_name(name).expect("builtin scalar missing");
        assert_eq!(ty.kind, TypeKind::Scalar);
    }
    assert!(schema.directives.contains_key("deprecated"));
}

#[test]
fn test_extend_type_merges_fields_and_directives() {
    let schema = Schema::parse(
        r#"
    extend type Query {
        allUsers: [User]
    }

    extend type User @key(fields: "id") {
        id: ID!
    }

    extend type User @key(fields: "name") {
        name: String
    }
    "#,
    )
    .unwrap();

    let user = schema.type_by_name("User").unwrap();
    assert_eq!(
        user.fields.keys().map(|name| name.as_str()).collect::<Vec<_>>(),
        vec!["id", "name"]
    );
    assert_eq!(user.directives.len(), 2);

    let node = user.node.as_ref().unwrap();
    assert!(!node.node.extend, "the merged node is a plain definition");
    assert_eq!(node.node.directives.len(), 2);
    match &node.node.kind {
        parser::types::TypeKind::Object(object) => assert_eq!(object.fields.len(), 2),
        _ => panic!("User should be an object type"),
    }
}

#[test]
fn test_custom_root_operation_types() {
    let schema = Schema::parse(
        r#"
    schema {
        query: RootQuery
    }

    type RootQuery {
        version: String
    }
    "#,
    )
    .unwrap();

    assert_eq!(schema.query_type_name(), "RootQuery");
    assert!(schema.is_root_type("RootQuery"));
    assert!(schema.is_root_type("Mutation"));
    assert!(schema.query_type().is_some());
}

#[test]
fn test_interface_possible_types() {
    let schema = Schema::parse(
        r#"
    interface Node {
        id: ID!
    }

    type User implements Node {
        id: ID!
    }

    type Book implements Node {
        id: ID!
    }
    "#,
    )
    .unwrap();

    let node = schema.type_by_name("Node").unwrap();
    assert!(node.is_possible_type("User"));
    assert!(node.is_possible_type("Book"));
    assert!(!node.is_possible_type("Query"));
}

#[test]
fn test_to_definition_synthesizes_ast() {
    let schema = Schema::parse(
        r#"
    type User @key(fields: "id") {
        id: ID!
        friends(first: Int = 10): [User!]!
    }
    "#,
    )
    .unwrap();

    let definition = schema.type_by_name("User").unwrap().to_definition();
    assert_eq!(definition.name.node.as_str(), "User");
    assert_eq!(definition.directives.len(), 1);
    match definition.kind {
        parser::types::TypeKind::Object(object) => {
            let names: Vec<_> = object.fields.iter().map(|field| field.node.name.node.to_string()).collect();
            assert_eq!(names, vec!["id", "friends"]);
            assert_eq!(object.fields[1].node.arguments.len(), 1);
            assert_eq!(object.fields[1].node.ty.node.to_string(), "[User!]!");
        },
        _ => panic!("User should be an object type"),
    }
}

#[test]
fn test_invalid_document() {
    assert!(Schema::parse("type Query {").is_err());
}

#[test]
fn test_directive_repeatable_flag() {
    let schema = Schema::parse(
        r#"
    directive @key(fields: String!) repeatable on OBJECT | INTERFACE
    directive @cacheControl(maxAge: Int) on FIELD_DEFINITION
    """
    Not repeatable, even though the word shows up here: repeatable
    """
    directive @repeatable(
        # repeatable
        reason: String = "repeatable"
    ) on OBJECT
    directive @tag(name: String!)
        repeatable
        on FIELD_DEFINITION | OBJECT

    type Query {
        hello: String
    }
    "#,
    )
    .unwrap();

    assert!(schema.directives["key"].is_repeatable);
    assert!(!schema.directives["cacheControl"].is_repeatable);
    assert!(!schema.directives["repeatable"].is_repeatable);
    assert!(schema.directives["tag"].is_repeatable);
    assert!(!schema.directives["deprecated"].is_repeatable);
}
