use crate::{
    ArgumentDefinition, Definitions, DirectiveDefinition, DirectiveLocation, FieldDefinition,
    Origin, ScalarDefinition, ScalarMarker, SchemaBuilder, TypeDefinition,
};

use super::fixtures::starwars;

struct Query;

#[test]
fn prints_schema_definition_language() {
    let sdl = starwars::schema().as_sdl();

    for expected in [
        "query: Query",
        "subscription: Subscription",
        "interface Character",
        "type Human implements Character",
        "homePlanet: String\n",
        "friends: [Character]!",
        "enum Episode",
        "NEW_HOPE",
        "union SearchResult = Human | Droid",
        "hero(",
        "search(text: String!): [SearchResult!]!",
    ] {
        assert!(sdl.contains(expected), "`{expected}` is missing in:\n{sdl}");
    }
    for builtin in ["scalar String", "scalar ID", "directive @skip", "directive @include"] {
        assert!(!sdl.contains(builtin), "`{builtin}` is printed in:\n{sdl}");
    }
}

#[test]
fn prints_parseable_documents() {
    let sdl = starwars::schema().as_sdl();

    assert!(graphql_parser::parse_schema::<String>(&sdl).is_ok());
}

#[test]
fn prints_custom_scalars_and_directives() {
    let date = ScalarDefinition::new("Date")
        .description("Calendar date")
        .specified_by_url("https://tools.ietf.org/html/rfc3339");
    let defs = Definitions::new()
        .with(
            TypeDefinition::object("Query", Origin::of::<Query>())
                .field(FieldDefinition::new("today", date.into_marker()))
                .field(
                    FieldDefinition::new("yesterday", ScalarMarker::String)
                        .optional()
                        .deprecated("Use `today`"),
                ),
        )
        .unwrap();
    let schema = SchemaBuilder::new(defs, "Query")
        .directive(
            DirectiveDefinition::new("cached", [DirectiveLocation::FieldDefinition])
                .argument(ArgumentDefinition::new("max_age", ScalarMarker::Int).optional()),
        )
        .build()
        .unwrap();

    let sdl = schema.as_sdl();

    for expected in [
        "scalar Date @specifiedBy(url: \"https://tools.ietf.org/html/rfc3339\")",
        "today: Date!",
        "@deprecated",
        "directive @cached(maxAge: Int) on FIELD_DEFINITION",
    ] {
        assert!(sdl.contains(expected), "`{expected}` is missing in:\n{sdl}");
    }
}
