//! Star Wars themed definitions, with a tiny in-memory database as the
//! request context.

use futures::stream;

use crate::{
    ArgumentDefinition, Definitions, EnumDefinition, FieldDefinition, Object, Origin, Resolution,
    ResolverDefinition, ScalarMarker, SchemaBuilder, SchemaType, TypeDefinition, TypeRef,
    UnionDefinition, Value,
    value::EnumMember,
};

pub struct Character;
pub struct Human;
pub struct Droid;
pub struct Query;
pub struct Subscription;

/// Characters, keyed by their IDs.
pub struct Database {
    characters: Vec<(&'static str, Value)>,
}

impl Database {
    pub fn new() -> Self {
        Self {
            characters: vec![
                (
                    "1000",
                    human("1000", "Luke Skywalker", Some("Tatooine"), &["1001", "2001"]),
                ),
                ("1001", human("1001", "Darth Vader", None, &["1000"])),
                ("2001", droid("2001", "R2-D2", "Astromech", &["1000"])),
            ],
        }
    }

    pub fn get(&self, id: &str) -> Option<Value> {
        self.characters
            .iter()
            .find(|(k, _)| *k == id)
            .map(|(_, v)| v.clone())
    }

    pub fn humans(&self) -> Vec<Value> {
        self.characters
            .iter()
            .map(|(_, v)| v)
            .filter(|v| {
                v.as_object_value()
                    .is_some_and(|o| o.is_instance_of(Origin::of::<Human>()))
            })
            .cloned()
            .collect()
    }
}

pub fn episode(name: &str, value: i32) -> Value {
    EnumMember::new("Episode", name, Value::scalar(value)).into()
}

fn appears_in() -> Value {
    Value::list(vec![
        episode("NEW_HOPE", 4),
        episode("EMPIRE", 5),
        episode("JEDI", 6),
    ])
}

fn ids(ids: &[&str]) -> Value {
    Value::list(ids.iter().map(|&id| Value::scalar(id)).collect())
}

pub fn human(id: &str, name: &str, home_planet: Option<&str>, friends: &[&str]) -> Value {
    Object::instance_of(Origin::of::<Human>())
        .field("id", id)
        .field("name", name)
        .field("friend_ids", ids(friends))
        .field("appears_in", appears_in())
        .field("home_planet", home_planet.map_or(Value::Null, Value::scalar))
        .into()
}

pub fn droid(id: &str, name: &str, primary_function: &str, friends: &[&str]) -> Value {
    Object::instance_of(Origin::of::<Droid>())
        .field("id", id)
        .field("name", name)
        .field("friend_ids", ids(friends))
        .field("appears_in", appears_in())
        .field("primary_function", primary_function)
        .into()
}

fn friends() -> FieldDefinition {
    let resolver = ResolverDefinition::new("friends", |args| {
        let db = args
            .info()
            .and_then(|i| i.context::<Database>())
            .ok_or("Missing database")?;
        let friend_ids = args
            .source()
            .and_then(Value::as_object_value)
            .and_then(|o| o.get_field_value("friend_ids"))
            .and_then(Value::as_list_value)
            .ok_or("Missing friend IDs")?;
        Ok(Value::list(
            friend_ids
                .iter()
                .filter_map(Value::as_string_value)
                .filter_map(|id| db.get(id))
                .collect(),
        )
        .into())
    })
    .with_source()
    .with_info();

    FieldDefinition::new("friends", TypeRef::list(TypeRef::interface("Character")))
        .description("The friends of the character")
        .resolver(resolver)
}

fn character_fields(def: TypeDefinition) -> TypeDefinition {
    def.field(FieldDefinition::new("id", ScalarMarker::Id).description("The id of the character"))
        .field(
            FieldDefinition::new("name", ScalarMarker::String)
                .optional()
                .description("The name of the character"),
        )
        .field(friends())
        .field(FieldDefinition::new(
            "appears_in",
            TypeRef::list(TypeRef::enumeration("Episode")),
        ))
}

fn query() -> TypeDefinition {
    let hero = ResolverDefinition::new("hero", |args| {
        let db = args
            .info()
            .and_then(|i| i.context::<Database>())
            .ok_or("Missing database")?;
        let id = match args.get("episode").and_then(Value::as_enum_member) {
            Some(e) if e.name.as_str() == "EMPIRE" => "1000",
            _ => "2001",
        };
        Ok(db.get(id).unwrap_or_default().into())
    })
    .with_info();

    let human = ResolverDefinition::new("human", |args| {
        let db = args
            .info()
            .and_then(|i| i.context::<Database>())
            .ok_or("Missing database")?;
        let id = args
            .get("id")
            .and_then(Value::as_string_value)
            .ok_or("Missing id")?;
        Ok(db.get(id).unwrap_or_default().into())
    })
    .with_info();

    let search = ResolverDefinition::new("search", |args| {
        let db = args
            .info()
            .and_then(|i| i.context::<Database>())
            .ok_or("Missing database")?;
        let text = args
            .get("text")
            .and_then(Value::as_string_value)
            .unwrap_or_default();
        let found = ["1000", "1001", "2001"]
            .into_iter()
            .filter_map(|id| db.get(id))
            .filter(|c| {
                c.as_object_value()
                    .and_then(|o| o.get_field_value("name"))
                    .and_then(Value::as_string_value)
                    .is_some_and(|n| n.contains(text))
            })
            .collect();
        Ok(Value::list(found).into())
    })
    .with_info();

    TypeDefinition::object("Query", Origin::of::<Query>())
        .description("The root query object of the schema")
        .field(
            FieldDefinition::new("hero", TypeRef::interface("Character"))
                .optional()
                .argument(
                    ArgumentDefinition::new("episode", TypeRef::enumeration("Episode"))
                        .optional()
                        .description(
                            "If omitted, returns the hero of the whole saga. If provided, \
                             returns the hero of that particular episode",
                        ),
                )
                .resolver(hero),
        )
        .field(
            FieldDefinition::new("human", TypeRef::object("Human"))
                .optional()
                .argument(
                    ArgumentDefinition::new("id", ScalarMarker::Id).description("id of the human"),
                )
                .resolver(human),
        )
        .field(
            FieldDefinition::new(
                "search",
                TypeRef::list(TypeRef::non_null(TypeRef::union("SearchResult"))),
            )
            .argument(ArgumentDefinition::new("text", ScalarMarker::String))
            .resolver(search),
        )
}

fn subscription() -> TypeDefinition {
    let human_updates = ResolverDefinition::new("human_updates", |args| {
        let db = args
            .info()
            .and_then(|i| i.context::<Database>())
            .ok_or("Missing database")?;
        Ok(Resolution::stream(stream::iter(db.humans().into_iter().map(Ok))))
    })
    .with_info();

    TypeDefinition::object("Subscription", Origin::of::<Subscription>()).field(
        FieldDefinition::new("human_updates", TypeRef::object("Human"))
            .subscription()
            .resolver(human_updates),
    )
}

pub fn definitions() -> Definitions {
    let episode = EnumDefinition::new("Episode")
        .description("One of the films in the Star Wars Trilogy")
        .value("NEW_HOPE", 4)
        .value("EMPIRE", 5)
        .value("JEDI", 6);

    let character = character_fields(
        TypeDefinition::interface("Character", Origin::of::<Character>())
            .description("A character in the Star Wars Trilogy"),
    );
    let human = character_fields(
        TypeDefinition::object("Human", Origin::of::<Human>())
            .description("A humanoid creature in the Star Wars universe.")
            .implements("Character"),
    )
    .field(FieldDefinition::new("home_planet", ScalarMarker::String).optional());
    let droid = character_fields(
        TypeDefinition::object("Droid", Origin::of::<Droid>())
            .description("A mechanical creature in the Star Wars universe.")
            .implements("Character"),
    )
    .field(FieldDefinition::new("primary_function", ScalarMarker::String).optional());

    let mut defs = Definitions::new();
    for def in [character, human, droid, query(), subscription()] {
        defs.insert(def).expect("unique type names");
    }
    defs.insert(episode).expect("unique type names");
    defs.insert(UnionDefinition::new("SearchResult", ["Human", "Droid"]))
        .expect("unique type names");
    defs
}

pub fn schema() -> SchemaType {
    SchemaBuilder::new(definitions(), "Query")
        .subscription("Subscription")
        .build()
        .expect("valid schema")
}
