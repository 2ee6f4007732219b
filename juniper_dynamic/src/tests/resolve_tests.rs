use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use pretty_assertions::assert_eq;

use crate::{
    ArgumentDefinition, Arguments, Context, Definitions, FieldDefinition, FieldError, FieldResult,
    Info, Object, Origin, Permission, Resolution, ResolveInfo, ResolverDefinition, ScalarMarker,
    SchemaBuilder, SchemaType, TypeDefinition, TypeRef, Value,
    meta::Field,
    resolve::{OperationType, PERMISSION_DENIED},
};

use super::fixtures::starwars::{self, Database};

struct Query;

fn field<'s>(schema: &'s SchemaType, type_name: &str, field_name: &str) -> &'s Field {
    schema
        .type_by_name(type_name)
        .and_then(|t| t.field_by_name(field_name))
        .unwrap_or_else(|| panic!("no field `{type_name}.{field_name}`"))
}

fn info(field_name: &str) -> ResolveInfo {
    ResolveInfo::new(field_name, OperationType::Query).context(Context::new(Database::new()))
}

fn query_schema(field: FieldDefinition) -> SchemaType {
    let defs = Definitions::new()
        .with(TypeDefinition::object("Query", Origin::of::<Query>()).field(field))
        .unwrap();
    SchemaBuilder::new(defs, "Query").build().unwrap()
}

fn resolve(schema: &SchemaType, name: &str, args: &Arguments) -> FieldResult<Resolution> {
    field(schema, "Query", name).resolve.resolve(
        &Value::Null,
        &ResolveInfo::new(name, OperationType::Query),
        args,
    )
}

struct AdminsOnly;

impl Permission for AdminsOnly {
    fn has_permission(&self, _: &Value, _: &Info, _: &Arguments) -> bool {
        false
    }

    fn message(&self) -> Option<&str> {
        Some("Admins only")
    }
}

#[test]
fn reads_declared_name_off_source() {
    let schema = starwars::schema();
    let home_planet = field(&schema, "Human", "homePlanet");
    let luke = Database::new().get("1000").unwrap();

    assert!(home_planet.resolve.is_default());
    let resolved = home_planet
        .resolve
        .resolve(&luke, &info("homePlanet"), &Arguments::new())
        .unwrap();
    assert_eq!(resolved.as_value(), Some(&Value::scalar("Tatooine")));
}

#[test]
fn fails_reading_fields_off_non_objects() {
    let schema = starwars::schema();
    let home_planet = field(&schema, "Human", "homePlanet");

    let err = home_planet
        .resolve
        .resolve(&Value::scalar(1), &info("homePlanet"), &Arguments::new())
        .unwrap_err();
    assert_eq!(
        err.message(),
        "Cannot read field `home_planet` of non-object value: 1",
    );

    let err = home_planet
        .resolve
        .resolve(&Object::default().into(), &info("homePlanet"), &Arguments::new())
        .unwrap_err();
    assert_eq!(err.message(), "Object has no field `home_planet`");
}

#[test]
fn resolves_with_request_context() {
    let schema = starwars::schema();
    let hero = field(&schema, "Query", "hero");
    let db = Database::new();

    assert!(!hero.resolve.is_default());
    let empire = hero
        .resolve
        .resolve(
            &Value::Null,
            &info("hero"),
            &Arguments::new().arg("episode", "EMPIRE"),
        )
        .unwrap();
    assert_eq!(empire.as_value(), db.get("1000").as_ref());

    let saga = hero
        .resolve
        .resolve(&Value::Null, &info("hero"), &Arguments::new())
        .unwrap();
    assert_eq!(saga.as_value(), db.get("2001").as_ref());

    let err = hero
        .resolve
        .resolve(
            &Value::Null,
            &ResolveInfo::new("hero", OperationType::Query),
            &Arguments::new(),
        )
        .unwrap_err();
    assert_eq!(err.message(), "Missing database");
}

#[test]
fn rejects_unknown_enum_arguments() {
    let schema = starwars::schema();
    let hero = field(&schema, "Query", "hero");

    let err = hero
        .resolve
        .resolve(
            &Value::Null,
            &info("hero"),
            &Arguments::new().arg("episode", "PHANTOM_MENACE"),
        )
        .unwrap_err();
    assert_eq!(err.message(), "Enum `Episode` has no member `PHANTOM_MENACE`");
}

#[test]
fn passes_source_to_resolvers() {
    let schema = starwars::schema();
    let friends = field(&schema, "Human", "friends");
    let db = Database::new();
    let luke = db.get("1000").unwrap();

    let resolved = friends
        .resolve
        .resolve(&luke, &info("friends"), &Arguments::new())
        .unwrap();
    assert_eq!(
        resolved.as_value(),
        Some(&Value::list(vec![
            db.get("1001").unwrap(),
            db.get("2001").unwrap(),
        ])),
    );
}

#[test]
fn binds_source_root_and_info() {
    let echo = ResolverDefinition::new("echo", |args| {
        let info = args.info().ok_or("Missing info")?;
        Ok(Value::from(
            Object::default()
                .field("source", args.source().cloned().unwrap_or_default())
                .field("root", args.root().cloned().unwrap_or_default())
                .field("max_length", args.get("max_length").cloned().unwrap_or_default())
                .field("field_name", info.field_name.as_str())
                .field("return_type", info.return_type.to_string()),
        )
        .into())
    })
    .with_source()
    .with_root()
    .with_info();
    let schema = query_schema(
        FieldDefinition::new("echo", ScalarMarker::String)
            .argument(ArgumentDefinition::new("max_length", ScalarMarker::Int).optional())
            .resolver(echo),
    );
    let source = Value::from(Object::default().field("id", "1"));

    let resolved = field(&schema, "Query", "echo")
        .resolve
        .resolve(
            &source,
            &ResolveInfo::new("echo", OperationType::Query),
            &Arguments::new().arg("maxLength", 3),
        )
        .unwrap();

    assert_eq!(
        resolved.as_value(),
        Some(&Value::from(
            Object::default()
                .field("source", source.clone())
                .field("root", source.clone())
                .field("max_length", 3)
                .field("field_name", "echo")
                .field("return_type", "scalar String"),
        )),
    );
}

#[test]
fn binds_only_what_resolvers_ask_for() {
    let seen = ResolverDefinition::new("seen", |args| {
        Ok(Value::list(vec![
            args.source().is_some().into(),
            args.root().is_some().into(),
            args.info().is_some().into(),
            Value::scalar(args.keywords.len() as i32),
        ])
        .into())
    });
    let schema = query_schema(
        FieldDefinition::new("seen", TypeRef::list(ScalarMarker::Boolean.into()))
            .argument(ArgumentDefinition::new("limit", ScalarMarker::Int).optional())
            .resolver(seen),
    );

    let resolved = resolve(&schema, "seen", &Arguments::new()).unwrap();

    assert_eq!(
        resolved.as_value(),
        Some(&Value::list(vec![
            false.into(),
            false.into(),
            false.into(),
            Value::scalar(0),
        ])),
    );
}

#[test]
fn propagates_resolver_errors() {
    let schema = query_schema(
        FieldDefinition::new("broken", ScalarMarker::String).resolver(ResolverDefinition::new(
            "broken",
            |_| Err(FieldError::from("Database is down")),
        )),
    );

    let err = resolve(&schema, "broken", &Arguments::new()).unwrap_err();

    assert_eq!(err.message(), "Database is down");
}

#[test]
fn stops_at_first_denied_permission() {
    let checked = Arc::new(AtomicUsize::new(0));
    let resolved = Arc::new(AtomicUsize::new(0));
    let check = |allow: bool| {
        let checked = checked.clone();
        move |_: &Value, _: &Info, _: &Arguments| {
            checked.fetch_add(1, Ordering::SeqCst);
            allow
        }
    };
    let resolver = {
        let resolved = resolved.clone();
        ResolverDefinition::new("secret", move |_| {
            resolved.fetch_add(1, Ordering::SeqCst);
            Ok(Value::scalar("hidden").into())
        })
    };
    let schema = query_schema(
        FieldDefinition::new("secret", ScalarMarker::String)
            .permission(check(true))
            .permission(check(false))
            .permission(check(true))
            .resolver(resolver),
    );

    let err = resolve(&schema, "secret", &Arguments::new()).unwrap_err();

    assert_eq!(err.message(), PERMISSION_DENIED);
    assert_eq!(checked.load(Ordering::SeqCst), 2);
    assert_eq!(resolved.load(Ordering::SeqCst), 0);
}

#[test]
fn reports_permission_message() {
    let schema = query_schema(
        FieldDefinition::new("secret", ScalarMarker::String)
            .optional()
            .permission(AdminsOnly),
    );

    let err = resolve(&schema, "secret", &Arguments::new()).unwrap_err();

    assert_eq!(err.message(), "Admins only");
}

#[test]
fn passes_raw_arguments_to_permissions() {
    let schema = query_schema(
        FieldDefinition::new("secret", ScalarMarker::String)
            .argument(ArgumentDefinition::new("token", ScalarMarker::String))
            .permission(|_: &Value, info: &Info, args: &Arguments| {
                info.field_name.as_str() == "secret"
                    && args.get("token") == Some(&Value::scalar("letmein"))
            })
            .resolver(ResolverDefinition::new("secret", |_| {
                Ok(Value::scalar("hidden").into())
            })),
    );

    let granted = resolve(
        &schema,
        "secret",
        &Arguments::new().arg("token", "letmein"),
    )
    .unwrap();
    assert_eq!(granted.as_value(), Some(&Value::scalar("hidden")));

    let denied = resolve(&schema, "secret", &Arguments::new().arg("token", "guess"));
    assert_eq!(denied.unwrap_err().message(), PERMISSION_DENIED);
}

#[tokio::test]
async fn awaits_deferred_results() {
    let schema = query_schema(FieldDefinition::new("slow", ScalarMarker::Int).resolver(
        ResolverDefinition::new("slow", |_| {
            Ok(Resolution::deferred(async { Ok::<_, FieldError>(Value::scalar(42)) }))
        }),
    ));

    let resolution = resolve(&schema, "slow", &Arguments::new()).unwrap();

    assert!(resolution.as_value().is_none());
    assert_eq!(resolution.into_value().await, Ok(Value::scalar(42)));
}

#[tokio::test]
async fn propagates_deferred_errors() {
    let schema = query_schema(FieldDefinition::new("slow", ScalarMarker::Int).resolver(
        ResolverDefinition::new("slow", |_| {
            Ok(Resolution::deferred(async {
                Err::<Value, _>(FieldError::from("Timed out"))
            }))
        }),
    ));

    let resolution = resolve(&schema, "slow", &Arguments::new()).unwrap();

    assert_eq!(
        resolution.into_value().await.unwrap_err().message(),
        "Timed out",
    );
}
