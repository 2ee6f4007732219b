use futures::{StreamExt as _, TryStreamExt as _, stream};
use pretty_assertions::assert_eq;

use crate::{
    Arguments, Context, Definitions, FieldDefinition, FieldError, Origin, Resolution, ResolveInfo,
    ResolverDefinition, ScalarMarker, SchemaBuilder, SchemaType, TypeDefinition, Value,
    resolve::OperationType,
};

use super::fixtures::starwars::{self, Database};

struct Subscription;
struct Query;

fn counter_schema(events: Vec<Result<i32, &'static str>>) -> SchemaType {
    let counter = ResolverDefinition::new("counter", move |_| {
        let events = events.clone();
        Ok(Resolution::stream(stream::iter(events.into_iter().map(
            |e| e.map(Value::scalar).map_err(FieldError::from),
        ))))
    });
    let defs = Definitions::new()
        .with(
            TypeDefinition::object("Query", Origin::of::<Query>())
                .field(FieldDefinition::new("version", ScalarMarker::Int)),
        )
        .and_then(|d| {
            d.with(
                TypeDefinition::object("Subscription", Origin::of::<Subscription>()).field(
                    FieldDefinition::new("counter", ScalarMarker::Int)
                        .subscription()
                        .resolver(counter),
                ),
            )
        })
        .unwrap();
    SchemaBuilder::new(defs, "Query")
        .subscription("Subscription")
        .build()
        .unwrap()
}

fn subscribe(schema: &SchemaType, name: &str, info: &ResolveInfo) -> Resolution {
    schema
        .subscription_type()
        .and_then(|t| t.field_by_name(name))
        .and_then(|f| f.subscribe.as_ref())
        .unwrap_or_else(|| panic!("no subscription field `{name}`"))
        .resolve(&Value::Null, info, &Arguments::new())
        .unwrap()
}

#[tokio::test]
async fn passes_events_through() {
    let schema = counter_schema(vec![Ok(1), Ok(2), Ok(3)]);
    let info = ResolveInfo::new("counter", OperationType::Subscription);

    let events = subscribe(&schema, "counter", &info)
        .into_stream()
        .unwrap()
        .try_collect::<Vec<_>>()
        .await;

    assert_eq!(
        events,
        Ok(vec![Value::scalar(1), Value::scalar(2), Value::scalar(3)]),
    );
}

#[tokio::test]
async fn resolves_streamed_events_in_order() {
    let schema = counter_schema(vec![Ok(1), Ok(2), Ok(3)]);
    let info = ResolveInfo::new("counter", OperationType::Subscription);
    let field = schema
        .subscription_type()
        .and_then(|t| t.field_by_name("counter"))
        .unwrap();

    let resolved = subscribe(&schema, "counter", &info)
        .into_stream()
        .unwrap()
        .map(|event| {
            let event = event?;
            let resolution = field.resolve.resolve(&event, &info, &Arguments::new())?;
            Ok::<_, FieldError>(resolution.as_value().cloned())
        })
        .try_collect::<Vec<_>>()
        .await;

    assert_eq!(
        resolved,
        Ok(vec![
            Some(Value::scalar(1)),
            Some(Value::scalar(2)),
            Some(Value::scalar(3)),
        ]),
    );
}

#[tokio::test]
async fn keeps_failed_events_in_stream() {
    let schema = counter_schema(vec![Ok(1), Err("Counter overflow"), Ok(3)]);
    let info = ResolveInfo::new("counter", OperationType::Subscription);

    let events = subscribe(&schema, "counter", &info)
        .into_stream()
        .unwrap()
        .map(|e| e.map_err(|e| e.message().to_owned()))
        .collect::<Vec<_>>()
        .await;

    assert_eq!(
        events,
        [
            Ok(Value::scalar(1)),
            Err("Counter overflow".to_owned()),
            Ok(Value::scalar(3)),
        ],
    );
}

#[tokio::test]
async fn streams_events_from_context() {
    let schema = starwars::schema();
    let db = Database::new();
    let info = ResolveInfo::new("humanUpdates", OperationType::Subscription)
        .context(Context::new(Database::new()));

    let events = subscribe(&schema, "humanUpdates", &info)
        .into_stream()
        .unwrap()
        .try_collect::<Vec<_>>()
        .await
        .unwrap();

    assert_eq!(events, db.humans());

    let field = schema
        .subscription_type()
        .and_then(|t| t.field_by_name("humanUpdates"))
        .unwrap();
    for event in &events {
        let resolved = field.resolve.resolve(event, &info, &Arguments::new()).unwrap();
        assert_eq!(resolved.as_value(), Some(event));
    }
}
