use std::sync::Arc;

use arcstr::ArcStr;
use fnv::FnvHashSet;

use crate::{
    SchemaError,
    config::SchemaConfig,
    definition::{
        ArgumentDefinition, DefaultValue, DefinitionKind, Definitions, DirectiveDefinition,
        ScalarMarker, TypeRef,
    },
    value::Value,
};

use super::{
    convert::Converter,
    model::{DirectiveLocation, SchemaType},
    scalars::{BuiltinScalars, ScalarResolver},
};

/// Assembles a [`SchemaType`] out of [`Definitions`].
///
/// ```rust
/// use juniper_dynamic::{
///     Definitions, FieldDefinition, Origin, ScalarMarker, SchemaBuilder, TypeDefinition,
/// };
///
/// struct Query;
///
/// let definitions = Definitions::new()
///     .with(
///         TypeDefinition::object("Query", Origin::of::<Query>())
///             .field(FieldDefinition::new("hello", ScalarMarker::String)),
///     )
///     .unwrap();
///
/// let schema = SchemaBuilder::new(definitions, "Query").build().unwrap();
///
/// assert_eq!(schema.query_type().name().as_str(), "Query");
/// ```
#[derive(derive_more::Debug)]
pub struct SchemaBuilder {
    definitions: Definitions,
    config: SchemaConfig,
    #[debug(skip)]
    scalars: Box<dyn ScalarResolver>,
    query: ArcStr,
    mutation: Option<ArcStr>,
    subscription: Option<ArcStr>,
    directives: Vec<DirectiveDefinition>,
    types: Vec<TypeRef>,
}

impl SchemaBuilder {
    /// Creates a new [`SchemaBuilder`] of the given `definitions`, rooted at
    /// the `query` object type.
    pub fn new(definitions: Definitions, query: impl Into<ArcStr>) -> Self {
        Self {
            definitions,
            config: SchemaConfig::default(),
            scalars: Box::new(BuiltinScalars),
            query: query.into(),
            mutation: None,
            subscription: None,
            directives: vec![],
            types: vec![],
        }
    }

    /// Sets the [`SchemaConfig`] to build with.
    #[must_use]
    pub fn config(mut self, config: SchemaConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the [`ScalarResolver`] to build with.
    #[must_use]
    pub fn scalars(mut self, scalars: impl ScalarResolver + 'static) -> Self {
        self.scalars = Box::new(scalars);
        self
    }

    /// Sets the root mutation object type.
    #[must_use]
    pub fn mutation(mut self, name: impl Into<ArcStr>) -> Self {
        self.mutation = Some(name.into());
        self
    }

    /// Sets the root subscription object type.
    #[must_use]
    pub fn subscription(mut self, name: impl Into<ArcStr>) -> Self {
        self.subscription = Some(name.into());
        self
    }

    /// Adds a custom `directive`.
    #[must_use]
    pub fn directive(mut self, directive: DirectiveDefinition) -> Self {
        self.directives.push(directive);
        self
    }

    /// Adds types to include into the schema even if unreachable from its
    /// roots, like implementors of an interface never referred to directly.
    #[must_use]
    pub fn types(mut self, types: impl IntoIterator<Item = TypeRef>) -> Self {
        self.types.extend(types);
        self
    }

    /// Builds the [`SchemaType`].
    ///
    /// # Errors
    ///
    /// If any definition fails to convert, or any root isn't an object type.
    pub fn build(self) -> Result<SchemaType, SchemaError> {
        let Self {
            definitions,
            config,
            scalars,
            query,
            mutation,
            subscription,
            directives,
            types,
        } = self;

        let span = tracing::debug_span!("build_schema", %query);
        let _guard = span.enter();

        let mut converter = Converter::new(Arc::new(definitions), config, &*scalars);
        let definitions = converter.definitions().clone();
        for root in [Some(&query), mutation.as_ref(), subscription.as_ref()]
            .into_iter()
            .flatten()
        {
            let is_object = definitions
                .type_definition(root)
                .is_some_and(|d| d.kind == DefinitionKind::Object);
            if !is_object {
                return Err(SchemaError::RootNotObject { name: root.clone() });
            }
            converter.convert(&TypeRef::Object(root.clone()))?;
        }
        for t in &types {
            converter.convert(t)?;
        }
        let mut seen = FnvHashSet::default();
        let directives = specified_directives()
            .iter()
            .chain(&directives)
            .map(|d| {
                if !seen.insert(d.name.clone()) {
                    return Err(SchemaError::DuplicateDirectiveName {
                        name: d.name.clone(),
                    });
                }
                converter.convert_directive(d)
            })
            .collect::<Result<Vec<_>, _>>()?;

        let registry = converter.into_registry();
        tracing::debug!(
            types = registry.len(),
            directives = directives.len(),
            "built schema",
        );
        SchemaType::new(
            registry.into_nodes(),
            &query,
            mutation.as_deref(),
            subscription.as_deref(),
            directives,
        )
    }
}

/// Directives every schema supports.
fn specified_directives() -> [DirectiveDefinition; 4] {
    use DirectiveLocation as L;

    let condition = |description: &str| {
        ArgumentDefinition::new("if", ScalarMarker::Boolean).description(description)
    };
    [
        DirectiveDefinition::new("include", [L::Field, L::FragmentSpread, L::InlineFragment])
            .description(
                "Directs the executor to include this field or fragment only when the `if` \
                 argument is true.",
            )
            .argument(condition("Included when true.")),
        DirectiveDefinition::new("skip", [L::Field, L::FragmentSpread, L::InlineFragment])
            .description(
                "Directs the executor to skip this field or fragment when the `if` argument is \
                 true.",
            )
            .argument(condition("Skipped when true.")),
        DirectiveDefinition::new(
            "deprecated",
            [
                L::FieldDefinition,
                L::ArgumentDefinition,
                L::InputFieldDefinition,
                L::EnumValue,
            ],
        )
        .description("Marks an element of a GraphQL schema as no longer supported.")
        .argument(
            ArgumentDefinition::new("reason", ScalarMarker::String)
                .optional()
                .default_value(DefaultValue::Value(Value::scalar("No longer supported"))),
        ),
        DirectiveDefinition::new("specifiedBy", [L::Scalar])
            .description("Exposes a URL that specifies the behavior of this scalar.")
            .argument(
                ArgumentDefinition::new("url", ScalarMarker::String)
                    .description("The URL that specifies the behavior of this scalar."),
            ),
    ]
}
