use std::fmt;

use arcstr::ArcStr;

/// Reference to a registered type, with its list and non-null wrappers.
///
/// Non-null-ness is a property of a named or list type rather than a wrapper
/// of its own, so a doubly non-null type is unrepresentable.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Type {
    /// A nullable named type, e.g. `String`
    Named(ArcStr),
    /// A non-null named type, e.g. `String!`
    NonNullNamed(ArcStr),
    /// A nullable list type, e.g. `[String]`
    ///
    /// The list itself is what's nullable, the containing type might be non-null.
    List(Box<Type>),
    /// A non-null list type, e.g. `[String]!`.
    ///
    /// The list itself is what's non-null, the containing type might be null.
    NonNullList(Box<Type>),
}

impl Type {
    /// Nullable named type.
    pub fn named(name: impl Into<ArcStr>) -> Self {
        Self::Named(name.into())
    }

    /// Nullable list of `of_type`.
    pub fn list(of_type: Self) -> Self {
        Self::List(Box::new(of_type))
    }

    /// Get the name of a named type.
    ///
    /// Only applies to named types; lists will return `None`.
    pub fn name(&self) -> Option<&ArcStr> {
        match self {
            Self::Named(n) | Self::NonNullNamed(n) => Some(n),
            Self::List(_) | Self::NonNullList(_) => None,
        }
    }

    /// Get the innermost name by unpacking lists
    ///
    /// All type literals contain exactly one named type.
    pub fn innermost_name(&self) -> &ArcStr {
        match self {
            Self::Named(n) | Self::NonNullNamed(n) => n,
            Self::List(l) | Self::NonNullList(l) => l.innermost_name(),
        }
    }

    /// Determines if a type only can represent non-null values.
    pub fn is_non_null(&self) -> bool {
        matches!(self, Self::NonNullNamed(_) | Self::NonNullList(_))
    }

    /// Determines if this is a list type, nullable or not.
    pub fn is_list(&self) -> bool {
        matches!(self, Self::List(_) | Self::NonNullList(_))
    }

    /// Returns the list element type, if this is a list type.
    pub fn of_type(&self) -> Option<&Self> {
        match self {
            Self::List(t) | Self::NonNullList(t) => Some(t),
            Self::Named(_) | Self::NonNullNamed(_) => None,
        }
    }

    /// Makes this type non-null, leaving already non-null types as they are.
    #[must_use]
    pub fn into_non_null(self) -> Self {
        match self {
            Self::Named(n) => Self::NonNullNamed(n),
            Self::List(t) => Self::NonNullList(t),
            t @ (Self::NonNullNamed(_) | Self::NonNullList(_)) => t,
        }
    }

    /// Strips the non-null-ness of this type, if any.
    #[must_use]
    pub fn into_nullable(self) -> Self {
        match self {
            Self::NonNullNamed(n) => Self::Named(n),
            Self::NonNullList(t) => Self::List(t),
            t @ (Self::Named(_) | Self::List(_)) => t,
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(n) => write!(f, "{n}"),
            Self::NonNullNamed(n) => write!(f, "{n}!"),
            Self::List(t) => write!(f, "[{t}]"),
            Self::NonNullList(t) => write!(f, "[{t}]!"),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::Type;

    #[test]
    fn wraps_and_unwraps_non_null() {
        let ty = Type::list(Type::named("User").into_non_null());

        let non_null = ty.clone().into_non_null();
        assert_eq!(non_null.to_string(), "[User!]!");
        assert_eq!(non_null.clone().into_non_null(), non_null);
        assert_eq!(non_null.into_nullable(), ty);
    }

    #[test]
    fn finds_innermost_name() {
        let ty = Type::list(Type::list(Type::named("Int")).into_non_null());

        assert_eq!(ty.innermost_name().as_str(), "Int");
        assert_eq!(ty.name(), None);
        assert!(ty.is_list());
        assert!(!ty.is_non_null());
    }
}
