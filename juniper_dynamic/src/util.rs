use std::borrow::Cow;

/// Converts a `snake_case` declared name into the `camelCase` exposed one.
///
/// A leading `_` is dropped, so the `_var` convention for unused variables
/// doesn't leak into the schema.
pub fn to_camel_case(s: &str) -> Cow<'_, str> {
    let s = s.strip_prefix('_').unwrap_or(s);
    if !s.contains('_') {
        return Cow::Borrowed(s);
    }

    let mut dest = String::with_capacity(s.len());
    for (i, part) in s.split('_').enumerate() {
        if i == 0 {
            dest.push_str(part);
            continue;
        }
        let mut chars = part.chars();
        if let Some(first) = chars.next() {
            dest.extend(first.to_uppercase());
            dest.push_str(chars.as_str());
        }
    }
    Cow::Owned(dest)
}

/// Checks whether the `input` matches `/^[_a-zA-Z][_a-zA-Z0-9]*$/`.
pub fn is_valid_name(input: &str) -> bool {
    let mut chars = input.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::{is_valid_name, to_camel_case};

    #[test]
    fn camel_cases() {
        assert_eq!(&to_camel_case("test")[..], "test");
        assert_eq!(&to_camel_case("_test")[..], "test");
        assert_eq!(&to_camel_case("first_second")[..], "firstSecond");
        assert_eq!(&to_camel_case("first_")[..], "first");
        assert_eq!(&to_camel_case("a_b_c")[..], "aBC");
        assert_eq!(&to_camel_case("a_bc")[..], "aBc");
        assert_eq!(&to_camel_case("a_b")[..], "aB");
        assert_eq!(&to_camel_case("optional_argument")[..], "optionalArgument");
        assert_eq!(&to_camel_case("a")[..], "a");
        assert_eq!(&to_camel_case("")[..], "");
    }

    #[test]
    fn validates_names() {
        assert!(is_valid_name("Foo"));
        assert!(is_valid_name("foo42"));
        assert!(is_valid_name("_Foo"));
        assert!(is_valid_name("_42Foo"));

        assert!(!is_valid_name("42_Foo"));
        assert!(!is_valid_name("Foo-42"));
        assert!(!is_valid_name("Foo???"));
        assert!(!is_valid_name(""));
    }
}
