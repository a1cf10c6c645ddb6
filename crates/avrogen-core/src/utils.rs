/// Convert an Avro enum symbol or snake_case name to PascalCase.
///
/// Words are separated by `_`, `-`, or `.`. Input that already looks like
/// PascalCase (starts uppercase, has lowercase, no separators) is returned
/// unchanged.
///
/// # Examples
/// ```
/// use avrogen_core::utils::to_pascal_case;
/// assert_eq!(to_pascal_case("HEARTS"), "Hearts");
/// assert_eq!(to_pascal_case("two_pair"), "TwoPair");
/// assert_eq!(to_pascal_case("FullHouse"), "FullHouse");
/// ```
pub fn to_pascal_case(s: &str) -> String {
    fn is_separator(c: char) -> bool {
        matches!(c, '_' | '-' | '.')
    }

    let has_separator = s.chars().any(is_separator);
    let has_lowercase = s.chars().any(|c| c.is_ascii_lowercase());
    let starts_uppercase = s.chars().next().is_some_and(|c| c.is_ascii_uppercase());

    if starts_uppercase && has_lowercase && !has_separator {
        return s.to_string();
    }

    let mut result = String::with_capacity(s.len());
    let mut capitalize_next = true;
    for c in s.chars() {
        if is_separator(c) {
            capitalize_next = true;
            continue;
        }
        if capitalize_next {
            result.push(c.to_ascii_uppercase());
            capitalize_next = false;
        } else {
            result.push(c.to_ascii_lowercase());
        }
    }
    result
}

/// Render `s` as a double-quoted JavaScript string literal.
pub fn js_string_literal(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}
