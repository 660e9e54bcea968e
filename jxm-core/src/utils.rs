//! Shared string utilities for component naming.

/// Split a name into its alphanumeric words.
///
/// Any non-alphanumeric character is a boundary, so kebab, snake, dotted and
/// colon-prefixed names all split the same way.
pub fn split_words(s: &str) -> Vec<&str> {
    s.split(|c: char| !c.is_alphanumeric())
        .filter(|part| !part.is_empty())
        .collect()
}

/// Convert a string to PascalCase (e.g., "my-button" -> "MyButton")
///
/// Only the first letter of each word is touched, so names that are already
/// PascalCase come back unchanged.
pub fn to_pascal_case(s: &str) -> String {
    split_words(s)
        .into_iter()
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                None => String::new(),
                Some(c) => c.to_uppercase().chain(chars).collect(),
            }
        })
        .collect()
}

/// Normalize a component name for separator-insensitive matching
/// (e.g., "foo.lorem-ipsum.Bar" -> "foo.loremipsum.bar")
pub fn normalize_name(s: &str) -> String {
    s.chars()
        .filter(|c| *c != '-' && *c != '_')
        .flat_map(char::to_lowercase)
        .collect()
}
