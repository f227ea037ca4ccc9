//! Project-name sanitization for database and display naming.

/// Sanitize an arbitrary string into a lowercase identifier-safe token.
///
/// Every character outside `[A-Za-z0-9]` is replaced with exactly one `_`;
/// runs are deliberately not collapsed, so `"a & b"` becomes `"a___b"`.
pub fn sanitize_project_name(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '_' })
        .collect()
}

/// Turn a sanitized token into a display name: underscores become spaces and
/// each word is capitalized (`my_project` -> `My Project`).
pub fn title_case_project_name(token: &str) -> String {
    token
        .split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
