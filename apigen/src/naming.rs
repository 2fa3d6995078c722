//! Identifier transforms shared by the schema reader and the emitters.

fn title(token: &str) -> String {
    let mut chars = token.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// `user_info` => `UserInfo`. Only the first letter of each token changes.
pub fn camel_case(input: &str) -> String {
    input.split('_').map(|t| title(t.trim())).collect()
}

/// `very_important_person` => `veryImportantPerson`.
pub fn lower_camel_case(input: &str) -> String {
    input
        .split('_')
        .enumerate()
        .map(|(i, t)| {
            let t = t.trim();
            if i == 0 { t.to_string() } else { title(t) }
        })
        .collect()
}

/// `User_Info` => `user-info`, used for URL segments.
pub fn url_style(input: &str) -> String {
    input
        .split('_')
        .map(|t| t.trim().to_lowercase())
        .collect::<Vec<_>>()
        .join("-")
}
