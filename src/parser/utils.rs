//! Text helpers shared by the extraction stages

/// Trim and lower-case an utterance before extraction
pub fn normalize_input(input: &str) -> String {
    input.trim().to_lowercase()
}

/// Upper-case the first character of every space-separated word
///
/// Spacing is preserved as-is, and already-capitalized text is unchanged.
pub fn capitalize_words(phrase: &str) -> String {
    phrase
        .split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}
