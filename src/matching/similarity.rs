use strsim::normalized_levenshtein;

/// Token-order-insensitive similarity between two normalized names, 0-100
///
/// Tokens are sorted alphabetically before comparison so "martin juan" and
/// "juan martin" score 100.
pub fn token_sort_ratio(a: &str, b: &str) -> f64 {
    normalized_levenshtein(&sort_tokens(a), &sort_tokens(b)) * 100.0
}

fn sort_tokens(text: &str) -> String {
    let mut tokens: Vec<&str> = text.split_whitespace().collect();
    tokens.sort_unstable();
    tokens.join(" ")
}
