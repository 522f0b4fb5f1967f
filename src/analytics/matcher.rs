// src/analytics/matcher.rs

/// Tokens must be longer than this to count as significant keywords.
const MIN_KEYWORD_LEN: usize = 3;

/// Best-effort fuzzy topic match used by the drill-down.
///
/// Matches on equality, containment in either direction, or enough shared
/// significant keywords. Containment means "Organic Chemistry" matches
/// "Inorganic Chemistry"; callers that need stricter matching must filter
/// the results themselves.
pub fn match_topic(requested: &str, candidate: &str) -> bool {
    let requested = requested.trim().to_lowercase();
    let candidate = candidate.trim().to_lowercase();

    if requested.is_empty() || candidate.is_empty() {
        return false;
    }

    if requested == candidate || requested.contains(&candidate) || candidate.contains(&requested) {
        return true;
    }

    let keywords = significant_tokens(&requested);
    if keywords.is_empty() {
        return false;
    }

    let candidate_tokens = significant_tokens(&candidate);
    let hits = keywords
        .iter()
        .filter(|keyword| {
            candidate_tokens
                .iter()
                .any(|token| token.contains(*keyword) || keyword.contains(*token))
        })
        .count();

    let required = if keywords.len() == 1 { 1 } else { 2 };
    hits >= required
}

fn significant_tokens(text: &str) -> Vec<&str> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|token| token.chars().count() > MIN_KEYWORD_LEN)
        .collect()
}
