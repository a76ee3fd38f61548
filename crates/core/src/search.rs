//! Free-text search helpers for admin listings.
//!
//! Search is a case-insensitive substring match over a fixed set of text
//! fields. The SQL side uses `ILIKE` with an escaped pattern; the helpers
//! here produce that pattern and mirror the match in memory.

/// Longest search term accepted; longer input is truncated.
pub const MAX_SEARCH_TERM_LEN: usize = 100;

/// Trim a raw search parameter, treating blank input as "no search".
///
/// ```
/// use flamingo_core::search::normalize_search_term;
/// assert_eq!(normalize_search_term(Some("  salmon ")), Some("salmon".to_string()));
/// assert_eq!(normalize_search_term(Some("   ")), None);
/// assert_eq!(normalize_search_term(None), None);
/// ```
pub fn normalize_search_term(raw: Option<&str>) -> Option<String> {
    let trimmed = raw?.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed.chars().take(MAX_SEARCH_TERM_LEN).collect())
}

/// Escape `%`, `_` and `\` so the term matches literally inside `LIKE`.
pub fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Build a `%term%` pattern for `ILIKE ... ESCAPE '\'`.
pub fn contains_pattern(term: &str) -> String {
    format!("%{}%", escape_like(term))
}

/// In-memory equivalent of the `ILIKE` search over the given fields.
pub fn matches_search<'a>(term: &str, fields: impl IntoIterator<Item = Option<&'a str>>) -> bool {
    let needle = term.to_lowercase();
    fields
        .into_iter()
        .flatten()
        .any(|field| field.to_lowercase().contains(&needle))
}
