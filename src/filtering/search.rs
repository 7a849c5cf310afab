use crate::schema::FieldSchema;

/// Escape LIKE wildcards so user input always matches literally.
/// Escapes: `\` (the escape character itself), `%` (match any) and `_` (match single char)
#[must_use]
pub fn escape_like_wildcards(input: &str) -> String {
    input
        .replace('\\', "\\\\") // Escape backslash first
        .replace('%', "\\%")
        .replace('_', "\\_")
}

/// `LIKE` pattern matching `term` anywhere in a value, escaped with `\`.
///
/// Case is left alone. Compare as `UPPER(column) LIKE UPPER(pattern) ESCAPE '\'` so
/// the database folds both sides with the same rules.
#[must_use]
pub fn like_pattern(term: &str) -> String {
    format!("%{}%", escape_like_wildcards(term))
}

/// A free-text search over a resource's searchable fields.
///
/// `term` is kept literal. Each store adapter escapes it for its own matcher
/// (see [`SearchClause::like_pattern`] for SQL `LIKE`), so pattern syntax in user
/// input is never interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchClause {
    term: String,
    fields: &'static [&'static str],
}

impl SearchClause {
    #[must_use]
    pub fn term(&self) -> &str {
        &self.term
    }

    /// Fields the term is matched against; a record matches if any of them contains it
    #[must_use]
    pub const fn fields(&self) -> &'static [&'static str] {
        self.fields
    }

    #[must_use]
    pub fn like_pattern(&self) -> String {
        like_pattern(&self.term)
    }
}

/// Build a search clause from a raw `search` value.
///
/// Returns `None` for an empty or whitespace-only term. Terms longer than
/// `max_length` characters are truncated.
#[must_use]
pub fn build_search_clause(
    term: &str,
    schema: &FieldSchema,
    max_length: usize,
) -> Option<SearchClause> {
    let truncated: String = term.trim().chars().take(max_length).collect();
    let term = truncated.trim();
    if term.is_empty() {
        return None;
    }

    Some(SearchClause {
        term: term.to_string(),
        fields: schema.searchable_fields(),
    })
}
