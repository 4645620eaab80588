use serde::{Deserialize, Serialize};

/// Store-assigned row identity. Zero means "not yet persisted".
pub type Id = i32;

/// Generic list envelope used by the search endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListResponse<T> {
    pub items: Vec<T>,
    pub total: usize,
}

impl<T> ListResponse<T> {
    pub fn new(items: Vec<T>) -> Self {
        let total = items.len();
        Self { items, total }
    }
}

/// Match `input` against a set of variant names, ignoring ASCII case.
pub(crate) fn parse_variant<T: Copy>(input: &str, variants: &[(&str, T)]) -> Option<T> {
    let input = input.trim();
    variants
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(input))
        .map(|(_, value)| *value)
}
