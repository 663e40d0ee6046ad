use serde::Serialize;

/// One ranked completion returned by the search endpoint.
///
/// Fields hold the raw decoded text so that degraded payloads (missing or
/// non-numeric values) flow through to the renderer unchanged. Numeric
/// interpretation of `percentage` happens only where a policy needs it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CompletionItem {
    pub completion: String,
    pub doclength: String,
    pub percentage: String,
}

impl CompletionItem {
    pub fn new(
        completion: impl Into<String>,
        doclength: impl Into<String>,
        percentage: impl Into<String>,
    ) -> Self {
        Self {
            completion: completion.into(),
            doclength: doclength.into(),
            percentage: percentage.into(),
        }
    }

    /// Concatenated text of all three fields, mirroring the full text content
    /// of a result item. Used by the inline-list presentation.
    pub fn full_text(&self) -> String {
        format!("{}{}{}", self.completion, self.doclength, self.percentage)
    }
}

/// Ordered sequence of completions, preserving server response order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ResultSet {
    items: Vec<CompletionItem>,
}

impl ResultSet {
    pub fn new(items: Vec<CompletionItem>) -> Self {
        Self { items }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CompletionItem> {
        self.items.iter()
    }

    pub fn items(&self) -> &[CompletionItem] {
        &self.items
    }
}

impl From<Vec<CompletionItem>> for ResultSet {
    fn from(items: Vec<CompletionItem>) -> Self {
        Self::new(items)
    }
}

impl<'a> IntoIterator for &'a ResultSet {
    type Item = &'a CompletionItem;
    type IntoIter = std::slice::Iter<'a, CompletionItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
