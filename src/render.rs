//! Presentation policies that project a [`ResultSet`] into an HTML fragment.
//!
//! Every policy performs a full rewrite of whatever markup came before it;
//! the sink replaces its container content wholesale on each render.

use crate::error::SearchError;
use crate::results::ResultSet;

const HEADER_CELLS: [&str; 3] = ["word", "document #", "percentage"];
const RESULT_TABLE_ID: &str = "resulttable";
/// Class hook the external client-side sorting widget binds to.
const SORTABLE_CLASS: &str = "tablesorter";

/// Strategy used to turn a result set into displayable markup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RenderPolicy {
    /// Table with a `<thead>` header row and the sorting-widget class hook.
    #[default]
    SortableTable,
    /// Same columns, bare first row as header, no sorting hook.
    PlainTable,
    /// Plain table plus a fourth column of `|` characters sized by the
    /// numeric value of `percentage`.
    BarChartTable,
    /// Comma-joined concatenation of each item's full text content.
    InlineList,
}

impl RenderPolicy {
    pub fn render(&self, results: &ResultSet) -> String {
        match self {
            Self::SortableTable => render_sortable_table(results),
            Self::PlainTable => render_table(results, false),
            Self::BarChartTable => render_table(results, true),
            Self::InlineList => render_inline_list(results),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::SortableTable => "sortable-table",
            Self::PlainTable => "plain-table",
            Self::BarChartTable => "bar-chart",
            Self::InlineList => "inline-list",
        }
    }
}

/// Render a failure as a detectable marker for the result container.
pub fn render_error(error: &SearchError) -> String {
    format!(
        "<div class='search-error' data-kind='{}'>{}</div>",
        error.kind(),
        escape(&error.to_string())
    )
}

fn render_sortable_table(results: &ResultSet) -> String {
    let mut html = format!("<table border='1' id='{RESULT_TABLE_ID}' class='{SORTABLE_CLASS}'>");
    html.push_str("<thead><tr>");
    for cell in HEADER_CELLS {
        html.push_str("<th>");
        html.push_str(cell);
        html.push_str("</th>");
    }
    html.push_str("</tr></thead><tbody>");
    for item in results {
        push_row(&mut html, [&item.completion, &item.doclength, &item.percentage], None);
    }
    html.push_str("</tbody></table>");
    html
}

fn render_table(results: &ResultSet, with_bar: bool) -> String {
    let mut html = String::from("<table border='1'><tr>");
    for cell in HEADER_CELLS {
        html.push_str("<td>");
        html.push_str(cell);
        html.push_str("</td>");
    }
    if with_bar {
        html.push_str("<td></td>");
    }
    html.push_str("</tr>");
    for item in results {
        let bar = with_bar.then(|| "|".repeat(bar_count(&item.percentage) as usize));
        push_row(
            &mut html,
            [&item.completion, &item.doclength, &item.percentage],
            bar.as_deref(),
        );
    }
    html.push_str("</table>");
    html
}

// Inline output is plain text, not cell markup: item text passes through
// exactly as decoded.
fn render_inline_list(results: &ResultSet) -> String {
    let mut text = String::new();
    for (index, item) in results.iter().enumerate() {
        if index > 0 {
            text.push_str(", ");
        }
        text.push_str(&item.full_text());
    }
    text
}

fn push_row(html: &mut String, cells: [&String; 3], bar: Option<&str>) {
    html.push_str("<tr>");
    for cell in cells {
        html.push_str("<td>");
        html.push_str(&escape(cell));
        html.push_str("</td>");
    }
    if let Some(bar) = bar {
        html.push_str("<td>");
        html.push_str(bar);
        html.push_str("</td>");
    }
    html.push_str("</tr>");
}

/// Width of the percentage bar: a non-negative integer parse of the raw field
/// with a defined fallback. Fractional numeric text truncates toward zero;
/// anything unparseable or negative yields zero bars.
fn bar_count(raw: &str) -> u64 {
    let trimmed = raw.trim();
    if let Ok(value) = trimmed.parse::<u64>() {
        return value;
    }
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() && value > 0.0 => value as u64,
        _ => 0,
    }
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::results::CompletionItem;

    fn sample() -> ResultSet {
        ResultSet::new(vec![
            CompletionItem::new("cats", "10", "50"),
            CompletionItem::new("catapult", "3", "12"),
        ])
    }

    fn count_occurrences(haystack: &str, needle: &str) -> usize {
        haystack.matches(needle).count()
    }

    #[test]
    fn sortable_table_has_header_and_one_row_per_item() {
        let html = RenderPolicy::SortableTable.render(&sample());
        assert!(html.starts_with("<table border='1' id='resulttable' class='tablesorter'>"));
        assert!(html.contains("<thead><tr><th>word</th><th>document #</th><th>percentage</th></tr></thead>"));
        // header rows live in <thead>, data rows in <tbody>
        let body = html.split("<tbody>").nth(1).expect("tbody");
        assert_eq!(count_occurrences(body, "<tr>"), 2);
        assert!(body.contains("<td>cats</td><td>10</td><td>50</td>"));
        assert!(body.contains("<td>catapult</td><td>3</td><td>12</td>"));
    }

    #[test]
    fn sortable_table_preserves_response_order() {
        let html = RenderPolicy::SortableTable.render(&sample());
        let first = html.find("cats").expect("first row");
        let second = html.find("catapult").expect("second row");
        assert!(first < second);
    }

    #[test]
    fn plain_table_uses_a_bare_header_row() {
        let html = RenderPolicy::PlainTable.render(&sample());
        assert!(html.starts_with("<table border='1'><tr><td>word</td>"));
        assert!(!html.contains("<thead>"));
        assert!(!html.contains("tablesorter"));
        // one header row plus one row per item
        assert_eq!(count_occurrences(&html, "<tr>"), 3);
    }

    #[test]
    fn empty_set_renders_empty_table_body() {
        let html = RenderPolicy::SortableTable.render(&ResultSet::default());
        assert!(html.contains("<tbody></tbody>"));

        let html = RenderPolicy::PlainTable.render(&ResultSet::default());
        assert_eq!(count_occurrences(&html, "<tr>"), 1);
    }

    #[test]
    fn bar_chart_emits_one_bar_character_per_percentage_point() {
        let set = ResultSet::new(vec![CompletionItem::new("cats", "10", "5")]);
        let html = RenderPolicy::BarChartTable.render(&set);
        assert!(html.contains("<td>|||||</td>"));
    }

    #[test]
    fn bar_count_fallback_is_zero() {
        assert_eq!(bar_count("5"), 5);
        assert_eq!(bar_count("0"), 0);
        assert_eq!(bar_count("50.5"), 50);
        assert_eq!(bar_count("-3"), 0);
        assert_eq!(bar_count("n/a"), 0);
        assert_eq!(bar_count(""), 0);
    }

    #[test]
    fn non_numeric_percentage_yields_an_empty_bar_cell() {
        let set = ResultSet::new(vec![CompletionItem::new("cats", "10", "n/a")]);
        let html = RenderPolicy::BarChartTable.render(&set);
        assert!(html.contains("<td>n/a</td><td></td>"));
    }

    #[test]
    fn inline_list_joins_full_item_text() {
        assert_eq!(RenderPolicy::InlineList.render(&ResultSet::default()), "");

        let single = ResultSet::new(vec![CompletionItem::new("cats", "10", "50")]);
        assert_eq!(RenderPolicy::InlineList.render(&single), "cats1050");

        assert_eq!(
            RenderPolicy::InlineList.render(&sample()),
            "cats1050, catapult312"
        );
    }

    #[test]
    fn inline_list_emits_exact_item_text_without_escaping() {
        let set = ResultSet::new(vec![CompletionItem::new("a&b", "1", "2")]);
        assert_eq!(RenderPolicy::InlineList.render(&set), "a&b12");

        let set = ResultSet::new(vec![
            CompletionItem::new("<i>a</i>", "1", "2"),
            CompletionItem::new("b&c", "3", "4"),
        ]);
        assert_eq!(RenderPolicy::InlineList.render(&set), "<i>a</i>12, b&c34");
    }

    #[test]
    fn cell_text_is_html_escaped() {
        let set = ResultSet::new(vec![CompletionItem::new("<b>cats</b>", "10", "50")]);
        let html = RenderPolicy::PlainTable.render(&set);
        assert!(html.contains("<td>&lt;b&gt;cats&lt;/b&gt;</td>"));
    }

    #[test]
    fn error_marker_is_detectable() {
        let html = render_error(&SearchError::Status { status: 502 });
        assert!(html.contains("class='search-error'"));
        assert!(html.contains("data-kind='network'"));
        assert!(html.contains("HTTP 502"));
    }
}
