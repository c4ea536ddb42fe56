//! Line classification: Markdown tables, HTML tables and raw HTML.
//!
//! Every function here is pure and looks at a single line. The outline
//! converter uses them to keep a table (or an HTML block) inside one outline
//! block instead of bulleting each row.

use once_cell::sync::Lazy;
use regex::Regex;

static RE_TABLE_ROW: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*\|.*\|").unwrap());

static RE_TABLE_RULE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*-{3,}\s*").unwrap());

static RE_HTML_TABLE_OPEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^\s*<table\b[^>]*>").unwrap());

static RE_HTML_TABLE_CLOSE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^\s*</table\b[^>]*>").unwrap());

static RE_HTML_ELEMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*</?\w+(?:\s+[^>]*)?/?>").unwrap());

/// Pipe-delimited row (`| a | b |`) or a rule of three or more dashes.
pub fn is_table_line(line: &str) -> bool {
    RE_TABLE_ROW.is_match(line) || RE_TABLE_RULE.is_match(line)
}

/// `<table …>` at the start of the line, any case.
pub fn is_html_table_open(line: &str) -> bool {
    RE_HTML_TABLE_OPEN.is_match(line)
}

/// `</table …>` at the start of the line, any case.
pub fn is_html_table_close(line: &str) -> bool {
    RE_HTML_TABLE_CLOSE.is_match(line)
}

/// Text begins with an opening, closing or self-closing HTML tag.
pub fn starts_with_html_element(text: &str) -> bool {
    RE_HTML_ELEMENT.is_match(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_rows() {
        assert!(is_table_line("| a | b |"));
        assert!(is_table_line("   |x|"));
        assert!(is_table_line("|---|---|"));
        assert!(!is_table_line("| open ended"));
        assert!(!is_table_line("a | b |"));
    }

    #[test]
    fn table_rules() {
        assert!(is_table_line("---"));
        assert!(is_table_line("  ------  "));
        assert!(!is_table_line("--"));
    }

    #[test]
    fn html_table_open_close() {
        assert!(is_html_table_open("<table>"));
        assert!(is_html_table_open("<TABLE border=\"1\">"));
        assert!(is_html_table_open("  <table class=\"x\">"));
        assert!(!is_html_table_open("<tables>"));
        assert!(!is_html_table_open("text <table>"));

        assert!(is_html_table_close("</table>"));
        assert!(is_html_table_close("\t</Table >"));
        assert!(!is_html_table_close("<table>"));
    }

    #[test]
    fn html_elements() {
        assert!(starts_with_html_element("<div>"));
        assert!(starts_with_html_element("  <td style=\"x\">cell</td>"));
        assert!(starts_with_html_element("</tr>"));
        assert!(starts_with_html_element("<br/>"));
        assert!(starts_with_html_element("<img src=\"a.png\" />"));
        assert!(!starts_with_html_element("plain <b>bold</b>"));
        assert!(!starts_with_html_element("< not a tag"));
        assert!(!starts_with_html_element(""));
    }
}
