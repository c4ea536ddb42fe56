//! Paragraph-to-outline conversion.
//!
//! Logseq shows every `- ` line as its own block. A OneNote page is a run of
//! paragraphs, so each paragraph line becomes a block, with two exceptions
//! that must stay a single block: a Markdown table (one marker on its first
//! row) and an HTML table (one marker on the `<table>` line, none until after
//! `</table>`). Lines that already start with `-` are left alone.
//!
//! The converter never merges, drops or reorders lines; it only prefixes.

use super::detect::{
    is_html_table_close, is_html_table_open, is_table_line, starts_with_html_element,
};
use once_cell::sync::Lazy;
use regex::Regex;

/// Outline marker prepended to the first line of every block.
pub const MARKER: &str = "- ";

static RE_EXISTING_MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*-").unwrap());

/// Where the previous lines left us. HTML-table state dominates: while
/// inside `<table>`…`</table>` nothing is marked, whatever the line looks
/// like.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineState {
    #[default]
    Normal,
    InMarkdownTable,
    InHtmlTable,
}

impl LineState {
    /// Classify `line`, returning whether it opens a new block and the state
    /// for the next line.
    pub fn step(self, line: &str) -> (bool, LineState) {
        if RE_EXISTING_MARKER.is_match(line) {
            return (false, self);
        }

        if is_table_line(line) || starts_with_html_element(line) {
            let mark = self == LineState::Normal;
            let next = if is_html_table_open(line) {
                LineState::InHtmlTable
            } else if is_html_table_close(line) {
                LineState::InMarkdownTable
            } else if self == LineState::InHtmlTable {
                LineState::InHtmlTable
            } else {
                LineState::InMarkdownTable
            };
            return (mark, next);
        }

        match self {
            LineState::InHtmlTable => (false, LineState::InHtmlTable),
            _ => (true, LineState::Normal),
        }
    }
}

/// Turn `text` into outline blocks, one marker per block.
///
/// Lines are joined with `\n`; the result has no trailing line terminator.
pub fn convert_to_outline(text: &str) -> String {
    let mut state = LineState::default();
    let mut out: Vec<String> = Vec::new();

    // Splits on `\n` and `\r\n` only. Vertical tab, form feed and the Unicode
    // line separators stay inside a line; `convert_folder` has already
    // turned lone `\r` into `\n`.
    for line in text.lines() {
        let (mark, next) = state.step(line);
        state = next;
        if mark {
            out.push(format!("{MARKER}{line}"));
        } else {
            out.push(line.to_string());
        }
    }

    out.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_lines_get_one_marker() {
        assert_eq!(convert_to_outline("one\ntwo"), "- one\n- two");
    }

    #[test]
    fn blank_lines_become_empty_blocks() {
        assert_eq!(convert_to_outline("a\n\nb"), "- a\n- \n- b");
    }

    #[test]
    fn existing_markers_are_untouched() {
        let input = "- done\n  - nested\n-no space";
        assert_eq!(convert_to_outline(input), input);
    }

    #[test]
    fn markdown_table_is_one_block() {
        let input = "intro\n| A | B |\n|---|---|\n| 1 | 2 |\nafter";
        assert_eq!(
            convert_to_outline(input),
            "- intro\n- | A | B |\n|---|---|\n| 1 | 2 |\n- after"
        );
    }

    #[test]
    fn table_runs_re_arm() {
        let input = "| a |\n| b |\ntext\n| c |\n| d |";
        assert_eq!(
            convert_to_outline(input),
            "- | a |\n| b |\n- text\n- | c |\n| d |"
        );
    }

    #[test]
    fn html_table_marks_only_the_open_line() {
        let input = "<table>\n<tr>\ncell text\n<td>x</td>\n</tr>\n</table>\nafter";
        assert_eq!(
            convert_to_outline(input),
            "- <table>\n<tr>\ncell text\n<td>x</td>\n</tr>\n</table>\n- after"
        );
    }

    #[test]
    fn html_state_dominates_table_shaped_lines() {
        let input = "<table>\n| not | a row |\n---\n</table>";
        assert_eq!(
            convert_to_outline(input),
            "- <table>\n| not | a row |\n---\n</table>"
        );
    }

    #[test]
    fn html_table_after_markdown_table_is_not_marked() {
        // The <table> line continues the previous table-shaped block.
        let input = "| a |\n<table>\ninside\n</table>";
        assert_eq!(convert_to_outline(input), "- | a |\n<table>\ninside\n</table>");
    }

    #[test]
    fn html_element_line_starts_a_block() {
        assert_eq!(
            convert_to_outline("<div>x</div>\n<p>y</p>\ntext"),
            "- <div>x</div>\n<p>y</p>\n- text"
        );
    }

    #[test]
    fn line_count_is_preserved() {
        let input = "a\n\n| x |\n- b\n<table>\n\n</table>\n\nz";
        let out = convert_to_outline(input);
        assert_eq!(out.lines().count(), input.lines().count());
    }

    #[test]
    fn state_machine_transitions() {
        assert_eq!(LineState::Normal.step("x"), (true, LineState::Normal));
        assert_eq!(
            LineState::Normal.step("| a |"),
            (true, LineState::InMarkdownTable)
        );
        assert_eq!(
            LineState::InMarkdownTable.step("| a |"),
            (false, LineState::InMarkdownTable)
        );
        assert_eq!(
            LineState::InMarkdownTable.step("text"),
            (true, LineState::Normal)
        );
        assert_eq!(
            LineState::Normal.step("<table>"),
            (true, LineState::InHtmlTable)
        );
        assert_eq!(
            LineState::InHtmlTable.step("text"),
            (false, LineState::InHtmlTable)
        );
        assert_eq!(
            LineState::InHtmlTable.step("</table>"),
            (false, LineState::InMarkdownTable)
        );
        assert_eq!(
            LineState::InHtmlTable.step("- bullet"),
            (false, LineState::InHtmlTable)
        );
    }

    #[test]
    fn only_newlines_split_blocks() {
        assert_eq!(
            convert_to_outline("a\x0cb\r\nc\u{2028}d"),
            "- a\x0cb\n- c\u{2028}d"
        );
    }
}
