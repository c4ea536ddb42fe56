//! Page header extraction.
//!
//! Both exporters put a small header at the top of every page with the page
//! title and its created/updated timestamps. This stage removes that header
//! from the body and turns it into the page's top-level outline block:
//!
//! ```text
//! ---                                - My Page
//! title: My Page                     Created: 2023-04-01T09:00:00
//! updated: 2023-05-01T10:00:00   →    Updated: 2023-05-01T10:00:00
//! created: 2023-04-01T09:00:00
//! ---
//! ```
//!
//! A page without a recognisable header is not an error: the metadata stays
//! empty and the body is passed through untouched.

use crate::config::Dialect;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Title and timestamps of one page, exactly as written in its header.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMetadata {
    pub title: Option<String>,
    pub created: Option<String>,
    pub updated: Option<String>,
}

impl PageMetadata {
    /// Whether the header was found at all.
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.created.is_none() && self.updated.is_none()
    }

    /// Render the page's top-level block: `- {title}` followed, when
    /// requested, by `Created:` / `Updated:` property lines.
    ///
    /// The property lines keep the one-space continuation indent that places
    /// them inside the title block.
    pub fn to_block(&self, add_properties: bool) -> String {
        let mut block = format!("- {}\n", self.title.as_deref().unwrap_or_default());
        if add_properties {
            block.push_str(&format!(
                "Created: {}\n Updated: {}\n ",
                self.created.as_deref().unwrap_or_default(),
                self.updated.as_deref().unwrap_or_default(),
            ));
        }
        block
    }
}

/// Result of [`extract_metadata`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedPage {
    /// Page body with the header removed.
    pub body: String,
    /// The page's top-level block, see [`PageMetadata::to_block`].
    pub metadata_block: String,
    pub metadata: PageMetadata,
}

/// Remove the dialect's header from `text` and return the cleaned body, the
/// rendered metadata block and the raw header values.
///
/// Only the first header is consumed. For [`Dialect::Exporter`] two extra
/// normalisations run on the body afterwards: the redundant human-readable
/// title/date/time lines are collapsed into `"{date}, {time}"`, and a stray
/// `AM`/`PM` line left behind by the exporter is dropped.
pub fn extract_metadata(text: &str, add_properties: bool, dialect: Dialect) -> ExtractedPage {
    let mut metadata = PageMetadata::default();

    let mut body = match dialect.header_regex().captures(text) {
        Some(caps) => {
            metadata.title = caps.name("title").map(|m| m.as_str().to_string());
            metadata.updated = caps.name("updated").map(|m| m.as_str().to_string());
            metadata.created = caps.name("created").map(|m| m.as_str().to_string());
            let range = caps.get(0).map(|m| m.range()).unwrap_or(0..0);
            let mut rest = String::with_capacity(text.len());
            rest.push_str(&text[..range.start]);
            rest.push_str(&text[range.end..]);
            rest
        }
        None => text.to_string(),
    };

    if dialect == Dialect::Exporter {
        if let Some(ref title) = metadata.title {
            body = collapse_title_header(&body, title);
        }
        body = strip_broken_header(&body);
    }

    ExtractedPage {
        metadata_block: metadata.to_block(add_properties),
        body,
        metadata,
    }
}

/// Replace the exporter's visible page header (the title line, a date line
/// such as `Monday, May 1, 2023` and a time line such as `10:00 AM`) with a
/// single `"{date}, {time}"` line. Anything before the title line is dropped
/// along with it.
fn collapse_title_header(body: &str, title: &str) -> String {
    let pattern = format!(
        r"(?m)^[ \t]*\s*^{}$\s*\n(?:[A-Za-z]+,\s)?([A-Za-z]+\s\d{{1,2}},\s\d{{4}})\n(\d{{1,2}}:\d{{2}}\s?[APMapm]{{2}})\n([\s\S]*)\z",
        regex::escape(title)
    );
    let Ok(re) = Regex::new(&pattern) else {
        return body.to_string();
    };
    match re.captures(body) {
        Some(caps) => {
            let rest = &caps[3];
            let mut out = format!("{}, {}\n{}", &caps[1], &caps[2], rest);
            // A page that only holds child pages still needs a line below
            // its date so the children nest correctly.
            if rest.is_empty() {
                out.push('\n');
            }
            out
        }
        None => body.to_string(),
    }
}

static RE_BROKEN_HEADER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\A\n(?:AM|PM)\s*\n").unwrap());

/// Some exporter versions reduce the visible header to a lone `AM`/`PM`
/// line after a blank first line.
fn strip_broken_header(body: &str) -> String {
    RE_BROKEN_HEADER.replace(body, "").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXPORTER_PAGE: &str = "---\ntitle: My Page\nupdated: 2023-05-01T10:00:00\ncreated: 2023-04-01T09:00:00\n---\n\nFirst paragraph\nSecond paragraph\n";

    #[test]
    fn exporter_header_round_trip() {
        let page = extract_metadata(EXPORTER_PAGE, true, Dialect::Exporter);
        assert_eq!(page.metadata.title.as_deref(), Some("My Page"));
        assert_eq!(page.metadata.updated.as_deref(), Some("2023-05-01T10:00:00"));
        assert_eq!(page.metadata.created.as_deref(), Some("2023-04-01T09:00:00"));
        assert_eq!(
            page.metadata_block,
            "- My Page\nCreated: 2023-04-01T09:00:00\n Updated: 2023-05-01T10:00:00\n "
        );
        assert_eq!(page.body, "\nFirst paragraph\nSecond paragraph\n");
    }

    #[test]
    fn block_without_properties() {
        let page = extract_metadata(EXPORTER_PAGE, false, Dialect::Exporter);
        assert_eq!(page.metadata_block, "- My Page\n");
    }

    #[test]
    fn converter_header() {
        let text = "# Meeting notes\n\nCreated: 2023-04-01 09:00:00 +0200\n\nModified: 2023-05-01 10:00:00 +0200\n\nAgenda\n";
        let page = extract_metadata(text, true, Dialect::Converter);
        assert_eq!(page.metadata.title.as_deref(), Some("Meeting notes"));
        assert_eq!(
            page.metadata.updated.as_deref(),
            Some("2023-04-01 09:00:00 +0200")
        );
        assert_eq!(
            page.metadata.created.as_deref(),
            Some("2023-05-01 10:00:00 +0200")
        );
        assert_eq!(
            page.metadata_block,
            "- Meeting notes\nCreated: 2023-05-01 10:00:00 +0200\n Updated: 2023-04-01 09:00:00 +0200\n "
        );
        assert_eq!(page.body, "\nAgenda\n");
    }

    #[test]
    fn missing_header_is_a_silent_miss() {
        let text = "Just a body\nwith lines\n";
        let page = extract_metadata(text, true, Dialect::Exporter);
        assert!(page.metadata.is_empty());
        assert_eq!(page.body, text);
        assert_eq!(page.metadata_block, "- \nCreated: \n Updated: \n ");
    }

    #[test]
    fn wrong_dialect_does_not_match() {
        let page = extract_metadata(EXPORTER_PAGE, false, Dialect::Converter);
        assert!(page.metadata.is_empty());
        assert_eq!(page.body, EXPORTER_PAGE);
    }

    #[test]
    fn visible_header_collapses_to_date_and_time() {
        let text = "---\ntitle: Trip\nupdated: 2023-05-01T10:00:00\ncreated: 2023-04-01T09:00:00\n---\n\nTrip\nMonday, May 1, 2023\n10:00 AM\n\nPacking list\n";
        let page = extract_metadata(text, false, Dialect::Exporter);
        assert_eq!(page.body, "May 1, 2023, 10:00 AM\n\nPacking list\n");
    }

    #[test]
    fn visible_header_without_weekday() {
        let text = "---\ntitle: Trip\nupdated: 2023-05-01T10:00:00\ncreated: 2023-04-01T09:00:00\n---\nTrip\nMay 1, 2023\n9:05PM\nBody\n";
        let page = extract_metadata(text, false, Dialect::Exporter);
        assert_eq!(page.body, "May 1, 2023, 9:05PM\nBody\n");
    }

    #[test]
    fn empty_page_with_children_gets_trailing_line() {
        let text = "---\ntitle: Section\nupdated: 2023-05-01T10:00:00\ncreated: 2023-04-01T09:00:00\n---\n\nSection\nMonday, May 1, 2023\n10:00 AM\n";
        let page = extract_metadata(text, false, Dialect::Exporter);
        assert_eq!(page.body, "May 1, 2023, 10:00 AM\n\n");
    }

    #[test]
    fn title_with_regex_characters_is_escaped() {
        let text = "---\ntitle: Q&A (v2.0)?\nupdated: 2023-05-01T10:00:00\ncreated: 2023-04-01T09:00:00\n---\n\nQ&A (v2.0)?\nMay 1, 2023\n10:00 AM\nBody\n";
        let page = extract_metadata(text, false, Dialect::Exporter);
        assert_eq!(page.body, "May 1, 2023, 10:00 AM\nBody\n");
    }

    #[test]
    fn stray_pm_line_is_stripped() {
        let text = "---\ntitle: Broken\nupdated: 2023-05-01T10:00:00\ncreated: 2023-04-01T09:00:00\n---\n\nPM\n\nReal content\n";
        let page = extract_metadata(text, false, Dialect::Exporter);
        assert_eq!(page.body, "Real content\n");
    }

    #[test]
    fn stray_am_requires_leading_blank_line() {
        let text = "AM\nnot a header\n";
        let page = extract_metadata(text, false, Dialect::Exporter);
        assert_eq!(page.body, text);
    }

    #[test]
    fn converter_skips_exporter_normalisation() {
        let text = "# Trip\n\nCreated: 2023-04-01 09:00:00 +0000\n\nModified: 2023-05-01 10:00:00 +0000\n\nPM\n\nBody\n";
        let page = extract_metadata(text, false, Dialect::Converter);
        assert_eq!(page.body, "\nPM\n\nBody\n");
    }
}
