//! Hierarchical indentation.
//!
//! Logseq nests a block under the block above it when it is indented by two
//! tab characters more, so one logical level is two tabs.

/// Indent unit prepended per half-level.
pub const INDENT_UNIT: char = '\t';

/// Indent units per logical level.
pub const UNITS_PER_LEVEL: usize = 2;

/// Prefix every line of `text` (blank lines included) with
/// `levels * UNITS_PER_LEVEL` tabs and terminate every line with `\n`.
///
/// `None` means one level. Zero levels only normalises line terminators.
/// Indenting by `a` then by `b` is the same as indenting once by `a + b`.
pub fn indent(text: &str, levels: Option<usize>) -> String {
    let prefix: String = std::iter::repeat_n(INDENT_UNIT, levels.unwrap_or(1) * UNITS_PER_LEVEL)
        .collect();
    let mut out = String::with_capacity(text.len() + prefix.len() * 8);
    // Same line splitting as the outline converter: `\n` and `\r\n` only.
    for line in text.lines() {
        out.push_str(&prefix);
        out.push_str(line);
        out.push('\n');
    }
    out
}
