//! Fixed-width cell formatting.
//!
//! Widths are counted in characters. Text longer than the width is cut to its
//! first `width` characters without any marker, shorter text is padded on the
//! right with spaces.

/// Placeholder written for absent values.
pub const NONE: &str = "NONE";

/// Separator written between columns.
pub const GUTTER: &str = "  ";

/// Number of characters in `text`.
pub fn text_width(text: &str) -> usize {
    text.chars().count()
}

/// Cuts or pads `text` to exactly `width` characters.
///
/// # Example
///
/// ```rust
/// use ocm_output::fit;
///
/// assert_eq!(fit("mycluster", 4), "mycl");
/// assert_eq!(fit("id", 4), "id  ");
/// assert_eq!(fit("name", 4), "name");
/// ```
pub fn fit(text: &str, width: usize) -> String {
    let len = text_width(text);
    if len > width {
        text.chars().take(width).collect()
    } else {
        let mut out = String::with_capacity(text.len() + width - len);
        out.push_str(text);
        out.extend(std::iter::repeat(' ').take(width - len));
        out
    }
}

/// Renders a line from cells and their widths, newline included.
pub(crate) fn render_line<S: AsRef<str>>(cells: &[S], widths: &[usize]) -> String {
    let mut line = String::new();
    for (i, (cell, width)) in cells.iter().zip(widths).enumerate() {
        if i > 0 {
            line.push_str(GUTTER);
        }
        line.push_str(&fit(cell.as_ref(), *width));
    }
    line.push('\n');
    line
}
