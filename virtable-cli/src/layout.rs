//! Fixed-width row layout.
//!
//! Every column gets the same cell width. Cells that don't fit wrap onto
//! extra lines, so rows have different heights and the virtualizer's
//! estimate is corrected by measurement.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Pixels per text line.
pub const LINE_HEIGHT: u32 = 10;

const MIN_CELL_WIDTH: usize = 3;

pub fn display_width(s: &str) -> usize {
    s.width()
}

fn char_width(c: char) -> usize {
    c.width().unwrap_or(0)
}

/// Wrap on whitespace; words wider than `max_width` are broken by character.
pub fn wrap_words(s: &str, max_width: usize) -> Vec<String> {
    if max_width == 0 {
        return vec![];
    }

    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_width = 0;

    for word in s.split_whitespace() {
        let word_width = display_width(word);

        if word_width > max_width {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            let mut parts = wrap_chars(word, max_width);
            current = parts.pop().unwrap_or_default();
            current_width = display_width(&current);
            lines.extend(parts);
            continue;
        }

        let needed = if current.is_empty() { word_width } else { word_width + 1 };
        if current_width + needed > max_width {
            lines.push(std::mem::take(&mut current));
            current_width = 0;
        }
        if !current.is_empty() {
            current.push(' ');
            current_width += 1;
        }
        current.push_str(word);
        current_width += word_width;
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

/// Break `s` into pieces no wider than `max_width`.
pub fn wrap_chars(s: &str, max_width: usize) -> Vec<String> {
    if max_width == 0 {
        return vec![];
    }

    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_width = 0;

    for ch in s.chars() {
        let width = char_width(ch);
        // Combining marks stay with the previous character.
        if width > 0 && current_width + width > max_width && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
            current_width = 0;
        }
        current.push(ch);
        current_width += width;
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

/// Left-align `s` in a cell of `width` columns.
fn pad(s: &str, width: usize) -> String {
    let fill = width.saturating_sub(display_width(s));
    format!("{s}{}", " ".repeat(fill))
}

/// A row laid out into terminal lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedRow {
    pub lines: Vec<String>,
    /// Height in pixels: line count times [`LINE_HEIGHT`].
    pub height: u32,
}

#[derive(Debug, Clone)]
pub struct Layout {
    columns: usize,
    cell_width: usize,
}

impl Layout {
    /// Split `total_width` evenly between `columns` cells, one space apart.
    pub fn new(columns: usize, total_width: usize) -> Self {
        let columns = columns.max(1);
        let gaps = columns - 1;
        let cell_width = (total_width.saturating_sub(gaps) / columns).max(MIN_CELL_WIDTH);
        Self {
            columns,
            cell_width,
        }
    }

    pub fn cell_width(&self) -> usize {
        self.cell_width
    }

    /// Lay out one row of cell texts.
    pub fn render_row<S: AsRef<str>>(&self, cells: &[S]) -> RenderedRow {
        let wrapped: Vec<Vec<String>> = cells
            .iter()
            .take(self.columns)
            .map(|cell| wrap_words(cell.as_ref(), self.cell_width))
            .collect();
        let line_count = wrapped.iter().map(Vec::len).max().unwrap_or(1).max(1);

        let lines = (0..line_count)
            .map(|line| {
                let parts: Vec<String> = wrapped
                    .iter()
                    .map(|cell| pad(cell.get(line).map_or("", String::as_str), self.cell_width))
                    .collect();
                parts.join(" ").trim_end().to_string()
            })
            .collect();

        RenderedRow {
            lines,
            height: line_count as u32 * LINE_HEIGHT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_on_word_boundaries() {
        assert_eq!(wrap_words("Anna Maria Lopez", 10), vec!["Anna Maria", "Lopez"]);
        assert_eq!(wrap_words("", 10), vec![""]);
    }

    #[test]
    fn breaks_long_words() {
        assert_eq!(
            wrap_words("Wolfeschlegelstein x", 6),
            vec!["Wolfes", "chlege", "lstein", "x"]
        );
        assert_eq!(wrap_chars("abcdefgh", 3), vec!["abc", "def", "gh"]);
    }

    #[test]
    fn wide_characters_count_double() {
        assert_eq!(display_width("日本"), 4);
        assert_eq!(wrap_chars("日本語", 4), vec!["日本", "語"]);
    }

    #[test]
    fn row_height_follows_tallest_cell() {
        let layout = Layout::new(3, 32);
        assert_eq!(layout.cell_width(), 10);

        let row = layout.render_row(&["1", "Jean Baptiste", "single"]);
        assert_eq!(row.lines.len(), 2);
        assert_eq!(row.height, 2 * LINE_HEIGHT);
        assert_eq!(row.lines[0], "1          Jean       single");

        let flat = layout.render_row(&["1", "Bob", "single"]);
        assert_eq!(flat.height, LINE_HEIGHT);
    }

    #[test]
    fn narrow_terminal_keeps_minimum_cells() {
        let layout = Layout::new(8, 10);
        assert_eq!(layout.cell_width(), MIN_CELL_WIDTH);
    }
}
