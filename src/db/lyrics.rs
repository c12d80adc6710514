//! Verse splitting and windowing for stored lyric text

use crate::db::query::Page;

/// Split lyric text into verses delimited by blank lines.
///
/// A run of consecutive blank (or whitespace-only) lines counts as a
/// single delimiter; `\r\n` endings are handled. Verse order follows the
/// text.
pub fn split_verses(text: &str) -> Vec<String> {
    let mut verses = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for line in text.lines() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                verses.push(current.join("\n"));
                current.clear();
            }
        } else {
            current.push(line);
        }
    }
    if !current.is_empty() {
        verses.push(current.join("\n"));
    }

    verses
}

/// Return the page window `[(page-1)*limit, page*limit)` of `verses`.
///
/// A start index past the end yields an empty list, not an error; an end
/// index past the end is clamped.
pub fn verse_window(verses: Vec<String>, page: &Page) -> Vec<String> {
    let start = page.offset() as usize;
    if start >= verses.len() {
        return Vec::new();
    }
    verses
        .into_iter()
        .skip(start)
        .take(page.limit as usize)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn page(page: i64, limit: i64) -> Page {
        Page::clamped(Some(page), Some(limit))
    }

    #[test]
    fn splits_on_blank_lines() {
        assert_eq!(split_verses("A\n\nB\n\nC"), vec!["A", "B", "C"]);
    }

    #[test]
    fn keeps_line_breaks_within_a_verse() {
        let text = "line one\nline two\n\nline three";
        assert_eq!(split_verses(text), vec!["line one\nline two", "line three"]);
    }

    #[test]
    fn collapses_repeated_and_whitespace_only_separators() {
        assert_eq!(split_verses("A\n\n\n\nB\n  \nC"), vec!["A", "B", "C"]);
    }

    #[test]
    fn handles_crlf_endings() {
        assert_eq!(split_verses("A\r\n\r\nB"), vec!["A", "B"]);
    }

    #[test]
    fn empty_text_has_no_verses() {
        assert_eq!(split_verses(""), Vec::<String>::new());
        assert_eq!(split_verses("\n\n\n"), Vec::<String>::new());
    }

    #[test]
    fn windows_follow_pagination_math() {
        let verses = split_verses("A\n\nB\n\nC");
        assert_eq!(verse_window(verses.clone(), &page(1, 2)), vec!["A", "B"]);
        assert_eq!(verse_window(verses, &page(2, 2)), vec!["C"]);
    }

    #[test]
    fn start_past_the_end_is_empty_not_an_error() {
        let verses = split_verses("A\n\nB");
        assert_eq!(verse_window(verses, &page(5, 10)), Vec::<String>::new());
    }

    #[test]
    fn end_past_the_end_is_clamped() {
        let verses = split_verses("A\n\nB\n\nC");
        assert_eq!(verse_window(verses, &page(1, 100)), vec!["A", "B", "C"]);
    }
}
