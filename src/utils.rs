use lazy_static::lazy_static;
use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
};
use regex::Regex;
use unicode_width::UnicodeWidthChar;

lazy_static! {
    static ref NUMBERED_POINT: Regex = Regex::new(r"^(\d+)[.)]\s+(.*)$").unwrap();
    static ref BULLET_POINT: Regex = Regex::new(r"^[-*•]\s+(.*)$").unwrap();
}

pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// One visual line of hard-wrapped text and the char index it starts at.
#[derive(Debug, Clone, PartialEq)]
pub struct WrappedLine {
    pub text: String,
    pub start: usize,
}

/// Break text into visual lines no wider than `max_width` columns. Explicit
/// newlines always start a new line; there is no word-boundary logic, so the
/// cursor math below stays exact.
pub fn wrap_lines(text: &str, max_width: usize) -> Vec<WrappedLine> {
    let max_width = max_width.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_width = 0;
    let mut start = 0;

    for (idx, ch) in text.chars().enumerate() {
        if ch == '\n' {
            lines.push(WrappedLine {
                text: std::mem::take(&mut current),
                start,
            });
            current_width = 0;
            start = idx + 1;
            continue;
        }

        let char_width = ch.width().unwrap_or(0);
        if current_width + char_width > max_width && current_width > 0 {
            lines.push(WrappedLine {
                text: std::mem::take(&mut current),
                start,
            });
            current_width = 0;
            start = idx;
        }
        current.push(ch);
        current_width += char_width;
    }

    lines.push(WrappedLine {
        text: current,
        start,
    });
    lines
}

/// Row and column of a char-indexed cursor inside `wrap_lines(text, max_width)`.
pub fn calculate_wrapped_cursor_position(
    text: &str,
    cursor_index: usize,
    max_width: usize,
) -> (usize, usize) {
    let max_width = max_width.max(1);
    let lines = wrap_lines(text, max_width);
    let row = lines
        .iter()
        .rposition(|line| line.start <= cursor_index)
        .unwrap_or(0);
    let line = &lines[row];
    let col: usize = line
        .text
        .chars()
        .take(cursor_index.saturating_sub(line.start))
        .map(|ch| ch.width().unwrap_or(0))
        .sum();

    if col >= max_width {
        (row + 1, 0)
    } else {
        (row, col)
    }
}

/// Scroll offset that keeps `cursor_row` inside a viewport of `visible_height` rows.
pub fn scroll_to_cursor(cursor_row: usize, visible_height: usize) -> u16 {
    let offset = cursor_row.saturating_sub(visible_height.saturating_sub(1));
    u16::try_from(offset).unwrap_or(u16::MAX)
}

/// Render backend feedback. Numbered points get a bold marker, bullet
/// subpoints are indented, everything else is kept as-is.
pub fn format_feedback(text: &str) -> Vec<Line<'static>> {
    text.lines()
        .map(|line| {
            let trimmed = line.trim();
            if let Some(caps) = NUMBERED_POINT.captures(trimmed) {
                Line::from(vec![
                    Span::styled(
                        format!("{}. ", &caps[1]),
                        Style::default().add_modifier(Modifier::BOLD),
                    ),
                    Span::from(caps[2].to_string()),
                ])
            } else if let Some(caps) = BULLET_POINT.captures(trimmed) {
                Line::from(format!("  • {}", &caps[1]))
            } else {
                Line::from(trimmed.to_string())
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(lines: &[WrappedLine]) -> Vec<&str> {
        lines.iter().map(|l| l.text.as_str()).collect()
    }

    fn plain(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_truncate_string() {
        assert_eq!(truncate_string("short", 10), "short");
        assert_eq!(truncate_string("http://example.com", 10), "http://...");
        assert_eq!(truncate_string("ééééé", 4), "é...");
    }

    #[test]
    fn test_wrap_lines_hard_wraps_at_width() {
        let lines = wrap_lines("abcdefg", 3);
        assert_eq!(texts(&lines), vec!["abc", "def", "g"]);
        assert_eq!(lines[1].start, 3);
        assert_eq!(lines[2].start, 6);
    }

    #[test]
    fn test_wrap_lines_keeps_explicit_newlines() {
        let lines = wrap_lines("ab\n\ncd\n", 10);
        assert_eq!(texts(&lines), vec!["ab", "", "cd", ""]);
        assert_eq!(lines[2].start, 4);
        assert_eq!(lines[3].start, 7);
    }

    #[test]
    fn test_wrap_lines_empty_text_has_one_line() {
        assert_eq!(texts(&wrap_lines("", 5)), vec![""]);
    }

    #[test]
    fn test_cursor_position_basic() {
        assert_eq!(calculate_wrapped_cursor_position("", 0, 10), (0, 0));
        assert_eq!(calculate_wrapped_cursor_position("hello", 3, 10), (0, 3));
        assert_eq!(calculate_wrapped_cursor_position("hello", 5, 10), (0, 5));
    }

    #[test]
    fn test_cursor_position_after_wrap() {
        assert_eq!(calculate_wrapped_cursor_position("abcdefg", 3, 3), (1, 0));
        assert_eq!(calculate_wrapped_cursor_position("abcdefg", 7, 3), (2, 1));
        assert_eq!(calculate_wrapped_cursor_position("abcdef", 6, 3), (2, 0));
    }

    #[test]
    fn test_cursor_position_after_newline() {
        assert_eq!(calculate_wrapped_cursor_position("ab\ncd", 3, 10), (1, 0));
        assert_eq!(calculate_wrapped_cursor_position("ab\ncd", 5, 10), (1, 2));
    }

    #[test]
    fn test_cursor_position_wide_chars() {
        assert_eq!(calculate_wrapped_cursor_position("日本語", 2, 10), (0, 4));
    }

    #[test]
    fn test_scroll_to_cursor() {
        assert_eq!(scroll_to_cursor(0, 5), 0);
        assert_eq!(scroll_to_cursor(4, 5), 0);
        assert_eq!(scroll_to_cursor(7, 5), 3);
        assert_eq!(scroll_to_cursor(3, 0), 3);
    }

    #[test]
    fn test_format_feedback_points() {
        let lines = format_feedback(
            "1. The answer is correct.\n- Grammatical errors: none\n  * Spelling mistakes: none\nPlain line",
        );
        assert_eq!(lines.len(), 4);
        assert_eq!(plain(&lines[0]), "1. The answer is correct.");
        assert!(lines[0].spans[0].style.add_modifier.contains(Modifier::BOLD));
        assert_eq!(plain(&lines[1]), "  • Grammatical errors: none");
        assert_eq!(plain(&lines[2]), "  • Spelling mistakes: none");
        assert_eq!(plain(&lines[3]), "Plain line");
    }
}
