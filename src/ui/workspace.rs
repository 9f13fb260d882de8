use crate::models::{CheckResult, Focus, ViewState};
use crate::ui::layout::{calculate_workspace_chunks, WorkspaceLayout};
use crate::utils::{
    calculate_wrapped_cursor_position, format_feedback, scroll_to_cursor, truncate_string,
    wrap_lines,
};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

const QUESTION_LABEL: &str = "Generated Question:";
const ANSWER_PROMPT: &str = "> ";
const ANSWER_PLACEHOLDER: &str = "[Enter your answer here]";

fn bold(text: impl Into<String>, color: Color) -> Span<'static> {
    Span::styled(
        text.into(),
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    )
}

fn key_hint(key: &'static str, label: &'static str) -> [Span<'static>; 2] {
    [bold(key, Color::Cyan), Span::from(label)]
}

fn inner_width(area: Rect) -> usize {
    area.width.saturating_sub(2) as usize
}

fn inner_height(area: Rect) -> usize {
    area.height.saturating_sub(2) as usize
}

/// Lines of the questions panel plus the (row, col) of the focused answer's
/// cursor, if an answer has focus.
pub fn question_lines(
    view: &ViewState,
    width: usize,
) -> (Vec<Line<'static>>, Option<(usize, usize)>) {
    let mut lines = Vec::new();
    let mut cursor = None;
    let answer_width = width.saturating_sub(ANSWER_PROMPT.len()).max(1);

    for entry in &view.questions {
        if !lines.is_empty() {
            lines.push(Line::from(""));
        }
        lines.push(Line::from(bold(QUESTION_LABEL, Color::Yellow)));
        for wrapped in wrap_lines(&entry.text, width) {
            lines.push(Line::from(wrapped.text));
        }

        let focused = view.focus == Focus::Answer(entry.id);
        let answer_style = if focused {
            Style::default().fg(Color::Green)
        } else {
            Style::default()
        };

        if entry.answer.text().is_empty() && !focused {
            lines.push(Line::from(vec![
                Span::from(ANSWER_PROMPT),
                Span::styled(ANSWER_PLACEHOLDER, Style::default().fg(Color::DarkGray)),
            ]));
            continue;
        }

        if focused {
            let (row, col) = calculate_wrapped_cursor_position(
                entry.answer.text(),
                entry.answer.cursor(),
                answer_width,
            );
            cursor = Some((lines.len() + row, ANSWER_PROMPT.len() + col));
        }
        for (i, wrapped) in wrap_lines(entry.answer.text(), answer_width)
            .into_iter()
            .enumerate()
        {
            let prefix = if i == 0 { ANSWER_PROMPT } else { "  " };
            lines.push(Line::from(vec![
                Span::from(prefix),
                Span::styled(wrapped.text, answer_style),
            ]));
        }
    }

    (lines, cursor)
}

pub fn flashcard_lines(flashcards: &[String]) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for (index, flashcard) in flashcards.iter().enumerate() {
        if index > 0 {
            lines.push(Line::from(""));
        }
        lines.push(Line::from(bold(
            format!("Flashcard {}:", index + 1),
            Color::Magenta,
        )));
        lines.extend(flashcard.lines().map(|l| Line::from(l.to_string())));
    }
    lines
}

pub fn result_lines(results: &[CheckResult]) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for (index, result) in results.iter().enumerate() {
        if index > 0 {
            lines.push(Line::from(""));
        }
        lines.push(Line::from(bold(
            format!("Result for \"{}\":", result.question),
            Color::Green,
        )));
        lines.extend(format_feedback(&result.text));
    }
    lines
}

fn draw_header(f: &mut Frame, area: Rect, view: &ViewState, base_url: &str) {
    let mut spans = vec![
        bold("Quiz Generator", Color::Cyan),
        Span::from(format!(
            " - {}",
            truncate_string(base_url, inner_width(area) / 2)
        )),
    ];
    if view.pending_requests > 0 {
        spans.push(Span::styled(
            format!(
                "  ({} request{} pending)",
                view.pending_requests,
                if view.pending_requests == 1 { "" } else { "s" }
            ),
            Style::default().fg(Color::Yellow),
        ));
    }

    let header = Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(header, area);
}

fn focused_block(title: &'static str, focused: bool) -> Block<'static> {
    let block = Block::default().borders(Borders::ALL).title(title);
    if focused {
        block.border_style(Style::default().fg(Color::Cyan))
    } else {
        block
    }
}

fn draw_content(f: &mut Frame, area: Rect, view: &ViewState, show_cursor: bool) {
    let focused = view.focus == Focus::Content;
    let width = inner_width(area);
    let height = inner_height(area);

    let (cursor_row, cursor_col) =
        calculate_wrapped_cursor_position(view.content.text(), view.content.cursor(), width);
    let scroll_y = if focused {
        scroll_to_cursor(cursor_row, height)
    } else {
        0
    };

    let text = if view.content.text().is_empty() && !focused {
        Text::from(Span::styled(
            "[Paste or type the content to study here...]",
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        Text::from(
            wrap_lines(view.content.text(), width)
                .into_iter()
                .map(|l| Line::from(l.text))
                .collect::<Vec<_>>(),
        )
    };

    let content = Paragraph::new(text)
        .scroll((scroll_y, 0))
        .block(focused_block("Content", focused));
    f.render_widget(content, area);

    if focused && show_cursor {
        let visible_row = cursor_row.saturating_sub(scroll_y as usize);
        if visible_row < height {
            f.set_cursor_position((
                area.x + 1 + cursor_col as u16,
                area.y + 1 + visible_row as u16,
            ));
        }
    }
}

fn draw_questions(f: &mut Frame, area: Rect, view: &ViewState, show_cursor: bool) {
    let height = inner_height(area);
    let (lines, cursor) = question_lines(view, inner_width(area));
    let scroll_y = cursor
        .map(|(row, _)| scroll_to_cursor(row, height))
        .unwrap_or(0);

    let body = if lines.is_empty() {
        Text::from(Span::styled(
            "No questions yet. Press Ctrl+G to generate one.",
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        Text::from(lines)
    };

    let focused = matches!(view.focus, Focus::Answer(_));
    let questions = Paragraph::new(body)
        .scroll((scroll_y, 0))
        .block(focused_block("Questions", focused));
    f.render_widget(questions, area);

    if let Some((row, col)) = cursor
        && show_cursor
    {
        let visible_row = row.saturating_sub(scroll_y as usize);
        if visible_row < height {
            f.set_cursor_position((area.x + 1 + col as u16, area.y + 1 + visible_row as u16));
        }
    }
}

fn draw_flashcards(f: &mut Frame, area: Rect, view: &ViewState) {
    let flashcards = Paragraph::new(flashcard_lines(&view.flashcards))
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title("Flashcards"));
    f.render_widget(flashcards, area);
}

fn draw_results(f: &mut Frame, area: Rect, view: &ViewState) {
    let lines = result_lines(&view.results);
    let max_scroll = lines.len().saturating_sub(inner_height(area));
    let scroll_y = (view.output_scroll as usize).min(max_scroll) as u16;

    let results = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((scroll_y, 0))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Results (PgUp/PgDn to scroll)"),
        );
    f.render_widget(results, area);
}

fn draw_actions(f: &mut Frame, area: Rect) {
    let mut spans = Vec::new();
    spans.extend(key_hint("Ctrl+N", " Generate More Questions    "));
    spans.extend(key_hint("Ctrl+K", " Check Answers"));

    let actions = Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Actions"));
    f.render_widget(actions, area);
}

fn draw_help(f: &mut Frame, area: Rect) {
    let mut first = Vec::new();
    first.extend(key_hint("Ctrl+G", " Generate Questions  "));
    first.extend(key_hint("Ctrl+F", " Generate Flashcards  "));
    first.extend(key_hint("Ctrl+R", " Reset"));

    let mut second = Vec::new();
    second.extend(key_hint("Tab", " Next Field  "));
    second.extend(key_hint("Shift+Tab", " Previous Field  "));
    second.extend(key_hint("Ctrl+C", " Exit App"));

    let help = Paragraph::new(vec![Line::from(first), Line::from(second)])
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, area);
}

pub fn draw_workspace(f: &mut Frame, view: &ViewState, base_url: &str) -> WorkspaceLayout {
    let layout = calculate_workspace_chunks(f.area(), view.action_panel_visible);
    let show_cursor = view.current_alert().is_none();

    draw_header(f, layout.header_area, view, base_url);
    draw_content(f, layout.content_area, view, show_cursor);
    draw_questions(f, layout.questions_area, view, show_cursor);
    draw_flashcards(f, layout.flashcards_area, view);
    draw_results(f, layout.results_area, view);
    if let Some(actions_area) = layout.actions_area {
        draw_actions(f, actions_area);
    }
    draw_help(f, layout.help_area);

    layout
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{QuestionEntry, QuestionId, TextInput};

    fn plain(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    fn view_with_question(text: &str) -> ViewState {
        let mut view = ViewState::default();
        view.questions.push(QuestionEntry {
            id: QuestionId(1),
            text: text.to_string(),
            answer: TextInput::default(),
        });
        view
    }

    #[test]
    fn test_question_renders_text_and_empty_answer() {
        let view = view_with_question("Q1");
        let (lines, cursor) = question_lines(&view, 40);

        let rendered: Vec<String> = lines.iter().map(plain).collect();
        assert_eq!(
            rendered,
            vec![
                QUESTION_LABEL.to_string(),
                "Q1".to_string(),
                format!("{}{}", ANSWER_PROMPT, ANSWER_PLACEHOLDER),
            ]
        );
        assert!(cursor.is_none());
    }

    #[test]
    fn test_focused_answer_reports_cursor() {
        let mut view = view_with_question("Q1");
        view.questions[0].answer = TextInput::new("Paris");
        view.focus = Focus::Answer(QuestionId(1));

        let (lines, cursor) = question_lines(&view, 40);
        assert_eq!(plain(&lines[2]), "> Paris");
        assert_eq!(cursor, Some((2, ANSWER_PROMPT.len() + 5)));
    }

    #[test]
    fn test_flashcards_labeled_by_position() {
        let lines = flashcard_lines(&["A".to_string(), "B".to_string()]);
        let rendered: Vec<String> = lines.iter().map(plain).collect();
        assert_eq!(rendered, vec!["Flashcard 1:", "A", "", "Flashcard 2:", "B"]);
    }

    #[test]
    fn test_result_lines_name_the_question() {
        let lines = result_lines(&[CheckResult {
            question_id: QuestionId(1),
            question: "Who?".to_string(),
            text: "Correct.\n- Spelling mistakes: none".to_string(),
        }]);
        let rendered: Vec<String> = lines.iter().map(plain).collect();
        assert_eq!(
            rendered,
            vec![
                "Result for \"Who?\":",
                "Correct.",
                "  • Spelling mistakes: none"
            ]
        );
    }
}
