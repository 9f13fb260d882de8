use crate::models::{Alert, AlertKind};
use crate::ui::layout::centered_rect;
use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

pub fn draw_alert(f: &mut Frame, alert: &Alert, queued: usize) {
    let area = centered_rect(60, 30, f.area());
    f.render_widget(Clear, area);

    let (title, color) = match alert.kind {
        AlertKind::Validation => ("Missing Input", Color::Yellow),
        AlertKind::Remote => ("Error", Color::Red),
    };

    let mut lines = vec![Line::from(""), Line::from(alert.message.clone()), Line::from("")];
    let mut dismiss = vec![
        Span::styled(
            "Enter",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::from(" OK"),
    ];
    if queued > 0 {
        dismiss.push(Span::styled(
            format!("  ({} more)", queued),
            Style::default().fg(Color::DarkGray),
        ));
    }
    lines.push(Line::from(dismiss));

    let popup = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .border_style(Style::default().fg(color).add_modifier(Modifier::BOLD)),
        );
    f.render_widget(popup, area);
}
