use ratatui::layout::{Constraint, Direction, Layout, Rect};

pub const CONTENT_HEIGHT: u16 = 8;
pub const ACTIONS_HEIGHT: u16 = 3;

pub struct WorkspaceLayout {
    pub header_area: Rect,
    pub content_area: Rect,
    pub questions_area: Rect,
    pub flashcards_area: Rect,
    pub results_area: Rect,
    // Only present while the action-button panel is visible
    pub actions_area: Option<Rect>,
    pub help_area: Rect,
}

pub fn calculate_workspace_chunks(area: Rect, show_actions: bool) -> WorkspaceLayout {
    let mut constraints = vec![
        Constraint::Length(3),
        Constraint::Length(CONTENT_HEIGHT),
        Constraint::Min(6),
    ];
    if show_actions {
        constraints.push(Constraint::Length(ACTIONS_HEIGHT));
    }
    constraints.push(Constraint::Length(4));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints(constraints)
        .split(area);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[2]);

    let output = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(body[1]);

    let (actions_area, help_area) = if show_actions {
        (Some(chunks[3]), chunks[4])
    } else {
        (None, chunks[3])
    };

    WorkspaceLayout {
        header_area: chunks[0],
        content_area: chunks[1],
        questions_area: body[0],
        flashcards_area: output[0],
        results_area: output[1],
        actions_area,
        help_area,
    }
}

pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_workspace_layout_without_actions() {
        let area = Rect::new(0, 0, 100, 40);
        let layout = calculate_workspace_chunks(area, false);

        assert_eq!(layout.header_area.height, 3);
        assert_eq!(layout.content_area.height, CONTENT_HEIGHT);
        assert_eq!(layout.help_area.height, 4);
        assert!(layout.actions_area.is_none());
        // Margin 1 leaves 38 rows: 3 + 8 + 4 fixed, the body gets the rest
        assert_eq!(layout.questions_area.height, 23);
        assert_eq!(
            layout.flashcards_area.height + layout.results_area.height,
            layout.questions_area.height
        );
    }

    #[test]
    fn test_workspace_layout_with_actions() {
        let area = Rect::new(0, 0, 100, 40);
        let layout = calculate_workspace_chunks(area, true);

        let actions = layout.actions_area.unwrap();
        assert_eq!(actions.height, ACTIONS_HEIGHT);
        assert_eq!(layout.questions_area.height, 20);
        assert_eq!(actions.y, layout.questions_area.bottom());
        assert_eq!(layout.help_area.y, actions.bottom());
    }

    #[test]
    fn test_centered_rect_inside_area() {
        let area = Rect::new(0, 0, 100, 100);
        let popup = centered_rect(60, 30, area);
        assert_eq!(popup.width, 60);
        assert_eq!(popup.height, 30);
        assert_eq!((popup.x, popup.y), (20, 35));
    }
}
