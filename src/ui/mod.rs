mod alert;
pub mod layout;
mod workspace;

pub use alert::draw_alert;
pub use layout::{calculate_workspace_chunks, centered_rect};
pub use workspace::{draw_workspace, flashcard_lines, question_lines, result_lines};

use crate::models::ViewState;
use ratatui::Frame;

/// Draw the whole screen for the current view state.
pub fn draw(f: &mut Frame, view: &ViewState, base_url: &str) {
    draw_workspace(f, view, base_url);
    if let Some(alert) = view.current_alert() {
        draw_alert(f, alert, view.alerts.len() - 1);
    }
}
