use crate::logger;
use crate::ui::result_lines;
use crate::models::{
    Alert, ApiRequest, ApiResponse, CheckResult, Focus, QuestionEntry, QuestionId, RequestToken,
    ViewState,
};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tokio::sync::mpsc::UnboundedSender;

pub const QUESTION_CONTENT_REQUIRED: &str = "Please enter some content to generate questions.";
pub const FLASHCARD_CONTENT_REQUIRED: &str = "Please enter some content to generate flashcards.";
pub const ANSWER_REQUIRED: &str = "Please enter an answer.";

const SCROLL_STEP: u16 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    Continue,
    Quit,
}

/// Owns the view state and turns user actions into backend requests.
///
/// Each container (questions, flashcards, results) has its own token. Clearing
/// a container bumps its token, so responses issued before the clear are
/// dropped when they arrive.
#[derive(Debug)]
pub struct Controller {
    pub view: ViewState,
    request_tx: UnboundedSender<ApiRequest>,
    next_question_id: u64,
    question_token: u64,
    flashcard_token: u64,
    result_token: u64,
}

impl Controller {
    pub fn new(request_tx: UnboundedSender<ApiRequest>) -> Self {
        Self {
            view: ViewState::default(),
            request_tx,
            next_question_id: 1,
            question_token: 0,
            flashcard_token: 0,
            result_token: 0,
        }
    }

    fn send(&mut self, request: ApiRequest) {
        if self.request_tx.send(request).is_ok() {
            self.view.pending_requests += 1;
        } else {
            logger::log("Request worker is gone, dropping request");
            self.view
                .alerts
                .push_back(Alert::remote("Request worker stopped; restart the app."));
        }
    }

    fn clear_questions(&mut self) {
        self.view.questions.clear();
        self.question_token += 1;
        if matches!(self.view.focus, Focus::Answer(_)) {
            self.view.focus = Focus::Content;
        }
    }

    fn clear_flashcards(&mut self) {
        self.view.flashcards.clear();
        self.flashcard_token += 1;
    }

    fn clear_results(&mut self) {
        self.view.results.clear();
        self.result_token += 1;
        self.view.output_scroll = 0;
    }

    /// Scroll the results panel, never past its last line.
    fn scroll_results(&mut self, down: bool) {
        let last_line = result_lines(&self.view.results).len().saturating_sub(1);
        let max_scroll = u16::try_from(last_line).unwrap_or(u16::MAX);
        self.view.output_scroll = if down {
            self.view.output_scroll.saturating_add(SCROLL_STEP).min(max_scroll)
        } else {
            self.view.output_scroll.saturating_sub(SCROLL_STEP).min(max_scroll)
        };
    }

    pub fn generate_questions(&mut self, append: bool) {
        if self.view.content.is_blank() {
            self.view
                .alerts
                .push_back(Alert::validation(QUESTION_CONTENT_REQUIRED));
            return;
        }

        if !append {
            self.clear_questions();
        }

        let request = ApiRequest::GenerateQuestion {
            token: RequestToken(self.question_token),
            content: self.view.content.text().to_string(),
        };
        self.send(request);
    }

    pub fn generate_flashcards(&mut self) {
        self.clear_flashcards();

        if self.view.content.is_blank() {
            self.view
                .alerts
                .push_back(Alert::validation(FLASHCARD_CONTENT_REQUIRED));
            return;
        }

        let request = ApiRequest::GenerateFlashcards {
            token: RequestToken(self.flashcard_token),
            content: self.view.content.text().to_string(),
        };
        self.send(request);
    }

    /// Every answer is handled on its own: a blank one raises an alert and is
    /// skipped while the rest of the pass still goes out.
    pub fn check_answers(&mut self) {
        self.clear_results();

        let token = RequestToken(self.result_token);
        let content = self.view.content.text().to_string();
        let pending: Vec<(QuestionId, String, String)> = self
            .view
            .questions
            .iter()
            .map(|q| (q.id, q.text.clone(), q.answer.text().to_string()))
            .collect();

        for (question_id, question, answer) in pending {
            if answer.trim().is_empty() {
                self.view.alerts.push_back(Alert::validation(ANSWER_REQUIRED));
                continue;
            }
            self.send(ApiRequest::CheckAnswer {
                token,
                question_id,
                question,
                answer,
                content: content.clone(),
            });
        }
    }

    pub fn reset(&mut self) {
        self.clear_questions();
        self.clear_flashcards();
        self.clear_results();
        self.view.content.clear();
        self.view.action_panel_visible = false;
        self.view.focus = Focus::Content;
        logger::log("View reset");
    }

    pub fn apply_response(&mut self, response: ApiResponse) {
        self.view.pending_requests = self.view.pending_requests.saturating_sub(1);

        match response {
            ApiResponse::Question { token, result } => {
                if token.0 != self.question_token {
                    logger::log(&format!("Discarding stale question response (token {})", token.0));
                    return;
                }
                match result {
                    Ok(text) => {
                        let id = QuestionId(self.next_question_id);
                        self.next_question_id += 1;
                        self.view.questions.push(QuestionEntry {
                            id,
                            text,
                            answer: Default::default(),
                        });
                        self.view.action_panel_visible = true;
                    }
                    Err(error) => self
                        .view
                        .alerts
                        .push_back(Alert::remote(format!("Error generating question: {}", error))),
                }
            }
            ApiResponse::Flashcards { token, result } => {
                if token.0 != self.flashcard_token {
                    logger::log(&format!(
                        "Discarding stale flashcards response (token {})",
                        token.0
                    ));
                    return;
                }
                match result {
                    Ok(flashcards) => self.view.flashcards.extend(flashcards),
                    Err(error) => self.view.alerts.push_back(Alert::remote(format!(
                        "Error generating flashcards: {}",
                        error
                    ))),
                }
            }
            ApiResponse::CheckAnswer {
                token,
                question_id,
                question,
                result,
            } => {
                if token.0 != self.result_token {
                    logger::log(&format!(
                        "Discarding stale check response for question {} (token {})",
                        question_id.0, token.0
                    ));
                    return;
                }
                match result {
                    Ok(text) => {
                        // Results are listed in question order, whatever order they arrive in.
                        let position = self
                            .view
                            .results
                            .partition_point(|r| r.question_id < question_id);
                        self.view.results.insert(
                            position,
                            CheckResult {
                                question_id,
                                question,
                                text,
                            },
                        );
                    }
                    Err(error) => self
                        .view
                        .alerts
                        .push_back(Alert::remote(format!("Error checking answer: {}", error))),
                }
            }
        }
    }

    fn focus_order(&self) -> Vec<Focus> {
        std::iter::once(Focus::Content)
            .chain(self.view.questions.iter().map(|q| Focus::Answer(q.id)))
            .collect()
    }

    fn move_focus(&mut self, forward: bool) {
        let order = self.focus_order();
        let current = order
            .iter()
            .position(|f| *f == self.view.focus)
            .unwrap_or(0);
        let next = if forward {
            (current + 1) % order.len()
        } else {
            (current + order.len() - 1) % order.len()
        };
        self.view.focus = order[next];
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> KeyOutcome {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        if ctrl && key.code == KeyCode::Char('c') {
            return KeyOutcome::Quit;
        }

        // An alert blocks everything else until it is dismissed.
        if self.view.current_alert().is_some() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.view.alerts.pop_front();
            }
            return KeyOutcome::Continue;
        }

        if ctrl {
            match key.code {
                KeyCode::Char('g') => self.generate_questions(false),
                KeyCode::Char('n') if self.view.action_panel_visible => {
                    self.generate_questions(true)
                }
                KeyCode::Char('f') => self.generate_flashcards(),
                KeyCode::Char('k') if self.view.action_panel_visible => self.check_answers(),
                KeyCode::Char('r') => self.reset(),
                _ => {}
            }
            return KeyOutcome::Continue;
        }

        match key.code {
            KeyCode::Tab => self.move_focus(true),
            KeyCode::BackTab => self.move_focus(false),
            KeyCode::PageUp => self.scroll_results(false),
            KeyCode::PageDown => self.scroll_results(true),
            KeyCode::Enter => match self.view.focus {
                Focus::Content => self.view.content.insert('\n'),
                Focus::Answer(_) => self.move_focus(true),
            },
            code => {
                if let Some(input) = self.view.focused_input_mut() {
                    match code {
                        KeyCode::Backspace => input.backspace(),
                        KeyCode::Delete => input.delete(),
                        KeyCode::Left => input.move_left(),
                        KeyCode::Right => input.move_right(),
                        KeyCode::Home => input.move_home(),
                        KeyCode::End => input.move_end(),
                        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::ALT) => {
                            input.insert(c)
                        }
                        _ => {}
                    }
                }
            }
        }

        KeyOutcome::Continue
    }
}
