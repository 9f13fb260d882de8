use std::collections::VecDeque;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QuestionId(pub u64);

/// Identifies the user action a request belongs to. A response is applied only
/// while its token still matches the container it targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestToken(pub u64);

/// Single-field text buffer with a cursor counted in chars.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextInput {
    text: String,
    cursor: usize,
}

impl TextInput {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let cursor = text.chars().count();
        Self { text, cursor }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    pub fn set(&mut self, text: impl Into<String>) {
        *self = Self::new(text);
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    fn byte_offset(&self, char_index: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_index)
            .map(|(offset, _)| offset)
            .unwrap_or(self.text.len())
    }

    pub fn insert(&mut self, c: char) {
        let offset = self.byte_offset(self.cursor);
        self.text.insert(offset, c);
        self.cursor += 1;
    }

    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let offset = self.byte_offset(self.cursor);
            self.text.remove(offset);
        }
    }

    pub fn delete(&mut self) {
        if self.cursor < self.text.chars().count() {
            let offset = self.byte_offset(self.cursor);
            self.text.remove(offset);
        }
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.text.chars().count());
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.text.chars().count();
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct QuestionEntry {
    pub id: QuestionId,
    pub text: String,
    pub answer: TextInput,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CheckResult {
    pub question_id: QuestionId,
    pub question: String,
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    Validation,
    Remote,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Alert {
    pub kind: AlertKind,
    pub message: String,
}

impl Alert {
    pub fn validation(message: impl Into<String>) -> Self {
        Self {
            kind: AlertKind::Validation,
            message: message.into(),
        }
    }

    pub fn remote(message: impl Into<String>) -> Self {
        Self {
            kind: AlertKind::Remote,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Content,
    Answer(QuestionId),
}

/// Everything the renderer needs. Owned by the controller; the draw functions
/// only read it.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    pub content: TextInput,
    pub questions: Vec<QuestionEntry>,
    pub flashcards: Vec<String>,
    pub results: Vec<CheckResult>,
    pub action_panel_visible: bool,
    pub alerts: VecDeque<Alert>,
    pub focus: Focus,
    pub output_scroll: u16,
    pub pending_requests: usize,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            content: TextInput::default(),
            questions: Vec::new(),
            flashcards: Vec::new(),
            results: Vec::new(),
            action_panel_visible: false,
            alerts: VecDeque::new(),
            focus: Focus::Content,
            output_scroll: 0,
            pending_requests: 0,
        }
    }
}

impl ViewState {
    pub fn question(&self, id: QuestionId) -> Option<&QuestionEntry> {
        self.questions.iter().find(|q| q.id == id)
    }

    pub fn question_mut(&mut self, id: QuestionId) -> Option<&mut QuestionEntry> {
        self.questions.iter_mut().find(|q| q.id == id)
    }

    pub fn current_alert(&self) -> Option<&Alert> {
        self.alerts.front()
    }

    /// The input that currently receives keystrokes.
    pub fn focused_input_mut(&mut self) -> Option<&mut TextInput> {
        match self.focus {
            Focus::Content => Some(&mut self.content),
            Focus::Answer(id) => self.question_mut(id).map(|q| &mut q.answer),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ApiRequest {
    GenerateQuestion {
        token: RequestToken,
        content: String,
    },
    GenerateFlashcards {
        token: RequestToken,
        content: String,
    },
    CheckAnswer {
        token: RequestToken,
        question_id: QuestionId,
        question: String,
        answer: String,
        content: String,
    },
}

/// Errors travel as display strings; the worker has already logged the typed error.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiResponse {
    Question {
        token: RequestToken,
        result: Result<String, String>,
    },
    Flashcards {
        token: RequestToken,
        result: Result<Vec<String>, String>,
    },
    CheckAnswer {
        token: RequestToken,
        question_id: QuestionId,
        question: String,
        result: Result<String, String>,
    },
}
