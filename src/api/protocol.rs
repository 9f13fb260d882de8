use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const GENERATE_QUESTION_PATH: &str = "/generate-question";
pub const GENERATE_FLASHCARDS_PATH: &str = "/generate-flashcards";
pub const CHECK_ANSWER_PATH: &str = "/check-answer";
pub const LOGIN_PATH: &str = "/login";

#[derive(Error, Debug)]
pub enum ApiError {
    /// The backend answered with an `error` field.
    #[error("{0}")]
    Remote(String),
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("invalid response (status {status}): {message}")]
    Decode { status: u16, message: String },
    #[error("response has no `{0}` field")]
    MissingField(&'static str),
    /// The backend redirected to its login page.
    #[error("not logged in: set QUIZGEN_EMAIL and QUIZGEN_PASSWORD")]
    Unauthenticated,
    #[error("login failed for {0}")]
    LoginFailed(String),
}

/// Form body of the backend's login page.
#[derive(Debug, Serialize)]
pub struct LoginForm<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Serialize)]
pub struct ContentRequest<'a> {
    pub content: &'a str,
}

#[derive(Debug, Serialize)]
pub struct CheckAnswerRequest<'a> {
    pub answer: &'a str,
    pub content: &'a str,
    pub question: &'a str,
}

#[derive(Debug, Default, Deserialize)]
pub struct QuestionResponse {
    #[serde(default)]
    pub question: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct FlashcardsResponse {
    #[serde(default)]
    pub flashcards: Option<Vec<String>>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CheckAnswerResponse {
    #[serde(default)]
    pub result: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

fn failure(error: Option<String>, field: &'static str) -> ApiError {
    match error {
        Some(message) if !message.trim().is_empty() => ApiError::Remote(message),
        _ => ApiError::MissingField(field),
    }
}

impl QuestionResponse {
    /// The success field wins over `error` when both are present.
    pub fn into_result(self) -> Result<String, ApiError> {
        match self.question {
            Some(question) if !question.is_empty() => Ok(question),
            _ => Err(failure(self.error, "question")),
        }
    }
}

impl FlashcardsResponse {
    pub fn into_result(self) -> Result<Vec<String>, ApiError> {
        match self.flashcards {
            Some(flashcards) => Ok(flashcards),
            None => Err(failure(self.error, "flashcards")),
        }
    }
}

impl CheckAnswerResponse {
    pub fn into_result(self) -> Result<String, ApiError> {
        match self.result {
            Some(result) if !result.is_empty() => Ok(result),
            _ => Err(failure(self.error, "result")),
        }
    }
}

/// Decode a response body. The backend reports failures as JSON with a 4xx/5xx
/// status, so the status only matters when the body is not JSON.
pub fn parse_body<T: DeserializeOwned>(status: u16, body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::Decode {
        status,
        message: e.to_string(),
    })
}
