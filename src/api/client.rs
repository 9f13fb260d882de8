use crate::api::protocol::{
    parse_body, ApiError, CheckAnswerRequest, CheckAnswerResponse, ContentRequest,
    FlashcardsResponse, LoginForm, QuestionResponse, CHECK_ANSWER_PATH,
    GENERATE_FLASHCARDS_PATH, GENERATE_QUESTION_PATH, LOGIN_PATH,
};
use crate::config::Config;
use crate::logger;
use async_trait::async_trait;
use reqwest::{header::LOCATION, redirect::Policy, Client, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// The three backend operations the controller depends on.
#[async_trait]
pub trait QuizBackend: Send + Sync {
    async fn generate_question(&self, content: &str) -> Result<String, ApiError>;

    async fn generate_flashcards(&self, content: &str) -> Result<Vec<String>, ApiError>;

    async fn check_answer(
        &self,
        answer: &str,
        content: &str,
        question: &str,
    ) -> Result<String, ApiError>;
}

#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: String,
}

impl HttpBackend {
    /// Redirects are not followed: the backend answers an unauthenticated call
    /// with a redirect to its login page, and that has to stay visible.
    pub fn new(config: &Config) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .cookie_store(true)
            .redirect(Policy::none())
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Open a session. The session cookie is kept by the client and sent with
    /// every later call. A successful login redirects away from the login page;
    /// a failed one re-renders the form.
    pub async fn login(&self, email: &str, password: &str) -> Result<(), ApiError> {
        let response = self
            .client
            .post(self.url(LOGIN_PATH))
            .form(&LoginForm { email, password })
            .send()
            .await?;

        if response.status().is_redirection() && !redirects_to_login(&response) {
            logger::log(&format!("Logged in as {}", email));
            Ok(())
        } else {
            logger::log(&format!(
                "Login for {} rejected (status {})",
                email,
                response.status().as_u16()
            ));
            Err(ApiError::LoginFailed(email.to_string()))
        }
    }

    async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let response = self.client.post(self.url(path)).json(body).send().await?;
        if redirects_to_login(&response) {
            return Err(ApiError::Unauthenticated);
        }
        let status = response.status().as_u16();
        let text = response.text().await?;
        parse_body(status, &text)
    }
}

fn redirects_to_login(response: &Response) -> bool {
    response.status().is_redirection()
        && response
            .headers()
            .get(LOCATION)
            .and_then(|location| location.to_str().ok())
            .is_some_and(|location| location.contains(LOGIN_PATH))
}

#[async_trait]
impl QuizBackend for HttpBackend {
    async fn generate_question(&self, content: &str) -> Result<String, ApiError> {
        let response: QuestionResponse = self
            .post(GENERATE_QUESTION_PATH, &ContentRequest { content })
            .await?;
        response.into_result()
    }

    async fn generate_flashcards(&self, content: &str) -> Result<Vec<String>, ApiError> {
        let response: FlashcardsResponse = self
            .post(GENERATE_FLASHCARDS_PATH, &ContentRequest { content })
            .await?;
        response.into_result()
    }

    async fn check_answer(
        &self,
        answer: &str,
        content: &str,
        question: &str,
    ) -> Result<String, ApiError> {
        let request = CheckAnswerRequest {
            answer,
            content,
            question,
        };
        let response: CheckAnswerResponse = self.post(CHECK_ANSWER_PATH, &request).await?;
        response.into_result()
    }
}
