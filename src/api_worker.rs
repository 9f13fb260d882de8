use crate::api::QuizBackend;
use crate::logger;
use crate::models::{ApiRequest, ApiResponse};
use std::sync::Arc;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;

/// Run every request as its own task so one slow call never holds up the
/// others. Responses come back in completion order. The worker exits once all
/// request senders are dropped.
pub fn spawn_api_worker(
    backend: Arc<dyn QuizBackend>,
    mut request_rx: UnboundedReceiver<ApiRequest>,
    response_tx: UnboundedSender<ApiResponse>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(request) = request_rx.recv().await {
            let backend = Arc::clone(&backend);
            let response_tx = response_tx.clone();
            tokio::spawn(async move {
                let response = execute_request(backend.as_ref(), request).await;
                if response_tx.send(response).is_err() {
                    logger::log("Response channel closed, dropping response");
                }
            });
        }
        logger::log("Worker channel disconnected, exiting");
    })
}

pub async fn execute_request(backend: &dyn QuizBackend, request: ApiRequest) -> ApiResponse {
    match request {
        ApiRequest::GenerateQuestion { token, content } => {
            logger::log(&format!("Requesting question (token {})", token.0));
            let result = backend.generate_question(&content).await.map_err(|e| {
                logger::log(&format!("Question generation failed: {}", e));
                e.to_string()
            });
            ApiResponse::Question { token, result }
        }
        ApiRequest::GenerateFlashcards { token, content } => {
            logger::log(&format!("Requesting flashcards (token {})", token.0));
            let result = backend.generate_flashcards(&content).await.map_err(|e| {
                logger::log(&format!("Flashcard generation failed: {}", e));
                e.to_string()
            });
            ApiResponse::Flashcards { token, result }
        }
        ApiRequest::CheckAnswer {
            token,
            question_id,
            question,
            answer,
            content,
        } => {
            logger::log(&format!(
                "Checking answer for question {} (token {})",
                question_id.0, token.0
            ));
            let result = backend
                .check_answer(&answer, &content, &question)
                .await
                .map_err(|e| {
                    logger::log(&format!(
                        "Answer check failed for question {}: {}",
                        question_id.0, e
                    ));
                    e.to_string()
                });
            ApiResponse::CheckAnswer {
                token,
                question_id,
                question,
                result,
            }
        }
    }
}
