//! Orchestration services. Each public function is one user-facing task:
//! it assembles a prompt, calls the model through [`crate::llm::ModelClient`],
//! parses and validates the reply, and translates failures into the
//! localized [`DermaError`] taxonomy. Services never retry.

pub mod analysis;
pub mod rag;
pub mod report;
pub mod skincare;

use serde::de::DeserializeOwned;
use tracing::error;

use crate::error::DermaError;
use crate::utils::image::strip_code_fence;
use crate::utils::truncate_for_log;

/// Parses a structured model reply, tolerating a stray Markdown fence.
/// The raw text goes to the log; the caller only ever sees `user_message`.
pub(crate) fn parse_structured<T: DeserializeOwned>(
    raw: &str,
    user_message: &str,
) -> Result<T, DermaError> {
    let cleaned = strip_code_fence(raw);
    serde_json::from_str(&cleaned).map_err(|err| {
        error!(
            "Model reply was not the expected JSON: {err}; raw={}",
            truncate_for_log(raw, 600)
        );
        DermaError::parse(
            user_message,
            format!("{err}; raw: {}", truncate_for_log(raw, 600)),
        )
    })
}

pub(crate) fn generation_error(user_message: &str, err: anyhow::Error) -> DermaError {
    error!("Model call failed: {err:#}");
    DermaError::generation(user_message, format!("{err:#}"))
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use anyhow::anyhow;
    use async_trait::async_trait;

    use crate::llm::{GenerateRequest, ModelClient};

    /// Replays a scripted sequence of model replies and records every
    /// request it receives.
    pub struct ScriptedClient {
        responses: Mutex<VecDeque<anyhow::Result<String>>>,
        pub calls: AtomicUsize,
        pub requests: Mutex<Vec<GenerateRequest>>,
    }

    impl ScriptedClient {
        pub fn with_responses(responses: Vec<anyhow::Result<String>>) -> Self {
            ScriptedClient {
                responses: Mutex::new(responses.into()),
                calls: AtomicUsize::new(0),
                requests: Mutex::new(Vec::new()),
            }
        }

        pub fn replying(text: &str) -> Self {
            Self::with_responses(vec![Ok(text.to_string())])
        }

        pub fn failing(message: &str) -> Self {
            let message = message.to_string();
            Self::with_responses(vec![Err(anyhow!(message))])
        }

        pub fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        pub fn last_request(&self) -> GenerateRequest {
            self.requests
                .lock()
                .unwrap()
                .last()
                .cloned()
                .expect("no request recorded")
        }
    }

    #[async_trait]
    impl ModelClient for ScriptedClient {
        async fn generate_content(&self, request: GenerateRequest) -> anyhow::Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.requests.lock().unwrap().push(request);
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(anyhow!("no scripted response left")))
        }
    }
}
