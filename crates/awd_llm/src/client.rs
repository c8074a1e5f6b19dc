use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use awd_core::Result;
use serde_json::Value;
use tracing::{debug, warn};

/// The one model identifier the backend currently accepts. Stale
/// configuration referencing retired model families is rewritten to this.
pub const CANONICAL_MODEL: &str = "llama-3.3-70b-versatile";

/// Attempts made for a standard generation call, including the first.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 2;

const ITEMS_WRAP_INSTRUCTION: &str = "\n\nCRITICAL: You must return the array as a JSON object with a single key 'items' containing the array. Do not return just a raw array.";

#[derive(Debug, Clone)]
pub struct ChatRequest {
    pub system_prompt: String,
    pub user_prompt: String,
    pub model: String,
    pub temperature: f32,
    /// Ask the backend for structured (JSON object) output.
    pub json_mode: bool,
}

impl ChatRequest {
    pub fn new(system_prompt: impl Into<String>, user_prompt: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            system_prompt: system_prompt.into(),
            user_prompt: user_prompt.into(),
            model: model.into(),
            temperature: 0.1,
            json_mode: true,
        }
    }
}

/// A chat-completion backend. One call type: system prompt + user prompt in,
/// text content out. Implemented over HTTP in production and by mocks in
/// tests.
#[async_trait]
pub trait GenerationBackend: Send + Sync + fmt::Debug {
    fn name(&self) -> &str;

    async fn chat(&self, request: &ChatRequest) -> Result<String>;
}

/// Wraps a [`GenerationBackend`] with retry/backoff, model-name
/// normalization, and the single-key-object workaround for backends that
/// reject bare top-level arrays in structured-output mode. Callers always
/// receive the logical payload as text.
#[derive(Debug, Clone)]
pub struct GenerationClient {
    backend: Arc<dyn GenerationBackend>,
    base_delay: Duration,
}

impl GenerationClient {
    pub fn new(backend: Arc<dyn GenerationBackend>) -> Self {
        Self {
            backend,
            base_delay: Duration::from_secs(2),
        }
    }

    /// Override the backoff base delay. Tests use a millisecond base.
    pub fn with_base_delay(mut self, base_delay: Duration) -> Self {
        self.base_delay = base_delay;
        self
    }

    pub async fn generate(&self, request: ChatRequest) -> Result<String> {
        self.generate_with_budget(request, DEFAULT_MAX_ATTEMPTS).await
    }

    /// Like [`generate`](Self::generate) with an explicit attempt budget.
    /// Transient errors are retried with exponential backoff; permanent
    /// errors and exhausted budgets propagate to the caller.
    pub async fn generate_with_budget(&self, mut request: ChatRequest, max_attempts: u32) -> Result<String> {
        request.model = normalize_model(&request.model);
        if request.json_mode {
            request.system_prompt.push_str(ITEMS_WRAP_INSTRUCTION);
        }

        let mut attempt = 0;
        loop {
            match self.backend.chat(&request).await {
                Ok(raw) => return Ok(unwrap_items(raw)),
                Err(e) if e.is_transient() && attempt + 1 < max_attempts => {
                    let delay = self.base_delay * 2u32.pow(attempt);
                    warn!(
                        "{} call failed (attempt {}/{}), retrying in {:?}: {}",
                        self.backend.name(),
                        attempt + 1,
                        max_attempts,
                        delay,
                        e
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

/// Rewrite legacy model aliases to the one accepted identifier.
pub fn normalize_model(model: &str) -> String {
    if model.contains("gemini") || model.contains("llama-3.") || model.contains("llama3") {
        CANONICAL_MODEL.to_string()
    } else {
        model.to_string()
    }
}

/// Undo the forced `{"items": [...]}` wrapping so downstream components see
/// the plain payload. Non-JSON responses pass through untouched.
fn unwrap_items(raw: String) -> String {
    match serde_json::from_str::<Value>(&raw) {
        Ok(Value::Object(map)) => match map.get("items") {
            Some(items) => {
                debug!("unwrapped 'items' envelope from backend response");
                items.to_string()
            }
            None => raw,
        },
        _ => raw,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use awd_core::Error;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[derive(Debug)]
    struct ScriptedBackend {
        calls: AtomicU32,
        responses: Vec<std::result::Result<String, &'static str>>,
    }

    impl ScriptedBackend {
        fn new(responses: Vec<std::result::Result<String, &'static str>>) -> Self {
            Self {
                calls: AtomicU32::new(0),
                responses,
            }
        }
    }

    #[async_trait]
    impl GenerationBackend for ScriptedBackend {
        fn name(&self) -> &str {
            "scripted"
        }

        async fn chat(&self, _request: &ChatRequest) -> Result<String> {
            let i = self.calls.fetch_add(1, Ordering::SeqCst) as usize;
            match self.responses.get(i.min(self.responses.len() - 1)).unwrap() {
                Ok(s) => Ok(s.clone()),
                Err(kind) if *kind == "transient" => {
                    Err(Error::TransientBackend("rate limited".to_string()))
                }
                Err(_) => Err(Error::PermanentBackend("invalid api key".to_string())),
            }
        }
    }

    fn client(backend: ScriptedBackend) -> (Arc<ScriptedBackend>, GenerationClient) {
        let backend = Arc::new(backend);
        let client = GenerationClient::new(backend.clone()).with_base_delay(Duration::from_millis(1));
        (backend, client)
    }

    #[test]
    fn legacy_model_aliases_rewrite_to_canonical() {
        assert_eq!(normalize_model("gemini-1.5-pro"), CANONICAL_MODEL);
        assert_eq!(normalize_model("llama3-8b"), CANONICAL_MODEL);
        assert_eq!(normalize_model("llama-3.1-8b-instant"), CANONICAL_MODEL);
        assert_eq!(normalize_model("mixtral-8x7b"), "mixtral-8x7b");
    }

    #[test]
    fn items_envelope_is_unwrapped() {
        assert_eq!(unwrap_items(r#"{"items": [1, 2]}"#.to_string()), "[1,2]");
        assert_eq!(unwrap_items(r#"{"other": 1}"#.to_string()), r#"{"other": 1}"#);
        assert_eq!(unwrap_items("not json".to_string()), "not json");
    }

    #[tokio::test]
    async fn retries_transient_errors_then_succeeds() {
        let (backend, client) = client(ScriptedBackend::new(vec![
            Err("transient"),
            Ok(r#"{"items": []}"#.to_string()),
        ]));
        let raw = client
            .generate(ChatRequest::new("sys", "user", CANONICAL_MODEL))
            .await
            .unwrap();
        assert_eq!(raw, "[]");
        assert_eq!(backend.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn exhausted_budget_propagates_transient_error() {
        let (backend, client) = client(ScriptedBackend::new(vec![Err("transient")]));
        let err = client
            .generate(ChatRequest::new("sys", "user", CANONICAL_MODEL))
            .await
            .unwrap_err();
        assert!(err.is_transient());
        assert_eq!(backend.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn permanent_errors_do_not_retry() {
        let (backend, client) = client(ScriptedBackend::new(vec![Err("permanent")]));
        let err = client
            .generate(ChatRequest::new("sys", "user", CANONICAL_MODEL))
            .await
            .unwrap_err();
        assert!(!err.is_transient());
        assert_eq!(backend.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn reranker_budget_allows_a_third_attempt() {
        let (backend, client) = client(ScriptedBackend::new(vec![
            Err("transient"),
            Err("transient"),
            Ok("[]".to_string()),
        ]));
        let raw = client
            .generate_with_budget(ChatRequest::new("sys", "user", CANONICAL_MODEL), 3)
            .await
            .unwrap();
        assert_eq!(raw, "[]");
        assert_eq!(backend.calls.load(Ordering::SeqCst), 3);
    }
}
