//! Capability boundary for abstractive summaries.
//!
//! The summarizer only ever sees [`TextGenerator`]: prompt in, text out. The
//! production implementation is [`GroqClient`], which talks to an
//! OpenAI-compatible chat-completions endpoint over a blocking HTTP client.
//! Tests substitute deterministic stubs.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_ENDPOINT: &str = "https://api.groq.com/openai/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "gemma2-9b-it";
pub const DEFAULT_TEMPERATURE: f32 = 0.3;
pub const DEFAULT_MAX_TOKENS: u32 = 500;
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("no API key configured (set GROQ_API_KEY)")]
    MissingApiKey,

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("service responded with HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("service returned no completion text")]
    EmptyResponse,
}

/// Anything that can turn a prompt into generated text.
pub trait TextGenerator: Send + Sync {
    fn generate(&self, prompt: &str) -> Result<String, GenerationError>;
}

/// Decoding parameters sent with every request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationParams {
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }
}

/// Instruction template wrapped around the document text.
pub fn summary_prompt(text: &str) -> String {
    format!(
        "Please provide a concise summary of the following text.\n\
         Focus on the main points and key insights while maintaining clarity and coherence:\n\
         \n\
         {text}\n\
         \n\
         Summary:"
    )
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize, Debug)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize, Debug)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize, Debug)]
struct ChatChoiceMessage {
    content: Option<String>,
}

/// Groq chat-completions client. Each call blocks the calling thread.
///
/// The underlying `reqwest::blocking::Client` owns its own runtime, so it must
/// be created, used and dropped outside any async context.
pub struct GroqClient {
    endpoint: String,
    api_key: String,
    params: GenerationParams,
    client: reqwest::blocking::Client,
}

impl GroqClient {
    pub fn new(api_key: impl Into<String>, params: GenerationParams) -> Result<Self, GenerationError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(GenerationError::MissingApiKey);
        }
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()?;
        Ok(Self { endpoint: DEFAULT_ENDPOINT.to_string(), api_key, params, client })
    }

    /// Build from `GROQ_API_KEY`, with optional `GROQ_ENDPOINT` and `PRECIS_MODEL` overrides.
    pub fn from_env() -> Result<Self, GenerationError> {
        let api_key = std::env::var("GROQ_API_KEY").map_err(|_| GenerationError::MissingApiKey)?;
        let mut params = GenerationParams::default();
        if let Ok(model) = std::env::var("PRECIS_MODEL") {
            if !model.trim().is_empty() { params.model = model; }
        }
        let mut client = Self::new(api_key, params)?;
        if let Ok(endpoint) = std::env::var("GROQ_ENDPOINT") {
            if !endpoint.trim().is_empty() { client = client.with_endpoint(endpoint); }
        }
        Ok(client)
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn endpoint(&self) -> &str { &self.endpoint }

    pub fn params(&self) -> &GenerationParams { &self.params }
}

impl TextGenerator for GroqClient {
    fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        let body = ChatRequest {
            model: &self.params.model,
            messages: vec![ChatMessage { role: "user", content: prompt }],
            temperature: self.params.temperature,
            max_tokens: self.params.max_tokens,
        };
        tracing::debug!(model = %self.params.model, endpoint = %self.endpoint, "requesting completion");
        let resp = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().unwrap_or_default();
            return Err(GenerationError::Status { status: status.as_u16(), body });
        }
        let parsed: ChatResponse = resp.json()?;
        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or(GenerationError::EmptyResponse)
    }
}

/// Stand-in used when no API key is available; every call fails.
#[derive(Debug, Default, Clone, Copy)]
pub struct Unconfigured;

impl TextGenerator for Unconfigured {
    fn generate(&self, _prompt: &str) -> Result<String, GenerationError> {
        Err(GenerationError::MissingApiKey)
    }
}

/// Groq client from the environment, or [`Unconfigured`] when that fails.
///
/// Startup never aborts over a missing key: the abstractive path reports the
/// problem in its result string instead.
pub fn load_generator() -> Arc<dyn TextGenerator> {
    match GroqClient::from_env() {
        Ok(client) => {
            tracing::info!(model = %client.params().model, "abstractive summarization enabled");
            Arc::new(client)
        }
        Err(err) => {
            tracing::warn!(error = %err, "abstractive summarization unavailable");
            Arc::new(Unconfigured)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{BufRead, BufReader, Read, Write};
    use std::net::TcpListener;
    use std::thread::{self, JoinHandle};

    /// What a one-shot local endpoint saw: lowercased header lines and the body.
    struct Captured {
        headers: Vec<String>,
        body: String,
    }

    /// Answer exactly one request on 127.0.0.1 with a canned JSON response.
    fn serve_once(status: &'static str, response: &'static str) -> (String, JoinHandle<Captured>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut reader = BufReader::new(stream.try_clone().unwrap());
            let mut headers = Vec::new();
            let mut content_length = 0usize;
            loop {
                let mut line = String::new();
                reader.read_line(&mut line).unwrap();
                let line = line.trim_end().to_string();
                if line.is_empty() { break; }
                if let Some((name, value)) = line.split_once(':') {
                    if name.eq_ignore_ascii_case("content-length") {
                        content_length = value.trim().parse().unwrap();
                    }
                }
                headers.push(line.to_ascii_lowercase());
            }
            let mut body = vec![0u8; content_length];
            reader.read_exact(&mut body).unwrap();
            write!(
                stream,
                "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{response}",
                response.len()
            )
            .unwrap();
            Captured { headers, body: String::from_utf8(body).unwrap() }
        });
        (format!("http://{addr}/openai/v1/chat/completions"), handle)
    }

    fn client_for(endpoint: String) -> GroqClient {
        GroqClient::new("test-key", GenerationParams::default())
            .expect("client builds")
            .with_endpoint(endpoint)
    }

    #[test]
    fn prompt_wraps_text() {
        let p = summary_prompt("The body.");
        assert!(p.starts_with("Please provide a concise summary"));
        assert!(p.contains("main points and key insights"));
        assert!(p.contains("clarity and coherence"));
        assert!(p.contains("\nThe body.\n"));
        assert!(p.ends_with("Summary:"));
    }

    #[test]
    fn default_params_favor_determinism() {
        let params = GenerationParams::default();
        assert_eq!(params.model, "gemma2-9b-it");
        assert!(params.temperature < 0.5);
        assert_eq!(params.max_tokens, 500);
    }

    #[test]
    fn blank_key_is_rejected() {
        let err = GroqClient::new("  ", GenerationParams::default()).err();
        assert!(matches!(err, Some(GenerationError::MissingApiKey)));
    }

    #[test]
    fn client_overrides_endpoint() {
        let client = GroqClient::new("key", GenerationParams::default())
            .expect("client builds")
            .with_endpoint("http://127.0.0.1:9/v1/chat/completions");
        assert_eq!(client.endpoint(), "http://127.0.0.1:9/v1/chat/completions");
        assert_eq!(client.params().max_tokens, DEFAULT_MAX_TOKENS);
    }

    #[test]
    fn unreachable_endpoint_is_an_http_error() {
        let client = GroqClient::new("key", GenerationParams::default())
            .expect("client builds")
            .with_endpoint("http://127.0.0.1:9/v1/chat/completions");
        assert!(matches!(client.generate("hi"), Err(GenerationError::Http(_))));
    }

    #[test]
    fn chat_response_parses_first_choice() {
        let json = r#"{"choices":[{"message":{"role":"assistant","content":"short"}}]}"#;
        let parsed: ChatResponse = serde_json::from_str(json).expect("valid json");
        assert_eq!(parsed.choices[0].message.content.as_deref(), Some("short"));
    }

    #[test]
    fn unconfigured_always_fails() {
        assert!(matches!(Unconfigured.generate("x"), Err(GenerationError::MissingApiKey)));
    }

    #[test]
    fn sends_one_user_message_with_decoding_params() {
        let (endpoint, server) = serve_once(
            "200 OK",
            r#"{"choices":[{"message":{"role":"assistant","content":"ok sum"}}]}"#,
        );
        let out = client_for(endpoint).generate("the prompt").unwrap();
        assert_eq!(out, "ok sum");

        let seen = server.join().unwrap();
        assert!(seen.headers.iter().any(|h| h.starts_with("post /openai/v1/chat/completions")));
        assert!(seen.headers.iter().any(|h| h == "authorization: bearer test-key"));
        let body: serde_json::Value = serde_json::from_str(&seen.body).unwrap();
        assert_eq!(body["model"], DEFAULT_MODEL);
        assert!((body["temperature"].as_f64().unwrap() - 0.3).abs() < 1e-6);
        assert_eq!(body["max_tokens"], 500);
        let messages = body["messages"].as_array().unwrap();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0]["role"], "user");
        assert_eq!(messages[0]["content"], "the prompt");
    }

    #[test]
    fn error_status_keeps_code_and_body() {
        let (endpoint, server) = serve_once("401 Unauthorized", r#"{"error":"bad key"}"#);
        match client_for(endpoint).generate("x") {
            Err(GenerationError::Status { status, body }) => {
                assert_eq!(status, 401);
                assert!(body.contains("bad key"));
            }
            other => panic!("expected Status error, got {other:?}"),
        }
        server.join().unwrap();
    }

    #[test]
    fn no_choices_is_an_empty_response() {
        let (endpoint, server) = serve_once("200 OK", r#"{"choices":[]}"#);
        assert!(matches!(client_for(endpoint).generate("x"), Err(GenerationError::EmptyResponse)));
        server.join().unwrap();
    }

    #[test]
    fn missing_key_falls_back_to_unconfigured() {
        std::env::remove_var("GROQ_API_KEY");
        let generator = load_generator();
        assert!(matches!(generator.generate("x"), Err(GenerationError::MissingApiKey)));
    }
}
