//! Generation client: remote chat-completion call with local fallback.
//!
//! Without an API key every request is served by the deterministic
//! template generator. With a key, the prompt goes to a chat-completion
//! endpoint that is instructed to reply with a strict-JSON design
//! document; transport or parse failures surface as errors and leave the
//! caller's scene untouched. A busy flag rejects a second request while
//! one is outstanding - there is no queue and no cancellation.

use std::sync::atomic::{AtomicBool, Ordering};

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{GenerateError, GenerateResult};
use crate::proposal::GenerationResult;
use crate::template;

/// Default chat-completion endpoint.
pub const DEFAULT_API_URL: &str = "https://api.minimaxi.com/v1/text/chatcompletion_v2";

/// Model requested from the endpoint.
const MODEL: &str = "abab6.5s-chat";

/// Sampling temperature for design generation.
const TEMPERATURE: f32 = 0.7;

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: &'static str,
    messages: Vec<ChatMessage>,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

/// Resets the busy flag when the request finishes, on every exit path.
struct InFlightGuard<'a>(&'a AtomicBool);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// Layout generation client.
pub struct CoverGenerator {
    client: reqwest::Client,
    api_url: String,
    api_key: Option<String>,
    in_flight: AtomicBool,
}

impl CoverGenerator {
    /// Create a generator without a key: every request uses the local
    /// template generator.
    #[must_use]
    pub fn offline() -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url: DEFAULT_API_URL.to_string(),
            api_key: None,
            in_flight: AtomicBool::new(false),
        }
    }

    /// Create a generator that calls the default remote endpoint.
    #[must_use]
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(api_key.into()),
            ..Self::offline()
        }
    }

    /// Override the endpoint URL, validating it first.
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError::InvalidUrl`] when the URL does not parse.
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> GenerateResult<Self> {
        let api_url = api_url.into();
        Url::parse(&api_url).map_err(|e| GenerateError::InvalidUrl(format!("{api_url}: {e}")))?;
        self.api_url = api_url;
        Ok(self)
    }

    /// Whether a request is currently outstanding.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Generate a layout proposal for the prompt and canvas size.
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError::Busy`] while another request is in flight,
    /// and transport/parse errors for a configured remote call. The
    /// keyless path is infallible.
    pub async fn generate(
        &self,
        prompt: &str,
        canvas_width: u32,
        canvas_height: u32,
    ) -> GenerateResult<GenerationResult> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(GenerateError::Busy);
        }
        let _guard = InFlightGuard(&self.in_flight);

        let Some(api_key) = &self.api_key else {
            tracing::debug!("no API key configured, using template generation");
            return Ok(template::generate(prompt, canvas_width, canvas_height));
        };

        self.remote_generate(api_key, prompt, canvas_width, canvas_height)
            .await
    }

    async fn remote_generate(
        &self,
        api_key: &str,
        prompt: &str,
        canvas_width: u32,
        canvas_height: u32,
    ) -> GenerateResult<GenerationResult> {
        let request = ChatRequest {
            model: MODEL,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system_prompt(canvas_width, canvas_height),
                },
                ChatMessage {
                    role: "user",
                    content: prompt.to_string(),
                },
            ],
            temperature: TEMPERATURE,
        };

        let response: ChatResponse = self
            .client
            .post(&self.api_url)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let content = response
            .choices
            .first()
            .map(|choice| choice.message.content.as_str())
            .ok_or_else(|| GenerateError::MalformedResponse("reply has no choices".to_string()))?;

        let blob = extract_json_blob(content).ok_or_else(|| {
            GenerateError::MalformedResponse("reply contains no JSON object".to_string())
        })?;

        serde_json::from_str(blob)
            .map_err(|e| GenerateError::MalformedResponse(format!("design JSON: {e}")))
    }
}

/// Instructions given to the remote model, pinned to strict JSON output.
fn system_prompt(canvas_width: u32, canvas_height: u32) -> String {
    format!(
        "You are an expert graphic designer for video covers and social media posts. \
         Generate a JSON response describing the design elements for a cover image.\n\
         Canvas size: {canvas_width}x{canvas_height}\n\n\
         Respond with ONLY valid JSON in this exact format:\n\
         {{\"elements\": [{{\"type\": \"rectangle\" | \"text\" | \"circle\", \
         \"x\": number, \"y\": number, \"width\": number, \"height\": number, \
         \"rotation\": number, \"opacity\": number, \
         \"fill\": \"#hex color\" (for shapes), \"color\": \"#hex color\" (for text), \
         \"text\": \"text content\" (for text elements), \"fontSize\": number, \
         \"fontFamily\": \"font name\", \"fontWeight\": number, \
         \"gradient\": {{\"type\": \"linear\" | \"radial\", \"colors\": [\"#c1\", \"#c2\"], \"angle\": number}}}}], \
         \"description\": \"brief description of the design\"}}\n\n\
         Create a visually appealing cover with a gradient or solid background, \
         a large bold main title, and secondary text or decorative elements. \
         Use modern color schemes based on the prompt. Respond with ONLY JSON, no other text."
    )
}

/// The outermost brace-delimited region of a chat reply.
///
/// Models wrap their JSON in prose or code fences often enough that the
/// reply is scanned for the first `{` through the last `}`.
fn extract_json_blob(content: &str) -> Option<&str> {
    let start = content.find('{')?;
    let end = content.rfind('}')?;
    (end > start).then(|| &content[start..=end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_json_blob() {
        assert_eq!(extract_json_blob("{\"a\":1}"), Some("{\"a\":1}"));
        assert_eq!(
            extract_json_blob("Here you go:\n```json\n{\"a\":1}\n```\nEnjoy"),
            Some("{\"a\":1}"),
        );
        assert_eq!(extract_json_blob("no json here"), None);
        assert_eq!(extract_json_blob("}{"), None);
    }

    #[test]
    fn test_invalid_api_url_rejected() {
        let result = CoverGenerator::with_api_key("k").with_api_url("not a url");
        assert!(matches!(result, Err(GenerateError::InvalidUrl(_))));
    }

    #[tokio::test]
    async fn test_offline_generation_is_deterministic() {
        let generator = CoverGenerator::offline();
        let a = generator.generate("neon cover", 1280, 720).await.expect("a");
        let b = generator.generate("neon cover", 1280, 720).await.expect("b");
        assert_eq!(
            serde_json::to_string(&a).expect("json a"),
            serde_json::to_string(&b).expect("json b"),
        );
    }

    #[tokio::test]
    async fn test_busy_flag_resets_after_completion() {
        let generator = CoverGenerator::offline();
        assert!(!generator.is_busy());
        generator.generate("p", 100, 100).await.expect("first");
        assert!(!generator.is_busy(), "guard releases the flag");
        generator.generate("p", 100, 100).await.expect("second");
    }
}
