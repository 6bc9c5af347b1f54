use serde_json::{json, Value};
use tracing::{debug, info, warn};

use crate::config::{AiConfig, AiMode};
use crate::error::{AppError, AppResult};
use crate::services::prompt::Prompt;

/// How much of an unrecognised body is echoed back to the user.
const RAW_PREFIX_CHARS: usize = 300;

/// Feedback served when no live key is configured.
pub const DEMO_FEEDBACK: &str = "
📄 Demo Resume Analysis (no live AI key configured)

⭐ Overall Resume Score: 8.3 / 10

✅ Strengths:
• Clear sectioning for Education, Skills, and Experience.
• Bullet points use good action verbs.
• Experience appears relevant to the target domain.
• Contact information is easy to find.

⚠️ Areas for Improvement:
• Add measurable achievements (numbers, %, counts) to show impact.
• Tailor your summary/profile more clearly to a specific role.
• Expand the skills section with both technical and soft skills.
• Ensure consistent date formatting across all experiences.

💡 Recommendation:
Customize this resume slightly for each job by mirroring key skills and keywords from the job description. This will improve both recruiter interest and ATS compatibility.";

/// The shapes a generateContent reply can take.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AiResponse {
    Success { text: String },
    ApiError { message: String },
    Unrecognized { raw_prefix: String },
}

impl AiResponse {
    pub fn into_result(self) -> AppResult<String> {
        match self {
            AiResponse::Success { text } => Ok(text),
            AiResponse::ApiError { message } => Err(AppError::RemoteApi { message }),
            AiResponse::Unrecognized { raw_prefix } => {
                Err(AppError::UnexpectedResponse { raw_prefix })
            }
        }
    }
}

/// Classifies a response body. The HTTP status is not consulted.
pub fn parse_response(body: &str) -> AiResponse {
    let value: Value = match serde_json::from_str(body) {
        Ok(value) => value,
        Err(_) => return unrecognized(body),
    };

    if let Some(text) = value
        .pointer("/candidates/0/content/parts/0/text")
        .and_then(Value::as_str)
    {
        return AiResponse::Success {
            text: text.to_string(),
        };
    }

    if let Some(message) = value.pointer("/error/message").and_then(Value::as_str) {
        return AiResponse::ApiError {
            message: message.to_string(),
        };
    }

    unrecognized(&value.to_string())
}

fn unrecognized(serialized: &str) -> AiResponse {
    let mut raw_prefix: String = serialized.chars().take(RAW_PREFIX_CHARS).collect();
    raw_prefix.push_str("...");
    AiResponse::Unrecognized { raw_prefix }
}

pub fn request_body(prompt: &Prompt) -> Value {
    json!({
        "contents": [{
            "parts": [{ "text": prompt.as_str() }]
        }]
    })
}

/// Client for the Gemini `generateContent` endpoint.
#[derive(Clone)]
pub struct GeminiClient {
    client: reqwest::Client,
    config: AiConfig,
}

impl GeminiClient {
    pub fn new(config: AiConfig) -> AppResult<Self> {
        // One request per analysis; idle connections are not kept between analyses.
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .pool_max_idle_per_host(0)
            .build()
            .map_err(|e| AppError::config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &AiConfig {
        &self.config
    }

    pub fn is_demo(&self) -> bool {
        self.config.mode == AiMode::Demo
    }

    pub fn endpoint_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.endpoint_base.trim_end_matches('/'),
            self.config.model
        )
    }

    /// Sends one review request, or returns [`DEMO_FEEDBACK`] without touching the network.
    pub async fn review(&self, prompt: &Prompt) -> AppResult<String> {
        let api_key = match &self.config.mode {
            AiMode::Demo => {
                info!("Demo mode active, returning canned feedback");
                return Ok(DEMO_FEEDBACK.to_string());
            }
            AiMode::Live { api_key } => api_key,
        };

        let url = self.endpoint_url();
        debug!(
            model = %self.config.model,
            prompt_chars = prompt.as_str().chars().count(),
            "Sending review request"
        );

        let response = self
            .client
            .post(&url)
            .query(&[("key", api_key.as_str())])
            .header("Content-Type", "application/json")
            .json(&request_body(prompt))
            .send()
            .await
            .map_err(|e| AppError::network(transport_error(e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AppError::network(transport_error(e)))?;

        match parse_response(&body) {
            AiResponse::Success { text } => {
                info!(status = %status, feedback_chars = text.chars().count(), "Review received");
                Ok(text)
            }
            other => {
                warn!(status = %status, response = ?other, "Review request did not succeed");
                other.into_result()
            }
        }
    }
}

// reqwest errors carry the URL, which includes the key.
fn transport_error(err: reqwest::Error) -> String {
    let err = err.without_url();
    if err.is_timeout() {
        format!("request timed out ({})", err)
    } else {
        err.to_string()
    }
}
