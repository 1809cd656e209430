//! Chat-completion script generator
//!
//! One parameterized operation covers both the text-ad and the video-ad
//! scripts: the request variant selects the prompt template, the system
//! message and the response cap.

use reqwest::Client;
use serde::{Deserialize, Deserializer, Serialize};
use std::time::Duration;
use crate::constants::{CAMPAIGN_SCRIPT_MAX_TOKENS, VIDEO_SCRIPT_MAX_TOKENS};
use crate::core::config::AiConfig;
use crate::types::{Error, GenerationError, Result};
use crate::{log_debug, log_warn};

/// Longest error body kept in a `GenerationError::Status`
const MAX_ERROR_BODY_CHARS: usize = 512;

/// What to generate, with the caller's parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ScriptRequest {
    /// Text ad campaign script
    #[serde(rename_all = "camelCase")]
    Campaign {
        /// Campaign objective, e.g. "Lead Magnet"
        campaign_type: String,
        /// Target city
        city: String,
        /// Budget in USD, as entered
        #[serde(deserialize_with = "string_or_number")]
        budget: String,
        /// Agent name
        agent_name: String,
    },
    /// Video ad campaign script
    #[serde(rename_all = "camelCase")]
    Video {
        /// Video format, e.g. "Property Tour"
        video_type: String,
        /// Target city
        city: String,
        /// Agent name
        agent_name: String,
        /// Desired tone
        tone: String,
    },
}

impl ScriptRequest {
    /// System message for this kind of script
    pub fn system_prompt(&self) -> &'static str {
        match self {
            ScriptRequest::Campaign { .. } => "You are an expert in real estate marketing and Facebook Ads.",
            ScriptRequest::Video { .. } => "You are an expert in video marketing and Facebook Ads for real estate.",
        }
    }

    /// User message, targeting `market`
    pub fn user_prompt(&self, market: &str) -> String {
        match self {
            ScriptRequest::Campaign { campaign_type, city, budget, agent_name } => format!(
                "Generate a Facebook Ads campaign script for a real estate agent targeting the {market} market. \
                 Campaign Type: {campaign_type}. City: {city}. Budget: {budget} USD. Agent Name: {agent_name}. \
                 Include a detailed ad copy, headline, CTA, and creative description."
            ),
            ScriptRequest::Video { video_type, city, agent_name, tone } => format!(
                "Generate a detailed video campaign script for a real estate agent on Facebook Ads targeting the {market} market. \
                 Video Type: {video_type}. City: {city}. Agent Name: {agent_name}. Tone: {tone}. \
                 Include a storyboard idea, engaging video ad copy, voiceover text, and a clear call-to-action."
            ),
        }
    }

    /// Response length cap, in tokens
    pub fn max_tokens(&self) -> u32 {
        match self {
            ScriptRequest::Campaign { .. } => CAMPAIGN_SCRIPT_MAX_TOKENS,
            ScriptRequest::Video { .. } => VIDEO_SCRIPT_MAX_TOKENS,
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            ScriptRequest::Campaign { .. } => "campaign",
            ScriptRequest::Video { .. } => "video",
        }
    }
}

fn string_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(serde_json::Number),
    }
    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(s) => s,
        Raw::Number(n) => n.to_string(),
    })
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    temperature: f64,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

/// Client for the chat-completion endpoint
pub struct ScriptGenerator {
    client: Client,
    endpoint: String,
    model: String,
    temperature: f64,
    market: String,
    api_key: Option<String>,
}

impl std::fmt::Debug for ScriptGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScriptGenerator")
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl ScriptGenerator {
    /// Build a generator from configuration
    pub fn new(config: &AiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| Error::config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            model: config.model.clone(),
            temperature: config.temperature,
            market: config.market.clone(),
            api_key: config.api_key.clone().filter(|key| !key.trim().is_empty()),
        })
    }

    /// Whether a credential is configured
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Generate a script, returning the first choice's text
    pub async fn try_generate(&self, request: &ScriptRequest) -> std::result::Result<String, GenerationError> {
        let api_key = self.api_key.as_deref().ok_or(GenerationError::MissingApiKey)?;

        let prompt = request.user_prompt(&self.market);
        let body = ChatRequest {
            model: &self.model,
            messages: [
                ChatMessage { role: "system", content: request.system_prompt() },
                ChatMessage { role: "user", content: &prompt },
            ],
            temperature: self.temperature,
            max_tokens: request.max_tokens(),
        };

        log_debug!("Requesting {} script from {}", request.kind(), self.endpoint);
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            return Err(GenerationError::Status {
                status: status.as_u16(),
                body: text.chars().take(MAX_ERROR_BODY_CHARS).collect(),
            });
        }

        let parsed: ChatResponse = serde_json::from_str(&text)
            .map_err(|e| GenerationError::MalformedResponse(e.to_string()))?;
        let choice = parsed.choices.into_iter().next().ok_or(GenerationError::EmptyChoices)?;
        choice
            .message
            .content
            .ok_or_else(|| GenerationError::MalformedResponse("first choice has no message content".to_string()))
    }

    /// Generate a script; any failure comes back as `"Error: <cause>"`
    pub async fn generate(&self, request: &ScriptRequest) -> String {
        match self.try_generate(request).await {
            Ok(text) => text,
            Err(e) => {
                log_warn!("{} script generation failed: {}", request.kind(), e);
                Error::from(e).to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn campaign() -> ScriptRequest {
        ScriptRequest::Campaign {
            campaign_type: "Lead Magnet".into(),
            city: "Austin".into(),
            budget: "500".into(),
            agent_name: "Dana Reyes".into(),
        }
    }

    #[test]
    fn campaign_prompt() {
        assert_eq!(
            campaign().user_prompt("American"),
            "Generate a Facebook Ads campaign script for a real estate agent targeting the American market. \
             Campaign Type: Lead Magnet. City: Austin. Budget: 500 USD. Agent Name: Dana Reyes. \
             Include a detailed ad copy, headline, CTA, and creative description."
        );
        assert_eq!(campaign().max_tokens(), 500);
    }

    #[test]
    fn video_prompt_uses_market() {
        let video = ScriptRequest::Video {
            video_type: "Property Tour".into(),
            city: "Miami".into(),
            agent_name: "Sam".into(),
            tone: "Luxury".into(),
        };
        let prompt = video.user_prompt("Canadian");
        assert!(prompt.starts_with("Generate a detailed video campaign script for a real estate agent on Facebook Ads targeting the Canadian market. Video Type: Property Tour."));
        assert!(prompt.ends_with("Tone: Luxury. Include a storyboard idea, engaging video ad copy, voiceover text, and a clear call-to-action."));
        assert_eq!(video.max_tokens(), 600);
        assert_eq!(video.system_prompt(), "You are an expert in video marketing and Facebook Ads for real estate.");
    }

    #[test]
    fn request_from_json() {
        let parsed: ScriptRequest = serde_json::from_value(serde_json::json!({
            "kind": "campaign",
            "campaignType": "Lead Magnet",
            "city": "Austin",
            "budget": 500,
            "agentName": "Dana Reyes"
        }))
        .unwrap();
        assert_eq!(parsed, campaign());
    }

    #[test]
    fn debug_redacts_key() {
        let config = AiConfig {
            api_key: Some("sk-secret".into()),
            ..AiConfig::default()
        };
        let generator = ScriptGenerator::new(&config).unwrap();
        assert!(generator.has_api_key());
        assert!(!format!("{:?}", generator).contains("sk-secret"));
    }

    #[test]
    fn blank_key_counts_as_missing() {
        let config = AiConfig {
            api_key: Some("  ".into()),
            ..AiConfig::default()
        };
        assert!(!ScriptGenerator::new(&config).unwrap().has_api_key());
    }
}
