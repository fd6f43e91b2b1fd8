pub mod content;
pub mod prompt;
pub mod suggestion;

use async_trait::async_trait;
use rig::completion::Prompt;
use rig::providers::openrouter;
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error, info};

pub use prompt::{SparrowInput, UserProfile};
pub use suggestion::{ParsedReply, SuggestedAction, parse_reply};

pub const DEFAULT_MODEL: &str = "openai/gpt-4o-mini";

pub mod messages {
    pub const EMPTY_QUERY: &str = "Please provide a query.";
    pub const MISSING_TEXT: &str =
        "Sorry, I had trouble understanding the AI's response format. Please try again.";
    pub const ERROR_FRAGMENT_CHARS: usize = 50;
}

/// The text generation service behind the companion and content flows
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, preamble: &str, prompt: String) -> anyhow::Result<String>;
}

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("{0}")]
    Request(#[from] anyhow::Error),
    #[error("model returned no text")]
    MissingText,
}

/// Call the generator, treating a blank reply as missing output
pub async fn generate_text(
    generator: &dyn TextGenerator,
    preamble: &str,
    prompt: String,
) -> Result<String, GenerationError> {
    let text = generator.generate(preamble, prompt).await?;
    if text.trim().is_empty() {
        return Err(GenerationError::MissingText);
    }
    Ok(text)
}

/// OpenRouter-backed generator built on a rig agent
#[derive(Debug, Clone)]
pub struct OpenRouterGenerator {
    api_key: Option<String>,
    model: String,
}

impl OpenRouterGenerator {
    pub fn new(api_key: Option<String>, model: impl Into<String>) -> Self {
        Self {
            api_key,
            model: model.into(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl TextGenerator for OpenRouterGenerator {
    async fn generate(&self, preamble: &str, prompt: String) -> anyhow::Result<String> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| anyhow::anyhow!("OPENROUTER_API_KEY not set"))?;
        let client = openrouter::Client::new(api_key);
        let agent = client.agent(&self.model).preamble(preamble).build();
        let response = agent.prompt(prompt).await?;
        Ok(response)
    }
}

/// Reply shape returned to the presentation layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SparrowOutput {
    pub response: String,
    pub suggested_action: Option<SuggestedAction>,
}

impl SparrowOutput {
    pub fn message(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
            suggested_action: None,
        }
    }
}

impl From<ParsedReply> for SparrowOutput {
    fn from(reply: ParsedReply) -> Self {
        Self {
            response: reply.body,
            suggested_action: reply.suggested_action,
        }
    }
}

/// Sparrow, the site's chat companion.
///
/// Every call produces a displayable reply: empty queries, generator errors
/// and missing model text all map to fixed messages.
#[derive(Clone)]
pub struct SparrowCompanion {
    generator: Arc<dyn TextGenerator>,
}

impl SparrowCompanion {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    pub async fn respond(&self, input: SparrowInput) -> SparrowOutput {
        if !input.is_valid() {
            return SparrowOutput::message(messages::EMPTY_QUERY);
        }
        let input = input.sanitized();
        let prompt = prompt::render_prompt(&input);

        info!("Calling Sparrow generator for page {:?}", input.current_page);
        match generate_text(self.generator.as_ref(), prompt::SPARROW_PREAMBLE, prompt).await {
            Ok(raw) => {
                debug!("Sparrow raw output: {}", raw);
                let output = SparrowOutput::from(parse_reply(&raw));
                info!(
                    "Sparrow replied with suggestion: {:?}",
                    output.suggested_action.as_ref().map(SuggestedAction::label)
                );
                output
            }
            Err(GenerationError::MissingText) => {
                error!("Sparrow generator returned no text for query: {}", input.query);
                SparrowOutput::message(messages::MISSING_TEXT)
            }
            Err(GenerationError::Request(e)) => {
                error!("Sparrow generation failed: {:#}", e);
                SparrowOutput::message(failure_message(&e.to_string()))
            }
        }
    }
}

/// Failure reply carrying a truncated fragment of the underlying error
pub fn failure_message(error_message: &str) -> String {
    let fragment: String = error_message
        .chars()
        .take(messages::ERROR_FRAGMENT_CHARS)
        .collect();
    let ellipsis = if error_message.chars().count() > messages::ERROR_FRAGMENT_CHARS {
        "..."
    } else {
        ""
    };
    format!(
        "Sorry, I encountered an issue processing that request. ({}{}) Please try again.",
        fragment, ellipsis
    )
}

#[cfg(test)]
pub mod testing {
    use super::*;
    use std::sync::Mutex;

    /// Generator returning a canned reply and recording each prompt
    pub struct ScriptedGenerator {
        reply: Result<String, String>,
        pub prompts: Mutex<Vec<String>>,
    }

    impl ScriptedGenerator {
        pub fn replying(text: &str) -> Arc<Self> {
            Arc::new(Self {
                reply: Ok(text.to_string()),
                prompts: Mutex::new(Vec::new()),
            })
        }

        pub fn failing(message: &str) -> Arc<Self> {
            Arc::new(Self {
                reply: Err(message.to_string()),
                prompts: Mutex::new(Vec::new()),
            })
        }

        pub fn calls(&self) -> usize {
            self.prompts.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl TextGenerator for ScriptedGenerator {
        async fn generate(&self, _preamble: &str, prompt: String) -> anyhow::Result<String> {
            self.prompts.lock().unwrap().push(prompt);
            self.reply.clone().map_err(|e| anyhow::anyhow!(e))
        }
    }
}
