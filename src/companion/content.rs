use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tracing::{error, info};

use super::{TextGenerator, generate_text};

pub const EMPTY_TOPIC: &str = "Please provide a topic.";
pub const GENERATION_FAILED: &str =
    "Content generation failed: AI encountered an issue generating content.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentType {
    NewsArticle,
    EventDescription,
    SubOrgDescription,
    Other,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Formal,
    Informal,
    Engaging,
    #[default]
    Informative,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Length {
    Short,
    #[default]
    Medium,
    Long,
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ContentType::NewsArticle => "news_article",
            ContentType::EventDescription => "event_description",
            ContentType::SubOrgDescription => "sub_org_description",
            ContentType::Other => "other",
        };
        f.write_str(name)
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Tone::Formal => "formal",
            Tone::Informal => "informal",
            Tone::Engaging => "engaging",
            Tone::Informative => "informative",
        };
        f.write_str(name)
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Length::Short => "short",
            Length::Medium => "medium",
            Length::Long => "long",
        };
        f.write_str(name)
    }
}

/// Request payload for admin content generation
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentInput {
    pub content_type: ContentType,
    #[serde(default)]
    pub topic: String,
    #[serde(default)]
    pub key_points: Vec<String>,
    #[serde(default)]
    pub tone: Tone,
    #[serde(default)]
    pub length: Length,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentOutput {
    pub generated_content: String,
}

impl GenerateContentOutput {
    fn new(content: impl Into<String>) -> Self {
        Self {
            generated_content: content.into(),
        }
    }
}

const CONTENT_PREAMBLE: &str = r#"You are an AI assistant helping administrators of the ICCT Colleges Computer Explorer Society (CES) - Antipolo Campus website generate content. Your task is to create well-written content based on the provided details.
"#;

pub fn render_content_prompt(input: &GenerateContentInput) -> String {
    let mut prompt = format!(
        "Content Type: {}\nTopic/Event: {}\nDesired Tone: {}\nDesired Length: {}\n",
        input.content_type, input.topic, input.tone, input.length
    );

    if !input.key_points.is_empty() {
        prompt.push_str("\nKey Points to Include:\n");
        for point in &input.key_points {
            prompt.push_str(&format!("- {}\n", point));
        }
    }

    prompt.push_str(
        r#"
Instructions:
- Generate content suitable for the specified Content Type.
- Adhere to the desired Tone and Length.
- Incorporate all Key Points naturally, if provided.
- Ensure the content is relevant to a college computer science organization (CES Antipolo).
- For news/events, include relevant details like dates, times, locations if implied by the topic or key points.
- Output *only* the generated content text. Do not include preamble or explanation.

Generated Content:
"#,
    );
    prompt
}

/// Drafts news, event and sub-org copy for administrators
#[derive(Clone)]
pub struct ContentGenerator {
    generator: Arc<dyn TextGenerator>,
}

impl ContentGenerator {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    pub async fn generate(&self, input: GenerateContentInput) -> GenerateContentOutput {
        if input.topic.trim().is_empty() {
            return GenerateContentOutput::new(EMPTY_TOPIC);
        }

        info!(
            "Generating {} content about: {}",
            input.content_type, input.topic
        );
        let prompt = render_content_prompt(&input);
        match generate_text(self.generator.as_ref(), CONTENT_PREAMBLE, prompt).await {
            Ok(text) => {
                info!("Content generation produced {} characters", text.len());
                GenerateContentOutput::new(text.trim())
            }
            Err(e) => {
                error!("Content generation failed: {}", e);
                GenerateContentOutput::new(GENERATION_FAILED)
            }
        }
    }
}
