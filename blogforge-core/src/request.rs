//! Blog generation request model
//!
//! [`GenerationRequest`] is immutable once built; every constraint is checked
//! in [`GenerationRequestBuilder::build`] so templates can assume well-formed
//! input. Wire payloads arrive as [`GenerationRequestPayload`] and are
//! converted at the boundary.

use crate::config::constants::lengths;
use crate::pipeline::GenerationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Placeholder rendered when no keywords were supplied
pub const NO_KEYWORDS_PLACEHOLDER: &str = "No specific keywords provided";

/// Writing style requested for the article
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Professional,
    Conversational,
    Friendly,
    Authoritative,
    Humorous,
    Inspirational,
    Educational,
}

impl Tone {
    pub const ALL: [Tone; 7] = [
        Tone::Professional,
        Tone::Conversational,
        Tone::Friendly,
        Tone::Authoritative,
        Tone::Humorous,
        Tone::Inspirational,
        Tone::Educational,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Tone::Professional => "professional",
            Tone::Conversational => "conversational",
            Tone::Friendly => "friendly",
            Tone::Authoritative => "authoritative",
            Tone::Humorous => "humorous",
            Tone::Inspirational => "inspirational",
            Tone::Educational => "educational",
        }
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tone {
    type Err = GenerationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Tone::ALL
            .into_iter()
            .find(|tone| tone.as_str() == wanted)
            .ok_or_else(|| GenerationError::InvalidInput(format!("Unsupported tone: {s}")))
    }
}

/// Normalized SEO keyword list
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Keywords(Vec<String>);

impl Keywords {
    /// Split a comma-separated list, trimming entries and dropping blanks
    pub fn parse(raw: &str) -> Self {
        Self::from_iter(raw.split(','))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

impl<S: AsRef<str>> FromIterator<S> for Keywords {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|k| k.as_ref().trim().to_string())
                .filter(|k| !k.is_empty())
                .collect(),
        )
    }
}

impl fmt::Display for Keywords {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            f.write_str(NO_KEYWORDS_PLACEHOLDER)
        } else {
            f.write_str(&self.0.join(", "))
        }
    }
}

/// Keywords arrive either as `"a, b"` or `["a", "b"]`
impl<'de> Deserialize<'de> for Keywords {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Delimited(String),
            List(Vec<String>),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Delimited(s) => Keywords::parse(&s),
            Raw::List(items) => Keywords::from_iter(items),
        })
    }
}

/// Validated input to the blog pipeline
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    topic: String,
    niche: String,
    tone: Tone,
    audience: Option<String>,
    keywords: Keywords,
    target_length: u32,
    additional_instructions: Option<String>,
}

impl GenerationRequest {
    pub fn builder(topic: impl Into<String>, niche: impl Into<String>, tone: Tone) -> GenerationRequestBuilder {
        GenerationRequestBuilder {
            topic: topic.into(),
            niche: niche.into(),
            tone,
            audience: None,
            keywords: Keywords::default(),
            target_length: lengths::DEFAULT_WORDS,
            additional_instructions: None,
        }
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn niche(&self) -> &str {
        &self.niche
    }

    pub fn tone(&self) -> Tone {
        self.tone
    }

    pub fn audience(&self) -> Option<&str> {
        self.audience.as_deref()
    }

    /// Audience, or the niche-derived default when none was given
    pub fn audience_or_default(&self) -> String {
        match &self.audience {
            Some(audience) => audience.clone(),
            None => format!("Readers interested in the {} niche", self.niche),
        }
    }

    pub fn keywords(&self) -> &Keywords {
        &self.keywords
    }

    pub fn target_length(&self) -> u32 {
        self.target_length
    }

    pub fn additional_instructions(&self) -> Option<&str> {
        self.additional_instructions.as_deref()
    }
}

#[derive(Debug, Clone)]
pub struct GenerationRequestBuilder {
    topic: String,
    niche: String,
    tone: Tone,
    audience: Option<String>,
    keywords: Keywords,
    target_length: u32,
    additional_instructions: Option<String>,
}

impl GenerationRequestBuilder {
    pub fn audience(mut self, audience: impl Into<String>) -> Self {
        self.audience = non_blank(audience.into());
        self
    }

    pub fn keywords(mut self, keywords: Keywords) -> Self {
        self.keywords = keywords;
        self
    }

    pub fn target_length(mut self, words: u32) -> Self {
        self.target_length = words;
        self
    }

    pub fn additional_instructions(mut self, instructions: impl Into<String>) -> Self {
        self.additional_instructions = non_blank(instructions.into());
        self
    }

    pub fn build(self) -> Result<GenerationRequest, GenerationError> {
        let topic = self.topic.trim().to_string();
        if topic.is_empty() {
            return Err(GenerationError::InvalidInput("Topic is required".to_string()));
        }

        let niche = self.niche.trim().to_string();
        if niche.is_empty() {
            return Err(GenerationError::InvalidInput("Niche is required".to_string()));
        }

        if !(lengths::MIN_WORDS..=lengths::MAX_WORDS).contains(&self.target_length) {
            return Err(GenerationError::InvalidInput(format!(
                "Length must be between {} and {} words, got {}",
                lengths::MIN_WORDS,
                lengths::MAX_WORDS,
                self.target_length
            )));
        }

        Ok(GenerationRequest {
            topic,
            niche,
            tone: self.tone,
            audience: self.audience,
            keywords: self.keywords,
            target_length: self.target_length,
            additional_instructions: self.additional_instructions,
        })
    }
}

fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// JSON shape posted by the blog form
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequestPayload {
    #[serde(default)]
    pub topic: String,
    #[serde(default)]
    pub niche: String,
    #[serde(default)]
    pub tone: String,
    #[serde(default)]
    pub audience: Option<String>,
    #[serde(default)]
    pub keywords: Option<Keywords>,
    #[serde(default)]
    pub length: Option<u32>,
    #[serde(default)]
    pub additional_instructions: Option<String>,
}

impl TryFrom<GenerationRequestPayload> for GenerationRequest {
    type Error = GenerationError;

    fn try_from(payload: GenerationRequestPayload) -> Result<Self, Self::Error> {
        // Report missing fields in form order before parsing the tone
        for (value, field) in [
            (&payload.topic, "Topic"),
            (&payload.niche, "Niche"),
            (&payload.tone, "Tone"),
        ] {
            if value.trim().is_empty() {
                return Err(GenerationError::InvalidInput(format!("{field} is required")));
            }
        }
        let tone = payload.tone.parse::<Tone>()?;
        let mut builder = GenerationRequest::builder(payload.topic, payload.niche, tone)
            .keywords(payload.keywords.unwrap_or_default())
            .target_length(payload.length.unwrap_or(lengths::DEFAULT_WORDS));

        if let Some(audience) = payload.audience {
            builder = builder.audience(audience);
        }
        if let Some(instructions) = payload.additional_instructions {
            builder = builder.additional_instructions(instructions);
        }

        builder.build()
    }
}
