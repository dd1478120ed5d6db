//! Prompt templates for each pipeline stage
//!
//! Thin free-function wrappers over [`PromptTemplates`] so call sites read as
//! the stage they build for.

pub mod templates;

pub use templates::{ArticleBrief, PromptTemplates};

use crate::request::{GenerationRequest, Keywords};

pub fn build_outline_prompt(request: &GenerationRequest) -> String {
    PromptTemplates::outline_prompt(request)
}

pub fn build_draft_prompt(request: &GenerationRequest, outline: &str) -> String {
    PromptTemplates::draft_prompt(request, outline)
}

pub fn build_enhancement_prompt(request: &GenerationRequest, draft: &str) -> String {
    PromptTemplates::enhancement_prompt(request, draft)
}

pub fn build_summary_prompt(content: &str) -> String {
    PromptTemplates::summary_prompt(content)
}

pub fn build_direct_prompt(topic: &str, tone: &str, audience: &str, keywords: &Keywords) -> String {
    PromptTemplates::direct_prompt(topic, tone, audience, keywords)
}
