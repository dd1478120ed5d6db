use crate::config::constants::temperatures;
use serde::{Deserialize, Serialize};

/// Sampling temperatures for each pipeline stage
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PipelineConfig {
    #[serde(default = "default_outline_temperature")]
    pub outline_temperature: f32,

    #[serde(default = "default_draft_temperature")]
    pub draft_temperature: f32,

    #[serde(default = "default_enhancement_temperature")]
    pub enhancement_temperature: f32,

    #[serde(default = "default_summary_temperature")]
    pub summary_temperature: f32,

    /// Default for the direct prompt route when the caller sends none
    #[serde(default = "default_direct_temperature")]
    pub direct_temperature: f32,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            outline_temperature: default_outline_temperature(),
            draft_temperature: default_draft_temperature(),
            enhancement_temperature: default_enhancement_temperature(),
            summary_temperature: default_summary_temperature(),
            direct_temperature: default_direct_temperature(),
        }
    }
}

impl PipelineConfig {
    /// Named temperatures, for validation and diagnostics
    pub fn temperatures(&self) -> [(&'static str, f32); 5] {
        [
            ("outline_temperature", self.outline_temperature),
            ("draft_temperature", self.draft_temperature),
            ("enhancement_temperature", self.enhancement_temperature),
            ("summary_temperature", self.summary_temperature),
            ("direct_temperature", self.direct_temperature),
        ]
    }
}

fn default_outline_temperature() -> f32 {
    temperatures::OUTLINE
}
fn default_draft_temperature() -> f32 {
    temperatures::DRAFT
}
fn default_enhancement_temperature() -> f32 {
    temperatures::ENHANCEMENT
}
fn default_summary_temperature() -> f32 {
    temperatures::SUMMARY
}
fn default_direct_temperature() -> f32 {
    temperatures::DIRECT
}
