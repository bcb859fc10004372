//! Query intent taxonomy.

use serde::{Deserialize, Serialize};

/// What the user is asking for. Classified by rule-based marker matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    Factual,
    Comparison,
    Trend,
    Relationship,
    Investment,
    #[default]
    General,
}

impl Intent {
    /// Intents that carry marker sets, in classification order.
    pub const CLASSIFIED: [Intent; 5] = [
        Intent::Factual,
        Intent::Comparison,
        Intent::Trend,
        Intent::Relationship,
        Intent::Investment,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Factual => "factual",
            Self::Comparison => "comparison",
            Self::Trend => "trend",
            Self::Relationship => "relationship",
            Self::Investment => "investment",
            Self::General => "general",
        }
    }

    /// Parse a loosely formatted intent label, e.g. from an LLM refinement.
    pub fn parse(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "factual" | "fact" => Some(Self::Factual),
            "comparison" | "compare" => Some(Self::Comparison),
            "trend" | "trends" => Some(Self::Trend),
            "relationship" | "relation" => Some(Self::Relationship),
            "investment" | "invest" => Some(Self::Investment),
            "general" => Some(Self::General),
            _ => None,
        }
    }
}

impl std::fmt::Display for Intent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
