use serde::{Deserialize, Serialize};

// The wire keeps `analysisType` a free-form string; this enum only drives
// prompts and display.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisType {
    Vegetation,
    Urban,
    Water,
    Deforestation,
    General,
}

impl Default for AnalysisType {
    fn default() -> Self {
        AnalysisType::General
    }
}

impl AnalysisType {
    pub const ALL: [AnalysisType; 5] = [
        AnalysisType::Vegetation,
        AnalysisType::Urban,
        AnalysisType::Water,
        AnalysisType::Deforestation,
        AnalysisType::General,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AnalysisType::Vegetation => "vegetation",
            AnalysisType::Urban => "urban",
            AnalysisType::Water => "water",
            AnalysisType::Deforestation => "deforestation",
            AnalysisType::General => "general",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AnalysisType::Vegetation => "Vegetation Change",
            AnalysisType::Urban => "Urban Expansion",
            AnalysisType::Water => "Water Body Analysis",
            AnalysisType::Deforestation => "Deforestation",
            AnalysisType::General => "General Change Detection",
        }
    }
}

impl std::fmt::Display for AnalysisType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
