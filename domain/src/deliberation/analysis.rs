//! Analysis kinds that run through a deliberation

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Which analysis a deliberation produces
///
/// Each kind has its own persona prompts and its own judgment shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AnalysisKind {
    /// Risk/opportunity analysis of a startup idea
    #[default]
    DeepAnalysis,
    /// Viability analysis of a market niche
    NicheDeepAnalysis,
    /// Product specification for an idea
    ProductSpec,
}

impl AnalysisKind {
    pub const ALL: [AnalysisKind; 3] = [
        AnalysisKind::DeepAnalysis,
        AnalysisKind::NicheDeepAnalysis,
        AnalysisKind::ProductSpec,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AnalysisKind::DeepAnalysis => "deep-analysis",
            AnalysisKind::NicheDeepAnalysis => "niche-deep-analysis",
            AnalysisKind::ProductSpec => "product-spec",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            AnalysisKind::DeepAnalysis => "Deep Analysis",
            AnalysisKind::NicheDeepAnalysis => "Niche Deep Analysis",
            AnalysisKind::ProductSpec => "Product Specification",
        }
    }

    /// Top-level keys the arbiter's judgment must contain
    pub fn required_judgment_keys(&self) -> &'static [&'static str] {
        match self {
            AnalysisKind::DeepAnalysis => &["main_pain", "verdict", "confidence"],
            AnalysisKind::NicheDeepAnalysis => &["niche", "verdict", "confidence"],
            AnalysisKind::ProductSpec => &["product_name", "core_features", "mvp_scope"],
        }
    }
}

impl std::fmt::Display for AnalysisKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for AnalysisKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "deep-analysis" | "deep" => Ok(AnalysisKind::DeepAnalysis),
            "niche-deep-analysis" | "niche" => Ok(AnalysisKind::NicheDeepAnalysis),
            "product-spec" | "spec" => Ok(AnalysisKind::ProductSpec),
            _ => Err(DomainError::UnknownAnalysisKind(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_roundtrip() {
        for kind in AnalysisKind::ALL {
            assert_eq!(kind.as_str().parse::<AnalysisKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_parse_aliases() {
        assert_eq!("niche".parse::<AnalysisKind>().unwrap(), AnalysisKind::NicheDeepAnalysis);
        assert_eq!("PRODUCT_SPEC".parse::<AnalysisKind>().unwrap(), AnalysisKind::ProductSpec);
        assert!("market-map".parse::<AnalysisKind>().is_err());
    }

    #[test]
    fn test_required_keys_non_empty() {
        for kind in AnalysisKind::ALL {
            assert!(!kind.required_judgment_keys().is_empty());
        }
        assert!(AnalysisKind::DeepAnalysis.required_judgment_keys().contains(&"main_pain"));
    }

    #[test]
    fn test_serde_kebab_case() {
        let json = serde_json::to_string(&AnalysisKind::NicheDeepAnalysis).unwrap();
        assert_eq!(json, "\"niche-deep-analysis\"");
    }
}
