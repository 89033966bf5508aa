//! Model value object representing a text-generation model

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Text-generation models a persona can run on (Value Object)
///
/// Unknown identifiers are kept verbatim as [`Model::Custom`] so that any
/// model exposed by an OpenAI-compatible endpoint can be configured.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Model {
    Gpt4o,
    Gpt4oMini,
    Gpt41,
    Gpt41Mini,
    O3Mini,
    O4Mini,
    // Custom
    Custom(String),
}

impl Model {
    /// Get the string identifier for this model
    pub fn as_str(&self) -> &str {
        match self {
            Model::Gpt4o => "gpt-4o",
            Model::Gpt4oMini => "gpt-4o-mini",
            Model::Gpt41 => "gpt-4.1",
            Model::Gpt41Mini => "gpt-4.1-mini",
            Model::O3Mini => "o3-mini",
            Model::O4Mini => "o4-mini",
            Model::Custom(s) => s,
        }
    }

    /// Parse a model identifier. Never fails: unknown names become `Custom`.
    pub fn from_id(id: &str) -> Model {
        match id {
            "gpt-4o" => Model::Gpt4o,
            "gpt-4o-mini" => Model::Gpt4oMini,
            "gpt-4.1" => Model::Gpt41,
            "gpt-4.1-mini" => Model::Gpt41Mini,
            "o3-mini" => Model::O3Mini,
            "o4-mini" => Model::O4Mini,
            other => Model::Custom(other.to_string()),
        }
    }

    /// Reasoning models reject `temperature` and take `max_completion_tokens`.
    pub fn is_reasoning(&self) -> bool {
        match self {
            Model::O3Mini | Model::O4Mini => true,
            Model::Custom(s) => s.starts_with("o1") || s.starts_with("o3") || s.starts_with("o4"),
            _ => false,
        }
    }
}

impl Default for Model {
    /// Returns the default model (gpt-4o-mini)
    fn default() -> Self {
        Model::Gpt4oMini
    }
}

impl std::fmt::Display for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Model {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Model::from_id(s))
    }
}

impl Serialize for Model {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Model {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Model::from_id(&s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_roundtrip() {
        for model in [
            Model::Gpt4o,
            Model::Gpt4oMini,
            Model::Gpt41,
            Model::Gpt41Mini,
            Model::O3Mini,
            Model::O4Mini,
        ] {
            let parsed: Model = model.to_string().parse().unwrap();
            assert_eq!(model, parsed);
        }
    }

    #[test]
    fn test_custom_model() {
        let model: Model = "llama-3.3-70b".parse().unwrap();
        assert_eq!(model, Model::Custom("llama-3.3-70b".to_string()));
        assert_eq!(model.to_string(), "llama-3.3-70b");
    }

    #[test]
    fn test_reasoning_detection() {
        assert!(Model::O3Mini.is_reasoning());
        assert!(Model::Custom("o1-preview".into()).is_reasoning());
        assert!(!Model::Gpt4o.is_reasoning());
        assert!(!Model::Custom("gpt-3.5-turbo".into()).is_reasoning());
    }

    #[test]
    fn test_serde_as_string() {
        let json = serde_json::to_string(&Model::Gpt41Mini).unwrap();
        assert_eq!(json, "\"gpt-4.1-mini\"");
        let model: Model = serde_json::from_str("\"gpt-4o\"").unwrap();
        assert_eq!(model, Model::Gpt4o);
    }

    #[test]
    fn test_model_default() {
        assert_eq!(Model::default(), Model::Gpt4oMini);
    }
}
