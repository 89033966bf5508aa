//! Topic value object

use super::error::DomainError;
use serde::{Deserialize, Serialize};

/// The subject of a deliberation (Value Object)
///
/// A startup idea, a market niche or a product concept. Guaranteed to
/// contain at least one non-whitespace character.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Topic {
    content: String,
}

impl Topic {
    /// Create a topic, rejecting empty or whitespace-only content
    pub fn try_new(content: impl Into<String>) -> Result<Self, DomainError> {
        let content = content.into();
        if content.trim().is_empty() {
            return Err(DomainError::InvalidTopic(
                "topic cannot be empty".to_string(),
            ));
        }
        Ok(Self {
            content: content.trim().to_string(),
        })
    }

    /// Get the topic text
    pub fn as_str(&self) -> &str {
        &self.content
    }

    /// Consume and return the inner content
    pub fn into_content(self) -> String {
        self.content
    }
}

impl std::fmt::Display for Topic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.content)
    }
}

impl TryFrom<String> for Topic {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Topic::try_new(value)
    }
}

impl TryFrom<&str> for Topic {
    type Error = DomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Topic::try_new(value)
    }
}

impl From<Topic> for String {
    fn from(topic: Topic) -> Self {
        topic.content
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_topic_creation_trims() {
        let topic = Topic::try_new("  AI meal planning app \n").unwrap();
        assert_eq!(topic.as_str(), "AI meal planning app");
    }

    #[test]
    fn test_empty_topic_rejected() {
        assert!(Topic::try_new("").is_err());
        assert!(Topic::try_new("   \t").is_err());
    }

    #[test]
    fn test_deserialize_validates() {
        let topic: Topic = serde_json::from_str("\"Pet insurance\"").unwrap();
        assert_eq!(topic.as_str(), "Pet insurance");
        assert!(serde_json::from_str::<Topic>("\"  \"").is_err());
    }
}
