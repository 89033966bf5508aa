//! Persona value object

use serde::{Deserialize, Serialize};

/// An argumentative stance sent to the provider as a fixed system prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Persona {
    /// Argues for the topic's potential
    Optimist,
    /// Argues against it, looking for risks and weak signals
    Skeptic,
    /// Weighs both sides and produces the final judgment
    Arbiter,
}

impl Persona {
    /// The two personas that run concurrently in the first phase
    pub const OPPOSING: [Persona; 2] = [Persona::Optimist, Persona::Skeptic];

    pub fn as_str(&self) -> &'static str {
        match self {
            Persona::Optimist => "optimist",
            Persona::Skeptic => "skeptic",
            Persona::Arbiter => "arbiter",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Persona::Optimist => "Optimist",
            Persona::Skeptic => "Skeptic",
            Persona::Arbiter => "Arbiter",
        }
    }
}

impl std::fmt::Display for Persona {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opposing_personas() {
        assert_eq!(Persona::OPPOSING, [Persona::Optimist, Persona::Skeptic]);
        assert!(!Persona::OPPOSING.contains(&Persona::Arbiter));
    }

    #[test]
    fn test_serde_lowercase() {
        assert_eq!(serde_json::to_string(&Persona::Skeptic).unwrap(), "\"skeptic\"");
        assert_eq!(Persona::Arbiter.to_string(), "arbiter");
    }
}
