//! Per-persona overrides (`[personas.optimist]`, `[personas.skeptic]`, `[personas.arbiter]`)

use super::ConfigValidationError;
use serde::{Deserialize, Serialize};
use tribunal_application::PersonaSettings;
use tribunal_domain::{Model, Persona};

/// Optional overrides for one persona; unset fields keep the defaults
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilePersonaConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

impl FilePersonaConfig {
    pub(super) fn validate(&self, persona: Persona) -> Result<(), ConfigValidationError> {
        if let Some(model) = &self.model
            && model.trim().is_empty()
        {
            return Err(ConfigValidationError::EmptyModelName {
                field: format!("personas.{}.model", persona),
            });
        }
        if let Some(value) = self.temperature
            && !(0.0..=2.0).contains(&value)
        {
            return Err(ConfigValidationError::InvalidTemperature { persona, value });
        }
        if self.max_tokens == Some(0) {
            return Err(ConfigValidationError::InvalidMaxTokens { persona });
        }
        Ok(())
    }

    pub(super) fn apply(&self, defaults: &PersonaSettings, default_model: &Model) -> PersonaSettings {
        PersonaSettings {
            model: self
                .model
                .as_deref()
                .map(|m| Model::from_id(m.trim()))
                .unwrap_or_else(|| default_model.clone()),
            temperature: self.temperature.unwrap_or(defaults.temperature),
            max_output_tokens: self.max_tokens.unwrap_or(defaults.max_output_tokens),
        }
    }
}

/// Raw `[personas]` section
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilePersonasConfig {
    pub optimist: FilePersonaConfig,
    pub skeptic: FilePersonaConfig,
    pub arbiter: FilePersonaConfig,
}

impl FilePersonasConfig {
    pub fn get(&self, persona: Persona) -> &FilePersonaConfig {
        match persona {
            Persona::Optimist => &self.optimist,
            Persona::Skeptic => &self.skeptic,
            Persona::Arbiter => &self.arbiter,
        }
    }
}
