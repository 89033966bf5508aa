//! Prompt domain
//!
//! Templates for the persona system prompts and the user prompts of each
//! deliberation stage.

mod template;

pub use template::PromptTemplate;
