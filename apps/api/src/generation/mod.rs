// Content generation: prompt templates, the sequential batch runner,
// cosmetic progress and post-processing of raw model output.
// All provider calls go through llm_client::TextGenerator.

pub mod content_type;
pub mod handlers;
pub mod postprocess;
pub mod progress;
pub mod prompts;
pub mod runner;
