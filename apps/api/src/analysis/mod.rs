// Resume analysis: prompt → Gemini → JSON carving, or the local heuristic.
// All model calls go through llm_client.

pub mod handlers;
pub mod heuristic;
pub mod json_block;
pub mod models;
pub mod orchestrator;
pub mod prompts;
