// Resume analysis: PDF text extraction, keyword scoring, narrative feedback.
// All LLM calls go through llm_client.

pub mod extract;
pub mod feedback;
pub mod handlers;
pub mod keywords;
pub mod prompts;
