//! Domain logic for dreamplan: the answer set and its derived values, the
//! five-step wizard gating rules, the analysis prompt, the model-reply JSON
//! extractor, the Anthropic client, the relay pipeline, and the client-side
//! submission sequence.

pub mod answers;
pub mod anthropic;
pub mod extract;
pub mod prompt;
pub mod relay;
pub mod submit;
pub mod wizard;
