//! Built-in provider layers.
//!
//! - [`OpenAiReasoningCompat`] : `OpenAI` models with strict structured outputs
//!   and the reasoning tier
//! - [`OpenAiCompat`] : `OpenAI` models without structured outputs
//! - [`PassthroughCompat`] : identity fallback for everything else

mod openai;
mod openai_reasoning;
mod passthrough;

pub use openai::OpenAiCompat;
pub use openai_reasoning::OpenAiReasoningCompat;
pub use passthrough::PassthroughCompat;
