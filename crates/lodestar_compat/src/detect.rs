//! Model family detection.
//!
//! Providers do not report which schema rules a model follows, so layers
//! decide by matching substrings of the provider name and model id. These
//! rules must be revisited whenever a provider ships a new model family:
//! a new reasoning tier named e.g. `o5` is not detected until it is added
//! here.

use lodestar_models::ModelDescriptor;

/// Model id markers of `OpenAI` reasoning-tier models.
pub const OPENAI_REASONING_MARKERS: &[&str] = &["o3", "o4"];

/// Whether the model is served by, or routed to, `OpenAI`.
///
/// Matches on the provider name or on the model id, which covers routers
/// whose model ids embed the vendor (`openai/gpt-4o`).
#[must_use]
pub fn mentions_openai(model: &ModelDescriptor) -> bool {
    model.provider.contains("openai") || model.model_id.contains("openai")
}

/// Whether `model_id` names an `OpenAI` reasoning-tier model.
#[must_use]
pub fn is_openai_reasoning_model(model_id: &str) -> bool {
    OPENAI_REASONING_MARKERS
        .iter()
        .any(|marker| model_id.contains(marker))
}

/// Whether `model_id` belongs to the `gpt-4o-mini` family, which rejects
/// regex patterns in tool schemas.
#[must_use]
pub fn is_gpt_4o_mini(model_id: &str) -> bool {
    model_id.contains("gpt-4o-mini")
}
