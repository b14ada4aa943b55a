use async_trait::async_trait;

use crate::error::Error;

pub mod openai;

pub use self::openai::OpenAiProvider;

/// A text-generation service that turns a prompt into ad copy.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Fails with `ProviderError` when the service cannot be reached, answers
    /// with a non-success status, or returns a payload without generated text.
    async fn generate(&self, prompt: &str) -> Result<String, Error>;
}
