use anyhow::Result;
use std::future::Future;
use std::pin::Pin;

use crate::llm::{CompletionRequest, LlmClient};

/// The LLM seam of the engine; tests swap in scripted implementations.
pub trait GenerationGateway: Send + Sync {
    fn complete<'a>(
        &'a self,
        request: &'a CompletionRequest,
    ) -> Pin<Box<dyn Future<Output = Result<String>> + Send + 'a>>;
}

impl GenerationGateway for LlmClient {
    fn complete<'a>(
        &'a self,
        request: &'a CompletionRequest,
    ) -> Pin<Box<dyn Future<Output = Result<String>> + Send + 'a>> {
        Box::pin(LlmClient::complete(self, request))
    }
}
