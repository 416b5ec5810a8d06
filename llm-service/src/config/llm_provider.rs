/// Hosted model providers supported by this service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LlmProvider {
    /// OpenAI-compatible chat completions API (text generation).
    OpenAi,
    /// Cohere API (embeddings and reranking).
    Cohere,
}
