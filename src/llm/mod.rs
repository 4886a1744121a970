//! LLM providers behind a single text-generation interface.

pub mod http;
pub mod ollama;
pub mod openai;
pub mod router;

pub use ollama::{OllamaApi, OllamaClient};
pub use openai::OpenAiClient;
pub use router::{Provider, TextGenerator, build_generator};
