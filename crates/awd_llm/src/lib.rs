pub mod backends;
pub mod client;
pub mod parse;

pub use backends::groq::GroqBackend;
pub use client::{ChatRequest, GenerationBackend, GenerationClient};

pub mod prelude {
    pub use super::client::{ChatRequest, GenerationBackend, GenerationClient};
    pub use awd_core::{Error, Result};
}
