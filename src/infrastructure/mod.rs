pub mod gemini;
pub mod relay;
