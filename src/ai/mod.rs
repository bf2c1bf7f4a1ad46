//! Gemini integration: prompt construction and the generateContent client.

pub mod client;
pub mod prompt;

pub use client::GeminiClient;
