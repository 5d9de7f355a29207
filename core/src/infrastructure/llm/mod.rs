pub mod gemini_client;
pub mod groq_client;
