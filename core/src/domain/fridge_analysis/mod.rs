pub mod entities;
pub mod helpers;
pub mod ports;
pub mod preprocessing;
pub mod prompts;
pub mod schema;
pub mod services;
pub mod value_objects;

pub use entities::{FridgeAnalysis, FridgeItem};
pub use ports::{FridgeAnalysisService, LLMClient};
