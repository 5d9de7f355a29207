pub mod calendar;
pub mod llm;
pub mod recipe;
pub mod session;
