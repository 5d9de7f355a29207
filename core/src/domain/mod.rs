pub mod common;
pub mod fridge_analysis;
pub mod meal_plan;
pub mod recipe;
pub mod session;
