pub mod fridge_analysis;
pub mod health;
pub mod meal_plan;
pub mod recipe;
pub mod server;
pub mod session;
