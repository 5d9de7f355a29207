pub mod entities;
pub mod parser;
pub mod ports;
pub mod prompts;
pub mod services;
pub mod value_objects;

pub use entities::{RecipeCard, RecipeDetails, RecipeSummary};
pub use ports::{ChatCompletionClient, RecipeSearchClient, RecipeService};
