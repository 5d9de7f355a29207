pub mod find_recipes;
pub mod get_recipe_card;
pub mod select_recipe;
