pub mod spoonacular_client;
