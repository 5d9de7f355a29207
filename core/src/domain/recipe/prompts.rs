use crate::domain::recipe::entities::RecipeSummary;

pub const CULINARY_SYSTEM_PROMPT: &str =
    "You are a helpful culinary assistant with expertise in various cuisines and cooking techniques.";

/// Asks for the fixed section layout understood by the details parser.
pub fn build_recipe_prompt(recipe: &RecipeSummary) -> String {
    let ingredients = recipe
        .used_ingredients
        .iter()
        .chain(recipe.missed_ingredients.iter())
        .map(|ingredient| format!("- {}", ingredient.original))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"Generate a detailed recipe for "{title}" based on the following information:

Ingredients:
{ingredients}

Provide the following information in this exact format:

Key Information:
Calories: [Estimated calories per serving]
Cooking Time: [Estimated total time in minutes]
Price: [Estimated price per serving in USD]
Dietary: [List any dietary categories this recipe fits, e.g., Vegetarian, Vegan, Gluten-Free, etc.]
Cuisine: [Type of cuisine, e.g., Italian, Mexican, etc.]
Difficulty: [Easy/Medium/Hard]

Description:
[Provide a brief, enticing description of the dish in 2-3 sentences]

Instructions:
1. [Step 1]
2. [Step 2]
...

Additional Information:
[Flavor Profile, Texture, Nutritional Highlights, Serving Suggestions, Tips]"#,
        title = recipe.title,
    )
}
