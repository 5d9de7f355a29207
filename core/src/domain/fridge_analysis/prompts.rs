pub fn build_analysis_prompt() -> String {
    r#"You are looking at a photo of the inside of a refrigerator.

In "summary", write a short report with clear sections covering:
1. A brief summary of the contents
2. The freshness status of perishable items
3. Any notable missing basic items
4. Suggestions for what could be cooked with these ingredients

In "items", list every distinct food item you can identify with:
- name: the common ingredient name in lower case, singular (e.g. "egg", "carrot")
- quantity: how many units are visible
- category: one of vegetable, fruit, dairy, meat, seafood, beverage, condiment, grain, other
- freshness: one of fresh, use_soon, spoiled, unknown
- bounding_box: x, y, width and height of the item as percentages (0-100) of the image width and height, measured from the top-left corner"#
        .to_string()
}
