//! Lenient parsing of generated recipe text.
//!
//! The model is asked for a fixed layout but answers vary in markdown
//! decoration and spacing. Nothing here fails: missing parts fall back to
//! `"Not Found"` or `"Not specified"`.

use tracing::warn;

use crate::domain::{
    common::entities::app_errors::CoreError,
    recipe::entities::{KeyInformation, NOT_SPECIFIED, RecipeDetails},
};

const KEY_INFORMATION_MARKER: &str = "Key Information:";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    KeyInformation,
    Description,
    Instructions,
    AdditionalInformation,
}

const SECTIONS: [(&str, Section); 4] = [
    ("key information", Section::KeyInformation),
    ("description", Section::Description),
    ("instructions", Section::Instructions),
    ("additional information", Section::AdditionalInformation),
];

/// Reads the `key: value` lines following the literal `Key Information:`
/// marker, up to the first blank line.
pub fn parse_key_information(text: &str) -> KeyInformation {
    let mut info = KeyInformation::default();
    let text = text.replace("\r\n", "\n");

    let block = match key_information_block(&text) {
        Ok(block) => block,
        Err(e) => {
            warn!(error = %e, "using default key information");
            return info;
        }
    };

    for line in block.lines().take_while(|line| !line.trim().is_empty()) {
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let value = value.trim().trim_matches('*').trim();
        if value.is_empty() {
            continue;
        }

        let slot = match normalize_key(key).as_str() {
            "calories" => &mut info.calories,
            "cooking time" => &mut info.cooking_time,
            "price" => &mut info.price,
            "dietary" => &mut info.dietary,
            "cuisine" => &mut info.cuisine,
            "difficulty" => &mut info.difficulty,
            _ => continue,
        };
        *slot = value.to_string();
    }

    info
}

fn key_information_block(text: &str) -> Result<&str, CoreError> {
    let (_, after) = text.split_once(KEY_INFORMATION_MARKER).ok_or_else(|| {
        CoreError::Parse(format!(
            "generated recipe: no '{KEY_INFORMATION_MARKER}' block"
        ))
    })?;

    Ok(after
        .trim_start_matches(['*', ' ', '\t'])
        .trim_start_matches('\n'))
}

pub fn parse_recipe_details(text: &str) -> RecipeDetails {
    let normalized = text.replace("\r\n", "\n");

    let mut description = Vec::new();
    let mut instructions = Vec::new();
    let mut additional = Vec::new();
    let mut current: Option<Section> = None;

    for line in normalized.lines() {
        if let Some((section, rest)) = match_heading(line) {
            current = Some(section);
            if rest.is_empty() {
                continue;
            }
            push_line(section, rest, &mut description, &mut instructions, &mut additional);
            continue;
        }

        if let Some(section) = current {
            push_line(section, line, &mut description, &mut instructions, &mut additional);
        }
    }

    let description = first_paragraph(&description);
    let additional = additional
        .iter()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n");

    RecipeDetails {
        key_information: parse_key_information(&normalized),
        description: if description.is_empty() {
            NOT_SPECIFIED.to_string()
        } else {
            description
        },
        instructions: instructions
            .iter()
            .map(|line| strip_numbering(line))
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect(),
        additional_information: (!additional.is_empty()).then_some(additional),
        raw_text: text.to_string(),
    }
}

fn push_line<'a>(
    section: Section,
    line: &'a str,
    description: &mut Vec<&'a str>,
    instructions: &mut Vec<&'a str>,
    additional: &mut Vec<&'a str>,
) {
    match section {
        Section::KeyInformation => {}
        Section::Description => description.push(line),
        Section::Instructions => instructions.push(line),
        Section::AdditionalInformation => additional.push(line),
    }
}

fn normalize_key(key: &str) -> String {
    key.trim_matches(|c: char| c == '*' || c == '-' || c == '#' || c == '•' || c.is_whitespace())
        .to_lowercase()
}

/// Recognizes `Description:`, `**Instructions:**`, `## Description:` and
/// the like, returning any text after the colon.
fn match_heading(line: &str) -> Option<(Section, &str)> {
    let cleaned = line.trim().trim_start_matches(['#', '*', ' ']);

    SECTIONS.iter().find_map(|(label, section)| {
        let head = cleaned.get(..label.len())?;
        if !head.eq_ignore_ascii_case(label) {
            return None;
        }
        let rest = cleaned[label.len()..]
            .trim_start_matches(['*', ' '])
            .strip_prefix(':')?;
        Some((*section, rest.trim().trim_matches('*').trim()))
    })
}

fn first_paragraph(lines: &[&str]) -> String {
    lines
        .iter()
        .map(|line| line.trim())
        .skip_while(|line| line.is_empty())
        .take_while(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn strip_numbering(line: &str) -> &str {
    let line = line.trim().trim_start_matches(['-', '*', '•']).trim_start();
    let digits = line.chars().take_while(char::is_ascii_digit).count();
    if digits == 0 {
        return line;
    }
    match line[digits..].strip_prefix(['.', ')']) {
        Some(rest) => rest.trim_start(),
        None => line,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::recipe::entities::NOT_FOUND;

    const WELL_FORMED: &str = "Key Information:
Calories: 450 kcal
Cooking Time: 25 minutes
Price: $3.50
Dietary: Vegetarian
Cuisine: Asian
Difficulty: Easy

Description:
A quick stir fry packed with crunchy vegetables.
Ready in under half an hour.

Instructions:
1. Chop the vegetables.
2. Heat the wok.
3) Stir fry everything with soy sauce.

Additional Information:
Pairs well with jasmine rice.";

    #[test]
    fn test_well_formed_text_is_fully_parsed() {
        let details = parse_recipe_details(WELL_FORMED);

        assert_eq!(
            details.key_information,
            KeyInformation {
                calories: "450 kcal".to_string(),
                cooking_time: "25 minutes".to_string(),
                price: "$3.50".to_string(),
                dietary: "Vegetarian".to_string(),
                cuisine: "Asian".to_string(),
                difficulty: "Easy".to_string(),
            }
        );
        assert_eq!(
            details.description,
            "A quick stir fry packed with crunchy vegetables. Ready in under half an hour."
        );
        assert_eq!(
            details.instructions,
            vec![
                "Chop the vegetables.",
                "Heat the wok.",
                "Stir fry everything with soy sauce."
            ]
        );
        assert_eq!(
            details.additional_information.as_deref(),
            Some("Pairs well with jasmine rice.")
        );
        assert_eq!(details.raw_text, WELL_FORMED);
    }

    #[test]
    fn test_missing_marker_defaults_every_field() {
        let info = parse_key_information("Calories: 300\nCuisine: Thai\nSome free text.");

        assert_eq!(info, KeyInformation::default());
        assert_eq!(info.calories, NOT_FOUND);
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let details = parse_recipe_details("Recipe details unavailable");

        assert_eq!(details.key_information, KeyInformation::default());
        assert_eq!(details.description, NOT_SPECIFIED);
        assert!(details.instructions.is_empty());
        assert!(details.additional_information.is_none());
    }

    #[test]
    fn test_markdown_decoration_is_tolerated() {
        let text = "**Key Information:**\n- **Calories**: 520\n* Cooking Time: 40 min\n**Difficulty:** Medium\n\n## Description:\nHearty and warm.";

        let details = parse_recipe_details(text);

        assert_eq!(details.key_information.calories, "520");
        assert_eq!(details.key_information.cooking_time, "40 min");
        assert_eq!(details.key_information.difficulty, "Medium");
        assert_eq!(details.key_information.price, NOT_FOUND);
        assert_eq!(details.description, "Hearty and warm.");
    }

    #[test]
    fn test_key_block_stops_at_first_blank_line() {
        let text = "Key Information:\nCalories: 200\n\nCuisine: French";

        let info = parse_key_information(text);

        assert_eq!(info.calories, "200");
        assert_eq!(info.cuisine, NOT_FOUND);
    }

    #[test]
    fn test_empty_values_and_unknown_keys_are_ignored() {
        let text = "Key Information:\nCalories:\nServings: 4\nPrice: about $2: cheap\n";

        let info = parse_key_information(text);

        assert_eq!(info.calories, NOT_FOUND);
        assert_eq!(info.price, "about $2: cheap");
    }

    #[test]
    fn test_inline_heading_content_is_kept() {
        let details = parse_recipe_details("Description: Bright citrus salad.\nInstructions:\n- Peel\n- Slice");

        assert_eq!(details.description, "Bright citrus salad.");
        assert_eq!(details.instructions, vec!["Peel", "Slice"]);
    }

    #[test]
    fn test_windows_line_endings() {
        let details = parse_recipe_details("Key Information:\r\nCuisine: Greek\r\n\r\nDescription:\r\nFresh.");

        assert_eq!(details.key_information.cuisine, "Greek");
        assert_eq!(details.description, "Fresh.");
    }

    #[test]
    fn test_strip_numbering() {
        assert_eq!(strip_numbering("12. Serve hot"), "Serve hot");
        assert_eq!(strip_numbering("  3) Rest"), "Rest");
        assert_eq!(strip_numbering("2 eggs, beaten"), "2 eggs, beaten");
        assert_eq!(strip_numbering("- Garnish"), "Garnish");
    }

    #[test]
    fn test_missing_marker_is_a_parse_error() {
        assert!(matches!(
            key_information_block("Description:\nJust soup."),
            Err(CoreError::Parse(_))
        ));
        assert_eq!(
            key_information_block("Key Information:\nCalories: 100").unwrap(),
            "Calories: 100"
        );
    }
}
