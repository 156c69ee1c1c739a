use std::collections::BTreeMap;

use serde_json::Value;

use crate::coerce;
use crate::dto::NutritionDto;
use crate::fields::{first_match, first_object, FieldPath};

const SERVING: &[FieldPath] = &[&["serving"], &["servingSize"], &["servingDescription"]];
const CALORIES: &[FieldPath] = &[&["calories"], &["energy"]];
const FAT: &[FieldPath] = &[&["fat"], &["fats"], &["totalFat"], &["macros", "fat"]];
const CARBS: &[FieldPath] = &[
    &["carbs"],
    &["carbohydrates"],
    &["totalCarbohydrate"],
    &["macros", "carbs"],
];
const PROTEIN: &[FieldPath] = &[&["protein"], &["proteins"], &["macros", "protein"]];
const SODIUM: &[FieldPath] = &[&["sodium"]];
const CHOLESTEROL: &[FieldPath] = &[&["cholesterol"]];
const DISCLAIMER: &[FieldPath] = &[&["disclaimer"]];
const INGREDIENTS: &[FieldPath] = &[&["ingredients"], &["ingredientsText"]];

/// Names under which the free-form macro breakdown block appears.
const SUB_BLOCK: &[FieldPath] = &[
    &["sub"],
    &["macroBreakdown"],
    &["macrosBreakdown"],
    &["macros", "sub"],
];
/// Names under which the micronutrient block appears.
const MICROS_BLOCK: &[FieldPath] = &[&["micros"], &["microNutrients"], &["micronutrients"]];

/// Extracts a nutrition block. Non-object input yields `None`.
#[must_use]
pub fn extract_nutrition(block: &Value) -> Option<NutritionDto> {
    if !block.is_object() {
        return None;
    }
    let text = |candidates: &[FieldPath]| first_match(block, candidates, coerce::string);
    let free_form = |candidates: &[FieldPath]| -> BTreeMap<String, Option<String>> {
        first_object(block, candidates)
            .and_then(coerce::record)
            .unwrap_or_default()
    };

    Some(NutritionDto {
        serving: text(SERVING),
        calories: text(CALORIES),
        fat: text(FAT),
        carbs: text(CARBS),
        protein: text(PROTEIN),
        sub: free_form(SUB_BLOCK),
        micros: free_form(MICROS_BLOCK),
        sodium: text(SODIUM),
        cholesterol: text(CHOLESTEROL),
        disclaimer: text(DISCLAIMER),
        ingredients: text(INGREDIENTS),
    })
}
