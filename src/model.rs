use serde::{Deserialize, Serialize};

/// A single recipe as delivered by the feed.
///
/// `ingredients` is already formatted as a bullet block, one line per
/// ingredient in feed order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Recipe {
    pub id: String,
    pub name: String,
    pub servings: u32,
    pub ingredients: String,
    pub steps: Vec<Step>,
}

/// One instruction of a recipe.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Step {
    pub id: String,
    pub short_description: String,
    pub description: String,
    /// Empty when the step has no video
    pub video_url: String,
}

impl Step {
    pub fn has_video(&self) -> bool {
        !self.video_url.is_empty()
    }
}

/// Ingredient entry, only used while building [`Recipe::ingredients`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Ingredient {
    #[serde(deserialize_with = "crate::parser::lenient_string")]
    pub quantity: String,
    #[serde(deserialize_with = "crate::parser::lenient_string")]
    pub measure: String,
    #[serde(deserialize_with = "crate::parser::lenient_string")]
    pub ingredient: String,
}

impl Ingredient {
    /// `"• flour (2 cups)\n"`
    pub fn bullet_line(&self) -> String {
        format!(
            "\u{2022} {} ({} {})\n",
            self.ingredient, self.quantity, self.measure
        )
    }
}

/// Joins bullet lines for every ingredient, keeping input order.
pub fn ingredients_block(ingredients: &[Ingredient]) -> String {
    ingredients.iter().map(Ingredient::bullet_line).collect()
}
