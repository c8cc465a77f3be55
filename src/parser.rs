use log::debug;
use std::fmt;

use serde::de::{self, Unexpected, Visitor};
use serde::{Deserialize, Deserializer};

use crate::model::{ingredients_block, Ingredient, Recipe, Step};
use crate::FetchError;

#[derive(Debug, Deserialize)]
struct RawRecipe {
    #[serde(deserialize_with = "lenient_string")]
    id: String,
    #[serde(deserialize_with = "lenient_string")]
    name: String,
    #[serde(deserialize_with = "lenient_servings")]
    servings: u32,
    ingredients: Vec<Ingredient>,
    steps: Vec<RawStep>,
}

#[derive(Debug, Deserialize)]
struct RawStep {
    #[serde(deserialize_with = "lenient_string")]
    id: String,
    #[serde(rename = "shortDescription", deserialize_with = "lenient_string")]
    short_description: String,
    #[serde(deserialize_with = "lenient_string")]
    description: String,
    #[serde(rename = "videoURL", deserialize_with = "lenient_string")]
    video_url: String,
}

// Feeds are loose about scalar types: any scalar reads as text, and any
// number (or numeric text) is truncated to a count.
struct LenientString;

impl<'de> Visitor<'de> for LenientString {
    type Value = String;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a string, number, boolean or null")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<String, E> {
        Ok(v.to_string())
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<String, E> {
        Ok(v)
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<String, E> {
        Ok(v.to_string())
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<String, E> {
        Ok(v.to_string())
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<String, E> {
        Ok(v.to_string())
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<String, E> {
        // 0.5 -> "0.5", 2.0 -> "2.0"
        serde_json::Number::from_f64(v)
            .map(|n| n.to_string())
            .ok_or_else(|| E::custom(format!("number {v} has no textual form")))
    }

    fn visit_unit<E: de::Error>(self) -> Result<String, E> {
        Ok("null".to_string())
    }
}

struct LenientServings;

impl LenientServings {
    fn truncate<E: de::Error>(v: f64) -> Result<u32, E> {
        let whole = v.trunc();
        if whole.is_finite() && whole >= 0.0 && whole <= f64::from(u32::MAX) {
            Ok(whole as u32)
        } else {
            Err(E::custom(format!("servings out of range: {v}")))
        }
    }
}

impl<'de> Visitor<'de> for LenientServings {
    type Value = u32;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a non-negative number of servings")
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<u32, E> {
        u32::try_from(v).map_err(|_| E::custom(format!("servings out of range: {v}")))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<u32, E> {
        u32::try_from(v).map_err(|_| E::custom(format!("servings out of range: {v}")))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<u32, E> {
        Self::truncate(v)
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<u32, E> {
        let trimmed = v.trim();
        if let Ok(n) = trimmed.parse::<u32>() {
            return Ok(n);
        }
        match trimmed.parse::<f64>() {
            Ok(n) => Self::truncate(n),
            Err(_) => Err(E::invalid_value(Unexpected::Str(v), &self)),
        }
    }
}

pub(crate) fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(LenientString)
}

fn lenient_servings<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(LenientServings)
}

impl From<RawStep> for Step {
    fn from(raw: RawStep) -> Self {
        Step {
            id: raw.id,
            short_description: raw.short_description,
            description: raw.description,
            video_url: raw.video_url,
        }
    }
}

impl From<RawRecipe> for Recipe {
    fn from(raw: RawRecipe) -> Self {
        Recipe {
            id: raw.id,
            name: raw.name,
            servings: raw.servings,
            ingredients: ingredients_block(&raw.ingredients),
            steps: raw.steps.into_iter().map(Step::from).collect(),
        }
    }
}

/// Parse a recipe feed document.
///
/// The whole document is rejected on the first malformed element; no
/// recipes are returned from the parts that did parse.
///
/// # Errors
/// * [`FetchError::EmptyBody`] if `body` is empty or only whitespace
/// * [`FetchError::Parse`] if the JSON is invalid or a required field is missing
pub fn parse_recipes(body: &str) -> Result<Vec<Recipe>, FetchError> {
    if body.trim().is_empty() {
        return Err(FetchError::EmptyBody);
    }

    let raw: Vec<RawRecipe> = serde_json::from_str(body)?;
    debug!("Parsed {} recipes", raw.len());

    Ok(raw.into_iter().map(Recipe::from).collect())
}
