//! Pattern-based field extraction from free-text spec blobs
//!
//! Each field has its own rule and rules never see each other's results:
//! a blob can yield lumens without power, or dimensions without anything
//! else. Every rule is case-insensitive and accepts both the Russian and
//! the English unit token.

use crate::error::ExtractorError;
use regex::Regex;
use specsheet_domain::{Category, Dimensions, ExtractedFields};

/// Category vocabulary, scanned in this order
///
/// The first entry whose token occurs in the text wins, even when a later
/// entry's token appears earlier in the text.
const CATEGORY_VOCABULARY: &[(&str, Category)] = &[
    ("промышленный", Category::Industrial),
    ("industrial", Category::Industrial),
    ("уличный", Category::Street),
    ("street", Category::Street),
    ("офисный", Category::Office),
    ("office", Category::Office),
    ("спортивный", Category::Sport),
    ("sport", Category::Sport),
    ("взрывозащищенный", Category::ExplosionProof),
    ("взрывозащищённый", Category::ExplosionProof),
    ("explosion-proof", Category::ExplosionProof),
    ("прожектор", Category::Floodlight),
    ("floodlight", Category::Floodlight),
];

const POWER_PATTERN: &str = r"(?i)([0-9]+)\s?(?:вт|w)";
const LUMENS_PATTERN: &str = r"(?i)([0-9]+)\s?(?:лм|lm)";
// A third digit disqualifies the occurrence.
const IP_PATTERN: &str = r"(?i)ip([0-9]{2})(?:[^0-9]|$)";
// The unit is mandatory: three bare numbers are not dimensions.
const DIMENSIONS_PATTERN: &str = r"(?i)([0-9]+)[x×]([0-9]+)[x×]([0-9]+)\s?(?:мм|mm)";
const WEIGHT_PATTERN: &str = r"(?i)([0-9]+(?:[.,][0-9]+)?)\s?(?:кг|kg)";
const WARRANTY_PATTERN: &str = r"(?i)([0-9]+)\s?(?:лет|года|год|г\.|years?)";

/// Turns a spec blob into [`ExtractedFields`]
pub struct FieldExtractor {
    prefix: String,
    power: Regex,
    lumens: Regex,
    ip_rating: Regex,
    model: Regex,
    dimensions: Regex,
    weight: Regex,
    warranty: Regex,
}

impl FieldExtractor {
    /// Compile the rule set for the given brand prefix
    pub fn new(model_prefix: &str) -> Result<Self, ExtractorError> {
        let prefix = model_prefix.trim();
        if prefix.is_empty() {
            return Err(ExtractorError::Config(
                "model prefix must not be empty".to_string(),
            ));
        }

        Ok(Self {
            prefix: prefix.to_lowercase(),
            power: Regex::new(POWER_PATTERN)?,
            lumens: Regex::new(LUMENS_PATTERN)?,
            ip_rating: Regex::new(IP_PATTERN)?,
            model: Regex::new(&format!(r"(?i){}[^\s,]*", regex::escape(prefix)))?,
            dimensions: Regex::new(DIMENSIONS_PATTERN)?,
            weight: Regex::new(WEIGHT_PATTERN)?,
            warranty: Regex::new(WARRANTY_PATTERN)?,
        })
    }

    /// Apply every rule to `text`
    ///
    /// # Examples
    ///
    /// ```
    /// use specsheet_extractor::FieldExtractor;
    ///
    /// let extractor = FieldExtractor::new("NRG").unwrap();
    /// let fields = extractor.extract("NRG-PRO-100 100Вт 12000лм ip65");
    /// assert_eq!(fields.power_w, Some(100));
    /// assert_eq!(fields.lumens, Some(12000));
    /// assert_eq!(fields.ip_rating.as_deref(), Some("IP65"));
    /// assert_eq!(fields.model.as_deref(), Some("NRG-PRO-100"));
    /// ```
    pub fn extract(&self, text: &str) -> ExtractedFields {
        ExtractedFields {
            power_w: capture_u32(&self.power, text),
            lumens: capture_u32(&self.lumens, text),
            ip_rating: self.ip_rating(text),
            category: category(text),
            dimensions_mm: self.dimensions(text),
            weight_kg: self.weight(text),
            warranty_years: capture_u32(&self.warranty, text),
            model: self.model(text),
        }
    }

    /// Whether an identifier cell carries the brand token (case-insensitive)
    pub fn has_prefix(&self, identifier: &str) -> bool {
        identifier.to_lowercase().contains(&self.prefix)
    }

    fn ip_rating(&self, text: &str) -> Option<String> {
        let caps = self.ip_rating.captures(text)?;
        Some(format!("IP{}", &caps[1]))
    }

    fn model(&self, text: &str) -> Option<String> {
        self.model.find(text).map(|m| m.as_str().to_string())
    }

    fn dimensions(&self, text: &str) -> Option<Dimensions> {
        let caps = self.dimensions.captures(text)?;
        Some(Dimensions::new(
            caps[1].parse().ok()?,
            caps[2].parse().ok()?,
            caps[3].parse().ok()?,
        ))
    }

    fn weight(&self, text: &str) -> Option<f64> {
        let caps = self.weight.captures(text)?;
        caps[1].replace(',', ".").parse().ok()
    }
}

fn capture_u32(regex: &Regex, text: &str) -> Option<u32> {
    regex.captures(text)?.get(1)?.as_str().parse().ok()
}

fn category(text: &str) -> Option<Category> {
    let lowered = text.to_lowercase();
    CATEGORY_VOCABULARY
        .iter()
        .find(|(token, _)| occurs(&lowered, token))
        .map(|(_, category)| *category)
}

/// Whether `token` occurs in `text`
///
/// Latin tokens must start a word ("sport" is not found in "transport").
/// Cyrillic tokens match anywhere, which admits inflected forms.
fn occurs(text: &str, token: &str) -> bool {
    if !token.is_ascii() {
        return text.contains(token);
    }
    text.match_indices(token).any(|(at, _)| {
        !text[..at]
            .chars()
            .next_back()
            .is_some_and(char::is_alphanumeric)
    })
}
