//! The car record as served by the `/car` endpoints.

use serde::{Deserialize, Deserializer, Serialize};

use crate::types::{DbId, Timestamp};

/// Image shown when a car has no stored picture.
pub const PLACEHOLDER_IMAGE: &str = "/assets/images/noImage.jpg";

/// Label shown when a car has no type.
pub const PLACEHOLDER_TYPE: &str = "Tipe Mobil";

/// A car listing.
///
/// The identifier is assigned by the server on creation and is only
/// readable through [`Car::id`]; every other change goes through the
/// update endpoint and a refetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Car {
    id: DbId,
    pub model: String,
    #[serde(rename = "type", default)]
    pub car_type: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub year: String,
    /// Raw stored image reference.
    #[serde(default)]
    pub image: Option<String>,
    /// Resolved URL for `image`.
    #[serde(default)]
    pub image_url: Option<String>,
    /// Price per day.
    #[serde(deserialize_with = "number_or_text")]
    pub price: f64,
    #[serde(default, deserialize_with = "optional_number_or_text")]
    pub rent_per_day: Option<f64>,
    #[serde(default)]
    pub start_rent: Option<Timestamp>,
    #[serde(default)]
    pub finish_rent: Option<Timestamp>,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
    #[serde(default)]
    pub updated_at: Option<Timestamp>,
    #[serde(default)]
    pub deleted_at: Option<Timestamp>,
}

impl Car {
    /// Create a record with only the required attributes set.
    pub fn new(id: DbId, model: impl Into<String>, year: impl Into<String>, price: f64) -> Self {
        Self {
            id,
            model: model.into(),
            car_type: None,
            year: year.into(),
            image: None,
            image_url: None,
            price,
            rent_per_day: None,
            start_rent: None,
            finish_rent: None,
            created_at: None,
            updated_at: None,
            deleted_at: None,
        }
    }

    pub fn id(&self) -> DbId {
        self.id
    }

    /// The car type, or [`PLACEHOLDER_TYPE`] when absent or empty.
    pub fn display_type(&self) -> &str {
        non_empty(self.car_type.as_deref()).unwrap_or(PLACEHOLDER_TYPE)
    }

    /// The image to render for this car.
    ///
    /// Uses the resolved URL only when a raw image reference exists;
    /// otherwise falls back to [`PLACEHOLDER_IMAGE`], so the result is
    /// always renderable.
    pub fn image_src(&self) -> &str {
        match (non_empty(self.image.as_deref()), non_empty(self.image_url.as_deref())) {
            (Some(_), Some(url)) => url,
            _ => PLACEHOLDER_IMAGE,
        }
    }

    /// Both rental period bounds, when the record carries them.
    pub fn rent_period(&self) -> Option<(Timestamp, Timestamp)> {
        self.start_rent.zip(self.finish_rent)
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// Accept `year` either as a JSON string or a number.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(serde_json::Number),
        Null(()),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(text) => text,
        Raw::Number(number) => number.to_string(),
        Raw::Null(()) => String::new(),
    })
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawNumber {
    Number(f64),
    Text(String),
}

impl RawNumber {
    /// Text is trimmed; blank reads as zero and anything unparseable as NaN.
    fn into_f64(self) -> f64 {
        match self {
            RawNumber::Number(n) => n,
            RawNumber::Text(text) => {
                let text = text.trim();
                if text.is_empty() {
                    0.0
                } else {
                    text.parse().unwrap_or(f64::NAN)
                }
            }
        }
    }
}

/// Accept a price either as a JSON number or a numeric string.
fn number_or_text<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    RawNumber::deserialize(deserializer).map(RawNumber::into_f64)
}

fn optional_number_or_text<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<RawNumber>::deserialize(deserializer)?.map(RawNumber::into_f64))
}
