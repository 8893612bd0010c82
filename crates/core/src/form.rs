//! Form payload submitted when adding or updating a car.
//!
//! The client sends this as `multipart/form-data`; [`CarForm::text_fields`]
//! yields the text parts in submission order and the optional image is
//! attached separately as the `image` part.

use validator::{Validate, ValidationErrors};

use crate::car::Car;
use crate::error::CoreError;
use crate::types::Timestamp;

/// Multipart field name of the image attachment.
pub const IMAGE_FIELD: &str = "image";

/// A file attached to the form as the car's picture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

/// Editable car attributes.
#[derive(Debug, Clone, PartialEq, Validate)]
pub struct CarForm {
    #[validate(length(min = 1, message = "Model is required"))]
    pub model: String,
    pub car_type: Option<String>,
    #[validate(length(min = 1, message = "Year is required"))]
    pub year: String,
    #[validate(range(min = 0.0, message = "Price must not be negative"))]
    pub price: f64,
    pub start_rent: Option<Timestamp>,
    pub finish_rent: Option<Timestamp>,
    pub image: Option<ImageUpload>,
}

impl CarForm {
    pub fn new(model: impl Into<String>, year: impl Into<String>, price: f64) -> Self {
        Self {
            model: model.into(),
            car_type: None,
            year: year.into(),
            price,
            start_rent: None,
            finish_rent: None,
            image: None,
        }
    }

    /// Seed a form from an existing record, as the edit modal does.
    ///
    /// The stored image is not re-uploaded; only a newly attached file
    /// replaces it.
    pub fn from_car(car: &Car) -> Self {
        Self {
            model: car.model.clone(),
            car_type: car.car_type.clone(),
            year: car.year.clone(),
            price: car.price,
            start_rent: car.start_rent,
            finish_rent: car.finish_rent,
            image: None,
        }
    }

    /// Run field rules plus the rental period ordering check.
    pub fn check(&self) -> Result<(), CoreError> {
        self.validate()
            .map_err(|errors| CoreError::Validation(describe(&errors)))?;

        if let (Some(start), Some(finish)) = (self.start_rent, self.finish_rent) {
            if finish < start {
                return Err(CoreError::Validation(
                    "Finish rent must not be before start rent".to_string(),
                ));
            }
        }

        Ok(())
    }

    /// Text parts of the multipart body, keyed by the backend's field names.
    pub fn text_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![("model", self.model.clone())];

        if let Some(car_type) = &self.car_type {
            fields.push(("type", car_type.clone()));
        }
        fields.push(("year", self.year.clone()));
        fields.push(("price", self.price.to_string()));

        if let Some(start) = self.start_rent {
            fields.push(("startRent", start.to_rfc3339()));
        }
        if let Some(finish) = self.finish_rent {
            fields.push(("finishRent", finish.to_rfc3339()));
        }

        fields
    }
}

/// Flatten validator output into one deterministic message.
fn describe(errors: &ValidationErrors) -> String {
    let mut messages: Vec<String> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| match &e.message {
                Some(message) => message.to_string(),
                None => format!("{field} is invalid"),
            })
        })
        .collect();
    messages.sort();
    messages.join("; ")
}
