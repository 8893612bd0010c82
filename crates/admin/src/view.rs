//! Text rendered on a car card.

use std::fmt;

use chrono::FixedOffset;
use rental_core::car::Car;
use rental_core::format::{format_date, format_price, format_timestamp};

/// Shown when a car carries neither `updatedAt` nor `createdAt`.
pub const FALLBACK_TIMESTAMP_LABEL: &str = "Updated At 4 Apr 2022, 09:00";

/// Shown when a car has no complete rental period.
pub const RENT_PERIOD_PLACEHOLDER: &str = "Start Rent - Finish Rent";

/// Everything a car card displays, already formatted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardView {
    pub image_src: String,
    /// `{model}/{type}`.
    pub title: String,
    /// `Rp {price} /hari`.
    pub price_label: String,
    pub rent_period_label: String,
    pub timestamp_label: String,
}

impl CardView {
    pub fn new(car: &Car, offset: &FixedOffset) -> Self {
        Self {
            image_src: car.image_src().to_string(),
            title: format!("{}/{}", car.model, car.display_type()),
            price_label: format!("Rp {} /hari", format_price(car.price)),
            rent_period_label: rent_period_label(car, offset),
            timestamp_label: timestamp_label(car, offset),
        }
    }
}

impl fmt::Display for CardView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        writeln!(f, "  {}", self.price_label)?;
        writeln!(f, "  {}", self.rent_period_label)?;
        writeln!(f, "  {}", self.timestamp_label)?;
        write!(f, "  {}", self.image_src)
    }
}

/// `Updated At …`, falling back to `Created At …`, then to a fixed date.
pub fn timestamp_label(car: &Car, offset: &FixedOffset) -> String {
    if let Some(updated) = &car.updated_at {
        format!("Updated At {}", format_timestamp(updated, offset))
    } else if let Some(created) = &car.created_at {
        format!("Created At {}", format_timestamp(created, offset))
    } else {
        FALLBACK_TIMESTAMP_LABEL.to_string()
    }
}

pub fn rent_period_label(car: &Car, offset: &FixedOffset) -> String {
    match car.rent_period() {
        Some((start, finish)) => format!(
            "{} - {}",
            format_date(&start, offset),
            format_date(&finish, offset)
        ),
        None => RENT_PERIOD_PLACEHOLDER.to_string(),
    }
}
