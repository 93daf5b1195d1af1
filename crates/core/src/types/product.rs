//! Financial product record.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::id::ProductId;
use crate::dates;

/// A financial product as exchanged with the product API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Unique identifier chosen at creation time.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Free-text description.
    pub description: String,
    /// Logo reference (usually an image URL).
    pub logo: String,
    /// Date the product goes live.
    #[serde(with = "dates::api_date")]
    pub date_release: NaiveDate,
    /// Date the product is next reviewed.
    #[serde(with = "dates::api_date")]
    pub date_revision: NaiveDate,
}

impl Product {
    /// Whether the lowercased `needle` occurs in the name or description.
    ///
    /// The needle must already be lowercased; see
    /// [`filter_products`](crate::filter::filter_products).
    #[must_use]
    pub fn matches_lowercase(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle) || self.description.to_lowercase().contains(needle)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_api_payload() {
        let product: Product = serde_json::from_value(json!({
            "id": "trj-crd",
            "name": "Tarjeta de credito",
            "description": "Tarjeta de consumo bajo la modalidad de credito",
            "logo": "https://example.com/logo.png",
            "date_release": "2025-01-01T00:00:00.000+00:00",
            "date_revision": "2026-01-01"
        }))
        .unwrap();

        assert_eq!(product.id.as_str(), "trj-crd");
        assert_eq!(
            product.date_release,
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()
        );
        assert_eq!(
            product.date_revision,
            NaiveDate::from_ymd_opt(2026, 1, 1).unwrap()
        );
    }

    #[test]
    fn test_serialize_uses_plain_dates() {
        let product = Product {
            id: ProductId::parse("trj-crd").unwrap(),
            name: "Tarjeta".to_string(),
            description: "Tarjeta de credito".to_string(),
            logo: "logo.png".to_string(),
            date_release: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            date_revision: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
        };

        let value = serde_json::to_value(&product).unwrap();
        assert_eq!(value["date_release"], "2025-01-01");
        assert_eq!(value["date_revision"], "2026-01-01");
        assert_eq!(value["id"], "trj-crd");
    }

    #[test]
    fn test_rejects_bad_date() {
        let result: Result<Product, _> = serde_json::from_value(json!({
            "id": "trj-crd",
            "name": "Tarjeta",
            "description": "Tarjeta de credito",
            "logo": "logo.png",
            "date_release": "not a date",
            "date_revision": "2026-01-01"
        }));
        assert!(result.is_err());
    }
}
