//! Product form validation.
//!
//! A [`ProductDraft`] holds the raw strings of the create/edit form (or the
//! CLI flags). [`ProductDraft::validate`] checks every field, collecting all
//! failures instead of stopping at the first one, and yields a [`Product`]
//! when the draft is clean.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::dates::{self, DateError};
use crate::types::{Product, ProductId, ProductIdError};

/// Length limits for the text fields, in characters.
pub const NAME_LENGTH: (usize, usize) = (5, 100);
/// Length limits for the description, in characters.
pub const DESCRIPTION_LENGTH: (usize, usize) = (10, 200);

/// Raw product form input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductDraft {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub logo: String,
    #[serde(default)]
    pub date_release: String,
    #[serde(default)]
    pub date_revision: String,
}

/// A single field failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// Form field name (`id`, `name`, ...).
    pub field: &'static str,
    /// Machine-readable error key (`required`, `min_length`, ...).
    pub code: &'static str,
    /// Human-readable message.
    pub message: String,
}

/// Every failure found in a draft, in field order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, thiserror::Error)]
#[error("{}", summarize(.errors))]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    /// Record a failure.
    pub fn push(&mut self, field: &'static str, code: &'static str, message: impl Into<String>) {
        self.errors.push(FieldError {
            field,
            code,
            message: message.into(),
        });
    }

    /// Whether no failure was recorded.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// All failures.
    #[must_use]
    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// Failures for one field.
    pub fn for_field<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a FieldError> + 'a {
        self.errors.iter().filter(move |e| e.field == field)
    }

    /// Whether `field` failed with `code`.
    #[must_use]
    pub fn has(&self, field: &str, code: &str) -> bool {
        self.for_field(field).any(|e| e.code == code)
    }

    /// First message for `field`, for inline display next to the input.
    #[must_use]
    pub fn message_for(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }
}

fn summarize(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join("; ")
}

impl ProductDraft {
    /// Validate the draft against `today`.
    ///
    /// # Errors
    ///
    /// Returns every field failure when the draft is not a valid product.
    pub fn validate(&self, today: NaiveDate) -> Result<Product, ValidationErrors> {
        let mut errors = ValidationErrors::default();

        let id = check_id(&self.id, &mut errors);
        check_length("name", &self.name, NAME_LENGTH, &mut errors);
        check_length("description", &self.description, DESCRIPTION_LENGTH, &mut errors);
        if self.logo.trim().is_empty() {
            errors.push("logo", "required", "Logo is required");
        }

        let release = check_date("date_release", &self.date_release, &mut errors);
        if let Some(release) = release
            && !is_current_or_future(release, today)
        {
            errors.push(
                "date_release",
                "date_not_past",
                "Release date must be today or later",
            );
        }

        let revision = check_date("date_revision", &self.date_revision, &mut errors);
        if let Some(revision) = revision
            && !revision_after_release(release, revision)
        {
            errors.push(
                "date_revision",
                "revision_after_release",
                "Revision date must be after the release date",
            );
        }

        match (id, release, revision) {
            (Some(id), Some(date_release), Some(date_revision)) if errors.is_empty() => {
                Ok(Product {
                    id,
                    name: self.name.clone(),
                    description: self.description.clone(),
                    logo: self.logo.clone(),
                    date_release,
                    date_revision,
                })
            }
            _ => Err(errors),
        }
    }
}

impl From<&Product> for ProductDraft {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.to_string(),
            name: product.name.clone(),
            description: product.description.clone(),
            logo: product.logo.clone(),
            date_release: dates::format_date(product.date_release),
            date_revision: dates::format_date(product.date_revision),
        }
    }
}

/// A release date passes when it is not before `today`.
#[must_use]
pub fn is_current_or_future(date: NaiveDate, today: NaiveDate) -> bool {
    date >= today
}

/// A revision passes only when a release is known and the revision is
/// strictly later.
#[must_use]
pub fn revision_after_release(release: Option<NaiveDate>, revision: NaiveDate) -> bool {
    release.is_some_and(|release| revision > release)
}

fn check_id(raw: &str, errors: &mut ValidationErrors) -> Option<ProductId> {
    if raw.trim().is_empty() {
        errors.push("id", "required", "ID is required");
        return None;
    }
    match ProductId::parse(raw) {
        Ok(id) => Some(id),
        Err(ProductIdError::TooShort { min }) => {
            errors.push("id", "min_length", format!("ID must be at least {min} characters"));
            None
        }
        Err(ProductIdError::TooLong { max }) => {
            errors.push("id", "max_length", format!("ID must be at most {max} characters"));
            None
        }
        Err(ProductIdError::Empty) => {
            errors.push("id", "required", "ID is required");
            None
        }
    }
}

fn check_length(
    field: &'static str,
    value: &str,
    (min, max): (usize, usize),
    errors: &mut ValidationErrors,
) {
    let len = value.chars().count();
    if value.trim().is_empty() {
        errors.push(field, "required", format!("{} is required", label(field)));
    } else if len < min {
        errors.push(
            field,
            "min_length",
            format!("{} must be at least {min} characters", label(field)),
        );
    } else if len > max {
        errors.push(
            field,
            "max_length",
            format!("{} must be at most {max} characters", label(field)),
        );
    }
}

fn check_date(field: &'static str, raw: &str, errors: &mut ValidationErrors) -> Option<NaiveDate> {
    match dates::parse_date(raw) {
        Ok(date) => Some(date),
        Err(DateError::Empty) => {
            errors.push(field, "required", format!("{} is required", label(field)));
            None
        }
        Err(e @ DateError::Invalid(_)) => {
            errors.push(field, "invalid_date", e.to_string());
            None
        }
    }
}

fn label(field: &str) -> &'static str {
    match field {
        "name" => "Name",
        "description" => "Description",
        "date_release" => "Release date",
        "date_revision" => "Revision date",
        _ => "Field",
    }
}
