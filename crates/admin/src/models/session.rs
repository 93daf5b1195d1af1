//! Session-related types for the panel.
//!
//! The session carries the listing state between requests and one-shot
//! alerts shown after a redirect.

use serde::{Deserialize, Serialize};

/// Alert severity, mapped to a style in templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlashKind {
    Success,
    Error,
}

/// One-shot alert displayed on the next rendered page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flash {
    /// Alert title.
    pub title: String,
    /// Alert body.
    pub message: String,
    /// Severity.
    pub kind: FlashKind,
}

impl Flash {
    /// A success alert.
    #[must_use]
    pub fn success(title: &str, message: impl Into<String>) -> Self {
        Self {
            title: title.to_string(),
            message: message.into(),
            kind: FlashKind::Success,
        }
    }

    /// An error alert.
    #[must_use]
    pub fn error(title: &str, message: impl Into<String>) -> Self {
        Self {
            title: title.to_string(),
            message: message.into(),
            kind: FlashKind::Error,
        }
    }

    /// CSS modifier for the alert box.
    #[must_use]
    pub const fn css_class(&self) -> &'static str {
        match self.kind {
            FlashKind::Success => "alert-success",
            FlashKind::Error => "alert-error",
        }
    }
}

/// Session keys for panel state.
pub mod keys {
    /// Key for the product listing state.
    pub const PRODUCT_LISTING: &str = "product_listing";

    /// Key for the pending flash alert.
    pub const FLASH: &str = "flash";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flash_constructors() {
        let flash = Flash::success("Product added", "The product was added successfully.");
        assert_eq!(flash.kind, FlashKind::Success);
        assert_eq!(flash.css_class(), "alert-success");

        let flash = Flash::error("Error", "Could not delete the product.");
        assert_eq!(flash.kind, FlashKind::Error);
        assert_eq!(flash.css_class(), "alert-error");
    }
}
