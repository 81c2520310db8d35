//! Promotions

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::promotions::{schema::Schema, values::ParseError};

pub mod schema;
pub mod values;

/// A schema whose parameters do not decode.
#[derive(Debug, Error, PartialEq)]
#[error("schema {index} is invalid: {source}")]
pub struct InvalidSchema {
    /// Position of the schema within the promotion
    pub index: usize,

    /// Decoding failure
    #[source]
    pub source: ParseError,
}

/// A promotion: an ordered list of schemas plus identity, validity window and an extension
/// payload.
///
/// `E` is carried through evaluation untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Promotion<E = ()> {
    /// Promotion name
    pub name: String,

    /// Start of the validity window (inclusive)
    pub start_at: Timestamp,

    /// End of the validity window (exclusive)
    pub expired_at: Timestamp,

    /// Rules, evaluated in order
    pub schemas: Vec<Schema>,

    /// Caller-defined extension payload
    #[serde(default)]
    pub additional_info: E,
}

impl Promotion {
    /// Create a new promotion without an extension payload.
    pub fn new(
        name: impl Into<String>,
        start_at: Timestamp,
        expired_at: Timestamp,
        schemas: impl Into<Vec<Schema>>,
    ) -> Self {
        Self {
            name: name.into(),
            start_at,
            expired_at,
            schemas: schemas.into(),
            additional_info: (),
        }
    }
}

impl<E> Promotion<E> {
    /// Replace the extension payload.
    pub fn with_additional_info<F>(self, additional_info: F) -> Promotion<F> {
        Promotion {
            name: self.name,
            start_at: self.start_at,
            expired_at: self.expired_at,
            schemas: self.schemas,
            additional_info,
        }
    }

    /// Whether `at` falls inside the validity window.
    ///
    /// Evaluation never checks this; callers decide whether an expired promotion is offered.
    pub fn is_running_at(&self, at: Timestamp) -> bool {
        self.start_at <= at && at < self.expired_at
    }

    /// Iterate the schemas marked active, in order.
    pub fn active_schemas(&self) -> impl Iterator<Item = &Schema> {
        self.schemas.iter().filter(|schema| schema.is_active())
    }

    /// Drop inactive schemas.
    #[must_use]
    pub fn retain_active(mut self) -> Self {
        self.schemas.retain(Schema::is_active);
        self
    }

    /// Check every schema's parameters.
    ///
    /// # Errors
    ///
    /// Returns the first schema that fails [`Schema::validate`].
    pub fn validate(&self) -> Result<(), InvalidSchema> {
        self.schemas
            .iter()
            .enumerate()
            .try_for_each(|(index, schema)| {
                schema
                    .validate()
                    .map_err(|source| InvalidSchema { index, source })
            })
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::promotions::schema::{AmountType, ConditionType, RewardType, SchemaStatus};

    use super::*;

    fn min_price(value: &str) -> Schema {
        Schema::new(
            AmountType::Subtotal,
            ConditionType::MinPrice,
            value,
            RewardType::DiscountAmount,
            "2500",
        )
    }

    fn promotion(schemas: Vec<Schema>) -> TestResult<Promotion> {
        Ok(Promotion::new(
            "TEST",
            "2026-01-01T00:00:00Z".parse()?,
            "2026-02-01T00:00:00Z".parse()?,
            schemas,
        ))
    }

    #[test]
    fn is_running_at_includes_start_and_excludes_expiry() -> TestResult {
        let promo = promotion(vec![])?;

        assert!(promo.is_running_at("2026-01-01T00:00:00Z".parse()?));
        assert!(promo.is_running_at("2026-01-15T12:00:00Z".parse()?));
        assert!(!promo.is_running_at("2026-02-01T00:00:00Z".parse()?));
        assert!(!promo.is_running_at("2025-12-31T23:59:59Z".parse()?));

        Ok(())
    }

    #[test]
    fn active_schemas_skips_inactive() -> TestResult {
        let promo = promotion(vec![
            min_price("1000").with_status(SchemaStatus::Inactive),
            min_price("2000"),
        ])?;

        let active: Vec<_> = promo.active_schemas().collect();

        assert_eq!(active, vec![&min_price("2000")]);
        assert_eq!(promo.retain_active().schemas, vec![min_price("2000")]);

        Ok(())
    }

    #[test]
    fn validate_reports_failing_schema_index() -> TestResult {
        let promo = promotion(vec![min_price("1000"), min_price("abc")])?;

        let result = promo.validate();

        assert!(
            matches!(result, Err(InvalidSchema { index: 1, .. })),
            "expected schema 1 to fail, got {result:?}"
        );

        Ok(())
    }

    #[test]
    fn additional_info_is_carried_through() -> TestResult {
        let promo = promotion(vec![min_price("1000")])?.with_additional_info("123");

        assert_eq!(promo.additional_info, "123");
        assert_eq!(promo.schemas.len(), 1);

        Ok(())
    }
}
