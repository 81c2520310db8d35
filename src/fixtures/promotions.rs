//! Promotion Fixtures

use jiff::Timestamp;
use rustc_hash::FxHashMap;
use serde::Deserialize;
use serde_json::Value;

use crate::promotions::{Promotion, schema::Schema};

/// Wrapper for promotions in YAML
#[derive(Debug, Deserialize)]
pub struct PromotionsFixture {
    /// Map of promotion key -> promotion fixture
    pub promotions: FxHashMap<String, PromotionFixture>,
}

/// Promotion fixture from YAML
#[derive(Debug, Deserialize)]
pub struct PromotionFixture {
    /// Promotion name
    pub name: String,

    /// Start of the validity window; unbounded when omitted
    #[serde(default)]
    pub start_at: Option<Timestamp>,

    /// End of the validity window; unbounded when omitted
    #[serde(default)]
    pub expired_at: Option<Timestamp>,

    /// Schemas, in evaluation order
    pub schemas: Vec<Schema>,

    /// Free-form extension payload
    #[serde(default)]
    pub additional_info: Value,
}

impl From<PromotionFixture> for Promotion<Value> {
    fn from(fixture: PromotionFixture) -> Self {
        Promotion::new(
            fixture.name,
            fixture.start_at.unwrap_or(Timestamp::MIN),
            fixture.expired_at.unwrap_or(Timestamp::MAX),
            fixture.schemas,
        )
        .with_additional_info(fixture.additional_info)
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::promotions::schema::{AmountType, ConditionType, RewardType};

    use super::*;

    #[test]
    fn converts_fixture_with_defaults() -> TestResult {
        let fixture: PromotionsFixture = serde_norway::from_str(
            r#"
promotions:
  spend:
    name: Spend 5000
    schemas:
      - amount_type: SUBTOTAL
        condition_type: MIN_PRICE
        condition_value: "5000"
        reward_type: DISCOUNT_AMOUNT
        reward_value: "2500"
"#,
        )?;

        let Some(spend) = fixture.promotions.into_iter().next().map(|(_, p)| p) else {
            return Err("expected one promotion".into());
        };

        let promotion = Promotion::from(spend);

        assert_eq!(promotion.name, "Spend 5000");
        assert_eq!(promotion.start_at, Timestamp::MIN);
        assert_eq!(promotion.expired_at, Timestamp::MAX);
        assert_eq!(promotion.additional_info, Value::Null);
        assert_eq!(
            promotion.schemas,
            vec![Schema::new(
                AmountType::Subtotal,
                ConditionType::MinPrice,
                "5000",
                RewardType::DiscountAmount,
                "2500",
            )]
        );

        Ok(())
    }

    #[test]
    fn keeps_window_and_additional_info() -> TestResult {
        let fixture: PromotionFixture = serde_norway::from_str(
            r#"
name: Windowed
start_at: "2026-01-01T00:00:00Z"
expired_at: "2026-02-01T00:00:00Z"
schemas: []
additional_info:
  campaign: "123"
"#,
        )?;

        let promotion = Promotion::from(fixture);

        assert_eq!(promotion.start_at, "2026-01-01T00:00:00Z".parse::<Timestamp>()?);
        assert_eq!(promotion.additional_info["campaign"], "123");

        Ok(())
    }

    #[test]
    fn rejects_unknown_condition_type() {
        let result: Result<PromotionFixture, _> = serde_norway::from_str(
            r#"
name: Typo
schemas:
  - amount_type: SUBTOTAL
    condition_type: MIN_PRIZE
    condition_value: "1"
    reward_type: DISCOUNT_AMOUNT
    reward_value: "1"
"#,
        );

        assert!(result.is_err(), "unknown condition types must not load");
    }
}
