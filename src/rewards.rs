//! Rewards
//!
//! Reward calculators turn the eligible amount of a matched schema into a concrete reward.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::promotions::{
    schema::{RewardType, Schema},
    values::{ParseError, parse_amount},
};

/// The outcome of a matched schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reward {
    /// Reward family
    pub reward_type: RewardType,

    /// The schema's `reward_value`, echoed unchanged
    pub reward_value: String,

    /// Rendered description. The engine leaves this empty.
    pub reward_result: Option<String>,
}

impl Reward {
    /// Create a reward echoing a schema's reward configuration.
    pub fn from_schema(schema: &Schema) -> Self {
        Self {
            reward_type: schema.reward_type,
            reward_value: schema.reward_value.clone(),
            reward_result: None,
        }
    }

    /// Decode the free products of a product reward.
    ///
    /// Returns `None` for other reward types. Undecodable JSON yields an empty payload.
    pub fn products(&self) -> Option<RewardProduct> {
        match self.reward_type {
            RewardType::Product => Some(RewardProduct::decode_lenient(&self.reward_value)),
            RewardType::DiscountAmount | RewardType::DiscountPercentage => None,
        }
    }
}

/// Decoded payload of a product reward: `{"products":[{"id","name","image"}],"qty":1}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardProduct {
    /// Products the customer may receive
    #[serde(default)]
    pub products: Vec<ProductReward>,

    /// Quantity granted
    #[serde(default)]
    pub qty: u32,
}

/// One free product.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductReward {
    /// Product identifier
    #[serde(default)]
    pub id: String,

    /// Display name
    #[serde(default)]
    pub name: String,

    /// Image URL
    #[serde(default)]
    pub image: String,
}

impl RewardProduct {
    /// Decode product reward JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::InvalidProducts`] if `value` is not valid product JSON.
    pub fn decode(value: &str) -> Result<Self, ParseError> {
        serde_json::from_str(value).map_err(|err| ParseError::InvalidProducts {
            value: value.to_string(),
            message: err.to_string(),
        })
    }

    /// Decode product reward JSON, falling back to an empty payload.
    pub fn decode_lenient(value: &str) -> Self {
        Self::decode(value).unwrap_or_else(|err| {
            warn!(error = %err, "product reward did not decode; using empty payload");
            Self::default()
        })
    }
}

/// A reward together with the amount it takes off the grand total.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewardGrant {
    /// Amount deducted from the grand total
    pub deduction: Decimal,

    /// The reward itself
    pub reward: Reward,

    /// Decoded free products; `None` for discounts
    pub products: Option<RewardProduct>,
}

/// A schema's reward configuration, decoded ahead of condition evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RewardCalculator {
    /// Fixed amount off the grand total
    DiscountAmount(Decimal),

    /// Free product(s)
    Product,

    /// Reward type without a calculator; never yields a reward
    Unsupported,
}

impl RewardCalculator {
    /// Decode the reward configuration of a schema.
    ///
    /// Product JSON is decoded leniently in [`Self::compute`].
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] if an amount discount's `reward_value` is not a decimal.
    pub fn from_schema(schema: &Schema) -> Result<Self, ParseError> {
        Ok(match schema.reward_type {
            RewardType::DiscountAmount => Self::DiscountAmount(parse_amount(&schema.reward_value)?),
            RewardType::Product => Self::Product,
            RewardType::DiscountPercentage => Self::Unsupported,
        })
    }

    /// Compute the reward for a matched schema.
    ///
    /// Returns `None` for an amount discount on a non-positive eligible amount, and for
    /// unsupported reward types.
    pub fn compute(&self, eligible_amount: Decimal, schema: &Schema) -> Option<RewardGrant> {
        match self {
            Self::DiscountAmount(value) => (eligible_amount > Decimal::ZERO).then(|| RewardGrant {
                deduction: *value,
                reward: Reward::from_schema(schema),
                products: None,
            }),
            Self::Product => Some(RewardGrant {
                deduction: Decimal::ZERO,
                reward: Reward::from_schema(schema),
                products: Some(RewardProduct::decode_lenient(&schema.reward_value)),
            }),
            Self::Unsupported => None,
        }
    }
}

/// Compute the reward for a matched schema.
///
/// # Errors
///
/// Returns a [`ParseError`] if an amount discount's `reward_value` is not a decimal.
pub fn compute_reward(
    eligible_amount: Decimal,
    schema: &Schema,
) -> Result<Option<RewardGrant>, ParseError> {
    Ok(RewardCalculator::from_schema(schema)?.compute(eligible_amount, schema))
}
