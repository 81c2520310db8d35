//! Promotion Schemas
//!
//! A schema is one rule of a promotion: a condition over a cart aggregate and the reward
//! granted when it holds.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    promotions::values::{ParseError, parse_amount, parse_range},
    rewards::RewardProduct,
};

/// A wire name that does not correspond to any known variant.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown {kind} {value:?}")]
pub struct UnknownVariant {
    /// Which enumeration was being parsed
    pub kind: &'static str,

    /// The rejected input
    pub value: String,
}

/// Declares a closed enumeration with a stable upper-case wire name per variant.
///
/// Extra names after `|` are accepted when decoding but never produced.
macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $name:ident ($kind:literal) {
            $( $(#[$vmeta:meta])* $variant:ident => $wire:literal $(| $alias:literal)* ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                $(#[$vmeta])*
                #[serde(rename = $wire $(, alias = $alias)*)]
                $variant,
            )+
        }

        impl $name {
            /// Return the wire name of this variant.
            pub const fn as_str(self) -> &'static str {
                match self {
                    $( Self::$variant => $wire, )+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = UnknownVariant;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $( $wire $(| $alias)* => Ok(Self::$variant), )+
                    other => Err(UnknownVariant {
                        kind: $kind,
                        value: other.to_string(),
                    }),
                }
            }
        }
    };
}

wire_enum! {
    /// Cart aggregate a condition is measured against.
    AmountType ("amount type") {
        /// Cart subtotal
        Subtotal => "SUBTOTAL",

        /// Cart grand total. No condition evaluator supports it yet.
        GrandTotal => "GRANDTOTAL",
    }
}

wire_enum! {
    /// Predicate family of a schema condition.
    ConditionType ("condition type") {
        /// Aggregate is at least `condition_value`
        MinPrice => "MIN_PRICE",

        /// Aggregate lies within `LOW|HIGH`, both ends inclusive
        RangePrice => "RANGE_PRICE",

        /// Reserved; never matches
        SpecificSku => "SPECIFIC_SKU" | "SPESIFIC_SKU",

        /// Reserved; never matches
        SpecificCategory => "SPECIFIC_CATEGORY" | "SPESIFIC_CATEGORY",
    }
}

wire_enum! {
    /// Kind of reward granted by a matching schema.
    RewardType ("reward type") {
        /// Fixed amount off the grand total
        DiscountAmount => "DISCOUNT_AMOUNT",

        /// Reserved; never produces a reward
        DiscountPercentage => "DISCOUNT_PERCENTAGE",

        /// Free product(s), no deduction
        Product => "PRODUCT",
    }
}

wire_enum! {
    /// Schema status. The engine does not consult it.
    #[derive(Default)]
    SchemaStatus ("schema status") {
        /// Active
        #[default]
        Active => "ACTIVE",

        /// Inactive
        Inactive => "INACTIVE",
    }
}

/// One promotion rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    /// Aggregate the condition measures
    pub amount_type: AmountType,

    /// Predicate family
    pub condition_type: ConditionType,

    /// Condition parameter: `"5000"` for min price, `"50000|100000"` for a range
    pub condition_value: String,

    /// Reward family
    pub reward_type: RewardType,

    /// Reward parameter: a decimal for amount discounts, product JSON for product rewards
    pub reward_value: String,

    /// Status
    #[serde(default)]
    pub status: SchemaStatus,
}

impl Schema {
    /// Create a new active schema.
    pub fn new(
        amount_type: AmountType,
        condition_type: ConditionType,
        condition_value: impl Into<String>,
        reward_type: RewardType,
        reward_value: impl Into<String>,
    ) -> Self {
        Self {
            amount_type,
            condition_type,
            condition_value: condition_value.into(),
            reward_type,
            reward_value: reward_value.into(),
            status: SchemaStatus::Active,
        }
    }

    /// Return a copy of this schema with the given status.
    #[must_use]
    pub fn with_status(mut self, status: SchemaStatus) -> Self {
        self.status = status;
        self
    }

    /// Whether the schema is marked active.
    pub fn is_active(&self) -> bool {
        self.status == SchemaStatus::Active
    }

    /// Check that both parameter strings decode according to the declared types.
    ///
    /// Product JSON is decoded strictly here, unlike during evaluation.
    ///
    /// # Errors
    ///
    /// Returns the first [`ParseError`] encountered.
    pub fn validate(&self) -> Result<(), ParseError> {
        match self.condition_type {
            ConditionType::MinPrice => {
                parse_amount(&self.condition_value)?;
            }
            ConditionType::RangePrice => {
                parse_range(&self.condition_value)?;
            }
            ConditionType::SpecificSku | ConditionType::SpecificCategory => {}
        }

        match self.reward_type {
            RewardType::DiscountAmount => {
                parse_amount(&self.reward_value)?;
            }
            RewardType::Product => {
                RewardProduct::decode(&self.reward_value)?;
            }
            RewardType::DiscountPercentage => {}
        }

        Ok(())
    }
}
