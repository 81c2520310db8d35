//! Rebate prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{Cart, ShoppingCart},
    engine::{Calculation, MatchPolicy, PromotionError, describe_condition},
    promotions::{
        InvalidSchema, Promotion,
        schema::{AmountType, ConditionType, RewardType, Schema, SchemaStatus, UnknownVariant},
        values::ParseError,
    },
    receipt::{Receipt, ReceiptError},
    rewards::{ProductReward, Reward, RewardProduct},
    rules::{AvailableSkus, EligibilityRule, FnRule, RuleViolation},
};
