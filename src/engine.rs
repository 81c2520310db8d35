//! Promotion Engine
//!
//! Scans a promotion's schemas in order against a cart, collecting the rewards of matching
//! schemas and the adjusted grand total.

use std::fmt;

use rust_decimal::Decimal;
use serde::Serialize;
use smallvec::SmallVec;
use thiserror::Error;
use tracing::{debug, trace};

use crate::{
    cart::ShoppingCart,
    conditions::{evaluate_condition, is_supported},
    promotions::{
        Promotion,
        schema::{ConditionType, Schema},
        values::ParseError,
    },
    rewards::{Reward, RewardCalculator},
    rules::{EligibilityRule, RuleViolation, check_rules},
};

/// Errors returned by promotion evaluation.
#[derive(Debug, Error)]
pub enum PromotionError {
    /// A schema parameter did not decode; no partial result is returned.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// The eligibility callback failed. Carries a description of the first schema's condition.
    #[error("{0}")]
    EligibilityRejected(String),

    /// An eligibility rule rejected the cart.
    #[error(transparent)]
    RuleViolated(#[from] RuleViolation),
}

/// How many matching schemas contribute rewards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MatchPolicy {
    /// Stop at the first schema that yields a reward.
    #[default]
    FirstMatch,

    /// Accumulate rewards and deductions from every schema that yields one.
    Stack,
}

/// Result of evaluating a promotion against a cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Calculation {
    rewards: SmallVec<[Reward; 1]>,
    matched_schemas: SmallVec<[usize; 1]>,
    grand_total: Decimal,
    deduction: Decimal,
}

impl Calculation {
    /// Rewards in schema order.
    pub fn rewards(&self) -> &[Reward] {
        &self.rewards
    }

    /// Indexes of the schemas that produced [`Self::rewards`].
    pub fn matched_schemas(&self) -> &[usize] {
        &self.matched_schemas
    }

    /// Grand total after deductions. Not clamped at zero.
    pub fn grand_total(&self) -> Decimal {
        self.grand_total
    }

    /// Sum of all deductions.
    pub fn deduction(&self) -> Decimal {
        self.deduction
    }

    /// Whether any schema produced a reward.
    pub fn is_rewarded(&self) -> bool {
        !self.rewards.is_empty()
    }

    /// Take the rewards.
    pub fn into_rewards(self) -> SmallVec<[Reward; 1]> {
        self.rewards
    }
}

impl<E> Promotion<E> {
    /// Evaluate the promotion against a cart; the first matching schema wins.
    ///
    /// # Errors
    ///
    /// Returns [`PromotionError::Parse`] if a visited schema has malformed parameters.
    pub fn calculate(&self, cart: &ShoppingCart) -> Result<Calculation, PromotionError> {
        self.calculate_with_policy(cart, MatchPolicy::FirstMatch)
    }

    /// Evaluate the promotion against a cart under the given match policy.
    ///
    /// # Errors
    ///
    /// Returns [`PromotionError::Parse`] if a visited schema has malformed parameters.
    pub fn calculate_with_policy(
        &self,
        cart: &ShoppingCart,
        policy: MatchPolicy,
    ) -> Result<Calculation, PromotionError> {
        Ok(self.scan(cart, policy)?)
    }

    /// Evaluate the promotion, then defer acceptance to `check`.
    ///
    /// The check runs whether or not a schema matched. Its error is discarded and replaced by
    /// a description of the *first* schema's condition, whichever schema actually matched.
    ///
    /// # Errors
    ///
    /// - [`PromotionError::Parse`] if a schema has malformed parameters; `check` is not run.
    /// - [`PromotionError::EligibilityRejected`] if `check` fails.
    pub fn calculate_with_callback<F, C>(
        &self,
        cart: &ShoppingCart,
        check: F,
    ) -> Result<Calculation, PromotionError>
    where
        F: FnOnce() -> Result<(), C>,
        C: fmt::Display,
    {
        let calculation = self.scan(cart, MatchPolicy::FirstMatch)?;

        if let Err(err) = check() {
            let message = rejection_message(self.schemas.first());

            debug!(
                promotion = %self.name,
                error = %err,
                %message,
                "eligibility check rejected promotion"
            );

            return Err(PromotionError::EligibilityRejected(message));
        }

        Ok(calculation)
    }

    /// Evaluate the promotion, then run each rule in order.
    ///
    /// # Errors
    ///
    /// - [`PromotionError::Parse`] if a schema has malformed parameters; no rule is run.
    /// - [`PromotionError::RuleViolated`] for the first rule that rejects the cart.
    pub fn calculate_with_rules(
        &self,
        cart: &ShoppingCart,
        rules: &[&dyn EligibilityRule],
    ) -> Result<Calculation, PromotionError> {
        let calculation = self.scan(cart, MatchPolicy::FirstMatch)?;

        check_rules(cart, rules)?;

        Ok(calculation)
    }

    #[tracing::instrument(
        name = "promotion.scan",
        skip_all,
        fields(promotion = %self.name, schemas = self.schemas.len(), ?policy)
    )]
    fn scan(&self, cart: &ShoppingCart, policy: MatchPolicy) -> Result<Calculation, ParseError> {
        let mut rewards = SmallVec::new();
        let mut matched_schemas = SmallVec::new();
        let mut deduction = Decimal::ZERO;

        for (index, schema) in self.schemas.iter().enumerate() {
            if !is_supported(schema) {
                trace!(
                    index,
                    amount = %schema.amount_type,
                    condition = %schema.condition_type,
                    "no evaluator for schema"
                );
                continue;
            }

            let calculator = RewardCalculator::from_schema(schema)?;

            let Some(eligible_amount) = evaluate_condition(cart, schema)? else {
                trace!(index, condition = %schema.condition_type, "condition not met");
                continue;
            };

            let Some(grant) = calculator.compute(eligible_amount, schema) else {
                trace!(index, reward = %schema.reward_type, "no reward for matched schema");
                continue;
            };

            debug!(
                index,
                condition = %schema.condition_type,
                reward = %schema.reward_type,
                deduction = %grant.deduction,
                free_products = grant.products.as_ref().map_or(0, |p| p.products.len()),
                "schema matched"
            );

            deduction += grant.deduction;
            rewards.push(grant.reward);
            matched_schemas.push(index);

            if policy == MatchPolicy::FirstMatch {
                break;
            }
        }

        Ok(Calculation {
            rewards,
            matched_schemas,
            grand_total: cart.grand_total() - deduction,
            deduction,
        })
    }
}

/// Describe a schema's condition in lower case, e.g. `"subtotal minimum price is 5000"` or
/// `"subtotal range price is 50000 - 100000"`.
pub fn describe_condition(schema: &Schema) -> String {
    let wording = match schema.condition_type {
        ConditionType::MinPrice => "minimum price is",
        ConditionType::RangePrice => "range price is",
        ConditionType::SpecificSku => "specific sku is",
        ConditionType::SpecificCategory => "specific category is",
    };

    let value = schema.condition_value.replace('|', " - ");

    format!("{} {wording} {value}", schema.amount_type).to_lowercase()
}

fn rejection_message(schema: Option<&Schema>) -> String {
    schema.map_or_else(
        || "promotion is not eligible".to_string(),
        describe_condition,
    )
}
