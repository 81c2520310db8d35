//! Conditions
//!
//! Condition evaluators decide whether a schema's condition holds for a cart, and if so how
//! much of the cart is eligible for deduction.
//!
//! Unsupported amount types and condition types evaluate to "no match" rather than an error,
//! so a misconfigured rule is indistinguishable from one that simply did not hold.

use rust_decimal::Decimal;

use crate::{
    cart::ShoppingCart,
    promotions::{
        schema::{AmountType, ConditionType, Schema},
        values::{ParseError, parse_amount, parse_range},
    },
};

/// Evaluate a schema's condition against a cart.
///
/// Returns the eligible amount when the condition holds, `None` otherwise.
///
/// # Errors
///
/// Returns a [`ParseError`] if `condition_value` does not decode for the condition type.
pub fn evaluate_condition(
    cart: &ShoppingCart,
    schema: &Schema,
) -> Result<Option<Decimal>, ParseError> {
    match schema.condition_type {
        ConditionType::MinPrice => min_price(cart, schema),
        ConditionType::RangePrice => range_price(cart, schema),
        ConditionType::SpecificSku | ConditionType::SpecificCategory => Ok(None),
    }
}

/// Whether an evaluator exists for the schema's amount and condition types.
///
/// Schemas without one never match, whatever their parameter strings hold.
pub fn is_supported(schema: &Schema) -> bool {
    matches!(
        (schema.amount_type, schema.condition_type),
        (
            AmountType::Subtotal,
            ConditionType::MinPrice | ConditionType::RangePrice
        )
    )
}

/// Subtotal must reach the limit; the subtotal is eligible.
fn min_price(cart: &ShoppingCart, schema: &Schema) -> Result<Option<Decimal>, ParseError> {
    match schema.amount_type {
        AmountType::Subtotal => {
            let limit = parse_amount(&schema.condition_value)?;

            Ok((cart.subtotal() >= limit).then_some(cart.subtotal()))
        }
        AmountType::GrandTotal => Ok(None),
    }
}

/// Subtotal must fall within `LOW|HIGH`; the grand total is eligible.
fn range_price(cart: &ShoppingCart, schema: &Schema) -> Result<Option<Decimal>, ParseError> {
    match schema.amount_type {
        AmountType::Subtotal => {
            let (low, high) = parse_range(&schema.condition_value)?;
            let subtotal = cart.subtotal();

            Ok((low <= subtotal && subtotal <= high).then_some(cart.grand_total()))
        }
        AmountType::GrandTotal => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;
    use testresult::TestResult;

    use crate::{cart::Cart, promotions::schema::RewardType};

    use super::*;

    fn cart(subtotal: Decimal, grand_total: Decimal) -> ShoppingCart {
        ShoppingCart::new([Cart::new(subtotal, 1)], subtotal, grand_total)
    }

    fn schema(amount_type: AmountType, condition_type: ConditionType, value: &str) -> Schema {
        Schema::new(
            amount_type,
            condition_type,
            value,
            RewardType::DiscountAmount,
            "2500",
        )
    }

    #[test]
    fn min_price_matches_at_and_above_limit() -> TestResult {
        let rule = schema(AmountType::Subtotal, ConditionType::MinPrice, "5000");

        assert_eq!(
            evaluate_condition(&cart(dec!(5000), dec!(5500)), &rule)?,
            Some(dec!(5000))
        );
        assert_eq!(
            evaluate_condition(&cart(dec!(500000), dec!(500000)), &rule)?,
            Some(dec!(500000))
        );

        Ok(())
    }

    #[test]
    fn min_price_below_limit_does_not_match() -> TestResult {
        let rule = schema(AmountType::Subtotal, ConditionType::MinPrice, "5000");

        assert_eq!(evaluate_condition(&cart(dec!(4999.99), dec!(9000)), &rule)?, None);

        Ok(())
    }

    #[test]
    fn min_price_rejects_non_numeric_limit() {
        let rule = schema(
            AmountType::Subtotal,
            ConditionType::MinPrice,
            "Value is Not Number",
        );

        assert!(matches!(
            evaluate_condition(&cart(Decimal::ZERO, dec!(500000)), &rule),
            Err(ParseError::InvalidAmount { .. })
        ));
    }

    #[test]
    fn range_price_is_inclusive_and_yields_grand_total() -> TestResult {
        let rule = schema(AmountType::Subtotal, ConditionType::RangePrice, "50000|100000");

        assert_eq!(
            evaluate_condition(&cart(dec!(50000), dec!(52000)), &rule)?,
            Some(dec!(52000))
        );
        assert_eq!(
            evaluate_condition(&cart(dec!(100000), dec!(90000)), &rule)?,
            Some(dec!(90000))
        );
        assert_eq!(
            evaluate_condition(&cart(dec!(100000.01), dec!(100000.01)), &rule)?,
            None
        );
        assert_eq!(evaluate_condition(&cart(dec!(49999), dec!(49999)), &rule)?, None);

        Ok(())
    }

    #[test]
    fn range_price_without_high_bound_is_an_error() {
        let rule = schema(AmountType::Subtotal, ConditionType::RangePrice, "50000");

        assert!(matches!(
            evaluate_condition(&cart(dec!(60000), dec!(60000)), &rule),
            Err(ParseError::MalformedRange { .. })
        ));
    }

    #[test]
    fn grand_total_amount_type_never_matches() -> TestResult {
        let big_cart = cart(dec!(500000), dec!(500000));

        for condition_type in [ConditionType::MinPrice, ConditionType::RangePrice] {
            let rule = schema(AmountType::GrandTotal, condition_type, "not even parsed");

            assert_eq!(evaluate_condition(&big_cart, &rule)?, None);
        }

        Ok(())
    }

    #[test]
    fn only_subtotal_price_conditions_are_supported() {
        let supported = [
            (AmountType::Subtotal, ConditionType::MinPrice, true),
            (AmountType::Subtotal, ConditionType::RangePrice, true),
            (AmountType::Subtotal, ConditionType::SpecificSku, false),
            (AmountType::Subtotal, ConditionType::SpecificCategory, false),
            (AmountType::GrandTotal, ConditionType::MinPrice, false),
            (AmountType::GrandTotal, ConditionType::RangePrice, false),
        ];

        for (amount_type, condition_type, expected) in supported {
            assert_eq!(
                is_supported(&schema(amount_type, condition_type, "1")),
                expected,
                "{amount_type} {condition_type}"
            );
        }
    }

    #[test]
    fn reserved_condition_types_never_match() -> TestResult {
        let big_cart = cart(dec!(500000), dec!(500000));

        for condition_type in [ConditionType::SpecificSku, ConditionType::SpecificCategory] {
            let rule = schema(AmountType::Subtotal, condition_type, "KFC-123");

            assert_eq!(evaluate_condition(&big_cart, &rule)?, None);
        }

        Ok(())
    }
}
