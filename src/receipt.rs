//! Receipt
//!
//! Renders a cart and its promotion calculation as a table followed by a totals summary.

use std::io;

use rust_decimal::Decimal;
use tabled::{
    builder::Builder,
    grid::config::HorizontalLine,
    settings::{
        Alignment, Style, Theme,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::{
    cart::ShoppingCart,
    engine::Calculation,
    promotions::schema::RewardType,
    rewards::Reward,
};

/// Errors that can occur when writing a receipt.
#[derive(Debug, Error)]
pub enum ReceiptError {
    /// IO error
    #[error("IO error")]
    IO,
}

/// A cart together with the outcome of a promotion.
#[derive(Debug, Clone, Copy)]
pub struct Receipt<'a> {
    promotion_name: &'a str,
    cart: &'a ShoppingCart,
    calculation: &'a Calculation,
}

impl<'a> Receipt<'a> {
    /// Create a new receipt.
    pub fn new(
        promotion_name: &'a str,
        cart: &'a ShoppingCart,
        calculation: &'a Calculation,
    ) -> Self {
        Self {
            promotion_name,
            cart,
            calculation,
        }
    }

    /// Write the receipt.
    ///
    /// # Errors
    ///
    /// Returns [`ReceiptError::IO`] if writing to `out` fails.
    pub fn write_to(&self, mut out: impl io::Write) -> Result<(), ReceiptError> {
        let mut builder = Builder::default();

        builder.push_record(["", "Item", "Qty", "Price", "Total"]);

        for (idx, line) in self.cart.carts().iter().enumerate() {
            builder.push_record([
                format!("#{}", idx + 1),
                line.additional_id.clone().unwrap_or_default(),
                line.qty.to_string(),
                line.price.to_string(),
                line.line_total().to_string(),
            ]);
        }

        write_table(&mut out, builder)?;
        write_summary(&mut out, self)?;
        write_rewards(&mut out, self.promotion_name, self.calculation.rewards())
    }
}

fn write_table(out: &mut impl io::Write, builder: Builder) -> Result<(), ReceiptError> {
    let mut table = builder.build();
    let mut theme = Theme::from(Style::modern_rounded());
    let separator = HorizontalLine::new(Some('─'), Some('┼'), Some('├'), Some('┤'));

    theme.remove_horizontal_lines();
    theme.insert_horizontal_line(1, separator);

    table.with(theme);
    table.modify(Columns::new(2..5), Alignment::right());
    table.modify(Rows::first(), Alignment::center());

    writeln!(out, "\n{table}").map_err(|_err| ReceiptError::IO)
}

fn write_summary(out: &mut impl io::Write, receipt: &Receipt<'_>) -> Result<(), ReceiptError> {
    let rows = [
        ("Subtotal:", receipt.cart.subtotal()),
        ("Grand total:", receipt.cart.grand_total()),
        ("Deduction:", -receipt.calculation.deduction()),
        ("Total:", receipt.calculation.grand_total()),
    ];

    let value_width = rows
        .iter()
        .map(|(_, value)| value.to_string().len())
        .max()
        .unwrap_or_default();

    for (label, value) in rows {
        write_summary_line(out, label, value, value_width)?;
    }

    Ok(())
}

fn write_summary_line(
    out: &mut impl io::Write,
    label: &str,
    value: Decimal,
    value_width: usize,
) -> Result<(), ReceiptError> {
    writeln!(out, " {label:>12}  {:>value_width$}", value.to_string())
        .map_err(|_err| ReceiptError::IO)
}

fn write_rewards(
    out: &mut impl io::Write,
    promotion_name: &str,
    rewards: &[Reward],
) -> Result<(), ReceiptError> {
    if rewards.is_empty() {
        return writeln!(out, "\n {promotion_name}: no reward").map_err(|_err| ReceiptError::IO);
    }

    writeln!(out, "\n {promotion_name}:").map_err(|_err| ReceiptError::IO)?;

    for reward in rewards {
        writeln!(out, "   - {}", reward_line(reward)).map_err(|_err| ReceiptError::IO)?;
    }

    Ok(())
}

fn reward_line(reward: &Reward) -> String {
    match reward.reward_type {
        RewardType::DiscountAmount | RewardType::DiscountPercentage => {
            format!("{} {}", reward.reward_type, reward.reward_value)
        }
        RewardType::Product => {
            let payload = reward.products().unwrap_or_default();
            let names: Vec<&str> = payload
                .products
                .iter()
                .map(|product| product.name.as_str())
                .collect();

            format!("{} {} x {}", reward.reward_type, payload.qty, names.join(", "))
        }
    }
}
