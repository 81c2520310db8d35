//! Rebate
//!
//! Rebate evaluates checkout promotions against a shopping cart: each promotion is an ordered
//! list of schemas (a condition over a cart aggregate plus a reward), and evaluation yields the
//! rewards that apply together with the adjusted grand total.

pub mod cart;
pub mod conditions;
pub mod engine;
pub mod fixtures;
pub mod prelude;
pub mod promotions;
pub mod receipt;
pub mod rewards;
pub mod rules;
pub mod utils;
