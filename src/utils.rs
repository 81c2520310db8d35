//! Utils

use clap::Parser;

/// Arguments for the evaluation demo
#[derive(Debug, Parser)]
pub struct ExampleArgs {
    /// Fixture set to load promotions & carts from
    #[clap(short, long, default_value = "checkout")]
    pub fixture: String,

    /// Promotion key within the fixture set; every promotion when omitted
    #[clap(short, long)]
    pub promotion: Option<String>,

    /// Cart key within the fixture set
    #[clap(short, long, default_value = "large")]
    pub cart: String,

    /// Accumulate every matching schema instead of stopping at the first
    #[clap(short, long)]
    pub stack: bool,
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn defaults_to_checkout_set_and_large_cart() -> TestResult {
        let args = ExampleArgs::try_parse_from(["evaluate"])?;

        assert_eq!(args.fixture, "checkout");
        assert_eq!(args.cart, "large");
        assert_eq!(args.promotion, None);
        assert!(!args.stack);

        Ok(())
    }

    #[test]
    fn parses_short_flags() -> TestResult {
        let args = ExampleArgs::try_parse_from(["evaluate", "-p", "stacked", "-c", "mid", "-s"])?;

        assert_eq!(args.promotion.as_deref(), Some("stacked"));
        assert_eq!(args.cart, "mid");
        assert!(args.stack);

        Ok(())
    }
}
