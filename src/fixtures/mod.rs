//! Fixtures
//!
//! Named sets of promotions and carts loaded from YAML, for tests and demos.

use std::{fs, path::PathBuf};

use rustc_hash::FxHashMap;
use serde_json::Value;
use thiserror::Error;

use crate::{
    cart::ShoppingCart,
    fixtures::{carts::CartsFixture, promotions::PromotionsFixture},
    promotions::Promotion,
};

pub mod carts;
pub mod promotions;

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Promotion not found
    #[error("Promotion not found: {0}")]
    PromotionNotFound(String),

    /// Cart not found
    #[error("Cart not found: {0}")]
    CartNotFound(String),
}

/// Fixture
#[derive(Debug)]
pub struct Fixture {
    /// Base path for fixture files
    base_path: PathBuf,

    /// Promotions by fixture key
    promotions: FxHashMap<String, Promotion<Value>>,

    /// Carts by fixture key
    carts: FxHashMap<String, ShoppingCart>,
}

impl Fixture {
    /// Create a new empty fixture with default base path
    pub fn new() -> Self {
        Self::with_base_path("./fixtures")
    }

    /// Create a new empty fixture with custom base path
    pub fn with_base_path(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            promotions: FxHashMap::default(),
            carts: FxHashMap::default(),
        }
    }

    /// Load promotions from `promotions/<name>.yml`
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_promotions(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let file_path = self
            .base_path
            .join("promotions")
            .join(format!("{name}.yml"));

        let contents = fs::read_to_string(&file_path)?;
        let fixture: PromotionsFixture = serde_norway::from_str(&contents)?;

        self.promotions.extend(
            fixture
                .promotions
                .into_iter()
                .map(|(key, promotion)| (key, promotion.into())),
        );

        Ok(self)
    }

    /// Load carts from `carts/<name>.yml`
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_carts(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let file_path = self.base_path.join("carts").join(format!("{name}.yml"));
        let contents = fs::read_to_string(&file_path)?;
        let fixture: CartsFixture = serde_norway::from_str(&contents)?;

        self.carts.extend(
            fixture
                .carts
                .into_iter()
                .map(|(key, cart)| (key, cart.into())),
        );

        Ok(self)
    }

    /// Load a complete fixture set (promotions and carts with the same name)
    ///
    /// # Errors
    ///
    /// Returns an error if any of the fixture files cannot be loaded.
    pub fn from_set(name: &str) -> Result<Self, FixtureError> {
        let mut fixture = Self::new();

        fixture.load_promotions(name)?.load_carts(name)?;

        Ok(fixture)
    }

    /// Get a promotion by its fixture key
    ///
    /// # Errors
    ///
    /// Returns an error if the promotion is not found.
    pub fn promotion(&self, key: &str) -> Result<&Promotion<Value>, FixtureError> {
        self.promotions
            .get(key)
            .ok_or_else(|| FixtureError::PromotionNotFound(key.to_string()))
    }

    /// Get a cart by its fixture key
    ///
    /// # Errors
    ///
    /// Returns an error if the cart is not found.
    pub fn cart(&self, key: &str) -> Result<&ShoppingCart, FixtureError> {
        self.carts
            .get(key)
            .ok_or_else(|| FixtureError::CartNotFound(key.to_string()))
    }

    /// Promotion keys, sorted
    pub fn promotion_keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.promotions.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    /// Cart keys, sorted
    pub fn cart_keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.carts.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }
}

impl Default for Fixture {
    fn default() -> Self {
        Self::new()
    }
}
