//! Menu Fixtures

use std::str::FromStr;

use rust_decimal::Decimal;
use rusty_money::{
    Money,
    iso::{self, Currency},
};
use serde::Deserialize;

use crate::{fixtures::FixtureError, menu::MenuItem};

/// Menu file as stored in YAML
#[derive(Debug, Deserialize)]
pub struct MenuFixture {
    /// Top-up amount (e.g., "10.00 USD")
    #[serde(default)]
    pub top_up: Option<String>,

    /// Maximum number of top-ups to consider
    #[serde(default)]
    pub max_top_ups: Option<u32>,

    /// Menu items in catalog order
    #[serde(default)]
    pub items: Vec<MenuItemFixture>,
}

/// Menu Item Fixture
#[derive(Debug, Deserialize)]
pub struct MenuItemFixture {
    /// Unique item identifier
    pub id: String,

    /// Display name
    pub name: String,

    /// Item price (e.g., "2.50 USD")
    pub price: String,
}

impl TryFrom<MenuItemFixture> for MenuItem<'static> {
    type Error = FixtureError;

    fn try_from(fixture: MenuItemFixture) -> Result<Self, Self::Error> {
        let price = parse_price(&fixture.price)?;

        Ok(MenuItem::new(fixture.id, fixture.name, price))
    }
}

/// Parse a price string (e.g., "2.50 USD") into money.
///
/// The amount keeps its full decimal precision; rounding to minor units
/// happens when a solver discretizes it.
///
/// # Errors
///
/// Returns an error if the string is not in the format "AMOUNT CURRENCY",
/// if the amount is not a decimal number, or if the currency code is not a
/// known ISO currency.
pub fn parse_price(s: &str) -> Result<Money<'static, Currency>, FixtureError> {
    let parts: Vec<&str> = s.split_whitespace().collect();

    let [amount, code] = parts.as_slice() else {
        return Err(FixtureError::InvalidPrice(format!(
            "Expected format 'AMOUNT CURRENCY', got: {s}"
        )));
    };

    let amount =
        Decimal::from_str(amount).map_err(|_err| FixtureError::InvalidPrice(s.to_string()))?;

    let currency = iso::find(code).ok_or_else(|| FixtureError::UnknownCurrency((*code).to_string()))?;

    Ok(Money::from_decimal(amount, currency))
}
