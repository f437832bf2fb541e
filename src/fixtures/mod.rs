//! Fixtures

use std::{fs, path::PathBuf};

use rustc_hash::FxHashSet;
use rusty_money::{Money, iso::Currency};
use thiserror::Error;

use crate::{
    fixtures::menus::MenuFixture,
    menu::{Menu, MenuError, MenuItem},
    topup::{DEFAULT_MAX_TOP_UPS, PolicyError, TopUpPolicy},
};

pub mod menus;

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price format
    #[error("Invalid price format: {0}")]
    InvalidPrice(String),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// Currency mismatch between menu amounts
    #[error("Currency mismatch: expected {0}, found {1}")]
    CurrencyMismatch(String, String),

    /// Menu has no items
    #[error("Menu has no items; currency unknown")]
    NoItems,

    /// Two items share an identifier
    #[error("Duplicate item id: {0}")]
    DuplicateItem(String),

    /// Menu creation error
    #[error("Failed to create menu: {0}")]
    Menu(#[from] MenuError),
}

/// A menu loaded from a fixture, with its optional top-up settings.
#[derive(Debug, Clone)]
pub struct LoadedMenu {
    menu: Menu<'static>,
    top_up: Option<Money<'static, Currency>>,
    max_top_ups: Option<u32>,
}

impl LoadedMenu {
    /// The menu, items in file order
    pub fn menu(&self) -> &Menu<'static> {
        &self.menu
    }

    /// Currency shared by every item
    pub fn currency(&self) -> &'static Currency {
        self.menu.currency()
    }

    /// Top-up amount set by the file, if any
    pub fn top_up(&self) -> Option<Money<'static, Currency>> {
        self.top_up
    }

    /// Maximum number of top-ups set by the file, if any
    pub fn max_top_ups(&self) -> Option<u32> {
        self.max_top_ups
    }

    /// Build a top-up policy, preferring the given overrides over the file's
    /// settings and the file's settings over the library defaults.
    ///
    /// # Errors
    ///
    /// Returns a [`PolicyError`] if the resulting policy is invalid.
    pub fn policy(
        &self,
        top_up: Option<Money<'static, Currency>>,
        max_top_ups: Option<u32>,
    ) -> Result<TopUpPolicy<'static>, PolicyError> {
        let default = TopUpPolicy::default_for(self.currency());

        let amount = top_up.or(self.top_up).unwrap_or(*default.amount());
        let max_top_ups = max_top_ups
            .or(self.max_top_ups)
            .unwrap_or(DEFAULT_MAX_TOP_UPS);

        TopUpPolicy::new(amount, max_top_ups)
    }
}

/// Fixture
#[derive(Debug, Clone)]
pub struct Fixture {
    /// Base path for fixture files
    base_path: PathBuf,
}

impl Fixture {
    /// Create a fixture reader with the default base path
    pub fn new() -> Self {
        Self::with_base_path("./fixtures")
    }

    /// Create a fixture reader with a custom base path
    pub fn with_base_path(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    /// Path of the menu file called `name`
    pub fn menu_path(&self, name: &str) -> PathBuf {
        self.base_path.join("menus").join(format!("{name}.yml"))
    }

    /// Load a menu from a YAML fixture file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, has no items,
    /// repeats an item id, or mixes currencies.
    pub fn load_menu(&self, name: &str) -> Result<LoadedMenu, FixtureError> {
        let contents = fs::read_to_string(self.menu_path(name))?;
        let fixture: MenuFixture = serde_norway::from_str(&contents)?;

        let mut ids = FxHashSet::default();
        let mut items: Vec<MenuItem<'static>> = Vec::with_capacity(fixture.items.len());

        for item_fixture in fixture.items {
            if !ids.insert(item_fixture.id.clone()) {
                return Err(FixtureError::DuplicateItem(item_fixture.id));
            }

            items.push(item_fixture.try_into()?);
        }

        let currency = items
            .first()
            .map(|item| item.price().currency())
            .ok_or(FixtureError::NoItems)?;

        if let Some(mismatched) = items.iter().find(|item| item.price().currency() != currency) {
            return Err(FixtureError::CurrencyMismatch(
                currency.iso_alpha_code.to_string(),
                mismatched.price().currency().iso_alpha_code.to_string(),
            ));
        }

        let top_up = fixture
            .top_up
            .as_deref()
            .map(menus::parse_price)
            .transpose()?;

        if let Some(top_up) = top_up
            && top_up.currency() != currency
        {
            return Err(FixtureError::CurrencyMismatch(
                currency.iso_alpha_code.to_string(),
                top_up.currency().iso_alpha_code.to_string(),
            ));
        }

        Ok(LoadedMenu {
            menu: Menu::with_items(items, currency)?,
            top_up,
            max_top_ups: fixture.max_top_ups,
        })
    }
}

impl Default for Fixture {
    fn default() -> Self {
        Self::new()
    }
}
