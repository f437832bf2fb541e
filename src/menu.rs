//! Menu

use rusty_money::{Money, iso::Currency};
use thiserror::Error;

/// Errors related to menu construction.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MenuError {
    /// An item's currency differs from the menu currency (index, item currency, menu currency).
    #[error("Item {0} has currency {1}, but menu has currency {2}")]
    CurrencyMismatch(usize, &'static str, &'static str),
}

/// A purchasable menu entry.
///
/// Items are available in unbounded quantity. `id` identifies the entry,
/// `name` is what solutions group and deduplicate by.
#[derive(Clone, Debug, PartialEq)]
pub struct MenuItem<'a> {
    id: String,
    name: String,
    price: Money<'a, Currency>,
}

impl<'a> MenuItem<'a> {
    /// Creates a new menu item.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        price: Money<'a, Currency>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
        }
    }

    /// Returns the item identifier
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the display name of the item
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the price of the item
    pub fn price(&self) -> &Money<'a, Currency> {
        &self.price
    }
}

/// An ordered catalog of menu items sharing one currency.
///
/// Catalog order matters: it is the tie-break order used when reconstructing
/// combinations.
#[derive(Debug, Clone)]
pub struct Menu<'a> {
    items: Vec<MenuItem<'a>>,
    currency: &'a Currency,
}

impl<'a> Menu<'a> {
    /// Create a new, empty menu.
    pub fn new(currency: &'a Currency) -> Self {
        Menu {
            items: Vec::new(),
            currency,
        }
    }

    /// Create a new menu with the given items.
    ///
    /// # Errors
    ///
    /// Returns a `MenuError` if any item is priced in another currency.
    pub fn with_items(
        items: impl Into<Vec<MenuItem<'a>>>,
        currency: &'a Currency,
    ) -> Result<Self, MenuError> {
        let items = items.into();

        items.iter().enumerate().try_for_each(|(i, item)| {
            let item_currency = item.price().currency();
            if item_currency == currency {
                Ok(())
            } else {
                Err(MenuError::CurrencyMismatch(
                    i,
                    item_currency.iso_alpha_code,
                    currency.iso_alpha_code,
                ))
            }
        })?;

        Ok(Menu { items, currency })
    }

    /// Iterate over the items in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &MenuItem<'a>> {
        self.items.iter()
    }

    /// Get an item by its catalog position.
    pub fn get(&self, idx: usize) -> Option<&MenuItem<'a>> {
        self.items.get(idx)
    }

    /// Get the number of items on the menu.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the menu is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Get the currency of the menu.
    pub fn currency(&self) -> &'a Currency {
        self.currency
    }
}
