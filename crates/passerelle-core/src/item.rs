//! Order line items.

use serde::{Deserialize, Serialize};

/// A single line item.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Item {
	pub name: Option<String>,
	pub description: Option<String>,
	pub quantity: Option<i64>,
	/// Unit price as a decimal string.
	pub price: Option<String>,
	/// Tax amount as a decimal string.
	pub tax: Option<String>,
}

/// An ordered collection of line items.
///
/// Insertion order is meaningful and round-trips through iteration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemBag {
	items: Vec<Item>,
}

impl ItemBag {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn add(&mut self, item: Item) {
		self.items.push(item);
	}

	pub fn iter(&self) -> std::slice::Iter<'_, Item> {
		self.items.iter()
	}

	pub fn len(&self) -> usize {
		self.items.len()
	}

	pub fn is_empty(&self) -> bool {
		self.items.is_empty()
	}
}

impl FromIterator<Item> for ItemBag {
	fn from_iter<T: IntoIterator<Item = Item>>(iter: T) -> Self {
		Self {
			items: iter.into_iter().collect(),
		}
	}
}

impl<'a> IntoIterator for &'a ItemBag {
	type Item = &'a Item;
	type IntoIter = std::slice::Iter<'a, Item>;

	fn into_iter(self) -> Self::IntoIter {
		self.items.iter()
	}
}
