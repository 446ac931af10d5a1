//! Line-item keys and the line-item map of an order.
//!
//! Keys follow a stable text contract: `"<itemId>"` for sales and
//! `"<supplierId>:<supplierItemId>"` for purchases, using base-10
//! non-negative integers in canonical form only. Since a leading zero is
//! refused, every accepted key is exactly its own [`Display`] output.
//!
//! [`Display`]: std::fmt::Display

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use common::{ItemId, SupplierId};

use super::{OrderError, OrderKind};

/// Parsed line-item key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LineItemKey {
    /// A warehouse stock item, sold to a customer.
    Sale(ItemId),

    /// An item listed by a supplier, bought into the warehouse.
    Purchase {
        supplier_id: SupplierId,
        item_id: ItemId,
    },
}

impl LineItemKey {
    /// Parses a raw key according to the text contract for `kind`.
    pub fn parse(raw: &str, kind: OrderKind) -> Result<Self, OrderError> {
        let invalid = || OrderError::InvalidLineItemKey {
            key: raw.to_string(),
            kind,
        };

        match kind {
            OrderKind::Sale => parse_number(raw)
                .map(|id| LineItemKey::Sale(ItemId::new(id)))
                .ok_or_else(invalid),
            OrderKind::Purchase => {
                let (supplier, item) = raw.split_once(':').ok_or_else(invalid)?;
                let supplier_id = parse_number(supplier).ok_or_else(invalid)?;
                let item_id = parse_number(item).ok_or_else(invalid)?;
                Ok(LineItemKey::Purchase {
                    supplier_id: SupplierId::new(supplier_id),
                    item_id: ItemId::new(item_id),
                })
            }
        }
    }

    /// Returns the order kind this key belongs to.
    pub fn kind(&self) -> OrderKind {
        match self {
            LineItemKey::Sale(_) => OrderKind::Sale,
            LineItemKey::Purchase { .. } => OrderKind::Purchase,
        }
    }

    /// Returns the referenced item ID.
    ///
    /// For purchases this is the supplier listing ID, which is shared with
    /// the inventory item it supplies.
    pub fn item_id(&self) -> ItemId {
        match self {
            LineItemKey::Sale(item_id) | LineItemKey::Purchase { item_id, .. } => *item_id,
        }
    }

    /// Returns the supplier ID for purchase keys.
    pub fn supplier_id(&self) -> Option<SupplierId> {
        match self {
            LineItemKey::Sale(_) => None,
            LineItemKey::Purchase { supplier_id, .. } => Some(*supplier_id),
        }
    }
}

impl std::fmt::Display for LineItemKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LineItemKey::Sale(item_id) => write!(f, "{item_id}"),
            LineItemKey::Purchase {
                supplier_id,
                item_id,
            } => write!(f, "{supplier_id}:{item_id}"),
        }
    }
}

/// Canonical digits only: no sign, no whitespace, no leading zero except `0`.
fn parse_number(part: &str) -> Option<u32> {
    if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if part.len() > 1 && part.starts_with('0') {
        return None;
    }
    part.parse().ok()
}

/// Line items of an order: parsed key to ordered quantity.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LineItems {
    entries: BTreeMap<LineItemKey, u32>,
}

impl LineItems {
    /// Parses raw `(key, quantity)` pairs for an order of the given kind.
    ///
    /// Fails on the first malformed or non-canonical key, on a zero quantity,
    /// on a repeated key, or when there are no items at all.
    pub fn parse<I, K>(raw: I, kind: OrderKind) -> Result<Self, OrderError>
    where
        I: IntoIterator<Item = (K, u32)>,
        K: AsRef<str>,
    {
        let mut entries = BTreeMap::new();

        for (raw_key, quantity) in raw {
            let raw_key = raw_key.as_ref();
            let key = LineItemKey::parse(raw_key, kind)?;
            if quantity == 0 {
                return Err(OrderError::InvalidQuantity {
                    key: raw_key.to_string(),
                });
            }
            match entries.entry(key) {
                Entry::Vacant(slot) => {
                    slot.insert(quantity);
                }
                Entry::Occupied(_) => {
                    return Err(OrderError::DuplicateLineItem {
                        key: raw_key.to_string(),
                    });
                }
            }
        }

        if entries.is_empty() {
            return Err(OrderError::NoItems);
        }

        Ok(Self { entries })
    }

    /// Iterates over `(key, quantity)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&LineItemKey, u32)> {
        self.entries.iter().map(|(key, quantity)| (key, *quantity))
    }

    /// Returns the quantity ordered for `key`.
    pub fn get(&self, key: &LineItemKey) -> Option<u32> {
        self.entries.get(key).copied()
    }

    /// Returns the number of line items.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if there are no line items.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Groups purchase line items by supplier: supplier → (item → quantity).
    ///
    /// Sale keys are ignored.
    pub fn by_supplier(&self) -> BTreeMap<SupplierId, BTreeMap<ItemId, u32>> {
        let mut groups: BTreeMap<SupplierId, BTreeMap<ItemId, u32>> = BTreeMap::new();
        for (key, quantity) in self.iter() {
            if let LineItemKey::Purchase {
                supplier_id,
                item_id,
            } = key
            {
                groups.entry(*supplier_id).or_default().insert(*item_id, quantity);
            }
        }
        groups
    }

    /// Returns the items in their canonical text encoding.
    pub fn to_raw(&self) -> BTreeMap<String, u32> {
        self.iter()
            .map(|(key, quantity)| (key.to_string(), quantity))
            .collect()
    }
}

impl FromIterator<(LineItemKey, u32)> for LineItems {
    fn from_iter<T: IntoIterator<Item = (LineItemKey, u32)>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
