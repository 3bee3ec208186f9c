use std::collections::HashMap;

use crate::node::PinRef;

/// Output values produced during one run, keyed by output pin.
#[derive(Debug, Clone)]
pub struct ValueTable<V> {
    values: HashMap<PinRef, V>,
}

impl<V> ValueTable<V> {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self {
            values: HashMap::new(),
        }
    }

    /// Returns the value of an output pin.
    pub fn get(&self, pin: &PinRef) -> Option<&V> {
        self.values.get(pin)
    }

    /// Returns whether an output pin has a value.
    pub fn contains(&self, pin: &PinRef) -> bool {
        self.values.contains_key(pin)
    }

    /// Iterates over all values in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&PinRef, &V)> {
        self.values.iter()
    }

    /// Returns the number of stored values.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns whether no values are stored.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub(crate) fn insert(&mut self, pin: PinRef, value: V) {
        self.values.insert(pin, value);
    }
}

impl<V> Default for ValueTable<V> {
    fn default() -> Self {
        Self::new()
    }
}
