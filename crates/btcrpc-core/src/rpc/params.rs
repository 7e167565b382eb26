//! Positional parameter lists for JSON-RPC calls.
//!
//! Bitcoin Core maps `params` by position. [`Params`] records one slot per
//! documented argument and emits the shortest list that keeps every supplied
//! argument at its position: trailing unsupplied slots are dropped, and an
//! unsupplied slot that precedes a supplied one is filled with its documented
//! default.

use serde_json::Value;

#[derive(Debug, Clone)]
struct Slot {
    value: Option<Value>,
    filler: Value,
}

#[derive(Debug, Clone, Default)]
pub struct Params {
    slots: Vec<Slot>,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Required argument; always emitted.
    pub fn arg(mut self, value: impl Into<Value>) -> Self {
        self.slots.push(Slot {
            value: Some(value.into()),
            filler: Value::Null,
        });
        self
    }

    /// Optional argument. Emitted when `value` is `Some`, or as `default`
    /// when a later slot is emitted.
    pub fn opt<V: Into<Value>>(mut self, value: Option<V>, default: impl Into<Value>) -> Self {
        self.slots.push(Slot {
            value: value.map(Into::into),
            filler: default.into(),
        });
        self
    }

    /// Optional argument that counts as supplied only when it differs from
    /// `default`.
    pub fn opt_non_default<V: Into<Value>>(self, value: V, default: V) -> Self {
        let value = value.into();
        let default = default.into();
        let supplied = (value != default).then_some(value);
        self.opt(supplied, default)
    }

    /// Trailing optional argument with no default worth sending; a later
    /// supplied slot fills it with `null`, which Bitcoin Core reads as
    /// "use the node's default".
    pub fn tail<V: Into<Value>>(self, value: Option<V>) -> Self {
        self.opt(value, Value::Null)
    }

    pub fn build(self) -> Vec<Value> {
        let len = self
            .slots
            .iter()
            .rposition(|slot| slot.value.is_some())
            .map_or(0, |last| last + 1);

        self.slots
            .into_iter()
            .take(len)
            .map(|slot| slot.value.unwrap_or(slot.filler))
            .collect()
    }
}
