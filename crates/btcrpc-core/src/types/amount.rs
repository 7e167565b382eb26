//! BTC-denominated amounts in RPC results.
//!
//! Bitcoin Core prints amounts as JSON numbers in BTC. Numbers go through
//! `from_float_in` so scientific notation (`6.6e-6`) is accepted; strings go
//! through `from_str_in`.

use bitcoin::{Amount, Denomination, SignedAmount};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

enum BtcValue<'a> {
    Number(f64),
    Text(&'a str),
}

fn classify(value: &Value) -> Result<BtcValue<'_>, String> {
    match value {
        Value::Number(n) => n
            .as_f64()
            .map(BtcValue::Number)
            .ok_or_else(|| format!("invalid BTC amount `{value}`")),
        Value::String(s) => Ok(BtcValue::Text(s)),
        _ => Err(format!("expected numeric BTC amount, got: {value}")),
    }
}

pub fn parse_btc_amount(value: &Value) -> Result<Amount, String> {
    match classify(value)? {
        BtcValue::Number(n) => Amount::from_float_in(n, Denomination::Bitcoin)
            .map_err(|e| format!("invalid BTC amount `{value}`: {e}")),
        BtcValue::Text(s) => Amount::from_str_in(s, Denomination::Bitcoin)
            .map_err(|e| format!("invalid BTC amount `{s}`: {e}")),
    }
}

pub fn parse_signed_btc_amount(value: &Value) -> Result<SignedAmount, String> {
    match classify(value)? {
        BtcValue::Number(n) => SignedAmount::from_float_in(n, Denomination::Bitcoin)
            .map_err(|e| format!("invalid BTC amount `{value}`: {e}")),
        BtcValue::Text(s) => SignedAmount::from_str_in(s, Denomination::Bitcoin)
            .map_err(|e| format!("invalid BTC amount `{s}`: {e}")),
    }
}

pub(crate) fn btc<'de, D: Deserializer<'de>>(d: D) -> Result<Amount, D::Error> {
    let value = Value::deserialize(d)?;
    parse_btc_amount(&value).map_err(D::Error::custom)
}

pub(crate) fn signed_btc<'de, D: Deserializer<'de>>(d: D) -> Result<SignedAmount, D::Error> {
    let value = Value::deserialize(d)?;
    parse_signed_btc_amount(&value).map_err(D::Error::custom)
}

pub(crate) fn opt_btc<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Amount>, D::Error> {
    match Option::<Value>::deserialize(d)? {
        None => Ok(None),
        Some(value) => parse_btc_amount(&value)
            .map(Some)
            .map_err(D::Error::custom),
    }
}

pub(crate) fn opt_signed_btc<'de, D: Deserializer<'de>>(
    d: D,
) -> Result<Option<SignedAmount>, D::Error> {
    match Option::<Value>::deserialize(d)? {
        None => Ok(None),
        Some(value) => parse_signed_btc_amount(&value)
            .map(Some)
            .map_err(D::Error::custom),
    }
}

/// Amount as the JSON number Bitcoin Core expects in `params`.
pub(crate) fn to_btc_value(amount: Amount) -> Value {
    Value::from(amount.to_btc())
}
