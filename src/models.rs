//! Item Model
//!
//! The item rows the backend serves, decoded leniently: the spreadsheet
//! backend has emitted identifiers as numbers or strings and counts as
//! integers, integral floats, or numeric strings, depending on its revision.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::StockInputError;

/// One inventory item as served by the backend.
///
/// `confirmed` is client-derived on every list load and never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    #[serde(rename = "商品ID", default, deserialize_with = "de_identifier")]
    pub code: String,
    #[serde(rename = "商品名", default, deserialize_with = "de_label")]
    pub name: Option<String>,
    #[serde(rename = "在庫数", default, deserialize_with = "de_count")]
    pub stock_count: Option<u32>,
    #[serde(rename = "不足数", default, deserialize_with = "de_count")]
    pub shortage_count: Option<u32>,
    #[serde(rename = "ケース発注数", default, deserialize_with = "de_count")]
    pub case_order_count: Option<u32>,
    #[serde(skip)]
    pub confirmed: bool,
}

impl Item {
    /// An item without an identifier cannot be opened or updated.
    pub fn has_usable_code(&self) -> bool {
        !self.code.is_empty()
    }

    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("未設定")
    }
}

/// Identifiers arrive as strings or numbers; normalize to a string so
/// route parameters and row codes compare directly. Unusable values
/// decode as empty rather than failing the whole row.
fn de_identifier<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(identifier_string(&value).unwrap_or_default())
}

fn identifier_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Some(i.to_string())
            } else {
                n.as_f64()
                    .filter(|f| f.fract() == 0.0)
                    .map(|f| (f as i64).to_string())
            }
        }
        _ => None,
    }
}

fn de_label<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) if !s.trim().is_empty() => Some(s),
        _ => None,
    })
}

/// Counts are non-negative integers or absent; negatives and junk decode
/// as absent.
fn de_count<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(count_value(&value))
}

fn count_value(value: &Value) -> Option<u32> {
    match value {
        Value::Number(n) => {
            if let Some(u) = n.as_u64() {
                u32::try_from(u).ok()
            } else {
                n.as_f64()
                    .filter(|f| f.fract() == 0.0 && *f >= 0.0 && *f <= u32::MAX as f64)
                    .map(|f| f as u32)
            }
        }
        Value::String(s) => s.trim().parse::<u32>().ok(),
        _ => None,
    }
}

/// Drop rows without a usable identifier and derive per-item confirmation
/// from the code taken off the navigation handoff (if any). Order is
/// preserved; exactly the rows matching `confirmed_code` are marked.
pub fn reconcile(items: Vec<Item>, confirmed_code: Option<&str>) -> Vec<Item> {
    items
        .into_iter()
        .filter(|item| {
            if item.has_usable_code() {
                true
            } else {
                leptos::logging::warn!("商品IDのない行をスキップしました: {:?}", item.name);
                false
            }
        })
        .map(|mut item| {
            item.confirmed = confirmed_code == Some(item.code.as_str());
            item
        })
        .collect()
}

/// Validate the stock input before any network call. Accepts non-negative
/// integers only; the backend recomputes shortages from whole counts.
pub fn parse_stock_input(raw: &str) -> Result<u32, StockInputError> {
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|_| StockInputError::NotANumber)?;
    if !value.is_finite() {
        return Err(StockInputError::NotANumber);
    }
    if value < 0.0 {
        return Err(StockInputError::Negative);
    }
    if value.fract() != 0.0 || value > u32::MAX as f64 {
        return Err(StockInputError::NotANumber);
    }
    Ok(value as u32)
}
