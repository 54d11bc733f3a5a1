//! Response Normalization
//!
//! The script backend has changed reply shape over its revisions: a bare
//! row array, a `{status, data}` success envelope, and a `{status, message}`
//! error envelope all occur in the wild. Call sites never branch on shape;
//! everything funnels through here.

use serde_json::Value;

use crate::error::ApiError;
use crate::models::Item;

/// Normalize a list reply into item rows, server order preserved.
pub fn item_list(body: Value) -> Result<Vec<Item>, ApiError> {
    match unwrap_envelope(body)? {
        Value::Array(rows) => Ok(rows
            .into_iter()
            .filter_map(|row| match serde_json::from_value::<Item>(row) {
                Ok(item) => Some(item),
                Err(err) => {
                    leptos::logging::warn!("行の読み取りに失敗しました: {}", err);
                    None
                }
            })
            .collect()),
        _ => Err(ApiError::Malformed),
    }
}

/// Normalize an update reply into the single recomputed item. The backend
/// has answered with a bare object, an object payload, and a one-element
/// array payload over time.
pub fn updated_item(body: Value) -> Result<Item, ApiError> {
    let payload = match unwrap_envelope(body)? {
        Value::Array(mut rows) => {
            if rows.len() == 1 {
                rows.remove(0)
            } else {
                return Err(ApiError::Malformed);
            }
        }
        payload => payload,
    };
    serde_json::from_value(payload).map_err(|_| ApiError::Malformed)
}

/// Reduce any accepted reply shape to its payload, or to the backend's
/// error message. Never panics for structurally valid JSON.
fn unwrap_envelope(body: Value) -> Result<Value, ApiError> {
    match body {
        Value::Array(_) => Ok(body),
        Value::Object(ref map) => match map.get("status") {
            Some(status) => {
                if status.as_str() == Some("success") {
                    map.get("data").cloned().ok_or(ApiError::Malformed)
                } else {
                    match map.get("message").and_then(Value::as_str) {
                        Some(message) => Err(ApiError::Backend(message.to_string())),
                        None => Err(ApiError::Malformed),
                    }
                }
            }
            // No discriminator at all: a bare single-row payload.
            None => Ok(body),
        },
        _ => Err(ApiError::Malformed),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn bare_array_and_success_envelope_normalize_identically() {
        let rows = json!([
            { "商品ID": "X1", "商品名": "Foo", "ケース発注数": 3 },
            { "商品ID": "X2", "在庫数": 7 }
        ]);
        let bare = item_list(rows.clone()).unwrap();
        let wrapped = item_list(json!({ "status": "success", "data": rows })).unwrap();
        assert_eq!(bare, wrapped);
        assert_eq!(bare.len(), 2);
        assert_eq!(bare[0].code, "X1");
        assert_eq!(bare[0].case_order_count, Some(3));
        assert_eq!(bare[1].stock_count, Some(7));
    }

    #[test]
    fn error_envelope_passes_message_through() {
        let body = json!({ "status": "error", "message": "シートが見つかりません" });
        assert_eq!(
            item_list(body),
            Err(ApiError::Backend("シートが見つかりません".to_string()))
        );
    }

    #[test]
    fn unrecognized_shapes_are_malformed() {
        assert_eq!(item_list(json!(42)), Err(ApiError::Malformed));
        assert_eq!(item_list(json!(null)), Err(ApiError::Malformed));
        assert_eq!(item_list(json!({ "status": "success" })), Err(ApiError::Malformed));
        assert_eq!(item_list(json!({ "status": "error" })), Err(ApiError::Malformed));
        // success envelope whose payload is not a row array
        assert_eq!(
            item_list(json!({ "status": "success", "data": "ok" })),
            Err(ApiError::Malformed)
        );
    }

    #[test]
    fn non_object_rows_are_dropped_not_fatal() {
        let items = item_list(json!([1, { "商品ID": "X1" }, "junk"])).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].code, "X1");
    }

    #[test]
    fn list_scenario_success_envelope() {
        let items = item_list(json!({
            "status": "success",
            "data": [{ "商品ID": "X1", "商品名": "Foo", "ケース発注数": 3 }]
        }))
        .unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].code, "X1");
        assert_eq!(items[0].name.as_deref(), Some("Foo"));
        assert_eq!(items[0].case_order_count, Some(3));
        assert!(!items[0].confirmed);
    }

    #[test]
    fn update_reply_shapes_normalize_identically() {
        let row = json!({ "商品ID": "X1", "在庫数": 10, "不足数": 2, "ケース発注数": 1 });
        let bare = updated_item(row.clone()).unwrap();
        let wrapped = updated_item(json!({ "status": "success", "data": row.clone() })).unwrap();
        let listed = updated_item(json!({ "status": "success", "data": [row] })).unwrap();
        assert_eq!(bare, wrapped);
        assert_eq!(bare, listed);
        assert_eq!(bare.stock_count, Some(10));
        assert_eq!(bare.shortage_count, Some(2));
        assert_eq!(bare.case_order_count, Some(1));
    }

    #[test]
    fn update_reply_with_multiple_rows_is_malformed() {
        let body = json!({ "status": "success", "data": [{}, {}] });
        assert_eq!(updated_item(body), Err(ApiError::Malformed));
    }
}
