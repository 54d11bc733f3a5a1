//! Item Detail View
//!
//! Records today's stock count for one item and shows the figures the
//! backend recomputes from it. There is no single-item endpoint; the flow
//! fetches the full collection and scans for the requested code. On a
//! successful submit the confirmed code is handed to the list flow and a
//! cancellable timer returns the operator there.

use gloo_timers::callback::Timeout;
use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::JsCast;

use crate::api;
use crate::context::AppContext;
use crate::envelope;
use crate::models::{parse_stock_input, Item};

/// How long the recomputed figures stay on screen before auto-returning.
const RETURN_DELAY_MS: u32 = 2_000;

#[derive(Clone)]
enum DetailState {
    Loading,
    /// Load failed or the code is absent from the collection.
    Failed(String),
    /// Editing; `error` carries the last validation or submit failure.
    Ready { item: Item, error: Option<String> },
    Submitting { item: Item },
    /// Server figures recorded; the return timer is running.
    Submitted { item: Item },
}

/// Scan the fetched collection for the routed code. Codes are already
/// string-normalized on decode, so a plain comparison covers identifiers
/// that arrive as numbers elsewhere.
fn find_item(items: Vec<Item>, code: &str) -> Option<Item> {
    items.into_iter().find(|item| item.code == code)
}

/// Fold the server's recomputed figures into the item on display. The
/// figures come from the update reply; identity fields stay as loaded.
fn merge_update(item: Item, updated: &Item, submitted_count: u32) -> Item {
    Item {
        stock_count: updated.stock_count.or(Some(submitted_count)),
        shortage_count: updated.shortage_count,
        case_order_count: updated.case_order_count,
        ..item
    }
}

#[component]
pub fn ItemDetail(code: String) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");

    let (state, set_state) = signal(DetailState::Loading);
    let (stock_input, set_stock_input) = signal(String::new());
    let nav_timer: StoredValue<Option<Timeout>, LocalStorage> = StoredValue::new_local(None);

    // The return timer must not fire into a torn-down view.
    on_cleanup(move || {
        if let Some(timer) = nav_timer.try_update_value(|t| t.take()).flatten() {
            timer.cancel();
        }
    });

    let load_code = code.clone();
    Effect::new(move |_| {
        let code = load_code.clone();
        spawn_local(async move {
            let next = match api::fetch_list().await.and_then(envelope::item_list) {
                Ok(items) => match find_item(items, &code) {
                    Some(item) => {
                        let _ = set_stock_input.try_set(item.stock_count.unwrap_or(0).to_string());
                        DetailState::Ready { item, error: None }
                    }
                    None => DetailState::Failed(format!("該当商品が見つかりません: {}", code)),
                },
                Err(err) => DetailState::Failed(err.to_string()),
            };
            let _ = set_state.try_set(next);
        });
    });

    let on_save = move |_| {
        let DetailState::Ready { item, .. } = state.get_untracked() else {
            return;
        };
        // Validation happens before any network call.
        let count = match parse_stock_input(&stock_input.get_untracked()) {
            Ok(count) => count,
            Err(err) => {
                set_state.set(DetailState::Ready {
                    item,
                    error: Some(err.to_string()),
                });
                return;
            }
        };
        set_state.set(DetailState::Submitting { item: item.clone() });
        spawn_local(async move {
            let result = api::submit_update(&item.code, count)
                .await
                .and_then(envelope::updated_item);
            match result {
                Ok(updated) => {
                    leptos::logging::log!("[DETAIL] updated {} -> stock {}", item.code, count);
                    let code = item.code.clone();
                    let merged = merge_update(item, &updated, count);
                    if set_state
                        .try_set(DetailState::Submitted { item: merged })
                        .is_none()
                    {
                        // Still mounted: hand the code to the list and
                        // schedule the return.
                        ctx.handoff.put(code);
                        nav_timer.set_value(Some(Timeout::new(RETURN_DELAY_MS, move || {
                            ctx.back_to_list()
                        })));
                    }
                }
                Err(err) => {
                    let _ = set_state.try_set(DetailState::Ready {
                        item,
                        error: Some(err.to_string()),
                    });
                }
            }
        });
    };

    view! {
        {move || match state.get() {
            DetailState::Loading => view! {
                <p class="loading">"読み込み中…"</p>
            }
            .into_any(),
            DetailState::Failed(message) => view! {
                <div class="load-error">
                    <p class="error-text">{format!("エラー: {}", message)}</p>
                    <button class="back-btn" on:click=move |_| ctx.back_to_list()>
                        "一覧に戻る"
                    </button>
                </div>
            }
            .into_any(),
            DetailState::Ready { item, error } => view! {
                <div class="detail-card">
                    <h2>"商品詳細"</h2>
                    <ItemSummary item=item.clone() />
                    <label class="stock-field">
                        <span class="card-label">"在庫数"</span>
                        <input
                            type="number"
                            placeholder="0"
                            prop:value=move || stock_input.get()
                            on:input=move |ev| {
                                let target = ev.target().unwrap();
                                let input = target.dyn_ref::<web_sys::HtmlInputElement>().unwrap();
                                set_stock_input.set(input.value());
                            }
                        />
                    </label>
                    {error.map(|message| view! {
                        <p class="error-text">{message}</p>
                    })}
                    <div class="detail-actions">
                        <button class="save-btn" on:click=on_save>"保存"</button>
                        <button class="back-btn" on:click=move |_| ctx.back_to_list()>
                            "キャンセル"
                        </button>
                    </div>
                </div>
            }
            .into_any(),
            DetailState::Submitting { item } => view! {
                <div class="detail-card">
                    <h2>"商品詳細"</h2>
                    <ItemSummary item />
                    <p class="loading">"送信中…"</p>
                </div>
            }
            .into_any(),
            DetailState::Submitted { item } => view! {
                <div class="detail-card">
                    <h2>"発注計算の結果"</h2>
                    <ItemSummary item=item.clone() />
                    <div class="card-row">
                        <span class="card-label">"入力在庫数："</span>
                        <span>{fmt_count(item.stock_count)}</span>
                    </div>
                    <div class="card-row">
                        <span class="card-label">"不足数："</span>
                        <span>{fmt_count(item.shortage_count)}</span>
                    </div>
                    <div class="card-row">
                        <span class="card-label">"ケース発注数："</span>
                        <span class="order-count">{fmt_count(item.case_order_count)}</span>
                    </div>
                    <p class="auto-return-note">"まもなく一覧に戻ります…"</p>
                </div>
            }
            .into_any(),
        }}
    }
}

#[component]
fn ItemSummary(item: Item) -> impl IntoView {
    let name = item.display_name().to_string();
    view! {
        <div class="item-summary">
            <div class="card-row">
                <span class="card-label">"商品コード："</span>
                <span>{item.code.clone()}</span>
            </div>
            <div class="card-row">
                <span class="card-label">"商品名："</span>
                <span>{name}</span>
            </div>
        </div>
    }
}

fn fmt_count(count: Option<u32>) -> String {
    count.map(|n| n.to_string()).unwrap_or_else(|| "未計算".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(code: &str, stock: Option<u32>) -> Item {
        Item {
            code: code.to_string(),
            name: Some(format!("商品{}", code)),
            stock_count: stock,
            shortage_count: None,
            case_order_count: None,
            confirmed: false,
        }
    }

    #[test]
    fn find_item_matches_routed_code() {
        let items = vec![item("X1", Some(5)), item("X2", None)];
        let found = find_item(items, "X2").unwrap();
        assert_eq!(found.code, "X2");
    }

    #[test]
    fn find_item_misses_absent_code() {
        let items = vec![item("X1", Some(5))];
        assert!(find_item(items, "X9").is_none());
    }

    #[test]
    fn merge_takes_server_figures_keeps_identity() {
        let loaded = item("X1", Some(4));
        let updated = Item {
            code: String::new(),
            name: None,
            stock_count: Some(10),
            shortage_count: Some(2),
            case_order_count: Some(1),
            confirmed: false,
        };
        let merged = merge_update(loaded, &updated, 10);
        assert_eq!(merged.code, "X1");
        assert_eq!(merged.name.as_deref(), Some("商品X1"));
        assert_eq!(merged.stock_count, Some(10));
        assert_eq!(merged.shortage_count, Some(2));
        assert_eq!(merged.case_order_count, Some(1));
    }

    #[test]
    fn merge_falls_back_to_submitted_count() {
        let merged = merge_update(item("X1", Some(4)), &item("X1", None), 7);
        assert_eq!(merged.stock_count, Some(7));
    }
}
