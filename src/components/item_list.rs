//! Item List View
//!
//! The reorder overview: every item with its computed case-order quantity.
//! On mount the confirmation handoff is taken exactly once and each row is
//! annotated with the derived "just confirmed" flag.

use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::JsValue;

use crate::api;
use crate::context::AppContext;
use crate::envelope;
use crate::models::{reconcile, Item};

#[derive(Clone, PartialEq)]
enum ListState {
    Loading,
    Ready(Vec<Item>),
    Failed(String),
}

#[component]
pub fn ItemList() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");

    let (state, set_state) = signal(ListState::Loading);
    let (reload, set_reload) = signal(0u32);
    // Taken once per mount; retries within this mount keep the same code.
    let confirmed_code = StoredValue::new(ctx.handoff.take());

    Effect::new(move |_| {
        let trigger = reload.get();
        set_state.set(ListState::Loading);
        let code = confirmed_code.get_value();
        spawn_local(async move {
            let next = match api::fetch_list().await.and_then(envelope::item_list) {
                Ok(items) => {
                    leptos::logging::log!("[LIST] loaded {} rows, trigger={}", items.len(), trigger);
                    ListState::Ready(reconcile(items, code.as_deref()))
                }
                Err(err) => ListState::Failed(err.to_string()),
            };
            // A completion for a torn-down list is dropped here.
            let _ = set_state.try_set(next);
        });
    });

    let retry = move |_| set_reload.update(|v| *v += 1);

    view! {
        {move || match state.get() {
            ListState::Loading => view! {
                <p class="loading">"読み込み中…"</p>
            }
            .into_any(),
            ListState::Failed(message) => view! {
                <div class="load-error">
                    <p class="error-text">{message}</p>
                    <button class="retry-btn" on:click=retry>"再試行"</button>
                </div>
            }
            .into_any(),
            ListState::Ready(items) => view! {
                <div class="list-heading">
                    <h2>
                        "発注管理表"
                        <span class="list-date">{format!("（{}）", today())}</span>
                    </h2>
                    <button class="reload-btn" on:click=retry>"更新"</button>
                </div>
                <section class="item-cards">
                    {items.into_iter().map(|item| view! { <ItemCard item /> }).collect_view()}
                </section>
            }
            .into_any(),
        }}
    }
}

#[component]
fn ItemCard(item: Item) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");

    let code = item.code.clone();
    let name = item.display_name().to_string();
    let order = item
        .case_order_count
        .map(|n| format!("{} ケース", n))
        .unwrap_or_else(|| "未計算".to_string());

    view! {
        <article
            class=if item.confirmed { "item-card confirmed" } else { "item-card" }
            on:click=move |_| ctx.open_detail(code.clone())
        >
            {item.confirmed.then(|| view! {
                <p class="confirmed-badge">"✓ 発注済み"</p>
            })}
            <div class="card-row">
                <span class="card-label">"商品コード："</span>
                <span>{item.code.clone()}</span>
            </div>
            <div class="card-row">
                <span class="card-label">"商品名："</span>
                <span>{name}</span>
            </div>
            <div class="card-row">
                <span class="card-label">"ケース発注数："</span>
                <span class="order-count">{order}</span>
            </div>
        </article>
    }
}

fn today() -> String {
    js_sys::Date::new_0()
        .to_locale_date_string("ja-JP", &JsValue::UNDEFINED)
        .into()
}
