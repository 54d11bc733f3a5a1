//! Replenishment Console App
//!
//! Top-level component: owns the route signal and the confirmation handoff,
//! switches between the list and detail views.

use leptos::prelude::*;

use crate::components::{ItemDetail, ItemList};
use crate::context::{AppContext, ConfirmationHandoff, Route};

#[component]
pub fn App() -> impl IntoView {
    let (route, set_route) = signal(Route::List);
    let handoff = ConfirmationHandoff::new();

    // Provide navigation state to both views
    provide_context(AppContext::new((route, set_route), handoff));

    view! {
        <div class="app-shell">
            <header class="app-header">"在庫管理システム"</header>
            <main class="main-content">
                {move || match route.get() {
                    Route::List => view! { <ItemList /> }.into_any(),
                    Route::Detail(code) => view! { <ItemDetail code=code /> }.into_any(),
                }}
            </main>
        </div>
    }
}
