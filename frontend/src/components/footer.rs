use crate::components::icons::Heart;
use chrono::Datelike;
use leptos::prelude::*;
use ramyro_shared::date::today;

#[component]
pub fn Footer() -> impl IntoView {
    let year = today().year();

    view! {
        <footer class="footer bg-base-100 border-t border-base-200 p-6">
            <div class="w-full max-w-7xl mx-auto flex flex-col md:flex-row justify-between items-center gap-4">
                <div>
                    <h2 class="text-xl font-bold text-primary">"Ramyro"</h2>
                    <p class="text-base-content/70 text-sm">"Simplifying healthcare appointments"</p>
                </div>
                <div class="flex flex-col items-center md:items-end">
                    <p class="text-base-content/70 text-sm">
                        {format!("© {} Ramyro. All rights reserved.", year)}
                    </p>
                    <p class="text-base-content/50 text-xs flex items-center">
                        "Made with " <Heart attr:class="h-3 w-3 mx-1 text-error" /> " for better healthcare"
                    </p>
                </div>
            </div>
        </footer>
    }
}
