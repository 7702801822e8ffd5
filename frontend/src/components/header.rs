use crate::auth::{role_signal, use_auth};
use crate::components::icons::LogOut;
use crate::toast::use_toaster;
use crate::web::route::{AppRoute, nav_links};
use crate::web::router::{Link, use_router};
use leptos::prelude::*;

/// 顶部导航栏：链接随当前角色变化
#[component]
pub fn Header() -> impl IntoView {
    let auth = use_auth();
    let router = use_router();
    let toaster = use_toaster();
    let role = role_signal(&auth);

    let on_logout = move |_| {
        auth.logout();
        toaster.success("Logged out successfully");
        router.navigate_to(AppRoute::Home);
    };

    view! {
        <header class="navbar bg-base-100 border-b border-base-200 sticky top-0 z-10 px-4">
            <div class="flex-1">
                <Link to=AppRoute::Home class="btn btn-ghost text-2xl font-bold">
                    "Ramyro"
                </Link>
            </div>
            <nav class="flex-none flex items-center gap-2">
                {move || {
                    nav_links(role.get())
                        .into_iter()
                        .map(|link| {
                            view! {
                                <Link to=link.route class="btn btn-ghost btn-sm">
                                    {link.label}
                                </Link>
                            }
                        })
                        .collect_view()
                }}
                <Show when=move || role.get().is_some()>
                    <button class="btn btn-neutral btn-sm gap-2" on:click=on_logout.clone()>
                        <LogOut attr:class="h-4 w-4" />
                        "Logout"
                    </button>
                </Show>
            </nav>
        </header>
    }
}
