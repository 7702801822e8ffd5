//! 预约面板（患者与医生共用）

use crate::appointments::{AppointmentBoard, AppointmentFeed, Cancelled, RoleAppointments};
use crate::auth::use_auth;
use crate::components::appointment_card::AppointmentCard;
use crate::components::icons::{Plus, RefreshCw};
use crate::config::AppConfig;
use crate::toast::use_toaster;
use crate::web::route::AppRoute;
use crate::web::router::Link;
use crate::web::{BrowserStorage, FetchHttpClient};
use leptos::prelude::*;
use leptos::task::spawn_local;
use ramyro_shared::{Appointment, Role};

type BrowserBoard =
    AppointmentBoard<RoleAppointments<FetchHttpClient, BrowserStorage>, RwSignal<AppointmentFeed>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tab {
    Upcoming,
    Past,
}

#[component]
fn AppointmentGrid(
    items: Signal<Vec<Appointment>>,
    viewer: Role,
    on_cancel: Callback<i64>,
    cancelling: RwSignal<Option<i64>>,
) -> impl IntoView {
    view! {
        <div class="grid gap-6 md:grid-cols-2 lg:grid-cols-3">
            <For
                each=move || items.get()
                key=|a| (a.id, a.status.to_string())
                children=move |appointment| {
                    let id = appointment.id;
                    view! {
                        <AppointmentCard
                            appointment=appointment
                            viewer=viewer
                            on_cancel=on_cancel
                            busy=Signal::derive(move || cancelling.get() == Some(id))
                        />
                    }
                }
            />
        </div>
    }
}

#[component]
pub fn DashboardPage(role: Role) -> impl IntoView {
    let auth = use_auth();
    let toaster = use_toaster();
    let config = use_context::<AppConfig>().unwrap_or_default();

    let feed = RwSignal::new(AppointmentFeed::new(config.page_size));
    let board: BrowserBoard =
        AppointmentBoard::new(RoleAppointments::new(auth.api().clone(), role), feed);
    let tab = RwSignal::new(Tab::Upcoming);
    let cancelling = RwSignal::new(Option::<i64>::None);

    let refresh = Callback::new({
        let board = board.clone();
        move |_: ()| {
            let board = board.clone();
            spawn_local(async move {
                if let Err(e) = board.refresh().await {
                    toaster.error(e.to_string());
                }
            });
        }
    });

    let load_more = Callback::new({
        let board = board.clone();
        move |_: ()| {
            let board = board.clone();
            spawn_local(async move {
                if let Err(e) = board.load_more().await {
                    toaster.error(e.to_string());
                }
            });
        }
    });

    let cancel = Callback::new(move |id: i64| {
        if cancelling.get_untracked().is_some() {
            return;
        }
        cancelling.set(Some(id));
        let board = board.clone();
        spawn_local(async move {
            let result = board.cancel(id).await;
            cancelling.set(None);
            match result {
                Ok(Cancelled { refresh }) => {
                    toaster.success("Appointment cancelled successfully");
                    if let Err(e) = refresh {
                        toaster.error(e.to_string());
                    }
                }
                Err(e) => toaster.error(e.to_string()),
            }
        });
    });

    // 初始加载
    Effect::new(move |_| refresh.run(()));

    let loading = move || feed.with(|f| f.is_loading());
    let upcoming = Signal::derive(move || feed.with(|f| f.upcoming().cloned().collect::<Vec<_>>()));
    let past = Signal::derive(move || feed.with(|f| f.past().cloned().collect::<Vec<_>>()));
    let first_load = move || loading() && feed.with(|f| f.is_empty());

    let title = match role {
        Role::Patient => "Patient Dashboard",
        Role::Doctor => "Doctor Dashboard",
    };
    let tab_class = move |t: Tab| if tab.get() == t { "tab tab-active" } else { "tab" };

    view! {
        <div class="max-w-7xl mx-auto p-4 md:p-8 space-y-8">
            <div class="flex flex-col md:flex-row justify-between items-start md:items-center gap-4">
                <h1 class="text-3xl font-bold">{title}</h1>
                <div class="flex gap-2">
                    <button class="btn btn-outline gap-2" disabled=loading on:click=move |_| refresh.run(())>
                        <RefreshCw attr:class=move || if loading() { "h-4 w-4 animate-spin" } else { "h-4 w-4" } />
                        "Refresh"
                    </button>
                    <Show when=move || role == Role::Patient>
                        <Link to=AppRoute::NewAppointment class="btn btn-primary gap-2">
                            <Plus attr:class="h-4 w-4" />
                            "New Appointment"
                        </Link>
                    </Show>
                </div>
            </div>

            <div role="tablist" class="tabs tabs-bordered">
                <a role="tab" class=move || tab_class(Tab::Upcoming) on:click=move |_| tab.set(Tab::Upcoming)>
                    "Upcoming Appointments"
                </a>
                <a role="tab" class=move || tab_class(Tab::Past) on:click=move |_| tab.set(Tab::Past)>
                    "Past Appointments"
                </a>
            </div>

            <Show
                when=move || !first_load()
                fallback=|| view! {
                    <div class="flex justify-center items-center h-64">
                        <span class="loading loading-spinner loading-lg text-primary"></span>
                    </div>
                }
            >
                {move || {
                    let (items, empty_title, empty_text) = match tab.get() {
                        Tab::Upcoming => (
                            upcoming,
                            "No Upcoming Appointments",
                            "You don't have any scheduled appointments.",
                        ),
                        Tab::Past => (
                            past,
                            "No Past Appointments",
                            "Your appointment history will appear here.",
                        ),
                    };
                    if items.with(|i| i.is_empty()) {
                        view! {
                            <div class="text-center py-12 bg-base-200 rounded-box">
                                <h3 class="text-xl font-medium mb-2">{empty_title}</h3>
                                <p class="text-base-content/60">{empty_text}</p>
                            </div>
                        }
                        .into_any()
                    } else {
                        view! {
                            <AppointmentGrid items=items viewer=role on_cancel=cancel cancelling=cancelling />
                        }
                        .into_any()
                    }
                }}
            </Show>

            <Show when=move || role == Role::Doctor && feed.with(|f| f.has_more() && !f.is_empty())>
                <div class="flex justify-center">
                    <button class="btn btn-primary" disabled=loading on:click=move |_| load_more.run(())>
                        {move || if loading() {
                            view! { <span class="loading loading-spinner loading-sm"></span> }.into_any()
                        } else {
                            "Load More".into_any()
                        }}
                    </button>
                </div>
            </Show>
        </div>
    }
}
