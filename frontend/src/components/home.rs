use crate::auth::{role_signal, use_auth};
use crate::web::route::AppRoute;
use crate::web::router::Link;
use leptos::prelude::*;

const STEPS: [(&str, &str); 4] = [
    ("Register", "Create an account as a patient or doctor to get started."),
    ("Complete Profile", "Fill in your medical information for better service."),
    ("Book Appointment", "Choose a doctor and schedule a convenient time."),
    ("Manage Visits", "View or cancel your appointments anytime."),
];

#[component]
pub fn HomePage() -> impl IntoView {
    let role = role_signal(&use_auth());

    view! {
        <section class="hero bg-base-200 py-16 md:py-24">
            <div class="hero-content text-center">
                <div class="max-w-2xl">
                    <h1 class="text-4xl md:text-5xl font-bold mb-6">"Medical Appointments Made Simple"</h1>
                    <p class="text-xl text-base-content/70 mb-8">
                        "Schedule appointments with healthcare professionals quickly and easily. "
                        "Manage your medical visits all in one place."
                    </p>
                    {move || match role.get() {
                        Some(role) => view! {
                            <Link to=AppRoute::dashboard_for(role) class="btn btn-primary btn-lg">
                                "Go to Dashboard"
                            </Link>
                        }
                        .into_any(),
                        None => view! {
                            <div class="flex flex-col sm:flex-row justify-center gap-4">
                                <Link to=AppRoute::Register class="btn btn-primary btn-lg">"Get Started"</Link>
                                <Link to=AppRoute::Login class="btn btn-outline btn-lg">"Sign In"</Link>
                            </div>
                        }
                        .into_any(),
                    }}
                </div>
            </div>
        </section>

        <section class="py-16 bg-base-100">
            <div class="max-w-7xl mx-auto px-4">
                <h2 class="text-3xl font-bold text-center mb-12">"How It Works"</h2>
                <div class="grid md:grid-cols-2 lg:grid-cols-4 gap-8">
                    {STEPS
                        .iter()
                        .map(|(title, text)| {
                            view! {
                                <div class="card bg-base-200 p-6 text-center">
                                    <h3 class="text-xl font-semibold mb-2">{*title}</h3>
                                    <p class="text-base-content/70">{*text}</p>
                                </div>
                            }
                        })
                        .collect_view()}
                </div>
            </div>
        </section>
    }
}
