use crate::auth::use_auth;
use crate::components::field::TextField;
use crate::toast::use_toaster;
use crate::web::route::AppRoute;
use crate::web::router::{Link, use_router};
use leptos::prelude::*;
use leptos::task::spawn_local;
use ramyro_shared::validation::{Field, LoginForm, ValidationErrors};

const LOGIN_FAILED: &str = "Login failed. Please check your credentials.";

#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = use_auth();
    let router = use_router();
    let toaster = use_toaster();

    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let errors = RwSignal::new(ValidationErrors::new());
    let server_error = RwSignal::new(Option::<String>::None);
    let submitting = RwSignal::new(false);

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        if submitting.get_untracked() {
            return;
        }

        let form = LoginForm {
            email: email.get_untracked(),
            password: password.get_untracked(),
        };
        let request = match form.to_request() {
            Ok(request) => request,
            Err(invalid) => {
                errors.set(invalid);
                return;
            }
        };

        errors.set(ValidationErrors::new());
        server_error.set(None);
        submitting.set(true);

        let auth = auth.clone();
        spawn_local(async move {
            let result = auth.login(&request.email, &request.password).await;
            submitting.set(false);
            match result {
                Ok(session) => {
                    toaster.success("Logged in successfully");
                    router.navigate_to(AppRoute::dashboard_for(session.role));
                }
                Err(_) => server_error.set(Some(LOGIN_FAILED.to_string())),
            }
        });
    };

    view! {
        <div class="hero min-h-[70vh] bg-base-200">
            <div class="hero-content w-full max-w-md">
                <div class="card w-full shadow-2xl bg-base-100">
                    <form class="card-body" on:submit=on_submit novalidate>
                        <h2 class="card-title text-2xl">"Sign In"</h2>
                        <p class="text-base-content/70">"Enter your credentials to access your account"</p>

                        <TextField label="Email" field=Field::Email value=email errors=errors
                            input_type="email" placeholder="doctor@example.com" disabled=submitting />
                        <TextField label="Password" field=Field::Password value=password errors=errors
                            input_type="password" disabled=submitting />

                        <div class="form-control mt-6">
                            <button class="btn btn-primary" disabled=move || submitting.get()>
                                {move || if submitting.get() {
                                    view! { <span class="loading loading-spinner"></span> "Signing in..." }.into_any()
                                } else {
                                    "Sign in".into_any()
                                }}
                            </button>
                        </div>

                        {move || server_error.get().map(|message| view! {
                            <p class="text-sm text-error text-center">{message}</p>
                        })}

                        <p class="text-center text-sm text-base-content/70">
                            "Don't have an account? "
                            <Link to=AppRoute::Register class="link link-primary">"Register"</Link>
                        </p>
                    </form>
                </div>
            </div>
        </div>
    }
}
