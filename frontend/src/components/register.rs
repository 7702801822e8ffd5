//! 注册页面
//!
//! 患者与医生共用同一套字段，通过页签切换注册角色。

use crate::auth::use_auth;
use crate::components::field::TextField;
use crate::toast::use_toaster;
use crate::web::route::AppRoute;
use crate::web::router::{Link, use_router};
use leptos::prelude::*;
use leptos::task::spawn_local;
use ramyro_shared::Role;
use ramyro_shared::validation::{Field, RegistrationForm, ValidationErrors};

/// 注册表单状态
///
/// `RwSignal` 实现了 `Copy`，整个结构体可以直接移入各个闭包。
#[derive(Clone, Copy)]
struct RegisterFormState {
    email: RwSignal<String>,
    password: RwSignal<String>,
    first_name: RwSignal<String>,
    last_name: RwSignal<String>,
    phone_number: RwSignal<String>,
}

impl RegisterFormState {
    fn new() -> Self {
        Self {
            email: RwSignal::new(String::new()),
            password: RwSignal::new(String::new()),
            first_name: RwSignal::new(String::new()),
            last_name: RwSignal::new(String::new()),
            phone_number: RwSignal::new(String::new()),
        }
    }

    fn reset(&self) {
        self.email.set(String::new());
        self.password.set(String::new());
        self.first_name.set(String::new());
        self.last_name.set(String::new());
        self.phone_number.set(String::new());
    }

    fn to_form(&self) -> RegistrationForm {
        RegistrationForm {
            email: self.email.get_untracked(),
            password: self.password.get_untracked(),
            first_name: self.first_name.get_untracked(),
            last_name: self.last_name.get_untracked(),
            phone_number: self.phone_number.get_untracked(),
        }
    }
}

#[component]
fn RoleTab(role: Role, current: RwSignal<Role>, #[prop(into)] label: String) -> impl IntoView {
    view! {
        <a
            role="tab"
            class=move || if current.get() == role { "tab tab-active" } else { "tab" }
            on:click=move |_| current.set(role)
        >
            {label}
        </a>
    }
}

#[component]
pub fn RegisterPage() -> impl IntoView {
    let auth = use_auth();
    let router = use_router();
    let toaster = use_toaster();

    let state = RegisterFormState::new();
    let role = RwSignal::new(Role::Patient);
    let errors = RwSignal::new(ValidationErrors::new());
    let general_error = RwSignal::new(Option::<String>::None);
    let submitting = RwSignal::new(false);

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        if submitting.get_untracked() {
            return;
        }

        let request = match state.to_form().to_request() {
            Ok(request) => request,
            Err(invalid) => {
                errors.set(invalid);
                return;
            }
        };

        general_error.set(None);
        submitting.set(true);

        let auth = auth.clone();
        let role = role.get_untracked();
        spawn_local(async move {
            let result = auth.register(role, &request).await;
            submitting.set(false);
            match result {
                Ok(()) => {
                    state.reset();
                    toaster.success("Registration successful. Please sign in.");
                    router.navigate_to(AppRoute::Login);
                }
                Err(e) => general_error.set(Some(e.to_string())),
            }
        });
    };

    view! {
        <div class="hero min-h-[70vh] bg-base-200">
            <div class="hero-content w-full max-w-md">
                <div class="card w-full shadow-2xl bg-base-100">
                    <div class="card-body">
                        <h2 class="card-title text-2xl">"Create an account"</h2>
                        <p class="text-base-content/70">"Enter your details to create your account"</p>

                        <div role="tablist" class="tabs tabs-boxed grid grid-cols-2">
                            <RoleTab role=Role::Patient current=role label="Patient" />
                            <RoleTab role=Role::Doctor current=role label="Doctor" />
                        </div>

                        <form on:submit=on_submit novalidate>
                            <div class="grid grid-cols-2 gap-4">
                                <TextField label="First Name" field=Field::FirstName value=state.first_name
                                    errors=errors disabled=submitting />
                                <TextField label="Last Name" field=Field::LastName value=state.last_name
                                    errors=errors disabled=submitting />
                            </div>
                            <TextField label="Email" field=Field::Email value=state.email errors=errors
                                input_type="email" disabled=submitting />
                            <TextField label="Password" field=Field::Password value=state.password
                                errors=errors input_type="password" disabled=submitting />
                            <TextField label="Phone Number" field=Field::PhoneNumber value=state.phone_number
                                errors=errors input_type="tel" placeholder="+15551234567" disabled=submitting />

                            <div class="form-control mt-6">
                                <button class="btn btn-primary" disabled=move || submitting.get()>
                                    {move || if submitting.get() {
                                        view! { <span class="loading loading-spinner"></span> "Creating account..." }.into_any()
                                    } else if role.get() == Role::Patient {
                                        "Register as Patient".into_any()
                                    } else {
                                        "Register as Doctor".into_any()
                                    }}
                                </button>
                            </div>
                        </form>

                        {move || general_error.get().map(|message| view! {
                            <p class="text-sm text-error text-center">{message}</p>
                        })}

                        <p class="text-center text-sm text-base-content/70">
                            "Already have an account? "
                            <Link to=AppRoute::Login class="link link-primary">"Sign in"</Link>
                        </p>
                    </div>
                </div>
            </div>
        </div>
    }
}
