//! 个人资料页面（患者与医生共用）

use crate::auth::use_auth;
use crate::components::field::TextField;
use crate::components::icons::{Save, User};
use crate::forms::{ProfileDraft, SubmitError, load_profile, save_profile};
use crate::toast::use_toaster;
use leptos::prelude::*;
use leptos::task::spawn_local;
use ramyro_shared::Role;
use ramyro_shared::validation::{Field, ValidationErrors};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LoadState {
    Loading,
    Loaded,
    Failed,
}

#[derive(Clone, Copy)]
struct ProfileFormState {
    first_name: RwSignal<String>,
    last_name: RwSignal<String>,
    email: RwSignal<String>,
    phone_number: RwSignal<String>,
    date_of_birth: RwSignal<String>,
    specialization: RwSignal<String>,
}

impl ProfileFormState {
    fn new() -> Self {
        Self {
            first_name: RwSignal::new(String::new()),
            last_name: RwSignal::new(String::new()),
            email: RwSignal::new(String::new()),
            phone_number: RwSignal::new(String::new()),
            date_of_birth: RwSignal::new(String::new()),
            specialization: RwSignal::new(String::new()),
        }
    }

    fn fill(&self, draft: ProfileDraft) {
        self.first_name.set(draft.first_name);
        self.last_name.set(draft.last_name);
        self.email.set(draft.email);
        self.phone_number.set(draft.phone_number);
        self.date_of_birth.set(draft.date_of_birth);
        self.specialization.set(draft.specialization);
    }

    fn to_draft(&self) -> ProfileDraft {
        ProfileDraft {
            first_name: self.first_name.get_untracked(),
            last_name: self.last_name.get_untracked(),
            email: self.email.get_untracked(),
            phone_number: self.phone_number.get_untracked(),
            date_of_birth: self.date_of_birth.get_untracked(),
            specialization: self.specialization.get_untracked(),
        }
    }
}

#[component]
pub fn ProfilePage(role: Role) -> impl IntoView {
    let auth = use_auth();
    let toaster = use_toaster();

    let state = ProfileFormState::new();
    let load_state = RwSignal::new(LoadState::Loading);
    let errors = RwSignal::new(ValidationErrors::new());
    let saving = RwSignal::new(false);

    Effect::new({
        let api = auth.api().clone();
        move |_| {
            let api = api.clone();
            spawn_local(async move {
                match load_profile(&api, role).await {
                    Ok(profile) => {
                        state.fill(ProfileDraft::from_profile(&profile));
                        load_state.set(LoadState::Loaded);
                    }
                    Err(_) => {
                        load_state.set(LoadState::Failed);
                        toaster.error("Failed to load profile data");
                    }
                }
            });
        }
    });

    let on_submit = {
        let api = auth.api().clone();
        move |ev: leptos::web_sys::SubmitEvent| {
            ev.prevent_default();
            if saving.get_untracked() {
                return;
            }

            let draft = state.to_draft();
            let invalid = draft.validate();
            if !invalid.is_empty() {
                errors.set(invalid);
                return;
            }

            errors.set(ValidationErrors::new());
            saving.set(true);

            let api = api.clone();
            spawn_local(async move {
                let result = save_profile(&api, role, &draft).await;
                saving.set(false);
                match result {
                    Ok(()) => toaster.success("Profile updated successfully"),
                    Err(SubmitError::Invalid(invalid)) => errors.set(invalid),
                    Err(e) => toaster.error(e.to_string()),
                }
            });
        }
    };

    let title = match role {
        Role::Patient => "Patient Profile",
        Role::Doctor => "Doctor Profile",
    };

    view! {
        <div class="max-w-3xl mx-auto p-4 md:p-8">
            {move || match load_state.get() {
                LoadState::Loading => view! {
                    <div class="flex justify-center items-center h-64">
                        <span class="loading loading-spinner loading-lg text-primary"></span>
                    </div>
                }
                .into_any(),
                LoadState::Failed => view! {
                    <div class="text-center py-12 bg-base-200 rounded-box">
                        <h3 class="text-xl font-medium">"Failed to load profile data"</h3>
                    </div>
                }
                .into_any(),
                LoadState::Loaded => view! {
                    <div class="card bg-base-100 shadow-xl">
                        <form class="card-body gap-2" on:submit=on_submit.clone() novalidate>
                            <div class="flex items-center gap-3 mb-4">
                                <User attr:class="h-8 w-8 text-primary" />
                                <div>
                                    <h2 class="card-title text-2xl">{title}</h2>
                                    <p class="text-base-content/70 text-sm">"Manage your personal information"</p>
                                </div>
                            </div>

                            <div class="grid gap-4 md:grid-cols-2">
                                <TextField label="First Name" field=Field::FirstName value=state.first_name
                                    errors=errors disabled=saving />
                                <TextField label="Last Name" field=Field::LastName value=state.last_name
                                    errors=errors disabled=saving />
                            </div>
                            <TextField label="Email" field=Field::Email value=state.email
                                errors=errors input_type="email" readonly=true />
                            <TextField label="Phone Number" field=Field::PhoneNumber value=state.phone_number
                                errors=errors input_type="tel" disabled=saving />

                            {match role {
                                Role::Patient => view! {
                                    <TextField label="Date of Birth" field=Field::DateOfBirth
                                        value=state.date_of_birth errors=errors input_type="date" disabled=saving />
                                }
                                .into_any(),
                                Role::Doctor => view! {
                                    <TextField label="Specialization" field=Field::Specialization
                                        value=state.specialization errors=errors
                                        placeholder="e.g. Cardiology" disabled=saving />
                                }
                                .into_any(),
                            }}

                            <div class="card-actions justify-end mt-4">
                                <button class="btn btn-primary gap-2" disabled=move || saving.get()>
                                    {move || if saving.get() {
                                        view! { <span class="loading loading-spinner loading-sm"></span> }.into_any()
                                    } else {
                                        view! { <Save attr:class="h-4 w-4" /> }.into_any()
                                    }}
                                    "Save Changes"
                                </button>
                            </div>
                        </form>
                    </div>
                }
                .into_any(),
            }}
        </div>
    }
}
