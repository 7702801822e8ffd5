//! 新建预约页面
//!
//! 医生列表在表单挂载时加载，下拉框每次获得焦点时重新加载。
//! 日期只能在预约窗口内选择，超出窗口的输入同样会被校验拒绝。

use crate::auth::use_auth;
use crate::components::field::FieldError;
use crate::forms::{SubmitError, schedule_appointment};
use crate::toast::use_toaster;
use crate::web::route::AppRoute;
use crate::web::router::use_router;
use leptos::prelude::*;
use leptos::task::spawn_local;
use ramyro_shared::date::{BookingWindow, parse_api_date};
use ramyro_shared::validation::{AppointmentForm, Field, ValidationErrors};
use ramyro_shared::{Doctor, MAX_REASON_LEN};
use tracing::warn;

fn counter_class(len: usize) -> &'static str {
    if len > MAX_REASON_LEN {
        "label-text-alt text-error mt-1"
    } else {
        "label-text-alt text-base-content/60 mt-1"
    }
}

#[derive(Clone, Copy)]
struct AppointmentFormState {
    doctor_id: RwSignal<String>,
    date: RwSignal<String>,
    reason: RwSignal<String>,
}

impl AppointmentFormState {
    fn new() -> Self {
        Self {
            doctor_id: RwSignal::new(String::new()),
            date: RwSignal::new(String::new()),
            reason: RwSignal::new(String::new()),
        }
    }

    fn reset(&self) {
        self.doctor_id.set(String::new());
        self.date.set(String::new());
        self.reason.set(String::new());
    }

    fn to_form(&self) -> AppointmentForm {
        AppointmentForm {
            doctor_id: self.doctor_id.get_untracked().parse().ok(),
            date: parse_api_date(&self.date.get_untracked()),
            reason: self.reason.get_untracked(),
        }
    }
}

#[component]
pub fn NewAppointmentPage() -> impl IntoView {
    let auth = use_auth();
    let router = use_router();
    let toaster = use_toaster();

    let window = BookingWindow::from_today();
    let state = AppointmentFormState::new();
    let doctors = RwSignal::new(Vec::<Doctor>::new());
    let errors = RwSignal::new(ValidationErrors::new());
    let submitting = RwSignal::new(false);

    let fetch_doctors = Callback::new({
        let api = auth.api().clone();
        move |_: ()| {
            let api = api.clone();
            spawn_local(async move {
                match api.list_doctors().await {
                    Ok(list) => doctors.set(list),
                    Err(e) => {
                        warn!(error = ?e, "failed to load doctors");
                        toaster.error("Failed to load doctors");
                    }
                }
            });
        }
    });

    Effect::new(move |_| fetch_doctors.run(()));

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        if submitting.get_untracked() {
            return;
        }

        let form = state.to_form();
        let invalid = form.validate(&window);
        if !invalid.is_empty() {
            errors.set(invalid);
            return;
        }

        errors.set(ValidationErrors::new());
        submitting.set(true);

        let api = auth.api().clone();
        spawn_local(async move {
            let result = schedule_appointment(&api, &form, &window).await;
            submitting.set(false);
            match result {
                Ok(()) => {
                    state.reset();
                    toaster.success("Appointment scheduled successfully");
                    router.navigate_to(AppRoute::PatientDashboard);
                }
                Err(SubmitError::Invalid(invalid)) => errors.set(invalid),
                Err(e) => toaster.error(e.to_string()),
            }
        });
    };

    let reason_len = move || state.reason.with(|r| r.chars().count());

    view! {
        <div class="flex justify-center p-4 md:p-8">
            <div class="card w-full max-w-lg bg-base-100 shadow-xl">
                <form class="card-body gap-4" on:submit=on_submit novalidate>
                    <div>
                        <h2 class="card-title text-2xl">"Schedule New Appointment"</h2>
                        <p class="text-base-content/70 text-sm">
                            "Fill in the details to book an appointment with a doctor."
                        </p>
                    </div>

                    <div class="form-control">
                        <label class="label" for="doctor">
                            <span class="label-text">"Select Doctor"</span>
                        </label>
                        <select
                            id="doctor"
                            class="select select-bordered w-full"
                            prop:value=move || state.doctor_id.get()
                            on:focus=move |_| fetch_doctors.run(())
                            on:change=move |ev| {
                                state.doctor_id.set(event_target_value(&ev));
                                errors.update(|e| e.clear(Field::Doctor));
                            }
                            disabled=move || submitting.get()
                        >
                            <option value="" disabled>"Select a doctor"</option>
                            <For
                                each=move || doctors.get()
                                key=|d| d.id
                                children=move |doctor| {
                                    let value = doctor.id.to_string();
                                    let selected = {
                                        let value = value.clone();
                                        move || state.doctor_id.get() == value
                                    };
                                    view! {
                                        <option value=value selected=selected>{doctor.display_name()}</option>
                                    }
                                }
                            />
                        </select>
                        <FieldError errors=errors field=Field::Doctor />
                    </div>

                    <div class="form-control">
                        <label class="label" for="date">
                            <span class="label-text">"Appointment Date"</span>
                        </label>
                        <input
                            id="date"
                            type="date"
                            class="input input-bordered w-full"
                            min=window.min_attr()
                            max=window.max_attr()
                            prop:value=move || state.date.get()
                            on:input=move |ev| {
                                state.date.set(event_target_value(&ev));
                                errors.update(|e| e.clear(Field::Date));
                            }
                            disabled=move || submitting.get()
                        />
                        <FieldError errors=errors field=Field::Date />
                    </div>

                    <div class="form-control">
                        <label class="label" for="reason">
                            <span class="label-text">"Reason for Visit"</span>
                        </label>
                        <textarea
                            id="reason"
                            class="textarea textarea-bordered w-full"
                            placeholder="Briefly describe your symptoms or reason for the appointment"
                            prop:value=move || state.reason.get()
                            on:input=move |ev| {
                                state.reason.set(event_target_value(&ev));
                                errors.update(|e| e.clear(Field::Reason));
                            }
                            disabled=move || submitting.get()
                        ></textarea>
                        <FieldError errors=errors field=Field::Reason />
                        <span class=move || counter_class(reason_len())>
                            {move || format!("{}/{} characters", reason_len(), MAX_REASON_LEN)}
                        </span>
                    </div>

                    <button class="btn btn-primary w-full" disabled=move || submitting.get()>
                        {move || if submitting.get() {
                            view! { <span class="loading loading-spinner"></span> "Scheduling..." }.into_any()
                        } else {
                            "Schedule Appointment".into_any()
                        }}
                    </button>
                </form>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counter_turns_red_past_the_limit() {
        assert_eq!(counter_class(MAX_REASON_LEN), "label-text-alt text-base-content/60 mt-1");
        assert_eq!(counter_class(MAX_REASON_LEN + 1), "label-text-alt text-error mt-1");
    }
}
