use crate::components::icons::{Calendar, FileText, User};
use leptos::prelude::*;
use ramyro_shared::date::{display_date, display_time};
use ramyro_shared::{Appointment, AppointmentStatus, Role};

fn status_badge(status: &AppointmentStatus) -> &'static str {
    match status {
        AppointmentStatus::Scheduled => "badge badge-info",
        AppointmentStatus::Completed => "badge badge-success",
        _ => "badge badge-error",
    }
}

/// 卡片上的时间文本，例如 `November 2, 2026 at 9:30 AM`
pub fn schedule_label(appointment: &Appointment) -> String {
    match appointment.scheduled_at() {
        Some(at) => format!("{} at {}", display_date(&at), display_time(&at)),
        None => appointment.appointment_date.clone(),
    }
}

#[component]
pub fn AppointmentCard(
    appointment: Appointment,
    viewer: Role,
    /// 取消按钮回调，参数为预约 ID
    on_cancel: Callback<i64>,
    /// 是否有取消请求在进行中
    #[prop(into)]
    busy: Signal<bool>,
) -> impl IntoView {
    let id = appointment.id;
    let cancellable = appointment.status.is_scheduled();
    let (counterpart_title, counterpart_name) = match viewer {
        Role::Patient => ("Doctor", appointment.doctor_name.clone()),
        Role::Doctor => ("Patient", appointment.patient_name.clone()),
    };

    view! {
        <div class="card bg-base-100 shadow-md">
            <div class="card-body p-5 gap-3">
                <div class="flex justify-between items-start">
                    <h3 class="card-title text-lg">{appointment.counterpart_label(viewer)}</h3>
                    <span class=status_badge(&appointment.status)>{appointment.status.to_string()}</span>
                </div>
                <p class="flex items-center text-sm text-base-content/70">
                    <Calendar attr:class="h-4 w-4 mr-1" />
                    {schedule_label(&appointment)}
                </p>
                <div class="flex items-start gap-2">
                    <User attr:class="h-4 w-4 mt-0.5 opacity-60" />
                    <div>
                        <p class="text-sm font-medium">{counterpart_title}</p>
                        <p class="text-sm text-base-content/70">{counterpart_name}</p>
                    </div>
                </div>
                <div class="flex items-start gap-2">
                    <FileText attr:class="h-4 w-4 mt-0.5 opacity-60" />
                    <div>
                        <p class="text-sm font-medium">"Reason"</p>
                        <p class="text-sm text-base-content/70 break-words">{appointment.reason.clone()}</p>
                    </div>
                </div>
                <Show when=move || cancellable>
                    <div class="card-actions">
                        <button
                            class="btn btn-outline btn-error btn-sm w-full"
                            disabled=move || busy.get()
                            on:click=move |_| on_cancel.run(id)
                        >
                            {move || if busy.get() { "Cancelling..." } else { "Cancel Appointment" }}
                        </button>
                    </div>
                </Show>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::appointment;

    #[test]
    fn label_uses_long_date_and_twelve_hour_clock() {
        let mut a = appointment(1, AppointmentStatus::Scheduled);
        a.appointment_date = "2026-11-02T14:05:00".into();
        assert_eq!(schedule_label(&a), "November 2, 2026 at 2:05 PM");

        a.appointment_date = "soon".into();
        assert_eq!(schedule_label(&a), "soon");
    }
}
