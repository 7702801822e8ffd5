//! 表单输入控件
//!
//! 输入框与字段错误绑定：用户修改字段时清除该字段的错误。

use leptos::prelude::*;
use ramyro_shared::validation::{Field, ValidationErrors};

#[component]
pub fn FieldError(errors: RwSignal<ValidationErrors>, field: Field) -> impl IntoView {
    move || {
        errors.with(|e| {
            e.get(field)
                .map(|message| view! { <p class="text-sm text-error mt-1">{message.to_string()}</p> })
        })
    }
}

#[component]
pub fn TextField(
    #[prop(into)] label: String,
    field: Field,
    value: RwSignal<String>,
    errors: RwSignal<ValidationErrors>,
    #[prop(optional)] input_type: Option<&'static str>,
    #[prop(optional, into)] placeholder: String,
    #[prop(optional, into)] disabled: Option<Signal<bool>>,
    #[prop(optional)] readonly: bool,
) -> impl IntoView {
    let id = field.name();
    let class = move || {
        if errors.with(|e| e.contains(field)) {
            "input input-bordered input-error w-full"
        } else {
            "input input-bordered w-full"
        }
    };

    view! {
        <div class="form-control">
            <label class="label" for=id>
                <span class="label-text">{label}</span>
            </label>
            <input
                id=id
                name=id
                type=input_type.unwrap_or("text")
                placeholder=placeholder
                class=class
                prop:value=move || value.get()
                on:input=move |ev| {
                    value.set(event_target_value(&ev));
                    errors.update(|e| e.clear(field));
                }
                disabled=move || disabled.is_some_and(|d| d.get())
                readonly=readonly
            />
            <FieldError errors=errors field=field />
        </div>
    }
}
