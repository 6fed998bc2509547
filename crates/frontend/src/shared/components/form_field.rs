use contracts::domain::common::Status;
use leptos::prelude::*;

/// Labelled form row with the field's validation message under the input.
#[component]
pub fn FormField(
    #[prop(into)]
    label: String,
    /// Message for this field, if any
    #[prop(into)]
    error: Signal<Option<String>>,
    #[prop(optional)]
    required: bool,
    children: Children,
) -> impl IntoView {
    view! {
        <div class="form__group" class:form__group--invalid=move || error.with(|e| e.is_some())>
            <label class="form__label">
                {label}
                {required.then(|| view! { <span class="form__required">"*"</span> })}
            </label>
            {children()}
            {move || error.get().map(|message| view! {
                <div class="form__error">{message}</div>
            })}
        </div>
    }
}

/// Text input bound to one string field of a form signal
pub fn text_input<F: Send + Sync + 'static>(
    form: RwSignal<F>,
    id: &'static str,
    get: fn(&F) -> &str,
    set: fn(&mut F, String),
) -> impl IntoView {
    view! {
        <input
            type="text"
            id=id
            class="form__input"
            prop:value=move || form.with(|f| get(f).to_string())
            on:input=move |ev| form.update(|f| set(f, event_target_value(&ev)))
        />
    }
}

/// Numeric input bound to an optional number field.
///
/// Keeps the raw text locally so partial input such as `0.` survives
/// re-rendering; the form field is `None` while the text does not parse.
pub fn number_input<F, T>(
    form: RwSignal<F>,
    id: &'static str,
    get: fn(&F) -> Option<T>,
    set: fn(&mut F, Option<T>),
) -> impl IntoView
where
    F: Send + Sync + 'static,
    T: std::str::FromStr + ToString + 'static,
{
    let raw = RwSignal::new(
        form.with_untracked(|f| get(f).map(|v| v.to_string()).unwrap_or_default()),
    );

    view! {
        <input
            type="text"
            inputmode="decimal"
            id=id
            class="form__input"
            prop:value=move || raw.get()
            on:input=move |ev| {
                let text = event_target_value(&ev);
                let parsed = text.trim().parse::<T>().ok();
                raw.set(text);
                form.update(|f| set(f, parsed));
            }
        />
    }
}

/// Enabled/disabled select bound to the status field of a form
pub fn status_select<F: Send + Sync + 'static>(
    form: RwSignal<F>,
    get: fn(&F) -> Status,
    set: fn(&mut F, Status),
) -> impl IntoView {
    view! {
        <select
            id="status"
            class="form__select"
            prop:value=move || form.with(|f| get(f).as_str())
            on:change=move |ev| {
                if let Some(status) = Status::parse(&event_target_value(&ev)) {
                    form.update(|f| set(f, status));
                }
            }
        >
            {Status::ALL.iter().map(|status| view! {
                <option value=status.as_str()>{status.label()}</option>
            }).collect_view()}
        </select>
    }
}
