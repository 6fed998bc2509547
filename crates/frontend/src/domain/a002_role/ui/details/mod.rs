use crate::shared::components::{status_select, text_input, FormField};
use crate::shared::list_controller::ListController;
use contracts::domain::a002_role::RoleResource;
use leptos::prelude::*;

#[component]
pub fn RoleDetails(ctrl: ListController<RoleResource>) -> impl IntoView {
    let form = ctrl.form;

    view! {
        <div class="details-form">
            <FormField label="Name" error=ctrl.field_error("name") required=true>
                {text_input(form, "name", |f| f.name.as_str(), |f, v| f.name = v)}
            </FormField>
            // Upper-case as typed; codes are A-Z, 0-9 and '_'
            <FormField label="Code" error=ctrl.field_error("code") required=true>
                {text_input(form, "code", |f| f.code.as_str(), |f, v| f.code = v.to_uppercase())}
            </FormField>
            <FormField label="Description" error=ctrl.field_error("description")>
                <textarea
                    id="description"
                    class="form__textarea"
                    rows="3"
                    prop:value=move || form.with(|f| f.description.clone())
                    on:input=move |ev| form.update(|f| f.description = event_target_value(&ev))
                />
            </FormField>
            <FormField label="Status" error=ctrl.field_error("status")>
                {status_select(form, |f| f.status, |f, s| f.status = s)}
            </FormField>
        </div>
    }
}
