use crate::shared::components::{number_input, status_select, text_input, FormField};
use crate::shared::list_controller::ListController;
use contracts::domain::a003_currency::CurrencyResource;
use leptos::prelude::*;

#[component]
pub fn CurrencyDetails(ctrl: ListController<CurrencyResource>) -> impl IntoView {
    let form = ctrl.form;

    view! {
        <div class="details-form">
            <FormField label="ISO code" error=ctrl.field_error("code") required=true>
                {text_input(form, "code", |f| f.code.as_str(), |f, v| f.code = v.to_uppercase())}
            </FormField>
            <FormField label="Name" error=ctrl.field_error("name") required=true>
                {text_input(form, "name", |f| f.name.as_str(), |f, v| f.name = v)}
            </FormField>
            <FormField label="Symbol" error=ctrl.field_error("symbol") required=true>
                {text_input(form, "symbol", |f| f.symbol.as_str(), |f, v| f.symbol = v)}
            </FormField>
            <FormField label="Precision" error=ctrl.field_error("precision") required=true>
                {number_input(form, "precision", |f| f.precision, |f, v| f.precision = v)}
            </FormField>
            <FormField label="Status" error=ctrl.field_error("status")>
                {status_select(form, |f| f.status, |f, s| f.status = s)}
            </FormField>
        </div>
    }
}
