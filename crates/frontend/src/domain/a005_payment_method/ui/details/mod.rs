use crate::shared::api_client::HttpClient;
use crate::shared::components::{number_input, status_select, text_input, FormField};
use crate::shared::list_controller::ListController;
use crate::shared::manage_api;
use contracts::domain::a003_currency::{CurrencyResource, CurrencyRow};
use contracts::domain::a005_payment_method::PaymentMethodResource;
use leptos::prelude::*;
use leptos::task::spawn_local;

/// Create/update form of a payment method. The currency select offers the
/// currencies from `/manage/currency/list`.
#[component]
pub fn PaymentMethodDetails(ctrl: ListController<PaymentMethodResource>) -> impl IntoView {
    let form = ctrl.form;
    let currencies = RwSignal::new(Vec::<CurrencyRow>::new());

    let client = HttpClient::from_context();
    spawn_local(async move {
        if let Ok(list) = manage_api::fetch_all::<CurrencyResource, _>(&client).await {
            currencies.set(list);
        }
    });

    view! {
        <div class="details-form">
            <FormField label="Name" error=ctrl.field_error("name") required=true>
                {text_input(form, "name", |f| f.name.as_str(), |f, v| f.name = v)}
            </FormField>
            <FormField label="Code" error=ctrl.field_error("code") required=true>
                {text_input(form, "code", |f| f.code.as_str(), |f, v| f.code = v.to_uppercase())}
            </FormField>
            <FormField label="Currency" error=ctrl.field_error("currencyCode") required=true>
                <select
                    id="currencyCode"
                    class="form__select"
                    prop:value=move || form.with(|f| f.currency_code.clone())
                    on:change=move |ev| form.update(|f| f.currency_code = event_target_value(&ev))
                >
                    <option value="">"Select currency"</option>
                    <For
                        each=move || currencies.get()
                        key=|currency| currency.id
                        children=move |currency| {
                            let code = currency.code.clone();
                            let selected = {
                                let code = code.clone();
                                move || form.with(|f| f.currency_code == code)
                            };
                            view! {
                                <option value=code.clone() selected=selected>
                                    {format!("{} ({})", currency.name, code)}
                                </option>
                            }
                        }
                    />
                </select>
            </FormField>
            <FormField label="Fee rate (0..1)" error=ctrl.field_error("feeRate") required=true>
                {number_input(form, "feeRate", |f| f.fee_rate, |f, v| f.fee_rate = v)}
            </FormField>
            <FormField label="Sort order" error=ctrl.field_error("sortOrder") required=true>
                {number_input(form, "sortOrder", |f| f.sort_order, |f, v| f.sort_order = v)}
            </FormField>
            <FormField label="Status" error=ctrl.field_error("status")>
                {status_select(form, |f| f.status, |f, s| f.status = s)}
            </FormField>
        </div>
    }
}
