use crate::shared::components::{number_input, status_select, text_input, FormField};
use crate::shared::list_controller::ListController;
use contracts::domain::a004_crypto_asset::CryptoAssetResource;
use leptos::prelude::*;

#[component]
pub fn CryptoAssetDetails(ctrl: ListController<CryptoAssetResource>) -> impl IntoView {
    let form = ctrl.form;

    view! {
        <div class="details-form">
            <FormField label="Symbol" error=ctrl.field_error("symbol") required=true>
                {text_input(form, "symbol", |f| f.symbol.as_str(), |f, v| f.symbol = v.to_uppercase())}
            </FormField>
            <FormField label="Name" error=ctrl.field_error("name") required=true>
                {text_input(form, "name", |f| f.name.as_str(), |f, v| f.name = v)}
            </FormField>
            <FormField label="Chain" error=ctrl.field_error("chain") required=true>
                {text_input(form, "chain", |f| f.chain.as_str(), |f, v| f.chain = v)}
            </FormField>
            <FormField label="Contract address" error=ctrl.field_error("contractAddress")>
                {text_input(
                    form,
                    "contractAddress",
                    |f| f.contract_address.as_str(),
                    |f, v| f.contract_address = v,
                )}
            </FormField>
            <FormField label="Decimals" error=ctrl.field_error("decimals") required=true>
                {number_input(form, "decimals", |f| f.decimals, |f, v| f.decimals = v)}
            </FormField>
            <FormField label="Status" error=ctrl.field_error("status")>
                {status_select(form, |f| f.status, |f, s| f.status = s)}
            </FormField>
        </div>
    }
}
