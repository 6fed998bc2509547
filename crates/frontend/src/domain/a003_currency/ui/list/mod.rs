use super::details::CurrencyDetails;
use crate::shared::list_controller::ListController;
use crate::shared::list_page::{list_page, ListColumns};
use contracts::domain::a003_currency::{CurrencyResource, CurrencyRow};
use leptos::prelude::*;
use thaw::*;

fn cells(row: &CurrencyRow) -> AnyView {
    let code = row.code.clone();
    let name = row.name.clone();
    let symbol = row.symbol.clone();
    let precision = row.precision;
    view! {
        <TableCell><TableCellLayout><code>{code}</code></TableCellLayout></TableCell>
        <TableCell><TableCellLayout truncate=true>{name}</TableCellLayout></TableCell>
        <TableCell><TableCellLayout>{symbol}</TableCellLayout></TableCell>
        <TableCell class="table__cell--right"><TableCellLayout>{precision}</TableCellLayout></TableCell>
    }
    .into_any()
}

#[component]
pub fn CurrencyList() -> impl IntoView {
    let ctrl = ListController::<CurrencyResource>::new();

    list_page(
        ctrl,
        ListColumns {
            headers: &["Code", "Name", "Symbol", "Precision"],
            cells,
        },
        |ctrl| view! { <CurrencyDetails ctrl=ctrl /> }.into_any(),
    )
}
