use super::details::PaymentMethodDetails;
use crate::shared::list_controller::ListController;
use crate::shared::list_page::{list_page, ListColumns};
use contracts::domain::a005_payment_method::{PaymentMethodResource, PaymentMethodRow};
use leptos::prelude::*;
use thaw::*;

/// Fee fraction as a percentage, e.g. 0.015 -> "1.5%"
fn format_fee(rate: f64) -> String {
    let percent = format!("{:.4}", rate * 100.0);
    let percent = percent.trim_end_matches('0').trim_end_matches('.');
    format!("{}%", percent)
}

fn cells(row: &PaymentMethodRow) -> AnyView {
    let name = row.name.clone();
    let code = row.code.clone();
    let currency_code = row.currency_code.clone();
    let fee = format_fee(row.fee_rate);
    let sort_order = row.sort_order;
    view! {
        <TableCell><TableCellLayout truncate=true>{name}</TableCellLayout></TableCell>
        <TableCell><TableCellLayout><code>{code}</code></TableCellLayout></TableCell>
        <TableCell><TableCellLayout>{currency_code}</TableCellLayout></TableCell>
        <TableCell class="table__cell--right"><TableCellLayout>{fee}</TableCellLayout></TableCell>
        <TableCell class="table__cell--right"><TableCellLayout>{sort_order}</TableCellLayout></TableCell>
    }
    .into_any()
}

#[component]
pub fn PaymentMethodList() -> impl IntoView {
    let ctrl = ListController::<PaymentMethodResource>::new();

    list_page(
        ctrl,
        ListColumns {
            headers: &["Name", "Code", "Currency", "Fee", "Sort"],
            cells,
        },
        |ctrl| view! { <PaymentMethodDetails ctrl=ctrl /> }.into_any(),
    )
}

#[cfg(test)]
mod tests {
    use super::format_fee;

    #[test]
    fn fee_as_percent() {
        assert_eq!(format_fee(0.015), "1.5%");
        assert_eq!(format_fee(0.0), "0%");
        assert_eq!(format_fee(1.0), "100%");
        assert_eq!(format_fee(0.0125), "1.25%");
    }
}
