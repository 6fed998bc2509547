use super::details::RoleDetails;
use crate::shared::list_controller::ListController;
use crate::shared::list_page::{list_page, ListColumns};
use contracts::domain::a002_role::{RoleResource, RoleRow};
use leptos::prelude::*;
use thaw::*;

fn cells(row: &RoleRow) -> AnyView {
    let name = row.name.clone();
    let code = row.code.clone();
    let description = row.description.clone().unwrap_or_default();
    view! {
        <TableCell><TableCellLayout truncate=true>{name}</TableCellLayout></TableCell>
        <TableCell><TableCellLayout><code>{code}</code></TableCellLayout></TableCell>
        <TableCell>
            <TableCellLayout truncate=true>{description}</TableCellLayout>
        </TableCell>
    }
    .into_any()
}

#[component]
pub fn RoleList() -> impl IntoView {
    let ctrl = ListController::<RoleResource>::new();

    list_page(
        ctrl,
        ListColumns {
            headers: &["Name", "Code", "Description"],
            cells,
        },
        |ctrl| view! { <RoleDetails ctrl=ctrl /> }.into_any(),
    )
}
