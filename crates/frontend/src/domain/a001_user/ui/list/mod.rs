use super::details::UserDetails;
use crate::shared::list_controller::ListController;
use crate::shared::list_page::{list_page, ListColumns};
use contracts::domain::a001_user::{UserResource, UserRow};
use leptos::prelude::*;
use thaw::*;

fn cells(row: &UserRow) -> AnyView {
    let text = |v: &Option<String>| v.clone().unwrap_or_else(|| "-".to_string());
    let username = row.username.clone();
    let nickname = text(&row.nickname);
    let email = text(&row.email);
    let phone = text(&row.phone);
    view! {
        <TableCell><TableCellLayout truncate=true>{username}</TableCellLayout></TableCell>
        <TableCell><TableCellLayout truncate=true>{nickname}</TableCellLayout></TableCell>
        <TableCell><TableCellLayout truncate=true>{email}</TableCellLayout></TableCell>
        <TableCell><TableCellLayout>{phone}</TableCellLayout></TableCell>
    }
    .into_any()
}

#[component]
pub fn UserList() -> impl IntoView {
    let ctrl = ListController::<UserResource>::new();

    list_page(
        ctrl,
        ListColumns {
            headers: &["Username", "Nickname", "E-mail", "Phone"],
            cells,
        },
        |ctrl| view! { <UserDetails ctrl=ctrl /> }.into_any(),
    )
}
