use crate::shared::api_client::HttpClient;
use crate::shared::components::{status_select, text_input, FormField};
use crate::shared::list_controller::ListController;
use crate::shared::manage_api;
use contracts::domain::a001_user::UserResource;
use contracts::domain::a002_role::{RoleResource, RoleRow};
use leptos::prelude::*;
use leptos::task::spawn_local;

/// Create/update form of an operator account. Roles for the select are
/// loaded from `/manage/role/list` when the form opens.
#[component]
pub fn UserDetails(ctrl: ListController<UserResource>) -> impl IntoView {
    let form = ctrl.form;
    let roles = RwSignal::new(Vec::<RoleRow>::new());

    let client = HttpClient::from_context();
    spawn_local(async move {
        if let Ok(list) = manage_api::fetch_all::<RoleResource, _>(&client).await {
            roles.set(list);
        }
    });

    view! {
        <div class="details-form">
            <FormField label="Username" error=ctrl.field_error("username") required=true>
                {text_input(form, "username", |f| f.username.as_str(), |f, v| f.username = v)}
            </FormField>
            <FormField label="Nickname" error=ctrl.field_error("nickname")>
                {text_input(form, "nickname", |f| f.nickname.as_str(), |f, v| f.nickname = v)}
            </FormField>
            <FormField label="E-mail" error=ctrl.field_error("email")>
                {text_input(form, "email", |f| f.email.as_str(), |f, v| f.email = v)}
            </FormField>
            <FormField label="Phone" error=ctrl.field_error("phone")>
                {text_input(form, "phone", |f| f.phone.as_str(), |f, v| f.phone = v)}
            </FormField>
            <FormField label="Role" error=ctrl.field_error("roleId")>
                <select
                    id="roleId"
                    class="form__select"
                    prop:value=move || form.with(|f| f.role_id.map(|id| id.to_string()).unwrap_or_default())
                    on:change=move |ev| {
                        let role_id = event_target_value(&ev).parse().ok();
                        form.update(|f| f.role_id = role_id);
                    }
                >
                    <option value="">"No role"</option>
                    <For
                        each=move || roles.get()
                        key=|role| role.id
                        children=move |role| {
                            let id = role.id;
                            view! {
                                <option
                                    value=id.to_string()
                                    selected=move || form.with(|f| f.role_id == Some(id))
                                >
                                    {format!("{} ({})", role.name, role.code)}
                                </option>
                            }
                        }
                    />
                </select>
            </FormField>
            <FormField label="Status" error=ctrl.field_error("status")>
                {status_select(form, |f| f.status, |f, s| f.status = s)}
            </FormField>
        </div>
    }
}
