//! Typed calls against `/manage/{resource}/...`, generic over the resource
//! and the transport.

use contracts::domain::common::{EntityId, Endpoint, Resource, Status};
use contracts::shared::envelope::{
    ChangeStatusRequest, DeleteResponse, IdListRequest, IdRequest, PageEnvelope,
};
use contracts::shared::paging::PageQuery;
use contracts::shared::query::{build_query, SearchParams};
use contracts::shared::validation::{FieldError, Validate};
use std::fmt;

use super::api_client::{ApiError, Transport};

/// Why a create/update did not go through
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitError {
    /// Rejected locally; nothing was sent
    Invalid(Vec<FieldError>),
    Api(ApiError),
}

impl SubmitError {
    /// Field messages to render under the inputs, from either side
    pub fn field_errors(&self) -> &[FieldError] {
        match self {
            SubmitError::Invalid(errors) => errors,
            SubmitError::Api(err) => &err.field_errors,
        }
    }
}

impl fmt::Display for SubmitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubmitError::Invalid(errors) => write!(f, "{} field(s) need attention", errors.len()),
            SubmitError::Api(err) => write!(f, "{}", err),
        }
    }
}

/// `GET /page` with paging and the non-empty filters
pub async fn fetch_page<R: Resource, C: Transport>(
    client: &C,
    params: &SearchParams,
    page: PageQuery,
) -> Result<PageEnvelope<R::Row>, ApiError> {
    let path = format!(
        "{}{}",
        R::endpoint(Endpoint::Page),
        build_query(&params.to_page_params(page))
    );
    client.get(&path).await
}

/// `GET /list`: every row, for selects
pub async fn fetch_all<R: Resource, C: Transport>(client: &C) -> Result<Vec<R::Row>, ApiError> {
    client.get(&R::endpoint(Endpoint::List)).await
}

/// Validates the form and, only if it passes, sends `create` (no id) or
/// `update` (with id).
pub async fn submit_form<R: Resource, C: Transport>(
    client: &C,
    form: &R::Form,
) -> Result<R::Row, SubmitError> {
    form.validate().map_err(SubmitError::Invalid)?;

    let endpoint = match R::form_id(form) {
        Some(_) => Endpoint::Update,
        None => Endpoint::Create,
    };
    client
        .post(&R::endpoint(endpoint), form)
        .await
        .map_err(SubmitError::Api)
}

pub async fn change_status<R: Resource, C: Transport>(
    client: &C,
    id: EntityId,
    status: Status,
) -> Result<ChangeStatusRequest, ApiError> {
    client
        .post(
            &R::endpoint(Endpoint::ChangeStatus),
            &ChangeStatusRequest { id, status },
        )
        .await
}

pub async fn remove<R: Resource, C: Transport>(
    client: &C,
    id: EntityId,
) -> Result<DeleteResponse, ApiError> {
    client
        .post(&R::endpoint(Endpoint::Remove), &IdRequest { id })
        .await
}

/// One `delete-batch` call for all `ids`, then `refetch` exactly once on
/// success. An empty list sends nothing and does not refetch (`Ok(None)`).
/// Confirmation is the caller's business.
pub async fn delete_batch<R: Resource, C: Transport, F: FnOnce()>(
    client: &C,
    ids: &[EntityId],
    refetch: F,
) -> Result<Option<DeleteResponse>, ApiError> {
    if ids.is_empty() {
        return Ok(None);
    }

    let body = IdListRequest {
        id_list: ids.to_vec(),
    };
    let response: DeleteResponse = client
        .post(&R::endpoint(Endpoint::DeleteBatch), &body)
        .await?;
    refetch();
    Ok(Some(response))
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use serde::de::DeserializeOwned;
    use serde::Serialize;
    use serde_json::Value;
    use std::cell::RefCell;
    use std::collections::VecDeque;
    use std::rc::Rc;

    #[derive(Debug, Clone, PartialEq)]
    pub struct Call {
        pub method: &'static str,
        pub path: String,
        pub body: Option<Value>,
    }

    /// Records calls and answers them from a queue of canned responses
    #[derive(Clone, Default)]
    pub struct FakeTransport {
        pub calls: Rc<RefCell<Vec<Call>>>,
        responses: Rc<RefCell<VecDeque<Result<Value, ApiError>>>>,
    }

    impl FakeTransport {
        pub fn respond(&self, response: Result<Value, ApiError>) -> &Self {
            self.responses.borrow_mut().push_back(response);
            self
        }

        pub fn calls(&self) -> Vec<Call> {
            self.calls.borrow().clone()
        }

        fn answer<T: DeserializeOwned>(&self) -> Result<T, ApiError> {
            let next = self
                .responses
                .borrow_mut()
                .pop_front()
                .unwrap_or_else(|| Err(ApiError::network("no canned response")));
            next.and_then(|value| {
                serde_json::from_value(value).map_err(|e| ApiError::new(200, e.to_string()))
            })
        }
    }

    impl Transport for FakeTransport {
        async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
            self.calls.borrow_mut().push(Call {
                method: "GET",
                path: path.to_string(),
                body: None,
            });
            self.answer()
        }

        async fn post<B: Serialize, T: DeserializeOwned>(
            &self,
            path: &str,
            body: &B,
        ) -> Result<T, ApiError> {
            self.calls.borrow_mut().push(Call {
                method: "POST",
                path: path.to_string(),
                body: serde_json::to_value(body).ok(),
            });
            self.answer()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::FakeTransport;
    use super::*;
    use crate::shared::list_controller::settle_batch_delete;
    use crate::shared::selection::Selection;
    use contracts::domain::a002_role::{RoleForm, RoleResource};
    use contracts::domain::a003_currency::{CurrencyForm, CurrencyResource};
    use contracts::shared::validation::message_for;
    use serde_json::json;
    use std::cell::Cell;

    fn role_json(id: i64, code: &str) -> serde_json::Value {
        json!({
            "id": id,
            "name": format!("Role {}", id),
            "code": code,
            "description": null,
            "status": "ENABLED",
            "createdAt": "2026-01-05T10:00:00Z",
            "updatedAt": "2026-01-05T10:00:00Z"
        })
    }

    #[tokio::test]
    async fn page_request_carries_paging_and_filters() {
        let client = FakeTransport::default();
        client.respond(Ok(json!({ "data": [role_json(1, "ADMIN")], "totalNum": 21 })));

        let mut params = SearchParams::new();
        params.set("code", Some(" ADM ".into()));
        params.set("name", Some("".into()));
        params.set("status", None);

        let page = fetch_page::<RoleResource, _>(&client, &params, PageQuery::new(3, 10))
            .await
            .unwrap();
        assert_eq!(page.total_num, 21);
        assert_eq!(page.data[0].code, "ADMIN");

        let calls = client.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(
            calls[0].path,
            "/manage/role/page?code=ADM&currentPage=3&pageSize=10"
        );
    }

    #[tokio::test]
    async fn invalid_form_is_never_sent() {
        let client = FakeTransport::default();
        let form = CurrencyForm {
            code: "USD".into(),
            symbol: "$".into(),
            precision: Some(2),
            ..Default::default()
        };

        let err = submit_form::<CurrencyResource, _>(&client, &form)
            .await
            .unwrap_err();
        assert_eq!(message_for(err.field_errors(), "name"), Some("Name is required"));
        assert!(matches!(err, SubmitError::Invalid(_)));
        assert!(client.calls().is_empty());
    }

    #[tokio::test]
    async fn submit_picks_create_or_update() {
        let client = FakeTransport::default();
        client
            .respond(Ok(role_json(9, "SUPPORT")))
            .respond(Ok(role_json(9, "SUPPORT")));

        let mut form = RoleForm {
            name: "Support".into(),
            code: "SUPPORT".into(),
            ..Default::default()
        };
        submit_form::<RoleResource, _>(&client, &form).await.unwrap();
        form.id = Some(9);
        submit_form::<RoleResource, _>(&client, &form).await.unwrap();

        let calls = client.calls();
        assert_eq!(calls[0].path, "/manage/role/create");
        assert!(calls[0].body.as_ref().unwrap().get("id").is_none());
        assert_eq!(calls[1].path, "/manage/role/update");
        assert_eq!(calls[1].body.as_ref().unwrap()["id"], 9);
    }

    #[tokio::test]
    async fn server_field_errors_are_kept() {
        let client = FakeTransport::default();
        let mut rejected = ApiError::new(409, "Code already exists");
        rejected.field_errors = vec![FieldError::new("code", "Code already exists")];
        client.respond(Err(rejected));

        let form = RoleForm {
            name: "Admins".into(),
            code: "ADMIN".into(),
            ..Default::default()
        };
        let err = submit_form::<RoleResource, _>(&client, &form)
            .await
            .unwrap_err();
        assert_eq!(message_for(err.field_errors(), "code"), Some("Code already exists"));
    }

    #[tokio::test]
    async fn batch_delete_refetches_once_and_clears_selection() {
        let client = FakeTransport::default();
        client.respond(Ok(json!({ "deleted": 2 })));

        let mut selection = Selection::new();
        selection.replace_page(vec![1, 2, 3]);
        selection.toggle(&1, true);
        selection.toggle(&3, true);

        let refetches = Cell::new(0);
        let ids = selection.checked_ids();
        let result = delete_batch::<RoleResource, _, _>(&client, &ids, || {
            refetches.set(refetches.get() + 1)
        })
        .await;
        assert!(settle_batch_delete(&mut selection, &result));

        assert_eq!(result, Ok(Some(DeleteResponse { deleted: 2 })));
        assert_eq!(refetches.get(), 1);
        assert!(selection.is_empty());

        let calls = client.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].path, "/manage/role/delete-batch");
        assert_eq!(calls[0].body, Some(json!({ "idList": [1, 3] })));
    }

    #[tokio::test]
    async fn empty_batch_delete_is_a_no_op() {
        let client = FakeTransport::default();
        let refetches = Cell::new(0);

        let result = delete_batch::<RoleResource, _, _>(&client, &[], || {
            refetches.set(refetches.get() + 1)
        })
        .await
        .unwrap();

        assert_eq!(result, None);
        assert_eq!(refetches.get(), 0);
        assert!(client.calls().is_empty());
    }

    #[tokio::test]
    async fn failed_batch_delete_does_not_refetch() {
        let client = FakeTransport::default();
        client.respond(Err(ApiError::new(500, "Database error")));
        let refetches = Cell::new(0);

        let result = delete_batch::<RoleResource, _, _>(&client, &[4], || {
            refetches.set(refetches.get() + 1)
        })
        .await;

        assert!(result.is_err());
        assert_eq!(refetches.get(), 0);
    }

    #[tokio::test]
    async fn status_and_remove_bodies() {
        let client = FakeTransport::default();
        client
            .respond(Ok(json!({ "id": 5, "status": "DISABLED" })))
            .respond(Ok(json!({ "deleted": 1 })));

        let changed = change_status::<CurrencyResource, _>(&client, 5, Status::Disabled)
            .await
            .unwrap();
        assert_eq!(changed.status, Status::Disabled);
        remove::<CurrencyResource, _>(&client, 5).await.unwrap();

        let calls = client.calls();
        assert_eq!(calls[0].path, "/manage/currency/change-status");
        assert_eq!(calls[0].body, Some(json!({ "id": 5, "status": "DISABLED" })));
        assert_eq!(calls[1].path, "/manage/currency/remove");
        assert_eq!(calls[1].body, Some(json!({ "id": 5 })));
    }
}
