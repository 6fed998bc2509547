use serde::{Deserialize, Serialize};

use crate::domain::common::{EntityId, Status};
use crate::shared::validation::FieldError;

/// One page of rows as returned by `GET /manage/{resource}/page`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageEnvelope<T> {
    pub data: Vec<T>,
    #[serde(rename = "totalNum")]
    pub total_num: u64,
}

impl<T> PageEnvelope<T> {
    pub fn new(data: Vec<T>, total_num: u64) -> Self {
        Self { data, total_num }
    }
}

impl<T> Default for PageEnvelope<T> {
    fn default() -> Self {
        Self {
            data: Vec::new(),
            total_num: 0,
        }
    }
}

/// Body of `remove`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdRequest {
    pub id: EntityId,
}

/// Body and response of `change-status`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeStatusRequest {
    pub id: EntityId,
    pub status: Status,
}

/// Body of `delete-batch`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdListRequest {
    #[serde(rename = "idList")]
    pub id_list: Vec<EntityId>,
}

/// Response of `remove` and `delete-batch`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub deleted: u64,
}

/// Body of every non-2xx `/manage` response
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
    #[serde(rename = "fieldErrors", default, skip_serializing_if = "Vec::is_empty")]
    pub field_errors: Vec<FieldError>,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            field_errors: Vec::new(),
        }
    }

    pub fn with_fields(message: impl Into<String>, field_errors: Vec<FieldError>) -> Self {
        Self {
            message: message.into(),
            field_errors,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn page_envelope_uses_total_num_key() {
        let page: PageEnvelope<i64> =
            serde_json::from_value(json!({ "data": [1, 2], "totalNum": 12 })).unwrap();
        assert_eq!(page.data, vec![1, 2]);
        assert_eq!(page.total_num, 12);
    }

    #[test]
    fn id_list_request_wire_shape() {
        let body = IdListRequest {
            id_list: vec![3, 5],
        };
        assert_eq!(serde_json::to_value(&body).unwrap(), json!({ "idList": [3, 5] }));
    }

    #[test]
    fn error_body_without_field_errors() {
        let body: ErrorBody = serde_json::from_value(json!({ "message": "nope" })).unwrap();
        assert_eq!(body, ErrorBody::new("nope"));
        assert_eq!(serde_json::to_value(&body).unwrap(), json!({ "message": "nope" }));
    }
}
