use serde::{Deserialize, Serialize};

use crate::domain::common::{EntityId, FilterField, Resource, Status};
use crate::shared::validation::{non_blank, FieldError, Validate, Validator};

// ============================================================================
// Row
// ============================================================================

/// Back-office operator account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRow {
    pub id: EntityId,
    pub username: String,
    pub nickname: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub role_id: Option<EntityId>,
    pub status: Status,
    pub created_at: String,
    pub updated_at: String,
}

// ============================================================================
// Form
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserForm {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<EntityId>,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub nickname: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub role_id: Option<EntityId>,
    #[serde(default)]
    pub status: Status,
}

impl UserForm {
    pub fn nickname(&self) -> Option<String> {
        non_blank(&self.nickname)
    }

    pub fn email(&self) -> Option<String> {
        non_blank(&self.email)
    }

    pub fn phone(&self) -> Option<String> {
        non_blank(&self.phone)
    }
}

fn is_username(value: &str) -> bool {
    value
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.')
}

impl Validate for UserForm {
    fn validate(&self) -> Result<(), Vec<FieldError>> {
        let username = self.username.trim();
        Validator::new()
            .required("username", username, "Username is required")
            .check(
                "username",
                (3..=32).contains(&username.chars().count()),
                "Username must be 3 to 32 characters",
            )
            .check(
                "username",
                is_username(username),
                "Only latin letters, digits, '_' and '.' are allowed",
            )
            .max_len("nickname", &self.nickname, 64, "Nickname is too long")
            .email("email", &self.email, "E-mail is not valid")
            .max_len("phone", &self.phone, 32, "Phone is too long")
            .finish()
    }
}

// ============================================================================
// Resource
// ============================================================================

const FILTER_FIELDS: &[FilterField] = &[
    FilterField::text("username", "Username"),
    FilterField::text("email", "E-mail"),
    FilterField::status(),
];

pub struct UserResource;

impl Resource for UserResource {
    type Row = UserRow;
    type Form = UserForm;

    fn aggregate_index() -> &'static str {
        "a001"
    }

    fn collection_name() -> &'static str {
        "user"
    }

    fn element_name() -> &'static str {
        "User"
    }

    fn list_name() -> &'static str {
        "Users"
    }

    fn filter_fields() -> &'static [FilterField] {
        FILTER_FIELDS
    }

    fn row_id(row: &UserRow) -> EntityId {
        row.id
    }

    fn row_status(row: &UserRow) -> Status {
        row.status
    }

    fn row_created_at(row: &UserRow) -> &str {
        &row.created_at
    }

    fn row_updated_at(row: &UserRow) -> &str {
        &row.updated_at
    }

    fn row_label(row: &UserRow) -> String {
        row.username.clone()
    }

    fn form_from_row(row: &UserRow) -> UserForm {
        UserForm {
            id: Some(row.id),
            username: row.username.clone(),
            nickname: row.nickname.clone().unwrap_or_default(),
            email: row.email.clone().unwrap_or_default(),
            phone: row.phone.clone().unwrap_or_default(),
            role_id: row.role_id,
            status: row.status,
        }
    }

    fn form_id(form: &UserForm) -> Option<EntityId> {
        form.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::common::Endpoint;
    use crate::shared::validation::message_for;

    #[test]
    fn missing_username_is_reported() {
        let errors = UserForm::default().validate().unwrap_err();
        assert_eq!(message_for(&errors, "username"), Some("Username is required"));
    }

    #[test]
    fn valid_form_passes() {
        let form = UserForm {
            username: "alice_01".into(),
            email: "alice@example.com".into(),
            ..Default::default()
        };
        assert!(form.validate().is_ok());
        assert_eq!(form.nickname(), None);
        assert_eq!(form.email().as_deref(), Some("alice@example.com"));
    }

    #[test]
    fn bad_email_and_username() {
        let form = UserForm {
            username: "al ice".into(),
            email: "alice".into(),
            ..Default::default()
        };
        let errors = form.validate().unwrap_err();
        assert!(message_for(&errors, "username").is_some());
        assert_eq!(message_for(&errors, "email"), Some("E-mail is not valid"));
    }

    #[test]
    fn create_form_omits_id() {
        let json = serde_json::to_value(UserForm::default()).unwrap();
        assert!(json.get("id").is_none());
        assert_eq!(json["status"], "ENABLED");
        assert!(json.get("roleId").is_some());
    }

    #[test]
    fn paths() {
        assert_eq!(UserResource::full_name(), "a001_user");
        assert_eq!(UserResource::endpoint(Endpoint::Page), "/manage/user/page");
        assert_eq!(
            UserResource::endpoint(Endpoint::Detail(7)),
            "/manage/user/detail/7"
        );
    }
}
