use serde::{Deserialize, Serialize};

use crate::domain::common::{EntityId, FilterField, Resource, Status};
use crate::shared::validation::{is_code, non_blank, FieldError, Validate, Validator};

/// Access role assigned to operator accounts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleRow {
    pub id: EntityId,
    pub name: String,
    pub code: String,
    pub description: Option<String>,
    pub status: Status,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleForm {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<EntityId>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: Status,
}

impl RoleForm {
    pub fn description(&self) -> Option<String> {
        non_blank(&self.description)
    }
}

impl Validate for RoleForm {
    fn validate(&self) -> Result<(), Vec<FieldError>> {
        let code = self.code.trim();
        Validator::new()
            .required("name", &self.name, "Name is required")
            .max_len("name", &self.name, 64, "Name is too long")
            .required("code", code, "Code is required")
            .check(
                "code",
                is_code(code),
                "Code may contain only A-Z, 0-9 and '_'",
            )
            .max_len("code", code, 32, "Code is too long")
            .max_len("description", &self.description, 255, "Description is too long")
            .finish()
    }
}

const FILTER_FIELDS: &[FilterField] = &[
    FilterField::text("name", "Name"),
    FilterField::text("code", "Code"),
    FilterField::status(),
];

pub struct RoleResource;

impl Resource for RoleResource {
    type Row = RoleRow;
    type Form = RoleForm;

    fn aggregate_index() -> &'static str {
        "a002"
    }

    fn collection_name() -> &'static str {
        "role"
    }

    fn element_name() -> &'static str {
        "Role"
    }

    fn list_name() -> &'static str {
        "Roles"
    }

    fn filter_fields() -> &'static [FilterField] {
        FILTER_FIELDS
    }

    fn row_id(row: &RoleRow) -> EntityId {
        row.id
    }

    fn row_status(row: &RoleRow) -> Status {
        row.status
    }

    fn row_created_at(row: &RoleRow) -> &str {
        &row.created_at
    }

    fn row_updated_at(row: &RoleRow) -> &str {
        &row.updated_at
    }

    fn row_label(row: &RoleRow) -> String {
        format!("{} ({})", row.name, row.code)
    }

    fn form_from_row(row: &RoleRow) -> RoleForm {
        RoleForm {
            id: Some(row.id),
            name: row.name.clone(),
            code: row.code.clone(),
            description: row.description.clone().unwrap_or_default(),
            status: row.status,
        }
    }

    fn form_id(form: &RoleForm) -> Option<EntityId> {
        form.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::validation::message_for;

    #[test]
    fn code_must_be_uppercase() {
        let form = RoleForm {
            name: "Admins".into(),
            code: "admin".into(),
            ..Default::default()
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(
            message_for(&errors, "code"),
            Some("Code may contain only A-Z, 0-9 and '_'")
        );
    }

    #[test]
    fn update_form_keeps_id() {
        let row = RoleRow {
            id: 4,
            name: "Support".into(),
            code: "SUPPORT".into(),
            description: None,
            status: Status::Disabled,
            created_at: String::new(),
            updated_at: String::new(),
        };
        let form = RoleResource::form_from_row(&row);
        assert_eq!(RoleResource::form_id(&form), Some(4));
        assert_eq!(form.status, Status::Disabled);
        assert!(form.validate().is_ok());
    }
}
