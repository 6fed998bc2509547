use super::resource::EntityId;

/// Operations exposed under `/manage/{resource}`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Page,
    List,
    Detail(EntityId),
    Create,
    Update,
    ChangeStatus,
    Remove,
    DeleteBatch,
}

impl Endpoint {
    /// Path relative to the resource base path, starting with `/`
    pub fn path(&self) -> String {
        match self {
            Endpoint::Page => "/page".to_string(),
            Endpoint::List => "/list".to_string(),
            Endpoint::Detail(id) => format!("/detail/{}", id),
            Endpoint::Create => "/create".to_string(),
            Endpoint::Update => "/update".to_string(),
            Endpoint::ChangeStatus => "/change-status".to_string(),
            Endpoint::Remove => "/remove".to_string(),
            Endpoint::DeleteBatch => "/delete-batch".to_string(),
        }
    }
}
