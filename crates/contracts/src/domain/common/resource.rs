use serde::{de::DeserializeOwned, Serialize};
use std::fmt::Debug;

use super::{Endpoint, FilterField, Status};
use crate::shared::validation::Validate;

/// Primary key of every managed record
pub type EntityId = i64;

/// A resource managed through `/manage/{route_segment}`.
///
/// Implemented by a zero-sized marker per entity. Ties together the row type
/// shown in the table, the form type edited in the modal, and the static
/// metadata the console and the server both need.
pub trait Resource: Send + Sync + 'static {
    /// Row as returned by `page`, `list` and `detail`
    type Row: Clone + PartialEq + Debug + Serialize + DeserializeOwned + Send + Sync + 'static;

    /// Body of `create` (without id) and `update` (with id)
    type Form: Clone
        + Default
        + PartialEq
        + Debug
        + Serialize
        + DeserializeOwned
        + Validate
        + Send
        + Sync
        + 'static;

    // ============================================================================
    // Static metadata
    // ============================================================================

    /// Index in the system (e.g. "a001")
    fn aggregate_index() -> &'static str;

    /// Table/collection name (e.g. "crypto_asset")
    fn collection_name() -> &'static str;

    /// Singular UI name (e.g. "Crypto asset")
    fn element_name() -> &'static str;

    /// Plural UI name (e.g. "Crypto assets")
    fn list_name() -> &'static str;

    fn filter_fields() -> &'static [FilterField];

    // ============================================================================
    // Row / form accessors
    // ============================================================================

    fn row_id(row: &Self::Row) -> EntityId;

    fn row_status(row: &Self::Row) -> Status;

    /// RFC 3339 creation timestamp
    fn row_created_at(row: &Self::Row) -> &str;

    /// Changes on every write; with the id it identifies a row version
    fn row_updated_at(row: &Self::Row) -> &str;

    /// Short human label for confirmations and toasts
    fn row_label(row: &Self::Row) -> String;

    /// Prefills the update modal
    fn form_from_row(row: &Self::Row) -> Self::Form;

    /// `None` for a create form
    fn form_id(form: &Self::Form) -> Option<EntityId>;

    // ============================================================================
    // Defaults
    // ============================================================================

    /// Full name (e.g. "a004_crypto_asset"), also the DB table name
    fn full_name() -> String {
        format!("{}_{}", Self::aggregate_index(), Self::collection_name())
    }

    /// URL segment (e.g. "crypto-asset")
    fn route_segment() -> String {
        Self::collection_name().replace('_', "-")
    }

    fn base_path() -> String {
        format!("/manage/{}", Self::route_segment())
    }

    fn endpoint(endpoint: Endpoint) -> String {
        format!("{}{}", Self::base_path(), endpoint.path())
    }
}
