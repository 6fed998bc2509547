pub mod entity_modal;
pub mod filter_panel;
pub mod form_field;
pub mod pagination_controls;
pub mod table_checkbox;
pub mod ui;

pub use entity_modal::EntityModal;
pub use filter_panel::{FilterFields, FilterPanel};
pub use form_field::{number_input, status_select, text_input, FormField};
pub use pagination_controls::PaginationControls;
pub use table_checkbox::{TableCheckbox, TableHeaderCheckbox};
