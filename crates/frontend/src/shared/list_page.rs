//! Standard list page of a resource, composed from a `ListController`.
//!
//! Layout: header with title, total and actions; filter panel with the
//! pagination controls; the table (selection column, id, resource columns,
//! status, created, row actions); the create/update modal.

use contracts::domain::common::{EntityId, Resource};
use leptos::prelude::*;
use thaw::*;

use super::components::{
    EntityModal, FilterFields, FilterPanel, PaginationControls, TableCheckbox,
    TableHeaderCheckbox,
};
use super::components::ui::{Badge, StatusBadge};
use super::date_utils::format_datetime;
use super::icons::icon;
use super::list_controller::ListController;
use super::page_frame::PageFrame;
use super::page_standard::{page_id, PAGE_CAT_LIST};

/// Resource-specific parts of a list page
pub struct ListColumns<R: Resource> {
    /// Header captions of the resource columns
    pub headers: &'static [&'static str],
    /// Cells of one row, one `TableCell` per header
    pub cells: fn(&R::Row) -> AnyView,
}

pub fn list_page<R, F>(ctrl: ListController<R>, columns: ListColumns<R>, form: F) -> impl IntoView
where
    R: Resource,
    F: Fn(ListController<R>) -> AnyView + Send + Sync + 'static,
{
    let section = R::full_name();
    let form = StoredValue::new(form);

    view! {
        <PageFrame page_id=page_id(&section, PAGE_CAT_LIST) category=PAGE_CAT_LIST>
            {list_header(ctrl)}
            <div class="page__content">
                {list_filters(ctrl)}
                {list_status(ctrl)}
                {list_table(ctrl, columns)}
            </div>
            <Show when=move || ctrl.modal_open.get()>
                {move || form_modal(ctrl, form.with_value(|f| f(ctrl)))}
            </Show>
        </PageFrame>
    }
}

pub fn list_header<R: Resource>(ctrl: ListController<R>) -> impl IntoView {
    let selected_count = ctrl.selected_count();
    let total = move || ctrl.page.with(|p| p.total_num);

    view! {
        <div class="page__header">
            <div class="page__header-left">
                <h1 class="page__title">{R::list_name()}</h1>
                <Badge variant="primary">{total}</Badge>
            </div>
            <div class="page__header-right">
                <Flex gap=FlexGap::Small>
                    <Button
                        appearance=ButtonAppearance::Primary
                        on_click=move |_| ctrl.open_create()
                    >
                        {icon("plus")}
                        " Create"
                    </Button>
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| ctrl.refetch()
                        disabled=Signal::derive(move || ctrl.loading.get())
                    >
                        {icon("refresh")}
                        " Refresh"
                    </Button>
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| ctrl.handle_batch_delete()
                        disabled=Signal::derive(move || selected_count.get() == 0)
                    >
                        {icon("delete")}
                        {move || format!(" Delete selected ({})", selected_count.get())}
                    </Button>
                </Flex>
            </div>
        </div>
    }
}

pub fn list_filters<R: Resource>(ctrl: ListController<R>) -> impl IntoView {
    let is_expanded = RwSignal::new(true);
    let active_filters_count =
        Signal::derive(move || ctrl.params.with(|p| p.omit_empty().len()));

    let current_page = Signal::derive(move || ctrl.page.with(|p| p.current_page));
    let total_pages = Signal::derive(move || ctrl.page.with(|p| p.total_pages()));
    let total_count = Signal::derive(move || ctrl.page.with(|p| p.total_num));
    let page_size = Signal::derive(move || ctrl.page.with(|p| p.page_size));

    view! {
        <FilterPanel
            is_expanded=is_expanded
            active_filters_count=active_filters_count
            pagination_controls=move || view! {
                <PaginationControls
                    current_page=current_page
                    total_pages=total_pages
                    total_count=total_count
                    page_size=page_size
                    on_page_change=Callback::new(move |page| ctrl.handle_page_change(page))
                    on_page_size_change=Callback::new(move |size| ctrl.handle_page_size_change(size))
                />
            }
            filter_content=move || view! {
                <FilterFields
                    fields=R::filter_fields()
                    on_change=Callback::new(move |(key, value): (String, Option<String>)| {
                        ctrl.handle_search_change(&key, value)
                    })
                    on_reset=Callback::new(move |_| ctrl.reset_filters())
                />
            }
        />
    }
}

/// Loading indicator and the last load error
fn list_status<R: Resource>(ctrl: ListController<R>) -> impl IntoView {
    view! {
        <Show when=move || ctrl.loading.get()>
            <div class="list__loading">
                <Spinner />
            </div>
        </Show>
        {move || ctrl.error.get().map(|err| view! {
            <div class="alert alert--error">{err}</div>
        })}
    }
}

fn list_table<R: Resource>(ctrl: ListController<R>, columns: ListColumns<R>) -> impl IntoView {
    let all = ctrl.select_all();
    let partial = Signal::derive(move || ctrl.selection.with(|s| s.is_partial()));
    let cells = columns.cells;
    let is_empty = move || ctrl.rows.with(|rows| rows.is_empty());

    view! {
        <div class="table-wrapper">
            <Table attr:style="width: 100%;">
                <TableHeader>
                    <TableRow>
                        <TableHeaderCheckbox
                            all=all
                            partial=partial
                            on_change=Callback::new(move |checked| ctrl.toggle_all(checked))
                        />
                        <TableHeaderCell resizable=false>"ID"</TableHeaderCell>
                        {columns.headers.iter().map(|caption| view! {
                            <TableHeaderCell resizable=false>{*caption}</TableHeaderCell>
                        }).collect_view()}
                        <TableHeaderCell resizable=false>"Status"</TableHeaderCell>
                        <TableHeaderCell resizable=false>"Created"</TableHeaderCell>
                        <TableHeaderCell resizable=false>"Actions"</TableHeaderCell>
                    </TableRow>
                </TableHeader>
                <TableBody>
                    <For
                        each=move || ctrl.rows.get()
                        key=|row| (R::row_id(row), R::row_updated_at(row).to_string())
                        children=move |row| list_row(ctrl, row, cells)
                    />
                </TableBody>
            </Table>
            <Show when=move || is_empty() && !ctrl.loading.get()>
                <div class="table__empty">"No records"</div>
            </Show>
        </div>
    }
}

fn list_row<R: Resource>(
    ctrl: ListController<R>,
    row: R::Row,
    cells: fn(&R::Row) -> AnyView,
) -> impl IntoView {
    let id: EntityId = R::row_id(&row);
    let status = R::row_status(&row);
    let created_at = format_datetime(R::row_created_at(&row));
    let checked = Signal::derive(move || ctrl.selection.with(|s| s.is_checked(&id)));

    view! {
        <TableRow>
            <TableCheckbox
                checked=checked
                on_change=Callback::new(move |on| ctrl.toggle_row(id, on))
            />
            <TableCell>
                <TableCellLayout>{id}</TableCellLayout>
            </TableCell>
            {cells(&row)}
            <TableCell>
                <StatusBadge status=status />
            </TableCell>
            <TableCell>
                <TableCellLayout>{created_at}</TableCellLayout>
            </TableCell>
            <TableCell>
                {row_actions(ctrl, row)}
            </TableCell>
        </TableRow>
    }
}

/// Edit, enable/disable and delete buttons of one row
pub fn row_actions<R: Resource>(ctrl: ListController<R>, row: R::Row) -> impl IntoView {
    let id = R::row_id(&row);
    let next_status = R::row_status(&row).toggled();
    let row = StoredValue::new(row);

    view! {
        <div class="table__actions">
            <button
                class="button button--icon"
                title="Edit"
                on:click=move |_| row.with_value(|r| ctrl.open_update(r))
            >
                {icon("edit")}
            </button>
            <button
                class="button button--icon"
                title=if next_status.is_enabled() { "Enable" } else { "Disable" }
                on:click=move |_| ctrl.handle_status_change(id, next_status)
            >
                {icon("toggle")}
            </button>
            <button
                class="button button--icon button--danger"
                title="Delete"
                on:click=move |_| row.with_value(|r| ctrl.handle_delete_click(r))
            >
                {icon("delete")}
            </button>
        </div>
    }
}

fn form_modal<R: Resource>(ctrl: ListController<R>, body: AnyView) -> impl IntoView {
    let is_edit = ctrl.is_edit_mode();
    let title = Signal::derive(move || {
        if is_edit.get() {
            format!("Edit {}", R::element_name().to_lowercase())
        } else {
            format!("New {}", R::element_name().to_lowercase())
        }
    });

    view! {
        <EntityModal
            title=title
            saving=ctrl.saving
            on_save=Callback::new(move |_| ctrl.submit())
            on_close=Callback::new(move |_| ctrl.close_modal())
        >
            {body}
        </EntityModal>
    }
}
