//! Column definitions for the application grid.
//!
//! Maps each record field to its header, its cell rendering and the editor
//! that drives it. Rendering produces view models, not widgets.

use std::cmp::Ordering;

use tracareer_core::application::Application;
use tracareer_core::field::ApplicationField;
use tracareer_core::format::{format_date_full, format_date_short, format_salary};
use tracareer_core::sort::{compare_nulls_last, SortState};

/// A grid column: one of the record fields, or the trailing actions menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnId {
    Field(ApplicationField),
    Actions,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Header {
    Static(&'static str),
    /// Clicking toggles the column's tri-state sort.
    Sortable(&'static str),
    /// No header text.
    None,
}

/// Which editor drives a field cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorKind {
    Text,
    OptionalText,
    Number,
    Remote,
    Status,
    Date,
    DateTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnDef {
    pub id: ColumnId,
    pub header: Header,
    pub editor: Option<EditorKind>,
    pub hideable: bool,
}

const fn field(
    field: ApplicationField,
    header: Header,
    editor: EditorKind,
    hideable: bool,
) -> ColumnDef {
    ColumnDef {
        id: ColumnId::Field(field),
        header,
        editor: Some(editor),
        hideable,
    }
}

/// Every column, in display order.
pub const COLUMNS: [ColumnDef; 13] = [
    field(ApplicationField::Company, Header::Sortable("Company"), EditorKind::Text, false),
    field(ApplicationField::Position, Header::Static("Position"), EditorKind::Text, true),
    field(ApplicationField::Remote, Header::Static("Remote"), EditorKind::Remote, true),
    field(ApplicationField::Location, Header::Static("Location"), EditorKind::OptionalText, true),
    field(ApplicationField::Status, Header::Static("Status"), EditorKind::Status, true),
    field(ApplicationField::AppliedAt, Header::Sortable("Application Date"), EditorKind::Date, true),
    field(ApplicationField::InterviewAt, Header::Sortable("Interview Date"), EditorKind::DateTime, true),
    field(ApplicationField::ExpectedSalary, Header::Static("Exp. Salary"), EditorKind::Number, true),
    field(ApplicationField::ResumeVersion, Header::Static("Resume Version"), EditorKind::OptionalText, true),
    field(ApplicationField::HiringManager, Header::Static("Hiring Manager"), EditorKind::OptionalText, true),
    field(ApplicationField::Contact, Header::Static("Contact"), EditorKind::OptionalText, true),
    field(ApplicationField::Link, Header::Static("Link"), EditorKind::OptionalText, true),
    ColumnDef {
        id: ColumnId::Actions,
        header: Header::None,
        editor: None,
        hideable: false,
    },
];

pub fn column(id: ColumnId) -> Option<&'static ColumnDef> {
    COLUMNS.iter().find(|c| c.id == id)
}

impl ColumnDef {
    pub fn is_sortable(&self) -> bool {
        matches!(self.header, Header::Sortable(_))
    }

    /// Header text with the sort indicator for sortable columns.
    pub fn header_label(&self, sort: SortState) -> String {
        match self.header {
            Header::Static(label) => label.to_string(),
            Header::Sortable(label) => {
                let arrow = match sort {
                    SortState::Unsorted => "↕",
                    SortState::Ascending => "↑",
                    SortState::Descending => "↓",
                };
                format!("{label} {arrow}")
            }
            Header::None => String::new(),
        }
    }
}

/// One entry of the per-row actions menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionItem {
    pub label: &'static str,
    /// Text placed on the clipboard when chosen; `None` makes the entry a no-op.
    pub copy_text: Option<String>,
}

/// Rendered (non-editing) content of one cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellView {
    Text(String),
    Badge {
        label: &'static str,
        color: &'static str,
    },
    /// Clicking copies `text`; nothing is copied when the field is unset.
    Copyable {
        text: String,
        copy_text: Option<String>,
    },
    Actions(Vec<ActionItem>),
}

/// Render the display form of `column` for `app`.
pub fn render_cell(app: &Application, column: ColumnId) -> CellView {
    fn text(value: &Option<String>) -> CellView {
        CellView::Text(value.clone().unwrap_or_default())
    }

    fn copyable(value: &Option<String>) -> CellView {
        CellView::Copyable {
            text: value.clone().unwrap_or_default(),
            copy_text: value.clone(),
        }
    }

    let field = match column {
        ColumnId::Actions => return CellView::Actions(action_items(app)),
        ColumnId::Field(field) => field,
    };

    match field {
        ApplicationField::Company => CellView::Text(app.company.clone()),
        ApplicationField::Position => CellView::Text(app.position.clone()),
        ApplicationField::Remote => {
            CellView::Text(app.remote.map(|r| r.label().to_string()).unwrap_or_default())
        }
        ApplicationField::Location => text(&app.location),
        ApplicationField::Status => CellView::Badge {
            label: app.status.label(),
            color: app.status.color(),
        },
        ApplicationField::AppliedAt => {
            CellView::Text(app.applied_at.map(format_date_short).unwrap_or_default())
        }
        ApplicationField::InterviewAt => {
            CellView::Text(app.interview_at.map(format_date_full).unwrap_or_default())
        }
        ApplicationField::ExpectedSalary => CellView::Text(format_salary(app.expected_salary)),
        ApplicationField::ResumeVersion => text(&app.resume_version),
        ApplicationField::HiringManager => text(&app.hiring_manager),
        ApplicationField::Contact => copyable(&app.contact),
        ApplicationField::Link => copyable(&app.link),
    }
}

/// "Copy link", "Copy contact method" and an inert "Delete".
pub fn action_items(app: &Application) -> Vec<ActionItem> {
    vec![
        ActionItem {
            label: "Copy link",
            copy_text: app.link.clone(),
        },
        ActionItem {
            label: "Copy contact method",
            copy_text: app.contact.clone(),
        },
        ActionItem {
            label: "Delete",
            copy_text: None,
        },
    ]
}

/// Order two records by a sortable column. Missing values go last.
///
/// Non-sortable columns compare equal so a stable sort keeps server order.
pub fn compare_by(a: &Application, b: &Application, column: ColumnId, sort: SortState) -> Ordering {
    if sort == SortState::Unsorted {
        return Ordering::Equal;
    }
    match column {
        ColumnId::Field(ApplicationField::Company) => {
            let a = a.company.to_lowercase();
            let b = b.company.to_lowercase();
            compare_nulls_last(Some(&a), Some(&b), sort)
        }
        ColumnId::Field(ApplicationField::AppliedAt) => {
            compare_nulls_last(a.applied_at.as_ref(), b.applied_at.as_ref(), sort)
        }
        ColumnId::Field(ApplicationField::InterviewAt) => {
            compare_nulls_last(a.interview_at.as_ref(), b.interview_at.as_ref(), sort)
        }
        _ => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use tracareer_core::status::ApplicationStatus;

    use super::*;

    fn app(id: i64, company: &str) -> Application {
        Application {
            id,
            company: company.to_string(),
            position: "SWE".to_string(),
            remote: None,
            location: None,
            status: ApplicationStatus::Applied,
            applied_at: None,
            interview_at: None,
            expected_salary: None,
            resume_version: None,
            hiring_manager: None,
            contact: None,
            link: None,
            tracker_id: 1,
        }
    }

    #[test]
    fn test_column_order_and_flags() {
        let ids: Vec<_> = COLUMNS.iter().map(|c| c.id).collect();
        let fields: Vec<_> = ApplicationField::ALL.iter().map(|f| ColumnId::Field(*f)).collect();
        assert_eq!(&ids[..12], &fields[..]);
        assert_eq!(ids[12], ColumnId::Actions);

        let not_hideable: Vec<_> = COLUMNS.iter().filter(|c| !c.hideable).map(|c| c.id).collect();
        assert_eq!(
            not_hideable,
            vec![ColumnId::Field(ApplicationField::Company), ColumnId::Actions]
        );

        let sortable: Vec<_> = COLUMNS.iter().filter(|c| c.is_sortable()).map(|c| c.id).collect();
        assert_eq!(
            sortable,
            vec![
                ColumnId::Field(ApplicationField::Company),
                ColumnId::Field(ApplicationField::AppliedAt),
                ColumnId::Field(ApplicationField::InterviewAt),
            ]
        );
    }

    #[test]
    fn test_header_labels() {
        let company = column(ColumnId::Field(ApplicationField::Company)).unwrap();
        assert_eq!(company.header_label(SortState::Ascending), "Company ↑");
        let salary = column(ColumnId::Field(ApplicationField::ExpectedSalary)).unwrap();
        assert_eq!(salary.header_label(SortState::Unsorted), "Exp. Salary");
    }

    #[test]
    fn test_render_status_badge_and_salary() {
        let mut a = app(1, "Canva");
        a.expected_salary = Some(150_000);
        assert_eq!(
            render_cell(&a, ColumnId::Field(ApplicationField::Status)),
            CellView::Badge {
                label: "Applied",
                color: "bg-status-blue/70"
            }
        );
        assert_eq!(
            render_cell(&a, ColumnId::Field(ApplicationField::ExpectedSalary)),
            CellView::Text("$150,000".to_string())
        );
        a.expected_salary = Some(0);
        assert_eq!(
            render_cell(&a, ColumnId::Field(ApplicationField::ExpectedSalary)),
            CellView::Text(String::new())
        );
    }

    #[test]
    fn test_render_dates() {
        let mut a = app(1, "Canva");
        let date = NaiveDate::from_ymd_opt(2025, 1, 6).unwrap();
        a.applied_at = Some(date);
        a.interview_at = date.and_hms_opt(15, 5, 0);
        assert_eq!(
            render_cell(&a, ColumnId::Field(ApplicationField::AppliedAt)),
            CellView::Text("Mon, 06 Jan 2025".to_string())
        );
        assert_eq!(
            render_cell(&a, ColumnId::Field(ApplicationField::InterviewAt)),
            CellView::Text("Mon, 06 Jan 2025, 3:05 pm".to_string())
        );
    }

    #[test]
    fn test_actions_copy_only_present_fields() {
        let mut a = app(1, "Canva");
        a.link = Some("https://jobs.example/1".to_string());
        let items = action_items(&a);
        assert_eq!(items[0].copy_text.as_deref(), Some("https://jobs.example/1"));
        assert_eq!(items[1].copy_text, None);
        assert_eq!(items[2].label, "Delete");
        assert_eq!(items[2].copy_text, None);
    }

    #[test]
    fn test_sort_dates_nulls_last() {
        let mut rows = vec![app(1, "a"), app(2, "b"), app(3, "c")];
        rows[0].applied_at = NaiveDate::from_ymd_opt(2025, 3, 1);
        rows[2].applied_at = NaiveDate::from_ymd_opt(2025, 1, 1);
        let col = ColumnId::Field(ApplicationField::AppliedAt);

        rows.sort_by(|a, b| compare_by(a, b, col, SortState::Descending));
        assert_eq!(rows.iter().map(|r| r.id).collect::<Vec<_>>(), vec![1, 3, 2]);

        rows.sort_by(|a, b| compare_by(a, b, col, SortState::Ascending));
        assert_eq!(rows.iter().map(|r| r.id).collect::<Vec<_>>(), vec![3, 1, 2]);
    }
}
