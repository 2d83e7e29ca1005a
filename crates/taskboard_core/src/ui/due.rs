//! Human-readable due-date labels.

use crate::model::Todo;
use chrono::NaiveDate;

const DATE_DISPLAY_FORMAT: &str = "%b %d, %Y";
const DUE_SOON_DAYS: i64 = 7;

/// Urgency bucket used to style a due label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DueClass {
    None,
    Overdue,
    DueToday,
    DueSoon,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DueLabel {
    pub text: String,
    pub class: DueClass,
}

impl DueLabel {
    fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            class: DueClass::None,
        }
    }
}

/// Describes a todo's due date relative to `today`.
///
/// Unparsable dates are shown verbatim rather than hidden.
pub fn due_label(todo: &Todo, today: NaiveDate) -> DueLabel {
    let Some(raw) = todo.due_date() else {
        return DueLabel::plain("No due date");
    };
    let Some(due) = todo.due_date_value() else {
        return DueLabel::plain(raw);
    };

    let formatted = due.format(DATE_DISPLAY_FORMAT);
    match (due - today).num_days() {
        days if days < 0 => DueLabel {
            text: format!("Overdue: {formatted}"),
            class: DueClass::Overdue,
        },
        0 => DueLabel {
            text: "Due today".to_string(),
            class: DueClass::DueToday,
        },
        1 => DueLabel {
            text: "Due tomorrow".to_string(),
            class: DueClass::DueSoon,
        },
        days if days <= DUE_SOON_DAYS => DueLabel {
            text: format!("Due in {days} days ({formatted})"),
            class: DueClass::DueSoon,
        },
        _ => DueLabel::plain(format!("Due: {formatted}")),
    }
}
