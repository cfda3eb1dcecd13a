use services::SessionListItem;
use trainer_core::model::SessionStatus;

use crate::vm::markdown_vm::notes_excerpt;
use crate::vm::time_fmt::format_datetime;

const EXCERPT_CHARS: usize = 80;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionRowVm {
    pub id: u64,
    pub workout_name: String,
    pub started_at: String,
    pub status: &'static str,
    pub status_class: &'static str,
    pub duration: Option<String>,
    pub notes: Option<String>,
}

impl From<&SessionListItem> for SessionRowVm {
    fn from(item: &SessionListItem) -> Self {
        Self {
            id: item.id.value(),
            workout_name: item.workout_name.clone(),
            started_at: format_datetime(item.started_at),
            status: item.status.label(),
            status_class: match item.status {
                SessionStatus::Completed => "badge badge-completed",
                SessionStatus::InProgress => "badge badge-progress",
            },
            duration: item.duration_minutes.map(|m| format!("{m} min")),
            notes: item
                .notes
                .as_deref()
                .map(|n| notes_excerpt(n, EXCERPT_CHARS))
                .filter(|n| !n.is_empty()),
        }
    }
}

#[must_use]
pub fn map_session_rows(items: &[SessionListItem]) -> Vec<SessionRowVm> {
    items.iter().map(SessionRowVm::from).collect()
}
