//! Presentation of one logged session: summary cards and per-exercise set tables.
//!
//! The only place volumes are rounded.

use services::SessionDetail;
use trainer_core::progress::{GroupedExercise, SetEntry};

use crate::vm::markdown_vm::markdown_to_html;
use crate::vm::time_fmt::{format_long_date, format_time};

/// Placeholder for a value that was not recorded.
pub const MISSING: &str = "-";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SummaryCardVm {
    pub label: &'static str,
    pub value: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SetRowVm {
    pub set_number: String,
    pub reps: String,
    pub weight: String,
    pub volume: String,
}

impl From<&SetEntry> for SetRowVm {
    fn from(set: &SetEntry) -> Self {
        Self {
            set_number: set.set_number.to_string(),
            reps: set
                .reps
                .filter(|r| *r > 0)
                .map_or_else(|| MISSING.to_owned(), |r| r.to_string()),
            weight: set
                .weight
                .filter(|w| w.abs() > f64::EPSILON)
                .map_or_else(|| MISSING.to_owned(), |w| format!("{w} kg")),
            volume: if set.is_complete() {
                format!("{} kg", format_volume(set.volume()))
            } else {
                MISSING.to_owned()
            },
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExerciseTableVm {
    /// 1-based position on the page.
    pub position: usize,
    pub name: String,
    pub muscle_group: Option<String>,
    pub rows: Vec<SetRowVm>,
    pub total_sets: usize,
    pub total_reps: u64,
    pub total_volume: String,
    pub incomplete_sets: usize,
}

impl ExerciseTableVm {
    #[must_use]
    pub fn from_group(position: usize, group: &GroupedExercise) -> Self {
        Self {
            position,
            name: group.name.clone(),
            muscle_group: group.muscle_group.clone(),
            rows: group.sets.iter().map(SetRowVm::from).collect(),
            total_sets: group.set_count(),
            total_reps: group.total_reps(),
            total_volume: format!("{} kg", format_volume(group.total_volume())),
            incomplete_sets: group.incomplete_sets(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionDetailVm {
    pub workout_name: String,
    pub workout_focus: Option<String>,
    pub client_name: String,
    pub date: String,
    pub time: String,
    pub status: &'static str,
    pub duration: Option<String>,
    pub notes_html: Option<String>,
    pub cards: Vec<SummaryCardVm>,
    pub exercises: Vec<ExerciseTableVm>,
    /// Shown when some sets count as zero volume because reps or weight is missing.
    pub incomplete_note: Option<String>,
}

/// One decimal place.
#[must_use]
pub fn format_volume(volume: f64) -> String {
    format!("{volume:.1}")
}

#[must_use]
pub fn map_session_detail(detail: &SessionDetail) -> SessionDetailVm {
    let totals = detail.totals;
    let cards = vec![
        SummaryCardVm {
            label: "Total Exercises",
            value: totals.exercise_count.to_string(),
        },
        SummaryCardVm {
            label: "Total Sets",
            value: totals.set_count.to_string(),
        },
        SummaryCardVm {
            label: "Total Volume (kg)",
            value: format_volume(totals.total_volume),
        },
    ];

    let incomplete_note = match totals.incomplete_sets {
        0 => None,
        1 => Some("1 set is missing reps or weight and adds no volume.".to_owned()),
        n => Some(format!(
            "{n} sets are missing reps or weight and add no volume."
        )),
    };

    SessionDetailVm {
        workout_name: detail.workout_name.clone(),
        workout_focus: detail.workout_focus.clone(),
        client_name: detail.client_name.clone(),
        date: format_long_date(detail.session.started_at()),
        time: format_time(detail.session.started_at()),
        status: detail.session.status().label(),
        duration: detail
            .session
            .duration_minutes()
            .map(|m| format!("{m} min")),
        notes_html: detail.session.notes().map(markdown_to_html),
        cards,
        exercises: detail
            .exercises
            .iter()
            .enumerate()
            .map(|(i, g)| ExerciseTableVm::from_group(i + 1, g))
            .collect(),
        incomplete_note,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trainer_core::model::{ClientId, ExerciseId, SessionId, WorkoutId, WorkoutSession};
    use trainer_core::progress::SessionTotals;
    use trainer_core::time::fixed_now;

    fn group(name: &str, sets: Vec<SetEntry>) -> GroupedExercise {
        GroupedExercise {
            exercise_id: ExerciseId::new(1),
            name: name.into(),
            muscle_group: Some("Back".into()),
            sets,
        }
    }

    fn entry(n: i32, reps: Option<u32>, weight: Option<f64>) -> SetEntry {
        SetEntry {
            set_number: n,
            reps,
            weight,
        }
    }

    #[test]
    fn set_rows_show_dash_for_missing_values() {
        let row = SetRowVm::from(&entry(1, Some(8), None));
        assert_eq!(row.reps, "8");
        assert_eq!(row.weight, MISSING);
        assert_eq!(row.volume, MISSING);

        let full = SetRowVm::from(&entry(2, Some(10), Some(42.5)));
        assert_eq!(full.weight, "42.5 kg");
        assert_eq!(full.volume, "425.0 kg");
    }

    #[test]
    fn detail_cards_round_only_for_display() {
        let exercises = vec![
            group("Row", vec![entry(1, Some(3), Some(33.35)), entry(2, Some(3), Some(33.35))]),
            group("Plank", vec![entry(1, None, None)]),
        ];
        let totals = SessionTotals::from_groups(&exercises);
        let detail = SessionDetail {
            session: WorkoutSession::from_persisted(
                SessionId::new(1),
                ClientId::new(1),
                WorkoutId::new(1),
                fixed_now(),
                Some(fixed_now()),
                Some(45),
                Some("Felt **strong**".into()),
            )
            .unwrap(),
            client_name: "Sam".into(),
            workout_name: "Pull".into(),
            workout_focus: None,
            exercises,
            totals,
        };

        let vm = map_session_detail(&detail);
        assert_eq!(vm.cards[0].value, "2");
        assert_eq!(vm.cards[1].value, "3");
        assert_eq!(vm.cards[2].value, "200.1");
        assert_eq!(vm.exercises[0].position, 1);
        assert_eq!(vm.exercises[0].total_reps, 6);
        assert_eq!(vm.exercises[1].total_volume, "0.0 kg");
        assert_eq!(vm.date, "Monday, January 15, 2024");
        assert_eq!(vm.duration.as_deref(), Some("45 min"));
        assert_eq!(vm.status, "Completed");
        assert!(vm.notes_html.unwrap().contains("<strong>strong</strong>"));
        assert_eq!(
            vm.incomplete_note.as_deref(),
            Some("1 set is missing reps or weight and adds no volume.")
        );
    }
}
