//! Session volume aggregation.
//!
//! Turns the flat set-log rows of one session into per-exercise groups and
//! sums training volume (`reps × weight`). Nothing here rounds; formatting to
//! a fixed number of decimals belongs to the presentation layer.

use std::collections::{HashMap, HashSet};

use crate::model::{Exercise, ExerciseId, SetLog};

/// Name shown for an exercise whose metadata could not be found.
pub const UNKNOWN_EXERCISE: &str = "Unknown";

/// Exercise metadata joined onto grouped sets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExerciseMeta {
    pub name: String,
    pub muscle_group: Option<String>,
}

impl ExerciseMeta {
    #[must_use]
    pub fn unknown() -> Self {
        Self {
            name: UNKNOWN_EXERCISE.to_owned(),
            muscle_group: None,
        }
    }
}

impl From<&Exercise> for ExerciseMeta {
    fn from(exercise: &Exercise) -> Self {
        Self {
            name: exercise.name().to_owned(),
            muscle_group: exercise.muscle_group().map(str::to_owned),
        }
    }
}

/// Metadata lookup keyed by exercise id.
pub type ExerciseLookup = HashMap<ExerciseId, ExerciseMeta>;

/// Build a lookup from fetched library rows.
#[must_use]
pub fn lookup_from_exercises(exercises: &[Exercise]) -> ExerciseLookup {
    exercises
        .iter()
        .map(|e| (e.id(), ExerciseMeta::from(e)))
        .collect()
}

/// One performed set inside a group.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SetEntry {
    pub set_number: i32,
    pub reps: Option<u32>,
    pub weight: Option<f64>,
}

impl SetEntry {
    /// `reps × weight`; a missing value on either side contributes 0.
    #[must_use]
    pub fn volume(&self) -> f64 {
        match (self.reps, self.weight) {
            (Some(reps), Some(weight)) => f64::from(reps) * weight,
            _ => 0.0,
        }
    }

    /// True when both reps and weight were recorded.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.reps.is_some() && self.weight.is_some()
    }
}

impl From<&SetLog> for SetEntry {
    fn from(log: &SetLog) -> Self {
        Self {
            set_number: log.set_number,
            reps: log.reps_completed,
            weight: log.weight_kg,
        }
    }
}

/// All sets of one exercise within a session, ordered by set number.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupedExercise {
    pub exercise_id: ExerciseId,
    pub name: String,
    pub muscle_group: Option<String>,
    pub sets: Vec<SetEntry>,
}

impl GroupedExercise {
    #[must_use]
    pub fn set_count(&self) -> usize {
        self.sets.len()
    }

    #[must_use]
    pub fn total_reps(&self) -> u64 {
        self.sets
            .iter()
            .map(|s| u64::from(s.reps.unwrap_or(0)))
            .sum()
    }

    #[must_use]
    pub fn total_volume(&self) -> f64 {
        self.sets.iter().map(SetEntry::volume).sum()
    }

    /// Sets missing reps or weight; they count as zero volume.
    #[must_use]
    pub fn incomplete_sets(&self) -> usize {
        self.sets.iter().filter(|s| !s.is_complete()).count()
    }
}

/// Group a session's set logs by exercise.
///
/// Exercises appear in order of first appearance among `rows`. Within a group,
/// sets are stably sorted by set number, so duplicates keep their input order.
/// Exercises missing from `lookup` get the name [`UNKNOWN_EXERCISE`].
#[must_use]
pub fn group_set_logs(rows: &[SetLog], lookup: &ExerciseLookup) -> Vec<GroupedExercise> {
    let mut seen = HashSet::new();
    let order: Vec<ExerciseId> = rows
        .iter()
        .map(|row| row.exercise_id)
        .filter(|id| seen.insert(*id))
        .collect();

    order
        .into_iter()
        .map(|exercise_id| {
            let mut sets: Vec<SetEntry> = rows
                .iter()
                .filter(|row| row.exercise_id == exercise_id)
                .map(SetEntry::from)
                .collect();
            sets.sort_by_key(|s| s.set_number);

            let meta = lookup
                .get(&exercise_id)
                .cloned()
                .unwrap_or_else(ExerciseMeta::unknown);

            GroupedExercise {
                exercise_id,
                name: meta.name,
                muscle_group: meta.muscle_group,
                sets,
            }
        })
        .collect()
}

/// Session-wide totals derived from grouped exercises.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SessionTotals {
    pub exercise_count: usize,
    pub set_count: usize,
    pub total_reps: u64,
    pub total_volume: f64,
    pub incomplete_sets: usize,
}

impl SessionTotals {
    /// The session volume is the sum of per-exercise volumes.
    #[must_use]
    pub fn from_groups(groups: &[GroupedExercise]) -> Self {
        groups.iter().fold(
            Self {
                exercise_count: groups.len(),
                ..Self::default()
            },
            |acc, group| Self {
                exercise_count: acc.exercise_count,
                set_count: acc.set_count + group.set_count(),
                total_reps: acc.total_reps + group.total_reps(),
                total_volume: acc.total_volume + group.total_volume(),
                incomplete_sets: acc.incomplete_sets + group.incomplete_sets(),
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SessionId;

    fn row(ex: u64, set: i32, reps: Option<u32>, weight: Option<f64>) -> SetLog {
        SetLog {
            session_id: SessionId::new(1),
            exercise_id: ExerciseId::new(ex),
            prescription_id: None,
            set_number: set,
            reps_completed: reps,
            weight_kg: weight,
        }
    }

    fn lookup(entries: &[(u64, &str, Option<&str>)]) -> ExerciseLookup {
        entries
            .iter()
            .map(|(id, name, group)| {
                (
                    ExerciseId::new(*id),
                    ExerciseMeta {
                        name: (*name).to_owned(),
                        muscle_group: group.map(str::to_owned),
                    },
                )
            })
            .collect()
    }

    #[test]
    fn groups_sorts_sets_and_sums_volume() {
        let rows = vec![
            row(1, 2, Some(10), Some(50.0)),
            row(1, 1, Some(10), Some(50.0)),
            row(2, 1, Some(8), None),
        ];
        let meta = lookup(&[(1, "Bench Press", Some("Chest")), (2, "Row", Some("Back"))]);

        let groups = group_set_logs(&rows, &meta);
        assert_eq!(groups.len(), 2);

        let a = &groups[0];
        assert_eq!(a.name, "Bench Press");
        assert_eq!(
            a.sets.iter().map(|s| s.set_number).collect::<Vec<_>>(),
            vec![1, 2]
        );
        assert!(a.sets.iter().all(|s| (s.volume() - 500.0).abs() < f64::EPSILON));
        assert!((a.total_volume() - 1000.0).abs() < f64::EPSILON);

        let b = &groups[1];
        assert_eq!(b.sets[0].volume(), 0.0);
        assert_eq!(b.total_volume(), 0.0);
        assert_eq!(b.incomplete_sets(), 1);

        let totals = SessionTotals::from_groups(&groups);
        assert!((totals.total_volume - 1000.0).abs() < f64::EPSILON);
        assert_eq!(totals.exercise_count, 2);
        assert_eq!(totals.set_count, 3);
        assert_eq!(totals.total_reps, 28);
        assert_eq!(totals.incomplete_sets, 1);
    }

    #[test]
    fn empty_logs_produce_zero_totals() {
        let groups = group_set_logs(&[], &ExerciseLookup::new());
        assert!(groups.is_empty());
        let totals = SessionTotals::from_groups(&groups);
        assert_eq!(totals.exercise_count, 0);
        assert_eq!(totals.set_count, 0);
        assert_eq!(totals.total_volume, 0.0);
    }

    #[test]
    fn missing_metadata_defaults_to_unknown() {
        let rows = vec![row(99, 1, Some(5), Some(20.0))];
        let groups = group_set_logs(&rows, &ExerciseLookup::new());
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].name, UNKNOWN_EXERCISE);
        assert_eq!(groups[0].muscle_group, None);
        assert!((groups[0].total_volume() - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn exercise_order_is_first_appearance_not_id_or_name() {
        let rows = vec![
            row(30, 1, Some(1), Some(1.0)),
            row(10, 1, Some(1), Some(1.0)),
            row(30, 2, Some(1), Some(1.0)),
            row(20, 1, Some(1), Some(1.0)),
        ];
        let meta = lookup(&[(10, "Alpha", None), (20, "Bravo", None), (30, "Zulu", None)]);
        let names: Vec<_> = group_set_logs(&rows, &meta)
            .into_iter()
            .map(|g| g.name)
            .collect();
        assert_eq!(names, vec!["Zulu", "Alpha", "Bravo"]);
    }

    #[test]
    fn odd_set_numbers_are_kept_as_is() {
        let rows = vec![
            row(1, 2, Some(5), Some(10.0)),
            row(1, 0, Some(3), Some(10.0)),
            row(1, 2, Some(4), Some(10.0)),
            row(1, -1, None, Some(10.0)),
        ];
        let groups = group_set_logs(&rows, &ExerciseLookup::new());
        let sets = &groups[0].sets;
        assert_eq!(
            sets.iter().map(|s| s.set_number).collect::<Vec<_>>(),
            vec![-1, 0, 2, 2]
        );
        // duplicates keep input order
        assert_eq!(sets[2].reps, Some(5));
        assert_eq!(sets[3].reps, Some(4));
        assert_eq!(groups[0].set_count(), 4);
    }

    #[test]
    fn session_total_matches_sum_of_exercise_totals() {
        let rows = vec![
            row(1, 1, Some(12), Some(22.5)),
            row(2, 1, Some(6), Some(102.5)),
            row(1, 2, Some(10), Some(25.0)),
            row(3, 1, None, None),
            row(2, 2, Some(5), Some(105.0)),
        ];
        let groups = group_set_logs(&rows, &ExerciseLookup::new());
        let per_exercise: f64 = groups.iter().map(GroupedExercise::total_volume).sum();
        let totals = SessionTotals::from_groups(&groups);
        assert!((totals.total_volume - per_exercise).abs() < 1e-9);
        assert!((totals.total_volume - (270.0 + 250.0 + 615.0 + 525.0)).abs() < 1e-9);
    }

    #[test]
    fn set_with_missing_reps_contributes_zero() {
        let entry = SetEntry {
            set_number: 1,
            reps: None,
            weight: Some(80.0),
        };
        assert_eq!(entry.volume(), 0.0);
        assert!(!entry.is_complete());
    }
}
