//! State of the "log session" form.

use chrono::{DateTime, Utc};
use services::{LoggedSet, SessionLogForm, SessionLogTemplate};
use trainer_core::model::{ClientId, WorkoutId};

/// Which half of a set row an input edits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SetField {
    Reps,
    Weight,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SetInput {
    pub template: LoggedSet,
    pub reps: String,
    pub weight: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ExerciseInputs {
    pub name: String,
    pub reps_hint: String,
    pub sets: Vec<SetInput>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LogForm {
    /// Raw select values; empty means nothing chosen.
    pub client_id: String,
    pub workout_id: String,
    pub started_at: DateTime<Utc>,
    pub duration: String,
    pub notes: String,
    pub exercises: Vec<ExerciseInputs>,
    pub saving: bool,
}

impl LogForm {
    #[must_use]
    pub fn new(started_at: DateTime<Utc>) -> Self {
        let defaults = SessionLogForm::new(started_at);
        Self {
            client_id: String::new(),
            workout_id: String::new(),
            started_at,
            duration: defaults
                .duration_minutes
                .map(|m| m.to_string())
                .unwrap_or_default(),
            notes: String::new(),
            exercises: Vec::new(),
            saving: false,
        }
    }

    /// Replace the set grid with blank rows from a template.
    pub fn seed(&mut self, template: &SessionLogTemplate) {
        self.exercises = template
            .exercises
            .iter()
            .map(|e| ExerciseInputs {
                name: e.name.clone(),
                reps_hint: e.reps_hint.clone(),
                sets: e
                    .sets
                    .iter()
                    .map(|s| SetInput {
                        template: *s,
                        reps: String::new(),
                        weight: String::new(),
                    })
                    .collect(),
            })
            .collect();
    }

    /// Seed from a template fetched for `requested`, unless the selection has moved on.
    ///
    /// Returns `false` when the result is stale and was dropped.
    pub fn seed_if_selected(&mut self, requested: WorkoutId, template: &SessionLogTemplate) -> bool {
        if self.workout_id.parse::<WorkoutId>().ok() != Some(requested) {
            return false;
        }
        self.seed(template);
        true
    }

    pub fn set_value(&mut self, exercise: usize, set: usize, field: SetField, raw: String) {
        let Some(input) = self
            .exercises
            .get_mut(exercise)
            .and_then(|e| e.sets.get_mut(set))
        else {
            return;
        };
        match field {
            SetField::Reps => input.reps = raw,
            SetField::Weight => input.weight = raw,
        }
    }

    /// Mark the form as saving and hand out its payload; `None` while a save is in flight.
    pub fn begin_submit(&mut self) -> Option<(SessionLogForm, Vec<LoggedSet>)> {
        if self.saving {
            return None;
        }
        self.saving = true;
        Some(self.build())
    }

    pub fn finish_submit(&mut self) {
        self.saving = false;
    }

    /// Header and set rows for the service; unparsable numbers count as not entered.
    #[must_use]
    pub fn build(&self) -> (SessionLogForm, Vec<LoggedSet>) {
        let header = SessionLogForm {
            client_id: self.client_id.parse::<ClientId>().ok(),
            workout_id: self.workout_id.parse::<WorkoutId>().ok(),
            started_at: self.started_at,
            duration_minutes: self.duration.trim().parse::<u32>().ok(),
            notes: self.notes.clone(),
        };
        let sets = self
            .exercises
            .iter()
            .flat_map(|e| e.sets.iter())
            .map(|input| LoggedSet {
                reps: parse_reps(&input.reps),
                weight_kg: parse_weight(&input.weight),
                ..input.template
            })
            .collect();
        (header, sets)
    }
}

#[must_use]
pub fn parse_reps(raw: &str) -> Option<u32> {
    raw.trim().parse::<u32>().ok()
}

/// Accepts `42.5` and `42,5`; rejects negatives and non-finite values.
#[must_use]
pub fn parse_weight(raw: &str) -> Option<f64> {
    raw.trim()
        .replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|w| w.is_finite() && *w >= 0.0)
}
