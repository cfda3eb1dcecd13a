mod client_vm;
mod exercise_vm;
mod log_form_vm;
mod markdown_vm;
mod session_detail_vm;
mod session_list_vm;
mod time_fmt;
mod workout_vm;

pub use client_vm::{
    AssignedWorkoutVm, ClientForm, ClientProfileVm, ClientRowVm, initials, map_client_profile,
    map_client_rows,
};
pub use exercise_vm::{
    ExerciseFilterState, ExerciseForm, ExerciseRowVm, filter_exercise_rows, muscle_group_options,
};
pub use log_form_vm::{ExerciseInputs, LogForm, SetField, SetInput, parse_reps, parse_weight};
pub use markdown_vm::{markdown_to_html, notes_excerpt, sanitize_html};
pub use session_detail_vm::{
    ExerciseTableVm, MISSING, SessionDetailVm, SetRowVm, SummaryCardVm, format_volume,
    map_session_detail,
};
pub use session_list_vm::{SessionRowVm, map_session_rows};
pub use time_fmt::{format_datetime, format_long_date, format_short_date, format_time};
pub use workout_vm::{
    BuilderRow, PrescriptionRowVm, WorkoutBuilderForm, WorkoutCardVm, WorkoutDetailVm,
    difficulty_badge_class, map_workout_cards, map_workout_detail,
};
