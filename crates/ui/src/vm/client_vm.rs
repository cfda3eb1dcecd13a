use services::{AssignedWorkout, ClientProfile};
use trainer_core::model::{Client, ClientDraft};

use crate::vm::time_fmt::format_short_date;
use crate::vm::workout_vm::difficulty_badge_class;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientRowVm {
    pub id: u64,
    pub name: String,
    pub initials: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub joined: String,
}

impl From<&Client> for ClientRowVm {
    fn from(client: &Client) -> Self {
        Self {
            id: client.id().value(),
            name: client.name().to_owned(),
            initials: initials(client.name()),
            email: client.email().map(str::to_owned),
            phone: client.phone().map(str::to_owned),
            joined: format_short_date(client.created_at()),
        }
    }
}

/// Up to two uppercase initials for the avatar bubble.
#[must_use]
pub fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|part| part.chars().next())
        .take(2)
        .flat_map(char::to_uppercase)
        .collect()
}

#[must_use]
pub fn map_client_rows(clients: &[Client]) -> Vec<ClientRowVm> {
    clients.iter().map(ClientRowVm::from).collect()
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AssignedWorkoutVm {
    pub workout_id: u64,
    pub name: String,
    pub difficulty: Option<String>,
    pub difficulty_class: &'static str,
    pub assigned: String,
}

impl From<&AssignedWorkout> for AssignedWorkoutVm {
    fn from(a: &AssignedWorkout) -> Self {
        let difficulty = a.workout.difficulty();
        Self {
            workout_id: a.workout.id().value(),
            name: a.workout.name().to_owned(),
            difficulty: difficulty.map(ToString::to_string),
            difficulty_class: difficulty_badge_class(difficulty),
            assigned: format_short_date(a.assigned_at),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientProfileVm {
    pub client: ClientRowVm,
    pub workouts: Vec<AssignedWorkoutVm>,
}

#[must_use]
pub fn map_client_profile(profile: &ClientProfile) -> ClientProfileVm {
    ClientProfileVm {
        client: ClientRowVm::from(&profile.client),
        workouts: profile.workouts.iter().map(AssignedWorkoutVm::from).collect(),
    }
}

/// Editable fields of the add/edit client form.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClientForm {
    pub name: String,
    pub email: String,
    pub phone: String,
}

impl ClientForm {
    #[must_use]
    pub fn from_client(client: &Client) -> Self {
        Self {
            name: client.name().to_owned(),
            email: client.email().unwrap_or_default().to_owned(),
            phone: client.phone().unwrap_or_default().to_owned(),
        }
    }

    #[must_use]
    pub fn to_draft(&self) -> ClientDraft {
        ClientDraft::new(self.name.clone(), self.email.clone(), self.phone.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initials_take_first_two_words() {
        assert_eq!(initials("sam rivera"), "SR");
        assert_eq!(initials("Mary Jane Watson"), "MJ");
        assert_eq!(initials("  "), "");
    }
}
