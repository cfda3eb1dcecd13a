use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Error type for parsing an id from a string (route segments, CLI flags).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIdError {
    kind: &'static str,
}

impl fmt::Display for ParseIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to parse {} from string", self.kind)
    }
}

impl std::error::Error for ParseIdError {}

macro_rules! row_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name(u64);

        impl $name {
            #[must_use]
            pub fn new(id: u64) -> Self {
                Self(id)
            }

            /// Returns the underlying row id.
            #[must_use]
            pub fn value(&self) -> u64 {
                self.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!(stringify!($name), "({})"), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = ParseIdError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim().parse::<u64>().map(Self::new).map_err(|_| ParseIdError {
                    kind: stringify!($name),
                })
            }
        }
    };
}

row_id!(
    /// Identifier of a trainer account.
    TrainerId
);
row_id!(
    /// Identifier of a client managed by a trainer.
    ClientId
);
row_id!(
    /// Identifier of an exercise in the shared library.
    ExerciseId
);
row_id!(
    /// Identifier of a workout template.
    WorkoutId
);
row_id!(
    /// Identifier of one prescribed exercise row inside a workout template.
    WorkoutExerciseId
);
row_id!(
    /// Identifier of a logged training session.
    SessionId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_id_display_and_debug() {
        let id = ClientId::new(42);
        assert_eq!(id.to_string(), "42");
        assert_eq!(format!("{id:?}"), "ClientId(42)");
    }

    #[test]
    fn session_id_from_str_trims_whitespace() {
        let id: SessionId = " 123 ".parse().unwrap();
        assert_eq!(id, SessionId::new(123));
    }

    #[test]
    fn exercise_id_from_str_invalid() {
        let err = "bench".parse::<ExerciseId>().unwrap_err();
        assert_eq!(err.to_string(), "failed to parse ExerciseId from string");
    }

    #[test]
    fn negative_ids_are_rejected() {
        assert!("-1".parse::<WorkoutId>().is_err());
    }
}
