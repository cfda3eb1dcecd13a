use dioxus::prelude::*;
use dioxus_router::{Link, Outlet, Routable};

use crate::context::AppContext;
use crate::views::{
    ClientDetailView, ClientsView, DashboardView, ExercisesView, LogSessionView, NewWorkoutView,
    ProgressView, SessionDetailView, WorkoutDetailView, WorkoutsView,
};

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", DashboardView)] Dashboard {},
        #[route("/clients", ClientsView)] Clients {},
        #[route("/clients/:id", ClientDetailView)] ClientDetail { id: u64 },
        #[route("/workouts", WorkoutsView)] Workouts {},
        #[route("/workouts/new", NewWorkoutView)] NewWorkout {},
        #[route("/workouts/:id", WorkoutDetailView)] WorkoutDetail { id: u64 },
        #[route("/exercises", ExercisesView)] Exercises {},
        #[route("/progress", ProgressView)] Progress {},
        #[route("/progress/log", LogSessionView)] LogSession {},
        #[route("/progress/session/:id", SessionDetailView)] SessionDetail { id: u64 },
}

#[component]
fn Layout() -> Element {
    rsx! {
        div { class: "app",
            Sidebar {}
            main { class: "content",
                Outlet::<Route> {}
            }
        }
    }
}

#[component]
fn Sidebar() -> Element {
    let ctx = use_context::<AppContext>();
    let trainer = ctx.trainer_name().to_owned();

    rsx! {
        nav { class: "sidebar",
            h1 { "Gymble" }
            ul {
                li { Link { to: Route::Dashboard {}, "Dashboard" } }
                li { Link { to: Route::Clients {}, "Clients" } }
                li { Link { to: Route::Workouts {}, "Workouts" } }
                li { Link { to: Route::Exercises {}, "Exercise Library" } }
                li { Link { to: Route::Progress {}, "Progress" } }
            }
            p { class: "sidebar-footer", "Signed in as {trainer}" }
        }
    }
}
