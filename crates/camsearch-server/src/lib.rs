//! camsearch HTTP server: routes, shared state, directory poller and
//! in-memory search history.

pub mod history;
pub mod refresh;
pub mod routes;
pub mod state;

pub use routes::build_router;
pub use state::AppState;
