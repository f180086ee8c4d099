pub mod app_store;
pub mod state;

pub use app_store::AppStore;
pub use state::{apply, Transition, ViewState};
