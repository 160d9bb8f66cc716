//! Calendar handlers.
//!
//! - `view.rs`: GET month grid and day-click selection
//! - `crud.rs`: POST create, update, delete
//! - `api.rs`: JSON endpoints over the same event store
//! - `forms.rs`: query and form structures shared by the handlers

pub mod api;
pub mod crud;
pub mod forms;
pub mod view;

pub use crud::{create, delete, update};
pub use view::{index, select_day};
