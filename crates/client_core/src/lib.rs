pub mod cache;
pub mod controller;
pub mod error;
pub mod render;
pub mod search;
pub mod store;
pub mod tags;
pub mod validation;

pub use controller::{FormBinding, InteractionController, UiAction};
pub use error::{RemoteError, TagSelectionConflict, ValidationError};
pub use render::{FormFields, Renderer};
pub use search::KeyDisposition;
pub use store::{ContactService, ContactStore};
