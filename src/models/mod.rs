pub mod expiry;
pub mod todo;
pub mod validation;
pub mod window;

pub use todo::{TodoDraft, TodoPayload};
pub use validation::ValidationError;
pub use window::{DateWindow, ExpiryFilter};
