//! Terminal presentation: output modes, badges, receipts and spinners.

pub mod context;
pub mod mode;
pub mod progress;
pub mod render;
pub mod theme;

pub use context::UiContext;
pub use progress::Spinner;
pub use render::{badge, hint, print_error, receipt};
pub use theme::Badge;
