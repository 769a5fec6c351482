//! Concrete widgets.

mod toolbar_tab_button;
mod validating_field;

pub use toolbar_tab_button::ToolbarTabButton;
pub use validating_field::{ValidatingField, ValidationTrigger};
