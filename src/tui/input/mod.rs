//! Form-style input widgets.

pub mod choice;
pub mod dropdown;
pub mod text_input;

pub use choice::MultipleChoice;
pub use dropdown::Dropdown;
pub use text_input::TextInput;
