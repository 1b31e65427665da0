pub mod confirmation;
pub mod hint_bar;
pub mod payments_panel;
pub mod provider_form;
pub mod provider_table;
mod text_input;
pub mod toasts;

pub use text_input::TextInputState;
