//! Unitform Form - Presentation-side controller
//!
//! Holds what the user has picked and typed, and turns it into the text
//! shown in the output field. Policies that belong to the form rather than
//! the engine live here:
//! - Choosing a category resets both unit selections to its default unit
//! - Text that does not parse as a number counts as 0.0
//! - Any conversion error renders as an empty output

mod input;
mod state;

pub use input::parse_input_value;
pub use state::{FormState, FormSnapshot, UnitChoice, TITLE};
