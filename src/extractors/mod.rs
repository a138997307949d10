pub mod validated;

pub use validated::{Validated, ValidatedInput};
