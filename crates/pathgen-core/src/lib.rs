pub mod diagnostic;
pub mod error;
pub mod tolerance;
pub mod traits;

pub use diagnostic::{Diagnostic, DiagnosticKind};
pub use error::{PathError, Result};
pub use tolerance::Tolerance;
