//! Variable interpolation engine.
//!
//! Pure functions that resolve `{{name}}` placeholders against flat variable
//! mappings, merge layered mappings by precedence, and report which
//! placeholders a mapping cannot satisfy. Nothing here holds state, so every
//! function is safe to call from any thread without coordination.

pub mod extract;
pub mod scope;
pub mod substitution;

pub use extract::{extract_variables, validate_variables};
pub use scope::{merge_variables, VariableScope};
pub use substitution::{has_placeholders, resolve_deep, resolve_string, Resolve};
