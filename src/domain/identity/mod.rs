pub mod entity;
pub mod invariants;
pub mod parser;

pub use entity::{IdentityKey, ParsedIdentity};
pub use invariants::validate_identity;
pub use parser::{clean_display_name, parse_professor_name};
