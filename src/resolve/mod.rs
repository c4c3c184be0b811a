mod reference;

pub use reference::{ReferenceResolver, ReferenceSpec};
