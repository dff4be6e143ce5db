//! Value objects - Immutable objects defined by their attributes

mod attributes;

pub use attributes::Attributes;
