//! PKCS#7 / CMS attribute domain types.
//! `SignerInfo` signed and unsigned attributes are modeled as an immutable table keyed by
//! attribute type.

pub mod attribute_table;
pub mod attributes;

pub use attribute_table::{AttributeMap, AttributeTable};
pub use attributes::AttributeEntry;
