//! Service layer module root.
//! Contains presentation services built on top of the attribute domain types.

pub mod input;
pub mod inspector;

pub use input::{parse_hex_value, parse_oid};
pub use inspector::{
    AttributeInspector, AttributeReport, AttributeSummary, InspectorConfig, OutputFormat,
};
