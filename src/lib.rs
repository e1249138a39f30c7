//! CMS Attribute Table Library
//!
//! An immutable, multi-valued map from attribute type (OID) to the `Attribute` records
//! carrying it, modeling the `signedAttrs` and `unsignedAttrs` fields of a CMS `SignerInfo`.
//! Tables are built from encoded attribute sets, queried by type, exported back to the
//! generic `Attributes` container, and updated copy-on-write.

pub mod domain;
pub mod infra;
pub mod services;

pub use domain::oids;
pub use domain::pkcs7::{AttributeEntry, AttributeMap, AttributeTable};
pub use infra::{config, error};
pub use infra::error::{AttributeError, AttributeResult};
pub use services::{AttributeInspector, InspectorConfig, OutputFormat};
