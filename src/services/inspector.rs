//! Attribute table inspection service.
//!
//! Produces a serializable per-type summary of an [`AttributeTable`] for display by the
//! CLI or for structured consumption as JSON.

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::str::FromStr;

use der::asn1::ObjectIdentifier;
use der::Encode;
use serde::Serialize;

use crate::domain::oids;
use crate::domain::pkcs7::AttributeTable;
use crate::infra::error::{AttributeError, AttributeResult};

/// Report rendering format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = AttributeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(AttributeError::ConfigurationError(format!(
                "Unknown output format: {s}"
            ))),
        }
    }
}

/// Resolved inspector settings
#[derive(Debug, Clone)]
pub struct InspectorConfig {
    /// Display names overriding the built-in well-known names
    pub aliases: BTreeMap<ObjectIdentifier, String>,
    /// Maximum DER bytes rendered per value
    pub max_value_bytes: usize,
    pub output_format: OutputFormat,
    pub show_values: bool,
}

impl Default for InspectorConfig {
    fn default() -> Self {
        Self {
            aliases: BTreeMap::new(),
            max_value_bytes: 32,
            output_format: OutputFormat::Text,
            show_values: true,
        }
    }
}

/// Summary of every record stored for one attribute type
#[derive(Debug, Clone, Serialize)]
pub struct AttributeSummary {
    pub oid: String,
    pub name: Option<String>,
    pub record_count: usize,
    pub value_count: usize,
    /// Hex DER of each value across all records, truncated per configuration
    pub values: Vec<String>,
}

/// Whole-table report
#[derive(Debug, Clone, Serialize)]
pub struct AttributeReport {
    pub total_records: usize,
    pub distinct_types: usize,
    pub entries: Vec<AttributeSummary>,
}

pub struct AttributeInspector {
    config: InspectorConfig,
}

impl Default for AttributeInspector {
    fn default() -> Self {
        Self::new(InspectorConfig::default())
    }
}

impl AttributeInspector {
    #[must_use]
    pub fn new(config: InspectorConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &InspectorConfig {
        &self.config
    }

    /// Display name for an attribute type: configured alias first, then well-known name.
    #[must_use]
    pub fn name_for(&self, oid: &ObjectIdentifier) -> Option<String> {
        self.config
            .aliases
            .get(oid)
            .cloned()
            .or_else(|| oids::friendly_name(oid).map(str::to_string))
    }

    pub fn inspect(&self, table: &AttributeTable) -> AttributeResult<AttributeReport> {
        let mut entries = Vec::with_capacity(table.oid_count());

        for (oid, entry) in table.entries() {
            let mut values = Vec::new();
            let mut value_count = 0;
            for attribute in entry {
                for value in attribute.values.iter() {
                    value_count += 1;
                    if self.config.show_values {
                        values.push(self.render_value(&value.to_der()?));
                    }
                }
            }

            entries.push(AttributeSummary {
                oid: oid.to_string(),
                name: self.name_for(oid),
                record_count: entry.len(),
                value_count,
                values,
            });
        }

        Ok(AttributeReport {
            total_records: table.count(),
            distinct_types: table.oid_count(),
            entries,
        })
    }

    /// Render a report in the configured output format.
    pub fn render(&self, report: &AttributeReport) -> AttributeResult<String> {
        match self.config.output_format {
            OutputFormat::Json => serde_json::to_string_pretty(report)
                .map_err(|e| AttributeError::InvalidInput(format!("JSON rendering failed: {e}"))),
            OutputFormat::Text => Ok(Self::render_text(report)),
        }
    }

    fn render_value(&self, der: &[u8]) -> String {
        if der.len() <= self.config.max_value_bytes {
            hex::encode(der)
        } else {
            format!(
                "{}... ({} bytes)",
                hex::encode(&der[..self.config.max_value_bytes]),
                der.len()
            )
        }
    }

    fn render_text(report: &AttributeReport) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "Attributes: {} record(s) across {} type(s)",
            report.total_records, report.distinct_types
        );
        for summary in &report.entries {
            let name = summary
                .name
                .as_deref()
                .map(|n| format!(" ({n})"))
                .unwrap_or_default();
            let _ = writeln!(
                out,
                "  {}{}: {} record(s), {} value(s)",
                summary.oid, name, summary.record_count, summary.value_count
            );
            for (index, value) in summary.values.iter().enumerate() {
                let _ = writeln!(out, "    [{index}] {value}");
            }
        }
        out
    }
}
