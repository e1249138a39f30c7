//! Per-identifier storage for attribute records.
//!
//! Most identifiers in a CMS attribute set carry exactly one `Attribute`, so an entry
//! keeps a lone record inline and only allocates a list once a second record with the
//! same type arrives.

use std::fmt;
use std::slice;

use der::asn1::ObjectIdentifier;
use x509_cert::attr::Attribute;

use crate::infra::error::{AttributeError, AttributeResult};

#[derive(Clone, PartialEq, Eq)]
enum Repr {
    Single(Attribute),
    // Holds at least two records; only created by promotion.
    Multiple(Vec<Attribute>),
}

/// All `Attribute` records sharing one attribute type, in insertion order.
///
/// An entry is never empty. A single record and a list of records are the same thing
/// to every reader; the distinction is only a storage optimization.
#[derive(Clone, PartialEq, Eq)]
pub struct AttributeEntry {
    repr: Repr,
}

impl AttributeEntry {
    /// Entry holding exactly one record.
    #[must_use]
    pub fn new(attribute: Attribute) -> Self {
        Self {
            repr: Repr::Single(attribute),
        }
    }

    /// Merge-insert: append `attribute` after the existing records, promoting a single
    /// record to a list on the second insertion.
    pub fn push(&mut self, attribute: Attribute) {
        let repr = std::mem::replace(&mut self.repr, Repr::Multiple(Vec::new()));
        self.repr = match repr {
            Repr::Single(existing) => Repr::Multiple(vec![existing, attribute]),
            Repr::Multiple(mut list) => {
                list.push(attribute);
                Repr::Multiple(list)
            }
        };
    }

    /// First record added for this attribute type.
    #[must_use]
    pub fn first(&self) -> &Attribute {
        match &self.repr {
            Repr::Single(attribute) => attribute,
            Repr::Multiple(list) => &list[0],
        }
    }

    /// Every record, in insertion order.
    #[must_use]
    pub fn as_slice(&self) -> &[Attribute] {
        match &self.repr {
            Repr::Single(attribute) => slice::from_ref(attribute),
            Repr::Multiple(list) => list,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        match &self.repr {
            Repr::Single(_) => 1,
            Repr::Multiple(list) => list.len(),
        }
    }

    /// Always `false`; present for API symmetry with `len`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Whether the entry has been promoted to list storage.
    #[must_use]
    pub fn is_multiple(&self) -> bool {
        matches!(self.repr, Repr::Multiple(_))
    }

    /// Attribute type of the stored records.
    #[must_use]
    pub fn oid(&self) -> &ObjectIdentifier {
        &self.first().oid
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<Attribute> {
        match self.repr {
            Repr::Single(attribute) => vec![attribute],
            Repr::Multiple(list) => list,
        }
    }

    pub fn iter(&self) -> slice::Iter<'_, Attribute> {
        self.as_slice().iter()
    }
}

impl From<Attribute> for AttributeEntry {
    fn from(attribute: Attribute) -> Self {
        Self::new(attribute)
    }
}

impl TryFrom<Vec<Attribute>> for AttributeEntry {
    type Error = AttributeError;

    /// Build an entry from an ordered record list. A one-element list is stored as a
    /// single record; an empty list or records of differing types are rejected.
    fn try_from(records: Vec<Attribute>) -> AttributeResult<Self> {
        let mut records = records.into_iter();
        let first = records.next().ok_or_else(|| {
            AttributeError::InvalidEntry("entry must hold at least one attribute".to_string())
        })?;

        let mut entry = Self::new(first);
        for attribute in records {
            if attribute.oid != *entry.oid() {
                return Err(AttributeError::InvalidEntry(format!(
                    "attribute type {} does not match entry type {}",
                    attribute.oid,
                    entry.oid()
                )));
            }
            entry.push(attribute);
        }
        Ok(entry)
    }
}

impl<'a> IntoIterator for &'a AttributeEntry {
    type Item = &'a Attribute;
    type IntoIter = slice::Iter<'a, Attribute>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Debug for AttributeEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "AttributeEntry(oid={}, records={})",
            self.oid(),
            self.len()
        )
    }
}
