//! Immutable OID → attribute table for CMS `signedAttrs` / `unsignedAttrs`.
//!
//! A table is built once from a set of encoded attributes and never mutated afterwards.
//! `add` and `remove` hand back a new table; every previously obtained table keeps
//! observing exactly what it observed before. Cloning a table is a reference count bump.

use std::fmt;
use std::sync::Arc;

use der::asn1::{ObjectIdentifier, SetOfVec};
use der::{Any, Decode, Encode, Reader, SliceReader, Tag, Tagged};
use indexmap::map::Entry;
use indexmap::IndexMap;
use x509_cert::attr::{Attribute, AttributeValue, Attributes};

use super::attributes::AttributeEntry;
use crate::infra::error::{AttributeError, AttributeResult};

/// Backing map of an [`AttributeTable`]. Iterates in first-insertion order of identifiers.
pub type AttributeMap = IndexMap<ObjectIdentifier, AttributeEntry>;

/// Multi-valued map from attribute type to the `Attribute` records carrying it.
///
/// Records sharing an identifier keep their insertion order; identifiers iterate in the
/// order they were first seen.
#[derive(Clone, Default)]
pub struct AttributeTable {
    entries: Arc<AttributeMap>,
}

impl AttributeTable {
    /// Empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an already well-formed mapping as is; no merging is applied.
    #[must_use]
    pub fn from_mapping(entries: AttributeMap) -> Self {
        Self {
            entries: Arc::new(entries),
        }
    }

    /// Build from an ordered sequence of encoded values, each of which must decode as an
    /// `Attribute`. Fails without producing a table if any element does not.
    pub fn from_tagged_values<'a, I>(values: I) -> AttributeResult<Self>
    where
        I: IntoIterator<Item = &'a Any>,
    {
        let mut entries = AttributeMap::new();
        for (index, value) in values.into_iter().enumerate() {
            let attribute = decode_attribute(value).map_err(|e| {
                log::debug!("Element {index} is not an Attribute: {e}");
                AttributeError::Asn1Error(format!("element {index} is not an Attribute: {e}"))
            })?;
            merge_insert(&mut entries, attribute);
        }
        Ok(Self::built(entries))
    }

    /// Build from a decoded `SET OF` encoded values.
    pub fn from_set(set: &SetOfVec<Any>) -> AttributeResult<Self> {
        Self::from_tagged_values(set.iter())
    }

    /// Build from the generic `Attributes` container.
    #[must_use]
    pub fn from_attributes(attributes: &Attributes) -> Self {
        Self::from_attribute_list(attributes.iter().cloned())
    }

    /// Build from already-typed records, merge-inserting in iteration order.
    pub fn from_attribute_list<I>(attributes: I) -> Self
    where
        I: IntoIterator<Item = Attribute>,
    {
        let mut entries = AttributeMap::new();
        for attribute in attributes {
            merge_insert(&mut entries, attribute);
        }
        Self::built(entries)
    }

    /// Decode a DER `SET OF Attribute` and build a table from it. Identical records are
    /// kept, so the output of [`Self::to_der`] always loads back.
    pub fn from_der(bytes: &[u8]) -> AttributeResult<Self> {
        let set = Any::from_der(bytes)?;
        if set.tag() != Tag::Set {
            return Err(AttributeError::Asn1Error(format!(
                "expected SET OF Attribute, found {}",
                set.tag()
            )));
        }

        let mut reader = SliceReader::new(set.value())?;
        let mut entries = AttributeMap::new();
        while !reader.is_finished() {
            merge_insert(&mut entries, Attribute::decode(&mut reader)?);
        }
        Ok(Self::built(entries))
    }

    fn built(entries: AttributeMap) -> Self {
        let table = Self::from_mapping(entries);
        log::debug!(
            "Built attribute table: {} records across {} attribute types",
            table.count(),
            table.oid_count()
        );
        table
    }

    // === Lookup ===

    /// First record stored for `oid`.
    #[must_use]
    pub fn get(&self, oid: &ObjectIdentifier) -> Option<&Attribute> {
        self.entries.get(oid).map(AttributeEntry::first)
    }

    /// Every record stored for `oid` in insertion order; empty when absent.
    #[must_use]
    pub fn get_all(&self, oid: &ObjectIdentifier) -> &[Attribute] {
        match self.entries.get(oid) {
            Some(entry) => entry.as_slice(),
            None => &[],
        }
    }

    /// First value of the first record for `oid`, the usual accessor for single-valued
    /// attributes such as contentType or messageDigest.
    #[must_use]
    pub fn first_value(&self, oid: &ObjectIdentifier) -> Option<&AttributeValue> {
        self.get(oid).and_then(|attribute| attribute.values.iter().next())
    }

    /// Total number of records across all attribute types.
    #[must_use]
    pub fn count(&self) -> usize {
        self.entries.values().map(AttributeEntry::len).sum()
    }

    /// Number of distinct attribute types.
    #[must_use]
    pub fn oid_count(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn contains(&self, oid: &ObjectIdentifier) -> bool {
        self.entries.contains_key(oid)
    }

    /// Attribute types in first-insertion order.
    pub fn oids(&self) -> impl Iterator<Item = &ObjectIdentifier> + '_ {
        self.entries.keys()
    }

    /// Per-type entries in first-insertion order.
    pub fn entries(&self) -> impl Iterator<Item = (&ObjectIdentifier, &AttributeEntry)> + '_ {
        self.entries.iter()
    }

    /// Flattened records, in the same order as [`Self::to_ordered_sequence`].
    pub fn iter(&self) -> impl Iterator<Item = &Attribute> + '_ {
        self.entries.values().flat_map(AttributeEntry::iter)
    }

    /// Whether both tables are backed by the same storage.
    #[must_use]
    pub fn shares_storage_with(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.entries, &other.entries)
    }

    // === Export ===

    /// Copy of the backing map, suitable for [`Self::from_mapping`].
    #[must_use]
    pub fn to_mapping(&self) -> AttributeMap {
        (*self.entries).clone()
    }

    /// All records flattened: identifiers in map order, records per identifier in
    /// insertion order.
    #[must_use]
    pub fn to_ordered_sequence(&self) -> Vec<Attribute> {
        self.iter().cloned().collect()
    }

    /// Records re-encoded as generic values; the inverse of [`Self::from_tagged_values`].
    pub fn to_tagged_values(&self) -> AttributeResult<Vec<Any>> {
        self.iter()
            .map(|attribute| -> AttributeResult<Any> {
                Ok(Any::from_der(&attribute.to_der()?)?)
            })
            .collect()
    }

    /// Records wrapped in the generic `Attributes` container. The container is a DER
    /// `SET OF`, so its element order is the canonical DER order.
    ///
    /// `Attributes` refuses duplicate elements, so this fails when two records are
    /// byte-for-byte identical. [`Self::to_der`] has no such restriction.
    pub fn to_attributes(&self) -> AttributeResult<Attributes> {
        Ok(SetOfVec::try_from(self.to_ordered_sequence())?)
    }

    /// DER `SET OF Attribute` holding every record, elements in canonical DER order.
    /// Identical records are all encoded.
    pub fn to_der(&self) -> AttributeResult<Vec<u8>> {
        let mut encoded = self
            .iter()
            .map(Encode::to_der)
            .collect::<Result<Vec<_>, _>>()?;
        encoded.sort();

        let set = Any::new(Tag::Set, encoded.concat())?;
        Ok(set.to_der()?)
    }

    // === Copy-on-write updates ===

    /// Table with `attributes` merge-inserted in argument order. Returns a handle to the
    /// same storage when nothing is given.
    #[must_use]
    pub fn add<I>(&self, attributes: I) -> Self
    where
        I: IntoIterator<Item = Attribute>,
    {
        let mut attributes = attributes.into_iter().peekable();
        if attributes.peek().is_none() {
            return self.clone();
        }

        let mut entries = self.to_mapping();
        for attribute in attributes {
            log::trace!("Adding attribute {}", attribute.oid);
            merge_insert(&mut entries, attribute);
        }
        Self::from_mapping(entries)
    }

    /// Table with a new single-valued record `oid = { value }` merge-inserted.
    pub fn add_value(&self, oid: ObjectIdentifier, value: AttributeValue) -> AttributeResult<Self> {
        let attribute = Attribute {
            oid,
            values: SetOfVec::try_from(vec![value])?,
        };
        let mut entries = self.to_mapping();
        merge_insert(&mut entries, attribute);
        Ok(Self::from_mapping(entries))
    }

    /// Table without any record of type `oid`. Returns a handle to the same storage when
    /// `oid` is absent.
    #[must_use]
    pub fn remove(&self, oid: &ObjectIdentifier) -> Self {
        if !self.contains(oid) {
            return self.clone();
        }

        let mut entries = self.to_mapping();
        if let Some(removed) = entries.shift_remove(oid) {
            log::trace!("Removed {} record(s) of type {oid}", removed.len());
        }
        Self::from_mapping(entries)
    }
}

fn decode_attribute(value: &Any) -> AttributeResult<Attribute> {
    Ok(Attribute::from_der(&value.to_der()?)?)
}

fn merge_insert(entries: &mut AttributeMap, attribute: Attribute) {
    match entries.entry(attribute.oid) {
        Entry::Occupied(mut slot) => slot.get_mut().push(attribute),
        Entry::Vacant(slot) => {
            slot.insert(AttributeEntry::new(attribute));
        }
    }
}

impl PartialEq for AttributeTable {
    fn eq(&self, other: &Self) -> bool {
        self.shares_storage_with(other) || *self.entries == *other.entries
    }
}

impl Eq for AttributeTable {}

impl FromIterator<Attribute> for AttributeTable {
    fn from_iter<I: IntoIterator<Item = Attribute>>(iter: I) -> Self {
        Self::from_attribute_list(iter)
    }
}

impl From<&Attributes> for AttributeTable {
    fn from(attributes: &Attributes) -> Self {
        Self::from_attributes(attributes)
    }
}

impl fmt::Debug for AttributeTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "AttributeTable(types={}, records={})",
            self.oid_count(),
            self.count()
        )
    }
}
