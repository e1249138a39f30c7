//! DER import/export of attribute tables through the generic `Attributes` container.

mod common;

use cms_attribute_table::{oids, AttributeError, AttributeInspector, AttributeTable};
use common::fixtures::{attr, int, OID_A, OID_B};
use der::asn1::{ObjectIdentifier, SetOfVec};
use der::{Any, Decode, Encode};
use x509_cert::attr::{Attribute, Attributes};

fn content_type_attribute() -> Attribute {
    // OBJECT IDENTIFIER 1.2.840.113549.1.7.1 (id-data)
    let id_data = Any::from_der(&[
        0x06, 0x09, 0x2A, 0x86, 0x48, 0x86, 0xF7, 0x0D, 0x01, 0x07, 0x01,
    ])
    .unwrap();
    Attribute {
        oid: oids::CONTENT_TYPE,
        values: SetOfVec::try_from(vec![id_data]).unwrap(),
    }
}

fn message_digest_attribute() -> Attribute {
    let mut digest = vec![0x04, 0x20];
    digest.extend_from_slice(&[0x5A; 32]);
    Attribute {
        oid: oids::MESSAGE_DIGEST,
        values: SetOfVec::try_from(vec![Any::from_der(&digest).unwrap()]).unwrap(),
    }
}

#[test]
fn signed_attributes_survive_der_round_trip() {
    let table =
        AttributeTable::from_attribute_list([content_type_attribute(), message_digest_attribute()]);

    let der = table.to_der().unwrap();
    assert_eq!(der[0], 0x31, "SET OF tag expected");

    let decoded = AttributeTable::from_der(&der).unwrap();
    assert_eq!(decoded, table);
    assert_eq!(decoded.get(&oids::CONTENT_TYPE), Some(&content_type_attribute()));
    assert_eq!(
        decoded.first_value(&oids::MESSAGE_DIGEST).map(Any::value),
        Some(&[0x5A; 32][..])
    );
}

#[test]
fn attributes_container_round_trip() {
    let table = AttributeTable::from_attribute_list([attr(OID_B, 1), attr(OID_A, 1)]);
    let container: Attributes = table.to_attributes().unwrap();
    assert_eq!(container.len(), 2);

    let rebuilt = AttributeTable::from_attributes(&container);
    assert_eq!(rebuilt, table);
    assert_eq!(AttributeTable::from(&container), table);
}

#[test]
fn container_uses_canonical_der_order() {
    let table = AttributeTable::from_attribute_list([attr(OID_B, 1), attr(OID_A, 1)]);
    let container = table.to_attributes().unwrap();
    let oids: Vec<ObjectIdentifier> = container.iter().map(|a| a.oid).collect();
    // ...9.3 encodes smaller than ...9.4
    assert_eq!(oids, vec![OID_A, OID_B]);
}

#[test]
fn from_der_rejects_non_set_input() {
    let not_a_set = int(3).to_der().unwrap();
    let err = AttributeTable::from_der(&not_a_set).unwrap_err();
    assert!(matches!(err, AttributeError::Asn1Error(_)));
}

#[test]
fn from_der_rejects_truncated_input() {
    let der = AttributeTable::from_attribute_list([attr(OID_A, 1)])
        .to_der()
        .unwrap();
    let truncated = &der[..der.len() - 1];
    assert!(AttributeTable::from_der(truncated).is_err());
}

#[test]
fn empty_table_encodes_as_empty_set() {
    let der = AttributeTable::new().to_der().unwrap();
    assert_eq!(der, vec![0x31, 0x00]);
    assert!(AttributeTable::from_der(&der).unwrap().is_empty());
}

#[test]
fn duplicate_records_export_and_reload() {
    let table = AttributeTable::from_attribute_list([attr(OID_A, 1), attr(OID_A, 1)]);
    assert_eq!(table.count(), 2);
    assert_eq!(table.to_ordered_sequence().len(), 2);
    assert_eq!(table.to_tagged_values().unwrap().len(), 2);

    let der = table.to_der().unwrap();
    let reloaded = AttributeTable::from_der(&der).unwrap();
    assert_eq!(reloaded.count(), 2);
    assert_eq!(reloaded, table);

    // SetOfVec refuses identical elements
    assert!(table.to_attributes().is_err());
}

#[test]
fn repeated_add_value_still_encodes() {
    let table = AttributeTable::new()
        .add_value(OID_B, int(7))
        .unwrap()
        .add_value(OID_B, int(7))
        .unwrap();
    assert_eq!(table.get_all(&OID_B).len(), 2);

    let der = table.to_der().unwrap();
    assert_eq!(AttributeTable::from_der(&der).unwrap().count(), 2);
}

#[test]
fn to_der_matches_container_encoding_without_duplicates() {
    let table = AttributeTable::from_attribute_list([
        attr(OID_B, 2),
        attr(OID_A, 1),
        attr(OID_B, 1),
    ]);
    let via_container = table.to_attributes().unwrap().to_der().unwrap();
    assert_eq!(table.to_der().unwrap(), via_container);
}

#[test]
fn inspector_reports_decoded_set() {
    let table =
        AttributeTable::from_attribute_list([content_type_attribute(), message_digest_attribute()]);
    let decoded = AttributeTable::from_der(&table.to_der().unwrap()).unwrap();

    let report = AttributeInspector::default().inspect(&decoded).unwrap();
    assert_eq!(report.total_records, 2);
    assert_eq!(report.distinct_types, 2);

    let names: Vec<_> = report
        .entries
        .iter()
        .map(|e| e.name.as_deref().unwrap_or("?"))
        .collect();
    assert!(names.contains(&"contentType"));
    assert!(names.contains(&"messageDigest"));

    let content_type = report
        .entries
        .iter()
        .find(|e| e.oid == "1.2.840.113549.1.9.3")
        .unwrap();
    assert_eq!(content_type.values, vec!["06092a864886f70d010701"]);
}
