//! Attribute fixtures.
//!
//! Values are small DER INTEGERs so records of the same type stay distinguishable
//! in assertions.

use der::asn1::{ObjectIdentifier, SetOfVec};
use der::{Any, Decode, Encode};
use x509_cert::attr::Attribute;

pub const OID_A: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.113549.1.9.3");
pub const OID_B: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.113549.1.9.4");
pub const OID_C: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.113549.1.9.5");

/// DER INTEGER holding `value`.
pub fn int(value: u8) -> Any {
    Any::from_der(&[0x02, 0x01, value]).expect("valid INTEGER")
}

/// Single-valued attribute `oid = { INTEGER value }`.
pub fn attr(oid: ObjectIdentifier, value: u8) -> Attribute {
    Attribute {
        oid,
        values: SetOfVec::try_from(vec![int(value)]).expect("one-element set"),
    }
}

/// Attribute re-encoded as a generic tagged value.
pub fn tagged(attribute: &Attribute) -> Any {
    Any::from_der(&attribute.to_der().expect("encode")).expect("decode as Any")
}
