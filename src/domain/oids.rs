//! Well-known attribute type identifiers found in CMS `SignerInfo` attribute sets.
//! Keep this intentionally small; only attribute types seen in practice live here.

use der::asn1::ObjectIdentifier;

// === PKCS#9 ===

/// PKCS#9 contentType (1.2.840.113549.1.9.3)
pub const CONTENT_TYPE: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.113549.1.9.3");

/// PKCS#9 messageDigest (1.2.840.113549.1.9.4)
pub const MESSAGE_DIGEST: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.113549.1.9.4");

/// PKCS#9 signingTime (1.2.840.113549.1.9.5)
pub const SIGNING_TIME: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.113549.1.9.5");

/// PKCS#9 counterSignature (1.2.840.113549.1.9.6)
pub const COUNTER_SIGNATURE: ObjectIdentifier =
    ObjectIdentifier::new_unwrap("1.2.840.113549.1.9.6");

/// S/MIME capabilities (1.2.840.113549.1.9.15)
pub const SMIME_CAPABILITIES: ObjectIdentifier =
    ObjectIdentifier::new_unwrap("1.2.840.113549.1.9.15");

/// ESS signingCertificateV2 (1.2.840.113549.1.9.16.2.47)
pub const SIGNING_CERTIFICATE_V2: ObjectIdentifier =
    ObjectIdentifier::new_unwrap("1.2.840.113549.1.9.16.2.47");

// === Microsoft Authenticode ===

/// `SPC_STATEMENT_TYPE_OBJID` (1.3.6.1.4.1.311.2.1.11)
pub const SPC_STATEMENT_TYPE: ObjectIdentifier =
    ObjectIdentifier::new_unwrap("1.3.6.1.4.1.311.2.1.11");

/// `SPC_SP_OPUS_INFO_OBJID` (1.3.6.1.4.1.311.2.1.12)
pub const SPC_SP_OPUS_INFO: ObjectIdentifier =
    ObjectIdentifier::new_unwrap("1.3.6.1.4.1.311.2.1.12");

/// RFC 3161 timestamp token carried as an unsigned attribute (1.3.6.1.4.1.311.3.3.1)
pub const MS_RFC3161_COUNTER_SIGNATURE: ObjectIdentifier =
    ObjectIdentifier::new_unwrap("1.3.6.1.4.1.311.3.3.1");

const KNOWN: &[(ObjectIdentifier, &str)] = &[
    (CONTENT_TYPE, "contentType"),
    (MESSAGE_DIGEST, "messageDigest"),
    (SIGNING_TIME, "signingTime"),
    (COUNTER_SIGNATURE, "counterSignature"),
    (SMIME_CAPABILITIES, "smimeCapabilities"),
    (SIGNING_CERTIFICATE_V2, "signingCertificateV2"),
    (SPC_STATEMENT_TYPE, "spcStatementType"),
    (SPC_SP_OPUS_INFO, "spcSpOpusInfo"),
    (MS_RFC3161_COUNTER_SIGNATURE, "msRfc3161CounterSignature"),
];

/// Human-readable name for a well-known attribute type.
#[must_use]
pub fn friendly_name(oid: &ObjectIdentifier) -> Option<&'static str> {
    KNOWN
        .iter()
        .find(|(known, _)| known == oid)
        .map(|(_, name)| *name)
}
