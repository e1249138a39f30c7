//! Parsing of user-supplied attribute types and values.

use der::asn1::ObjectIdentifier;
use der::{Any, Decode, Encode};

use crate::infra::error::{AttributeError, AttributeResult};

/// Parse a dotted-decimal attribute type. The OID must decode again from its own DER
/// encoding, otherwise a table carrying it could not be read back.
pub fn parse_oid(dotted: &str) -> AttributeResult<ObjectIdentifier> {
    let oid = ObjectIdentifier::new(dotted.trim())
        .map_err(|e| AttributeError::InvalidInput(format!("Invalid OID '{dotted}': {e}")))?;

    let der = oid.to_der()?;
    match ObjectIdentifier::from_der(&der) {
        Ok(decoded) if decoded == oid => Ok(oid),
        Ok(decoded) => Err(AttributeError::InvalidInput(format!(
            "OID '{dotted}' decodes back as {decoded}"
        ))),
        Err(e) => Err(AttributeError::InvalidInput(format!(
            "OID '{dotted}' cannot be decoded from its DER encoding: {e}"
        ))),
    }
}

/// Parse hex text holding one complete DER TLV into an attribute value.
pub fn parse_hex_value(text: &str) -> AttributeResult<Any> {
    let cleaned: String = text
        .chars()
        .filter(|c| !c.is_ascii_whitespace() && *c != ':')
        .collect();
    let bytes = hex::decode(&cleaned)
        .map_err(|e| AttributeError::InvalidInput(format!("Invalid hex value: {e}")))?;
    Ok(Any::from_der(&bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use der::{Tag, Tagged};

    #[test]
    fn parses_dotted_oid() {
        let oid = parse_oid(" 1.2.840.113549.1.9.3 ").unwrap();
        assert_eq!(oid, crate::domain::oids::CONTENT_TYPE);
    }

    #[test]
    fn rejects_malformed_oid() {
        assert!(matches!(
            parse_oid("1.2.a"),
            Err(AttributeError::InvalidInput(_))
        ));
    }

    #[test]
    fn rejects_oid_that_does_not_survive_der() {
        assert!(matches!(
            parse_oid("1.2.3"),
            Err(AttributeError::InvalidInput(_))
        ));
    }

    #[test]
    fn parses_hex_with_separators() {
        let value = parse_hex_value("02:01 05").unwrap();
        assert_eq!(value.tag(), Tag::Integer);
        assert_eq!(value.value(), &[0x05]);
    }

    #[test]
    fn rejects_trailing_bytes_and_bad_hex() {
        assert!(matches!(
            parse_hex_value("zz"),
            Err(AttributeError::InvalidInput(_))
        ));
        assert!(matches!(
            parse_hex_value("0201050000"),
            Err(AttributeError::Asn1Error(_))
        ));
    }
}
