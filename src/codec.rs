//! JSON encoding of records as stored ledger values.
//!
//! A stored value is a flat object of wire name to string, fields in declared
//! order. The value does not say which kind it is.

use crate::error::{Error, Result};
use crate::schema::{AnyRecord, Record, RecordKind};

/// Outcome of looking at stored bytes without decoding them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Presence {
    Absent,
    Present(Vec<u8>),
}

impl Presence {
    /// Zero-length values count as absent; the store uses them for "no value".
    pub fn of(bytes: Vec<u8>) -> Self {
        if bytes.is_empty() {
            Presence::Absent
        } else {
            Presence::Present(bytes)
        }
    }

    pub fn is_present(&self) -> bool {
        matches!(self, Presence::Present(_))
    }

    pub fn into_bytes(self) -> Option<Vec<u8>> {
        match self {
            Presence::Absent => None,
            Presence::Present(bytes) => Some(bytes),
        }
    }
}

pub fn encode<R: Record>(record: &R) -> Result<Vec<u8>> {
    serde_json::to_vec(record).map_err(|e| Error::Encode {
        kind: R::KIND,
        reason: e.to_string(),
    })
}

pub fn decode<R: Record>(bytes: &[u8]) -> Result<R> {
    if bytes.is_empty() {
        return Err(Error::Decode {
            kind: R::KIND,
            reason: "empty value".to_string(),
        });
    }
    serde_json::from_slice(bytes).map_err(|e| Error::Decode {
        kind: R::KIND,
        reason: e.to_string(),
    })
}

/// Decodes `bytes` as the caller-chosen `kind`.
pub fn decode_as(kind: RecordKind, bytes: &[u8]) -> Result<AnyRecord> {
    Ok(match kind {
        RecordKind::Marketer => AnyRecord::Marketer(decode(bytes)?),
        RecordKind::Account => AnyRecord::Account(decode(bytes)?),
        RecordKind::Assignment => AnyRecord::Assignment(decode(bytes)?),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{Account, Assignment, Marketer};
    use proptest::prelude::*;

    fn account(number: &str, prefix: &str) -> Account {
        let mut values: Vec<String> = (0..10).map(|i| format!("field-{}", i)).collect();
        values[0] = number.to_string();
        values[1] = prefix.to_string();
        Account::from_positional(&values).unwrap()
    }

    #[test]
    fn test_encoding_uses_wire_names() {
        let bytes = encode(&account("A100", "P1")).unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["AccountNumber"], "A100");
        assert_eq!(json["PolicyPrefix"], "P1");
        assert_eq!(json.as_object().unwrap().len(), 10);
    }

    #[test]
    fn test_encoding_keeps_declared_order() {
        let bytes = encode(&account("A1", "P1")).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert!(text.starts_with(r#"{"AccountNumber":"A1","PolicyPrefix":"P1""#));
    }

    #[test]
    fn test_marketer_ea_role_wire_name_is_plain() {
        let m = Marketer {
            marketer_ea_role: "lead".into(),
            ..Default::default()
        };
        let text = String::from_utf8(encode(&m).unwrap()).unwrap();
        assert!(text.contains(r#""MarketerEaRole":"lead""#));
    }

    #[test]
    fn test_decode_empty_fails() {
        let err = decode::<Account>(b"").unwrap_err();
        assert!(matches!(err, Error::Decode { kind: RecordKind::Account, .. }));
    }

    #[test]
    fn test_decode_garbage_fails() {
        assert!(decode::<Marketer>(b"not json").is_err());
        assert!(decode::<Marketer>(b"[1,2,3]").is_err());
    }

    #[test]
    fn test_decode_wrong_kind_fails() {
        let bytes = encode(&account("A100", "P1")).unwrap();
        assert!(decode::<Marketer>(&bytes).is_err());
        assert!(decode_as(RecordKind::Assignment, &bytes).is_err());
        assert!(decode_as(RecordKind::Account, &bytes).is_ok());
    }

    #[test]
    fn test_decode_missing_field_fails() {
        let bytes = br#"{"AccountNumber":"A1"}"#;
        assert!(decode::<Account>(bytes).is_err());
    }

    #[test]
    fn test_presence() {
        assert_eq!(Presence::of(Vec::new()), Presence::Absent);
        let present = Presence::of(b"x".to_vec());
        assert!(present.is_present());
        assert_eq!(present.into_bytes(), Some(b"x".to_vec()));
    }

    fn values(n: usize) -> impl Strategy<Value = Vec<String>> {
        proptest::collection::vec(any::<String>(), n)
    }

    proptest! {
        #[test]
        fn prop_marketer_round_trip(v in values(24)) {
            let m = Marketer::from_positional(&v).unwrap();
            prop_assert_eq!(decode::<Marketer>(&encode(&m).unwrap()).unwrap(), m);
        }

        #[test]
        fn prop_account_round_trip(v in values(10)) {
            let a = Account::from_positional(&v).unwrap();
            prop_assert_eq!(decode::<Account>(&encode(&a).unwrap()).unwrap(), a);
        }

        #[test]
        fn prop_assignment_round_trip(v in values(29)) {
            let a = Assignment::from_positional(&v).unwrap();
            prop_assert_eq!(decode::<Assignment>(&encode(&a).unwrap()).unwrap(), a);
        }
    }
}
