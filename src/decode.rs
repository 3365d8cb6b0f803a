//! Positional decoding: ordered input strings to a typed record.

use std::slice;

use crate::error::{Error, Result};
use crate::schema::{Record, RecordKind};

/// Cursor over positional values handed to [`Record::assemble`].
pub struct Fields<'a> {
    iter: slice::Iter<'a, String>,
}

impl<'a> Fields<'a> {
    fn new(values: &'a [String]) -> Self {
        Self {
            iter: values.iter(),
        }
    }

    /// Next value in declared order. Length is validated before a cursor is
    /// ever constructed, so the cursor never runs dry.
    pub fn take(&mut self) -> String {
        self.iter.next().cloned().unwrap_or_default()
    }
}

/// Fails with [`Error::Arity`] unless `values` has exactly the field count of
/// `kind`.
pub fn check_arity(kind: RecordKind, values: &[String]) -> Result<()> {
    let expected = kind.field_count();
    if values.len() != expected {
        return Err(Error::Arity {
            kind,
            expected,
            got: values.len(),
        });
    }
    Ok(())
}

/// Builds a record by assigning `values[i]` to the record's i-th field.
///
/// Field contents are not inspected: a date field accepts any string.
pub fn decode_positional<R: Record>(values: &[String]) -> Result<R> {
    check_arity(R::KIND, values)?;
    Ok(R::assemble(&mut Fields::new(values)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{Account, Assignment, Marketer};

    fn numbered(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("v{}", i)).collect()
    }

    #[test]
    fn test_marketer_fields_land_in_order() {
        let m: Marketer = decode_positional(&numbered(24)).unwrap();
        assert_eq!(m.eid, "v0");
        assert_eq!(m.tax_id, "v1");
        assert_eq!(m.dob, "v9");
        assert_eq!(m.email, "v20");
        assert_eq!(m.org_name, "v23");
    }

    #[test]
    fn test_assignment_fields_land_in_order() {
        let a: Assignment = decode_positional(&numbered(29)).unwrap();
        assert_eq!(a.assignment_id, "v0");
        assert_eq!(a.split_percentage, "v2");
        assert_eq!(a.owner_eid, "v7");
        assert_eq!(a.account_number, "v11");
        assert_eq!(a.eid, "v12");
        assert_eq!(a.marketer_ea_role, "v28");
    }

    #[test]
    fn test_too_few_is_arity_error() {
        let err = decode_positional::<Account>(&numbered(9)).unwrap_err();
        assert_eq!(
            err,
            Error::Arity {
                kind: RecordKind::Account,
                expected: 10,
                got: 9
            }
        );
    }

    #[test]
    fn test_too_many_is_arity_error() {
        let err = decode_positional::<Marketer>(&numbered(25)).unwrap_err();
        assert!(matches!(err, Error::Arity { got: 25, .. }));
    }

    #[test]
    fn test_empty_input_is_arity_error() {
        assert!(decode_positional::<Assignment>(&[]).is_err());
    }

    #[test]
    fn test_contents_are_not_validated() {
        let mut values = numbered(10);
        values[6] = "not a date".into();
        let a: Account = decode_positional(&values).unwrap();
        assert_eq!(a.account_effective_date, "not a date");
    }

    #[test]
    fn test_positional_round_trip() {
        let values = numbered(24);
        let m = Marketer::from_positional(&values).unwrap();
        assert_eq!(m.to_positional(), values);
    }
}
