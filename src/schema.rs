//! Record shapes stored in the ledger.
//!
//! Every field is an opaque string. Field order in each declaration is the
//! positional order used by the command surface, and the serialized name is
//! the wire name the ledger value carries.

use std::fmt;
use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::decode::{decode_positional, Fields};
use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    Marketer,
    Account,
    Assignment,
}

impl RecordKind {
    pub const ALL: [RecordKind; 3] = [
        RecordKind::Marketer,
        RecordKind::Account,
        RecordKind::Assignment,
    ];

    pub fn name(self) -> &'static str {
        match self {
            RecordKind::Marketer => "Marketer",
            RecordKind::Account => "Account",
            RecordKind::Assignment => "Assignment",
        }
    }

    /// Number of positional fields a record of this kind is built from.
    pub fn field_count(self) -> usize {
        self.fields().len()
    }

    pub fn fields(self) -> &'static [&'static str] {
        match self {
            RecordKind::Marketer => Marketer::FIELDS,
            RecordKind::Account => Account::FIELDS,
            RecordKind::Assignment => Assignment::FIELDS,
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RecordKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "marketer" => Ok(RecordKind::Marketer),
            "account" => Ok(RecordKind::Account),
            "assignment" | "assign" => Ok(RecordKind::Assignment),
            other => Err(format!("unknown record kind: {}", other)),
        }
    }
}

/// A fixed-shape record that can be built from positional input.
pub trait Record: Serialize + DeserializeOwned + Sized {
    const KIND: RecordKind;

    /// Wire names in positional order.
    const FIELDS: &'static [&'static str];

    /// Primary key under which the record is stored.
    fn key(&self) -> &str;

    /// Builds the record from a cursor whose length has already been checked.
    fn assemble(fields: &mut Fields<'_>) -> Self;

    /// Field values in positional order.
    fn to_positional(&self) -> Vec<String>;

    fn from_positional(values: &[String]) -> Result<Self> {
        decode_positional(values)
    }
}

macro_rules! record {
    (
        $(#[$meta:meta])*
        pub struct $name:ident keyed by $key:ident {
            $( $field:ident => $wire:literal, )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
        #[serde(deny_unknown_fields)]
        pub struct $name {
            $(
                #[serde(rename = $wire)]
                pub $field: String,
            )+
        }

        impl Record for $name {
            const KIND: RecordKind = RecordKind::$name;
            const FIELDS: &'static [&'static str] = &[$($wire),+];

            fn key(&self) -> &str {
                &self.$key
            }

            fn assemble(fields: &mut Fields<'_>) -> Self {
                Self {
                    $( $field: fields.take(), )+
                }
            }

            fn to_positional(&self) -> Vec<String> {
                vec![$( self.$field.clone() ),+]
            }
        }
    };
}

record! {
    /// Marketer identity and role. Keyed by `EId`.
    pub struct Marketer keyed by eid {
        eid => "EId",
        tax_id => "TaxId",
        begin_date => "BeginDate",
        marketer_type_flag => "MarketerTypeFlag",
        marketer_type => "MarketerType",
        marketer_role => "MarketerRole",
        marketer_status => "MarketerStatus",
        legal_name => "LegalName",
        gender => "Gender",
        dob => "DoB",
        reg_state_name => "RegStateName",
        marketer_effective_date => "MarketerEffectiveDate",
        marketer_end_date => "MarketerEndDate",
        first_name => "FirstName",
        last_name => "LastName",
        business_address => "BusinessAddress",
        city => "City",
        state => "State",
        postal_code => "PostalCode",
        phone_number => "PhoneNumber",
        email => "EMail",
        marketer_ea_role => "MarketerEaRole",
        owner_role => "OwnerRole",
        org_name => "OrgName",
    }
}

record! {
    /// Financial account. Keyed by `AccountNumber`.
    pub struct Account keyed by account_number {
        account_number => "AccountNumber",
        policy_prefix => "PolicyPrefix",
        internal_account_name => "InternalAccountName",
        account_status => "AccountStatus",
        account_status_effective_date => "AccountStatusEffectiveDate",
        validation_status => "ValidationStatus",
        account_effective_date => "AccountEffectiveDate",
        marketer_product => "MarketerProduct",
        disclosure_status => "DisclosureStatus",
        disclosure_effective_date => "DisclosureEffectiveDate",
    }
}

record! {
    /// Ownership and split of an account between marketers, carrying a copy
    /// of the marketer's identity fields. Keyed by `AssignmentId`.
    pub struct Assignment keyed by assignment_id {
        assignment_id => "AssignmentId",
        assignment_role_type => "AssignmentRoleType",
        split_percentage => "SplitPercentage",
        assignment_effective_date => "AssignmentEffectiveDate",
        assignment_status => "AssignmentStatus",
        assignment_end_date => "AssignmentEndDate",
        split_effective_date => "SplitEffectiveDate",
        owner_eid => "OwnerEId",
        owner_role => "OwnerRole",
        org_name => "OrgName",
        policy_prefix => "PolicyPrefix",
        account_number => "AccountNumber",
        eid => "EId",
        tax_id => "TaxId",
        begin_date => "BeginDate",
        marketer_type_flag => "MarketerTypeFlag",
        marketer_type => "MarketerType",
        marketer_role => "MarketerRole",
        marketer_status => "MarketerStatus",
        legal_name => "LegalName",
        gender => "Gender",
        dob => "DoB",
        reg_state_name => "RegStateName",
        marketer_effective_date => "MarketerEffectiveDate",
        marketer_end_date => "MarketerEndDate",
        first_name => "FirstName",
        last_name => "LastName",
        email => "EMail",
        marketer_ea_role => "MarketerEaRole",
    }
}

/// A record of any kind, for callers that pick the kind at runtime.
///
/// The ledger itself never tags values with their kind; the caller supplies
/// it. Decoding bytes written for one kind as another fails.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum AnyRecord {
    Marketer(Marketer),
    Account(Account),
    Assignment(Assignment),
}

impl AnyRecord {
    pub fn kind(&self) -> RecordKind {
        match self {
            AnyRecord::Marketer(_) => RecordKind::Marketer,
            AnyRecord::Account(_) => RecordKind::Account,
            AnyRecord::Assignment(_) => RecordKind::Assignment,
        }
    }

    pub fn key(&self) -> &str {
        match self {
            AnyRecord::Marketer(r) => r.key(),
            AnyRecord::Account(r) => r.key(),
            AnyRecord::Assignment(r) => r.key(),
        }
    }
}

impl From<Marketer> for AnyRecord {
    fn from(r: Marketer) -> Self {
        AnyRecord::Marketer(r)
    }
}

impl From<Account> for AnyRecord {
    fn from(r: Account) -> Self {
        AnyRecord::Account(r)
    }
}

impl From<Assignment> for AnyRecord {
    fn from(r: Assignment) -> Self {
        AnyRecord::Assignment(r)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_counts() {
        assert_eq!(RecordKind::Marketer.field_count(), 24);
        assert_eq!(RecordKind::Account.field_count(), 10);
        assert_eq!(RecordKind::Assignment.field_count(), 29);
    }

    #[test]
    fn test_marketer_field_order() {
        let fields = Marketer::FIELDS;
        assert_eq!(fields[0], "EId");
        assert_eq!(fields[9], "DoB");
        assert_eq!(fields[21], "MarketerEaRole");
        assert_eq!(fields[23], "OrgName");
    }

    #[test]
    fn test_assignment_embeds_account_linkage() {
        let fields = Assignment::FIELDS;
        assert_eq!(fields[10], "PolicyPrefix");
        assert_eq!(fields[11], "AccountNumber");
        assert_eq!(fields[12], "EId");
        assert_eq!(fields[28], "MarketerEaRole");
    }

    #[test]
    fn test_wire_names_are_unique_per_kind() {
        for kind in RecordKind::ALL {
            let mut names = kind.fields().to_vec();
            names.sort_unstable();
            names.dedup();
            assert_eq!(names.len(), kind.field_count(), "{}", kind);
        }
    }

    #[test]
    fn test_key_is_first_field() {
        let account = Account {
            account_number: "A100".into(),
            ..Default::default()
        };
        assert_eq!(account.key(), "A100");
        assert_eq!(account.to_positional()[0], "A100");
    }

    #[test]
    fn test_kind_from_str() {
        assert_eq!("Marketer".parse::<RecordKind>(), Ok(RecordKind::Marketer));
        assert_eq!("assign".parse::<RecordKind>(), Ok(RecordKind::Assignment));
        assert!("policy".parse::<RecordKind>().is_err());
    }

    #[test]
    fn test_any_record_reports_kind_and_key() {
        let any: AnyRecord = Marketer {
            eid: "E7".into(),
            ..Default::default()
        }
        .into();
        assert_eq!(any.kind(), RecordKind::Marketer);
        assert_eq!(any.key(), "E7");
    }
}
