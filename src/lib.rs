//! Marketer, account and assignment records kept in a key-value ledger.
//!
//! Records arrive as ordered string arguments, are built into typed records,
//! serialized as JSON and written to a [`Store`]. Marketer keys are unique;
//! account and assignment writes overwrite.
//!
//! # Examples
//! ```
//! use chainrecord_lib::{dispatch, MemoryStore};
//!
//! let store = MemoryStore::new();
//! let mut args: Vec<String> = (0..10).map(|i| format!("v{}", i)).collect();
//! args[0] = "A100".to_string();
//!
//! let payload = dispatch::invoke(&store, "account", &args).unwrap();
//! assert_eq!(payload, b"Account added successfully");
//!
//! let raw = dispatch::query(&store, "read", &["A100".to_string()]).unwrap();
//! let account: chainrecord_lib::Account = chainrecord_lib::codec::decode(&raw).unwrap();
//! assert_eq!(account.account_number, "A100");
//! ```

pub mod codec;
pub mod decode;
pub mod dispatch;
pub mod error;
pub mod ledger;
pub mod schema;
pub mod store;

pub use codec::Presence;
pub use dispatch::Surface;
pub use error::{Error, Result, StoreError};
pub use schema::{Account, AnyRecord, Assignment, Marketer, Record, RecordKind};
pub use store::{MemoryStore, Store};
