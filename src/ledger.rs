//! Write and read paths over a [`Store`].
//!
//! Marketer writes are rejected when anything is already stored under the
//! key. Account and assignment writes replace the previous value.

use tracing::{debug, info, warn};

use crate::codec::{self, Presence};
use crate::decode::decode_positional;
use crate::error::{Error, Result};
use crate::schema::{Account, Assignment, Marketer, Record};
use crate::store::Store;

/// Key the deploy-time seed value is stored under.
pub const SEED_KEY: &str = "hello_world";

pub const MARKETER_ADDED: &[u8] = b"Marketer added successfully";
pub const ACCOUNT_ADDED: &[u8] = b"Account added successfully";
pub const ASSIGNMENT_ADDED: &[u8] = b"Assignment added successfully";

fn expect_args(args: &[String], expected: usize) -> Result<()> {
    if args.len() != expected {
        return Err(Error::ArgumentCount {
            expected,
            got: args.len(),
        });
    }
    Ok(())
}

/// Stores the single seed argument under [`SEED_KEY`].
pub fn init(store: &dyn Store, args: &[String]) -> Result<Vec<u8>> {
    expect_args(args, 1)?;
    store.put(SEED_KEY, args[0].as_bytes())?;
    info!(key = SEED_KEY, "seed value stored");
    Ok(Vec::new())
}

/// Looks at `key` without decoding: only whether bytes exist matters.
pub fn probe(store: &dyn Store, key: &str) -> Result<Presence> {
    Ok(Presence::of(store.get(key)?))
}

pub fn write_marketer(store: &dyn Store, args: &[String]) -> Result<Vec<u8>> {
    let marketer: Marketer = decode_positional(args)?;
    let key = marketer.key();

    if probe(store, key)?.is_present() {
        warn!(key, "marketer already exists, write rejected");
        return Err(Error::DuplicateKey {
            key: key.to_string(),
        });
    }

    let bytes = codec::encode(&marketer)?;
    store.put(key, &bytes)?;
    info!(key, "marketer written");
    Ok(MARKETER_ADDED.to_vec())
}

fn write_unchecked<R: Record>(store: &dyn Store, args: &[String]) -> Result<()> {
    let record: R = decode_positional(args)?;
    let key = record.key();
    let bytes = codec::encode(&record)?;
    store.put(key, &bytes)?;
    info!(key, kind = %R::KIND, "record written");
    Ok(())
}

/// Writes an account, replacing any previous value under its number.
pub fn write_account(store: &dyn Store, args: &[String]) -> Result<Vec<u8>> {
    write_unchecked::<Account>(store, args)?;
    Ok(ACCOUNT_ADDED.to_vec())
}

/// Writes an assignment, replacing any previous value under its id.
pub fn write_assignment(store: &dyn Store, args: &[String]) -> Result<Vec<u8>> {
    write_unchecked::<Assignment>(store, args)?;
    Ok(ASSIGNMENT_ADDED.to_vec())
}

/// Raw bytes stored under `key`, unchanged. Absence is [`Error::NotFound`].
pub fn read_key(store: &dyn Store, key: &str) -> Result<Vec<u8>> {
    match probe(store, key)? {
        Presence::Present(bytes) => {
            debug!(key, len = bytes.len(), "state retrieved");
            Ok(bytes)
        }
        Presence::Absent => Err(Error::NotFound {
            key: key.to_string(),
        }),
    }
}

/// Query entry: `args` is `[key]`.
pub fn read(store: &dyn Store, args: &[String]) -> Result<Vec<u8>> {
    expect_args(args, 1)?;
    read_key(store, &args[0])
}

/// Reads `key` and decodes it as `R`.
pub fn read_record<R: Record>(store: &dyn Store, key: &str) -> Result<R> {
    let bytes = read_key(store, key)?;
    codec::decode(&bytes)
}
