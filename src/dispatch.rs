//! Name-based routing of invocations to the ledger operations.
//!
//! Dispatch holds no state of its own: every call gets the store handle it
//! works against.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::ledger;
use crate::store::Store;

/// Which entry point an operation name was looked up in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Surface {
    /// Operations that may mutate state.
    Invoke,
    /// Read-only operations.
    Query,
}

impl Surface {
    pub fn as_str(self) -> &'static str {
        match self {
            Surface::Invoke => "invoke",
            Surface::Query => "query",
        }
    }

    /// Operation names this surface accepts.
    pub fn operations(self) -> &'static [&'static str] {
        match self {
            Surface::Invoke => INVOKE_OPS,
            Surface::Query => QUERY_OPS,
        }
    }
}

impl fmt::Display for Surface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

type Handler = fn(&dyn Store, &[String]) -> Result<Vec<u8>>;

const INVOKE_OPS: &[&str] = &["init", "write", "account", "assign"];
const QUERY_OPS: &[&str] = &["read"];

fn invoke_handler(function: &str) -> Option<Handler> {
    match function {
        "init" => Some(ledger::init),
        "write" => Some(ledger::write_marketer),
        "account" => Some(ledger::write_account),
        "assign" => Some(ledger::write_assignment),
        _ => None,
    }
}

fn query_handler(function: &str) -> Option<Handler> {
    match function {
        "read" => Some(ledger::read),
        _ => None,
    }
}

/// Bootstrap entry run once when the ledger is first deployed.
pub fn deploy(store: &dyn Store, args: &[String]) -> Result<Vec<u8>> {
    debug!("deploy is running");
    ledger::init(store, args)
}

/// Routes a mutating operation.
pub fn invoke(store: &dyn Store, function: &str, args: &[String]) -> Result<Vec<u8>> {
    dispatch(Surface::Invoke, store, function, args)
}

/// Routes a read-only operation.
pub fn query(store: &dyn Store, function: &str, args: &[String]) -> Result<Vec<u8>> {
    dispatch(Surface::Query, store, function, args)
}

/// Routes `function` on the given surface.
pub fn dispatch(
    surface: Surface,
    store: &dyn Store,
    function: &str,
    args: &[String],
) -> Result<Vec<u8>> {
    debug!(%surface, function, args = args.len(), "dispatching");
    let handler = match surface {
        Surface::Invoke => invoke_handler(function),
        Surface::Query => query_handler(function),
    };
    match handler {
        Some(handler) => handler(store, args),
        None => {
            warn!(%surface, function, "did not find func");
            Err(Error::UnknownOperation {
                surface,
                name: function.to_string(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn fields(n: usize, first: &str) -> Vec<String> {
        let mut v: Vec<String> = (0..n).map(|i| format!("f{}", i)).collect();
        v[0] = first.to_string();
        v
    }

    #[test]
    fn test_unknown_invoke_operation() {
        let store = MemoryStore::new();
        let err = invoke(&store, "delete", &[]).unwrap_err();
        assert_eq!(
            err,
            Error::UnknownOperation {
                surface: Surface::Invoke,
                name: "delete".into()
            }
        );
        assert!(err.to_string().contains("delete"));
    }

    #[test]
    fn test_read_is_not_an_invoke_operation() {
        let store = MemoryStore::new();
        assert!(matches!(
            invoke(&store, "read", &["k".into()]),
            Err(Error::UnknownOperation { .. })
        ));
    }

    #[test]
    fn test_write_is_not_a_query_operation() {
        let store = MemoryStore::new();
        assert!(matches!(
            query(&store, "write", &fields(24, "E1")),
            Err(Error::UnknownOperation { surface: Surface::Query, .. })
        ));
        assert!(store.is_empty());
    }

    #[test]
    fn test_names_are_case_sensitive() {
        let store = MemoryStore::new();
        assert!(invoke(&store, "Write", &fields(24, "E1")).is_err());
    }

    #[test]
    fn test_every_listed_operation_routes() {
        for surface in [Surface::Invoke, Surface::Query] {
            for op in surface.operations() {
                let known = match surface {
                    Surface::Invoke => invoke_handler(op).is_some(),
                    Surface::Query => query_handler(op).is_some(),
                };
                assert!(known, "{} {}", surface, op);
            }
        }
    }

    #[test]
    fn test_deploy_and_invoke_init_agree() {
        let a = MemoryStore::new();
        let b = MemoryStore::new();
        deploy(&a, &["seed".into()]).unwrap();
        invoke(&b, "init", &["seed".into()]).unwrap();
        assert_eq!(a.get("hello_world").unwrap(), b.get("hello_world").unwrap());
    }

    #[test]
    fn test_invoke_routes_each_kind() {
        let store = MemoryStore::new();
        assert_eq!(
            invoke(&store, "write", &fields(24, "E1")).unwrap(),
            b"Marketer added successfully".to_vec()
        );
        assert_eq!(
            invoke(&store, "account", &fields(10, "A1")).unwrap(),
            b"Account added successfully".to_vec()
        );
        assert_eq!(
            invoke(&store, "assign", &fields(29, "S1")).unwrap(),
            b"Assignment added successfully".to_vec()
        );
        assert_eq!(store.len(), 3);
    }
}
