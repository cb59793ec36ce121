//! RECSTORE - Unsupported Client Surface
//! Administration, query, index, scan, UDF and node operations that a full
//! database client offers and the in-memory store does not.
//!
//! Each default method fails immediately with [`StoreError::Unsupported`],
//! which callers can tell apart from the data errors `NotFound` and
//! `TypeMismatch`.

use crate::engine::RecordStore;
use crate::error::{Result, StoreError};
use crate::types::{Key, Record};

/// Capability interface for the wider client surface.
pub trait ClusterOps {
    /// Names of the active server nodes. The store has none.
    fn node_names(&self) -> Vec<String> {
        Vec::new()
    }

    /// Look up a server node by name.
    fn node(&self, name: &str) -> Result<String> {
        Err(StoreError::InvalidNode(format!("{}: node not available", name)))
    }

    fn scan_all(&self, _namespace: &str, _set_name: &str, _bin_names: &[&str]) -> Result<Vec<(Key, Record)>> {
        Err(StoreError::Unsupported("scan_all"))
    }

    fn scan_node(
        &self,
        _node: &str,
        _namespace: &str,
        _set_name: &str,
        _bin_names: &[&str],
    ) -> Result<Vec<(Key, Record)>> {
        Err(StoreError::Unsupported("scan_node"))
    }

    fn query(&self, _namespace: &str, _set_name: &str, _filter: &str) -> Result<Vec<(Key, Record)>> {
        Err(StoreError::Unsupported("query"))
    }

    fn query_aggregate(&self, _namespace: &str, _set_name: &str, _package: &str, _function: &str) -> Result<Vec<Record>> {
        Err(StoreError::Unsupported("query_aggregate"))
    }

    fn execute_udf(&self, _key: &Key, _package: &str, _function: &str) -> Result<Record> {
        Err(StoreError::Unsupported("execute_udf"))
    }

    fn register_udf(&self, _client_path: &str, _server_path: &str) -> Result<()> {
        Err(StoreError::Unsupported("register_udf"))
    }

    fn remove_udf(&self, _server_path: &str) -> Result<()> {
        Err(StoreError::Unsupported("remove_udf"))
    }

    fn create_index(&self, _namespace: &str, _set_name: &str, _index_name: &str, _bin_name: &str) -> Result<()> {
        Err(StoreError::Unsupported("create_index"))
    }

    fn drop_index(&self, _namespace: &str, _set_name: &str, _index_name: &str) -> Result<()> {
        Err(StoreError::Unsupported("drop_index"))
    }

    fn truncate(&self, _namespace: &str, _set_name: &str) -> Result<()> {
        Err(StoreError::Unsupported("truncate"))
    }

    fn info(&self, _node: &str, _commands: &[&str]) -> Result<Vec<(String, String)>> {
        Err(StoreError::Unsupported("info"))
    }

    fn create_user(&self, _user: &str, _password: &str, _roles: &[&str]) -> Result<()> {
        Err(StoreError::Unsupported("create_user"))
    }

    fn drop_user(&self, _user: &str) -> Result<()> {
        Err(StoreError::Unsupported("drop_user"))
    }

    fn change_password(&self, _user: &str, _password: &str) -> Result<()> {
        Err(StoreError::Unsupported("change_password"))
    }

    fn grant_roles(&self, _user: &str, _roles: &[&str]) -> Result<()> {
        Err(StoreError::Unsupported("grant_roles"))
    }

    fn revoke_roles(&self, _user: &str, _roles: &[&str]) -> Result<()> {
        Err(StoreError::Unsupported("revoke_roles"))
    }

    fn create_role(&self, _role: &str, _privileges: &[&str]) -> Result<()> {
        Err(StoreError::Unsupported("create_role"))
    }

    fn drop_role(&self, _role: &str) -> Result<()> {
        Err(StoreError::Unsupported("drop_role"))
    }

    fn grant_privileges(&self, _role: &str, _privileges: &[&str]) -> Result<()> {
        Err(StoreError::Unsupported("grant_privileges"))
    }

    fn revoke_privileges(&self, _role: &str, _privileges: &[&str]) -> Result<()> {
        Err(StoreError::Unsupported("revoke_privileges"))
    }

    fn query_user(&self, _user: &str) -> Result<Vec<String>> {
        Err(StoreError::Unsupported("query_user"))
    }

    fn query_users(&self) -> Result<Vec<String>> {
        Err(StoreError::Unsupported("query_users"))
    }

    fn query_role(&self, _role: &str) -> Result<Vec<String>> {
        Err(StoreError::Unsupported("query_role"))
    }

    fn query_roles(&self) -> Result<Vec<String>> {
        Err(StoreError::Unsupported("query_roles"))
    }
}

impl ClusterOps for RecordStore {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_nodes() {
        let store = RecordStore::new();
        assert!(store.node_names().is_empty());
        assert!(matches!(store.node("bb9"), Err(StoreError::InvalidNode(_))));
    }

    #[test]
    fn test_every_operation_is_unsupported() {
        let store = RecordStore::new();
        let key = Key::new("test", "set", "k");

        let results: Vec<(&'static str, StoreError)> = vec![
            ("scan_all", store.scan_all("test", "set", &[]).unwrap_err()),
            ("scan_node", store.scan_node("n", "test", "set", &[]).unwrap_err()),
            ("query", store.query("test", "set", "a = 1").unwrap_err()),
            ("query_aggregate", store.query_aggregate("test", "set", "p", "f").unwrap_err()),
            ("execute_udf", store.execute_udf(&key, "p", "f").unwrap_err()),
            ("register_udf", store.register_udf("a.lua", "a.lua").unwrap_err()),
            ("remove_udf", store.remove_udf("a.lua").unwrap_err()),
            ("create_index", store.create_index("test", "set", "idx", "bin").unwrap_err()),
            ("drop_index", store.drop_index("test", "set", "idx").unwrap_err()),
            ("truncate", store.truncate("test", "set").unwrap_err()),
            ("info", store.info("n", &["status"]).unwrap_err()),
            ("create_user", store.create_user("u", "p", &[]).unwrap_err()),
            ("drop_user", store.drop_user("u").unwrap_err()),
            ("change_password", store.change_password("u", "p").unwrap_err()),
            ("grant_roles", store.grant_roles("u", &["r"]).unwrap_err()),
            ("revoke_roles", store.revoke_roles("u", &["r"]).unwrap_err()),
            ("create_role", store.create_role("r", &[]).unwrap_err()),
            ("drop_role", store.drop_role("r").unwrap_err()),
            ("grant_privileges", store.grant_privileges("r", &["read"]).unwrap_err()),
            ("revoke_privileges", store.revoke_privileges("r", &["read"]).unwrap_err()),
            ("query_user", store.query_user("u").unwrap_err()),
            ("query_users", store.query_users().unwrap_err()),
            ("query_role", store.query_role("r").unwrap_err()),
            ("query_roles", store.query_roles().unwrap_err()),
        ];

        for (name, err) in results {
            assert_eq!(err, StoreError::Unsupported(name));
            assert!(err.result_code().is_none());
        }
    }

    #[test]
    fn test_unsupported_does_not_touch_data() {
        let store = RecordStore::new();
        let key = Key::new("test", "set", "k");
        store.put(&key, &[crate::types::Bin::new("a", 1i64)]);

        assert!(store.truncate("test", "set").is_err());
        assert!(store.exists(&key));
    }
}
