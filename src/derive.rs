//! Environment variables derived from a ready metadata snapshot.

use std::collections::BTreeMap;

use crate::metadata::ContainerMetadata;

pub const CONTAINER_ID_KEY: &str = "CONTAINER_ID";

/// Derived key/value pairs in sorted key order, plus the keys that were
/// produced more than once during derivation (later source entry wins).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DerivedEnv {
    vars: BTreeMap<String, String>,
    collisions: Vec<String>,
}

impl DerivedEnv {
    fn put(&mut self, key: String, value: String) {
        if self.vars.contains_key(&key) {
            self.collisions.push(key.clone());
        }
        self.vars.insert(key, value);
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// Keys overwritten within this derivation, in the order they occurred.
    pub fn collisions(&self) -> &[String] {
        &self.collisions
    }
}

/// `PORT_<PROTOCOL>_<CONTAINER_PORT>`, protocol upper-cased.
pub fn port_env_key(protocol: &str, container_port: i64) -> String {
    format!("PORT_{}_{}", protocol.to_uppercase(), container_port)
}

pub fn derive_env(meta: &ContainerMetadata) -> DerivedEnv {
    let mut out = DerivedEnv::default();

    if let Some(id) = &meta.container_id {
        out.put(CONTAINER_ID_KEY.to_string(), id.clone());
    }

    for pm in &meta.port_mappings {
        out.put(
            port_env_key(&pm.protocol, pm.container_port),
            pm.host_port.to_string(),
        );
    }

    out
}
