//! ECS container metadata file model and reader.
//!
//! The agent rewrites the file after container start, so every read goes back
//! to disk; there is no caching.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Deserializer};

use crate::errors::BindError;

/// Value of `MetadataFileStatus` once the agent has finished writing.
pub const READY_STATUS: &str = "READY";

// Treat an explicit JSON null like an absent field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PortMapping {
    #[serde(rename = "ContainerPort", default)]
    pub container_port: i64,
    #[serde(rename = "HostPort", default)]
    pub host_port: i64,
    #[serde(rename = "BindIp", default, deserialize_with = "null_as_default")]
    pub bind_ip: String,
    #[serde(rename = "Protocol", default, deserialize_with = "null_as_default")]
    pub protocol: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NetworkInfo {
    #[serde(rename = "NetworkMode", default, deserialize_with = "null_as_default")]
    pub network_mode: String,
    #[serde(
        rename = "IPv4Addresses",
        default,
        deserialize_with = "null_as_default"
    )]
    pub ipv4_addresses: Vec<String>,
}

/// One parsed snapshot of the metadata file.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct ContainerMetadata {
    #[serde(rename = "Cluster", default, deserialize_with = "null_as_default")]
    pub cluster: String,
    #[serde(
        rename = "ContainerInstanceARN",
        alias = "ContainerInstanceId",
        default,
        deserialize_with = "null_as_default"
    )]
    pub container_instance_id: String,
    #[serde(rename = "TaskARN", default, deserialize_with = "null_as_default")]
    pub task_id: String,
    #[serde(rename = "ContainerName", default, deserialize_with = "null_as_default")]
    pub container_name: String,
    #[serde(rename = "ContainerID", default)]
    pub container_id: Option<String>,
    #[serde(rename = "DockerContainerName", default)]
    pub docker_container_name: Option<String>,
    #[serde(rename = "ImageID", default)]
    pub image_id: Option<String>,
    #[serde(rename = "ImageName", default)]
    pub image_name: Option<String>,
    #[serde(rename = "PortMappings", default, deserialize_with = "null_as_default")]
    pub port_mappings: Vec<PortMapping>,
    #[serde(rename = "Networks", default, deserialize_with = "null_as_default")]
    pub networks: Vec<NetworkInfo>,
    #[serde(rename = "MetadataFileStatus", default)]
    pub readiness_status: Option<String>,
}

impl ContainerMetadata {
    /// Ready only on an exact, case-sensitive `READY`.
    pub fn is_ready(&self) -> bool {
        self.readiness_status.as_deref() == Some(READY_STATUS)
    }
}

/// Parse metadata JSON; `path` is only used to label errors.
pub fn parse_metadata(bytes: &[u8], path: &Path) -> Result<ContainerMetadata, BindError> {
    serde_json::from_slice(bytes).map_err(|source| BindError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Read and parse the metadata file at `path`.
pub fn read_metadata(path: &Path) -> Result<ContainerMetadata, BindError> {
    let bytes = fs::read(path).map_err(|source| BindError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_metadata(&bytes, path)
}
