use std::fs;

use ecs_bind::{read_metadata, BindError, NetworkInfo, PortMapping};

const FULL_METADATA: &str = r#"{
    "Cluster": "default",
    "ContainerInstanceARN": "arn:aws:ecs:us-west-2:012345678910:container-instance/1f73d099",
    "TaskARN": "arn:aws:ecs:us-west-2:012345678910:task/2b88376d",
    "ContainerID": "98e44444008169587b826b4cd76c6732e5899747e753af1e19a35db64f9e9c32",
    "ContainerName": "metadata",
    "DockerContainerName": "/ecs-metadata-7-metadata-f0edfbd6d09fdef20800",
    "ImageID": "sha256:c24f66af34b4d76558f7743109e2476b6325fcf6cc167c6e1e07cd121a22b341",
    "ImageName": "httpd:2.4",
    "PortMappings": [
        {"ContainerPort": 80, "HostPort": 80, "BindIp": "", "Protocol": "tcp"}
    ],
    "Networks": [
        {"NetworkMode": "bridge", "IPv4Addresses": ["172.17.0.2"]}
    ],
    "MetadataFileStatus": "READY"
}"#;

#[test]
fn test_read_full_metadata_file() {
    let td = tempfile::tempdir().expect("tmpdir");
    let path = td.path().join("metadata.json");
    fs::write(&path, FULL_METADATA).expect("write");

    let meta = read_metadata(&path).expect("read");
    assert_eq!(meta.cluster, "default");
    assert!(meta.container_instance_id.ends_with("container-instance/1f73d099"));
    assert!(meta.task_id.ends_with("task/2b88376d"));
    assert_eq!(meta.container_name, "metadata");
    assert!(meta.container_id.as_deref().is_some_and(|id| id.starts_with("98e4")));
    assert_eq!(meta.image_name.as_deref(), Some("httpd:2.4"));
    assert_eq!(
        meta.port_mappings,
        vec![PortMapping {
            container_port: 80,
            host_port: 80,
            bind_ip: String::new(),
            protocol: "tcp".to_string(),
        }]
    );
    assert_eq!(
        meta.networks,
        vec![NetworkInfo {
            network_mode: "bridge".to_string(),
            ipv4_addresses: vec!["172.17.0.2".to_string()],
        }]
    );
    assert!(meta.is_ready());
}

#[test]
fn test_read_pending_metadata_without_ports() {
    let td = tempfile::tempdir().expect("tmpdir");
    let path = td.path().join("metadata.json");
    fs::write(
        &path,
        r#"{"Cluster":"default","ContainerInstanceId":"ci-1","PortMappings":null,"MetadataFileStatus":null}"#,
    )
    .expect("write");

    let meta = read_metadata(&path).expect("read");
    assert_eq!(meta.container_instance_id, "ci-1");
    assert!(meta.port_mappings.is_empty());
    assert!(meta.networks.is_empty());
    assert!(meta.container_id.is_none());
    assert!(!meta.is_ready());
}

#[test]
fn test_read_rereads_file_each_call() {
    let td = tempfile::tempdir().expect("tmpdir");
    let path = td.path().join("metadata.json");
    fs::write(&path, r#"{"MetadataFileStatus":"NOT_READY"}"#).expect("write");
    assert!(!read_metadata(&path).expect("first").is_ready());

    fs::write(&path, r#"{"MetadataFileStatus":"READY"}"#).expect("rewrite");
    assert!(read_metadata(&path).expect("second").is_ready());
}

#[test]
fn test_missing_file_is_io_error() {
    let td = tempfile::tempdir().expect("tmpdir");
    let path = td.path().join("absent.json");
    match read_metadata(&path) {
        Err(BindError::Io { path: p, .. }) => assert_eq!(p, path),
        other => panic!("expected Io error, got {other:?}"),
    }
}

#[test]
fn test_truncated_file_is_parse_error() {
    let td = tempfile::tempdir().expect("tmpdir");
    let path = td.path().join("metadata.json");
    fs::write(&path, &FULL_METADATA[..FULL_METADATA.len() / 2]).expect("write");
    let err = read_metadata(&path).expect_err("should fail");
    assert!(matches!(err, BindError::Parse { .. }));
    assert!(err.to_string().starts_with("failed to parse "));
}

#[test]
fn test_status_comparison_is_case_sensitive() {
    let td = tempfile::tempdir().expect("tmpdir");
    let path = td.path().join("metadata.json");
    fs::write(&path, r#"{"MetadataFileStatus":"ready"}"#).expect("write");
    assert!(!read_metadata(&path).expect("read").is_ready());
}
