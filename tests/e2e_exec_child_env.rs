use std::fs;
use std::process::Command;

fn bin() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_ecs-bind"));
    cmd.env_remove("ECS_CONTAINER_METADATA_FILE")
        .env("NO_COLOR", "1");
    cmd
}

#[test]
fn test_missing_separator_is_usage_error() {
    let out = bin().args(["sh", "-c", "true"]).output().expect("run");
    assert!(!out.status.success());
    assert_eq!(out.status.code(), Some(2), "clap usage errors exit with 2");
}

#[test]
fn test_missing_metadata_env_fails_with_config_error() {
    let out = bin().args(["--", "sh", "-c", "true"]).output().expect("run");
    assert_eq!(out.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(
        stderr.contains("metadata file location not set"),
        "stderr: {stderr}"
    );
}

#[test]
fn test_exec_child_sees_derived_variables() {
    let td = tempfile::tempdir().expect("tmpdir");
    let path = td.path().join("metadata.json");
    fs::write(
        &path,
        r#"{"ContainerID":"c0ffee","PortMappings":[{"ContainerPort":80,"HostPort":32768,"BindIp":"0.0.0.0","Protocol":"tcp"}],"MetadataFileStatus":"READY"}"#,
    )
    .expect("write");

    let out = bin()
        .env("ECS_CONTAINER_METADATA_FILE", &path)
        .env("PORT_TCP_80", "stale")
        .env("ECS_BIND_E2E_KEEP", "kept")
        .args([
            "--",
            "sh",
            "-c",
            "printf '%s %s %s' \"$PORT_TCP_80\" \"$CONTAINER_ID\" \"$ECS_BIND_E2E_KEEP\"",
        ])
        .output()
        .expect("run");

    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
    assert_eq!(String::from_utf8_lossy(&out.stdout), "32768 c0ffee kept");
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("warning: overwriting environment variable PORT_TCP_80"));
}

#[test]
fn test_verbose_prints_info_lines_before_exec() {
    let td = tempfile::tempdir().expect("tmpdir");
    let path = td.path().join("metadata.json");
    fs::write(
        &path,
        r#"{"PortMappings":[{"ContainerPort":53,"HostPort":40000,"Protocol":"udp"}],"MetadataFileStatus":"READY"}"#,
    )
    .expect("write");

    let out = bin()
        .env("ECS_CONTAINER_METADATA_FILE", &path)
        .args(["--verbose", "--", "true"])
        .output()
        .expect("run");

    assert!(out.status.success());
    assert!(String::from_utf8_lossy(&out.stdout).contains("info: With environment PORT_UDP_53=40000"));
}

#[test]
fn test_unknown_program_exits_127() {
    let td = tempfile::tempdir().expect("tmpdir");
    let path = td.path().join("metadata.json");
    fs::write(&path, r#"{"MetadataFileStatus":"READY"}"#).expect("write");

    let out = bin()
        .env("ECS_CONTAINER_METADATA_FILE", &path)
        .args(["--", "ecs-bind-definitely-not-a-program"])
        .output()
        .expect("run");

    assert_eq!(out.status.code(), Some(127));
}
