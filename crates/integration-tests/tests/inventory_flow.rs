//! End-to-end inventory flows: catalog-shaped queries against a real
//! interpreter, through the same runner the CLI wires up.

#![cfg(unix)]

use std::sync::Arc;

use hostfacts_core::application::{Execution, FacetQuery};
use hostfacts_core::domain::facets::{Bios, OperatingSystem};
use hostfacts_core::error::AppError;
use hostfacts_core::port::time_provider::SystemTimeProvider;
use hostfacts_core::port::ScriptError;
use hostfacts_infra_shell::{ShellConfig, ShellRunner};

fn sh_runner() -> ShellRunner {
    ShellRunner::new(ShellConfig::sh(), Arc::new(SystemTimeProvider))
}

#[tokio::test]
async fn single_object_payload_maps_to_one_record() {
    let runner = sh_runner();
    let query = FacetQuery::<Bios>::new(
        "bios",
        r#"echo '{"Manufacturer":"Acme","SerialNumber":"S-1"}'"#,
    );

    let records = query
        .all(Execution::OneShot { runner: &runner })
        .await
        .unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].manufacturer.as_deref(), Some("Acme"));
    assert_eq!(records[0].serial_number.as_deref(), Some("S-1"));
    assert_eq!(records[0].version, None);
}

#[tokio::test]
async fn array_payload_preserves_record_order() {
    let runner = sh_runner();
    let query = FacetQuery::<Bios>::new(
        "bios",
        r#"echo '[{"Manufacturer":"First"},{"Manufacturer":"Second"}]'"#,
    );

    let records = query
        .all(Execution::OneShot { runner: &runner })
        .await
        .unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].manufacturer.as_deref(), Some("First"));
    assert_eq!(records[1].manufacturer.as_deref(), Some("Second"));
}

#[tokio::test]
async fn empty_array_is_no_records_not_an_error() {
    let runner = sh_runner();
    let query = FacetQuery::<Bios>::new("bios", "echo '[]'");

    let records = query
        .all(Execution::OneShot { runner: &runner })
        .await
        .unwrap();

    assert!(records.is_empty());
}

#[tokio::test]
async fn pretty_printed_payload_parses_like_compact() {
    let runner = sh_runner();
    // ConvertTo-Json output is indented across lines; the mapper must not
    // care.
    let query = FacetQuery::<OperatingSystem>::new(
        "os",
        r#"printf '{\n    "Caption": "Linux",\n    "Version": "6.8"\n}\n'"#,
    );

    let record = query
        .one(Execution::OneShot { runner: &runner })
        .await
        .unwrap()
        .unwrap();

    assert_eq!(record.caption.as_deref(), Some("Linux"));
    assert_eq!(record.version.as_deref(), Some("6.8"));
}

#[tokio::test]
async fn non_zero_exit_surfaces_stderr_in_the_error() {
    let runner = sh_runner();
    let query = FacetQuery::<Bios>::new("bios", "echo fail >&2; exit 1");

    let err = query
        .all(Execution::OneShot { runner: &runner })
        .await
        .unwrap_err();

    match &err {
        AppError::Script(ScriptError::NonZeroExit { code, stderr, .. }) => {
            assert_eq!(*code, 1);
            assert_eq!(stderr, "fail\n");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(err.to_string().contains("fail"));
}

#[tokio::test]
async fn malformed_payload_is_surfaced_never_swallowed() {
    let runner = sh_runner();
    let query = FacetQuery::<Bios>::new("bios", "echo 'not json'");

    let err = query
        .all(Execution::OneShot { runner: &runner })
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Payload(_)));
    assert!(err.to_string().contains("not json"));
}

#[tokio::test]
async fn bounded_deadline_kills_a_hung_query() {
    let runner = sh_runner();
    let query = FacetQuery::<Bios>::new("bios", "sleep 20");

    let err = query
        .all(Execution::Bounded {
            runner: &runner,
            timeout_secs: 1,
        })
        .await
        .unwrap_err();

    match err {
        AppError::Script(ScriptError::TimedOut {
            command,
            timeout_secs,
        }) => {
            assert_eq!(command, "sleep 20");
            assert_eq!(timeout_secs, 1);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn mapped_records_reserialize_with_cim_keys() {
    let runner = sh_runner();
    let query = FacetQuery::<Bios>::new(
        "bios",
        r#"echo '{"Manufacturer":"Acme","SMBIOSBIOSVersion":"1.2.3"}'"#,
    );

    let records = query
        .all(Execution::OneShot { runner: &runner })
        .await
        .unwrap();

    // What a display surface dumps keeps the wire casing.
    let value = serde_json::to_value(&records[0]).unwrap();
    assert_eq!(value["Manufacturer"], serde_json::json!("Acme"));
    assert_eq!(value["SMBIOSBIOSVersion"], serde_json::json!("1.2.3"));
}

#[tokio::test]
async fn blank_payload_yields_absent_optional() {
    let runner = sh_runner();
    let query = FacetQuery::<OperatingSystem>::new("os", "true");

    let record = query
        .one(Execution::OneShot { runner: &runner })
        .await
        .unwrap();

    assert!(record.is_none());
}
