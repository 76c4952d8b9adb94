use std::process::Command;

fn memprobe() -> Command {
    Command::new(env!("CARGO_BIN_EXE_memprobe-cli"))
}

#[test]
fn soft_limit_prints_diagnostic_and_exits_cleanly() {
    let output = memprobe()
        .args(["--limit", "3MiB", "--interval-ms", "0"])
        .output()
        .unwrap();

    assert!(output.status.success(), "{:?}", output);
    assert_eq!(String::from_utf8_lossy(&output.stdout), "Out of memory");
}

#[test]
fn zero_limit_prints_diagnostic_immediately() {
    let output = memprobe()
        .args(["--limit", "0", "--interval-ms", "0"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(String::from_utf8_lossy(&output.stdout), "Out of memory");
}

#[test]
fn debug_logs_stay_off_stdout() {
    let output = memprobe()
        .args(["--limit", "2MiB", "--interval-ms", "0", "--debug"])
        .output()
        .unwrap();

    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "Out of memory");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("address space limit"), "{}", stderr);
}

#[test]
fn diagnostic_has_no_line_terminator() {
    let output = memprobe()
        .args(["--limit", "0", "--interval-ms", "0"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(output.stdout, b"Out of memory");
}

#[test]
fn decimal_limit_below_one_chunk_claims_nothing() {
    // 1MB is 1_000_000 bytes, smaller than the default 1MiB chunk
    let output = memprobe()
        .args(["--limit", "1MB", "--interval-ms", "0", "--debug"])
        .output()
        .unwrap();

    assert!(output.status.success());
    assert_eq!(output.stdout, b"Out of memory");
    assert!(String::from_utf8_lossy(&output.stderr).contains("0 blocks"));
}

#[test]
fn zero_chunk_size_is_a_setup_error() {
    let output = memprobe().args(["--chunk-size", "0"]).output().unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
}

#[test]
fn malformed_size_is_rejected() {
    for size in ["lots", "-1", "12X", "9223372036854775808"] {
        let output = memprobe().args(["--limit", size]).output().unwrap();

        assert!(!output.status.success(), "{} accepted", size);
        assert!(output.stdout.is_empty());
    }
}

#[cfg(target_os = "linux")]
#[test]
fn address_space_limit_exhausts_real_allocator() {
    let output = memprobe()
        .args(["--address-space", "128MiB", "--interval-ms", "0"])
        .output()
        .unwrap();

    assert!(output.status.success(), "{:?}", output);
    assert_eq!(String::from_utf8_lossy(&output.stdout), "Out of memory");
    assert!(String::from_utf8_lossy(&output.stderr).contains("address space limit: 134217728 bytes"));
}
