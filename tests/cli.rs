use std::process::{Command, Output};

fn burrows(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_burrows"))
        .args(args)
        .output()
        .unwrap()
}

#[test]
fn bad_direction_reported_once() {
    let out = burrows(&["x", "no-such-file"]);
    assert_eq!(out.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert_eq!(stderr.matches("Invalid argument").count(), 1, "{}", stderr);
    assert!(out.stdout.is_empty());
}

#[test]
fn missing_direction_exits_one() {
    let out = burrows(&[]);
    assert_eq!(out.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert_eq!(stderr.matches("Invalid argument").count(), 1, "{}", stderr);
}

#[test]
fn help_exits_zero() {
    let out = burrows(&["--help"]);
    assert!(out.status.success());
    assert!(String::from_utf8_lossy(&out.stdout).contains("DIRECTION"));
}

#[test]
fn files_through_the_binary() {
    let dir = tempfile::tempdir().unwrap();
    let plain = dir.path().join("plain.txt");
    let packed = dir.path().join("plain.bwm");
    let back = dir.path().join("back.txt");
    std::fs::write(&plain, b"ABRACADABRA!").unwrap();

    let out = burrows(&["-", plain.to_str().unwrap(), "-o", packed.to_str().unwrap()]);
    assert!(out.status.success());
    let out = burrows(&["+", packed.to_str().unwrap(), "-o", back.to_str().unwrap()]);
    assert!(out.status.success());
    assert_eq!(std::fs::read(&back).unwrap(), b"ABRACADABRA!".to_vec());
}
