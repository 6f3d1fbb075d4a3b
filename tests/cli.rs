// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use assert_cmd::Command;

use std::io::Write;

/// RTS, BCLR #3, D2, ORI.B #-1, D0
const CODE: [u8; 10] = [0x4E, 0x75, 0x08, 0x82, 0x00, 0x03, 0x00, 0x00, 0x00, 0xFF];

fn input_file() -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(&CODE).unwrap();
    file
}

fn stdout_lines(output: &std::process::Output) -> Vec<String> {
    String::from_utf8(output.stdout.clone()).unwrap().lines().map(str::to_string).collect()
}

#[test]
fn whole_file() {
    let file = input_file();
    let assert = Command::cargo_bin("disassemble").unwrap().arg(file.path()).assert().success();

    assert_eq!(stdout_lines(assert.get_output()), [
        "0x0  RTS",
        "0x2  BCLR #3, D2",
        "0x6  ORI.B #-1, D0",
    ]);
}

#[test]
fn range_and_base() {
    let file = input_file();
    let assert = Command::cargo_bin("disassemble").unwrap()
        .arg(file.path())
        .args(["-b", "3", "-e", "6", "-a", "0x1000"])
        .assert()
        .success();

    // The beginning is rounded down to the BCLR opcode.
    assert_eq!(stdout_lines(assert.get_output()), ["0x1000  BCLR #3, D2"]);
}

#[test]
fn hex_and_raw() {
    let file = input_file();
    let assert = Command::cargo_bin("disassemble").unwrap()
        .arg(file.path())
        .args(["--hex", "--raw", "--begin", "6"])
        .assert()
        .success();

    let lines = stdout_lines(assert.get_output());
    assert_eq!(lines.len(), 1);
    assert!(lines[0].starts_with("0x0  0000 00FF "), "{}", lines[0]);
    assert!(lines[0].ends_with("  ORI.B #0xFF, D0"), "{}", lines[0]);
}

#[test]
fn output_file() {
    let file = input_file();
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out.s");

    Command::cargo_bin("disassemble").unwrap()
        .arg(file.path())
        .arg("-o")
        .arg(&out)
        .assert()
        .success()
        .stdout("");

    let text = std::fs::read_to_string(&out).unwrap();
    assert_eq!(text.lines().count(), 3);
    assert_eq!(text.lines().next(), Some("0x0  RTS"));
}

#[test]
fn missing_input() {
    let dir = tempfile::tempdir().unwrap();
    Command::cargo_bin("disassemble").unwrap()
        .arg(dir.path().join("missing.bin"))
        .assert()
        .failure();
}
