// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::process::Command;

fn concat(args: &[&str]) -> (Option<i32>, String) {
	let output = Command::new(env!("CARGO_BIN_EXE_concat")).args(args).output().unwrap();
	(output.status.code(), String::from_utf8(output.stdout).unwrap())
}

#[test]
fn test_defaults_to_a_and_b() {
	assert_eq!(concat(&[]), (Some(0), "ab\n".to_string()));
}

#[test]
fn test_arguments() {
	assert_eq!(concat(&["foo", "bar"]), (Some(0), "foobar\n".to_string()));
	assert_eq!(concat(&["", ""]), (Some(0), "\n".to_string()));
}

#[test]
fn test_missing_library_exits_with_one() {
	let (code, stdout) = concat(&["--library", "/nonexistent/liblicensor_ffi.so"]);
	assert_eq!(code, Some(1));
	assert!(stdout.starts_with("error: cannot load"), "stdout: {stdout}");
}
