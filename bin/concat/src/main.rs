// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Usage: `concat [A] [B] [--library PATH]`
//!
//! Exits 1 when the library's output is not `A` followed by `B`.

use std::process::ExitCode;

use licensor_host::{Boundary, BoundarySource, Error, Result, TracingBuilder, logging};
use tracing::debug;

fn run(source: &BoundarySource, a: &str, b: &str) -> Result<String> {
	let boundary = Boundary::open(source)?;
	let joined = boundary.concat(a, b)?;

	let expected = format!("{a}{b}");
	if joined != expected.as_str() {
		return Err(Error::Mismatch {
			expected,
			actual: joined.to_string_lossy().into_owned(),
		});
	}
	Ok(joined.to_string_lossy().into_owned())
}

fn main() -> ExitCode {
	logging::init(Some(Box::new(TracingBuilder::format_from_env)));

	let (source, args) = BoundarySource::from_args(std::env::args().skip(1));
	let a = args.first().map(String::as_str).unwrap_or("a");
	let b = args.get(1).map(String::as_str).unwrap_or("b");
	debug!(?source, "concatenating");

	match run(&source, a, b) {
		Ok(joined) => {
			println!("{}", joined);
			ExitCode::SUCCESS
		}
		Err(e) => {
			println!("error: {}", e);
			ExitCode::from(e.exit_code())
		}
	}
}
