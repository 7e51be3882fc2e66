// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Usage: `license-check [KEY] [DOMAIN] [--library PATH]`
//!
//! Prints `error: <reason>` and exits 1 when the library rejects the key.

use std::process::ExitCode;

use licensor_host::{Boundary, BoundarySource, Result, TracingBuilder, logging};
use tracing::debug;

fn run(source: &BoundarySource, key: &str, domain: &str) -> Result<bool> {
	let boundary = Boundary::open(source)?;
	let evaluator = boundary.create_from_license_key(key, domain)?;
	Ok(evaluator.validate())
}

fn main() -> ExitCode {
	logging::init(Some(Box::new(TracingBuilder::format_from_env)));

	let (source, args) = BoundarySource::from_args(std::env::args().skip(1));
	let key = args.first().map(String::as_str).unwrap_or("");
	let domain = args.get(1).map(String::as_str).unwrap_or("");
	debug!(?source, domain, "checking license");

	match run(&source, key, domain) {
		Ok(valid) => {
			println!("success! result: {}", valid);
			ExitCode::SUCCESS
		}
		Err(e) => {
			println!("error: {}", e);
			ExitCode::from(e.exit_code())
		}
	}
}
