// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Tracing setup for the programs calling into the library
//!
//! Output goes to stderr so stdout stays the program's own output. `RUST_LOG`
//! takes precedence over the configured level, `RUST_LOG_FORMAT=json` switches
//! to JSON lines.

use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt};

const FORMAT_ENV: &str = "RUST_LOG_FORMAT";

/// Configuration function for the tracing setup
pub type TracingConfigurator = Box<dyn FnOnce(TracingBuilder) -> TracingBuilder + Send>;

#[derive(Debug, Clone)]
pub struct TracingBuilder {
	level: String,
	json: bool,
}

impl TracingBuilder {
	pub fn new() -> Self {
		Self {
			level: "warn".to_string(),
			json: false,
		}
	}

	/// Default filter directive, e.g. `info` or `licensor_host=debug`
	pub fn level(mut self, level: impl Into<String>) -> Self {
		self.level = level.into();
		self
	}

	/// Emit one JSON object per event instead of human readable lines
	pub fn json(mut self, json: bool) -> Self {
		self.json = json;
		self
	}

	/// Pick the output format from `RUST_LOG_FORMAT`
	pub fn format_from_env(self) -> Self {
		let format = std::env::var(FORMAT_ENV).ok();
		let json = wants_json(format.as_deref());
		self.json(json)
	}

	pub fn filter(&self) -> EnvFilter {
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.level))
	}

	/// Install the global subscriber, returns false if one was installed already
	pub fn init(self) -> bool {
		let builder = fmt().with_env_filter(self.filter()).with_writer(std::io::stderr);
		let result = if self.json {
			builder.json().try_init()
		} else {
			builder.try_init()
		};
		match result {
			Ok(()) => true,
			Err(e) => {
				debug!(error = %e, "tracing already initialised, keeping the existing subscriber");
				false
			}
		}
	}
}

impl Default for TracingBuilder {
	fn default() -> Self {
		Self::new()
	}
}

/// Install tracing, optionally adjusting the defaults
pub fn init(configurator: Option<TracingConfigurator>) {
	let builder = match configurator {
		Some(configurator) => configurator(TracingBuilder::new()),
		None => TracingBuilder::default(),
	};
	builder.init();
}

fn wants_json(format: Option<&str>) -> bool {
	format.is_some_and(|format| format.eq_ignore_ascii_case("json"))
}
