// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::path::PathBuf;

/// Where the library implementing the boundary comes from
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum BoundarySource {
	/// The library linked into this binary
	#[default]
	Linked,
	/// A shared library loaded at runtime
	Library(PathBuf),
}

impl BoundarySource {
	/// Split `--library <path>` off the program arguments, returning the rest in order
	pub fn from_args(args: impl IntoIterator<Item = String>) -> (Self, Vec<String>) {
		let mut source = BoundarySource::Linked;
		let mut rest = Vec::new();
		let mut args = args.into_iter();
		while let Some(arg) = args.next() {
			if arg == "--library" {
				if let Some(path) = args.next() {
					source = BoundarySource::Library(PathBuf::from(path));
				}
			} else if let Some(path) = arg.strip_prefix("--library=") {
				source = BoundarySource::Library(PathBuf::from(path));
			} else {
				rest.push(arg);
			}
		}
		(source, rest)
	}
}
