// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{
	panic::{AssertUnwindSafe, catch_unwind},
	process::abort,
};

use tracing::error;

/// Run the body of an exported function, aborting instead of unwinding into the caller
pub(crate) fn guard<R>(function: &'static str, body: impl FnOnce() -> R) -> R {
	match catch_unwind(AssertUnwindSafe(body)) {
		Ok(result) => result,
		Err(panic_info) => {
			let msg = if let Some(s) = panic_info.downcast_ref::<&str>() {
				s.to_string()
			} else if let Some(s) = panic_info.downcast_ref::<String>() {
				s.clone()
			} else {
				"Unknown panic".to_string()
			};
			error!(function, "panic in {} - aborting: {}", function, msg);
			abort();
		}
	}
}
