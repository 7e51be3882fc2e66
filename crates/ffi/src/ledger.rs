// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Allocation ledger for testing the boundary
//!
//! With the `ledger` feature (and in this crate's own tests) every allocation
//! handed to a caller is recorded in a thread-local table and every release is
//! checked against it, so tests can detect:
//! - leaks: allocations still outstanding when the caller is done
//! - double frees: releasing the same handle twice
//! - foreign frees: releasing memory this library never allocated
//! - mismatched frees: releasing a handle through the wrong release function
//!
//! A release that violates the contract is recorded and skipped, so the test
//! process survives to report it. Without the feature, tracking compiles to nothing.

/// Kind of allocation, which determines the matching release function
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Allocation {
	/// Released by `free_result`
	Evaluator,
	/// Released by `free_cstring`, or by the result it is part of
	CString,
}

#[cfg(any(test, feature = "ledger"))]
pub use tracking::{Violation, live, outstanding, reset, violations};
#[cfg(any(test, feature = "ledger"))]
pub(crate) use tracking::{release, track};

#[cfg(any(test, feature = "ledger"))]
mod tracking {
	use std::{
		cell::RefCell,
		collections::{HashMap, HashSet},
	};

	use tracing::error;

	use super::Allocation;

	/// A release that broke the ownership contract
	#[derive(Debug, Clone, PartialEq, Eq)]
	pub enum Violation {
		DoubleFree {
			address: usize,
			kind: Allocation,
		},
		Foreign {
			address: usize,
			kind: Allocation,
		},
		Mismatch {
			address: usize,
			allocated: Allocation,
			released_as: Allocation,
		},
	}

	#[derive(Default)]
	struct Ledger {
		live: HashMap<usize, Allocation>,
		released: HashSet<usize>,
		violations: Vec<Violation>,
	}

	thread_local! {
		static LEDGER: RefCell<Ledger> = RefCell::new(Ledger::default());
	}

	pub(crate) fn track<T>(ptr: *const T, kind: Allocation) {
		let address = ptr as usize;
		LEDGER.with_borrow_mut(|ledger| {
			// the allocator may hand out a released address again
			ledger.released.remove(&address);
			ledger.live.insert(address, kind);
		});
	}

	/// Returns true if `ptr` may be released as `kind`
	pub(crate) fn release<T>(ptr: *const T, kind: Allocation) -> bool {
		let address = ptr as usize;
		LEDGER.with_borrow_mut(|ledger| {
			let violation = match ledger.live.get(&address).copied() {
				Some(allocated) if allocated == kind => {
					ledger.live.remove(&address);
					ledger.released.insert(address);
					return true;
				}
				Some(allocated) => Violation::Mismatch {
					address,
					allocated,
					released_as: kind,
				},
				None if ledger.released.contains(&address) => Violation::DoubleFree {
					address,
					kind,
				},
				None => Violation::Foreign {
					address,
					kind,
				},
			};
			error!(?violation, "ownership violation at the boundary, release skipped");
			ledger.violations.push(violation);
			false
		})
	}

	/// Number of allocations handed out on this thread and not yet released
	pub fn outstanding() -> usize {
		LEDGER.with_borrow(|ledger| ledger.live.len())
	}

	/// Number of outstanding allocations of one kind
	pub fn live(kind: Allocation) -> usize {
		LEDGER.with_borrow(|ledger| ledger.live.values().filter(|k| **k == kind).count())
	}

	/// Violations recorded on this thread since the last [`reset`]
	pub fn violations() -> Vec<Violation> {
		LEDGER.with_borrow(|ledger| ledger.violations.clone())
	}

	/// Forget everything recorded on this thread
	pub fn reset() {
		LEDGER.with_borrow_mut(|ledger| *ledger = Ledger::default());
	}
}

#[cfg(not(any(test, feature = "ledger")))]
#[inline(always)]
pub(crate) fn track<T>(_ptr: *const T, _kind: Allocation) {}

#[cfg(not(any(test, feature = "ledger")))]
#[inline(always)]
pub(crate) fn release<T>(_ptr: *const T, _kind: Allocation) -> bool {
	true
}
