// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use core::marker::{PhantomData, PhantomPinned};

/// Opaque evaluator owned by the licensor library
///
/// Callers only ever see `*mut EvaluatorFFI`. The layout is private to the
/// library, which allocates the evaluator inside a successful
/// [`EvaluatorResultFFI`](crate::EvaluatorResultFFI) and releases it again in
/// `free_result`.
#[repr(C)]
pub struct EvaluatorFFI {
	_opaque: [u8; 0],
	_marker: PhantomData<(*mut u8, PhantomPinned)>,
}
