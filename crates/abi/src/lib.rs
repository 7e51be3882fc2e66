// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

//! C ABI definitions for the licensor boundary
//!
//! This crate provides the stable C ABI shared by the licensor library (the
//! callee) and every program calling into it. It defines FFI-safe types, the
//! ownership rules attached to each of them and the function table a caller
//! resolves, either by linking the library or by loading it at runtime.

// #![cfg_attr(not(debug_assertions), deny(warnings))]

pub mod constants;
pub mod evaluator;
pub mod result;
pub mod vtable;

pub use evaluator::EvaluatorFFI;
pub use result::{BoolResultFFI, EvaluatorResultFFI};
pub use vtable::LicensorVTableFFI;
