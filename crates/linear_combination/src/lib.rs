// This code is part of Qiskit.
//
// (C) Copyright IBM 2025
//
// This code is licensed under the Apache License, Version 2.0. You may
// obtain a copy of this license in the LICENSE.txt file in the root directory
// of this source tree or at http://www.apache.org/licenses/LICENSE-2.0.
//
// Any modifications or derivative works of this code must retain this
// copyright notice, and modified files need to carry a notice indicating
// that they have been altered from the originals.

use std::env;

pub mod arithmetic;
pub mod coefficient;
pub mod error;
pub mod grouping;
pub mod matrix;
pub mod queuing;
pub mod simplify;
pub mod sparse;
pub mod store;
pub mod symbol_expr;

pub use arithmetic::{apply, BinaryOp, Dispatch, Operand, Scalar};
pub use coefficient::Coefficient;
pub use error::LinearCombinationError;
pub use grouping::{GroupingMethod, GroupingType};
pub use queuing::{AnnotatedQueue, QueuedItem, QueuingContext};
pub use sparse::SparseMatrix;
pub use store::{BuildOptions, LinearCombination};

/// Magnitude at or below which a concrete coefficient is dropped by `simplify`.
pub const DEFAULT_ATOL: f64 = 1e-12;

/// Number of per-term sparse matrices held before they are summed into the running total.
pub const DEFAULT_SPARSE_BATCH_SIZE: usize = 100;

/// Minimum number of terms before dense matrix assembly is spread over the rayon thread pool.
pub const PARALLEL_THRESHOLD: usize = 16;

/// Whether multithreaded work is allowed.  An outer caller that is already running us in
/// parallel sets `LINCOMB_IN_PARALLEL=TRUE`; `LINCOMB_FORCE_THREADS=TRUE` overrides that.
///
/// # Environment
///
/// Reads `LINCOMB_IN_PARALLEL` and `LINCOMB_FORCE_THREADS` (case-insensitive `TRUE`) on every call.
#[inline]
pub fn getenv_use_multiple_threads() -> bool {
    let parallel_context = env::var("LINCOMB_IN_PARALLEL")
        .unwrap_or_else(|_| "FALSE".to_string())
        .to_uppercase()
        == "TRUE";
    let force_threads = env::var("LINCOMB_FORCE_THREADS")
        .unwrap_or_else(|_| "FALSE".to_string())
        .to_uppercase()
        == "TRUE";
    !parallel_context || force_threads
}
