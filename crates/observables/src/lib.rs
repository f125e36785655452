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

pub mod error;
pub mod expand;
pub mod gate_matrix;
pub mod key;
pub mod observable;
pub mod pauli;
pub mod util;
pub mod wires;

pub use error::ObservableError;
pub use key::{identity_key, structurally_equal, AtomicKey, ObservableKey};
pub use observable::{AtomicObservable, Observable, ObservableKind, Tensor};
pub use pauli::{Pauli, PauliWord};
pub use wires::{Wire, Wires};
