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

use std::f64::consts::FRAC_1_SQRT_2;

use ndarray::{Array2, aview2};
use num_complex::Complex64;

use crate::util::{C_M_ONE, C_ONE, C_ZERO, GateArray1Q, IM, M_IM};

pub static IDENTITY: GateArray1Q = [[C_ONE, C_ZERO], [C_ZERO, C_ONE]];

pub static PAULI_X: GateArray1Q = [[C_ZERO, C_ONE], [C_ONE, C_ZERO]];

pub static PAULI_Y: GateArray1Q = [[C_ZERO, M_IM], [IM, C_ZERO]];

pub static PAULI_Z: GateArray1Q = [[C_ONE, C_ZERO], [C_ZERO, C_M_ONE]];

pub static HADAMARD: GateArray1Q = [
    [
        Complex64::new(FRAC_1_SQRT_2, 0.),
        Complex64::new(FRAC_1_SQRT_2, 0.),
    ],
    [
        Complex64::new(FRAC_1_SQRT_2, 0.),
        Complex64::new(-FRAC_1_SQRT_2, 0.),
    ],
];

/// Owned `ndarray` copy of a fixed single-wire gate.
#[inline]
pub fn to_array(gate: &GateArray1Q) -> Array2<Complex64> {
    aview2(gate).to_owned()
}

/// The `2^num_wires` square identity.
pub fn identity(num_wires: usize) -> Array2<Complex64> {
    Array2::from_diag_elem(1 << num_wires, C_ONE)
}
