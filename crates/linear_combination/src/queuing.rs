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

use lincomb_observables::Observable;
use tracing::trace;

use crate::store::LinearCombination;

/// Something recorded by a [QueuingContext].
#[derive(Clone, Debug, PartialEq)]
pub enum QueuedItem {
    Observable(Observable),
    Combination(LinearCombination),
}

/// A recorder that operators report themselves to while a larger structure is being built.
///
/// The algebra never reads from a context; it only notifies it.
pub trait QueuingContext {
    fn append(&mut self, item: QueuedItem);
    /// Forget `item` if it was recorded.  Removing an item that is not present is not an error.
    fn remove(&mut self, item: &QueuedItem);
}

/// An ordered in-memory [QueuingContext].
#[derive(Clone, Debug, Default)]
pub struct AnnotatedQueue {
    items: Vec<QueuedItem>,
}

impl AnnotatedQueue {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn items(&self) -> &[QueuedItem] {
        &self.items
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl QueuingContext for AnnotatedQueue {
    fn append(&mut self, item: QueuedItem) {
        self.items.push(item);
    }

    fn remove(&mut self, item: &QueuedItem) {
        if let Some(position) = self.items.iter().position(|queued| queued == item) {
            self.items.remove(position);
        }
    }
}

impl LinearCombination {
    /// Record this combination in `context`, first removing its operands, which it now owns.
    pub fn queue(&self, context: &mut dyn QueuingContext) -> &Self {
        for op in self.ops() {
            context.remove(&QueuedItem::Observable(op.clone()));
        }
        trace!(num_terms = self.num_terms(), "queued linear combination");
        context.append(QueuedItem::Combination(self.clone()));
        self
    }
}
