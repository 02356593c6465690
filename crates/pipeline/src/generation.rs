//! The explicit "latest accepted query" state.
//!
//! One [`GenerationClock`] exists per dispatcher and only the dispatcher
//! advances it. Chains hold a [`GenerationWatch`] and may read the current
//! generation at any resumption point; they can never move it.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::QueryGeneration;

/// Single-writer counter of accepted queries.
///
/// Deliberately not `Clone`: the owner is the only writer.
#[derive(Debug, Default)]
pub struct GenerationClock {
    current: Arc<AtomicU64>,
}

impl GenerationClock {
    /// Creates a clock at [`QueryGeneration::INITIAL`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks every earlier generation as superseded and returns the new one.
    pub fn advance(&mut self) -> QueryGeneration {
        let next = self.current().next();
        self.current.store(next.as_u64(), Ordering::Release);
        next
    }

    pub fn current(&self) -> QueryGeneration {
        QueryGeneration::new(self.current.load(Ordering::Acquire))
    }

    pub fn is_current(&self, generation: QueryGeneration) -> bool {
        self.current() == generation
    }

    /// Returns a read-only handle for chains.
    pub fn watch(&self) -> GenerationWatch {
        GenerationWatch {
            current: Arc::clone(&self.current),
        }
    }
}

/// Read-only view of a [`GenerationClock`].
#[derive(Debug, Clone)]
pub struct GenerationWatch {
    current: Arc<AtomicU64>,
}

impl GenerationWatch {
    pub fn current(&self) -> QueryGeneration {
        QueryGeneration::new(self.current.load(Ordering::Acquire))
    }

    /// `true` while no later query has been accepted.
    pub fn is_current(&self, generation: QueryGeneration) -> bool {
        self.current() == generation
    }
}
