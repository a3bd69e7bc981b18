//! Optimistic field state machine.
//!
//! A field moves `Settled -> Pending -> Settled` on success and
//! `Settled -> Pending -> RollingBack -> Settled` on failure. While a change
//! is pending the proposed value is what views see; a rollback restores the
//! last committed value.

use thiserror::Error;

/// Lifecycle phase of an optimistic field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// No change outstanding.
    Settled,
    /// A proposed value awaits server confirmation.
    Pending,
    /// The server rejected the proposal; the committed value is restored.
    RollingBack,
}

/// A proposal was made while another one is still outstanding.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("an optimistic change is already {phase:?}")]
pub struct OptimisticConflict {
    /// Phase the field was in.
    pub phase: Phase,
}

/// Field whose displayed value may run ahead of the server.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Optimistic<T> {
    /// Displayed value matches the last confirmed value.
    Settled(T),
    /// Displayed value is `proposed`; `committed` is restored on failure.
    Pending {
        /// Last confirmed value.
        committed: T,
        /// Value shown while the request runs.
        proposed: T,
    },
    /// Failure observed; displayed value is back to `committed`.
    RollingBack {
        /// Restored value.
        committed: T,
    },
}

impl<T: Default> Default for Optimistic<T> {
    fn default() -> Self {
        Self::Settled(T::default())
    }
}

impl<T> Optimistic<T> {
    /// Start settled at `value`.
    pub const fn new(value: T) -> Self {
        Self::Settled(value)
    }

    /// Value views should display.
    pub const fn value(&self) -> &T {
        match self {
            Self::Settled(value) | Self::RollingBack { committed: value } => value,
            Self::Pending { proposed, .. } => proposed,
        }
    }

    /// Current phase.
    #[must_use]
    pub const fn phase(&self) -> Phase {
        match self {
            Self::Settled(_) => Phase::Settled,
            Self::Pending { .. } => Phase::Pending,
            Self::RollingBack { .. } => Phase::RollingBack,
        }
    }

    /// Whether a change is outstanding (pending or rolling back).
    #[must_use]
    pub const fn is_busy(&self) -> bool {
        !matches!(self, Self::Settled(_))
    }

    /// Overwrite the value, discarding any outstanding change.
    pub fn reset(&mut self, value: T) {
        *self = Self::Settled(value);
    }
}

impl<T: Clone> Optimistic<T> {
    /// Show `proposed` immediately while a request runs.
    ///
    /// # Errors
    ///
    /// Returns [`OptimisticConflict`] unless the field is settled.
    pub fn propose(&mut self, proposed: T) -> Result<(), OptimisticConflict> {
        match self {
            Self::Settled(committed) => {
                *self = Self::Pending {
                    committed: committed.clone(),
                    proposed,
                };
                Ok(())
            }
            other => Err(OptimisticConflict {
                phase: other.phase(),
            }),
        }
    }

    /// Confirm the pending proposal. No-op unless pending.
    pub fn commit(&mut self) {
        if let Self::Pending { proposed, .. } = self {
            *self = Self::Settled(proposed.clone());
        }
    }

    /// Restore the committed value. No-op unless pending.
    pub fn rollback(&mut self) {
        if let Self::Pending { committed, .. } = self {
            *self = Self::RollingBack {
                committed: committed.clone(),
            };
        }
    }

    /// Finish a rollback. No-op unless rolling back.
    pub fn settle(&mut self) {
        if let Self::RollingBack { committed } = self {
            *self = Self::Settled(committed.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn proposal_is_visible_until_committed() {
        let mut liked = Optimistic::new(false);
        assert!(liked.propose(true).is_ok());
        assert!(*liked.value());
        assert_eq!(liked.phase(), Phase::Pending);
        liked.commit();
        assert_eq!(liked, Optimistic::Settled(true));
    }

    #[test]
    fn rollback_restores_committed_value() {
        let mut liked = Optimistic::new(false);
        assert!(liked.propose(true).is_ok());
        liked.rollback();
        assert!(!*liked.value());
        assert_eq!(liked.phase(), Phase::RollingBack);
        liked.settle();
        assert_eq!(liked, Optimistic::Settled(false));
    }

    #[test]
    fn second_proposal_conflicts_while_busy() {
        let mut liked = Optimistic::new(false);
        assert!(liked.propose(true).is_ok());
        assert_eq!(
            liked.propose(false),
            Err(OptimisticConflict {
                phase: Phase::Pending
            })
        );
        liked.rollback();
        assert!(liked.is_busy());
        assert!(liked.propose(true).is_err());
        liked.settle();
        assert!(!liked.is_busy());
    }

    #[test]
    fn transitions_outside_their_phase_are_ignored() {
        let mut count = Optimistic::new(3_u32);
        count.commit();
        count.rollback();
        count.settle();
        assert_eq!(count, Optimistic::Settled(3));
        count.reset(5);
        assert_eq!(*count.value(), 5);
    }
}
