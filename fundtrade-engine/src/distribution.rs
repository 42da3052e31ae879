//! Threshold Distribution (Pure Function)
//!
//! Splits an amount across candidates in proportion to their scores while
//! suppressing allocations smaller than the minimum transaction size.
//!
//! # Algorithm
//!
//! ```text
//! eligible_i = score_i > 0
//! repeat (at most 20 rounds):
//!     total = Σ score_i over eligible
//!     total == 0          → every allocation is zero
//!     a_i = round2(amount · score_i / total) for eligible, else 0
//!     min(a_i) ≥ threshold − 0.01 → accept a
//!     drop every eligible i with a_i < threshold − 0.01
//!     nothing dropped     → stop
//! ```
//!
//! Only an accepted allocation set is ever returned; every other exit yields
//! all zeros. Shrinking the eligible set only raises the remaining
//! allocations, so in practice the loop settles within two rounds. The
//! 20-round cap is a hard bound and must not be tuned away.

use fundtrade_domain::rounding::{div_half_up, money, MONEY_SCALE};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::{debug, warn};

/// Hard bound on elimination rounds
pub const MAX_ITERATIONS: usize = 20;

/// Allowance below the threshold that still counts as meeting it
pub const THRESHOLD_TOLERANCE: Decimal = dec!(0.01);

/// Outcome of one distribution run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Distribution {
    /// One allocation per score, 2-decimal scale
    pub allocations: Vec<Decimal>,
    /// Rounds executed
    pub rounds: usize,
    /// True when an allocation set met the threshold
    pub converged: bool,
}

impl Distribution {
    fn zeros(len: usize, rounds: usize) -> Self {
        Self {
            allocations: vec![money(Decimal::ZERO); len],
            rounds,
            converged: false,
        }
    }

    /// Sum of all allocations
    pub fn total(&self) -> Decimal {
        self.allocations.iter().sum()
    }
}

/// Distribute `amount` across `scores` with minimum-trade elimination.
///
/// # Examples
///
/// ```
/// # use fundtrade_engine::distribution::distribute_with_threshold;
/// # use rust_decimal_macros::dec;
/// // 15 falls below the threshold and is dropped; 90 is re-split 40:35
/// let result = distribute_with_threshold(&[dec!(40), dec!(35), dec!(15)], dec!(90), dec!(20));
/// assert_eq!(result.allocations, vec![dec!(48), dec!(42), dec!(0)]);
/// assert!(result.converged);
/// ```
pub fn distribute_with_threshold(
    scores: &[Decimal],
    amount: Decimal,
    threshold: Decimal,
) -> Distribution {
    let floor = threshold - THRESHOLD_TOLERANCE;
    let mut eligible: Vec<bool> = scores.iter().map(|score| *score > Decimal::ZERO).collect();

    for round in 1..=MAX_ITERATIONS {
        let total: Decimal = scores
            .iter()
            .zip(&eligible)
            .filter(|(_, is_eligible)| **is_eligible)
            .map(|(score, _)| *score)
            .sum();

        if total.is_zero() {
            debug!(round, "No eligible candidates left, nothing allocated");
            return Distribution::zeros(scores.len(), round);
        }

        let tentative: Vec<Decimal> = scores
            .iter()
            .zip(&eligible)
            .map(|(score, is_eligible)| {
                if *is_eligible {
                    div_half_up(*score * amount, total, MONEY_SCALE)
                } else {
                    money(Decimal::ZERO)
                }
            })
            .collect();

        let smallest = tentative
            .iter()
            .zip(&eligible)
            .filter(|(_, is_eligible)| **is_eligible)
            .map(|(allocation, _)| *allocation)
            .min();

        if smallest.is_some_and(|allocation| allocation >= floor) {
            debug!(round, %amount, "Distribution accepted");
            return Distribution {
                allocations: tentative,
                rounds: round,
                converged: true,
            };
        }

        let mut changed = false;
        for (is_eligible, allocation) in eligible.iter_mut().zip(&tentative) {
            if *is_eligible && *allocation < floor {
                *is_eligible = false;
                changed = true;
            }
        }

        debug!(
            round,
            remaining = eligible.iter().filter(|e| **e).count(),
            "Dropped candidates below threshold"
        );

        if !changed {
            return Distribution::zeros(scores.len(), round);
        }
    }

    warn!(
        max_iterations = MAX_ITERATIONS,
        candidates = scores.len(),
        "Threshold distribution did not converge"
    );
    Distribution::zeros(scores.len(), MAX_ITERATIONS)
}

// =============================================================================
// Tests
// =============================================================================
