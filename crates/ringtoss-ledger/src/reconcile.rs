//! Budget reconciliation for the reward ledger.
//!
//! The ledger keeps an explicit `remaining_budget` counter alongside a
//! roster from which the same value is derivable:
//!
//! ```text
//! remaining_budget == max_budget - sum(reward of each participant)
//! remaining_budget >= 0
//! ```
//!
//! Every operation updates both sides atomically, so this check passes
//! by construction. It exists as defense-in-depth against corruption
//! (a hand-edited snapshot, a future bug) and as the assertion surface
//! for tests.

use ringtoss_types::Participant;

use crate::rewards::RewardTable;

/// The result of a budget reconciliation check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BudgetCheck {
    /// Counter and reward sum agree, and the counter is non-negative.
    Balanced,
    /// The dual invariant is violated.
    Anomaly(BudgetAnomaly),
}

/// Details of a budget invariant violation.
///
/// This is the ledger's most critical integrity alert: it means the
/// amount the operator believes is left in the pool is not the amount
/// the roster accounts for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BudgetAnomaly {
    /// The budget the roster's rewards account for.
    pub expected: i64,
    /// The explicit counter actually held.
    pub actual: i64,
    /// Human-readable description of the violation.
    pub message: String,
}

impl core::fmt::Display for BudgetAnomaly {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// Verify the dual budget invariant for a roster and counter pair.
///
/// Recomputes the reward sum from the participants' levels (permissive
/// lookup, matching how they were debited) and compares
/// `max_budget - sum` with the explicit counter. Also checks that the
/// counter itself is non-negative. Summation overflow is reported as an
/// anomaly rather than a panic.
pub fn verify_budget(
    table: &RewardTable,
    max_budget: i64,
    remaining_budget: i64,
    participants: &[Participant],
) -> BudgetCheck {
    let mut total: i64 = 0;
    for participant in participants {
        total = match total.checked_add(table.reward_or_zero(participant.level)) {
            Some(val) => val,
            None => {
                return BudgetCheck::Anomaly(BudgetAnomaly {
                    expected: 0,
                    actual: remaining_budget,
                    message: "BUDGET_ANOMALY: reward summation overflowed".to_owned(),
                });
            }
        };
    }

    let expected = max_budget.saturating_sub(total);

    if remaining_budget < 0 {
        return BudgetCheck::Anomaly(BudgetAnomaly {
            expected,
            actual: remaining_budget,
            message: format!("BUDGET_ANOMALY: counter is negative ({remaining_budget})"),
        });
    }

    if expected == remaining_budget {
        BudgetCheck::Balanced
    } else {
        BudgetCheck::Anomaly(BudgetAnomaly {
            expected,
            actual: remaining_budget,
            message: format!(
                "BUDGET_ANOMALY: roster accounts for {expected}, counter holds {remaining_budget}",
            ),
        })
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::panic)]
mod tests {
    use ringtoss_types::EmployeeId;

    use super::*;

    fn table() -> RewardTable {
        RewardTable::new(vec![0, 100, 300, 500]).expect("valid table")
    }

    fn participant(level: u32) -> Participant {
        Participant {
            id: EmployeeId::from("001"),
            name: "Mei".to_owned(),
            level,
        }
    }

    #[test]
    fn empty_roster_with_full_pool_is_balanced() {
        let result = verify_budget(&table(), 6000, 6000, &[]);
        assert_eq!(result, BudgetCheck::Balanced);
    }

    #[test]
    fn matching_counter_is_balanced() {
        let roster = vec![participant(3), participant(1)];
        let result = verify_budget(&table(), 6000, 5400, &roster);
        assert_eq!(result, BudgetCheck::Balanced);
    }

    #[test]
    fn disagreeing_counter_is_an_anomaly() {
        let roster = vec![participant(3)];
        match verify_budget(&table(), 6000, 5400, &roster) {
            BudgetCheck::Anomaly(anomaly) => {
                assert_eq!(anomaly.expected, 5500);
                assert_eq!(anomaly.actual, 5400);
                assert!(anomaly.message.contains("BUDGET_ANOMALY"));
            }
            BudgetCheck::Balanced => panic!("expected anomaly"),
        }
    }

    #[test]
    fn negative_counter_is_an_anomaly() {
        match verify_budget(&table(), 6000, -1, &[]) {
            BudgetCheck::Anomaly(anomaly) => {
                assert!(anomaly.message.contains("negative"));
            }
            BudgetCheck::Balanced => panic!("expected anomaly"),
        }
    }

    #[test]
    fn unknown_level_counts_as_zero_reward() {
        // Matches the permissive debit applied on import.
        let roster = vec![participant(42)];
        let result = verify_budget(&table(), 6000, 6000, &roster);
        assert_eq!(result, BudgetCheck::Balanced);
    }

    #[test]
    fn anomaly_display_shows_message() {
        let anomaly = BudgetAnomaly {
            expected: 100,
            actual: 50,
            message: "BUDGET_ANOMALY: test display".to_owned(),
        };
        assert!(format!("{anomaly}").contains("BUDGET_ANOMALY"));
    }
}
