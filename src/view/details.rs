use crate::core::balance::{Balance, Debt};
use crate::core::expense::Expense;
use crate::core::group::Group;
use crate::core::payment::Payment;
use crate::engine::direct::DirectDebtEngine;
use crate::engine::relative::calculate_relative_balances;
use crate::engine::settlement::SettlementEngine;
use crate::view::visibility::VisibleActivity;
use log::debug;
use serde::{Deserialize, Serialize};

/// Everything a viewer gets to see about a group's financial state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupDetails {
    /// Per-member balances. Global net positions for public groups,
    /// viewer-relative balances for private groups.
    pub balances: Vec<Balance>,
    /// Suggested transfers for public groups; the viewer's direct debts
    /// for private groups.
    pub debts: Vec<Debt>,
    /// How many expenses were visible in this view.
    pub visible_expense_count: usize,
    /// How many payments were visible in this view.
    pub visible_payment_count: usize,
}

/// Assemble a viewer's view of a group.
///
/// Public groups use the global path: all records are aggregated into net
/// balances and a greedy simplification suggests a minimal transfer set.
///
/// Private groups use the direct path: the records are first restricted
/// to what the viewer participated in, debts are derived pairwise per
/// transaction, only the pairs touching the viewer are surfaced, and
/// balances are projected relative to the viewer. Debts between two other
/// members are never returned, even when the viewer's visible expenses
/// imply them.
pub fn group_details(
    group: &Group,
    expenses: &[Expense],
    payments: &[Payment],
    viewer_name: Option<&str>,
) -> GroupDetails {
    let view = VisibleActivity::for_viewer(group, expenses, payments, viewer_name);
    debug!(
        "group {}: {} of {} expenses visible to {:?}",
        group.name(),
        view.expenses.len(),
        expenses.len(),
        viewer_name
    );

    let (balances, debts) = if group.is_private() {
        let direct =
            DirectDebtEngine::calculate_direct_debts(group.members(), &view.expenses, &view.payments);
        match viewer_name {
            Some(viewer) => {
                let debts: Vec<Debt> = direct
                    .into_iter()
                    .filter(|d| d.involves(viewer))
                    .collect();
                let balances = calculate_relative_balances(group.members(), &debts, viewer);
                (balances, debts)
            }
            None => {
                // No identified viewer: nothing was visible, nothing to owe.
                let balances =
                    SettlementEngine::calculate_balances(group.members(), &[], &[]);
                (balances, Vec::new())
            }
        }
    } else {
        let balances =
            SettlementEngine::calculate_balances(group.members(), &view.expenses, &view.payments);
        let debts = SettlementEngine::simplify_debts(&balances);
        (balances, debts)
    };

    GroupDetails {
        balances,
        debts,
        visible_expense_count: view.expenses.len(),
        visible_payment_count: view.payments.len(),
    }
}
