use crate::core::balance::{Balance, Debt};
use crate::core::member::Member;
use rust_decimal::Decimal;

/// Project direct debts onto a signed balance per member, relative to one
/// specific viewer.
///
/// For each member other than the viewer: positive means the viewer owes
/// that member, negative means that member owes the viewer. Debts between
/// two non-viewer members do not contribute — the projection only answers
/// "where do I stand with each person". The viewer's own entry carries the
/// mirror of everyone else's, so it is the negative of their sum and the
/// projection as a whole nets to zero.
///
/// `total_paid` holds the gross amounts flowing toward the member and
/// `total_owed` the gross amounts flowing away, so the usual
/// `net_balance = total_paid - total_owed` identity holds on every entry.
pub fn calculate_relative_balances(
    members: &[Member],
    direct_debts: &[Debt],
    viewer_name: &str,
) -> Vec<Balance> {
    members
        .iter()
        .map(|member| {
            let mut balance = Balance::zero(member.id.clone(), member.name.clone());
            let is_viewer = member.name == viewer_name;

            for debt in direct_debts {
                if is_viewer {
                    // Amounts owed to the viewer come in, amounts the
                    // viewer owes go out.
                    if debt.to == viewer_name {
                        balance.total_paid += debt.amount;
                    } else if debt.from == viewer_name {
                        balance.total_owed += debt.amount;
                    }
                } else if debt.from == viewer_name && debt.to == member.name {
                    balance.total_paid += debt.amount;
                } else if debt.from == member.name && debt.to == viewer_name {
                    balance.total_owed += debt.amount;
                }
            }

            balance.net_balance = balance.total_paid - balance.total_owed;
            balance
        })
        .collect()
}

/// The sum of all relative balances. Zero by construction, exposed for
/// consistency checks.
pub fn relative_balance_total(balances: &[Balance]) -> Decimal {
    balances.iter().map(|b| b.net_balance).sum()
}
