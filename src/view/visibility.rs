use crate::core::expense::Expense;
use crate::core::group::Group;
use crate::core::member::Member;
use crate::core::payment::Payment;

/// Expenses a viewer is allowed to see in a private group: those where
/// the viewer is the payer or a participant.
pub fn visible_expenses<'a>(viewer: &Member, expenses: &'a [Expense]) -> Vec<&'a Expense> {
    expenses.iter().filter(|e| e.involves(&viewer.id)).collect()
}

/// Payments a viewer is allowed to see in a private group: those where
/// the viewer is either side. Payments are name-keyed, so this matches
/// on display name.
pub fn visible_payments<'a>(viewer_name: &str, payments: &'a [Payment]) -> Vec<&'a Payment> {
    payments.iter().filter(|p| p.involves(viewer_name)).collect()
}

/// The slice of a group's activity one viewer may see.
///
/// For public groups this is everything. For private groups it is the
/// viewer's own transactions; with no viewer, or a viewer name that does
/// not resolve against the roster, nothing is visible at all.
#[derive(Debug, Clone)]
pub struct VisibleActivity {
    pub expenses: Vec<Expense>,
    pub payments: Vec<Payment>,
}

impl VisibleActivity {
    pub fn for_viewer(
        group: &Group,
        expenses: &[Expense],
        payments: &[Payment],
        viewer_name: Option<&str>,
    ) -> Self {
        if !group.is_private() {
            return Self {
                expenses: expenses.to_vec(),
                payments: payments.to_vec(),
            };
        }

        let viewer = viewer_name.and_then(|name| group.member_by_name(name));
        match viewer {
            Some(viewer) => Self {
                expenses: visible_expenses(viewer, expenses)
                    .into_iter()
                    .cloned()
                    .collect(),
                payments: visible_payments(&viewer.name, payments)
                    .into_iter()
                    .cloned()
                    .collect(),
            },
            None => Self {
                expenses: Vec::new(),
                payments: Vec::new(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::expense::Split;
    use crate::core::member::MemberId;
    use rust_decimal_macros::dec;

    fn sample_group(private: bool) -> Group {
        Group::new(
            "Test",
            "CODE",
            vec![
                Member::new("a", "Alice"),
                Member::new("b", "Bob"),
                Member::new("c", "Carol"),
            ],
        )
        .unwrap()
        .with_privacy(private)
    }

    fn expense(paid_by: &str, participants: &[&str]) -> Expense {
        Expense::new(
            "Test",
            dec!(10),
            MemberId::new(paid_by),
            participants.iter().map(|p| MemberId::new(*p)).collect(),
            Split::Equally,
        )
        .unwrap()
    }

    #[test]
    fn test_public_group_sees_everything() {
        let group = sample_group(false);
        let expenses = vec![expense("a", &["b"]), expense("b", &["c"])];
        let payments = vec![Payment::new("Bob", "Carol", dec!(5)).unwrap()];

        let view = VisibleActivity::for_viewer(&group, &expenses, &payments, Some("Alice"));
        assert_eq!(view.expenses.len(), 2);
        assert_eq!(view.payments.len(), 1);
    }

    #[test]
    fn test_private_group_filters_to_viewer() {
        let group = sample_group(true);
        let expenses = vec![expense("a", &["b"]), expense("b", &["c"])];
        let payments = vec![
            Payment::new("Bob", "Alice", dec!(5)).unwrap(),
            Payment::new("Bob", "Carol", dec!(5)).unwrap(),
        ];

        let view = VisibleActivity::for_viewer(&group, &expenses, &payments, Some("Alice"));
        assert_eq!(view.expenses.len(), 1);
        assert_eq!(view.payments.len(), 1);
        assert_eq!(view.payments[0].to(), "Alice");
    }

    #[test]
    fn test_private_group_without_viewer_sees_nothing() {
        let group = sample_group(true);
        let expenses = vec![expense("a", &["b"])];
        let payments = vec![Payment::new("Bob", "Alice", dec!(5)).unwrap()];

        let view = VisibleActivity::for_viewer(&group, &expenses, &payments, None);
        assert!(view.expenses.is_empty());
        assert!(view.payments.is_empty());
    }

    #[test]
    fn test_unknown_viewer_sees_nothing() {
        let group = sample_group(true);
        let expenses = vec![expense("a", &["b"])];

        let view = VisibleActivity::for_viewer(&group, &expenses, &[], Some("Mallory"));
        assert!(view.expenses.is_empty());
    }
}
