use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use split_engine::core::expense::{Expense, Split};
use split_engine::core::group::Group;
use split_engine::core::member::{Member, MemberId};
use split_engine::core::payment::Payment;
use split_engine::engine::direct::DirectDebtEngine;
use split_engine::engine::relative::{calculate_relative_balances, relative_balance_total};
use split_engine::engine::settlement::SettlementEngine;
use split_engine::engine::CENT;
use split_engine::view::details::group_details;

/// Fixed six-member roster. Expenses draw payers and participants from
/// this pool so that overlap (and pairwise offsetting) actually happens.
fn roster() -> Vec<Member> {
    vec![
        Member::new("u-0", "Ana"),
        Member::new("u-1", "Bea"),
        Member::new("u-2", "Carlos"),
        Member::new("u-3", "Diego"),
        Member::new("u-4", "Elena"),
        Member::new("u-5", "Fermin"),
    ]
}

fn member_ids() -> Vec<MemberId> {
    roster().into_iter().map(|m| m.id).collect()
}

/// Amounts in whole cents, 0.01 to 5000.00.
fn arb_amount() -> impl Strategy<Value = Decimal> {
    (1u64..500_000u64).prop_map(|cents| Decimal::new(cents as i64, 2))
}

/// A random equal-split expense over a non-empty participant subset.
fn arb_expense() -> impl Strategy<Value = Expense> {
    (
        0usize..6,
        prop::collection::btree_set(0usize..6, 1..=6),
        arb_amount(),
    )
        .prop_map(|(payer, participants, amount)| {
            let ids = member_ids();
            Expense::new(
                "Generated",
                amount,
                ids[payer].clone(),
                participants.into_iter().map(|i| ids[i].clone()).collect(),
                Split::Equally,
            )
            .unwrap()
        })
}

fn arb_expenses() -> impl Strategy<Value = Vec<Expense>> {
    prop::collection::vec(arb_expense(), 0..25)
}

/// A random payment between two distinct members of the roster.
fn arb_payment() -> impl Strategy<Value = Payment> {
    (0usize..6, 0usize..6, arb_amount()).prop_filter_map(
        "payer must differ from receiver",
        |(from, to, amount)| {
            if from == to {
                return None;
            }
            let names = roster();
            Payment::new(names[from].name.clone(), names[to].name.clone(), amount).ok()
        },
    )
}

fn arb_payments() -> impl Strategy<Value = Vec<Payment>> {
    prop::collection::vec(arb_payment(), 0..8)
}

proptest! {
    // ===================================================================
    // INVARIANT 1: Balance closure.
    //
    // With no payments, every euro someone fronted is a euro someone
    // consumed, so net balances sum to zero (to the division residue).
    // ===================================================================
    #[test]
    fn balances_sum_to_zero(expenses in arb_expenses()) {
        let balances = SettlementEngine::calculate_balances(&roster(), &expenses, &[]);
        let total: Decimal = balances.iter().map(|b| b.net_balance).sum();
        prop_assert!(
            total.abs() < dec!(0.000001),
            "net balances must close to zero, got {}",
            total
        );
    }

    // ===================================================================
    // INVARIANT 2: Payments never break closure.
    //
    // A payment moves the same amount into one member's paid column and
    // another's owed column, so the zero sum survives.
    // ===================================================================
    #[test]
    fn payments_preserve_closure(expenses in arb_expenses(), payments in arb_payments()) {
        let balances = SettlementEngine::calculate_balances(&roster(), &expenses, &payments);
        let total: Decimal = balances.iter().map(|b| b.net_balance).sum();
        prop_assert!(total.abs() < dec!(0.000001));
    }

    // ===================================================================
    // INVARIANT 3: Simplifier conservation.
    //
    // The emitted transfers move exactly the outstanding credit, up to
    // per-debt cent rounding.
    // ===================================================================
    #[test]
    fn simplifier_conserves_credit(expenses in arb_expenses()) {
        let balances = SettlementEngine::calculate_balances(&roster(), &expenses, &[]);
        let debts = SettlementEngine::simplify_debts(&balances);

        let credit: Decimal = balances
            .iter()
            .filter(|b| b.net_balance > CENT)
            .map(|b| b.net_balance)
            .sum();
        let transferred: Decimal = debts.iter().map(|d| d.amount).sum();
        // Slack: sub-cent residue per member plus rounding per debt.
        let tolerance = CENT * Decimal::from((balances.len() + debts.len() + 1) as u64);
        prop_assert!(
            (credit - transferred).abs() <= tolerance,
            "transfers {} must match outstanding credit {}",
            transferred,
            credit
        );
    }

    // ===================================================================
    // INVARIANT 4: Simplified debts are positive and name distinct members.
    // ===================================================================
    #[test]
    fn simplified_debts_are_well_formed(expenses in arb_expenses(), payments in arb_payments()) {
        let balances = SettlementEngine::calculate_balances(&roster(), &expenses, &payments);
        for debt in SettlementEngine::simplify_debts(&balances) {
            prop_assert!(debt.amount > Decimal::ZERO);
            prop_assert_ne!(&debt.from, &debt.to);
        }
    }

    // ===================================================================
    // INVARIANT 5: Aggregation is a pure function.
    //
    // Same inputs, same output, no hidden state.
    // ===================================================================
    #[test]
    fn aggregation_is_deterministic(expenses in arb_expenses(), payments in arb_payments()) {
        let first = SettlementEngine::calculate_balances(&roster(), &expenses, &payments);
        let second = SettlementEngine::calculate_balances(&roster(), &expenses, &payments);
        prop_assert_eq!(first, second);
    }

    // ===================================================================
    // INVARIANT 6: Direct debts are deterministic and well-formed.
    // ===================================================================
    #[test]
    fn direct_debts_are_deterministic(expenses in arb_expenses(), payments in arb_payments()) {
        let first = DirectDebtEngine::calculate_direct_debts(&roster(), &expenses, &payments);
        let second = DirectDebtEngine::calculate_direct_debts(&roster(), &expenses, &payments);
        prop_assert_eq!(&first, &second);
        for debt in &first {
            prop_assert!(debt.amount > Decimal::ZERO);
            prop_assert_ne!(&debt.from, &debt.to);
        }
    }

    // ===================================================================
    // INVARIANT 7: Private views never leak third-party debts.
    //
    // Whatever the activity, every debt surfaced to a private-group
    // viewer names that viewer on one side.
    // ===================================================================
    #[test]
    fn private_view_only_surfaces_viewer_debts(
        expenses in arb_expenses(),
        payments in arb_payments(),
        viewer in 0usize..6,
    ) {
        let group = Group::new("Prop", "PROP", roster())
            .unwrap()
            .with_privacy(true);
        let viewer_name = roster()[viewer].name.clone();

        let details = group_details(&group, &expenses, &payments, Some(&viewer_name));
        for debt in &details.debts {
            prop_assert!(
                debt.involves(&viewer_name),
                "debt {} -> {} leaked to viewer {}",
                debt.from,
                debt.to,
                viewer_name
            );
        }
    }

    // ===================================================================
    // INVARIANT 8: Relative balances always net to zero.
    //
    // Every debt touching the viewer appears once on the viewer's side
    // and once on the counterparty's, so the projection is closed.
    // ===================================================================
    #[test]
    fn relative_balances_net_to_zero(
        expenses in arb_expenses(),
        viewer in 0usize..6,
    ) {
        let viewer_name = roster()[viewer].name.clone();
        let direct = DirectDebtEngine::calculate_direct_debts(&roster(), &expenses, &[]);
        let viewer_debts: Vec<_> = direct
            .into_iter()
            .filter(|d| d.involves(&viewer_name))
            .collect();

        let balances = calculate_relative_balances(&roster(), &viewer_debts, &viewer_name);
        prop_assert_eq!(relative_balance_total(&balances), Decimal::ZERO);
    }

    // ===================================================================
    // INVARIANT 9: Public and private paths agree on who is in credit
    // when the viewer can see everything.
    //
    // Not the same debts (direct debts skip transitive netting), but the
    // direct debts still conserve each member's pairwise net total.
    // ===================================================================
    #[test]
    fn direct_debts_conserve_member_nets(expenses in arb_expenses()) {
        let members = roster();
        let balances = SettlementEngine::calculate_balances(&members, &expenses, &[]);
        let direct = DirectDebtEngine::calculate_direct_debts(&members, &expenses, &[]);

        for member in &members {
            let incoming: Decimal = direct
                .iter()
                .filter(|d| d.to == member.name)
                .map(|d| d.amount)
                .sum();
            let outgoing: Decimal = direct
                .iter()
                .filter(|d| d.from == member.name)
                .map(|d| d.amount)
                .sum();
            let net = balances
                .iter()
                .find(|b| b.member_name == member.name)
                .map(|b| b.net_balance)
                .unwrap();
            // Each pair can contribute up to a cent of slack: either it
            // was dropped as negligible or its amount was rounded.
            let pair_count = members.len() * (members.len() - 1) / 2;
            let tolerance = CENT * Decimal::from((pair_count + 1) as u64);
            prop_assert!(
                (net - (incoming - outgoing)).abs() <= tolerance,
                "{}: global net {} vs pairwise net {}",
                member.name,
                net,
                incoming - outgoing
            );
        }
    }
}
