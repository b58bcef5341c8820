//! Derived figures over the account list. Everything here is recomputed on
//! every call; nothing is cached.

use crate::models::{Account, AccountKind, AllocationKind};

/// Most groups shown on the allocation strip. Smaller groups are dropped.
pub const MAX_ALLOCATION_GROUPS: usize = 8;

pub const STOCK_GROUP_NAME: &str = "📈 Stock";
pub const BANK_GROUP_NAME: &str = "🏛️ Bank Accounts";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllocationGroup {
    pub name: String,
    pub amount: i64,
    pub kind: AllocationKind,
}

/// Sum that clamps at the `i64` bounds instead of overflowing.
pub fn saturating_sum(values: impl IntoIterator<Item = i64>) -> i64 {
    values.into_iter().fold(0i64, i64::saturating_add)
}

pub fn total_wealth(accounts: &[Account]) -> i64 {
    saturating_sum(accounts.iter().map(|a| a.amount))
}

pub fn invested_amount(accounts: &[Account]) -> i64 {
    saturating_sum(
        accounts
            .iter()
            .filter(|a| a.kind.is_invested())
            .map(|a| a.amount),
    )
}

/// Sum per kind, indexed by `AccountKind::index`.
pub fn category_sums(accounts: &[Account]) -> [i64; AccountKind::COUNT] {
    let mut sums = [0i64; AccountKind::COUNT];
    for account in accounts {
        let slot = &mut sums[account.kind.index()];
        *slot = slot.saturating_add(account.amount);
    }
    sums
}

/// Individual accounts plus one stock and one bank aggregate, largest first,
/// capped at `MAX_ALLOCATION_GROUPS`.
pub fn grouped_allocation(accounts: &[Account]) -> Vec<AllocationGroup> {
    let mut groups: Vec<AllocationGroup> = accounts
        .iter()
        .filter(|a| a.kind.allocation() == AllocationKind::Individual)
        .map(|a| AllocationGroup {
            name: a.name.clone(),
            amount: a.amount,
            kind: AllocationKind::Individual,
        })
        .collect();

    let sum_of = |kind: AllocationKind| -> i64 {
        saturating_sum(
            accounts
                .iter()
                .filter(|a| a.kind.allocation() == kind)
                .map(|a| a.amount),
        )
    };

    groups.push(AllocationGroup {
        name: STOCK_GROUP_NAME.to_string(),
        amount: sum_of(AllocationKind::Stock),
        kind: AllocationKind::Stock,
    });
    groups.push(AllocationGroup {
        name: BANK_GROUP_NAME.to_string(),
        amount: sum_of(AllocationKind::Bank),
        kind: AllocationKind::Bank,
    });

    groups.sort_by(|a, b| b.amount.cmp(&a.amount));
    groups.truncate(MAX_ALLOCATION_GROUPS);
    groups
}

/// `part` as a percentage of `whole`. A zero `whole` yields 0 so nothing
/// downstream ever renders NaN.
pub fn percentage(part: i64, whole: i64) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    100.0 * part as f64 / whole as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::default_accounts;

    fn sample() -> Vec<Account> {
        vec![
            Account::new("A", 100, AccountKind::Cash),
            Account::new("B Broker", 50, AccountKind::Stock),
        ]
    }

    #[test]
    fn test_total_and_invested_scenario() {
        let accounts = sample();
        assert_eq!(total_wealth(&accounts), 150);
        assert_eq!(invested_amount(&accounts), 50);
    }

    #[test]
    fn test_total_of_defaults() {
        let accounts = default_accounts();
        let expected: i64 = 114_251 + 80_000 + 254 + 92 + 18_955 + 3_700 + 78_596
            + 25_175 + 5_000 + 11_007 + 60_000 + 826 + 15 + 10_865;
        assert_eq!(total_wealth(&accounts), expected);
    }

    #[test]
    fn test_invested_of_defaults_counts_stock_and_metals() {
        let accounts = default_accounts();
        assert_eq!(invested_amount(&accounts), 114_251 + 3_700 + 10_865 + 78_596);
    }

    #[test]
    fn test_renaming_keeps_totals_and_classification() {
        let mut accounts = sample();
        let before_total = total_wealth(&accounts);
        let before_invested = invested_amount(&accounts);
        let before_groups = grouped_allocation(&accounts);
        accounts[1].name = "Something else".to_string();
        assert_eq!(total_wealth(&accounts), before_total);
        assert_eq!(invested_amount(&accounts), before_invested);
        let after: Vec<i64> = grouped_allocation(&accounts).iter().map(|g| g.amount).collect();
        let before: Vec<i64> = before_groups.iter().map(|g| g.amount).collect();
        assert_eq!(after, before);
    }

    #[test]
    fn test_category_sums() {
        let sums = category_sums(&default_accounts());
        assert_eq!(sums[AccountKind::Stock.index()], 114_251 + 3_700 + 10_865);
        assert_eq!(sums[AccountKind::Bank.index()], 254 + 92 + 18_955 + 15);
        assert_eq!(sums[AccountKind::Cash.index()], 25_175 + 11_007 + 60_000);
        assert_eq!(sums[AccountKind::Receivable.index()], 80_000 + 5_000);
        assert_eq!(sums[AccountKind::PreciousMetal.index()], 78_596);
        assert_eq!(sums[AccountKind::Business.index()], 826);
    }

    #[test]
    fn test_grouped_allocation_sorted_and_capped() {
        let groups = grouped_allocation(&default_accounts());
        assert!(groups.len() <= MAX_ALLOCATION_GROUPS);
        for pair in groups.windows(2) {
            assert!(pair[0].amount >= pair[1].amount);
        }
        assert_eq!(groups[0].name, STOCK_GROUP_NAME);
        assert_eq!(groups[0].amount, 128_816);
    }

    #[test]
    fn test_grouped_allocation_drops_smallest_individuals() {
        let groups = grouped_allocation(&default_accounts());
        // 7 individual accounts + 2 aggregates = 9, smallest one is cut.
        assert_eq!(groups.len(), 8);
        assert!(!groups.iter().any(|g| g.name == "🐾 Pawtraits"));
    }

    #[test]
    fn test_grouped_allocation_keeps_empty_aggregates() {
        let accounts = vec![Account::new("Cash", 10, AccountKind::Cash)];
        let groups = grouped_allocation(&accounts);
        assert_eq!(groups.len(), 3);
        assert!(groups.iter().any(|g| g.kind == AllocationKind::Stock && g.amount == 0));
        assert!(groups.iter().any(|g| g.kind == AllocationKind::Bank && g.amount == 0));
    }

    #[test]
    fn test_percentage() {
        assert_eq!(percentage(50, 200), 25.0);
        assert_eq!(percentage(0, 0), 0.0);
        assert_eq!(percentage(10, 0), 0.0);
        assert!((percentage(1, 3) - 33.333).abs() < 0.001);
    }

    #[test]
    fn test_sums_clamp_instead_of_overflowing() {
        let accounts = vec![
            Account::new("Huge", i64::MAX, AccountKind::Stock),
            Account::new("Broker", 10, AccountKind::Stock),
            Account::new("Metal", 5, AccountKind::PreciousMetal),
            Account::new("Bank", 7, AccountKind::Bank),
        ];
        assert_eq!(total_wealth(&accounts), i64::MAX);
        assert_eq!(invested_amount(&accounts), i64::MAX);
        assert_eq!(category_sums(&accounts)[AccountKind::Stock.index()], i64::MAX);
        let groups = grouped_allocation(&accounts);
        assert_eq!(groups[0].name, STOCK_GROUP_NAME);
        assert_eq!(groups[0].amount, i64::MAX);
    }

    #[test]
    fn test_saturating_sum_clamps_both_ways() {
        assert_eq!(saturating_sum([1, 2, 3]), 6);
        assert_eq!(saturating_sum([i64::MIN, -1]), i64::MIN);
        assert_eq!(saturating_sum(Vec::new()), 0);
    }
}
