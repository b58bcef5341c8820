#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankTier {
    pub name: &'static str,
    pub icon: &'static str,
    /// Inclusive.
    pub min_amount: i64,
    /// Exclusive.
    pub max_amount: i64,
}

pub const RANK_TIERS: &[RankTier] = &[
    RankTier { name: "Bronze", icon: "🥉", min_amount: 0, max_amount: 50_000 },
    RankTier { name: "Silver", icon: "🥈", min_amount: 50_000, max_amount: 200_000 },
    RankTier { name: "Gold", icon: "🥇", min_amount: 200_000, max_amount: 500_000 },
    RankTier { name: "Platinum", icon: "💎", min_amount: 500_000, max_amount: 1_000_000 },
    RankTier { name: "Diamond", icon: "👑", min_amount: 1_000_000, max_amount: 100_000_000 },
];

/// Position of the tier `total` falls in. Totals outside the table (negative,
/// or past the last bound) land on the last tier.
pub fn tier_index(total: i64) -> usize {
    RANK_TIERS
        .iter()
        .position(|t| total >= t.min_amount && total < t.max_amount)
        .unwrap_or(RANK_TIERS.len() - 1)
}

pub fn classify(total: i64) -> &'static RankTier {
    &RANK_TIERS[tier_index(total)]
}
