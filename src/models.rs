use serde::{Deserialize, Serialize};

/// What an account holds. Assigned when the account is created and never
/// derived from its display name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountKind {
    Stock,
    Bank,
    Cash,
    Receivable,
    PreciousMetal,
    Business,
}

/// Bucket an account falls into on the allocation strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AllocationKind {
    Individual,
    Stock,
    Bank,
}

impl AccountKind {
    pub const COUNT: usize = 6;

    /// Declaration order; also the column order of history points.
    pub const ALL: [AccountKind; AccountKind::COUNT] = [
        AccountKind::Stock,
        AccountKind::Bank,
        AccountKind::Cash,
        AccountKind::Receivable,
        AccountKind::PreciousMetal,
        AccountKind::Business,
    ];

    pub fn index(self) -> usize {
        match self {
            AccountKind::Stock => 0,
            AccountKind::Bank => 1,
            AccountKind::Cash => 2,
            AccountKind::Receivable => 3,
            AccountKind::PreciousMetal => 4,
            AccountKind::Business => 5,
        }
    }

    pub fn chart_label(self) -> &'static str {
        match self {
            AccountKind::Stock => "Stock",
            AccountKind::Bank => "Bank",
            AccountKind::Cash => "Cash & Invoices",
            AccountKind::Receivable => "Receivables",
            AccountKind::PreciousMetal => "Precious Metals",
            AccountKind::Business => "Business",
        }
    }

    /// Counts toward the investment goal.
    pub fn is_invested(self) -> bool {
        matches!(self, AccountKind::Stock | AccountKind::PreciousMetal)
    }

    pub fn allocation(self) -> AllocationKind {
        match self {
            AccountKind::Stock => AllocationKind::Stock,
            AccountKind::Bank => AllocationKind::Bank,
            _ => AllocationKind::Individual,
        }
    }
}

/// Largest magnitude accepted for a single amount (10^15). Keeps every
/// displayed figure well inside `i64`.
pub const MAX_AMOUNT: i64 = 1_000_000_000_000_000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub name: String,
    pub amount: i64,
    pub kind: AccountKind,
}

impl Account {
    pub fn new(name: impl Into<String>, amount: i64, kind: AccountKind) -> Self {
        Self {
            name: name.into(),
            amount,
            kind,
        }
    }
}

// (name, amount, kind)
const DEFAULT_ACCOUNTS: &[(&str, i64, AccountKind)] = &[
    ("🏦 Fio Broker", 114_251, AccountKind::Stock),
    ("👪 Dluh rodiče", 80_000, AccountKind::Receivable),
    ("💚 Fio Green", 254, AccountKind::Bank),
    ("❤️ Fio Red", 92, AccountKind::Bank),
    ("💛 Fio Yellow", 18_955, AccountKind::Bank),
    ("📈 Trading 212", 3_700, AccountKind::Stock),
    ("🥇 Zlato + Stříbro", 78_596, AccountKind::PreciousMetal),
    ("💵 Hotovost", 25_175, AccountKind::Cash),
    ("📢 Adsense", 5_000, AccountKind::Receivable),
    ("🧾 Faktury 01/02", 11_007, AccountKind::Cash),
    ("🧾 Faktury 03/04", 60_000, AccountKind::Cash),
    ("🐾 Pawtraits", 826, AccountKind::Business),
    ("🏠 Revolut HOME", 15, AccountKind::Bank),
    ("💹 Revolut INVST", 10_865, AccountKind::Stock),
];

/// The built-in account list used on first run and after a reset.
pub fn default_accounts() -> Vec<Account> {
    DEFAULT_ACCOUNTS
        .iter()
        .map(|(name, amount, kind)| Account::new(*name, *amount, *kind))
        .collect()
}
