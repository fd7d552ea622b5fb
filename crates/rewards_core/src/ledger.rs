use crate::Amount;

/// Display rate per referred user for levels 1, 2 and 3.
pub const REFERRAL_RATES: [Amount; 3] = [
    Amount::from_major(5),
    Amount::from_major(2),
    Amount::from_major(1),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Referrals {
    pub l1: u32,
    pub l2: u32,
    pub l3: u32,
}

impl Referrals {
    pub fn counts(&self) -> [u32; 3] {
        [self.l1, self.l2, self.l3]
    }
}

/// The user's ledger. Only reward credits mutate it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserStats {
    pub balance: Amount,
    pub coins: u32,
    pub referrals: Referrals,
    pub today_earnings: Amount,
}

impl UserStats {
    /// Ledger a fresh session starts with.
    pub fn seeded() -> Self {
        Self {
            balance: Amount::from_minor(14_550),
            coins: 2_400,
            referrals: Referrals {
                l1: 12,
                l2: 24,
                l3: 45,
            },
            today_earnings: Amount::from_major(12),
        }
    }

    /// Balance and today's earnings always move together.
    pub(crate) fn credit(&mut self, amount: Amount) {
        self.balance = self.balance.saturating_add(amount);
        self.today_earnings = self.today_earnings.saturating_add(amount);
    }
}

impl Default for UserStats {
    fn default() -> Self {
        Self::seeded()
    }
}
