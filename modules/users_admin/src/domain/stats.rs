use serde::Serialize;

use crate::contract::model::User;

/// Aggregate counts over a collection snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct UserStats {
    pub total: usize,
    pub active: usize,
    pub inactive: usize,
}

impl UserStats {
    pub fn from_users(users: &[User]) -> Self {
        let total = users.len();
        let active = users.iter().filter(|u| u.active).count();
        Self {
            total,
            active,
            inactive: total - active,
        }
    }

    /// Chart series in `[active, inactive]` order.
    pub fn chart_data(&self) -> [usize; 2] {
        [self.active, self.inactive]
    }

    pub fn active_percentage(&self) -> u32 {
        percentage(self.active, self.total)
    }

    pub fn inactive_percentage(&self) -> u32 {
        percentage(self.inactive, self.total)
    }
}

/// `round(value / total * 100)` rounding halves up; `0` when `total` is zero.
pub fn percentage(value: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    // Integer form of floor(value * 100 / total + 0.5).
    ((value as u128 * 200 + total as u128) / (total as u128 * 2)) as u32
}
