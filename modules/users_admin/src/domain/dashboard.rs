use tracing::{debug, instrument};

use crate::config::Labels;
use crate::contract::{
    client::UsersApi,
    error::Fault,
    model::{Category, EntryContext},
};
use crate::domain::stats::UserStats;

/// Statistics view over the whole collection.
#[derive(Debug, Clone)]
pub struct Dashboard {
    pub stats: UserStats,
    labels: Labels,
}

impl Dashboard {
    /// Fetch the collection once and aggregate it.
    #[instrument(name = "users_admin.dashboard.load", skip_all)]
    pub async fn load(api: &dyn UsersApi, labels: Labels) -> Result<Self, Fault> {
        let users = api.list().await?;
        let stats = UserStats::from_users(&users);
        debug!(total = stats.total, active = stats.active, "statistics loaded");
        Ok(Self { stats, labels })
    }

    pub fn chart_labels(&self) -> [&str; 2] {
        [self.labels.chart_active.as_str(), self.labels.chart_inactive.as_str()]
    }

    /// Entry context for opening the list view, optionally pre-filtered.
    pub fn navigate_to_users(&self, category: Option<Category>) -> EntryContext {
        EntryContext { category }
    }
}
