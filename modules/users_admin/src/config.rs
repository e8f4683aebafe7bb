use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::domain::list_view::filter::SearchField;

/// Configuration for the users_admin module
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UsersAdminConfig {
    /// Base URL of the collection service; `/users` is appended.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_request_timeout", with = "humantime_serde")]
    pub request_timeout: Duration,
    /// Quiescence interval before a search edit takes effect.
    #[serde(default = "default_search_debounce", with = "humantime_serde")]
    pub search_debounce: Duration,
    #[serde(default = "default_page_size_options")]
    pub page_size_options: Vec<usize>,
    #[serde(default = "default_page_size")]
    pub default_page_size: usize,
    /// Record fields matched by free-text search.
    #[serde(default = "default_search_fields")]
    pub search_fields: Vec<SearchField>,
    #[serde(default)]
    pub labels: Labels,
    #[serde(default)]
    pub notifications: NotificationTexts,
}

/// Localized labels shown for account status.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct Labels {
    pub active: String,
    pub inactive: String,
    pub chart_active: String,
    pub chart_inactive: String,
}

/// Texts and timing of user-facing notifications.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct NotificationTexts {
    pub action: String,
    #[serde(with = "humantime_serde")]
    pub duration: Duration,
    pub fallback_error: String,
    pub user_saved: String,
    pub user_deleted: String,
}

impl Default for UsersAdminConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout: default_request_timeout(),
            search_debounce: default_search_debounce(),
            page_size_options: default_page_size_options(),
            default_page_size: default_page_size(),
            search_fields: default_search_fields(),
            labels: Labels::default(),
            notifications: NotificationTexts::default(),
        }
    }
}

impl Default for Labels {
    fn default() -> Self {
        Self {
            active: "Ativo".to_string(),
            inactive: "Inativo".to_string(),
            chart_active: "Ativos".to_string(),
            chart_inactive: "Inativos".to_string(),
        }
    }
}

impl Default for NotificationTexts {
    fn default() -> Self {
        Self {
            action: "OK".to_string(),
            duration: Duration::from_millis(2000),
            fallback_error: "Ocorreu um erro inesperado.".to_string(),
            user_saved: "Usuário salvo com sucesso!".to_string(),
            user_deleted: "Usuário excluido com sucesso!".to_string(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_request_timeout() -> Duration {
    Duration::from_secs(10)
}

fn default_search_debounce() -> Duration {
    Duration::from_millis(300)
}

fn default_page_size_options() -> Vec<usize> {
    vec![5, 10, 25, 50]
}

fn default_page_size() -> usize {
    5
}

fn default_search_fields() -> Vec<SearchField> {
    vec![SearchField::Name, SearchField::Email]
}
