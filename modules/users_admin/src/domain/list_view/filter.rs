use serde::{Deserialize, Serialize};

use crate::contract::model::{Category, User};

/// Record fields that free-text search looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchField {
    Name,
    Email,
    Phone,
    City,
}

impl SearchField {
    fn value(self, user: &User) -> &str {
        match self {
            SearchField::Name => &user.name,
            SearchField::Email => &user.email,
            SearchField::Phone => &user.phone,
            SearchField::City => &user.address.city,
        }
    }
}

/// Lowercased status words; typing one of them exactly selects that status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusWords {
    active: String,
    inactive: String,
}

impl StatusWords {
    pub fn new(active: &str, inactive: &str) -> Self {
        Self {
            active: active.trim().to_lowercase(),
            inactive: inactive.trim().to_lowercase(),
        }
    }
}

/// Case-insensitive free-text predicate.
#[derive(Debug, Clone)]
pub struct TextFilter<'a> {
    term: String,
    fields: &'a [SearchField],
    words: &'a StatusWords,
}

impl<'a> TextFilter<'a> {
    /// `None` for a blank term, which means "no filter". Surrounding
    /// whitespace of a non-blank term takes part in matching.
    pub fn new(term: &str, fields: &'a [SearchField], words: &'a StatusWords) -> Option<Self> {
        if term.trim().is_empty() {
            return None;
        }
        Some(Self {
            term: term.to_lowercase(),
            fields,
            words,
        })
    }

    pub fn matches(&self, user: &User) -> bool {
        self.fields
            .iter()
            .any(|f| f.value(user).to_lowercase().contains(&self.term))
            || (self.term == self.words.active && user.active)
            || (self.term == self.words.inactive && !user.active)
    }
}

/// Records matching `term`; the whole collection for a blank term.
pub fn filter_by_text(
    users: &[User],
    term: &str,
    fields: &[SearchField],
    words: &StatusWords,
) -> Vec<User> {
    match TextFilter::new(term, fields, words) {
        Some(filter) => users.iter().filter(|u| filter.matches(u)).cloned().collect(),
        None => users.to_vec(),
    }
}

pub fn filter_by_category(users: &[User], category: Category) -> Vec<User> {
    users
        .iter()
        .filter(|u| category.matches(u))
        .cloned()
        .collect()
}
