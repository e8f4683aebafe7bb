use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// A user record as stored by the remote collection.
///
/// `id` is assigned by the store and never changes afterwards; it is absent
/// only for records that have not been created yet.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct User {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "id_from_string_or_number"
    )]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: Address,
    #[serde(default)]
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Address {
    pub street: String,
    pub suite: String,
    pub city: String,
    pub zipcode: String,
}

/// Data for creating a new user (the store assigns the id).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NewUser {
    pub name: String,
    #[serde(default)]
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: Address,
    pub active: bool,
}

/// Partial or full update; `None` fields are left out of the request body.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UserPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}

impl From<NewUser> for UserPatch {
    fn from(u: NewUser) -> Self {
        Self {
            name: Some(u.name),
            username: Some(u.username),
            email: Some(u.email),
            phone: Some(u.phone),
            address: Some(u.address),
            active: Some(u.active),
        }
    }
}

impl From<&User> for NewUser {
    fn from(u: &User) -> Self {
        Self {
            name: u.name.clone(),
            username: u.username.clone(),
            email: u.email.clone(),
            phone: u.phone.clone(),
            address: u.address.clone(),
            active: u.active,
        }
    }
}

/// Account status category used by the dashboard and the list-view filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Active,
    Inactive,
}

impl Category {
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Active => "active",
            Category::Inactive => "inactive",
        }
    }

    pub fn matches(self, user: &User) -> bool {
        match self {
            Category::Active => user.active,
            Category::Inactive => !user.active,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown category '{0}', expected 'active' or 'inactive'")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "active" => Ok(Category::Active),
            "inactive" => Ok(Category::Inactive),
            _ => Err(UnknownCategory(s.to_string())),
        }
    }
}

/// Context handed to the list view when it is entered, e.g. from the dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EntryContext {
    pub category: Option<Category>,
}

impl EntryContext {
    pub fn with_category(category: Category) -> Self {
        Self {
            category: Some(category),
        }
    }
}

fn id_from_string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(Option::<RawId>::deserialize(deserializer)?.map(|raw| match raw {
        RawId::Text(s) => s,
        RawId::Number(n) => n.to_string(),
    }))
}
