#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use users_admin::contract::{
    client::UsersApi,
    error::Fault,
    model::{NewUser, User, UserPatch},
};
use users_admin::domain::notify::{Notification, NotificationSink};

pub fn user(id: &str, name: &str, email: &str, active: bool) -> User {
    User {
        id: Some(id.to_string()),
        name: name.to_string(),
        email: email.to_string(),
        active,
        ..Default::default()
    }
}

pub fn sample_users() -> Vec<User> {
    vec![
        user("1", "Leanne Graham", "Sincere@april.biz", true),
        user("2", "Ervin Howell", "Shanna@melissa.tv", false),
        user("3", "John Dietrich", "john@annie.ca", true),
    ]
}

/// Sink that keeps every notification it receives.
#[derive(Default)]
pub struct RecordingSink {
    seen: Mutex<Vec<Notification>>,
}

impl RecordingSink {
    pub fn taken(&self) -> Vec<Notification> {
        std::mem::take(&mut *self.seen.lock().unwrap())
    }
}

impl NotificationSink for RecordingSink {
    fn notify(&self, notification: Notification) {
        self.seen.lock().unwrap().push(notification);
    }
}

/// In-memory collection with injectable faults.
#[derive(Default)]
pub struct FakeUsersApi {
    users: Mutex<Vec<User>>,
    list_fault: Mutex<Option<Fault>>,
    remove_fault: Mutex<Option<Fault>>,
    next_id: AtomicUsize,
    pub list_calls: AtomicUsize,
    pub remove_calls: AtomicUsize,
}

impl FakeUsersApi {
    pub fn with_users(users: Vec<User>) -> Arc<Self> {
        let next = users.len() + 1;
        Arc::new(Self {
            users: Mutex::new(users),
            next_id: AtomicUsize::new(next),
            ..Default::default()
        })
    }

    pub fn fail_list(&self, fault: Fault) {
        *self.list_fault.lock().unwrap() = Some(fault);
    }

    pub fn fail_remove(&self, fault: Fault) {
        *self.remove_fault.lock().unwrap() = Some(fault);
    }

    pub fn snapshot(&self) -> Vec<User> {
        self.users.lock().unwrap().clone()
    }

    fn not_found(id: &str) -> Fault {
        Fault::NotFound {
            id: id.to_string(),
            url: format!("memory:/users/{id}"),
            body: users_admin::contract::error::ErrorBody::Empty,
        }
    }
}

#[async_trait]
impl UsersApi for FakeUsersApi {
    async fn list(&self) -> Result<Vec<User>, Fault> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(fault) = self.list_fault.lock().unwrap().take() {
            return Err(fault);
        }
        Ok(self.snapshot())
    }

    async fn get(&self, id: &str) -> Result<User, Fault> {
        self.users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.id.as_deref() == Some(id))
            .cloned()
            .ok_or_else(|| Self::not_found(id))
    }

    async fn create(&self, new_user: NewUser) -> Result<User, Fault> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst).to_string();
        let created = User {
            id: Some(id),
            name: new_user.name,
            username: new_user.username,
            email: new_user.email,
            phone: new_user.phone,
            address: new_user.address,
            active: new_user.active,
        };
        self.users.lock().unwrap().push(created.clone());
        Ok(created)
    }

    async fn update(&self, id: &str, patch: UserPatch) -> Result<User, Fault> {
        let mut users = self.users.lock().unwrap();
        let user = users
            .iter_mut()
            .find(|u| u.id.as_deref() == Some(id))
            .ok_or_else(|| Self::not_found(id))?;
        if let Some(name) = patch.name {
            user.name = name;
        }
        if let Some(email) = patch.email {
            user.email = email;
        }
        if let Some(active) = patch.active {
            user.active = active;
        }
        Ok(user.clone())
    }

    async fn remove(&self, id: &str) -> Result<(), Fault> {
        self.remove_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(fault) = self.remove_fault.lock().unwrap().take() {
            return Err(fault);
        }
        let mut users = self.users.lock().unwrap();
        let before = users.len();
        users.retain(|u| u.id.as_deref() != Some(id));
        if users.len() == before {
            return Err(Self::not_found(id));
        }
        Ok(())
    }
}
