//! One-shot dialog results.

use std::future::Future;
use tokio::sync::oneshot;

/// How a modal dialog was closed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogOutcome<T> {
    Closed(T),
    Dismissed,
}

impl DialogOutcome<bool> {
    pub fn is_confirmed(&self) -> bool {
        matches!(self, DialogOutcome::Closed(true))
    }
}

/// Open a dialog: the returned handle closes it, the future resolves exactly once.
/// Dropping the handle without closing counts as a dismissal.
pub fn open<T>() -> (DialogHandle<T>, impl Future<Output = DialogOutcome<T>>) {
    let (tx, rx) = oneshot::channel();
    let outcome = async move {
        match rx.await {
            Ok(value) => DialogOutcome::Closed(value),
            Err(_) => DialogOutcome::Dismissed,
        }
    };
    (DialogHandle { tx }, outcome)
}

pub struct DialogHandle<T> {
    tx: oneshot::Sender<T>,
}

impl<T> DialogHandle<T> {
    pub fn close(self, value: T) {
        // The waiting side may be gone already.
        let _ = self.tx.send(value);
    }
}

/// Delete confirmation texts for a user.
pub fn delete_confirmation(user_name: &str) -> (String, String) {
    (
        "Confirmar Exclusão".to_string(),
        format!("Tem certeza que deseja excluir o usuário \"{user_name}\"?"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn closing_resolves_with_value() {
        let (handle, outcome) = open::<bool>();
        handle.close(true);
        assert!(outcome.await.is_confirmed());
    }

    #[tokio::test]
    async fn dropping_handle_dismisses() {
        let (handle, outcome) = open::<bool>();
        drop(handle);
        assert_eq!(outcome.await, DialogOutcome::Dismissed);
    }

    #[test]
    fn confirmation_mentions_user() {
        let (title, message) = delete_confirmation("Ervin Howell");
        assert_eq!(title, "Confirmar Exclusão");
        assert_eq!(
            message,
            "Tem certeza que deseja excluir o usuário \"Ervin Howell\"?"
        );
    }
}
