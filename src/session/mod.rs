//! Request scoped session records
//!
//! A session is looked up by the id carried in the session cookie and
//! handed to handlers as a plain value. Creating sessions, logging
//! users in and issuing CSRF tokens belong to the hosting application,
//! which populates the store through [`SessionStore::insert`].

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use subtle::ConstantTimeEq;

use crate::notify::{Toast, ToastType, UserId};

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Session {
    pub user_id: Option<UserId>,
    pub csrf_token: Option<String>,
    #[serde(default)]
    pub toasts: Vec<Toast>,
}

impl Session {
    pub fn new(user_id: Option<UserId>, csrf_token: Option<&str>) -> Self {
        Self {
            user_id,
            csrf_token: csrf_token.map(|s| s.to_string()),
            toasts: Vec::new(),
        }
    }

    /// The authenticated user, if the session has a usable one.
    pub fn current_user(&self) -> Option<&UserId> {
        self.user_id.as_ref().filter(|id| id.is_truthy())
    }

    /// Whether `candidate` matches the token bound to this session. A
    /// session without a token matches nothing.
    pub fn csrf_matches(&self, candidate: Option<&str>) -> bool {
        match (self.csrf_token.as_deref(), candidate) {
            (Some(expected), Some(given)) => {
                !expected.is_empty() && bool::from(expected.as_bytes().ct_eq(given.as_bytes()))
            }
            _ => false,
        }
    }

    /// Queue a toast for display on the next page the user sees.
    ///
    /// There is no bound on the queue and no deduplication.
    pub fn queue_toast(&mut self, message: &str, toast_type: ToastType, context: Map<String, Value>) {
        self.toasts.push(Toast::new(message, toast_type, context));
    }

    /// Remove and return everything queued so far, oldest first.
    pub fn take_toasts(&mut self) -> Vec<Toast> {
        std::mem::take(&mut self.toasts)
    }
}

#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: HashMap<String, Session>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: &str, session: Session) {
        self.sessions.insert(id.to_string(), session);
    }

    pub fn get(&self, id: &str) -> Option<&Session> {
        self.sessions.get(id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Session> {
        self.sessions.get_mut(id)
    }

    /// Run `f` against the session `id`, creating an empty one first if
    /// needed.
    pub fn update<T>(&mut self, id: &str, f: impl FnOnce(&mut Session) -> T) -> T {
        f(self.sessions.entry(id.to_string()).or_default())
    }

    pub fn remove(&mut self, id: &str) -> Option<Session> {
        self.sessions.remove(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn it_queues_toasts_in_order() {
        let mut store = SessionStore::new();
        store.update("abc", |s| s.queue_toast("first", ToastType::Success, Map::new()));
        store.update("abc", |s| {
            s.queue_toast(
                "second",
                ToastType::Warning,
                json!({"id": 9}).as_object().unwrap().clone(),
            )
        });

        let toasts = store.get_mut("abc").unwrap().take_toasts();
        assert_eq!(toasts.len(), 2);
        assert_eq!(toasts[0].message, "first");
        assert_eq!(toasts[0].toast_type, ToastType::Success);
        assert_eq!(toasts[1].message, "second");
        assert_eq!(toasts[1].context.get("id"), Some(&json!(9)));

        assert!(store.get("abc").unwrap().toasts.is_empty());
    }

    #[test]
    fn it_keeps_duplicate_toasts() {
        let mut session = Session::default();
        session.queue_toast("same", ToastType::Info, Map::new());
        session.queue_toast("same", ToastType::Info, Map::new());
        assert_eq!(session.toasts.len(), 2);
    }

    #[test]
    fn it_only_reports_truthy_users() {
        assert!(Session::new(Some(UserId::Int(0)), None).current_user().is_none());
        assert!(Session::new(None, None).current_user().is_none());
        assert_eq!(
            Session::new(Some(UserId::Int(7)), None).current_user(),
            Some(&UserId::Int(7))
        );
    }

    #[test]
    fn it_matches_csrf_tokens() {
        let session = Session::new(None, Some("tok"));
        assert!(session.csrf_matches(Some("tok")));
        assert!(!session.csrf_matches(Some("other")));
        assert!(!session.csrf_matches(None));
        assert!(!Session::new(None, None).csrf_matches(Some("tok")));
        assert!(!Session::new(None, Some("")).csrf_matches(Some("")));
        // Prefixes and longer candidates do not match
        assert!(!session.csrf_matches(Some("to")));
        assert!(!session.csrf_matches(Some("toke")));
    }
}
