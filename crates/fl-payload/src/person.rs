//! The affected user.

use crate::truncate::{is_owned, opt_into_owned, opt_owned, truncate_opt, truncate_str, Truncatable};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// The user a report is about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub id: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl Person {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            username: None,
            email: None,
        }
    }

    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }
}

impl Truncatable for Person {
    fn truncate_strings(&self, max_length: usize) -> Cow<'_, Self> {
        let id = truncate_str(&self.id, max_length);
        let username = truncate_opt(&self.username, max_length);
        let email = truncate_opt(&self.email, max_length);

        if !is_owned(&id) && !opt_owned(&username) && !opt_owned(&email) {
            return Cow::Borrowed(self);
        }

        Cow::Owned(Person {
            id: id.into_owned(),
            username: opt_into_owned(username),
            email: opt_into_owned(email),
        })
    }
}
