//! Access control
//!
//! A single operator account guards the store. Each kind of operation can
//! be opened to the public; anything not public needs the configured
//! username and password.

use serde::{Deserialize, Serialize};

/// Kinds of access a front end asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Viewing links, tags and search results
    Read,
    /// Adding, editing or deleting links
    Write,
    /// Reading the latest-links feed
    Feed,
}

/// The operator's username and password
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

/// Check submitted credentials against the configured ones
pub fn check_auth(expected: &Credentials, username: &str, password: &str) -> bool {
    expected.username == username && expected.password == password
}

/// Which operations are open without credentials
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessPolicy {
    pub public_read: bool,
    pub public_write: bool,
    pub public_feed: bool,
}

impl Default for AccessPolicy {
    fn default() -> Self {
        Self {
            public_read: true,
            public_write: false,
            public_feed: true,
        }
    }
}

impl AccessPolicy {
    /// Whether `op` is allowed without credentials
    pub fn is_public(&self, op: Operation) -> bool {
        match op {
            Operation::Read => self.public_read,
            Operation::Write => self.public_write,
            Operation::Feed => self.public_feed,
        }
    }

    /// Decide whether a request for `op` may proceed
    ///
    /// `supplied` is the (username, password) pair sent by the caller, if any.
    pub fn authorize(
        &self,
        op: Operation,
        expected: &Credentials,
        supplied: Option<(&str, &str)>,
    ) -> bool {
        if self.is_public(op) {
            return true;
        }
        match supplied {
            Some((username, password)) => check_auth(expected, username, password),
            None => false,
        }
    }
}
