use crate::*;
use serde::{Deserialize, Serialize};
use std::{
    fmt,
    sync::{Arc, RwLock},
};


#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
/// Basic auth credentials, passed by value to each call
pub struct Credentials {
    /// User name
    pub username: String,

    /// Password
    pub password: String,
}


impl Credentials {
    /// New credentials
    pub fn new(username: &str, password: &str) -> Credentials {
        Credentials {
            username: username.to_string(),
            password: password.to_string(),
        }
    }
}


/// Never print the password
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"**masked**")
            .finish()
    }
}


/// Single-slot credential holder, shared between the UI side and CheckService.
/// Kept in memory only.
#[derive(Debug, Clone, Default)]
pub struct CredentialStore(Arc<RwLock<Option<Credentials>>>);


impl CredentialStore {
    /// New empty store
    pub fn new() -> CredentialStore {
        CredentialStore::default()
    }


    /// Current credentials, if any
    pub fn current(&self) -> Option<Credentials> {
        match self.0.read() {
            Ok(slot) => slot.clone(),
            Err(err) => {
                error!("Couldn't read credentials, cause: {}", err);
                None
            }
        }
    }


    /// Replace stored credentials
    pub fn replace(&self, credentials: Credentials) {
        match self.0.write() {
            Ok(mut slot) => {
                debug!("Credentials replaced for user: {}", credentials.username);
                *slot = Some(credentials)
            }
            Err(err) => error!("Couldn't store credentials, cause: {}", err),
        }
    }


    /// Forget stored credentials
    pub fn clear(&self) {
        match self.0.write() {
            Ok(mut slot) => *slot = None,
            Err(err) => error!("Couldn't clear credentials, cause: {}", err),
        }
    }
}
