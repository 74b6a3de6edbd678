//! The signed-in identity and where it is persisted between runs.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::model::{AccountType, UserDetails};

pub const TOKEN_KEY: &str = "token";
pub const USER_DETAILS_KEY: &str = "userDetails";

/// String key/value storage for session state.
pub trait SessionStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
    fn remove(&mut self, key: &str) -> Result<()>;
}

/// Keeps each key in its own file inside a directory.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    dir: PathBuf,
}

impl FileSessionStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }
}

impl SessionStore for FileSessionStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path(key);
        match fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Error::Storage { path, source: e }),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        fs::create_dir_all(&self.dir).map_err(|e| Error::Storage {
            path: self.dir.clone(),
            source: e,
        })?;
        let path = self.path(key);
        fs::write(&path, value).map_err(|e| Error::Storage { path, source: e })
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        let path = self.path(key);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(Error::Storage { path, source: e }),
        }
    }
}

/// In-process storage, nothing survives the process.
#[derive(Debug, Clone, Default)]
pub struct MemorySessionStore {
    values: HashMap<String, String>,
}

impl SessionStore for MemorySessionStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.values.remove(key);
        Ok(())
    }
}

/// What a view needs to make authenticated requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user_id: String,
    pub token: String,
    pub account_type: AccountType,
}

/// The current session, backed by a [`SessionStore`].
///
/// Build it with [`Session::hydrate`] at startup and pass it to whatever
/// needs the signed-in identity.
#[derive(Debug)]
pub struct Session<S> {
    store: S,
    user: Option<UserDetails>,
}

impl<S: SessionStore> Session<S> {
    /// Restore the session persisted in `store`.
    ///
    /// Unreadable or malformed user details leave the session signed out.
    pub fn hydrate(store: S) -> Result<Self> {
        let user = match store.get(USER_DETAILS_KEY)? {
            Some(raw) => match serde_json::from_str::<UserDetails>(&raw) {
                Ok(mut details) => {
                    if let Some(token) = store.get(TOKEN_KEY)? {
                        details.token = token;
                    }
                    Some(details).filter(|d| d.is_authenticated && !d.token.is_empty())
                }
                Err(e) => {
                    warn!(error = %e, "ignoring malformed persisted user details");
                    None
                }
            },
            None => None,
        };
        debug!(signed_in = user.is_some(), "session hydrated");
        Ok(Self { store, user })
    }

    /// Persist a fresh sign-in and make it current.
    pub fn login(&mut self, details: UserDetails) -> Result<()> {
        let serialized = serde_json::to_string(&details)?;
        self.store.set(TOKEN_KEY, &details.token)?;
        self.store.set(USER_DETAILS_KEY, &serialized)?;
        debug!(user_type = %details.user_type, "session stored");
        self.user = Some(details);
        Ok(())
    }

    /// Forget the signed-in user, both in memory and in the store.
    pub fn logout(&mut self) -> Result<()> {
        self.user = None;
        self.store.remove(TOKEN_KEY)?;
        self.store.remove(USER_DETAILS_KEY)?;
        debug!("session cleared");
        Ok(())
    }

    pub fn user(&self) -> Option<&UserDetails> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// The identity of the signed-in user, if there is one with an id.
    pub fn identity(&self) -> Option<Identity> {
        let user = self.user.as_ref()?;
        Some(Identity {
            user_id: user.id()?,
            token: user.token.clone(),
            account_type: user.user_type,
        })
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
