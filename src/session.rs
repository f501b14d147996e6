// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Bearer-token session.
//!
//! The token lives in a [`TokenStore`]; [`Session`] is the only thing
//! that reads or writes it. Login begins a session, logout or a 401
//! from the API ends it.

use crate::db;
use anyhow::Result;
use rusqlite::Connection;
use std::cell::RefCell;

pub trait TokenStore {
    fn get(&self) -> Result<Option<String>>;
    fn set(&self, token: &str) -> Result<()>;
    fn clear(&self) -> Result<()>;
}

const TOKEN_KEY: &str = "token";

/// Keeps the token in the local settings database.
pub struct SqliteTokenStore<'c> {
    conn: &'c Connection,
}

impl<'c> SqliteTokenStore<'c> {
    pub fn new(conn: &'c Connection) -> Self {
        Self { conn }
    }
}

impl TokenStore for SqliteTokenStore<'_> {
    fn get(&self) -> Result<Option<String>> {
        db::get_setting(self.conn, TOKEN_KEY)
    }

    fn set(&self, token: &str) -> Result<()> {
        db::set_setting(self.conn, TOKEN_KEY, token)
    }

    fn clear(&self) -> Result<()> {
        db::delete_setting(self.conn, TOKEN_KEY)
    }
}

#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: RefCell<Option<String>>,
}

impl MemoryTokenStore {
    pub fn with_token(token: &str) -> Self {
        Self {
            token: RefCell::new(Some(token.to_string())),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn get(&self) -> Result<Option<String>> {
        Ok(self.token.borrow().clone())
    }

    fn set(&self, token: &str) -> Result<()> {
        *self.token.borrow_mut() = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        *self.token.borrow_mut() = None;
        Ok(())
    }
}

pub struct Session<S: TokenStore> {
    store: S,
}

impl<S: TokenStore> Session<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn token(&self) -> Result<Option<String>> {
        Ok(self.store.get()?.filter(|t| !t.is_empty()))
    }

    pub fn is_active(&self) -> Result<bool> {
        Ok(self.token()?.is_some())
    }

    pub fn begin(&self, token: &str) -> Result<()> {
        self.store.set(token)
    }

    pub fn end(&self) -> Result<()> {
        self.store.clear()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_lifecycle_in_memory() {
        let s = Session::new(MemoryTokenStore::default());
        assert!(!s.is_active().unwrap());
        s.begin("abc").unwrap();
        assert_eq!(s.token().unwrap().as_deref(), Some("abc"));
        s.end().unwrap();
        assert!(!s.is_active().unwrap());
    }

    #[test]
    fn empty_token_is_no_session() {
        let s = Session::new(MemoryTokenStore::with_token(""));
        assert_eq!(s.token().unwrap(), None);
    }

    #[test]
    fn sqlite_store_persists_across_handles() {
        let conn = Connection::open_in_memory().unwrap();
        db::init_schema(&conn).unwrap();
        Session::new(SqliteTokenStore::new(&conn)).begin("t0k").unwrap();

        let again = Session::new(SqliteTokenStore::new(&conn));
        assert_eq!(again.token().unwrap().as_deref(), Some("t0k"));
        again.end().unwrap();
        assert_eq!(db::get_setting(&conn, "token").unwrap(), None);
    }
}
