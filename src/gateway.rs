// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::{GENERIC_FAILURE, GatewayError};
use crate::models::{
    Category, Credentials, LoginResponse, TotalBalance, TransactionDraft, TransactionKind,
    TransactionRecord, WalletDraft, WalletSummary,
};
use crate::session::{Session, TokenStore};
use crate::utils::http_client;
use chrono::NaiveDate;
use reqwest::Method;
use reqwest::header::CONTENT_TYPE;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, info, warn};

// Inclusive on both ends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransactionQuery {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl TransactionQuery {
    pub fn between(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
        }
    }

    fn params(&self) -> Vec<(&'static str, String)> {
        let mut out = Vec::new();
        if let Some(s) = self.start {
            out.push(("start_date", s.to_string()));
        }
        if let Some(e) = self.end {
            out.push(("end_date", e.to_string()));
        }
        out
    }
}

pub struct Gateway<S: TokenStore> {
    client: reqwest::blocking::Client,
    base_url: String,
    session: Session<S>,
}

impl<S: TokenStore> Gateway<S> {
    pub fn new(base_url: &str, session: Session<S>) -> Result<Self, GatewayError> {
        Ok(Self::with_client(http_client()?, base_url, session))
    }

    pub fn with_client(
        client: reqwest::blocking::Client,
        base_url: &str,
        session: Session<S>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            session,
        }
    }

    pub fn session(&self) -> &Session<S> {
        &self.session
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn login(&self, username: &str, password: &str) -> Result<(), GatewayError> {
        let body = to_body(&Credentials {
            username: username.to_string(),
            password: password.to_string(),
        })?;
        let res: LoginResponse = match self.send(Method::POST, "/auth/login", &[], Some(body)) {
            Err(GatewayError::Unauthorized) => {
                return Err(GatewayError::Status {
                    status: 401,
                    message: "Invalid username or password".into(),
                });
            }
            other => other?,
        };
        let token = res
            .token
            .filter(|t| !t.is_empty())
            .ok_or_else(|| GatewayError::Malformed("Invalid response from server".into()))?;
        self.session.begin(&token)?;
        info!(user = username, "session started");
        Ok(())
    }

    pub fn fetch_wallets(&self) -> Result<Vec<WalletSummary>, GatewayError> {
        self.send(Method::GET, "/wallets", &[], None)
    }

    pub fn create_wallet(&self, draft: &WalletDraft) -> Result<(), GatewayError> {
        let _: Value = self.send(Method::POST, "/wallets", &[], Some(to_body(draft)?))?;
        Ok(())
    }

    pub fn fetch_transactions(
        &self,
        query: &TransactionQuery,
    ) -> Result<Vec<TransactionRecord>, GatewayError> {
        self.send(Method::GET, "/transactions", &query.params(), None)
    }

    pub fn fetch_transaction(&self, id: i64) -> Result<TransactionRecord, GatewayError> {
        self.send(Method::GET, &format!("/transactions/{}", id), &[], None)
    }

    pub fn fetch_total_balance(&self) -> Result<i64, GatewayError> {
        let total: TotalBalance = self.send(Method::GET, "/transactions/total", &[], None)?;
        Ok(total.balance)
    }

    pub fn create_transaction(&self, draft: &TransactionDraft) -> Result<(), GatewayError> {
        let _: Value = self.send(Method::POST, "/transactions", &[], Some(to_body(draft)?))?;
        Ok(())
    }

    pub fn update_transaction(
        &self,
        id: i64,
        draft: &TransactionDraft,
    ) -> Result<(), GatewayError> {
        let path = format!("/transactions/{}", id);
        let _: Value = self.send(Method::PUT, &path, &[], Some(to_body(draft)?))?;
        Ok(())
    }

    pub fn delete_transaction(&self, id: i64) -> Result<(), GatewayError> {
        let path = format!("/transactions/{}", id);
        let _: Value = self.send(Method::DELETE, &path, &[], None)?;
        Ok(())
    }

    pub fn fetch_categories(&self, kind: TransactionKind) -> Result<Vec<Category>, GatewayError> {
        let query = [("type", kind.as_str().to_string())];
        self.send(Method::GET, "/categories", &query, None)
    }

    fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<Value>,
    ) -> Result<T, GatewayError> {
        let url = format!("{}{}", self.base_url, path);
        let mut req = self
            .client
            .request(method.clone(), &url)
            .header(CONTENT_TYPE, "application/json");
        if !query.is_empty() {
            req = req.query(query);
        }
        if let Some(token) = self.session.token()? {
            req = req.bearer_auth(token);
        }
        if let Some(b) = body {
            req = req.json(&b);
        }

        debug!(%method, path, "api request");
        let resp = req.send()?;
        let status = resp.status().as_u16();
        let text = resp.text()?;
        debug!(%method, path, status, "api response");

        let value = match interpret(status, &text) {
            Err(GatewayError::Unauthorized) => {
                warn!(path, "api rejected the session token; clearing it");
                self.session.end()?;
                return Err(GatewayError::Unauthorized);
            }
            other => other?,
        };
        serde_json::from_value(value).map_err(|e| GatewayError::Malformed(e.to_string()))
    }
}

fn to_body<T: serde::Serialize>(v: &T) -> Result<Value, GatewayError> {
    serde_json::to_value(v).map_err(|e| GatewayError::Malformed(e.to_string()))
}

/// An empty body counts as `null`; a non-2xx status carries the body's
/// `error` message.
pub fn interpret(status: u16, body: &str) -> Result<Value, GatewayError> {
    if status == 401 {
        return Err(GatewayError::Unauthorized);
    }
    let value = if body.trim().is_empty() {
        Value::Null
    } else {
        serde_json::from_str(body).map_err(|e| GatewayError::Malformed(e.to_string()))?
    };
    if !(200..300).contains(&status) {
        let message = value
            .get("error")
            .and_then(Value::as_str)
            .unwrap_or(GENERIC_FAILURE)
            .to_string();
        return Err(GatewayError::Status { status, message });
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::MemoryTokenStore;
    use serde_json::json;

    #[test]
    fn ok_json_passes_through() {
        let v = interpret(200, r#"{"balance": 1200}"#).unwrap();
        assert_eq!(v, json!({"balance": 1200}));
    }

    #[test]
    fn empty_body_is_null() {
        assert_eq!(interpret(204, "").unwrap(), Value::Null);
        assert_eq!(interpret(200, "  \n").unwrap(), Value::Null);
    }

    #[test]
    fn unauthorized_wins_over_body() {
        let err = interpret(401, "<html>nope</html>").unwrap_err();
        assert!(err.is_unauthorized());
    }

    #[test]
    fn error_status_uses_error_field() {
        match interpret(422, r#"{"error": "Amount is required"}"#).unwrap_err() {
            GatewayError::Status { status, message } => {
                assert_eq!(status, 422);
                assert_eq!(message, "Amount is required");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn error_status_without_message_is_generic() {
        match interpret(500, r#"{"detail": "boom"}"#).unwrap_err() {
            GatewayError::Status { message, .. } => assert_eq!(message, GENERIC_FAILURE),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn non_json_is_malformed_even_on_error_status() {
        assert!(matches!(
            interpret(200, "<html>"),
            Err(GatewayError::Malformed(_))
        ));
        assert!(matches!(
            interpret(502, "Bad Gateway"),
            Err(GatewayError::Malformed(_))
        ));
    }

    #[test]
    fn query_params_are_iso_dates() {
        let q = TransactionQuery::between(
            NaiveDate::from_ymd_opt(2025, 11, 1).unwrap(),
            NaiveDate::from_ymd_opt(2025, 11, 30).unwrap(),
        );
        assert_eq!(
            q.params(),
            vec![
                ("start_date", "2025-11-01".to_string()),
                ("end_date", "2025-11-30".to_string())
            ]
        );
        assert!(TransactionQuery::default().params().is_empty());
    }

    #[test]
    fn base_url_drops_trailing_slash() {
        let gw = Gateway::new("http://localhost:3000/", Session::new(MemoryTokenStore::default()))
            .unwrap();
        assert_eq!(gw.base_url(), "http://localhost:3000");
    }
}
