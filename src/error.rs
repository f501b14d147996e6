// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use thiserror::Error;

pub const GENERIC_FAILURE: &str = "Something went wrong";

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("Session expired or invalid; run `dompet login` again")]
    Unauthorized,
    #[error("{message} (HTTP {status})")]
    Status { status: u16, message: String },
    #[error("Malformed response from server: {0}")]
    Malformed(String),
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Session store error: {0}")]
    Store(String),
}

impl From<anyhow::Error> for GatewayError {
    fn from(e: anyhow::Error) -> Self {
        GatewayError::Store(format!("{:#}", e))
    }
}

impl GatewayError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, GatewayError::Unauthorized)
    }
}
