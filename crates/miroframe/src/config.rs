//! Startup configuration.
//!
//! Environment variables take priority over positional arguments, and empty
//! values count as unset. The token is checked first so a missing credential
//! is always reported before anything else.

use miroframe_api::{ClientConfig, DEFAULT_API_BASE, DEFAULT_PAGE_LIMIT};

pub const TOKEN_VAR: &str = "MIRO_TOKEN";
pub const BOARD_ID_VAR: &str = "MIRO_BOARD_ID";
pub const FRAME_ID_VAR: &str = "MIRO_FRAME_ID";
pub const API_URL_VAR: &str = "MIRO_API_URL";

/// Errors raised while resolving configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// No bearer token available.
    #[error("please set MIRO_TOKEN with your Miro access token")]
    MissingToken,

    /// Board or frame id missing from both environment and arguments.
    #[error("usage: set MIRO_BOARD_ID and MIRO_FRAME_ID, or run as: miroframe <board_id> <frame_id>")]
    MissingTarget,
}

/// Immutable run configuration, built once before any request.
#[derive(Clone, PartialEq, Eq)]
pub struct Config {
    pub token: String,
    pub board_id: String,
    pub frame_id: String,
    pub api_base: String,
}

impl Config {
    /// Resolve from an environment lookup and optional positional arguments.
    pub fn resolve<F>(
        lookup: F,
        board_arg: Option<&str>,
        frame_arg: Option<&str>,
    ) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|value| !value.is_empty());
        let arg = |value: Option<&str>| value.filter(|v| !v.is_empty()).map(str::to_owned);

        let token = var(TOKEN_VAR).ok_or(ConfigError::MissingToken)?;
        let board_id = var(BOARD_ID_VAR).or_else(|| arg(board_arg));
        let frame_id = var(FRAME_ID_VAR).or_else(|| arg(frame_arg));
        let (Some(board_id), Some(frame_id)) = (board_id, frame_id) else {
            return Err(ConfigError::MissingTarget);
        };

        Ok(Self {
            token,
            board_id,
            frame_id,
            api_base: var(API_URL_VAR).unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
        })
    }

    /// Resolve from the process environment.
    pub fn from_env(board_arg: Option<&str>, frame_arg: Option<&str>) -> Result<Self, ConfigError> {
        Self::resolve(|name| std::env::var(name).ok(), board_arg, frame_arg)
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            api_base: self.api_base.clone(),
            board_id: self.board_id.clone(),
            token: self.token.clone(),
            page_limit: DEFAULT_PAGE_LIMIT,
        }
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("token", &"<redacted>")
            .field("board_id", &self.board_id)
            .field("frame_id", &self.frame_id)
            .field("api_base", &self.api_base)
            .finish()
    }
}
