use anyhow::{anyhow, bail, Result};
use caixa_store::{HttpStore, Session, SessionError};
use tracing::warn;

use crate::config::Config;
use crate::state::{clear_session, load_session, StoredSession};

/// `--server` wins, then the store the token was issued by, then config.
pub fn resolve_base_url(cfg: &Config, server: Option<&str>, stored: Option<&str>) -> String {
    server
        .or(stored)
        .unwrap_or(&cfg.store.base_url)
        .trim_end_matches('/')
        .to_string()
}

/// The stored token, only when it was issued by the store at `base_url`.
fn token_for(base_url: &str, stored: StoredSession) -> Result<String> {
    if stored.base_url.trim_end_matches('/') != base_url {
        bail!("Not logged in to {base_url}. Run: caixa --server {base_url} login");
    }
    Ok(stored.token)
}

/// Open a session with the stored token and load the first snapshot.
pub async fn open_session(cfg: &Config, server: Option<&str>) -> Result<Session<HttpStore>> {
    let Some(stored) = load_session()? else {
        bail!("Not logged in. Run: caixa login");
    };
    let base_url = resolve_base_url(cfg, server, Some(&stored.base_url));
    let token = token_for(&base_url, stored)?;
    let store = HttpStore::new(base_url, cfg.timeout())?.with_token(token);

    Session::open(store).await.map_err(surface)
}

/// Turn a session failure into the message the user sees. A 401 also drops
/// the stored token so the next command starts unauthenticated.
pub fn surface(err: SessionError) -> anyhow::Error {
    match err {
        e if e.is_auth_required() => {
            warn!("session rejected by store; clearing local token");
            if let Err(clear_err) = clear_session() {
                warn!(error = %clear_err, "could not remove session file");
            }
            anyhow!("Session expired. Run: caixa login")
        }
        SessionError::Store(e) => anyhow!(e.user_message()),
        SessionError::Accounting(e) => anyhow!(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_precedence() {
        let cfg = Config::default();
        assert_eq!(
            resolve_base_url(&cfg, Some("http://other:9000/"), Some("http://stored")),
            "http://other:9000"
        );
        assert_eq!(resolve_base_url(&cfg, None, Some("http://stored")), "http://stored");
        assert_eq!(resolve_base_url(&cfg, None, None), "http://127.0.0.1:8000");
    }

    #[test]
    fn test_accounting_errors_keep_their_message() {
        let err = surface(SessionError::from(caixa_core::ValidationError::UnknownVault(4)));
        assert_eq!(err.to_string(), "no vault with id 4");
    }

    #[test]
    fn test_token_stays_with_its_store() {
        let stored = StoredSession {
            username: "ana".to_string(),
            token: "jwt".to_string(),
            base_url: "http://localhost:8000/".to_string(),
            created_at_utc: None,
        };
        assert_eq!(token_for("http://localhost:8000", stored.clone()).unwrap(), "jwt");

        let err = token_for("http://other:9000", stored).unwrap_err();
        assert!(err.to_string().contains("Not logged in to http://other:9000"));
    }
}
