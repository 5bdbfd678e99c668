use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

pub fn caixa_home() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".caixa"))
}

pub fn ensure_caixa_home() -> Result<PathBuf> {
    let dir = caixa_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}

/// The logged-in session: bearer token plus who and where it belongs to.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StoredSession {
    pub username: String,
    pub token: String,
    pub base_url: String,
    pub created_at_utc: Option<String>,
}

pub fn session_path() -> Result<PathBuf> {
    Ok(ensure_caixa_home()?.join("session.json"))
}

pub fn load_session() -> Result<Option<StoredSession>> {
    let p = session_path()?;
    if !p.exists() {
        return Ok(None);
    }
    let s = fs::read_to_string(&p).with_context(|| format!("read {}", p.display()))?;
    Ok(Some(serde_json::from_str(&s).context("parse session.json")?))
}

pub fn save_session(session: &StoredSession) -> Result<()> {
    let p = session_path()?;
    let json = serde_json::to_string_pretty(session)?;
    fs::write(&p, json).with_context(|| format!("write {}", p.display()))?;
    restrict_permissions(&p)?;
    Ok(())
}

/// Forget the token. Missing file is fine.
pub fn clear_session() -> Result<()> {
    let p = session_path()?;
    if p.exists() {
        fs::remove_file(&p).with_context(|| format!("remove {}", p.display()))?;
    }
    Ok(())
}

#[cfg(unix)]
fn restrict_permissions(path: &std::path::Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o600))
        .with_context(|| format!("chmod {}", path.display()))
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &std::path::Path) -> Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_file_shape() {
        let s = StoredSession {
            username: "ana".to_string(),
            token: "jwt".to_string(),
            base_url: "http://localhost:8000".to_string(),
            created_at_utc: None,
        };
        let json = serde_json::to_string(&s).unwrap();
        let back: StoredSession = serde_json::from_str(&json).unwrap();
        assert_eq!(back, s);
    }
}
