use anyhow::{bail, Result};
use caixa_store::HttpStore;
use std::io::{self, Write};
use tracing::info;

use crate::config::Config;
use crate::state::{clear_session, load_session, save_session, StoredSession};

pub fn prompt(label: &str) -> Result<String> {
    print!("{}: ", label);
    io::stdout().flush().ok();
    let mut s = String::new();
    io::stdin().read_line(&mut s)?;
    Ok(s.trim().to_string())
}

/// Password prompt. `CAIXA_PASSWORD` skips it for scripted use.
fn prompt_password() -> Result<String> {
    if let Ok(p) = std::env::var("CAIXA_PASSWORD") {
        return Ok(p);
    }
    // Plain stdin read; input is echoed.
    prompt("Password")
}

pub fn confirm(question: &str) -> Result<bool> {
    let answer = prompt(&format!("{question} [y/N]"))?;
    Ok(matches!(answer.to_lowercase().as_str(), "y" | "yes" | "s" | "sim"))
}

fn credentials(username: Option<String>) -> Result<(String, String)> {
    let username = match username {
        Some(u) => u,
        None => prompt("Username")?,
    };
    let password = prompt_password()?;
    if username.trim().is_empty() || password.is_empty() {
        bail!("username and password are both required");
    }
    Ok((username.trim().to_string(), password))
}

pub async fn signup(cfg: &Config, base_url: &str, username: Option<String>) -> Result<()> {
    let (username, password) = credentials(username)?;
    let store = HttpStore::new(base_url, cfg.timeout())?;
    store
        .signup(&username, &password)
        .await
        .map_err(|e| anyhow::anyhow!(e.user_message()))?;

    println!("Account created for {username}. Next: caixa login --username {username}");
    Ok(())
}

pub async fn login(cfg: &Config, base_url: &str, username: Option<String>) -> Result<()> {
    let (username, password) = credentials(username)?;
    let mut store = HttpStore::new(base_url, cfg.timeout())?;
    let token = store
        .login(&username, &password)
        .await
        .map_err(|e| anyhow::anyhow!(e.user_message()))?;

    save_session(&StoredSession {
        username: username.clone(),
        token,
        base_url: store.base_url().to_string(),
        created_at_utc: Some(chrono::Utc::now().to_rfc3339()),
    })?;
    info!(%username, base_url = store.base_url(), "logged in");

    println!("Logged in as {username}.");
    Ok(())
}

/// Tell the store the session is over, then forget the token regardless.
pub async fn logout(cfg: &Config) -> Result<()> {
    let Some(stored) = load_session()? else {
        println!("Not logged in.");
        return Ok(());
    };

    let mut store = HttpStore::new(&stored.base_url, cfg.timeout())?.with_token(&stored.token);
    let result = store.logout().await;
    clear_session()?;

    match result {
        Ok(()) => println!("Logged out {}.", stored.username),
        Err(e) => println!(
            "Logged out {} locally (store said: {}).",
            stored.username,
            e.user_message()
        ),
    }
    Ok(())
}
