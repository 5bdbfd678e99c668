use anyhow::{Context, Result};
use caixa_core::{CurrencyCode, DisplaySettings, Language, NavPosition};
use clap::{Args, Subcommand};

use crate::config::Config;
use crate::connect::{open_session, surface};

#[derive(Subcommand, Debug)]
pub enum SettingsCommand {
    /// Print the stored display settings as JSON
    Show,

    /// Change one or more display settings and save them to the store
    Set(SettingsChanges),
}

#[derive(Args, Debug, Default)]
pub struct SettingsChanges {
    /// pt-BR | en-US | es-ES
    #[arg(long)]
    pub language: Option<Language>,

    /// ISO currency code (BRL, USD, EUR, GBP, JPY, ...)
    #[arg(long)]
    pub currency: Option<CurrencyCode>,

    /// Accent color as #rrggbb
    #[arg(long)]
    pub primary_color: Option<String>,

    /// CSS length, e.g. 16px
    #[arg(long)]
    pub font_size: Option<String>,

    #[arg(long)]
    pub font_family: Option<String>,

    #[arg(long)]
    pub theme: Option<String>,

    /// row | row-reverse
    #[arg(long)]
    pub nav_pos: Option<NavPosition>,
}

impl SettingsChanges {
    /// Overlay the given changes on `current`.
    pub fn apply(self, current: &DisplaySettings) -> DisplaySettings {
        let mut next = current.clone();
        if let Some(v) = self.language {
            next.language = v;
        }
        if let Some(v) = self.currency {
            next.currency = v;
        }
        if let Some(v) = self.primary_color {
            next.primary_color = v;
        }
        if let Some(v) = self.font_size {
            next.font_size = v;
        }
        if let Some(v) = self.font_family {
            next.font_family = v;
        }
        if let Some(v) = self.theme {
            next.theme = v;
        }
        if let Some(v) = self.nav_pos {
            next.nav_pos = v;
        }
        next
    }
}

pub async fn run(cmd: SettingsCommand, cfg: &Config, server: Option<&str>) -> Result<()> {
    let mut session = open_session(cfg, server).await?;

    match cmd {
        SettingsCommand::Show => {
            let json = serde_json::to_string_pretty(session.settings()).context("serialize settings")?;
            println!("{json}");
        }
        SettingsCommand::Set(changes) => {
            let next = changes.apply(session.settings());
            if &next == session.settings() {
                println!("Nothing to change.");
                return Ok(());
            }
            session.save_settings(next).await.map_err(surface)?;
            println!(
                "Settings saved ({} / {}). Sample: {}",
                session.settings().language,
                session.settings().currency,
                session.format_amount(1234.56)
            );
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_only_touches_given_fields() {
        let current = DisplaySettings::default();
        let changes = SettingsChanges {
            currency: Some("EUR".parse().unwrap()),
            nav_pos: Some(NavPosition::RowReverse),
            ..SettingsChanges::default()
        };
        let next = changes.apply(&current);
        assert_eq!(next.currency.as_str(), "EUR");
        assert_eq!(next.nav_pos, NavPosition::RowReverse);
        assert_eq!(next.language, current.language);
        assert_eq!(next.primary_color, current.primary_color);
    }
}
