//! Plain-text views of the session state.

use caixa_core::{
    format_currency, newest_first, recent, DisplaySettings, ExpenseCategory, Labels, Language,
    Snapshot, Totals, Transaction, Vault,
};
use chrono::NaiveDate;

const BAR_WIDTH: usize = 20;

pub fn dashboard(
    snapshot: &Snapshot,
    totals: Totals,
    settings: &DisplaySettings,
    recent_limit: usize,
    today: NaiveDate,
) -> String {
    let labels = Labels::for_language(&settings.language);
    let mut out = format!(
        "# {}\n{}\n\"{}\"\n\n",
        snapshot.username,
        settings.language.format_long_date(today),
        labels.quote_for(today)
    );

    for (label, value) in [
        (labels.balance, totals.balance),
        (labels.income, totals.income),
        (labels.expenses, totals.expenses),
    ] {
        out.push_str(&format!("{:<14} {}\n", label, format_currency(value, settings)));
    }

    out.push_str(&format!("\n## {}\n\n", labels.recent_activity));
    out.push_str(&transaction_lines(&recent(&snapshot.transactions, recent_limit), settings));

    out.push_str(&format!("\n## {}\n\n", labels.vaults));
    let first_two: Vec<&Vault> = snapshot.vaults.iter().take(2).collect();
    out.push_str(&vault_lines(&first_two, settings));
    out
}

pub fn transactions(snapshot: &Snapshot, settings: &DisplaySettings) -> String {
    let labels = Labels::for_language(&settings.language);
    let mut out = format!("## {}\n\n", labels.transactions);
    out.push_str(&transaction_lines(&newest_first(&snapshot.transactions), settings));
    out
}

pub fn vaults(snapshot: &Snapshot, settings: &DisplaySettings) -> String {
    let labels = Labels::for_language(&settings.language);
    let mut out = format!("## {}\n\n", labels.vaults);
    let all: Vec<&Vault> = snapshot.vaults.iter().collect();
    out.push_str(&vault_lines(&all, settings));
    out
}

/// Financial tips in the given language.
pub fn tips(language: &Language) -> String {
    let labels = Labels::for_language(language);
    let mut out = format!("## {}\n", labels.tips_title);
    for tip in labels.tips {
        out.push_str(&format!("\n* {}\n  {}\n", tip.title, tip.description));
    }
    out
}

fn transaction_lines(list: &[&Transaction], settings: &DisplaySettings) -> String {
    let labels = Labels::for_language(&settings.language);
    if list.is_empty() {
        return format!("{}\n", labels.empty_transactions);
    }

    let mut out = String::new();
    for t in list {
        let mut tags = Vec::new();
        if let Some(category) = t.category.filter(|_| t.is_expense()) {
            tags.push(match category {
                ExpenseCategory::Fixed => labels.fixed.to_string(),
                ExpenseCategory::Variable => labels.variable.to_string(),
            });
        }
        if let Some(label) = t.installment_label() {
            tags.push(label);
        }
        let tags = if tags.is_empty() {
            String::new()
        } else {
            format!(" [{}]", tags.join(", "))
        };

        out.push_str(&format!(
            "#{:<5} {:<10} {}{}  {}{}\n",
            t.id,
            t.date,
            t.description,
            tags,
            t.kind.sign(),
            format_currency(t.amount, settings)
        ));
    }
    out
}

fn vault_lines(list: &[&Vault], settings: &DisplaySettings) -> String {
    let labels = Labels::for_language(&settings.language);
    if list.is_empty() {
        return format!("{}\n", labels.empty_vaults);
    }

    let mut out = String::new();
    for v in list {
        let percent = v.progress();
        out.push_str(&format!(
            "#{:<5} {}  {} / {}\n       {} {}% {}\n",
            v.id,
            v.name,
            format_currency(v.current, settings),
            format_currency(v.target, settings),
            progress_bar(percent),
            percent,
            labels.reached
        ));
    }
    out
}

fn progress_bar(percent: u8) -> String {
    let filled = (usize::from(percent.min(100)) * BAR_WIDTH) / 100;
    format!("[{}{}]", "#".repeat(filled), ".".repeat(BAR_WIDTH - filled))
}
