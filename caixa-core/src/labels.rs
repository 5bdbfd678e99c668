//! Dashboard labels per display language.

use chrono::{Datelike, NaiveDate};

use crate::settings::Language;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tip {
    pub title: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Labels {
    pub balance: &'static str,
    pub income: &'static str,
    pub expenses: &'static str,
    pub recent_activity: &'static str,
    pub transactions: &'static str,
    pub vaults: &'static str,
    pub empty_transactions: &'static str,
    pub empty_vaults: &'static str,
    pub reached: &'static str,
    pub fixed: &'static str,
    pub variable: &'static str,
    pub tips_title: &'static str,
    pub quotes: &'static [&'static str],
    pub tips: &'static [Tip],
}

const PT_BR: Labels = Labels {
    balance: "Saldo Total",
    income: "Ganhos",
    expenses: "Despesas",
    recent_activity: "Atividade Recente",
    transactions: "Transações",
    vaults: "Minhas Caixinhas",
    empty_transactions: "Nenhuma transação registrada.",
    empty_vaults: "Sem reservas no momento.",
    reached: "alcançado",
    fixed: "Fixa",
    variable: "Variável",
    tips_title: "Dicas & Paz",
    quotes: &[
        "Cuidado com as pequenas despesas; um pequeno vazamento afunda um grande navio.",
        "Dinheiro é um mestre terrível, mas um excelente servo.",
        "Não economize o que resta depois de gastar, gaste o que resta depois de economizar.",
    ],
    tips: &[
        Tip {
            title: "Regra 50-30-20",
            description: "50% Essenciais, 30% Desejos Pessoais, 20% Dívidas ou Poupança.",
        },
        Tip {
            title: "Reserva de Emergência",
            description: "Tente juntar de 3 a 6 meses de seus gastos fixos em uma reserva segura.",
        },
        Tip {
            title: "Compras por Impulso",
            description: "Espere 24 horas antes de comprar algo não planejado. O desejo pode passar.",
        },
    ],
};

const EN_US: Labels = Labels {
    balance: "Total Balance",
    income: "Income",
    expenses: "Expenses",
    recent_activity: "Recent Activity",
    transactions: "Transactions",
    vaults: "My Vaults",
    empty_transactions: "No transactions recorded.",
    empty_vaults: "No savings at the moment.",
    reached: "reached",
    fixed: "Fixed",
    variable: "Variable",
    tips_title: "Tips & Peace",
    quotes: &[
        "Beware of little expenses; a small leak will sink a great ship.",
        "Money is a terrible master but an excellent servant.",
        "Do not save what is left after spending, but spend what is left after saving.",
    ],
    tips: &[
        Tip {
            title: "50-30-20 Rule",
            description: "50% Needs, 30% Wants, 20% Savings or Debt.",
        },
        Tip {
            title: "Emergency Fund",
            description: "Try to save 3-6 months of essential expenses in a safe place.",
        },
        Tip {
            title: "Impulse Buying",
            description: "Wait 24 hours before buying something unplanned. The urge usually fades.",
        },
    ],
};

const ES_ES: Labels = Labels {
    balance: "Saldo Total",
    income: "Ingresos",
    expenses: "Gastos",
    recent_activity: "Actividad Reciente",
    transactions: "Transacciones",
    vaults: "Mis Ahorros",
    empty_transactions: "No hay transacciones registradas.",
    empty_vaults: "Sin ahorros por ahora.",
    reached: "alcanzado",
    fixed: "Fija",
    variable: "Variable",
    tips_title: "Consejos y Paz",
    quotes: &[
        "El dinero es un amo terrible, pero un sirviente excelente.",
        "El hábito de ahorrar es en sí mismo una educación; fomenta todas las virtudes.",
        "No ahorres lo que queda después de gastar, sino gasta lo que queda después de ahorrar.",
    ],
    tips: &[
        Tip {
            title: "Regla 50-30-20",
            description: "50% Necesidades, 30% Deseos, 20% Ahorro.",
        },
        Tip {
            title: "Fondo de Emergencia",
            description: "Ahorra de 3 a 6 meses de gastos básicos en un lugar seguro.",
        },
        Tip {
            title: "Compras por Impulso",
            description: "Espera 24 horas antes de comprar algo no planeado.",
        },
    ],
};

impl Labels {
    pub fn for_language(language: &Language) -> &'static Labels {
        match language.effective() {
            Language::EnUs => &EN_US,
            Language::EsEs => &ES_ES,
            _ => &PT_BR,
        }
    }

    /// The quote of the day; it rotates with the day of the year.
    pub fn quote_for(&self, date: NaiveDate) -> &'static str {
        let index = date.ordinal0() as usize % self.quotes.len().max(1);
        self.quotes.get(index).copied().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_language_falls_back_to_portuguese() {
        let labels = Labels::for_language(&Language::Other("de-DE".to_string()));
        assert_eq!(labels.balance, "Saldo Total");
        assert_eq!(labels.income, "Ganhos");
        assert_eq!(Labels::for_language(&Language::EnUs).vaults, "My Vaults");
    }

    #[test]
    fn test_quote_rotates_daily() {
        let labels = Labels::for_language(&Language::EnUs);
        let jan1 = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        let jan2 = NaiveDate::from_ymd_opt(2026, 1, 2).unwrap();
        let jan4 = NaiveDate::from_ymd_opt(2026, 1, 4).unwrap();
        assert_eq!(labels.quote_for(jan1), labels.quotes[0]);
        assert_eq!(labels.quote_for(jan2), labels.quotes[1]);
        assert_eq!(labels.quote_for(jan4), labels.quotes[0]);
    }

    #[test]
    fn test_every_language_has_tips() {
        for language in [Language::PtBr, Language::EnUs, Language::EsEs] {
            let labels = Labels::for_language(&language);
            assert!(!labels.tips.is_empty());
            assert!(!labels.quotes.is_empty());
        }
    }
}
