//! The seed board a fresh pipeline starts from.

use crate::types::{Board, BoardLayout, Column, Lead};
use chrono::{DateTime, TimeZone, Utc};

/// Pipeline stages, left to right
pub fn seed_columns() -> Vec<Column> {
    vec![
        Column::new("novo", "Novo Lead").with_leads(vec!["lead-1".into()]),
        Column::new("negociando", "Negociando").with_leads(vec!["lead-2".into()]),
        Column::new("correcao", "Correção"),
        Column::new("fechado", "Fechado").with_leads(vec!["lead-3".into()]),
        Column::new("inativo", "Inativo"),
    ]
}

pub fn seed_layout() -> BoardLayout {
    BoardLayout {
        columns: seed_columns(),
    }
}

/// Sample leads referenced by [`seed_columns`]
pub fn seed_leads() -> Vec<Lead> {
    vec![
        Lead::new("Implementação ERP")
            .with_id("lead-1")
            .with_company("Tech Solutions")
            .with_value(50000.0)
            .with_contact("(11) 98765-4321")
            .with_created_at(day(2024, 3, 15)),
        Lead::new("Consultoria Cloud")
            .with_id("lead-2")
            .with_company("Cloud Nine")
            .with_value(35000.0)
            .with_contact("(11) 91234-5678")
            .with_created_at(day(2024, 3, 14)),
        Lead::new("Migração de Dados")
            .with_id("lead-3")
            .with_company("Data Corp")
            .with_value(75000.0)
            .with_contact("(11) 97654-3210")
            .with_created_at(day(2024, 3, 13)),
    ]
}

/// Seed columns holding the seed leads
pub fn seed_board() -> Board {
    Board::from_parts(seed_columns(), seed_leads())
}

fn day(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0)
        .single()
        .unwrap_or_else(Utc::now)
}
