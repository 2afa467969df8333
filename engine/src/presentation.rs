// Text rendering of query results for the command line, and translation of
// raw user input into a `QuerySpec`.
use crate::query::{units_with_project, QueryResult};
use shared::brazilian_format::format_currency;
use shared::models::{
    AccountStatus, FilterDimension, FilterSelection, MonetaryBreakdown, Project, QuerySpec, SortDirection, SortKey,
    Summary, Unit,
};
use std::fmt::Write;

/// Raw query controls as typed by the user.
#[derive(Debug, Clone, Default)]
pub struct QueryInput {
    pub search: String,
    /// `dimension=value` pairs; `value` may be "all"/"todos".
    pub filters: Vec<String>,
    pub sort: Option<String>,
    pub descending: bool,
}

/// Builds a spec on top of `base`. Inputs naming no known key are logged and
/// skipped so a bad control never blocks the query.
pub fn spec_from_input(base: QuerySpec, input: &QueryInput) -> QuerySpec {
    let mut spec = base.with_search(input.search.clone());

    for raw in &input.filters {
        let Some((dimension, value)) = raw.split_once('=') else {
            tracing::warn!(filter = %raw, "Ignoring filter without '='");
            continue;
        };
        match dimension.parse::<FilterDimension>() {
            Ok(dimension) => spec.filters.insert(dimension, FilterSelection::parse(value)),
            Err(e) => {
                tracing::warn!(error = %e, "Ignoring filter");
                continue;
            }
        };
    }

    if let Some(raw) = &input.sort {
        spec.sort_key = match raw.parse::<SortKey>() {
            Ok(key) => Some(key),
            Err(e) => {
                tracing::warn!(error = %e, "Leaving results unsorted");
                None
            }
        };
    }
    if input.descending {
        spec.sort_direction = SortDirection::Descending;
    }
    spec
}

pub fn status_badge(status: AccountStatus) -> &'static str {
    match status {
        AccountStatus::Active => "[ativa]",
        AccountStatus::Opening => "[abertura]",
        AccountStatus::Transfer => "[repasse]",
        AccountStatus::Possession => "[posse]",
        AccountStatus::Repair => "[reparo]",
        AccountStatus::Other => "[-]",
    }
}

pub fn render_table(result: &QueryResult<'_>) -> String {
    if result.units.is_empty() {
        return "Nenhuma escola encontrada.\n".to_string();
    }

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:>5} {:>10} {:>8} {:>4}  {:<20} {:<40} {:>18} {:>18} {:>18}  {}",
        "#", "INEP", "SEC", "NTE", "Município", "Escola", "Saldo Inicial", "Comprometido", "Disponível", "Status"
    );
    for unit in &result.units {
        let _ = writeln!(
            out,
            "{:>5} {:>10} {:>8} {:>4}  {:<20} {:<40} {:>18} {:>18} {:>18}  {} {}",
            unit.sequence_index,
            unit.inep,
            unit.sec,
            unit.nte,
            truncate(&unit.municipality, 20),
            truncate(&unit.name, 40),
            format_currency(unit.initial_balance.total),
            format_currency(unit.committed_amount.total),
            format_currency(unit.available_balance.total),
            status_badge(unit.status()),
            unit.account_status,
        );
    }
    let _ = writeln!(out, "{} escolas encontradas", result.count());
    out
}

pub fn render_summary(summary: &Summary) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Saldo inicial total:     {}", format_currency(summary.total_initial));
    let _ = writeln!(out, "Valor comprometido:      {}", format_currency(summary.total_committed));
    let _ = writeln!(out, "Saldo disponível total:  {}", format_currency(summary.total_available));
    let _ = writeln!(out, "Total de escolas:        {}", summary.count);
    for project in Project::ALL {
        let _ = writeln!(out, "{:<24} {} Implantados", format!("{}:", project.label()), summary.deployed.get(project));
    }
    out
}

pub fn render_detail(unit: &Unit) -> String {
    let or_na = |s: &str| if s.is_empty() { "N/A".to_string() } else { s.to_string() };
    let money = |out: &mut String, title: &str, m: &MonetaryBreakdown| {
        let _ = writeln!(out, "  {}", title);
        let _ = writeln!(out, "    Capital: {}", format_currency(m.capital));
        let _ = writeln!(out, "    Custeio: {}", format_currency(m.operating));
        let _ = writeln!(out, "    Total:   {}", format_currency(m.total));
    };

    let mut out = String::new();
    let name = if unit.name.is_empty() { "Nome não informado" } else { unit.name.as_str() };
    let _ = writeln!(out, "{}", name);
    let _ = writeln!(out, "{} | NTE: {}", or_na(&unit.municipality), or_na(&unit.nte));
    if !unit.reference_month.is_empty() {
        let _ = writeln!(out, "Mês de referência: {}", unit.reference_month);
    }
    let _ = writeln!(out, "Código INEP (MEC): {}", or_na(&unit.inep));
    let _ = writeln!(out, "Código SEC: {}", or_na(&unit.sec));
    let _ = writeln!(out, "Situação da conta: {} {}", status_badge(unit.status()), or_na(&unit.account_status));
    let _ = writeln!(out, "Valores financeiros");
    money(&mut out, "Saldo Inicial", &unit.initial_balance);
    money(&mut out, "Valor Comprometido", &unit.committed_amount);
    money(&mut out, "Saldo Disponível", &unit.available_balance);
    let _ = writeln!(out, "Status dos projetos");
    for project in Project::ALL {
        let _ = writeln!(out, "  {}: {}", project.label(), or_na(unit.project_status(project)));
    }
    out
}

pub fn render_project_list(project: Project, units: &[&Unit]) -> String {
    let mut out = format!("Unidades com {} Implantado\n", project.label());
    if units.is_empty() {
        out.push_str("Nenhuma unidade encontrada.\n");
    }
    for unit in units {
        let _ = writeln!(out, "  {} ({})", unit.name, unit.municipality);
    }
    out
}

/// Project list for a name typed by the user. An unknown name is logged and
/// yields an empty list.
pub fn render_project_query(name: &str, view: &[&Unit]) -> String {
    match name.parse::<Project>() {
        Ok(project) => {
            let units = units_with_project(view.iter().copied(), project);
            render_project_list(project, &units)
        }
        Err(e) => {
            tracing::warn!(error = %e, "Listing no units");
            format!("Unidades com {} Implantado\nNenhuma unidade encontrada.\n", name)
        }
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let mut cut: String = s.chars().take(max.saturating_sub(1)).collect();
        cut.push('…');
        cut
    }
}
