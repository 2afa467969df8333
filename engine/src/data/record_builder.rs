// Reshapes decoded report rows into `Unit` records and back.
use super::csv_parser::{CsvRow, ReportCsvParser};
use crate::error::EngineError;
use shared::brazilian_format::{format_currency, parse_monetary};
use shared::models::{MonetaryBreakdown, Project, Unit};

/// Every column the builder understands, across all known report variants.
pub const REPORT_COLUMNS: [&str; 20] = [
    "nte",
    "mes",
    "inep",
    "sec",
    "escola",
    "municipio",
    "saldoInicial_capital",
    "saldoInicial_custeio",
    "saldoInicial_total",
    "valorComprometido_capital",
    "valorComprometido_custeio",
    "valorComprometido_total",
    "saldoDisponivel_capital",
    "saldoDisponivel_custeio",
    "saldoDisponivel_total",
    "statusConta",
    "labInformatica",
    "escritoriosCriativos",
    "projetoAgroecologico",
    "labRobotica",
];

pub struct RecordBuilder;

impl RecordBuilder {
    /// Builds one `Unit` per row; `sequence_index` follows row order.
    ///
    /// Missing columns degrade to "" or 0, unknown columns are ignored.
    pub fn build(rows: &[CsvRow]) -> Vec<Unit> {
        if let Some(first) = rows.first() {
            let missing: Vec<&str> = REPORT_COLUMNS.iter().copied().filter(|c| !first.has(c)).collect();
            if !missing.is_empty() {
                tracing::debug!(?missing, "Report variant lacks some known columns; defaulting them");
            }
        }

        rows.iter()
            .enumerate()
            .map(|(sequence_index, row)| Self::build_unit(sequence_index, row))
            .collect()
    }

    fn build_unit(sequence_index: usize, row: &CsvRow) -> Unit {
        Unit {
            sequence_index,
            nte: row.get("nte").to_string(),
            reference_month: row.get("mes").to_string(),
            inep: row.get("inep").to_string(),
            sec: row.get("sec").to_string(),
            name: row.get("escola").to_string(),
            municipality: row.get("municipio").to_string(),
            initial_balance: Self::monetary(row, "saldoInicial"),
            committed_amount: Self::monetary(row, "valorComprometido"),
            available_balance: Self::monetary(row, "saldoDisponivel"),
            account_status: row.get("statusConta").to_string(),
            lab_informatica: row.get(Project::LabInformatica.column()).to_string(),
            escritorios_criativos: row.get(Project::EscritoriosCriativos.column()).to_string(),
            projeto_agroecologico: row.get(Project::ProjetoAgroecologico.column()).to_string(),
            lab_robotica: row.get(Project::LabRobotica.column()).to_string(),
        }
    }

    fn monetary(row: &CsvRow, group: &str) -> MonetaryBreakdown {
        MonetaryBreakdown {
            capital: parse_monetary(row.get(&format!("{}_capital", group))),
            operating: parse_monetary(row.get(&format!("{}_custeio", group))),
            total: parse_monetary(row.get(&format!("{}_total", group))),
        }
    }

    /// Field values of `unit` in `REPORT_COLUMNS` order, amounts formatted as currency.
    pub fn to_record(unit: &Unit) -> Vec<String> {
        let money = |m: &MonetaryBreakdown| [format_currency(m.capital), format_currency(m.operating), format_currency(m.total)];
        let mut record = vec![
            unit.nte.clone(),
            unit.reference_month.clone(),
            unit.inep.clone(),
            unit.sec.clone(),
            unit.name.clone(),
            unit.municipality.clone(),
        ];
        record.extend(money(&unit.initial_balance));
        record.extend(money(&unit.committed_amount));
        record.extend(money(&unit.available_balance));
        record.push(unit.account_status.clone());
        record.extend(Project::ALL.iter().map(|p| unit.project_status(*p).to_string()));
        record
    }

    /// Exports units as a report CSV that `ReportCsvParser::decode` reads back.
    pub fn export_csv<'a, I>(units: I) -> Result<String, EngineError>
    where
        I: IntoIterator<Item = &'a Unit>,
    {
        ReportCsvParser::encode(&REPORT_COLUMNS, units.into_iter().map(Self::to_record))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_REPORT: &str = "\
nte,inep,sec,escola,municipio,saldoInicial_capital,saldoInicial_custeio,saldoInicial_total,valorComprometido_capital,valorComprometido_custeio,valorComprometido_total,saldoDisponivel_capital,saldoDisponivel_custeio,saldoDisponivel_total,statusConta,labInformatica,escritoriosCriativos,projetoAgroecologico,labRobotica
26,29100001,1101,\"Colégio Estadual Rui Barbosa, Sede\",Salvador,\"R$ 1.000,00\",\"R$ 234,56\",\"R$ 1.234,56\",\"R$ 100,00\",R$ 0,\"R$ 100,00\",\"R$ 900,00\",\"R$ 234,56\",\"R$ 1.134,56\",ATIVA,IMPLANTADO,,EM IMPLANTAÇÃO,implantado
3,29200002,2202,Escola Municipal do Campo,Feira de Santana,n/d,,,,,,,,\"-R$ 50,00\",EM ABERTURA,,,,";

    #[test]
    fn test_build_full_variant() {
        let doc = ReportCsvParser::decode(FULL_REPORT);
        let units = RecordBuilder::build(&doc.rows);

        assert_eq!(units.len(), 2);
        let first = &units[0];
        assert_eq!(first.sequence_index, 0);
        assert_eq!(first.nte, "26");
        assert_eq!(first.name, "Colégio Estadual Rui Barbosa, Sede");
        assert_eq!(first.municipality, "Salvador");
        assert_eq!(first.initial_balance, MonetaryBreakdown { capital: 1000.0, operating: 234.56, total: 1234.56 });
        assert_eq!(first.committed_amount.operating, 0.0);
        assert_eq!(first.available_balance.total, 1134.56);
        assert_eq!(first.account_status, "ATIVA");
        assert_eq!(first.lab_robotica, "implantado");
        assert_eq!(first.reference_month, "");

        let second = &units[1];
        assert_eq!(second.sequence_index, 1);
        assert_eq!(second.initial_balance, MonetaryBreakdown::default());
        assert_eq!(second.available_balance.total, -50.0);
    }

    #[test]
    fn test_build_month_variant_with_extra_columns() {
        let doc = ReportCsvParser::decode(
            "escola,mes,inep,saldoInicial_total,observacao\n\"Escola A, Centro\",\"01/2024\",\"123\",\"R$ 1.234,56\",ignorar",
        );
        let units = RecordBuilder::build(&doc.rows);

        assert_eq!(units[0].name, "Escola A, Centro");
        assert_eq!(units[0].reference_month, "01/2024");
        assert_eq!(units[0].inep, "123");
        assert_eq!(units[0].initial_balance.total, 1234.56);
        assert_eq!(units[0].nte, "");
        assert_eq!(units[0].sec, "");
    }

    #[test]
    fn test_total_is_kept_as_reported() {
        let doc = ReportCsvParser::decode(
            "saldoDisponivel_capital,saldoDisponivel_custeio,saldoDisponivel_total\n\"10,00\",\"5,00\",\"99,00\"",
        );
        let units = RecordBuilder::build(&doc.rows);
        assert_eq!(units[0].available_balance.total, 99.0);
    }

    #[test]
    fn test_build_skips_nothing_and_indexes_in_order() {
        let doc = ReportCsvParser::decode("escola\nA\n\nB\nC");
        let units = RecordBuilder::build(&doc.rows);
        let indexes: Vec<usize> = units.iter().map(|u| u.sequence_index).collect();
        assert_eq!(indexes, vec![0, 1, 2]);
        assert_eq!(units[1].name, "B");
    }

    #[test]
    fn test_export_reads_back_the_same_units() {
        let units = RecordBuilder::build(&ReportCsvParser::decode(FULL_REPORT).rows);
        let exported = RecordBuilder::export_csv(&units).unwrap();
        let reread = RecordBuilder::build(&ReportCsvParser::decode(&exported).rows);
        assert_eq!(reread, units);
    }
}
