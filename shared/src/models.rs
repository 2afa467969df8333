use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Status value that marks a project as deployed at a unit.
pub const DEPLOYED: &str = "IMPLANTADO";

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MonetaryBreakdown {
    pub capital: f64,
    pub operating: f64,
    // As reported; never recomputed from capital + operating.
    pub total: f64,
}

/// One row of the balance report (a school or other organizational unit).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Unit {
    pub sequence_index: usize,
    pub nte: String,
    pub reference_month: String,
    pub inep: String,
    pub sec: String,
    pub name: String,
    pub municipality: String,
    pub initial_balance: MonetaryBreakdown,
    pub committed_amount: MonetaryBreakdown,
    pub available_balance: MonetaryBreakdown,
    pub account_status: String,
    pub lab_informatica: String,
    pub escritorios_criativos: String,
    pub projeto_agroecologico: String,
    pub lab_robotica: String,
}

impl Unit {
    pub fn project_status(&self, project: Project) -> &str {
        match project {
            Project::LabInformatica => &self.lab_informatica,
            Project::EscritoriosCriativos => &self.escritorios_criativos,
            Project::ProjetoAgroecologico => &self.projeto_agroecologico,
            Project::LabRobotica => &self.lab_robotica,
        }
    }

    pub fn is_deployed(&self, project: Project) -> bool {
        self.project_status(project).to_uppercase() == DEPLOYED
    }

    pub fn status(&self) -> AccountStatus {
        AccountStatus::classify(&self.account_status)
    }

    pub fn dimension_value(&self, dimension: FilterDimension) -> &str {
        match dimension {
            FilterDimension::Nte => &self.nte,
            FilterDimension::Municipality => &self.municipality,
            FilterDimension::ReferenceMonth => &self.reference_month,
            FilterDimension::AccountStatus => &self.account_status,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Project {
    LabInformatica,
    EscritoriosCriativos,
    ProjetoAgroecologico,
    LabRobotica,
}

impl Project {
    pub const ALL: [Project; 4] = [
        Project::LabInformatica,
        Project::EscritoriosCriativos,
        Project::ProjetoAgroecologico,
        Project::LabRobotica,
    ];

    /// Column name in the source report.
    pub fn column(self) -> &'static str {
        match self {
            Project::LabInformatica => "labInformatica",
            Project::EscritoriosCriativos => "escritoriosCriativos",
            Project::ProjetoAgroecologico => "projetoAgroecologico",
            Project::LabRobotica => "labRobotica",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Project::LabInformatica => "Lab. Informática",
            Project::EscritoriosCriativos => "Escritórios Criativos",
            Project::ProjetoAgroecologico => "Proj. Agroecológico",
            Project::LabRobotica => "Lab. Robótica",
        }
    }
}

impl FromStr for Project {
    type Err = UnknownKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Project::ALL
            .into_iter()
            .find(|p| p.column().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownKey::new("project", s))
    }
}

/// Badge category derived from the free-text `statusConta` label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccountStatus {
    Active,
    Opening,
    Transfer,
    Possession,
    Repair,
    Other,
}

impl AccountStatus {
    pub fn classify(label: &str) -> Self {
        let label = label.to_uppercase();
        if label == "ATIVA" {
            AccountStatus::Active
        } else if label.contains("ABERTURA") {
            AccountStatus::Opening
        } else if label.contains("REPASSE") {
            AccountStatus::Transfer
        } else if label.contains("POSSE") {
            AccountStatus::Possession
        } else if label.contains("REPARO") {
            AccountStatus::Repair
        } else {
            AccountStatus::Other
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeployedCounts {
    pub lab_informatica: usize,
    pub escritorios_criativos: usize,
    pub projeto_agroecologico: usize,
    pub lab_robotica: usize,
}

impl DeployedCounts {
    pub fn get(&self, project: Project) -> usize {
        match project {
            Project::LabInformatica => self.lab_informatica,
            Project::EscritoriosCriativos => self.escritorios_criativos,
            Project::ProjetoAgroecologico => self.projeto_agroecologico,
            Project::LabRobotica => self.lab_robotica,
        }
    }

    pub fn increment(&mut self, project: Project) {
        match project {
            Project::LabInformatica => self.lab_informatica += 1,
            Project::EscritoriosCriativos => self.escritorios_criativos += 1,
            Project::ProjetoAgroecologico => self.projeto_agroecologico += 1,
            Project::LabRobotica => self.lab_robotica += 1,
        }
    }
}

/// Aggregates over the currently visible units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub total_initial: f64,
    pub total_available: f64,
    pub total_committed: f64,
    pub count: usize,
    pub deployed: DeployedCounts,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FilterDimension {
    Nte,
    Municipality,
    ReferenceMonth,
    AccountStatus,
}

impl FromStr for FilterDimension {
    type Err = UnknownKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "nte" => Ok(FilterDimension::Nte),
            "municipio" | "municipality" => Ok(FilterDimension::Municipality),
            "mes" | "month" | "reference_month" => Ok(FilterDimension::ReferenceMonth),
            "statusconta" | "status" | "account_status" => Ok(FilterDimension::AccountStatus),
            _ => Err(UnknownKey::new("filter dimension", s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FilterSelection {
    #[default]
    All,
    Only(String),
}

impl FilterSelection {
    /// `"all"` and the dashboard's `"todos"` select everything.
    pub fn parse(value: &str) -> Self {
        let value = value.trim();
        if value.eq_ignore_ascii_case("all") || value.eq_ignore_ascii_case("todos") {
            FilterSelection::All
        } else {
            FilterSelection::Only(value.to_string())
        }
    }

    pub fn accepts(&self, value: &str) -> bool {
        match self {
            FilterSelection::All => true,
            FilterSelection::Only(selected) => selected == value,
        }
    }
}

/// How a sort key's values are compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKind {
    /// Compare the `total` of a monetary group.
    MonetaryTotal,
    /// Compare the leading integer of a numeric-looking code.
    NumericCode,
    /// Case-insensitive, accent-aware text comparison.
    Text,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortKey {
    Nte,
    Inep,
    Sec,
    Name,
    Municipality,
    ReferenceMonth,
    InitialBalance,
    CommittedAmount,
    AvailableBalance,
    AccountStatus,
    Project(Project),
}

impl SortKey {
    pub fn kind(self) -> SortKind {
        match self {
            SortKey::InitialBalance | SortKey::CommittedAmount | SortKey::AvailableBalance => {
                SortKind::MonetaryTotal
            }
            SortKey::Nte | SortKey::Inep | SortKey::Sec => SortKind::NumericCode,
            SortKey::Name
            | SortKey::Municipality
            | SortKey::ReferenceMonth
            | SortKey::AccountStatus
            | SortKey::Project(_) => SortKind::Text,
        }
    }

    pub fn monetary<'a>(self, unit: &'a Unit) -> Option<&'a MonetaryBreakdown> {
        match self {
            SortKey::InitialBalance => Some(&unit.initial_balance),
            SortKey::CommittedAmount => Some(&unit.committed_amount),
            SortKey::AvailableBalance => Some(&unit.available_balance),
            _ => None,
        }
    }

    pub fn text<'a>(self, unit: &'a Unit) -> &'a str {
        match self {
            SortKey::Nte => &unit.nte,
            SortKey::Inep => &unit.inep,
            SortKey::Sec => &unit.sec,
            SortKey::Name => &unit.name,
            SortKey::Municipality => &unit.municipality,
            SortKey::ReferenceMonth => &unit.reference_month,
            SortKey::AccountStatus => &unit.account_status,
            SortKey::Project(project) => unit.project_status(project),
            SortKey::InitialBalance | SortKey::CommittedAmount | SortKey::AvailableBalance => "",
        }
    }
}

impl FromStr for SortKey {
    type Err = UnknownKey;

    // Accepts the report's column names as well as the English field names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim();
        if let Ok(project) = key.parse::<Project>() {
            return Ok(SortKey::Project(project));
        }
        match key.to_lowercase().as_str() {
            "nte" => Ok(SortKey::Nte),
            "inep" => Ok(SortKey::Inep),
            "sec" => Ok(SortKey::Sec),
            "escola" | "name" => Ok(SortKey::Name),
            "municipio" | "municipality" => Ok(SortKey::Municipality),
            "mes" | "month" | "reference_month" => Ok(SortKey::ReferenceMonth),
            "saldoinicial" | "initial_balance" => Ok(SortKey::InitialBalance),
            "valorcomprometido" | "committed_amount" => Ok(SortKey::CommittedAmount),
            "saldodisponivel" | "available_balance" => Ok(SortKey::AvailableBalance),
            "statusconta" | "status" | "account_status" => Ok(SortKey::AccountStatus),
            _ => Err(UnknownKey::new("sort key", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

impl FromStr for SortDirection {
    type Err = UnknownKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortDirection::Ascending),
            "desc" | "descending" => Ok(SortDirection::Descending),
            _ => Err(UnknownKey::new("sort direction", s)),
        }
    }
}

/// Everything that drives one query: search, filters and ordering.
///
/// Owned by whoever presents the data; the query functions only read it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuerySpec {
    pub search_term: String,
    pub filters: BTreeMap<FilterDimension, FilterSelection>,
    pub sort_key: Option<SortKey>,
    pub sort_direction: SortDirection,
}

impl Default for QuerySpec {
    fn default() -> Self {
        Self {
            search_term: String::new(),
            filters: BTreeMap::new(),
            sort_key: Some(SortKey::Nte),
            sort_direction: SortDirection::Ascending,
        }
    }
}

impl QuerySpec {
    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.search_term = term.into();
        self
    }

    pub fn with_filter(mut self, dimension: FilterDimension, selection: FilterSelection) -> Self {
        self.filters.insert(dimension, selection);
        self
    }

    pub fn with_sort(mut self, key: Option<SortKey>, direction: SortDirection) -> Self {
        self.sort_key = key;
        self.sort_direction = direction;
        self
    }

    pub fn selection(&self, dimension: FilterDimension) -> &FilterSelection {
        static ALL: FilterSelection = FilterSelection::All;
        self.filters.get(&dimension).unwrap_or(&ALL)
    }

    /// Header click: same key flips the direction, a new key starts ascending.
    pub fn toggle_sort(&mut self, key: SortKey) {
        if self.sort_key == Some(key) {
            self.sort_direction = self.sort_direction.toggled();
        } else {
            self.sort_key = Some(key);
            self.sort_direction = SortDirection::Ascending;
        }
    }
}

/// A query input name that matches no known key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownKey {
    pub kind: &'static str,
    pub value: String,
}

impl UnknownKey {
    fn new(kind: &'static str, value: &str) -> Self {
        Self { kind, value: value.to_string() }
    }
}

impl fmt::Display for UnknownKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown {} '{}'", self.kind, self.value)
    }
}

impl std::error::Error for UnknownKey {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_sort_same_key_flips_direction() {
        let mut spec = QuerySpec::default();
        assert_eq!(spec.sort_key, Some(SortKey::Nte));
        spec.toggle_sort(SortKey::Nte);
        assert_eq!(spec.sort_direction, SortDirection::Descending);
        spec.toggle_sort(SortKey::Nte);
        assert_eq!(spec.sort_direction, SortDirection::Ascending);
    }

    #[test]
    fn test_toggle_sort_new_key_resets_to_ascending() {
        let mut spec = QuerySpec::default().with_sort(Some(SortKey::Name), SortDirection::Descending);
        spec.toggle_sort(SortKey::AvailableBalance);
        assert_eq!(spec.sort_key, Some(SortKey::AvailableBalance));
        assert_eq!(spec.sort_direction, SortDirection::Ascending);
    }

    #[test]
    fn test_sort_key_parsing() {
        assert_eq!("saldoDisponivel".parse::<SortKey>().unwrap(), SortKey::AvailableBalance);
        assert_eq!("escola".parse::<SortKey>().unwrap(), SortKey::Name);
        assert_eq!(
            "labRobotica".parse::<SortKey>().unwrap(),
            SortKey::Project(Project::LabRobotica)
        );
        assert!("saldo".parse::<SortKey>().is_err());
    }

    #[test]
    fn test_sort_key_kinds() {
        assert_eq!(SortKey::CommittedAmount.kind(), SortKind::MonetaryTotal);
        assert_eq!(SortKey::Sec.kind(), SortKind::NumericCode);
        assert_eq!(SortKey::Municipality.kind(), SortKind::Text);
    }

    #[test]
    fn test_filter_selection_parse() {
        assert_eq!(FilterSelection::parse("todos"), FilterSelection::All);
        assert_eq!(FilterSelection::parse("ALL"), FilterSelection::All);
        assert_eq!(
            FilterSelection::parse(" Salvador "),
            FilterSelection::Only("Salvador".to_string())
        );
        assert!(FilterSelection::Only("3".into()).accepts("3"));
        assert!(!FilterSelection::Only("3".into()).accepts("03"));
    }

    #[test]
    fn test_unknown_filter_dimension() {
        let err = "bairro".parse::<FilterDimension>().unwrap_err();
        assert_eq!(err.to_string(), "unknown filter dimension 'bairro'");
    }

    #[test]
    fn test_account_status_classification() {
        assert_eq!(AccountStatus::classify("ativa"), AccountStatus::Active);
        assert_eq!(AccountStatus::classify("EM ABERTURA"), AccountStatus::Opening);
        assert_eq!(AccountStatus::classify("aguardando repasse"), AccountStatus::Transfer);
        assert_eq!(AccountStatus::classify("DE POSSE"), AccountStatus::Possession);
        assert_eq!(AccountStatus::classify("Em reparo"), AccountStatus::Repair);
        assert_eq!(AccountStatus::classify("INATIVA"), AccountStatus::Other);
        assert_eq!(AccountStatus::classify(""), AccountStatus::Other);
    }

    #[test]
    fn test_empty_project_status_is_not_deployed() {
        let unit = Unit { lab_robotica: String::new(), lab_informatica: "implantado".into(), ..Default::default() };
        assert!(!unit.is_deployed(Project::LabRobotica));
        assert!(unit.is_deployed(Project::LabInformatica));
    }

    #[test]
    fn test_unit_serializes_nested_money() {
        let unit = Unit {
            initial_balance: MonetaryBreakdown { capital: 1.0, operating: 2.0, total: 4.0 },
            ..Default::default()
        };
        let value = serde_json::to_value(&unit).unwrap();
        assert_eq!(value["initial_balance"]["total"], 4.0);
        assert_eq!(value["sequence_index"], 0);
    }
}
