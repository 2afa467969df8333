pub mod models;
pub mod utils;

pub use models::{
    AccountStatus, DeployedCounts, FilterDimension, FilterSelection, MonetaryBreakdown, Project,
    QuerySpec, SortDirection, SortKey, SortKind, Summary, Unit,
};
pub use utils::brazilian_format;
