// Dashboard figures over the visible units.
use shared::models::{Project, Summary, Unit};

/// Totals, count and deployed-project counts of `view`.
///
/// Always called with the filtered view so the figures follow what is shown.
pub fn aggregate<'a, I>(view: I) -> Summary
where
    I: IntoIterator<Item = &'a Unit>,
{
    view.into_iter().fold(Summary::default(), |mut summary, unit| {
        summary.total_initial += unit.initial_balance.total;
        summary.total_available += unit.available_balance.total;
        summary.total_committed += unit.committed_amount.total;
        summary.count += 1;
        for project in Project::ALL {
            if unit.is_deployed(project) {
                summary.deployed.increment(project);
            }
        }
        summary
    })
}

/// Units of `view` where `project` is deployed, in view order.
pub fn units_with_project<'a, I>(view: I, project: Project) -> Vec<&'a Unit>
where
    I: IntoIterator<Item = &'a Unit>,
{
    view.into_iter().filter(|unit| unit.is_deployed(project)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::MonetaryBreakdown;

    fn money(total: f64) -> MonetaryBreakdown {
        MonetaryBreakdown { capital: 0.0, operating: 0.0, total }
    }

    fn sample() -> Vec<Unit> {
        vec![
            Unit {
                sequence_index: 0,
                initial_balance: money(1000.0),
                committed_amount: money(250.5),
                available_balance: money(749.5),
                lab_informatica: "IMPLANTADO".into(),
                lab_robotica: "Implantado".into(),
                ..Default::default()
            },
            Unit {
                sequence_index: 1,
                initial_balance: money(500.0),
                committed_amount: money(0.0),
                available_balance: money(-20.0),
                lab_informatica: "EM IMPLANTAÇÃO".into(),
                projeto_agroecologico: "implantado".into(),
                lab_robotica: String::new(),
                ..Default::default()
            },
        ]
    }

    #[test]
    fn test_aggregate_sums_totals_and_counts() {
        let units = sample();
        let summary = aggregate(&units);
        assert_eq!(summary.count, 2);
        assert!((summary.total_initial - 1500.0).abs() < 1e-9);
        assert!((summary.total_committed - 250.5).abs() < 1e-9);
        assert!((summary.total_available - 729.5).abs() < 1e-9);
        assert_eq!(summary.deployed.get(Project::LabInformatica), 1);
        assert_eq!(summary.deployed.get(Project::EscritoriosCriativos), 0);
        assert_eq!(summary.deployed.get(Project::ProjetoAgroecologico), 1);
        assert_eq!(summary.deployed.get(Project::LabRobotica), 1);
    }

    #[test]
    fn test_aggregate_empty_view() {
        let summary = aggregate(Vec::<&Unit>::new());
        assert_eq!(summary, Summary::default());
    }

    #[test]
    fn test_units_with_project() {
        let units = sample();
        let robotics = units_with_project(&units, Project::LabRobotica);
        assert_eq!(robotics.len(), 1);
        assert_eq!(robotics[0].sequence_index, 0);
        assert!(units_with_project(&units, Project::EscritoriosCriativos).is_empty());
    }
}
