//! Human and machine readable summaries of a search run.

use serde::Serialize;

use euclidea_kernel::{Entity, EntityKind, Point, World};
use euclidea_solver::{ConstructionBudget, ConstructionProblem, SearchOutcome, SearchStats, Strategy};

#[derive(Debug, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Status {
    Found,
    Exhausted,
    LimitReached,
}

/// One construction along the solution path.
#[derive(Debug, Serialize)]
pub struct Step {
    pub index: usize,
    pub kind: EntityKind,
    pub description: String,
    pub entity: Entity,
}

#[derive(Debug, Serialize)]
pub struct Report {
    pub goal: Point,
    pub strategy: Strategy,
    pub budget: ConstructionBudget,
    pub status: Status,
    pub stats: SearchStats,
    pub steps: Vec<Step>,
}

impl Report {
    pub fn new(problem: &ConstructionProblem, strategy: Strategy, outcome: &SearchOutcome<World>) -> Self {
        let status = match outcome {
            SearchOutcome::Found(_) => Status::Found,
            SearchOutcome::Exhausted(_) => Status::Exhausted,
            SearchOutcome::LimitReached(_) => Status::LimitReached,
        };
        let steps = outcome
            .solution()
            .map(|solution| constructions(&solution.path))
            .unwrap_or_default();
        Self {
            goal: problem.goal().clone(),
            strategy,
            budget: problem.budget(),
            status,
            stats: outcome.stats(),
            steps,
        }
    }

    pub fn to_text(&self) -> String {
        let mut out = match self.status {
            Status::Found => format!("Reached {} in {} steps:\n", self.goal, self.steps.len()),
            Status::Exhausted => format!("No construction of {} within the budget.\n", self.goal),
            Status::LimitReached => format!("Gave up on {} at the expansion limit.\n", self.goal),
        };
        for step in &self.steps {
            out.push_str(&format!("  {}. {}\n", step.index, step.description));
        }
        out.push_str(&format!(
            "{} states generated, {} expanded, max depth {}\n",
            self.stats.generated, self.stats.expanded, self.stats.max_depth
        ));
        out
    }
}

/// The entity each transition of `path` adds.
fn constructions(path: &[World]) -> Vec<Step> {
    path.windows(2)
        .filter_map(|pair| {
            pair[1]
                .entities()
                .iter()
                .find(|entity| !pair[0].entities().contains(*entity))
                .cloned()
        })
        .enumerate()
        .map(|(i, entity)| Step {
            index: i + 1,
            kind: entity.kind(),
            description: entity.to_string(),
            entity,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use euclidea_kernel::{Circle, Line, Polygon};
    use euclidea_solver::Solution;

    fn square() -> World {
        World::new([Entity::Polygon(Polygon::square(8).unwrap())])
    }

    #[test]
    fn test_steps_name_added_entities() {
        let problem = ConstructionProblem::square(8).unwrap();
        let first = square();
        let circle = Circle::through(Point::new(0, 0), &Point::new(8, 0)).unwrap();
        let second = first.add_entity(circle.clone());
        let line = Line::through(Point::new(0, 8), Point::new(8, 0)).unwrap();
        let third = second.add_entity(line);
        let outcome = SearchOutcome::Found(Solution {
            path: vec![first, second, third],
            stats: SearchStats::default(),
        });

        let report = Report::new(&problem, Strategy::DepthFirst, &outcome);
        assert!(matches!(report.status, Status::Found));
        assert_eq!(report.steps.len(), 2);
        assert_eq!(report.steps[0].entity, Entity::Circle(circle));
        assert!(matches!(report.steps[1].entity, Entity::Line(_)));
        assert_eq!(report.steps[1].index, 2);

        let text = report.to_text();
        assert!(text.starts_with("Reached (4, 3) in 2 steps"));
        assert!(text.contains("  1. circle"));
    }

    #[test]
    fn test_exhausted_report_serializes() {
        let problem = ConstructionProblem::square(8).unwrap();
        let outcome = SearchOutcome::<World>::Exhausted(SearchStats {
            generated: 6,
            expanded: 7,
            max_depth: 1,
        });
        let report = Report::new(&problem, Strategy::BreadthFirst, &outcome);
        assert!(report.steps.is_empty());

        let json: serde_json::Value = serde_json::to_value(&report).unwrap();
        assert_eq!(json["status"], "exhausted");
        assert_eq!(json["strategy"], "breadth-first");
        assert_eq!(json["stats"]["expanded"], 7);
        assert_eq!(json["budget"]["circle_stage_max"], 3);
    }
}
