//! Straightedge-and-compass puzzles as search problems over [`World`]s.
//!
//! A state is a world; a move adds one circle or one line through points the
//! world already has. Which of the two a world may add depends only on how
//! many entities it holds, so every branch ends once the budget closes.

use std::collections::BTreeSet;

use serde::Serialize;
use tracing::{debug, warn};

use euclidea_kernel::{Entity, GeometryError, Line, Point, Polygon, Real, World};

use crate::config::ConstructionBudget;
use crate::search::{Problem, Successors};

/// What a world may construct next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Stage {
    Circles,
    Lines,
    Exhausted,
}

/// Reach `goal` as an interesting point, starting from `initial`.
#[derive(Debug, Clone)]
pub struct ConstructionProblem {
    initial: World,
    goal: Point,
    budget: ConstructionBudget,
}

impl ConstructionProblem {
    pub fn new(initial: World, goal: Point) -> Self {
        Self {
            initial,
            goal,
            budget: ConstructionBudget::default(),
        }
    }

    /// The square puzzle: from a square with corners `(0,0)` and
    /// `(side,side)`, construct `(side/2, 3·side/8)`.
    pub fn square(side: impl Into<Real>) -> Result<Self, GeometryError> {
        let side = side.into();
        let polygon = Polygon::square(side.clone())?;
        let goal = Point::new(&side * &Real::ratio(1, 2), &side * &Real::ratio(3, 8));
        Ok(Self::new(World::new([Entity::Polygon(polygon)]), goal))
    }

    pub fn with_budget(mut self, budget: ConstructionBudget) -> Self {
        self.budget = budget;
        self
    }

    pub fn initial(&self) -> &World {
        &self.initial
    }

    pub fn goal(&self) -> &Point {
        &self.goal
    }

    pub fn budget(&self) -> ConstructionBudget {
        self.budget
    }

    pub fn stage(&self, world: &World) -> Stage {
        let n = world.len();
        if n <= self.budget.circle_stage_max {
            Stage::Circles
        } else if n <= self.budget.line_stage_max {
            Stage::Lines
        } else {
            Stage::Exhausted
        }
    }
}

impl Problem for ConstructionProblem {
    type State = World;

    fn initial_state(&self) -> World {
        self.initial.clone()
    }

    fn goal_test(&self, state: &World) -> bool {
        state.has_point(&self.goal)
    }

    fn successors(&self, state: &World) -> Successors<'_, World> {
        let stage = self.stage(state);
        let points: Vec<Point> = state.points().iter().cloned().collect();
        debug!(
            ?stage,
            entities = state.len(),
            points = points.len(),
            "expanding world"
        );
        match stage {
            Stage::Circles => Box::new(fresh_children(
                state.clone(),
                World::all_circles(points).map(Entity::Circle),
            )),
            Stage::Lines => Box::new(fresh_children(
                state.clone(),
                usable_lines(World::all_lines(points)),
            )),
            Stage::Exhausted => Box::new(std::iter::empty()),
        }
    }
}

/// Line candidates that could be built; the rest are logged and dropped.
fn usable_lines(
    candidates: impl Iterator<Item = Result<Line, GeometryError>>,
) -> impl Iterator<Item = Entity> {
    candidates.filter_map(|candidate| match candidate {
        Ok(line) => Some(Entity::Line(line)),
        Err(err) => {
            warn!(%err, "skipping line candidate");
            None
        }
    })
}

/// One child per candidate that `world` lacks, each distinct child once.
fn fresh_children(
    world: World,
    candidates: impl Iterator<Item = Entity>,
) -> impl Iterator<Item = World> {
    let mut seen = BTreeSet::new();
    candidates.filter_map(move |candidate| {
        let entity = world.normalize_entity(candidate);
        if world.entities().contains(&entity) || !seen.insert(entity.clone()) {
            return None;
        }
        Some(world.add_entity(entity))
    })
}
