//! Uninformed graph search over any [`Problem`].
//!
//! Depth-first search keeps a stack of lazy successor iterators, so a state's
//! children are only built as the search reaches them. Breadth-first search
//! expands a whole state at a time. Both test states for the goal as they
//! are generated and skip states already seen.

use std::collections::{BTreeSet, VecDeque};
use std::rc::Rc;

use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::config::SearchConfig;

/// Lazily generated child states.
pub type Successors<'a, S> = Box<dyn Iterator<Item = S> + 'a>;

/// A search problem as seen by the drivers in this module.
pub trait Problem {
    /// States must be ordered so the drivers can remember what they visited.
    type State: Clone + Ord;

    fn initial_state(&self) -> Self::State;

    fn goal_test(&self, state: &Self::State) -> bool;

    /// The returned iterator may borrow the problem but not `state`.
    fn successors(&self, state: &Self::State) -> Successors<'_, Self::State>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    DepthFirst,
    BreadthFirst,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SearchStats {
    /// Child states produced by successor functions, duplicates included.
    pub generated: usize,
    /// States whose successors were requested.
    pub expanded: usize,
    /// Deepest state reached, in steps from the initial state.
    pub max_depth: usize,
}

/// States from the initial state to the goal, both included.
#[derive(Debug, Clone)]
pub struct Solution<S> {
    pub path: Vec<S>,
    pub stats: SearchStats,
}

impl<S> Solution<S> {
    /// Transitions taken; zero when the initial state is already a goal.
    pub fn steps(&self) -> usize {
        self.path.len().saturating_sub(1)
    }

    pub fn goal(&self) -> Option<&S> {
        self.path.last()
    }
}

/// How a search ended. Running out of states is an ordinary outcome.
#[derive(Debug, Clone)]
pub enum SearchOutcome<S> {
    Found(Solution<S>),
    Exhausted(SearchStats),
    LimitReached(SearchStats),
}

impl<S> SearchOutcome<S> {
    pub fn is_found(&self) -> bool {
        matches!(self, SearchOutcome::Found(_))
    }

    pub fn solution(&self) -> Option<&Solution<S>> {
        match self {
            SearchOutcome::Found(solution) => Some(solution),
            _ => None,
        }
    }

    pub fn into_solution(self) -> Option<Solution<S>> {
        match self {
            SearchOutcome::Found(solution) => Some(solution),
            _ => None,
        }
    }

    pub fn stats(&self) -> SearchStats {
        match self {
            SearchOutcome::Found(solution) => solution.stats,
            SearchOutcome::Exhausted(stats) | SearchOutcome::LimitReached(stats) => *stats,
        }
    }
}

struct Node<S> {
    state: S,
    parent: Option<Rc<Node<S>>>,
    depth: usize,
}

impl<S: Clone> Node<S> {
    fn root(state: S) -> Rc<Self> {
        Rc::new(Self {
            state,
            parent: None,
            depth: 0,
        })
    }

    fn child(state: S, parent: &Rc<Self>) -> Rc<Self> {
        Rc::new(Self {
            state,
            parent: Some(Rc::clone(parent)),
            depth: parent.depth + 1,
        })
    }

    fn path(node: &Rc<Self>) -> Vec<S> {
        let mut path = Vec::with_capacity(node.depth + 1);
        let mut current = Some(node);
        while let Some(n) = current {
            path.push(n.state.clone());
            current = n.parent.as_ref();
        }
        path.reverse();
        path
    }
}

fn found<S: Clone>(node: &Rc<Node<S>>, stats: SearchStats) -> SearchOutcome<S> {
    info!(
        steps = node.depth,
        generated = stats.generated,
        expanded = stats.expanded,
        "goal reached"
    );
    SearchOutcome::Found(Solution {
        path: Node::path(node),
        stats,
    })
}

fn limit_hit(config: &SearchConfig, stats: &SearchStats) -> bool {
    config
        .max_expansions
        .is_some_and(|limit| stats.expanded >= limit)
}

/// Run the strategy named in `config`.
pub fn search<P: Problem>(problem: &P, config: &SearchConfig) -> SearchOutcome<P::State> {
    match config.strategy {
        Strategy::DepthFirst => depth_first_search(problem, config),
        Strategy::BreadthFirst => breadth_first_search(problem, config),
    }
}

#[instrument(skip_all, fields(max_expansions = ?config.max_expansions))]
pub fn depth_first_search<P: Problem>(problem: &P, config: &SearchConfig) -> SearchOutcome<P::State> {
    let mut stats = SearchStats::default();
    let root = Node::root(problem.initial_state());
    if problem.goal_test(&root.state) {
        return found(&root, stats);
    }

    let mut visited = BTreeSet::new();
    visited.insert(root.state.clone());
    stats.expanded += 1;
    let children = problem.successors(&root.state);
    let mut stack = vec![(root, children)];

    while let Some((parent, children)) = stack.last_mut() {
        let Some(state) = children.next() else {
            stack.pop();
            continue;
        };
        stats.generated += 1;
        if !visited.insert(state.clone()) {
            continue;
        }
        let node = Node::child(state, parent);
        stats.max_depth = stats.max_depth.max(node.depth);
        if problem.goal_test(&node.state) {
            return found(&node, stats);
        }
        if limit_hit(config, &stats) {
            debug!(expanded = stats.expanded, "expansion limit reached");
            return SearchOutcome::LimitReached(stats);
        }
        stats.expanded += 1;
        let children = problem.successors(&node.state);
        stack.push((node, children));
    }

    debug!(
        generated = stats.generated,
        expanded = stats.expanded,
        "search space exhausted"
    );
    SearchOutcome::Exhausted(stats)
}

#[instrument(skip_all, fields(max_expansions = ?config.max_expansions))]
pub fn breadth_first_search<P: Problem>(problem: &P, config: &SearchConfig) -> SearchOutcome<P::State> {
    let mut stats = SearchStats::default();
    let root = Node::root(problem.initial_state());
    if problem.goal_test(&root.state) {
        return found(&root, stats);
    }

    let mut visited = BTreeSet::new();
    visited.insert(root.state.clone());
    let mut frontier = VecDeque::from([root]);

    while let Some(parent) = frontier.pop_front() {
        if limit_hit(config, &stats) {
            debug!(expanded = stats.expanded, "expansion limit reached");
            return SearchOutcome::LimitReached(stats);
        }
        stats.expanded += 1;
        for state in problem.successors(&parent.state) {
            stats.generated += 1;
            if !visited.insert(state.clone()) {
                continue;
            }
            let node = Node::child(state, &parent);
            stats.max_depth = stats.max_depth.max(node.depth);
            if problem.goal_test(&node.state) {
                return found(&node, stats);
            }
            frontier.push_back(node);
        }
    }

    debug!(
        generated = stats.generated,
        expanded = stats.expanded,
        "search space exhausted"
    );
    SearchOutcome::Exhausted(stats)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Walk the integers from 1 by `+1` or `*2` up to a bound.
    struct Doubling {
        goal: u32,
        bound: u32,
    }

    impl Problem for Doubling {
        type State = u32;

        fn initial_state(&self) -> u32 {
            1
        }

        fn goal_test(&self, state: &u32) -> bool {
            *state == self.goal
        }

        fn successors(&self, state: &u32) -> Successors<'_, u32> {
            let bound = self.bound;
            Box::new([state + 1, state * 2].into_iter().filter(move |s| *s <= bound))
        }
    }

    #[test]
    fn test_bfs_finds_shortest_path() {
        let problem = Doubling { goal: 8, bound: 20 };
        let solution = breadth_first_search(&problem, &SearchConfig::breadth_first())
            .into_solution()
            .unwrap();
        // 1 -> 2 -> 4 -> 8
        assert_eq!(solution.path, vec![1, 2, 4, 8]);
        assert_eq!(solution.steps(), 3);
        assert_eq!(solution.goal(), Some(&8));
    }

    #[test]
    fn test_dfs_finds_a_path() {
        let problem = Doubling { goal: 7, bound: 20 };
        let solution = depth_first_search(&problem, &SearchConfig::depth_first())
            .into_solution()
            .unwrap();
        assert_eq!(solution.path.first(), Some(&1));
        assert_eq!(solution.goal(), Some(&7));
        for pair in solution.path.windows(2) {
            assert!(pair[1] == pair[0] + 1 || pair[1] == pair[0] * 2);
        }
    }

    #[test]
    fn test_initial_goal_is_zero_steps() {
        let problem = Doubling { goal: 1, bound: 20 };
        for config in [SearchConfig::depth_first(), SearchConfig::breadth_first()] {
            let solution = search(&problem, &config).into_solution().unwrap();
            assert_eq!(solution.path, vec![1]);
            assert_eq!(solution.steps(), 0);
            assert_eq!(solution.stats.expanded, 0);
        }
    }

    #[test]
    fn test_unreachable_goal_exhausts() {
        let problem = Doubling { goal: 50, bound: 20 };
        for config in [SearchConfig::depth_first(), SearchConfig::breadth_first()] {
            let outcome = search(&problem, &config);
            assert!(matches!(outcome, SearchOutcome::Exhausted(_)));
            assert!(outcome.solution().is_none());
            // every state 1..=20 is expanded exactly once
            assert_eq!(outcome.stats().expanded, 20);
        }
    }

    #[test]
    fn test_expansion_limit() {
        let problem = Doubling { goal: 50, bound: 1000 };
        let config = SearchConfig::breadth_first().with_max_expansions(5);
        let outcome = search(&problem, &config);
        assert!(matches!(outcome, SearchOutcome::LimitReached(_)));
        assert_eq!(outcome.stats().expanded, 5);
    }
}
