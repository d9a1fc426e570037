//! Immutable construction snapshots.
//!
//! A [`World`] is a set of entities plus the memoised set of interesting
//! points they define. Worlds are values: adding an entity returns a new
//! world that shares structure with its parent through `im`'s persistent
//! ordered sets, and the parent's point cache seeds the child's.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, OnceLock};

use im::OrdSet;
use tracing::{instrument, trace};

use crate::geometry::GeometryError;
use crate::geometry::curves::{Circle, Line};
use crate::geometry::entity::Entity;
use crate::geometry::point::Point;
use crate::geometry::real::Real;

/// One construction state.
///
/// Key collections of worlds by order (`BTreeSet`, `BTreeMap`). `Hash` only
/// sees the entity count and kinds, so every world with the same mix of
/// circles and lines shares a bucket in a hashed collection.
#[derive(Clone)]
pub struct World {
    entities: OrdSet<Entity>,
    points: OnceLock<OrdSet<Point>>,
    normalize_lines: bool,
}

impl World {
    /// A world whose lines are stored in canonical form.
    pub fn new(entities: impl IntoIterator<Item = Entity>) -> Self {
        Self::build(entities, true)
    }

    /// A world that stores lines exactly as given, so the same line built
    /// from two different point pairs counts as two entities.
    pub fn without_normalization(entities: impl IntoIterator<Item = Entity>) -> Self {
        Self::build(entities, false)
    }

    fn build(entities: impl IntoIterator<Item = Entity>, normalize_lines: bool) -> Self {
        let entities = entities
            .into_iter()
            .map(|e| if normalize_lines { e.normalized() } else { e })
            .collect();
        Self {
            entities,
            points: OnceLock::new(),
            normalize_lines,
        }
    }

    pub fn entities(&self) -> &OrdSet<Entity> {
        &self.entities
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn normalizes_lines(&self) -> bool {
        self.normalize_lines
    }

    /// `entity` in the form this world stores it.
    pub fn normalize_entity(&self, entity: Entity) -> Entity {
        if self.normalize_lines { entity.normalized() } else { entity }
    }

    /// Membership under this world's line normalisation rule.
    pub fn contains_entity(&self, entity: &Entity) -> bool {
        match entity {
            Entity::Line(_) if self.normalize_lines => {
                self.entities.contains(&self.normalize_entity(entity.clone()))
            }
            _ => self.entities.contains(entity),
        }
    }

    /// Polygon vertices plus every point where two distinct entities meet.
    /// Computed on first access and cached for the lifetime of the world.
    pub fn points(&self) -> &OrdSet<Point> {
        self.points.get_or_init(|| compute_points(&self.entities))
    }

    pub fn has_point(&self, p: &Point) -> bool {
        self.points().contains(p)
    }

    /// Whether the point cache has been filled yet.
    pub fn points_computed(&self) -> bool {
        self.points.get().is_some()
    }

    /// A new world with `entity` added; `self` is left untouched.
    ///
    /// The child's cache is the parent's points plus whatever the new entity
    /// contributes, which is exactly what a fresh computation would give.
    pub fn add_entity(&self, entity: impl Into<Entity>) -> World {
        let entity = self.normalize_entity(entity.into());
        if self.entities.contains(&entity) {
            return self.clone();
        }
        let mut points = self.points().clone();
        points.extend(entity.vertices().iter().cloned());
        for existing in &self.entities {
            points.extend(existing.intersect(&entity));
        }
        trace!(
            entities = self.entities.len() + 1,
            points = points.len(),
            new_points = points.len() - self.points().len(),
            "extended point cache"
        );
        World {
            entities: self.entities.update(entity),
            points: OnceLock::from(points),
            normalize_lines: self.normalize_lines,
        }
    }

    /// Every compass construction available from `points`: for each centre,
    /// one circle per distinct distance to another point.
    pub fn all_circles<I>(points: I) -> impl Iterator<Item = Circle>
    where
        I: IntoIterator<Item = Point>,
    {
        let points: Arc<[Point]> = points.into_iter().collect();
        (0..points.len()).flat_map(move |i| {
            let center = points[i].clone();
            let radii: OrdSet<Real> = points
                .iter()
                .filter(|other| **other != center)
                .map(|other| center.distance_squared_to(other))
                .collect();
            radii
                .into_iter()
                .map(move |r2| Circle::from_radius_squared(center.clone(), r2))
        })
    }

    /// Every straightedge construction available from `points`, one per
    /// unordered pair. Equal points in the input surface as errors.
    pub fn all_lines<I>(points: I) -> impl Iterator<Item = Result<Line, GeometryError>>
    where
        I: IntoIterator<Item = Point>,
    {
        let points: Arc<[Point]> = points.into_iter().collect();
        let n = points.len();
        (0..n).flat_map(move |i| {
            let points = Arc::clone(&points);
            (i + 1..n).map(move |j| Line::through(points[i].clone(), points[j].clone()))
        })
    }
}

#[instrument(level = "trace", skip_all, fields(entities = entities.len()))]
fn compute_points(entities: &OrdSet<Entity>) -> OrdSet<Point> {
    let entities: Vec<&Entity> = entities.iter().collect();
    let mut points = OrdSet::new();
    for (i, a) in entities.iter().enumerate() {
        points.extend(a.vertices().iter().cloned());
        for b in &entities[i + 1..] {
            points.extend(a.intersect(b));
        }
    }
    points
}

impl PartialEq for World {
    fn eq(&self, other: &Self) -> bool {
        self.entities == other.entities
    }
}

impl Eq for World {}

impl PartialOrd for World {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for World {
    fn cmp(&self, other: &Self) -> Ordering {
        self.entities.cmp(&other.entities)
    }
}

/// Hashes the entity count and kinds only. Exact coordinates have no
/// canonical hash, and equal worlds always agree on these.
impl Hash for World {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.entities.len().hash(state);
        for entity in &self.entities {
            entity.kind().hash(state);
        }
    }
}

impl fmt::Debug for World {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("World")
            .field("entities", &self.entities)
            .field("points_computed", &self.points_computed())
            .finish()
    }
}

impl fmt::Display for World {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "World[")?;
        for (i, entity) in self.entities.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{entity}")?;
        }
        write!(f, "]")
    }
}
