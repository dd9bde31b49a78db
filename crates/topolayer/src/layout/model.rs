//! Intermediate state passed between pipeline stages.

use std::collections::BTreeMap;

use topolayer_core::{
    geometry::{Bounds, Point, Size},
    identifier::Id,
};

/// Node ids of every rank, ascending by rank. Ids within a rank are ascending.
pub type RankGroups = BTreeMap<usize, Vec<Id>>;

/// Final rank of every node.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ranking {
    ranks: BTreeMap<Id, usize>,
}

impl Ranking {
    pub fn new(ranks: BTreeMap<Id, usize>) -> Self {
        Self { ranks }
    }

    pub fn rank(&self, id: &str) -> Option<usize> {
        self.ranks.get(id).copied()
    }

    /// Returns the node ids sorted by `(rank, id)`.
    pub fn ordered(&self) -> Vec<&Id> {
        let mut ids: Vec<&Id> = self.ranks.keys().collect();
        ids.sort_by_key(|id| (self.ranks[*id], *id));
        ids
    }

    /// Groups the node ids by rank.
    pub fn groups(&self) -> RankGroups {
        let mut groups = RankGroups::new();
        for (id, rank) in &self.ranks {
            groups.entry(*rank).or_default().push(id.clone());
        }
        groups
    }

    pub fn max_rank(&self) -> Option<usize> {
        self.ranks.values().copied().max()
    }

    /// Iterates `(id, rank)` in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = (&Id, usize)> {
        self.ranks.iter().map(|(id, rank)| (id, *rank))
    }

    pub fn len(&self) -> usize {
        self.ranks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranks.is_empty()
    }
}

/// Top-left position of every node box.
///
/// Each pipeline stage takes the positions by value and hands them on.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Positions(BTreeMap<Id, Point>);

impl Positions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &str) -> Option<Point> {
        self.0.get(id).copied()
    }

    pub fn insert(&mut self, id: Id, position: Point) -> Option<Point> {
        self.0.insert(id, position)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.0.contains_key(id)
    }

    /// Replaces the position of `id` with `f(position)`. Unknown ids are ignored.
    pub fn update(&mut self, id: &str, f: impl FnOnce(Point) -> Point) {
        if let Some(position) = self.0.get_mut(id) {
            *position = f(*position);
        }
    }

    /// Iterates `(id, position)` in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = (&Id, Point)> {
        self.0.iter().map(|(id, position)| (id, *position))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the box enclosing all top-left positions.
    pub fn extent(&self) -> Option<Bounds> {
        Bounds::enclosing(self.0.values().copied())
    }

    /// Translates all positions so the minimum x and the minimum y equal `margin`.
    pub fn normalized(mut self, margin: f32) -> Self {
        if let Some(extent) = self.extent() {
            let offset = Point::new(margin - extent.min_x(), margin - extent.min_y());
            for position in self.0.values_mut() {
                *position = position.add_point(offset);
            }
        }
        self
    }

    /// Canvas size: the extent of all positions plus `border` on each side.
    pub fn canvas_size(&self, border: f32) -> Size {
        let (width, height) = self
            .extent()
            .map(|extent| (extent.width(), extent.height()))
            .unwrap_or_default();
        Size::new(width + 2.0 * border, height + 2.0 * border)
    }
}

impl FromIterator<(Id, Point)> for Positions {
    fn from_iter<I: IntoIterator<Item = (Id, Point)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
