// Copyright 2025 the LogikSim Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The connection index: per-point logic item port registry (spec.md §4.2).
//!
//! Used to detect and realize input/output adjacency between wires and
//! logic items when a wire's endpoint is inserted: a wire's input endpoint
//! must coincide with a logic item output of compatible orientation
//! (spec.md §3.4 invariant 2).

use hashbrown::HashMap;
use ls_grid::{LogicItemId, Orientation, Point};

/// Whether a registered port is an input or an output.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ConnectionKind {
    /// A logic item input pin.
    Input,
    /// A logic item output pin.
    Output,
}

/// One logic item port registered at a grid point.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ConnectionEnd {
    /// The owning logic item.
    pub item: LogicItemId,
    /// Input or output.
    pub kind: ConnectionKind,
    /// The port's facing direction.
    pub orientation: Orientation,
}

/// Registry of logic item ports by grid point.
#[derive(Debug, Default)]
pub struct ConnectionIndex {
    by_point: HashMap<Point, Vec<ConnectionEnd>>,
}

impl ConnectionIndex {
    /// Constructs an empty connection index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a single port at `point`.
    pub fn register(&mut self, point: Point, end: ConnectionEnd) {
        self.by_point.entry(point).or_default().push(end);
    }

    /// Removes a single port previously registered at `point`.
    pub fn unregister(&mut self, point: Point, end: ConnectionEnd) {
        if let Some(ends) = self.by_point.get_mut(&point) {
            ends.retain(|e| *e != end);
            if ends.is_empty() {
                self.by_point.remove(&point);
            }
        }
    }

    /// Returns all ports registered at `point`.
    #[must_use]
    pub fn ports_at(&self, point: Point) -> &[ConnectionEnd] {
        self.by_point.get(&point).map_or(&[], Vec::as_slice)
    }

    /// Finds the output at `point` facing `required_orientation`'s opposite
    /// direction (the orientation a mating input must have), if any.
    ///
    /// A wire's input endpoint at `point` with orientation `wire_orientation`
    /// connects to a logic item output at the same point whose orientation
    /// is the opposite of the wire's (spec.md §3.4 invariant 2: "matching
    /// orientation/position").
    #[must_use]
    pub fn matching_output(&self, point: Point, wire_orientation: Orientation) -> Option<LogicItemId> {
        self.ports_at(point).iter().find_map(|end| {
            (end.kind == ConnectionKind::Output && end.orientation == wire_orientation.opposite())
                .then_some(end.item)
        })
    }

    /// Clears the registry.
    pub fn clear(&mut self) {
        self.by_point.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ls_grid::Grid;

    #[test]
    fn matching_output_requires_opposite_orientation() {
        let mut index = ConnectionIndex::new();
        let point = Point::new(Grid::new(0), Grid::new(0));
        let item = LogicItemId::from_index(0);
        index.register(
            point,
            ConnectionEnd {
                item,
                kind: ConnectionKind::Output,
                orientation: Orientation::Right,
            },
        );

        assert_eq!(index.matching_output(point, Orientation::Left), Some(item));
        assert_eq!(index.matching_output(point, Orientation::Right), None);
    }

    #[test]
    fn unregister_removes_empty_bucket() {
        let mut index = ConnectionIndex::new();
        let point = Point::new(Grid::new(0), Grid::new(0));
        let end = ConnectionEnd {
            item: LogicItemId::from_index(0),
            kind: ConnectionKind::Input,
            orientation: Orientation::Up,
        };
        index.register(point, end);
        index.unregister(point, end);
        assert!(index.ports_at(point).is_empty());
    }
}
