// Copyright 2025 the LogikSim Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Wire editing operations (spec.md §4.5).
//!
//! A wire's segment tree transitions insertion mode as a unit: every
//! segment in the tree shares the same [`ls_grid::DisplayState`], so the
//! collision query for a wire is the union of every segment's occupied
//! cells.

use super::is_registered;
use crate::error::{InvariantViolation, ViolationKind};
use crate::state_machine::{resolve_transition, TransitionOutcome};
use ls_grid::{DisplayState, Endpoints, Grid, InfoMessage, InsertionMode, OrderedLine, Point, Segment, SegmentIndex, SegmentPointType, TransitionHint, WireId};
use ls_index::collision::wire_cells;
use ls_index::LayoutIndex;
use ls_layout::Layout;

/// What happened to a wire after an insertion-mode transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModeOutcome {
    /// The wire's segments are still present, now in this display state.
    Present(DisplayState),
    /// The wire collided under [`InsertionMode::InsertOrDiscard`] and every
    /// segment (plus the wire itself) was deleted.
    Deleted,
}

/// Allocates a new, empty, uninserted wire.
#[must_use]
pub fn create(layout: &mut Layout) -> WireId {
    layout.create_wire()
}

/// Adds a segment to `wire_id`'s tree, returning its handle plus the
/// message to forward.
pub fn add_segment(layout: &mut Layout, wire_id: WireId, line: OrderedLine, endpoints: Endpoints) -> (Segment, Vec<InfoMessage>) {
    let (segment, created) = layout.add_wire_segment(wire_id, line, endpoints);
    (segment, vec![created])
}

/// Removes `segment` from its wire's tree.
pub fn remove_segment(layout: &mut Layout, segment: Segment) -> Vec<InfoMessage> {
    let (deleted, rename) = layout.remove_wire_segment(segment);
    let mut messages = vec![deleted];
    messages.extend(rename);
    messages
}

fn segment_lines(layout: &Layout, wire_id: WireId) -> Vec<OrderedLine> {
    (0..layout.wires().segment_count(wire_id))
        .map(|i| {
            let segment = Segment::new(wire_id, SegmentIndex::from_index(u32::try_from(i).unwrap()));
            layout.wires().geometry(segment).line
        })
        .collect()
}

/// Returns every segment handle currently in `wire_id`'s tree, in index order.
pub fn segments_of(layout: &Layout, wire_id: WireId) -> Vec<Segment> {
    (0..layout.wires().segment_count(wire_id))
        .map(|i| Segment::new(wire_id, SegmentIndex::from_index(u32::try_from(i).unwrap())))
        .collect()
}

/// Resolves a requested insertion-mode transition for every segment of
/// `wire_id`, mutating `layout` and returning the outcome plus the messages
/// to forward. A colliding [`InsertionMode::InsertOrDiscard`] transition
/// removes every segment and frees the wire id.
pub fn set_insertion_mode(layout: &mut Layout, index: &LayoutIndex, wire_id: WireId, mode: InsertionMode, hint: TransitionHint) -> (ModeOutcome, Vec<InfoMessage>) {
    let mut messages = Vec::new();
    if is_registered(layout.wires().wire_state(wire_id)) {
        messages.extend(layout.uninsert_wire(wire_id));
    }

    let lines = segment_lines(layout, wire_id);
    let outcome = resolve_transition(mode, hint, || lines.iter().any(|&line| index.is_colliding(wire_cells(line))));

    match outcome {
        TransitionOutcome::Delete => {
            messages.extend(delete_wire_unregistered(layout, wire_id));
            (ModeOutcome::Deleted, messages)
        }
        TransitionOutcome::SetState(state) => {
            if state != DisplayState::Temporary {
                messages.extend(layout.insert_wire(wire_id, state));
            }
            (ModeOutcome::Present(state), messages)
        }
    }
}

/// Removes every segment from `wire_id`'s tree and frees the wire id.
/// `wire_id` must already be uninserted; callers with a possibly-registered
/// wire must uninsert it first.
fn delete_wire_unregistered(layout: &mut Layout, wire_id: WireId) -> Vec<InfoMessage> {
    let mut messages = Vec::new();
    for i in (0..layout.wires().segment_count(wire_id)).rev() {
        let segment = Segment::new(wire_id, SegmentIndex::from_index(u32::try_from(i).unwrap()));
        let (deleted, rename) = layout.remove_wire_segment(segment);
        messages.push(deleted);
        messages.extend(rename);
    }
    layout.delete_wire(wire_id);
    messages
}

/// Translates every segment of `wire_id`'s tree by `(dx, dy)` in place,
/// without any liveness or display-state checks.
///
/// # Errors
///
/// Returns [`InvariantViolation`] if any resulting coordinate overflows the
/// representable grid range.
pub fn move_temporary_wire_unchecked(layout: &mut Layout, wire_id: WireId, dx: Grid, dy: Grid) -> Result<(), InvariantViolation> {
    for segment in segments_of(layout, wire_id) {
        let geometry = layout.wire_segment_geometry(segment);
        let translate = |p: Point| -> Option<Point> {
            Some(Point::new(p.x.checked_add(dx)?, p.y.checked_add(dy)?))
        };
        let overflowed = || InvariantViolation::non_representable(format!("segment {:?} of wire {wire_id} moved off the representable grid", segment.segment_index));
        let p0 = translate(geometry.line.p0).ok_or_else(overflowed)?;
        let p1 = translate(geometry.line.p1).ok_or_else(overflowed)?;
        let line = OrderedLine::new(p0, p1).ok_or_else(overflowed)?;
        layout.set_wire_segment_geometry(segment, line, geometry.endpoints);
    }
    Ok(())
}

/// Moves a still-[`DisplayState::Temporary`] wire by `(dx, dy)`, deleting it
/// instead if the resulting geometry is not representable on the grid.
///
/// # Errors
///
/// Returns [`InvariantViolation`] if `wire_id` is not live or is currently registered.
pub fn move_or_delete_temporary_wire(layout: &mut Layout, wire_id: WireId, dx: Grid, dy: Grid) -> Result<(ModeOutcome, Vec<InfoMessage>), InvariantViolation> {
    if !layout.is_wire_live(wire_id) {
        return Err(InvariantViolation::invalid_wire(wire_id));
    }
    if is_registered(layout.wires().wire_state(wire_id)) {
        return Err(InvariantViolation::new(
            ViolationKind::WrongDisplayState,
            format!("wire {wire_id} must be temporary before it can be moved"),
        ));
    }

    match move_temporary_wire_unchecked(layout, wire_id, dx, dy) {
        Ok(()) => Ok((ModeOutcome::Present(DisplayState::Temporary), Vec::new())),
        Err(_) => Ok((ModeOutcome::Deleted, delete_wire_unregistered(layout, wire_id))),
    }
}

/// Deletes a single segment from a still-temporary wire's tree.
///
/// # Errors
///
/// Returns [`InvariantViolation`] if `segment`'s wire is not live or is
/// currently registered.
pub fn delete_temporary_wire_segment(layout: &mut Layout, segment: Segment) -> Result<Vec<InfoMessage>, InvariantViolation> {
    let wire_id = segment.wire_id;
    if !layout.is_wire_live(wire_id) {
        return Err(InvariantViolation::invalid_wire(wire_id));
    }
    if is_registered(layout.wires().wire_state(wire_id)) {
        return Err(InvariantViolation::wrong_state_for_segment(segment, "wire must be temporary before a segment can be deleted"));
    }
    Ok(remove_segment(layout, segment))
}

fn try_merge_collinear(a: OrderedLine, b: OrderedLine) -> Option<OrderedLine> {
    if !a.collinear_with(b) {
        return None;
    }
    if a.p1 == b.p0 {
        return OrderedLine::new(a.p0, b.p1);
    }
    if b.p1 == a.p0 {
        return OrderedLine::new(b.p0, a.p1);
    }
    None
}

/// Merges every pair of collinear, end-to-end touching segments in
/// `wire_id`'s tree into single segments, then reclassifies every remaining
/// junction point. Used after a freehand drag may have left a temporary
/// wire's tree with redundant intermediate points.
pub fn regularize_temporary_selection(layout: &mut Layout, wire_id: WireId) -> Vec<InfoMessage> {
    let mut messages = Vec::new();

    loop {
        let segments = segments_of(layout, wire_id);
        let mut merged_one = false;
        'search: for (i, &a) in segments.iter().enumerate() {
            for &b in segments.iter().skip(i + 1) {
                let la = layout.wire_segment_geometry(a).line;
                let lb = layout.wire_segment_geometry(b).line;
                if let Some(merged_line) = try_merge_collinear(la, lb) {
                    let endpoints = layout.wire_segment_geometry(a).endpoints;
                    layout.set_wire_segment_geometry(a, merged_line, endpoints);
                    if let Ok(deleted) = delete_temporary_wire_segment(layout, b) {
                        messages.extend(deleted);
                    }
                    merged_one = true;
                    break 'search;
                }
            }
        }
        if !merged_one {
            break;
        }
    }

    let mut points = std::collections::HashSet::new();
    for segment in segments_of(layout, wire_id) {
        let line = layout.wire_segment_geometry(segment).line;
        points.insert(line.p0);
        points.insert(line.p1);
    }
    for point in points {
        messages.extend(fix_and_merge_segments(layout, wire_id, point));
    }
    messages
}

/// Splits the one segment of `wire_id`'s tree whose line strictly passes
/// through `point` (not already one of its endpoints) into two segments
/// meeting at `point`.
pub fn split_temporary_segments(layout: &mut Layout, wire_id: WireId, point: Point) -> Vec<InfoMessage> {
    for segment in segments_of(layout, wire_id) {
        let geometry = layout.wire_segment_geometry(segment);
        let line = geometry.line;
        if line.p0 == point || line.p1 == point || !line.contains_point(point) {
            continue;
        }
        let first = OrderedLine::new(line.p0, point).expect("split point lies on the segment's own axis");
        let second = OrderedLine::new(point, line.p1).expect("split point lies on the segment's own axis");
        layout.set_wire_segment_geometry(segment, first, geometry.endpoints);
        let (_, created) = layout.add_wire_segment(wire_id, second, geometry.endpoints);
        return vec![created];
    }
    Vec::new()
}

/// Reclassifies a junction point from the number of segment ends incident
/// to it (spec.md §4.5; tie-break decided in spec.md §12: three or more
/// incident ends always win out as a cross point over a corner).
#[must_use]
pub fn classify_junction(incident_ends: usize) -> SegmentPointType {
    match incident_ends {
        0 | 1 => SegmentPointType::ShadowPoint,
        2 => SegmentPointType::CornerPoint,
        _ => SegmentPointType::CrossPoint,
    }
}

fn find_other_wire_endpoint(layout: &Layout, wire_id: WireId, point: Point) -> Option<WireId> {
    layout.wires().wire_ids().filter(|&other| other != wire_id).find(|&other| {
        segments_of(layout, other)
            .into_iter()
            .any(|segment| {
                let line = layout.wire_segment_geometry(segment).line;
                line.p0 == point || line.p1 == point
            })
    })
}

/// Absorbs every segment of `other` into `primary`'s tree and reclassifies
/// the junction at `point`, freeing `other`'s wire id. Both wires are
/// uninserted for the duration and re-inserted afterwards if either one was
/// registered beforehand.
fn merge_wires_at_point(layout: &mut Layout, primary: WireId, other: WireId, point: Point) -> Vec<InfoMessage> {
    let primary_registered = is_registered(layout.wires().wire_state(primary));
    let other_registered = is_registered(layout.wires().wire_state(other));
    let mut messages = Vec::new();
    if primary_registered {
        messages.extend(layout.uninsert_wire(primary));
    }
    if other_registered {
        messages.extend(layout.uninsert_wire(other));
    }

    let geometries: Vec<(OrderedLine, Endpoints)> = segments_of(layout, other)
        .into_iter()
        .map(|segment| {
            let geometry = layout.wire_segment_geometry(segment);
            (geometry.line, geometry.endpoints)
        })
        .collect();

    messages.extend(delete_wire_unregistered(layout, other));

    for (line, endpoints) in geometries {
        let (_, created) = layout.add_wire_segment(primary, line, endpoints);
        messages.push(created);
    }

    if primary_registered || other_registered {
        messages.extend(layout.insert_wire(primary, DisplayState::Normal));
    }

    messages.extend(fix_and_merge_segments(layout, primary, point));
    messages
}

fn find_root(parent: &mut [usize], x: usize) -> usize {
    if parent[x] != x {
        parent[x] = find_root(parent, parent[x]);
    }
    parent[x]
}

fn union_roots(parent: &mut [usize], a: usize, b: usize) {
    let ra = find_root(parent, a);
    let rb = find_root(parent, b);
    if ra != rb {
        parent[ra] = rb;
    }
}

/// Splits `wire_id`'s tree at `point` into two independent wires if the
/// segments incident to `point` do not otherwise connect to each other,
/// reclassifying the junction on both halves afterwards. If every segment
/// is still reachable without passing through `point`, no split happens and
/// the junction is simply reclassified.
fn split_wire_at_crosspoint(layout: &mut Layout, wire_id: WireId, point: Point) -> Vec<InfoMessage> {
    let segments = segments_of(layout, wire_id);
    let n = segments.len();
    let mut parent: Vec<usize> = (0..n).collect();

    for i in 0..n {
        let li = layout.wire_segment_geometry(segments[i]).line;
        for j in (i + 1)..n {
            let lj = layout.wire_segment_geometry(segments[j]).line;
            let shares_other_end = [(li.p0, lj.p0), (li.p0, lj.p1), (li.p1, lj.p0), (li.p1, lj.p1)]
                .into_iter()
                .any(|(a, b)| a == b && a != point);
            // Two segments that both touch `point` and run collinear through it
            // are one straight wire passing through the junction, not a
            // branch of it, and stay together on the same side of the split.
            let passes_straight_through = li.collinear_with(lj) && (li.p0 == point || li.p1 == point) && (lj.p0 == point || lj.p1 == point);
            if shares_other_end || passes_straight_through {
                union_roots(&mut parent, i, j);
            }
        }
    }

    if n == 0 || (0..n).all(|i| find_root(&mut parent, i) == find_root(&mut parent, 0)) {
        return fix_and_merge_segments(layout, wire_id, point);
    }

    let root0 = find_root(&mut parent, 0);
    let mut other_groups: std::collections::HashMap<usize, Vec<usize>> = std::collections::HashMap::new();
    for i in 0..n {
        let root = find_root(&mut parent, i);
        if root != root0 {
            other_groups.entry(root).or_default().push(i);
        }
    }

    let primary_registered = is_registered(layout.wires().wire_state(wire_id));
    let mut messages = Vec::new();
    if primary_registered {
        messages.extend(layout.uninsert_wire(wire_id));
    }

    // Snapshot every other-component segment's geometry before any removal,
    // grouped by which new wire it will end up on.
    let grouped_geometries: Vec<Vec<(OrderedLine, Endpoints)>> = other_groups
        .values()
        .map(|indices| {
            indices
                .iter()
                .map(|&i| {
                    let geometry = layout.wire_segment_geometry(segments[i]);
                    (geometry.line, geometry.endpoints)
                })
                .collect()
        })
        .collect();

    // Remove every other-component segment from `wire_id` in one descending
    // pass, so swap-and-pop renaming never invalidates an index a later
    // removal in this same pass still needs.
    let mut all_other_indices: Vec<usize> = other_groups.values().flatten().copied().collect();
    all_other_indices.sort_unstable_by(|a, b| b.cmp(a));
    for i in all_other_indices {
        let (deleted, rename) = layout.remove_wire_segment(segments[i]);
        messages.push(deleted);
        messages.extend(rename);
    }

    let mut new_wires = Vec::new();
    for geometries in grouped_geometries {
        let new_wire = layout.create_wire();
        for (line, endpoints) in geometries {
            let (_, created) = layout.add_wire_segment(new_wire, line, endpoints);
            messages.push(created);
        }
        new_wires.push(new_wire);
    }

    if primary_registered {
        messages.extend(layout.insert_wire(wire_id, DisplayState::Normal));
        for &new_wire in &new_wires {
            messages.extend(layout.insert_wire(new_wire, DisplayState::Normal));
        }
    }

    messages.extend(fix_and_merge_segments(layout, wire_id, point));
    for new_wire in new_wires {
        messages.extend(fix_and_merge_segments(layout, new_wire, point));
    }
    messages
}

/// Toggles a cross point at one of `segment`'s endpoints (spec.md §4.5,
/// §12): if that endpoint is already a cross point, splits the tree there
/// into two independent wires; otherwise, if it coincides with another
/// wire's endpoint, merges the two wires into one tree. A no-op if neither
/// condition holds.
pub fn toggle_wire_crosspoint(layout: &mut Layout, segment: Segment) -> Vec<InfoMessage> {
    let wire_id = segment.wire_id;
    let geometry = layout.wire_segment_geometry(segment);
    let (p0_type, p1_type) = geometry.endpoints;

    if p0_type == SegmentPointType::CrossPoint {
        return split_wire_at_crosspoint(layout, wire_id, geometry.line.p0);
    }
    if p1_type == SegmentPointType::CrossPoint {
        return split_wire_at_crosspoint(layout, wire_id, geometry.line.p1);
    }
    if let Some(other) = find_other_wire_endpoint(layout, wire_id, geometry.line.p0) {
        return merge_wires_at_point(layout, wire_id, other, geometry.line.p0);
    }
    if let Some(other) = find_other_wire_endpoint(layout, wire_id, geometry.line.p1) {
        return merge_wires_at_point(layout, wire_id, other, geometry.line.p1);
    }
    Vec::new()
}

fn incident_ends(layout: &Layout, wire_id: WireId, point: Point) -> Vec<(Segment, bool)> {
    (0..layout.wires().segment_count(wire_id))
        .filter_map(|i| {
            let segment = Segment::new(wire_id, SegmentIndex::from_index(u32::try_from(i).unwrap()));
            let line = layout.wires().geometry(segment).line;
            if line.p0 == point {
                Some((segment, true))
            } else if line.p1 == point {
                Some((segment, false))
            } else {
                None
            }
        })
        .collect()
}

/// Reclassifies every segment endpoint of `wire_id` coincident with `point`,
/// applying [`classify_junction`]'s tie-break rule. Endpoints already
/// classified as [`SegmentPointType::Input`] / [`SegmentPointType::Output`]
/// are left alone, since a junction can only ever be a corner or a cross
/// point.
///
/// This implements the endpoint-classification half of the original
/// `fix_and_merge_segments` operation; it does not also split or merge
/// collinear segment geometry at `point` (see `DESIGN.md`).
pub fn fix_and_merge_segments(layout: &mut Layout, wire_id: WireId, point: Point) -> Vec<InfoMessage> {
    let ends = incident_ends(layout, wire_id, point);
    let junction = classify_junction(ends.len());
    let registered = is_registered(layout.wires().wire_state(wire_id));
    let mut messages = Vec::new();

    for (segment, is_p0) in ends {
        let geometry = layout.wires().geometry(segment);
        let (old_p0, old_p1) = geometry.endpoints;
        let old_this_end = if is_p0 { old_p0 } else { old_p1 };
        if matches!(old_this_end, SegmentPointType::Input | SegmentPointType::Output) || old_this_end == junction {
            continue;
        }
        let new_endpoints: Endpoints = if is_p0 { (junction, old_p1) } else { (old_p0, junction) };
        layout.set_wire_segment_endpoints(segment, new_endpoints);
        if registered {
            messages.push(InfoMessage::InsertedEndPointsUpdated {
                segment,
                new_endpoints,
                old_endpoints: geometry.endpoints,
            });
        }
    }
    messages
}

#[cfg(test)]
mod tests {
    use super::*;
    use ls_grid::Grid;

    fn line(x0: i16, y0: i16, x1: i16, y1: i16) -> OrderedLine {
        OrderedLine::new(Point::new(Grid::new(x0), Grid::new(y0)), Point::new(Grid::new(x1), Grid::new(y1))).unwrap()
    }

    #[test]
    fn insert_or_discard_without_collision_inserts_every_segment() {
        let mut layout = Layout::new();
        let index = LayoutIndex::new();
        let wire_id = create(&mut layout);
        let endpoints = (SegmentPointType::ShadowPoint, SegmentPointType::ShadowPoint);
        add_segment(&mut layout, wire_id, line(0, 0, 10, 0), endpoints);
        add_segment(&mut layout, wire_id, line(10, 0, 10, 10), endpoints);

        let (outcome, messages) = set_insertion_mode(&mut layout, &index, wire_id, InsertionMode::InsertOrDiscard, TransitionHint::None);
        assert_eq!(outcome, ModeOutcome::Present(DisplayState::Normal));
        assert_eq!(messages.len(), 2);
    }

    #[test]
    fn three_incident_ends_classify_as_cross_point() {
        assert_eq!(classify_junction(3), SegmentPointType::CrossPoint);
        assert_eq!(classify_junction(2), SegmentPointType::CornerPoint);
        assert_eq!(classify_junction(1), SegmentPointType::ShadowPoint);
    }

    #[test]
    fn fix_and_merge_reclassifies_a_t_junction_as_cross_point() {
        let mut layout = Layout::new();
        let wire_id = create(&mut layout);
        let endpoints = (SegmentPointType::ShadowPoint, SegmentPointType::ShadowPoint);
        add_segment(&mut layout, wire_id, line(0, 0, 10, 0), endpoints);
        add_segment(&mut layout, wire_id, line(10, 0, 20, 0), endpoints);
        add_segment(&mut layout, wire_id, line(10, 0, 10, 10), endpoints);

        fix_and_merge_segments(&mut layout, wire_id, Point::new(Grid::new(10), Grid::new(0)));

        let junction = Point::new(Grid::new(10), Grid::new(0));
        for i in 0..3 {
            let segment = Segment::new(wire_id, SegmentIndex::from_index(i));
            let geometry = layout.wires().geometry(segment);
            let classified = if geometry.line.p0 == junction {
                geometry.endpoints.0
            } else {
                geometry.endpoints.1
            };
            assert_eq!(classified, SegmentPointType::CrossPoint);
        }
    }

    #[test]
    fn toggle_crosspoint_merges_two_wires_sharing_an_endpoint() {
        let mut layout = Layout::new();
        let endpoints = (SegmentPointType::ShadowPoint, SegmentPointType::ShadowPoint);
        let wire_a = create(&mut layout);
        let (segment_a, _) = add_segment(&mut layout, wire_a, line(0, 0, 10, 0), endpoints);
        let wire_b = create(&mut layout);
        add_segment(&mut layout, wire_b, line(10, 0, 10, 10), endpoints);

        let messages = toggle_wire_crosspoint(&mut layout, segment_a);
        assert!(!messages.is_empty());
        assert!(!layout.is_wire_live(wire_b));
        assert_eq!(segments_of(&layout, wire_a).len(), 2);
    }

    #[test]
    fn toggle_crosspoint_splits_a_wire_at_an_unconnected_cross_point() {
        let mut layout = Layout::new();
        let wire_id = create(&mut layout);
        let endpoints = (SegmentPointType::ShadowPoint, SegmentPointType::ShadowPoint);
        add_segment(&mut layout, wire_id, line(0, 0, 10, 0), endpoints);
        add_segment(&mut layout, wire_id, line(10, 0, 20, 0), endpoints);
        let (crossing, _) = add_segment(&mut layout, wire_id, line(10, 0, 10, 10), endpoints);

        let junction = Point::new(Grid::new(10), Grid::new(0));
        fix_and_merge_segments(&mut layout, wire_id, junction);

        let messages = toggle_wire_crosspoint(&mut layout, crossing);
        assert!(!messages.is_empty());

        let remaining = segments_of(&layout, wire_id);
        assert_eq!(remaining.len(), 2);
        let other_wire = layout.wires().wire_ids().find(|&id| id != wire_id && layout.is_wire_live(id)).unwrap();
        assert_eq!(segments_of(&layout, other_wire).len(), 1);
    }

    #[test]
    fn toggle_crosspoint_is_a_no_op_without_a_neighbor() {
        let mut layout = Layout::new();
        let wire_id = create(&mut layout);
        let endpoints = (SegmentPointType::ShadowPoint, SegmentPointType::ShadowPoint);
        let (segment, _) = add_segment(&mut layout, wire_id, line(0, 0, 10, 0), endpoints);
        assert!(toggle_wire_crosspoint(&mut layout, segment).is_empty());
    }
}
