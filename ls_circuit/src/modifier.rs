// Copyright 2025 the LogikSim Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! [`Modifier`]: the public facade over a circuit's layout, index,
//! selections, and history (spec.md §4, §4.9).
//!
//! Every public method follows the same shape: open a history group, mutate
//! `Layout` through an `editing` function, forward every resulting message
//! to the index and every stored selection, record an undo entry for each
//! message, and log the whole thing at `target = "modifier"`. A method
//! either completes in full or returns an error before touching `layout` —
//! there is no partial-application case to unwind.

use crate::config::ModifierConfig;
use crate::editing::{decoration, logic_item, wire};
use crate::error::InvariantViolation;
use crate::history::{BuriedSegment, History, HistoryEntry};
use crate::validator;
use ls_grid::{
    DecorationId, DecorationKey, DecorationType, Endpoints, Grid, InfoMessage, InsertionMode, LogicItemDefinition, LogicItemId, LogicItemKey, Offset,
    OrderedLine, Orientation, Part, Point, Segment, SegmentKey, TransitionHint, WireId,
};
use ls_index::LayoutIndex;
use ls_layout::Layout;
use ls_selection::{SelectionGuard, SelectionId, SelectionStore};
use std::collections::HashMap;

/// The freshly pasted elements of one [`Modifier::paste_from_clipboard`] call.
#[derive(Clone, Debug, Default)]
pub struct PastedElements {
    /// Logic items that were successfully placed.
    pub logic_items: Vec<LogicItemId>,
    /// Decorations that were successfully placed.
    pub decorations: Vec<DecorationId>,
    /// Wires that were successfully placed.
    pub wires: Vec<WireId>,
}

impl PastedElements {
    /// Returns `true` if nothing was pasted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.logic_items.is_empty() && self.decorations.is_empty() && self.wires.is_empty()
    }
}

/// The editable circuit: layout, derived indices, selections, and undo
/// history, kept consistent as one unit.
pub struct Modifier {
    layout: Layout,
    index: LayoutIndex,
    selections: SelectionStore,
    history: History,
    config: ModifierConfig,
    recorded_messages: Vec<InfoMessage>,
}

impl Default for Modifier {
    fn default() -> Self {
        Self::with_config(ModifierConfig::default())
    }
}

impl Modifier {
    /// Constructs an empty circuit with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Constructs an empty circuit with an explicit configuration.
    #[must_use]
    pub fn with_config(config: ModifierConfig) -> Self {
        Self {
            layout: Layout::default(),
            index: LayoutIndex::new(),
            selections: SelectionStore::new(),
            history: History::new(),
            config,
            recorded_messages: Vec::new(),
        }
    }

    /// Read-only access to the layout.
    #[must_use]
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Read-only access to the derived spatial/collision/connection/key index.
    #[must_use]
    pub fn index(&self) -> &LayoutIndex {
        &self.index
    }

    /// Read-only access to the selection registry.
    #[must_use]
    pub fn selections(&self) -> &SelectionStore {
        &self.selections
    }

    /// Mutable access to the selection registry, for operations
    /// ([`ls_selection::SelectionGuard`] among them) that only need to read
    /// or mutate selection membership, not the layout.
    pub fn selections_mut(&mut self) -> &mut SelectionStore {
        &mut self.selections
    }

    /// The configuration this modifier was constructed with.
    #[must_use]
    pub fn config(&self) -> ModifierConfig {
        self.config
    }

    /// Every message dispatched so far, if [`ModifierConfig::store_messages`]
    /// is set. Always empty otherwise.
    #[must_use]
    pub fn recorded_messages(&self) -> &[InfoMessage] {
        &self.recorded_messages
    }

    /// Returns `true` if there is a group available to undo.
    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.config.enable_history && self.history.can_undo()
    }

    /// Returns `true` if there is a group available to redo.
    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.config.enable_history && self.history.can_redo()
    }

    fn history_new_group(&mut self) {
        if self.config.enable_history {
            self.history.new_group();
        }
    }

    fn history_push(&mut self, entry: HistoryEntry) {
        if self.config.enable_history {
            self.history.push(entry);
        }
    }

    fn history_bury_logic_item(&mut self, key: LogicItemKey, data: ls_grid::PlacedLogicItem) {
        if self.config.enable_history {
            self.history.bury_logic_item(key, data);
        }
    }

    fn history_bury_decoration(&mut self, key: DecorationKey, data: ls_grid::PlacedDecoration) {
        if self.config.enable_history {
            self.history.bury_decoration(key, data);
        }
    }

    fn history_bury_segment(&mut self, key: SegmentKey, data: BuriedSegment) {
        if self.config.enable_history {
            self.history.bury_segment(key, data);
        }
    }

    fn dispatch(&mut self, messages: &[InfoMessage]) {
        for message in messages {
            tracing::debug!(target: "modifier", ?message, "dispatching");
            self.index.submit(message);
            self.selections.submit(message);
            if self.config.store_messages {
                self.recorded_messages.push(message.clone());
            }
        }
        if self.config.validate_messages {
            if let Err(violation) = validator::validate(&self.layout, &self.index) {
                panic!("index desynchronized from layout: {violation}");
            }
        }
    }

    /// Adds a new, uninserted logic item.
    pub fn add_logic_item(&mut self, definition: LogicItemDefinition, position: Point, orientation: Orientation) -> LogicItemId {
        self.history_new_group();
        tracing::debug!(target: "modifier", ?position, ?orientation, "add_logic_item");
        let (id, messages) = logic_item::add(&mut self.layout, definition, position, orientation);
        self.dispatch(&messages);
        self.history_push(HistoryEntry::LogicItemCreated(self.layout.logic_items().key(id)));
        id
    }

    /// Transitions a logic item's insertion mode.
    ///
    /// # Errors
    ///
    /// Returns [`InvariantViolation`] if `id` is not live or its placement
    /// is not representable on the grid.
    pub fn set_logic_item_insertion_mode(
        &mut self,
        id: LogicItemId,
        mode: InsertionMode,
        hint: TransitionHint,
    ) -> Result<logic_item::ModeOutcome, InvariantViolation> {
        self.history_new_group();
        if id.index() >= self.layout.logic_items().len() {
            return Err(InvariantViolation::invalid_logic_item(id));
        }
        let key = self.layout.logic_items().key(id);
        let previous_data = self.layout.logic_items().get(id).clone();
        let (outcome, messages) = logic_item::set_insertion_mode(&mut self.layout, &self.index, id, mode, hint)?;
        tracing::debug!(target: "modifier", %id, ?mode, ?outcome, "set_logic_item_insertion_mode");
        if matches!(outcome, logic_item::ModeOutcome::Deleted) {
            self.history_bury_logic_item(key, previous_data);
            self.history_push(HistoryEntry::LogicItemDeleted(key));
        }
        self.dispatch(&messages);
        Ok(outcome)
    }

    /// Deletes a logic item outright. The item must already be uninserted.
    ///
    /// # Errors
    ///
    /// Returns [`InvariantViolation`] if `id` is not live or still registered.
    pub fn delete_logic_item(&mut self, id: LogicItemId) -> Result<(), InvariantViolation> {
        self.history_new_group();
        if id.index() >= self.layout.logic_items().len() {
            return Err(InvariantViolation::invalid_logic_item(id));
        }
        let key = self.layout.logic_items().key(id);
        let data = self.layout.logic_items().get(id).clone();
        let messages = logic_item::delete(&mut self.layout, id)?;
        tracing::debug!(target: "modifier", %id, "delete_logic_item");
        self.history_bury_logic_item(key, data);
        self.history_push(HistoryEntry::LogicItemDeleted(key));
        self.dispatch(&messages);
        Ok(())
    }

    /// Moves a still-temporary logic item by `(dx, dy)`, deleting it instead
    /// if the resulting position is not representable on the grid.
    ///
    /// # Errors
    ///
    /// Returns [`InvariantViolation`] if `id` is not live or is currently registered.
    pub fn move_or_delete_temporary_logicitem(&mut self, id: LogicItemId, dx: Grid, dy: Grid) -> Result<logic_item::ModeOutcome, InvariantViolation> {
        self.history_new_group();
        if id.index() >= self.layout.logic_items().len() {
            return Err(InvariantViolation::invalid_logic_item(id));
        }
        let key = self.layout.logic_items().key(id);
        let data = self.layout.logic_items().get(id).clone();
        let (outcome, messages) = logic_item::move_or_delete_temporary(&mut self.layout, id, dx, dy)?;
        tracing::debug!(target: "modifier", %id, ?dx, ?dy, ?outcome, "move_or_delete_temporary_logicitem");
        if matches!(outcome, logic_item::ModeOutcome::Deleted) {
            self.history_bury_logic_item(key, data);
            self.history_push(HistoryEntry::LogicItemDeleted(key));
        }
        self.dispatch(&messages);
        Ok(outcome)
    }

    /// Adds a new, uninserted decoration.
    pub fn add_decoration(&mut self, decoration_type: DecorationType, position: Point, width: u16, height: u16, text: String) -> DecorationId {
        self.history_new_group();
        let (id, messages) = decoration::add(&mut self.layout, decoration_type, position, width, height, text);
        tracing::debug!(target: "modifier", %id, "add_decoration");
        self.dispatch(&messages);
        self.history_push(HistoryEntry::DecorationCreated(self.layout.decorations().key(id)));
        id
    }

    /// Transitions a decoration's insertion mode.
    ///
    /// # Errors
    ///
    /// Returns [`InvariantViolation`] if `id` is not live.
    pub fn set_decoration_insertion_mode(&mut self, id: DecorationId, mode: InsertionMode) -> Result<decoration::ModeOutcome, InvariantViolation> {
        self.history_new_group();
        let (outcome, messages) = decoration::set_insertion_mode(&mut self.layout, id, mode)?;
        tracing::debug!(target: "modifier", %id, ?mode, ?outcome, "set_decoration_insertion_mode");
        self.dispatch(&messages);
        Ok(outcome)
    }

    /// Deletes a decoration outright. The decoration must already be uninserted.
    ///
    /// # Errors
    ///
    /// Returns [`InvariantViolation`] if `id` is not live or still registered.
    pub fn delete_decoration(&mut self, id: DecorationId) -> Result<(), InvariantViolation> {
        self.history_new_group();
        if id.index() >= self.layout.decorations().len() {
            return Err(InvariantViolation::invalid_decoration(id));
        }
        let key = self.layout.decorations().key(id);
        let data = self.layout.decorations().get(id).clone();
        let messages = decoration::delete(&mut self.layout, id)?;
        tracing::debug!(target: "modifier", %id, "delete_decoration");
        self.history_bury_decoration(key, data);
        self.history_push(HistoryEntry::DecorationDeleted(key));
        self.dispatch(&messages);
        Ok(())
    }

    /// Creates a new, empty wire.
    pub fn create_wire(&mut self) -> WireId {
        self.history_new_group();
        wire::create(&mut self.layout)
    }

    /// Adds a segment to `wire_id`'s tree.
    pub fn add_wire_segment(&mut self, wire_id: WireId, line: OrderedLine, endpoints: Endpoints) -> Segment {
        self.history_new_group();
        let (segment, messages) = wire::add_segment(&mut self.layout, wire_id, line, endpoints);
        let key = self.layout.wires().segment_key(segment);
        tracing::debug!(target: "modifier", ?segment, "add_wire_segment");
        self.dispatch(&messages);
        self.history_push(HistoryEntry::SegmentCreated(key));
        segment
    }

    /// Removes a segment from its wire's tree.
    pub fn remove_wire_segment(&mut self, segment: Segment) {
        self.history_new_group();
        let key = self.layout.wires().segment_key(segment);
        let geometry = self.layout.wires().geometry(segment);
        let messages = wire::remove_segment(&mut self.layout, segment);
        tracing::debug!(target: "modifier", ?segment, "remove_wire_segment");
        self.history_bury_segment(
            key,
            BuriedSegment {
                wire_id: segment.wire_id,
                line: geometry.line,
                endpoints: geometry.endpoints,
            },
        );
        self.history_push(HistoryEntry::SegmentDeleted(key));
        self.dispatch(&messages);
    }

    /// Transitions every segment of a wire's insertion mode as a unit.
    pub fn set_wire_insertion_mode(&mut self, wire_id: WireId, mode: InsertionMode, hint: TransitionHint) -> wire::ModeOutcome {
        self.history_new_group();
        let segment_snapshots: Vec<_> = wire::segments_of(&self.layout, wire_id)
            .into_iter()
            .map(|segment| {
                let geometry = self.layout.wires().geometry(segment);
                (
                    self.layout.wires().segment_key(segment),
                    BuriedSegment {
                        wire_id: segment.wire_id,
                        line: geometry.line,
                        endpoints: geometry.endpoints,
                    },
                )
            })
            .collect();

        let (outcome, messages) = wire::set_insertion_mode(&mut self.layout, &self.index, wire_id, mode, hint);
        tracing::debug!(target: "modifier", %wire_id, ?mode, ?outcome, "set_wire_insertion_mode");
        if matches!(outcome, wire::ModeOutcome::Deleted) {
            for (key, data) in segment_snapshots {
                self.history_bury_segment(key, data);
                self.history_push(HistoryEntry::SegmentDeleted(key));
            }
        }
        self.dispatch(&messages);
        outcome
    }

    /// Reclassifies every segment endpoint of `wire_id` coincident with
    /// `point`.
    pub fn fix_and_merge_segments(&mut self, wire_id: WireId, point: Point) {
        self.history_new_group();
        let messages = wire::fix_and_merge_segments(&mut self.layout, wire_id, point);
        tracing::debug!(target: "modifier", %wire_id, ?point, "fix_and_merge_segments");
        self.dispatch(&messages);
    }

    /// Moves every segment of a still-temporary wire by `(dx, dy)`, or
    /// deletes the wire outright if the resulting geometry is not
    /// representable on the grid.
    ///
    /// # Errors
    ///
    /// Returns [`InvariantViolation`] if `wire_id` is not live or is
    /// currently registered.
    pub fn move_or_delete_temporary_wire(&mut self, wire_id: WireId, dx: Grid, dy: Grid) -> Result<wire::ModeOutcome, InvariantViolation> {
        self.history_new_group();
        let (outcome, messages) = wire::move_or_delete_temporary_wire(&mut self.layout, wire_id, dx, dy)?;
        tracing::debug!(target: "modifier", %wire_id, ?dx, ?dy, ?outcome, "move_or_delete_temporary_wire");
        self.dispatch(&messages);
        Ok(outcome)
    }

    /// Deletes one segment of a still-temporary wire.
    ///
    /// # Errors
    ///
    /// Returns [`InvariantViolation`] if the segment's wire is not live or
    /// is currently registered.
    pub fn delete_temporary_wire_segment(&mut self, segment: Segment) -> Result<(), InvariantViolation> {
        self.history_new_group();
        let messages = wire::delete_temporary_wire_segment(&mut self.layout, segment)?;
        tracing::debug!(target: "modifier", ?segment, "delete_temporary_wire_segment");
        self.dispatch(&messages);
        Ok(())
    }

    /// Merges collinear-adjacent segments and reclassifies every junction of
    /// a still-temporary wire's selection, after a drag or a paste leaves it
    /// with redundant or overlapping pieces.
    pub fn regularize_temporary_selection(&mut self, wire_id: WireId) {
        self.history_new_group();
        let messages = wire::regularize_temporary_selection(&mut self.layout, wire_id);
        tracing::debug!(target: "modifier", %wire_id, "regularize_temporary_selection");
        self.dispatch(&messages);
    }

    /// Splits whichever segment of `wire_id` covers `point` into two
    /// segments meeting there, if `point` is a strict interior point of one
    /// of them.
    pub fn split_temporary_segments(&mut self, wire_id: WireId, point: Point) {
        self.history_new_group();
        let messages = wire::split_temporary_segments(&mut self.layout, wire_id, point);
        tracing::debug!(target: "modifier", %wire_id, ?point, "split_temporary_segments");
        self.dispatch(&messages);
    }

    /// Toggles a cross point at `segment`'s endpoint (spec.md §4.5, §12):
    /// merges `segment`'s wire with whatever other wire shares that
    /// endpoint, or, if the endpoint is already a cross point, splits the
    /// tree there into two independent wires.
    pub fn toggle_wire_crosspoint(&mut self, segment: Segment) {
        self.history_new_group();
        let messages = wire::toggle_wire_crosspoint(&mut self.layout, segment);
        tracing::debug!(target: "modifier", ?segment, "toggle_wire_crosspoint");
        self.dispatch(&messages);
    }

    /// Creates an empty, independent selection and returns its id.
    pub fn create_selection(&mut self) -> SelectionId {
        self.selections.create()
    }

    /// Destroys a selection.
    pub fn destroy_selection(&mut self, id: SelectionId) {
        self.selections.destroy(id);
    }

    /// Decodes `text` as a clipboard payload and ingests every element it
    /// holds, running each through the insertion-mode state machine the
    /// same way loading a file does. Returns `None` if the payload was
    /// empty. The freshly placed elements are staged in a scoped
    /// [`SelectionGuard`] for the duration of ingestion, so a paste that
    /// partially fails never leaves an orphaned selection behind; on
    /// success their membership is copied into the persistent selection
    /// returned alongside them.
    ///
    /// # Errors
    ///
    /// Returns [`ls_persist::LoadError`] if `text` is non-empty but not a
    /// valid clipboard payload.
    pub fn paste_from_clipboard(&mut self, text: &str) -> Result<Option<(PastedElements, SelectionId)>, ls_persist::LoadError> {
        self.history_new_group();
        let Some(source) = ls_persist::paste_from_clipboard(text)? else {
            return Ok(None);
        };

        let mut pasted = PastedElements::default();

        // Every placement below goes through the same `editing::` functions
        // the public wrappers use, but without calling the wrappers
        // themselves: each wrapper opens its own undo group, which would
        // fragment one paste into one group per element instead of the
        // single atomic group a paste (and its undo) is.
        for id in source.logic_items().ids() {
            if source.logic_items().state(id) != ls_grid::DisplayState::Normal {
                continue;
            }
            let placed = source.logic_items().get(id).clone();
            let (new_id, add_messages) = logic_item::add(&mut self.layout, placed.definition, placed.position, placed.orientation);
            self.dispatch(&add_messages);
            let key = self.layout.logic_items().key(new_id);
            self.history_push(HistoryEntry::LogicItemCreated(key));

            let data_before_transition = self.layout.logic_items().get(new_id).clone();
            if let Ok((outcome, messages)) =
                logic_item::set_insertion_mode(&mut self.layout, &self.index, new_id, InsertionMode::InsertOrDiscard, TransitionHint::ExpectValid)
            {
                self.dispatch(&messages);
                if matches!(outcome, logic_item::ModeOutcome::Deleted) {
                    self.history_bury_logic_item(key, data_before_transition);
                    self.history_push(HistoryEntry::LogicItemDeleted(key));
                } else {
                    pasted.logic_items.push(new_id);
                }
            }
        }

        for id in source.decorations().ids() {
            if source.decorations().state(id) != ls_grid::DisplayState::Normal {
                continue;
            }
            let placed = source.decorations().get(id).clone();
            let (new_id, add_messages) = decoration::add(&mut self.layout, placed.decoration_type, placed.position, placed.width, placed.height, placed.text);
            self.dispatch(&add_messages);
            let key = self.layout.decorations().key(new_id);
            self.history_push(HistoryEntry::DecorationCreated(key));

            if let Ok((outcome, messages)) = decoration::set_insertion_mode(&mut self.layout, new_id, InsertionMode::InsertOrDiscard) {
                self.dispatch(&messages);
                if matches!(outcome, decoration::ModeOutcome::Present(_)) {
                    pasted.decorations.push(new_id);
                }
            }
        }

        for wire_id in source.wires().wire_ids() {
            if source.wires().wire_state(wire_id) != ls_grid::DisplayState::Normal {
                continue;
            }
            let new_wire = wire::create(&mut self.layout);
            let mut segment_snapshots = Vec::new();
            for segment in wire::segments_of(&source, wire_id) {
                let geometry = source.wires().geometry(segment);
                let (new_segment, add_messages) = wire::add_segment(&mut self.layout, new_wire, geometry.line, geometry.endpoints);
                self.dispatch(&add_messages);
                let key = self.layout.wires().segment_key(new_segment);
                self.history_push(HistoryEntry::SegmentCreated(key));
                segment_snapshots.push((
                    key,
                    BuriedSegment {
                        wire_id: new_wire,
                        line: geometry.line,
                        endpoints: geometry.endpoints,
                    },
                ));
            }

            let (outcome, messages) = wire::set_insertion_mode(&mut self.layout, &self.index, new_wire, InsertionMode::InsertOrDiscard, TransitionHint::ExpectValid);
            self.dispatch(&messages);
            match outcome {
                wire::ModeOutcome::Present(_) => pasted.wires.push(new_wire),
                wire::ModeOutcome::Deleted => {
                    for (key, data) in segment_snapshots {
                        self.history_bury_segment(key, data);
                        self.history_push(HistoryEntry::SegmentDeleted(key));
                    }
                }
            }
        }

        let selection = self.create_selection();
        {
            let mut guard = SelectionGuard::new(&mut self.selections);
            for &id in &pasted.logic_items {
                guard.selection_mut().add_logic_item(id);
            }
            for &id in &pasted.decorations {
                guard.selection_mut().add_decoration(id);
            }
            for &wire_id in &pasted.wires {
                for segment in wire::segments_of(&self.layout, wire_id) {
                    let line = self.layout.wire_segment_geometry(segment).line;
                    guard.selection_mut().add_segment_part(segment, full_part(line));
                }
            }
            let staged = guard.selection().clone();
            drop(guard);
            if let Some(persistent) = self.selections.get_mut(selection) {
                *persistent = staged;
            }
        }

        Ok(Some((pasted, selection)))
    }

    /// Undoes the most recent group of changes, if any, by replaying the
    /// inverse of each of its entries against `layout`/`index`/`selections`.
    /// A no-op if there is nothing to undo.
    pub fn undo_group(&mut self) {
        if !self.config.enable_history {
            return;
        }
        let entries = self.history.pop_undo_group();
        let mut wire_remap: HashMap<WireId, WireId> = HashMap::new();
        for entry in entries.iter().rev() {
            match entry {
                HistoryEntry::NewGroup => {}
                HistoryEntry::LogicItemCreated(key) => self.replay_delete_logic_item(*key),
                HistoryEntry::LogicItemDeleted(key) => self.replay_recreate_logic_item(*key),
                HistoryEntry::DecorationCreated(key) => self.replay_delete_decoration(*key),
                HistoryEntry::DecorationDeleted(key) => self.replay_recreate_decoration(*key),
                HistoryEntry::SegmentCreated(key) => self.replay_delete_segment(*key),
                HistoryEntry::SegmentDeleted(key) => self.replay_recreate_segment(*key, &mut wire_remap),
            }
        }
    }

    /// Redoes the most recently undone group of changes, if any, by
    /// replaying each of its entries forward again. A no-op if there is
    /// nothing to redo.
    pub fn redo_group(&mut self) {
        if !self.config.enable_history {
            return;
        }
        let entries = self.history.pop_redo_group();
        let mut wire_remap: HashMap<WireId, WireId> = HashMap::new();
        for entry in entries.iter().rev() {
            match entry {
                HistoryEntry::NewGroup => {}
                HistoryEntry::LogicItemCreated(key) => self.replay_recreate_logic_item(*key),
                HistoryEntry::LogicItemDeleted(key) => self.replay_delete_logic_item(*key),
                HistoryEntry::DecorationCreated(key) => self.replay_recreate_decoration(*key),
                HistoryEntry::DecorationDeleted(key) => self.replay_delete_decoration(*key),
                HistoryEntry::SegmentCreated(key) => self.replay_recreate_segment(*key, &mut wire_remap),
                HistoryEntry::SegmentDeleted(key) => self.replay_delete_segment(*key),
            }
        }
    }

    fn replay_delete_logic_item(&mut self, key: LogicItemKey) {
        let Some(id) = self.index.keys().logic_item_id(key) else {
            return;
        };
        let mut messages = Vec::new();
        if crate::editing::is_registered(self.layout.logic_items().state(id)) {
            messages.push(self.layout.uninsert_logic_item(id));
        }
        let data = self.layout.logic_items().get(id).clone();
        self.history.bury_logic_item(key, data);
        let (deleted, rename) = self.layout.delete_logic_item(id);
        messages.push(deleted);
        messages.extend(rename);
        self.dispatch(&messages);
    }

    fn replay_recreate_logic_item(&mut self, key: LogicItemKey) {
        let Some(data) = self.history.exhume_logic_item(key).cloned() else {
            return;
        };
        let (_, created) = self.layout.recreate_logic_item(key, data);
        self.dispatch(&[created]);
    }

    fn replay_delete_decoration(&mut self, key: DecorationKey) {
        let Some(id) = self.index.keys().decoration_id(key) else {
            return;
        };
        let mut messages = Vec::new();
        if crate::editing::is_registered(self.layout.decorations().state(id)) {
            messages.push(self.layout.uninsert_decoration(id));
        }
        let data = self.layout.decorations().get(id).clone();
        self.history.bury_decoration(key, data);
        let (deleted, rename) = self.layout.delete_decoration(id);
        messages.push(deleted);
        messages.extend(rename);
        self.dispatch(&messages);
    }

    fn replay_recreate_decoration(&mut self, key: DecorationKey) {
        let Some(data) = self.history.exhume_decoration(key).cloned() else {
            return;
        };
        let (_, created) = self.layout.recreate_decoration(key, data);
        self.dispatch(&[created]);
    }

    fn replay_delete_segment(&mut self, key: SegmentKey) {
        let Some(segment) = self.index.keys().segment_id(key) else {
            return;
        };
        let geometry = self.layout.wire_segment_geometry(segment);
        self.history.bury_segment(
            key,
            BuriedSegment {
                wire_id: segment.wire_id,
                line: geometry.line,
                endpoints: geometry.endpoints,
            },
        );
        let (deleted, rename) = self.layout.remove_wire_segment(segment);
        let mut messages = vec![deleted];
        messages.extend(rename);
        self.dispatch(&messages);
    }

    /// Recreates a buried segment under `key`, resurrecting the wire it
    /// belonged to if that wire's id has since been freed. Callers within
    /// one `undo_group`/`redo_group` share `wire_remap` so segments that
    /// belonged to the same freed wire all land back on the same
    /// replacement wire, though the replacement is a fresh id rather than
    /// the original one if that id has since been reallocated elsewhere.
    fn replay_recreate_segment(&mut self, key: SegmentKey, wire_remap: &mut HashMap<WireId, WireId>) {
        let Some(data) = self.history.exhume_segment(key) else {
            return;
        };
        let wire_id = if self.layout.is_wire_live(data.wire_id) {
            data.wire_id
        } else if let Some(&remapped) = wire_remap.get(&data.wire_id) {
            remapped
        } else {
            let fresh = self.layout.create_wire();
            wire_remap.insert(data.wire_id, fresh);
            fresh
        };
        let (_, created) = self.layout.add_wire_segment_with_key(wire_id, key, data.line, data.endpoints);
        self.dispatch(&[created]);
    }
}

/// The [`Part`] spanning the full length of `line`, from its own length.
fn full_part(line: OrderedLine) -> Part {
    let len = u16::try_from(line.length()).expect("segment length exceeds offset range");
    Part::new(Offset::ZERO, Offset::new(len)).expect("non-empty segment has positive length")
}

#[cfg(test)]
mod tests {
    use super::*;
    use ls_grid::{ConnectionCount, DisplayState, InverterBits, LogicItemType, SegmentPointType};

    fn definition() -> LogicItemDefinition {
        LogicItemDefinition {
            logicitem_type: LogicItemType::Buffer,
            input_count: ConnectionCount::try_new(1).unwrap(),
            output_count: ConnectionCount::try_new(1).unwrap(),
            input_inverters: InverterBits::cleared(1),
            output_inverters: InverterBits::cleared(1),
            clock_attributes: None,
        }
    }

    #[test]
    fn add_insert_and_index_agree() {
        let mut modifier = Modifier::new();
        let id = modifier.add_logic_item(definition(), Point::new(Grid::ZERO, Grid::ZERO), Orientation::Right);

        let outcome = modifier
            .set_logic_item_insertion_mode(id, InsertionMode::InsertOrDiscard, TransitionHint::None)
            .unwrap();
        assert_eq!(outcome, logic_item::ModeOutcome::Present(DisplayState::Normal));
        assert!(modifier.index().has_element(1.0, 1.0));
        assert!(modifier.can_undo());
    }

    #[test]
    fn colliding_wire_is_discarded() {
        let mut modifier = Modifier::new();
        let first = modifier.create_wire();
        let endpoints = (SegmentPointType::ShadowPoint, SegmentPointType::ShadowPoint);
        modifier.add_wire_segment(first, OrderedLine::new(Point::new(Grid::ZERO, Grid::ZERO), Point::new(Grid::new(10), Grid::ZERO)).unwrap(), endpoints);
        modifier.set_wire_insertion_mode(first, InsertionMode::InsertOrDiscard, TransitionHint::None);

        let second = modifier.create_wire();
        modifier.add_wire_segment(second, OrderedLine::new(Point::new(Grid::new(5), Grid::ZERO), Point::new(Grid::new(15), Grid::ZERO)).unwrap(), endpoints);
        let outcome = modifier.set_wire_insertion_mode(second, InsertionMode::InsertOrDiscard, TransitionHint::None);
        assert_eq!(outcome, wire::ModeOutcome::Deleted);
    }

    #[test]
    fn undo_removes_a_freshly_added_logic_item() {
        let mut modifier = Modifier::new();
        let id = modifier.add_logic_item(definition(), Point::new(Grid::ZERO, Grid::ZERO), Orientation::Right);
        assert_eq!(modifier.layout().logic_items().len(), 1);

        modifier.undo_group();
        assert!(!modifier.can_undo());
        assert!(modifier.can_redo());
        assert!(modifier.index().keys().logic_item_key(id).is_none());
    }

    #[test]
    fn redo_restores_a_deleted_logic_item() {
        let mut modifier = Modifier::new();
        let id = modifier.add_logic_item(definition(), Point::new(Grid::ZERO, Grid::ZERO), Orientation::Right);
        modifier.delete_logic_item(id).unwrap();
        assert!(modifier.layout().logic_items().is_empty());

        modifier.undo_group();
        assert_eq!(modifier.layout().logic_items().len(), 1);

        modifier.undo_group();
        assert!(modifier.layout().logic_items().is_empty());
        assert!(modifier.can_redo());

        modifier.redo_group();
        assert_eq!(modifier.layout().logic_items().len(), 1);
        modifier.redo_group();
        assert!(modifier.layout().logic_items().is_empty());
    }

    #[test]
    fn undo_after_a_wire_delete_resurrects_its_segments() {
        let mut modifier = Modifier::new();
        let endpoints = (SegmentPointType::ShadowPoint, SegmentPointType::ShadowPoint);
        let wire_id = modifier.create_wire();
        let segment = modifier.add_wire_segment(wire_id, OrderedLine::new(Point::new(Grid::ZERO, Grid::ZERO), Point::new(Grid::new(10), Grid::ZERO)).unwrap(), endpoints);
        modifier.remove_wire_segment(segment);
        assert_eq!(modifier.layout().wires().segment_count(wire_id), 0);

        modifier.undo_group();
        assert_eq!(modifier.layout().wires().segment_count(wire_id), 1);
    }

    #[test]
    fn toggle_crosspoint_merges_two_wires() {
        let mut modifier = Modifier::new();
        let endpoints = (SegmentPointType::ShadowPoint, SegmentPointType::ShadowPoint);
        let first = modifier.create_wire();
        let segment = modifier.add_wire_segment(first, OrderedLine::new(Point::new(Grid::ZERO, Grid::ZERO), Point::new(Grid::new(10), Grid::ZERO)).unwrap(), endpoints);
        let second = modifier.create_wire();
        modifier.add_wire_segment(second, OrderedLine::new(Point::new(Grid::new(10), Grid::ZERO), Point::new(Grid::new(10), Grid::new(10))).unwrap(), endpoints);

        modifier.toggle_wire_crosspoint(segment);
        assert!(modifier.index().keys().segment_key(segment).is_some());
        assert!(!modifier.layout().is_wire_live(second));
        assert_eq!(wire::segments_of(modifier.layout(), first).len(), 2);
    }
}
