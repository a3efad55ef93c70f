// Copyright 2025 the LogikSim Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The `.ls2` circuit file format (spec.md §6): JSON serialized, gzip
//! compressed, then Base64 encoded. Only elements in
//! [`ls_grid::DisplayState::Normal`] are written, matching the original's
//! `serialize_inserted` (uninserted and colliding elements are editor-local
//! scratch state, not part of a saved circuit).

use crate::codec;
use crate::error::{LoadError, LoadErrorKind, SaveError};
use ls_grid::{
    ClockGeneratorAttributes, ConnectionCount, DecorationType, DisplayState, Grid, InverterBits, LogicItemDefinition, LogicItemType,
    OrderedLine, Orientation, Point, SegmentPointType,
};
use ls_layout::Layout;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Versions this crate can read (spec.md §6).
pub const SUPPORTED_VERSIONS: [u32; 2] = [100, 200];

/// The version written by [`save`].
pub const CURRENT_VERSION: u32 = 200;

/// View/camera state saved alongside a circuit.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ViewConfig {
    /// Horizontal pan offset.
    pub offset_x: f64,
    /// Vertical pan offset.
    pub offset_y: f64,
    /// Device pixel scale.
    pub device_scale: f64,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            offset_x: 0.0,
            offset_y: 0.0,
            device_scale: 1.0,
        }
    }
}

/// Simulation timing configuration saved alongside a circuit.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Nanoseconds of simulated time per second of wall-clock time.
    pub simulation_time_rate_ns: u64,
    /// Whether wire propagation delay is simulated.
    pub use_wire_delay: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            simulation_time_rate_ns: 1_000_000_000,
            use_wire_delay: true,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
struct PointDto {
    x: i16,
    y: i16,
}

impl From<Point> for PointDto {
    fn from(point: Point) -> Self {
        Self {
            x: point.x.value(),
            y: point.y.value(),
        }
    }
}

impl PointDto {
    fn into_point(self) -> Point {
        Point::new(Grid::new(self.x), Grid::new(self.y))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
enum OrientationDto {
    Right,
    Left,
    Up,
    Down,
    Undirected,
}

impl From<Orientation> for OrientationDto {
    fn from(orientation: Orientation) -> Self {
        match orientation {
            Orientation::Right => Self::Right,
            Orientation::Left => Self::Left,
            Orientation::Up => Self::Up,
            Orientation::Down => Self::Down,
            Orientation::Undirected => Self::Undirected,
        }
    }
}

impl From<OrientationDto> for Orientation {
    fn from(dto: OrientationDto) -> Self {
        match dto {
            OrientationDto::Right => Self::Right,
            OrientationDto::Left => Self::Left,
            OrientationDto::Up => Self::Up,
            OrientationDto::Down => Self::Down,
            OrientationDto::Undirected => Self::Undirected,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
enum LogicItemTypeDto {
    And,
    Or,
    Xor,
    Nand,
    Nor,
    Buffer,
    ClockGenerator,
    FlipFlopJk,
    FlipFlopD,
    LatchD,
    ShiftRegister,
    Button,
    Led,
    DisplayNumber,
    DisplayAscii,
}

impl From<LogicItemType> for LogicItemTypeDto {
    fn from(kind: LogicItemType) -> Self {
        match kind {
            LogicItemType::And => Self::And,
            LogicItemType::Or => Self::Or,
            LogicItemType::Xor => Self::Xor,
            LogicItemType::Nand => Self::Nand,
            LogicItemType::Nor => Self::Nor,
            LogicItemType::Buffer => Self::Buffer,
            LogicItemType::ClockGenerator => Self::ClockGenerator,
            LogicItemType::FlipFlopJk => Self::FlipFlopJk,
            LogicItemType::FlipFlopD => Self::FlipFlopD,
            LogicItemType::LatchD => Self::LatchD,
            LogicItemType::ShiftRegister => Self::ShiftRegister,
            LogicItemType::Button => Self::Button,
            LogicItemType::Led => Self::Led,
            LogicItemType::DisplayNumber => Self::DisplayNumber,
            LogicItemType::DisplayAscii => Self::DisplayAscii,
        }
    }
}

impl From<LogicItemTypeDto> for LogicItemType {
    fn from(dto: LogicItemTypeDto) -> Self {
        match dto {
            LogicItemTypeDto::And => Self::And,
            LogicItemTypeDto::Or => Self::Or,
            LogicItemTypeDto::Xor => Self::Xor,
            LogicItemTypeDto::Nand => Self::Nand,
            LogicItemTypeDto::Nor => Self::Nor,
            LogicItemTypeDto::Buffer => Self::Buffer,
            LogicItemTypeDto::ClockGenerator => Self::ClockGenerator,
            LogicItemTypeDto::FlipFlopJk => Self::FlipFlopJk,
            LogicItemTypeDto::FlipFlopD => Self::FlipFlopD,
            LogicItemTypeDto::LatchD => Self::LatchD,
            LogicItemTypeDto::ShiftRegister => Self::ShiftRegister,
            LogicItemTypeDto::Button => Self::Button,
            LogicItemTypeDto::Led => Self::Led,
            LogicItemTypeDto::DisplayNumber => Self::DisplayNumber,
            LogicItemTypeDto::DisplayAscii => Self::DisplayAscii,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
struct ClockAttributesDto {
    name: String,
    on_period_ns: u64,
    off_period_ns: u64,
    symmetric: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
struct LogicItemRecord {
    logicitem_type: LogicItemTypeDto,
    input_count: u8,
    output_count: u8,
    position: PointDto,
    orientation: OrientationDto,
    input_inverters: Vec<bool>,
    output_inverters: Vec<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    attrs: Option<ClockAttributesDto>,
}

impl LogicItemRecord {
    fn from_definition(definition: &LogicItemDefinition, position: Point, orientation: Orientation) -> Self {
        Self {
            logicitem_type: definition.logicitem_type.into(),
            input_count: definition.input_count.value(),
            output_count: definition.output_count.value(),
            position: position.into(),
            orientation: orientation.into(),
            input_inverters: definition.input_inverters.0.clone(),
            output_inverters: definition.output_inverters.0.clone(),
            attrs: definition.clock_attributes.as_ref().map(|attrs| ClockAttributesDto {
                name: attrs.name.clone(),
                on_period_ns: attrs.on_period_ns,
                off_period_ns: attrs.off_period_ns,
                symmetric: attrs.symmetric,
            }),
        }
    }

    fn into_definition(self) -> Result<(LogicItemDefinition, Point, Orientation), LoadError> {
        let input_count = ConnectionCount::try_new(self.input_count)
            .ok_or_else(|| LoadError::new(LoadErrorKind::JsonParse, format!("logic item input_count {} out of range", self.input_count)))?;
        let output_count = ConnectionCount::try_new(self.output_count)
            .ok_or_else(|| LoadError::new(LoadErrorKind::JsonParse, format!("logic item output_count {} out of range", self.output_count)))?;
        let definition = LogicItemDefinition {
            logicitem_type: self.logicitem_type.into(),
            input_count,
            output_count,
            input_inverters: InverterBits(self.input_inverters),
            output_inverters: InverterBits(self.output_inverters),
            clock_attributes: self.attrs.map(|attrs| ClockGeneratorAttributes {
                name: attrs.name,
                on_period_ns: attrs.on_period_ns,
                off_period_ns: attrs.off_period_ns,
                symmetric: attrs.symmetric,
            }),
        };
        Ok((definition, self.position.into_point(), self.orientation.into()))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
enum DecorationTypeDto {
    TextElement,
}

impl From<DecorationType> for DecorationTypeDto {
    fn from(kind: DecorationType) -> Self {
        match kind {
            DecorationType::TextElement => Self::TextElement,
        }
    }
}

impl From<DecorationTypeDto> for DecorationType {
    fn from(dto: DecorationTypeDto) -> Self {
        match dto {
            DecorationTypeDto::TextElement => Self::TextElement,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
struct DecorationRecord {
    decoration_type: DecorationTypeDto,
    position: PointDto,
    width: u16,
    height: u16,
    text: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
enum SegmentPointTypeDto {
    Input,
    Output,
    CornerPoint,
    CrossPoint,
    ShadowPoint,
    NewUnknown,
}

impl From<SegmentPointType> for SegmentPointTypeDto {
    fn from(kind: SegmentPointType) -> Self {
        match kind {
            SegmentPointType::Input => Self::Input,
            SegmentPointType::Output => Self::Output,
            SegmentPointType::CornerPoint => Self::CornerPoint,
            SegmentPointType::CrossPoint => Self::CrossPoint,
            SegmentPointType::ShadowPoint => Self::ShadowPoint,
            SegmentPointType::NewUnknown => Self::NewUnknown,
        }
    }
}

impl From<SegmentPointTypeDto> for SegmentPointType {
    fn from(dto: SegmentPointTypeDto) -> Self {
        match dto {
            SegmentPointTypeDto::Input => Self::Input,
            SegmentPointTypeDto::Output => Self::Output,
            SegmentPointTypeDto::CornerPoint => Self::CornerPoint,
            SegmentPointTypeDto::CrossPoint => Self::CrossPoint,
            SegmentPointTypeDto::ShadowPoint => Self::ShadowPoint,
            SegmentPointTypeDto::NewUnknown => Self::NewUnknown,
        }
    }
}

/// One wire segment. Segments sharing a `wire_id` belong to the same wire.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
struct WireSegmentRecord {
    wire_id: u32,
    p0: PointDto,
    p1: PointDto,
    p0_type: SegmentPointTypeDto,
    p1_type: SegmentPointTypeDto,
}

/// The element records shared by the `.ls2` file format and the clipboard
/// payload: every logic item, decoration, and wire segment in a given
/// [`DisplayState`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub(crate) struct Contents {
    logic_items: Vec<LogicItemRecord>,
    decorations: Vec<DecorationRecord>,
    wire_segments: Vec<WireSegmentRecord>,
}

impl Contents {
    /// Snapshots every element of `layout` in display state `state`.
    pub(crate) fn collect_from(layout: &Layout, state: DisplayState) -> Self {
        let logic_items = layout
            .logic_items()
            .ids()
            .filter(|&id| layout.logic_items().state(id) == state)
            .map(|id| {
                let placed = layout.logic_items().get(id);
                LogicItemRecord::from_definition(&placed.definition, placed.position, placed.orientation)
            })
            .collect();

        let decorations = layout
            .decorations()
            .ids()
            .filter(|&id| layout.decorations().state(id) == state)
            .map(|id| {
                let placed = layout.decorations().get(id);
                DecorationRecord {
                    decoration_type: placed.decoration_type.into(),
                    position: placed.position.into(),
                    width: placed.width,
                    height: placed.height,
                    text: placed.text.clone(),
                }
            })
            .collect();

        let wire_segments = layout
            .wires()
            .wire_ids()
            .filter(|&id| layout.wires().wire_state(id) == state)
            .flat_map(|wire_id| {
                layout.wires().segments(wire_id).map(move |segment| {
                    let geometry = layout.wires().geometry(segment);
                    WireSegmentRecord {
                        wire_id: u32::try_from(wire_id.index()).expect("wire id exceeds u32"),
                        p0: geometry.line.p0.into(),
                        p1: geometry.line.p1.into(),
                        p0_type: geometry.endpoints.0.into(),
                        p1_type: geometry.endpoints.1.into(),
                    }
                })
            })
            .collect();

        Self {
            logic_items,
            decorations,
            wire_segments,
        }
    }

    /// Snapshots exactly the named elements of `layout`, regardless of
    /// their current display state. Used by the clipboard, which copies a
    /// selection rather than every inserted element.
    pub(crate) fn collect_selected(layout: &Layout, logic_items: &[ls_grid::LogicItemId], decorations: &[ls_grid::DecorationId], wires: &[ls_grid::WireId]) -> Self {
        let logic_items = logic_items
            .iter()
            .map(|&id| {
                let placed = layout.logic_items().get(id);
                LogicItemRecord::from_definition(&placed.definition, placed.position, placed.orientation)
            })
            .collect();

        let decorations = decorations
            .iter()
            .map(|&id| {
                let placed = layout.decorations().get(id);
                DecorationRecord {
                    decoration_type: placed.decoration_type.into(),
                    position: placed.position.into(),
                    width: placed.width,
                    height: placed.height,
                    text: placed.text.clone(),
                }
            })
            .collect();

        let wire_segments = wires
            .iter()
            .flat_map(|&wire_id| {
                layout.wires().segments(wire_id).map(move |segment| {
                    let geometry = layout.wires().geometry(segment);
                    WireSegmentRecord {
                        wire_id: u32::try_from(wire_id.index()).expect("wire id exceeds u32"),
                        p0: geometry.line.p0.into(),
                        p1: geometry.line.p1.into(),
                        p0_type: geometry.endpoints.0.into(),
                        p1_type: geometry.endpoints.1.into(),
                    }
                })
            })
            .collect();

        Self {
            logic_items,
            decorations,
            wire_segments,
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.logic_items.is_empty() && self.decorations.is_empty() && self.wire_segments.is_empty()
    }

    /// Rebuilds a fresh [`Layout`] with every record inserted in display
    /// state `state`.
    pub(crate) fn build_layout(self, state: DisplayState) -> Result<Layout, LoadError> {
        let mut layout = Layout::new();

        for record in self.logic_items {
            let (definition, position, orientation) = record.into_definition()?;
            let (id, _created) = layout.add_logic_item(definition, position, orientation);
            if state != DisplayState::Temporary {
                let _ = layout.insert_logic_item(id, state);
            }
        }

        for record in self.decorations {
            let (id, _created) =
                layout.add_decoration(record.decoration_type.into(), record.position.into_point(), record.width, record.height, record.text);
            if state != DisplayState::Temporary {
                let _ = layout.insert_decoration(id);
            }
        }

        let mut wire_ids: std::collections::HashMap<u32, ls_grid::WireId> = std::collections::HashMap::new();
        for record in self.wire_segments {
            let wire_id = *wire_ids.entry(record.wire_id).or_insert_with(|| layout.create_wire());
            let line = OrderedLine::new(record.p0.into_point(), record.p1.into_point())
                .ok_or_else(|| LoadError::new(LoadErrorKind::JsonParse, "wire segment endpoints are not axis-aligned"))?;
            let endpoints = (record.p0_type.into(), record.p1_type.into());
            layout.add_wire_segment(wire_id, line, endpoints);
        }
        if state != DisplayState::Temporary {
            for &wire_id in wire_ids.values() {
                let _ = layout.insert_wire(wire_id, state);
            }
        }

        Ok(layout)
    }
}

/// The full contents of a `.ls2` circuit file (spec.md §6).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CircuitFile {
    version: u32,
    save_position: PointDto,
    view_config: ViewConfig,
    simulation_config: SimulationConfig,
    #[serde(flatten)]
    contents: Contents,
}

impl CircuitFile {
    /// Snapshots every [`DisplayState::Normal`] element of `layout` into a
    /// saveable record.
    #[must_use]
    pub fn from_layout(layout: &Layout, save_position: Point, view_config: ViewConfig, simulation_config: SimulationConfig) -> Self {
        Self {
            version: CURRENT_VERSION,
            save_position: save_position.into(),
            view_config,
            simulation_config,
            contents: Contents::collect_from(layout, DisplayState::Normal),
        }
    }

    /// Rebuilds a fresh [`Layout`] with every saved element inserted as
    /// [`DisplayState::Normal`], plus the saved view/simulation/cursor state.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError`] if the version is unsupported, or a record
    /// contains data the live types reject (e.g. an out-of-range connection
    /// count).
    pub fn into_layout(self) -> Result<(Layout, Point, ViewConfig, SimulationConfig), LoadError> {
        if !SUPPORTED_VERSIONS.contains(&self.version) {
            return Err(LoadError::new(
                LoadErrorKind::JsonVersion {
                    expected: SUPPORTED_VERSIONS.to_vec(),
                    actual: self.version,
                },
                "unsupported circuit file version",
            ));
        }

        let layout = self.contents.build_layout(DisplayState::Normal)?;
        Ok((layout, self.save_position.into_point(), self.view_config, self.simulation_config))
    }
}

/// Loads and decodes a `.ls2` file from `path`.
///
/// # Errors
///
/// Returns [`LoadError`] if the file cannot be opened, is empty, fails to
/// decompress, or does not parse as a circuit file of a supported version.
pub fn load(path: &Path) -> Result<(Layout, Point, ViewConfig, SimulationConfig), LoadError> {
    let bytes = fs::read(path).map_err(|err| LoadError::new(LoadErrorKind::FileOpen, format!("could not open {}: {err}", path.display())))?;
    if bytes.is_empty() {
        return Err(LoadError::new(LoadErrorKind::FileSize, format!("{} is empty", path.display())));
    }
    let payload = String::from_utf8(bytes).map_err(|_| LoadError::new(LoadErrorKind::Base64Decode, "file is not valid UTF-8"))?;
    let file: CircuitFile = codec::decode(&payload)?;
    tracing::info!(target: "persist", path = %path.display(), version = file.version, "loaded circuit file");
    file.into_layout()
}

/// Encodes `layout` and writes it to `path` as a `.ls2` file.
///
/// # Errors
///
/// Returns [`SaveError`] if the file cannot be written.
pub fn save(path: &Path, layout: &Layout, save_position: Point, view_config: ViewConfig, simulation_config: SimulationConfig) -> Result<(), SaveError> {
    let file = CircuitFile::from_layout(layout, save_position, view_config, simulation_config);
    let payload = codec::encode(&file);
    fs::write(path, payload).map_err(|err| {
        tracing::warn!(target: "persist", path = %path.display(), error = %err, "failed to save circuit file");
        SaveError::new(format!("could not write {}: {err}", path.display()))
    })?;
    tracing::info!(target: "persist", path = %path.display(), "saved circuit file");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ls_grid::{ConnectionCount, Grid, InverterBits, LogicItemType, SegmentPointType};
    use tempfile::tempdir;

    fn button() -> LogicItemDefinition {
        LogicItemDefinition {
            logicitem_type: LogicItemType::Button,
            input_count: ConnectionCount::try_new(0).unwrap(),
            output_count: ConnectionCount::try_new(1).unwrap(),
            input_inverters: InverterBits::cleared(0),
            output_inverters: InverterBits::cleared(1),
            clock_attributes: None,
        }
    }

    fn sample_layout() -> Layout {
        let mut layout = Layout::new();
        let (id, _) = layout.add_logic_item(button(), Point::new(Grid::ZERO, Grid::ZERO), Orientation::Right);
        layout.insert_logic_item(id, DisplayState::Normal);

        let wire_id = layout.create_wire();
        let line = OrderedLine::new(Point::new(Grid::ZERO, Grid::ZERO), Point::new(Grid::new(5), Grid::ZERO)).unwrap();
        layout.add_wire_segment(wire_id, line, (SegmentPointType::Output, SegmentPointType::Input));
        layout.insert_wire(wire_id, DisplayState::Normal);

        layout
    }

    #[test]
    fn round_trips_through_the_ls2_container() {
        let layout = sample_layout();
        let file = CircuitFile::from_layout(&layout, Point::new(Grid::new(3), Grid::new(4)), ViewConfig::default(), SimulationConfig::default());
        let payload = codec::encode(&file);

        let decoded: CircuitFile = codec::decode(&payload).unwrap();
        let (rebuilt, position, _, _) = decoded.into_layout().unwrap();

        assert_eq!(position, Point::new(Grid::new(3), Grid::new(4)));
        assert_eq!(rebuilt.logic_items().len(), 1);
        assert_eq!(rebuilt.wires().wire_ids().count(), 1);
    }

    #[test]
    fn save_then_load_round_trips_to_disk() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("circuit.ls2");
        let layout = sample_layout();

        save(&path, &layout, Point::new(Grid::ZERO, Grid::ZERO), ViewConfig::default(), SimulationConfig::default()).unwrap();
        let (rebuilt, _, _, _) = load(&path).unwrap();

        assert_eq!(rebuilt.logic_items().len(), 1);
        assert_eq!(rebuilt.wires().segments(rebuilt.wires().wire_ids().next().unwrap()).count(), 1);
    }

    #[test]
    fn unknown_version_produces_json_version_error() {
        let mut file = CircuitFile::from_layout(&Layout::new(), Point::new(Grid::ZERO, Grid::ZERO), ViewConfig::default(), SimulationConfig::default());
        file.version = 1;

        let err = file.into_layout().unwrap_err();
        assert_eq!(
            *err.kind(),
            LoadErrorKind::JsonVersion {
                expected: SUPPORTED_VERSIONS.to_vec(),
                actual: 1
            }
        );
    }

    #[test]
    fn missing_file_is_a_file_open_error() {
        let err = load(Path::new("__does_not_exist__.ls2")).unwrap_err();
        assert_eq!(*err.kind(), LoadErrorKind::FileOpen);
    }
}
