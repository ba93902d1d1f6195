//! Core types used throughout Meridian Studio
//!
//! This module contains the closed identifier enums for panels and fields,
//! and the tagged value sum that every edit and test payload flows through.
//! Identifiers are resolved from declarative names via lookup tables, never
//! by runtime class or reflection tricks.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

// ============================================================================
// PanelKind
// ============================================================================

/// The kind of detail panel a field configuration belongs to
///
/// One panel kind corresponds to one sub-form of a styling rule: the fill
/// of a polygon, the stroke of a line, the marker of a point symbolizer,
/// and so on. A `(PanelKind, FieldKey)` pair uniquely scopes one field
/// configuration instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PanelKind {
    /// Polygon/point fill properties
    Fill,
    /// Line/outline stroke properties
    Stroke,
    /// Point marker symbol properties
    Marker,
    /// External graphic symbol properties
    ExternalGraphic,
    /// Text label properties
    Label,
    /// Text halo properties
    Halo,
    /// Raster channel properties
    Raster,
}

impl PanelKind {
    /// All panel kinds in declaration order
    pub const ALL: [PanelKind; 7] = [
        PanelKind::Fill,
        PanelKind::Stroke,
        PanelKind::Marker,
        PanelKind::ExternalGraphic,
        PanelKind::Label,
        PanelKind::Halo,
        PanelKind::Raster,
    ];

    /// Get the declarative name for this panel kind
    pub fn as_str(&self) -> &'static str {
        match self {
            PanelKind::Fill => "fill",
            PanelKind::Stroke => "stroke",
            PanelKind::Marker => "marker",
            PanelKind::ExternalGraphic => "external_graphic",
            PanelKind::Label => "label",
            PanelKind::Halo => "halo",
            PanelKind::Raster => "raster",
        }
    }

    /// Get the display name for this panel kind
    pub fn display_name(&self) -> &'static str {
        match self {
            PanelKind::Fill => "Fill",
            PanelKind::Stroke => "Stroke",
            PanelKind::Marker => "Marker",
            PanelKind::ExternalGraphic => "External Graphic",
            PanelKind::Label => "Label",
            PanelKind::Halo => "Halo",
            PanelKind::Raster => "Raster",
        }
    }
}

impl fmt::Display for PanelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PanelKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PanelKind::ALL
            .iter()
            .find(|kind| kind.as_str() == s)
            .copied()
            .ok_or_else(|| format!("unknown panel kind: {s}"))
    }
}

// ============================================================================
// FieldKey
// ============================================================================

/// Identifies a specific editable style property within a panel scope
///
/// Field keys are a closed enumeration: the compiler enforces that every
/// key is handled wherever field kinds are matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKey {
    // Fill
    FillColour,
    FillOpacity,
    // Stroke
    StrokeColour,
    StrokeWidth,
    StrokeOpacity,
    // Marker
    SymbolType,
    Size,
    Rotation,
    ExternalGraphic,
    // Shared
    Opacity,
    GeometryField,
    Transformation,
    // Label
    Label,
    FontFamily,
    FontSize,
    // Halo
    HaloColour,
    HaloRadius,
    // Raster
    Gamma,
}

impl FieldKey {
    /// All field keys in declaration order
    pub const ALL: [FieldKey; 18] = [
        FieldKey::FillColour,
        FieldKey::FillOpacity,
        FieldKey::StrokeColour,
        FieldKey::StrokeWidth,
        FieldKey::StrokeOpacity,
        FieldKey::SymbolType,
        FieldKey::Size,
        FieldKey::Rotation,
        FieldKey::ExternalGraphic,
        FieldKey::Opacity,
        FieldKey::GeometryField,
        FieldKey::Transformation,
        FieldKey::Label,
        FieldKey::FontFamily,
        FieldKey::FontSize,
        FieldKey::HaloColour,
        FieldKey::HaloRadius,
        FieldKey::Gamma,
    ];

    /// Get the declarative name for this field key
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKey::FillColour => "fill_colour",
            FieldKey::FillOpacity => "fill_opacity",
            FieldKey::StrokeColour => "stroke_colour",
            FieldKey::StrokeWidth => "stroke_width",
            FieldKey::StrokeOpacity => "stroke_opacity",
            FieldKey::SymbolType => "symbol_type",
            FieldKey::Size => "size",
            FieldKey::Rotation => "rotation",
            FieldKey::ExternalGraphic => "external_graphic",
            FieldKey::Opacity => "opacity",
            FieldKey::GeometryField => "geometry_field",
            FieldKey::Transformation => "transformation",
            FieldKey::Label => "label",
            FieldKey::FontFamily => "font_family",
            FieldKey::FontSize => "font_size",
            FieldKey::HaloColour => "halo_colour",
            FieldKey::HaloRadius => "halo_radius",
            FieldKey::Gamma => "gamma",
        }
    }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for FieldKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FieldKey::ALL
            .iter()
            .find(|key| key.as_str() == s)
            .copied()
            .ok_or_else(|| format!("unknown field key: {s}"))
    }
}

// ============================================================================
// ValueType
// ============================================================================

/// The semantic value type a field configuration edits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueType {
    String,
    Integer,
    Double,
    Boolean,
    Colour,
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueType::String => "string",
            ValueType::Integer => "integer",
            ValueType::Double => "double",
            ValueType::Boolean => "boolean",
            ValueType::Colour => "colour",
        };
        write!(f, "{name}")
    }
}

// ============================================================================
// StyleValue
// ============================================================================

static COLOUR_PATTERN: LazyLock<regex::Regex> =
    LazyLock::new(|| regex::Regex::new(r"^#[0-9a-fA-F]{6}$").unwrap());

/// Check whether a string is a well-formed `#RRGGBB` colour literal
pub fn is_valid_colour(value: &str) -> bool {
    COLOUR_PATTERN.is_match(value)
}

/// A typed literal value flowing through edits, tests, and expressions
///
/// This is the closed sum over every payload kind a field can hold. All
/// population and comparison paths match it exhaustively, so adding a new
/// payload kind forces every consumer to handle it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum StyleValue {
    /// Plain text value
    String(String),
    /// Whole-number value
    Integer(i64),
    /// Floating-point value
    Double(f64),
    /// Boolean value
    Boolean(bool),
    /// Colour value in `#RRGGBB` form
    Colour(String),
}

impl StyleValue {
    /// Create a string value
    pub fn string(value: impl Into<String>) -> Self {
        StyleValue::String(value.into())
    }

    /// Create a colour value; fails when the literal is not `#RRGGBB`
    pub fn colour(value: impl Into<String>) -> Option<Self> {
        let value = value.into();
        is_valid_colour(&value).then_some(StyleValue::Colour(value))
    }

    /// Get the value type of this value
    pub fn value_type(&self) -> ValueType {
        match self {
            StyleValue::String(_) => ValueType::String,
            StyleValue::Integer(_) => ValueType::Integer,
            StyleValue::Double(_) => ValueType::Double,
            StyleValue::Boolean(_) => ValueType::Boolean,
            StyleValue::Colour(_) => ValueType::Colour,
        }
    }

    /// Render this value as the text a widget would display
    pub fn to_text(&self) -> String {
        match self {
            StyleValue::String(v) => v.clone(),
            StyleValue::Integer(v) => v.to_string(),
            StyleValue::Double(v) => v.to_string(),
            StyleValue::Boolean(v) => v.to_string(),
            StyleValue::Colour(v) => v.clone(),
        }
    }

    /// Parse a textual value into the given value type
    ///
    /// Returns `None` when the text does not convert; callers report the
    /// failure and leave their state unchanged.
    pub fn from_text(value_type: ValueType, text: &str) -> Option<Self> {
        match value_type {
            ValueType::String => Some(StyleValue::String(text.to_string())),
            ValueType::Integer => text.parse().ok().map(StyleValue::Integer),
            ValueType::Double => text.parse().ok().map(StyleValue::Double),
            ValueType::Boolean => text.parse().ok().map(StyleValue::Boolean),
            ValueType::Colour => StyleValue::colour(text),
        }
    }

    /// Get the numeric value, if this is an integer or double
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            StyleValue::Integer(v) => Some(*v as f64),
            StyleValue::Double(v) => Some(*v),
            _ => None,
        }
    }
}

impl fmt::Display for StyleValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_text())
    }
}

// ============================================================================
// Tests
// ============================================================================
