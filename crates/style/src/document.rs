//! Styled document model
//!
//! A styled document is the tree the editor's navigation pane shows:
//! layers, each with styles, each with feature-type styles, each with
//! rules, each with symbolizers. Every symbolizer carries its styling
//! properties as expression trees keyed by field.
//!
//! The document is the only place field values persist; panel state is
//! rebuilt from it on every selection change.

use crate::expression::Expression;
use chrono::{DateTime, Utc};
use meridian_core::{FieldKey, Named, PanelKind, StudioError, StudioResult, Validatable};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use uuid::Uuid;

// ============================================================================
// DocumentMeta
// ============================================================================

/// Document metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentMeta {
    /// Document name
    pub name: String,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last modification timestamp
    pub modified_at: DateTime<Utc>,
}

impl DocumentMeta {
    /// Create new metadata with the given name
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            name: name.into(),
            created_at: now,
            modified_at: now,
        }
    }
}

// ============================================================================
// StyledDocument
// ============================================================================

/// Root container for a symbology document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StyledDocument {
    /// Document metadata
    pub meta: DocumentMeta,

    /// Map layers in draw order
    pub layers: Vec<StyledLayer>,

    /// Schema version for migration purposes
    pub schema_version: u32,
}

impl StyledDocument {
    /// Create a new empty document with the given name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            meta: DocumentMeta::new(name),
            layers: Vec::new(),
            schema_version: crate::SCHEMA_VERSION,
        }
    }

    /// Add a layer and return a mutable reference to it
    pub fn add_layer(&mut self, name: impl Into<String>) -> &mut StyledLayer {
        self.layers.push(StyledLayer::new(name));
        self.touch();
        self.layers.last_mut().unwrap()
    }

    /// Update the modification timestamp
    pub fn touch(&mut self) {
        self.meta.modified_at = Utc::now();
    }

    /// Resolve a node path to the symbolizer it addresses
    pub fn symbolizer(&self, path: &NodePath) -> StudioResult<&Symbolizer> {
        self.layers
            .get(path.layer)
            .and_then(|layer| layer.styles.get(path.style))
            .and_then(|style| style.feature_type_styles.get(path.feature_type_style))
            .and_then(|fts| fts.rules.get(path.rule))
            .and_then(|rule| rule.symbolizers.get(path.symbolizer))
            .ok_or_else(|| StudioError::PathNotFound(path.to_string()))
    }

    /// Resolve a node path to a mutable symbolizer
    pub fn symbolizer_mut(&mut self, path: &NodePath) -> StudioResult<&mut Symbolizer> {
        self.layers
            .get_mut(path.layer)
            .and_then(|layer| layer.styles.get_mut(path.style))
            .and_then(|style| style.feature_type_styles.get_mut(path.feature_type_style))
            .and_then(|fts| fts.rules.get_mut(path.rule))
            .and_then(|rule| rule.symbolizers.get_mut(path.symbolizer))
            .ok_or_else(|| StudioError::PathNotFound(path.to_string()))
    }

    /// Resolve the detail panel kind a node path addresses
    pub fn panel_kind(&self, path: &NodePath) -> StudioResult<PanelKind> {
        let symbolizer = self.symbolizer(path)?;
        symbolizer
            .kind
            .detail_panels()
            .get(path.detail)
            .copied()
            .ok_or_else(|| StudioError::PathNotFound(path.to_string()))
    }
}

impl Validatable for StyledDocument {
    fn validate(&self) -> StudioResult<()> {
        if self.meta.name.is_empty() {
            return Err(StudioError::validation("Document name cannot be empty"));
        }
        for layer in &self.layers {
            if layer.name.is_empty() {
                return Err(StudioError::validation("Layer name cannot be empty"));
            }
        }
        Ok(())
    }
}

// ============================================================================
// StyledLayer / Style / FeatureTypeStyle / Rule
// ============================================================================

/// A map layer holding one or more styles
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StyledLayer {
    /// Unique identifier
    pub id: Uuid,

    /// Layer name
    pub name: String,

    /// Styles attached to this layer
    pub styles: Vec<Style>,
}

impl StyledLayer {
    /// Create a new empty layer
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            styles: Vec::new(),
        }
    }

    /// Add a style and return a mutable reference to it
    pub fn add_style(&mut self, name: impl Into<String>) -> &mut Style {
        self.styles.push(Style::new(name));
        self.styles.last_mut().unwrap()
    }
}

impl Named for StyledLayer {
    fn name(&self) -> &str {
        &self.name
    }

    fn set_name(&mut self, name: String) {
        self.name = name;
    }
}

/// A named style holding feature-type styles
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Style {
    /// Unique identifier
    pub id: Uuid,

    /// Style name
    pub name: String,

    /// Feature-type styles in evaluation order
    pub feature_type_styles: Vec<FeatureTypeStyle>,
}

impl Style {
    /// Create a new empty style
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            feature_type_styles: Vec::new(),
        }
    }

    /// Add a feature-type style and return a mutable reference to it
    pub fn add_feature_type_style(&mut self, name: impl Into<String>) -> &mut FeatureTypeStyle {
        self.feature_type_styles.push(FeatureTypeStyle::new(name));
        self.feature_type_styles.last_mut().unwrap()
    }
}

/// A feature-type style holding rules
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureTypeStyle {
    /// Unique identifier
    pub id: Uuid,

    /// Feature-type style name
    pub name: String,

    /// Rules in evaluation order
    pub rules: Vec<Rule>,
}

impl FeatureTypeStyle {
    /// Create a new empty feature-type style
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            rules: Vec::new(),
        }
    }

    /// Add a rule and return a mutable reference to it
    pub fn add_rule(&mut self, name: impl Into<String>) -> &mut Rule {
        self.rules.push(Rule::new(name));
        self.rules.last_mut().unwrap()
    }
}

/// A styling rule: an optional predicate plus symbolizers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rule {
    /// Unique identifier
    pub id: Uuid,

    /// Rule name
    pub name: String,

    /// Optional rule predicate as a function expression
    pub filter: Option<Expression>,

    /// Symbolizers applied when the rule matches
    pub symbolizers: Vec<Symbolizer>,
}

impl Rule {
    /// Create a new empty rule
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            filter: None,
            symbolizers: Vec::new(),
        }
    }

    /// Set the rule predicate
    pub fn with_filter(mut self, filter: Expression) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Add a symbolizer and return a mutable reference to it
    pub fn add_symbolizer(&mut self, kind: SymbolizerKind) -> &mut Symbolizer {
        self.symbolizers.push(Symbolizer::new(kind));
        self.symbolizers.last_mut().unwrap()
    }
}

// ============================================================================
// Symbolizer
// ============================================================================

/// The kind of a symbolizer within a rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SymbolizerKind {
    Point,
    Line,
    Polygon,
    Text,
    Raster,
}

impl SymbolizerKind {
    /// The detail panels this symbolizer kind exposes, in tab order
    pub fn detail_panels(&self) -> &'static [PanelKind] {
        match self {
            SymbolizerKind::Point => &[PanelKind::Marker],
            SymbolizerKind::Line => &[PanelKind::Stroke],
            SymbolizerKind::Polygon => &[PanelKind::Fill, PanelKind::Stroke],
            SymbolizerKind::Text => &[PanelKind::Label, PanelKind::Halo],
            SymbolizerKind::Raster => &[PanelKind::Raster],
        }
    }
}

impl fmt::Display for SymbolizerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SymbolizerKind::Point => "point",
            SymbolizerKind::Line => "line",
            SymbolizerKind::Polygon => "polygon",
            SymbolizerKind::Text => "text",
            SymbolizerKind::Raster => "raster",
        };
        write!(f, "{name}")
    }
}

/// One symbolizer with its styling properties as expression trees
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Symbolizer {
    /// Unique identifier
    pub id: Uuid,

    /// Symbolizer kind
    pub kind: SymbolizerKind,

    /// Styling properties keyed by field
    pub properties: BTreeMap<FieldKey, Expression>,
}

impl Symbolizer {
    /// Create a new symbolizer with no properties
    pub fn new(kind: SymbolizerKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            properties: BTreeMap::new(),
        }
    }

    /// Set a property expression
    pub fn set_property(&mut self, key: FieldKey, expression: Expression) {
        self.properties.insert(key, expression);
    }

    /// Remove a property expression
    pub fn clear_property(&mut self, key: FieldKey) -> Option<Expression> {
        self.properties.remove(&key)
    }

    /// Get a property expression
    pub fn property(&self, key: FieldKey) -> Option<&Expression> {
        self.properties.get(&key)
    }

    /// Check whether any of the given fields carries a property
    pub fn has_any_property(&self, keys: &[FieldKey]) -> bool {
        keys.iter().any(|key| self.properties.contains_key(key))
    }
}

// ============================================================================
// NodePath
// ============================================================================

/// An ordered path of indices selecting one symbolizer detail panel
///
/// The path mirrors the navigation tree: layer, style, feature-type style,
/// rule, symbolizer, and finally the detail tab within the symbolizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodePath {
    pub layer: usize,
    pub style: usize,
    pub feature_type_style: usize,
    pub rule: usize,
    pub symbolizer: usize,
    pub detail: usize,
}

impl NodePath {
    /// Create a new node path
    pub fn new(
        layer: usize,
        style: usize,
        feature_type_style: usize,
        rule: usize,
        symbolizer: usize,
        detail: usize,
    ) -> Self {
        Self {
            layer,
            style,
            feature_type_style,
            rule,
            symbolizer,
            detail,
        }
    }

    /// Path to the first detail of the first symbolizer of the document
    pub fn first() -> Self {
        Self::new(0, 0, 0, 0, 0, 0)
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}/{}/{}/{}:{}",
            self.layer, self.style, self.feature_type_style, self.rule, self.symbolizer,
            self.detail
        )
    }
}

// ============================================================================
// Tests
// ============================================================================
