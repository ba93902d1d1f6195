//! Sample document factory
//!
//! Builds small in-memory styled documents for the declarative test harness
//! and for integration tests, without touching any persistence format. The
//! shapes mirror the classic cookbook examples: a simple point marker, a
//! dashed line, a filled polygon with an outline, and a labelled layer.

use crate::document::{StyledDocument, SymbolizerKind};
use crate::expression::Expression;
use meridian_core::{FieldKey, StyleValue};

/// Build a single-layer point document with a circle marker
pub fn point_document() -> StyledDocument {
    let mut document = StyledDocument::new("Simple Point");
    let rule = document
        .add_layer("poi")
        .add_style("default")
        .add_feature_type_style("fts")
        .add_rule("all points");
    let symbolizer = rule.add_symbolizer(SymbolizerKind::Point);
    symbolizer.set_property(FieldKey::SymbolType, Expression::literal_string("circle"));
    symbolizer.set_property(
        FieldKey::Size,
        Expression::literal(StyleValue::Double(6.0)),
    );
    symbolizer.set_property(
        FieldKey::FillColour,
        Expression::literal(StyleValue::Colour("#FF0000".to_string())),
    );
    document
}

/// Build a single-layer line document with a plain stroke
pub fn line_document() -> StyledDocument {
    let mut document = StyledDocument::new("Simple Line");
    let rule = document
        .add_layer("roads")
        .add_style("default")
        .add_feature_type_style("fts")
        .add_rule("all roads");
    let symbolizer = rule.add_symbolizer(SymbolizerKind::Line);
    symbolizer.set_property(
        FieldKey::StrokeColour,
        Expression::literal(StyleValue::Colour("#0000FF".to_string())),
    );
    symbolizer.set_property(
        FieldKey::StrokeWidth,
        Expression::literal(StyleValue::Double(3.0)),
    );
    document
}

/// Build a single-layer polygon document with fill and outline
pub fn polygon_document() -> StyledDocument {
    let mut document = StyledDocument::new("Simple Polygon");
    let rule = document
        .add_layer("parcels")
        .add_style("default")
        .add_feature_type_style("fts")
        .add_rule("all parcels");
    let symbolizer = rule.add_symbolizer(SymbolizerKind::Polygon);
    symbolizer.set_property(
        FieldKey::FillColour,
        Expression::literal(StyleValue::Colour("#000080".to_string())),
    );
    symbolizer.set_property(
        FieldKey::FillOpacity,
        Expression::literal(StyleValue::Double(0.5)),
    );
    symbolizer.set_property(
        FieldKey::StrokeColour,
        Expression::literal(StyleValue::Colour("#FFFFFF".to_string())),
    );
    symbolizer.set_property(
        FieldKey::StrokeWidth,
        Expression::literal(StyleValue::Double(2.0)),
    );
    document
}

/// Build a labelled-point document with an attribute-driven label
pub fn label_document() -> StyledDocument {
    let mut document = StyledDocument::new("Point With Label");
    let rule = document
        .add_layer("cities")
        .add_style("default")
        .add_feature_type_style("fts")
        .add_rule("all cities");
    let point = rule.add_symbolizer(SymbolizerKind::Point);
    point.set_property(FieldKey::SymbolType, Expression::literal_string("circle"));
    let text = rule.add_symbolizer(SymbolizerKind::Text);
    text.set_property(FieldKey::Label, Expression::property("name"));
    text.set_property(
        FieldKey::FontSize,
        Expression::literal(StyleValue::Integer(12)),
    );
    text.set_property(
        FieldKey::HaloColour,
        Expression::literal(StyleValue::Colour("#FFFFFF".to_string())),
    );
    text.set_property(
        FieldKey::HaloRadius,
        Expression::literal(StyleValue::Double(1.0)),
    );
    document
}

/// Build a multi-rule document filtered by an attribute predicate
pub fn attribute_filtered_document() -> StyledDocument {
    let mut document = StyledDocument::new("Attribute Based Polygon");
    let fts = document
        .add_layer("zones")
        .add_style("default")
        .add_feature_type_style("fts");

    let small = fts.add_rule("small zones");
    small.filter = Some(Expression::function(
        "less_than",
        vec![
            Expression::property("population"),
            Expression::literal(StyleValue::Integer(200000)),
        ],
    ));
    small.add_symbolizer(SymbolizerKind::Polygon).set_property(
        FieldKey::FillColour,
        Expression::literal(StyleValue::Colour("#66FF66".to_string())),
    );

    let large = fts.add_rule("large zones");
    large.filter = Some(Expression::function(
        "greater_than_or_equal",
        vec![
            Expression::property("population"),
            Expression::literal(StyleValue::Integer(200000)),
        ],
    ));
    large.add_symbolizer(SymbolizerKind::Polygon).set_property(
        FieldKey::FillColour,
        Expression::literal(StyleValue::Colour("#FF6666".to_string())),
    );

    document
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::NodePath;
    use meridian_core::{PanelKind, Validatable};

    #[test]
    fn test_sample_documents_validate() {
        for document in [
            point_document(),
            line_document(),
            polygon_document(),
            label_document(),
            attribute_filtered_document(),
        ] {
            assert!(document.validate().is_ok(), "{}", document.meta.name);
        }
    }

    #[test]
    fn test_polygon_document_panels() {
        let document = polygon_document();
        assert_eq!(
            document.panel_kind(&NodePath::first()).unwrap(),
            PanelKind::Fill
        );
    }

    #[test]
    fn test_label_document_has_text_symbolizer() {
        let document = label_document();
        let text_path = NodePath::new(0, 0, 0, 0, 1, 0);
        assert_eq!(document.panel_kind(&text_path).unwrap(), PanelKind::Label);
        let symbolizer = document.symbolizer(&text_path).unwrap();
        assert!(!symbolizer.property(FieldKey::Label).unwrap().is_literal());
    }

    #[test]
    fn test_attribute_filtered_document_rules() {
        let document = attribute_filtered_document();
        let fts = &document.layers[0].styles[0].feature_type_styles[0];
        assert_eq!(fts.rules.len(), 2);
        assert!(fts.rules.iter().all(|rule| rule.filter.is_some()));
    }
}
