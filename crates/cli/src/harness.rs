//! Declarative test runner
//!
//! Drives an editor session from a `TestScript`: selects tree nodes,
//! asserts panel identity and data presence, injects values through the
//! designated test entry point, and compares field state against expected
//! literals. Numeric fields compare within a fixed tolerance; colour
//! fields compare case-insensitively; filename-valued fields compare by
//! path suffix, since sample data materializes at temporary locations.

use crate::script::{FieldCheck, TestScript, TestStep};
use meridian_core::{FieldKey, StudioResult, StyleValue, Validatable};
use meridian_panel::EditorSession;

/// Tolerance for floating-point comparisons
pub const EPSILON: f64 = 1e-4;

// ============================================================================
// Reports
// ============================================================================

/// Outcome of one script step
#[derive(Debug)]
pub struct StepReport {
    /// Step label (index plus path)
    pub label: String,

    /// Failure descriptions; empty means the step passed
    pub failures: Vec<String>,
}

impl StepReport {
    /// Check if the step passed
    pub fn passed(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Outcome of one whole script
#[derive(Debug)]
pub struct ScriptReport {
    /// Script name
    pub name: String,

    /// Per-step outcomes
    pub steps: Vec<StepReport>,
}

impl ScriptReport {
    /// Check if every step passed
    pub fn passed(&self) -> bool {
        self.steps.iter().all(StepReport::passed)
    }

    /// Count the failures across all steps
    pub fn failure_count(&self) -> usize {
        self.steps.iter().map(|step| step.failures.len()).sum()
    }
}

// ============================================================================
// TestRunner
// ============================================================================

/// Runs declarative test scripts against editor sessions
#[derive(Debug)]
pub struct TestRunner {
    colour_fields: Vec<FieldKey>,
    filename_fields: Vec<FieldKey>,
}

impl Default for TestRunner {
    fn default() -> Self {
        Self {
            colour_fields: vec![
                FieldKey::FillColour,
                FieldKey::StrokeColour,
                FieldKey::HaloColour,
            ],
            filename_fields: vec![FieldKey::ExternalGraphic],
        }
    }
}

impl TestRunner {
    /// Create a runner with the canonical field comparison lists
    pub fn new() -> Self {
        Self::default()
    }

    /// Run a script from a fresh session on its declared document
    pub fn run(&self, script: &TestScript) -> StudioResult<ScriptReport> {
        script.validate()?;
        let mut session = EditorSession::load_document(script.document.build());
        let mut steps = Vec::with_capacity(script.steps.len());
        for (index, step) in script.steps.iter().enumerate() {
            steps.push(self.run_step(&mut session, index, step));
        }
        Ok(ScriptReport {
            name: script.name.clone(),
            steps,
        })
    }

    fn run_step(&self, session: &mut EditorSession, index: usize, step: &TestStep) -> StepReport {
        let label = format!("step {index} ({})", step.path);
        let mut failures = Vec::new();

        match session.select(step.path) {
            Ok(kind) => {
                if kind != step.expected_panel {
                    failures.push(format!(
                        "expected panel '{}', selection resolved to '{kind}'",
                        step.expected_panel
                    ));
                }
            }
            Err(error) => {
                failures.push(format!("selection failed: {error}"));
                return StepReport { label, failures };
            }
        }

        if let Some(expected) = step.expect_data {
            let actual = session.data_present();
            if actual != expected {
                failures.push(format!(
                    "expected data_present == {expected}, found {actual}"
                ));
            }
        }

        for check in &step.fields {
            self.run_check(session, check, &mut failures);
        }
        StepReport { label, failures }
    }

    fn run_check(
        &self,
        session: &mut EditorSession,
        check: &FieldCheck,
        failures: &mut Vec<String>,
    ) {
        if let Some(value) = &check.set {
            if let Err(error) = session.set_test_value(check.field, value.clone()) {
                failures.push(format!("set {} failed: {error}", check.field));
            }
        }

        let field = match session.field(check.field) {
            Ok(field) => field,
            Err(error) => {
                failures.push(format!("lookup {} failed: {error}", check.field));
                return;
            }
        };

        if let Some(expected) = check.expect_enabled {
            let actual = field.is_enabled();
            if actual != expected {
                failures.push(format!(
                    "{}: expected enabled == {expected}, found {actual}",
                    check.field
                ));
            }
        }

        if let Some(expected) = &check.expect {
            if let Err(message) = self.compare(check.field, expected, field.string_value()) {
                failures.push(message);
            }
        }
    }

    /// Compare an expected literal against a field's rendered value
    fn compare(
        &self,
        field: FieldKey,
        expected: &StyleValue,
        actual: Option<String>,
    ) -> Result<(), String> {
        let Some(actual) = actual else {
            return Err(format!("{field}: expected '{expected}', field holds no value"));
        };

        if let Some(expected_number) = expected.as_f64() {
            let Ok(actual_number) = actual.parse::<f64>() else {
                return Err(format!(
                    "{field}: expected number {expected_number}, found '{actual}'"
                ));
            };
            if (actual_number - expected_number).abs() > EPSILON {
                return Err(format!(
                    "{field}: expected {expected_number} within {EPSILON}, found {actual_number}"
                ));
            }
            return Ok(());
        }

        let expected_text = expected.to_text();
        let matches = if self.filename_fields.contains(&field) {
            actual.ends_with(&expected_text)
        } else if self.colour_fields.contains(&field) {
            actual.eq_ignore_ascii_case(&expected_text)
        } else {
            actual == expected_text
        };
        if matches {
            Ok(())
        } else {
            Err(format!(
                "{field}: expected '{expected_text}', found '{actual}'"
            ))
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::script::SampleDocument;
    use meridian_core::PanelKind;
    use meridian_style::NodePath;

    fn runner() -> TestRunner {
        TestRunner::new()
    }

    #[test]
    fn test_compare_numeric_within_tolerance() {
        let runner = runner();
        assert!(
            runner
                .compare(
                    FieldKey::Size,
                    &StyleValue::Double(6.0),
                    Some("6.00005".to_string()),
                )
                .is_ok()
        );
        assert!(
            runner
                .compare(
                    FieldKey::Size,
                    &StyleValue::Double(6.0),
                    Some("6.1".to_string()),
                )
                .is_err()
        );
    }

    #[test]
    fn test_compare_colour_is_case_insensitive() {
        let runner = runner();
        assert!(
            runner
                .compare(
                    FieldKey::FillColour,
                    &StyleValue::Colour("#ff0000".to_string()),
                    Some("#FF0000".to_string()),
                )
                .is_ok()
        );
    }

    #[test]
    fn test_compare_filename_by_suffix() {
        let runner = runner();
        assert!(
            runner
                .compare(
                    FieldKey::ExternalGraphic,
                    &StyleValue::string("symbols/star.svg"),
                    Some("/tmp/extracted0001/symbols/star.svg".to_string()),
                )
                .is_ok()
        );
        assert!(
            runner
                .compare(
                    FieldKey::ExternalGraphic,
                    &StyleValue::string("symbols/star.svg"),
                    Some("/tmp/other/circle.svg".to_string()),
                )
                .is_err()
        );
    }

    #[test]
    fn test_run_reports_wrong_panel() {
        let script = TestScript {
            name: "wrong panel".to_string(),
            document: SampleDocument::Polygon,
            steps: vec![crate::script::TestStep {
                path: NodePath::first(),
                expected_panel: PanelKind::Stroke,
                expect_data: None,
                fields: vec![],
            }],
        };
        let report = runner().run(&script).unwrap();
        assert!(!report.passed());
        assert_eq!(report.failure_count(), 1);
    }
}
