//! # Tuning - gain script compiler
//!
//! Turns user-submitted text into a validated [`GainSet`]. Two dialects are accepted:
//!
//! - **flat** (canonical): one `axis_field = value` assignment per line, e.g.
//!   `pitch_kp = 2.5`. `#` and `//` start comments, blank lines are ignored.
//! - **structured** (best-effort): the first `return { .. }` block is searched for
//!   `axis: { kp: .., ki: .., kd: .. }` entries. Anything it cannot locate falls back to
//!   the default gain for that axis and field.
//!
//! In both dialects a value is either a number or one of the read-only telemetry
//! variables (`altitude`, `speed`, `pitch`, `roll`, `yaw`, `throttle`).
//!
//! Every gain is validated (finite, kp in [0, 100], ki and kd in [0, 10]) before a set
//! is returned; nothing is ever partially applied.

mod compiler;
mod error;
mod flat;
mod lexer;
mod structured;
mod telemetry;

pub use compiler::{compile, compile_with_report, Compilation, Dialect};
pub use error::{CompileError, ParseError};
pub use pid::GainSet;
pub use telemetry::Telemetry;

#[cfg(test)]
mod tests {
    use super::*;
    use pid::{Axis, GainField, Gains, PIDError};

    const REFERENCE: &str = "pitch_kp = 2.5\npitch_ki = 0.1\npitch_kd = 0.05\nroll_kp = 1.0\nroll_ki = 0.1\nroll_kd = 0.05\nyaw_kp = 2.0\nyaw_ki = 0.0\nyaw_kd = 0.1\naltitude_kp = 5.0\naltitude_ki = 1.0\naltitude_kd = 1.0";

    #[test]
    fn test_reference_script() {
        let gains = compile(REFERENCE, &Telemetry::default()).expect("reference script should compile");
        assert_eq!(gains.pitch, Gains::new(2.5, 0.1, 0.05));
        assert_eq!(gains.roll, Gains::new(1.0, 0.1, 0.05));
        assert_eq!(gains.yaw, Gains::new(2.0, 0.0, 0.1));
        assert_eq!(gains.altitude, Gains::new(5.0, 1.0, 1.0));

        let report = compile_with_report(REFERENCE, &Telemetry::default()).unwrap();
        assert_eq!(report.dialect, Dialect::Flat);
        assert!(report.defaulted.is_empty());
    }

    #[test]
    fn test_out_of_range_names_axis_and_field() {
        let source = REFERENCE.replace("roll_kp = 1.0", "roll_kp = 150");
        let err = compile(&source, &Telemetry::default()).unwrap_err();
        assert!(matches!(err, CompileError::Validation(PIDError::GainOutOfRange { .. })));
        assert_eq!(err.axis(), Some(Axis::Roll));
        assert_eq!(err.field(), Some(GainField::Kp));
        assert_eq!(err.to_string(), "validation error: roll.kp value 150 is outside [0, 100]");
    }

    #[test]
    fn test_non_finite_is_a_validation_error() {
        let err = compile("yaw_kd = 1e40", &Telemetry::default()).unwrap_err();
        assert!(matches!(err, CompileError::Validation(PIDError::NonFiniteGain { .. })));
        assert_eq!(err.axis(), Some(Axis::Yaw));
    }

    #[test]
    fn test_negative_gain_is_rejected() {
        let err = compile("pitch_ki = -0.5", &Telemetry::default()).unwrap_err();
        assert_eq!(err.field(), Some(GainField::Ki));
    }

    #[test]
    fn test_nothing_recognizable_is_a_parse_error() {
        for source in ["", "   \n\n", "# only a comment\n// and another", "return { thrust: { kp: 1 } }"] {
            assert_eq!(
                compile(source, &Telemetry::default()),
                Err(CompileError::Parse(ParseError::Empty)),
                "source {source:?} should not compile"
            );
        }
        assert!(matches!(
            compile("hello world", &Telemetry::default()),
            Err(CompileError::Parse(ParseError::Syntax { line: 1, .. }))
        ));
    }

    #[test]
    fn test_partial_flat_script_uses_defaults() {
        let report = compile_with_report("pitch_kp = 3\n", &Telemetry::default()).unwrap();
        assert_eq!(report.gains.pitch.kp, 3.0);
        assert_eq!(report.gains.roll, GainSet::default().roll);
        assert_eq!(report.defaulted.len(), 11);
    }

    #[test]
    fn test_structured_dialect() {
        let source = "function tune(telemetry) {\n  return {\n    pitch: { kp: 3.0, ki: 0.2, kd: 0.1 },\n    altitude: { kp: telemetry.altitude },\n  };\n}";
        let telemetry = Telemetry { altitude: 4.0, ..Default::default() };
        let report = compile_with_report(source, &telemetry).unwrap();
        assert_eq!(report.dialect, Dialect::Structured);
        assert_eq!(report.gains.pitch, Gains::new(3.0, 0.2, 0.1));
        assert_eq!(report.gains.altitude.kp, 4.0);
        // Not located: documented defaults, not zero
        assert_eq!(report.gains.altitude.ki, GainSet::default().altitude.ki);
        assert_eq!(report.gains.roll, GainSet::default().roll);
        assert_eq!(report.defaulted.len(), 8);
    }

    #[test]
    fn test_structured_validation_and_structure_errors() {
        let err = compile("return { yaw: { kd: 11 } }", &Telemetry::default()).unwrap_err();
        assert_eq!((err.axis(), err.field()), (Some(Axis::Yaw), Some(GainField::Kd)));

        assert_eq!(
            compile("function tune() { pitch: { kp: 1 } }", &Telemetry::default()),
            Err(CompileError::Parse(ParseError::MissingReturn))
        );
        let err = compile("return { pitch: { kp: 1 }", &Telemetry::default()).unwrap_err();
        assert_eq!(err.line(), Some(1));
    }

    #[test]
    fn test_to_script_compiles_back() {
        let mut gains = GainSet::default();
        gains.pitch = Gains::new(7.25, 0.125, 3.5);
        gains.altitude.ki = 0.0;
        let compiled = compile(&gains.to_script(), &Telemetry::default()).unwrap();
        assert_eq!(compiled, gains);
    }

    #[test]
    fn test_telemetry_on_right_hand_side() {
        let telemetry = Telemetry { throttle: 0.5, ..Default::default() };
        let gains = compile("yaw_ki = throttle", &telemetry).unwrap();
        assert_eq!(gains.yaw.ki, 0.5);
    }
}
