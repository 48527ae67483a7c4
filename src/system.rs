use std::fmt::Display;

use crate::config::InverseTrigInput;

/// The built-in unary functions.
///
/// `sin`, `cos` and `tan` take their argument in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Function {
    Sqrt,
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    Exp,
    ToDegrees,
    ToRadians,
    Log,
    Log10,
    Abs,
    Ceil,
    Floor,
    Round,
}

impl Function {
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "sqrt" => Function::Sqrt,
            "sin" => Function::Sin,
            "cos" => Function::Cos,
            "tan" => Function::Tan,
            "asin" => Function::Asin,
            "acos" => Function::Acos,
            "atan" => Function::Atan,
            "exp" => Function::Exp,
            "toDegrees" => Function::ToDegrees,
            "toRadians" => Function::ToRadians,
            "log" => Function::Log,
            "log10" => Function::Log10,
            "abs" => Function::Abs,
            "ceil" => Function::Ceil,
            "floor" => Function::Floor,
            "round" => Function::Round,
            _ => return None,
        })
    }

    pub fn name(self) -> &'static str {
        match self {
            Function::Sqrt => "sqrt",
            Function::Sin => "sin",
            Function::Cos => "cos",
            Function::Tan => "tan",
            Function::Asin => "asin",
            Function::Acos => "acos",
            Function::Atan => "atan",
            Function::Exp => "exp",
            Function::ToDegrees => "toDegrees",
            Function::ToRadians => "toRadians",
            Function::Log => "log",
            Function::Log10 => "log10",
            Function::Abs => "abs",
            Function::Ceil => "ceil",
            Function::Floor => "floor",
            Function::Round => "round",
        }
    }

    pub fn apply(self, x: f64, inverse_trig: InverseTrigInput) -> f64 {
        let ratio = |x: f64| match inverse_trig {
            InverseTrigInput::Degrees => x.to_radians(),
            InverseTrigInput::Ratio => x,
        };

        match self {
            Function::Sqrt => x.sqrt(),
            Function::Sin => x.to_radians().sin(),
            Function::Cos => x.to_radians().cos(),
            Function::Tan => x.to_radians().tan(),
            Function::Asin => ratio(x).asin(),
            Function::Acos => ratio(x).acos(),
            Function::Atan => ratio(x).atan(),
            Function::Exp => x.exp(),
            Function::ToDegrees => x.to_degrees(),
            Function::ToRadians => x.to_radians(),
            Function::Log => x.ln(),
            Function::Log10 => x.log10(),
            Function::Abs => x.abs(),
            Function::Ceil => x.ceil(),
            Function::Floor => x.floor(),
            // half up, so round(-2.5) is -2
            Function::Round => {
                let floor = x.floor();
                if x - floor >= 0.5 { floor + 1.0 } else { floor }
            }
        }
    }
}

impl Display for Function {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn apply(function: Function, x: f64) -> f64 {
        function.apply(x, InverseTrigInput::Degrees)
    }

    #[test]
    fn test_names_round_trip() {
        for name in [
            "sqrt", "sin", "cos", "tan", "asin", "acos", "atan", "exp", "toDegrees",
            "toRadians", "log", "log10", "abs", "ceil", "floor", "round",
        ] {
            let function = Function::from_name(name).unwrap();
            assert_eq!(function.name(), name);
        }
        assert_eq!(Function::from_name("Sqrt"), None);
        assert_eq!(Function::from_name("ln"), None);
    }

    #[test]
    fn test_forward_trig_uses_degrees() {
        assert!((apply(Function::Cos, 180.0) + 1.0).abs() < EPSILON);
        assert!((apply(Function::Sin, 90.0) - 1.0).abs() < EPSILON);
        assert!((apply(Function::Tan, 45.0) - 1.0).abs() < EPSILON);
    }

    #[test]
    fn test_inverse_trig_input_modes() {
        let legacy = Function::Asin.apply(1.0, InverseTrigInput::Degrees);
        assert!((legacy - 1f64.to_radians().asin()).abs() < EPSILON);

        let ratio = Function::Asin.apply(1.0, InverseTrigInput::Ratio);
        assert!((ratio - std::f64::consts::FRAC_PI_2).abs() < EPSILON);

        assert!((Function::Acos.apply(1.0, InverseTrigInput::Ratio)).abs() < EPSILON);
    }

    #[test]
    fn test_rounding_family() {
        assert_eq!(apply(Function::Round, 2.5), 3.0);
        assert_eq!(apply(Function::Round, -2.5), -2.0);
        assert_eq!(apply(Function::Round, 2.4), 2.0);
        assert_eq!(apply(Function::Round, 4503599627370497.0), 4503599627370497.0);
        assert_eq!(apply(Function::Round, 0.49999999999999994), 0.0);
        assert_eq!(apply(Function::Round, -0.5), 0.0);
        assert!(apply(Function::Round, f64::NAN).is_nan());
        assert_eq!(apply(Function::Round, f64::INFINITY), f64::INFINITY);
        assert_eq!(apply(Function::Ceil, 1.2), 2.0);
        assert_eq!(apply(Function::Floor, -1.2), -2.0);
        assert_eq!(apply(Function::Abs, -3.0), 3.0);
    }

    #[test]
    fn test_logs_and_conversions() {
        assert!((apply(Function::Log, std::f64::consts::E) - 1.0).abs() < EPSILON);
        assert!((apply(Function::Log10, 1000.0) - 3.0).abs() < EPSILON);
        assert_eq!(apply(Function::Sqrt, 16.0), 4.0);
        assert!((apply(Function::ToDegrees, std::f64::consts::PI) - 180.0).abs() < EPSILON);
        assert!((apply(Function::ToRadians, 180.0) - std::f64::consts::PI).abs() < EPSILON);
        assert!(apply(Function::Sqrt, -1.0).is_nan());
    }
}
