//! Display formatting for parameter values.

/// Converts plain parameter values to and from display strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Formatter {
    /// Plain integer.
    ///
    /// Display: "5", "-3", "0"
    #[default]
    Integer,

    /// Semitones for pitch shifting.
    ///
    /// Display: "+12 st", "-7 st", "0 st"
    Semitones,
}

impl Formatter {
    /// Format a plain value to a display string.
    pub fn format(&self, value: f64) -> String {
        let value = value.round() as i64;
        match self {
            Formatter::Integer => value.to_string(),
            Formatter::Semitones => {
                if value > 0 {
                    format!("+{} st", value)
                } else {
                    format!("{} st", value)
                }
            }
        }
    }

    /// Parse a display string back to a plain value.
    ///
    /// Accepts the formatted output as well as bare numbers.
    pub fn parse(&self, s: &str) -> Option<f64> {
        let s = s.trim();
        let number = match self {
            Formatter::Integer => s,
            Formatter::Semitones => s.trim_end_matches("st").trim_end(),
        };
        let number = number.strip_prefix('+').unwrap_or(number);
        number.parse::<i64>().ok().map(|v| v as f64)
    }

    /// Unit label shown next to the value.
    pub fn units(&self) -> &'static str {
        match self {
            Formatter::Integer => "",
            Formatter::Semitones => "st",
        }
    }
}
