//! Command Formatter
//!
//! Renders single G-code lines. Coordinates and Z heights use fixed
//! three-decimal notation; feed rates and literal words are written as given,
//! so `3000.0` renders as `3000` and `1.5` as `1.5`.

use std::fmt;

/// Numeric field value of a G-code word
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WordValue {
    /// Fixed-point with three decimals (`5.000`)
    Fixed(f64),
    /// Shortest decimal form of the number (`3000`, `1.5`)
    Raw(f64),
}

impl fmt::Display for WordValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            WordValue::Fixed(v) => f.write_str(&format_fixed(v)),
            WordValue::Raw(v) => f.write_str(&format_raw(v)),
        }
    }
}

/// Format a number with three decimals, treating -0 as 0
///
/// The result is the decimal nearest to the exact binary value. When the value
/// lies exactly halfway between two candidates the one farther from zero wins,
/// so `0.0625` renders as `0.063`.
pub fn format_fixed(value: f64) -> String {
    let value = positive_zero(value);
    let magnitude = value.abs();
    let scaled = magnitude * 1000.0;

    // Ties need an exact half in the fourth decimal; mul_add checks that
    // without a second rounding step.
    if scaled < MAX_EXACT_SCALED {
        let half = scaled.floor() + 0.5;
        if magnitude.mul_add(1000.0, -half) == 0.0 {
            let rounded = (half + 0.5) / 1000.0;
            let sign = if value < 0.0 { "-" } else { "" };
            return format!("{}{:.3}", sign, rounded);
        }
    }

    format!("{:.3}", value)
}

/// Above this scaled magnitude `n + 0.5` is no longer exactly representable
const MAX_EXACT_SCALED: f64 = 4_503_599_627_370_496.0;

/// Format a number in its shortest decimal form, treating -0 as 0
pub fn format_raw(value: f64) -> String {
    format!("{}", positive_zero(value))
}

fn positive_zero(value: f64) -> f64 {
    if value == 0.0 {
        0.0
    } else {
        value
    }
}

/// A letter address followed by a value, e.g. `X12.500`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Word {
    pub letter: char,
    pub value: WordValue,
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.letter, self.value)
    }
}

/// One G-code line: command, words, and an optional trailing comment
///
/// ```
/// use stipplekit_camtools::gcode::GcodeLine;
///
/// let line = GcodeLine::new("G01")
///     .fixed('Z', 5.0)
///     .raw('F', 500.0)
///     .comment("Lift tool");
/// assert_eq!(line.to_string(), "G01 Z5.000 F500 ; Lift tool");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct GcodeLine {
    command: &'static str,
    words: Vec<Word>,
    comment: Option<&'static str>,
}

impl GcodeLine {
    /// Start a line with the given command code (`G00`, `M02`, ...)
    pub fn new(command: &'static str) -> Self {
        Self {
            command,
            words: Vec::new(),
            comment: None,
        }
    }

    /// Append a three-decimal word
    pub fn fixed(mut self, letter: char, value: f64) -> Self {
        self.words.push(Word {
            letter,
            value: WordValue::Fixed(value),
        });
        self
    }

    /// Append a word rendered as given
    pub fn raw(mut self, letter: char, value: f64) -> Self {
        self.words.push(Word {
            letter,
            value: WordValue::Raw(value),
        });
        self
    }

    /// Attach a trailing `; comment`
    pub fn comment(mut self, text: &'static str) -> Self {
        self.comment = Some(text);
        self
    }

    /// The command code
    pub fn command(&self) -> &str {
        self.command
    }

    /// The words following the command
    pub fn words(&self) -> &[Word] {
        &self.words
    }
}

impl fmt::Display for GcodeLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.command)?;
        for word in &self.words {
            write!(f, " {}", word)?;
        }
        if let Some(comment) = self.comment {
            write!(f, " ; {}", comment)?;
        }
        Ok(())
    }
}
