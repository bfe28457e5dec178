//! Toolpath Generator
//!
//! Turns the points of one brightness level into a G-code program that visits
//! each point in order, plunging to mark it and lifting back to travel height.
//!
//! Plotter-space Y grows downwards; machine Y is flipped and shifted so that
//! `machine_y = (plotter_height - y) + 50`.

use crate::gcode::GcodeLine;
use std::fmt;
use stipplekit_core::{GenerationParameters, SampledPoint};

/// Machine Y of the plot origin, in millimeters
pub const Y_ORIGIN_OFFSET: f64 = 50.0;

/// Parking X position
pub const PARK_X: f64 = 1.0;

/// Height added to the travel Z for the parking move
pub const PARK_Z_CLEARANCE: f64 = 10.0;

/// Y of the final retract move
pub const RETRACT_Y: f64 = 550.0;

/// Lines in a document that do not depend on the point count
pub const FIXED_LINE_COUNT: usize = 8;

/// Lines emitted per point (move, plunge, lift)
pub const LINES_PER_POINT: usize = 3;

/// Expected document length for a level with `points` points
pub fn document_line_count(points: usize) -> usize {
    FIXED_LINE_COUNT + LINES_PER_POINT * points
}

/// Machine coordinates of a plotter-space point
pub fn plotter_to_machine(point: &SampledPoint, plotter_height: f64) -> (f64, f64) {
    (point.x, (plotter_height - point.y) + Y_ORIGIN_OFFSET)
}

/// Plotter-space Y of a machine Y
pub fn machine_to_plotter_y(machine_y: f64, plotter_height: f64) -> f64 {
    plotter_height - (machine_y - Y_ORIGIN_OFFSET)
}

/// G-code program for a single brightness level
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GcodeDocument {
    level: usize,
    lines: Vec<String>,
}

impl GcodeDocument {
    /// Level this document was generated for
    pub fn level(&self) -> usize {
        self.level
    }

    /// Program lines, in execution order
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Number of lines
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// True when the document has no lines
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Program text, lines joined by `\n` without a trailing newline
    pub fn to_text(&self) -> String {
        self.lines.join("\n")
    }
}

impl fmt::Display for GcodeDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

/// Generator for point plotting G-code
///
/// Holds no state between calls; every level can be generated independently.
pub struct PointToolpathGenerator<'a> {
    params: &'a GenerationParameters,
}

impl<'a> PointToolpathGenerator<'a> {
    /// Create a generator for the given parameters
    pub fn new(params: &'a GenerationParameters) -> Self {
        Self { params }
    }

    /// Generate the program for one level's points
    pub fn generate(&self, level: usize, points: &[SampledPoint]) -> GcodeDocument {
        let p = self.params;
        let height = p.dimensions.height;
        let mut lines = Vec::with_capacity(document_line_count(points.len()));

        // Preamble
        lines.push(GcodeLine::new("G21").comment("Set units to millimeters"));
        lines.push(GcodeLine::new("G90").comment("Use absolute positioning"));
        lines.push(GcodeLine::new("G28").comment("Home all axes"));
        lines.push(
            GcodeLine::new("G01")
                .fixed('Z', p.z_travel)
                .raw('F', p.feed_rate_z)
                .comment("Move to safe Z travel height"),
        );

        for point in points {
            let (gx, gy) = plotter_to_machine(point, height);
            lines.push(
                GcodeLine::new("G00")
                    .fixed('X', gx)
                    .fixed('Y', gy)
                    .raw('F', p.feed_rate_xy)
                    .comment("Move to point"),
            );
            lines.push(
                GcodeLine::new("G01")
                    .fixed('Z', p.z_point)
                    .raw('F', p.feed_rate_z)
                    .comment("Plunge/Mark point"),
            );
            lines.push(
                GcodeLine::new("G01")
                    .fixed('Z', p.z_travel)
                    .raw('F', p.feed_rate_z)
                    .comment("Lift tool"),
            );
        }

        // Park, retract, end
        lines.push(
            GcodeLine::new("G00")
                .raw('X', PARK_X)
                .fixed('Y', height - 1.0)
                .fixed('Z', p.z_travel + PARK_Z_CLEARANCE)
                .raw('F', p.feed_rate_xy)
                .comment("Move to parking position"),
        );
        lines.push(GcodeLine::new("G01").raw('X', 0.0).raw('Y', RETRACT_Y));
        lines.push(GcodeLine::new("G01").raw('Z', 0.0));
        lines.push(GcodeLine::new("M02").comment("End of program"));

        GcodeDocument {
            level,
            lines: lines.iter().map(ToString::to_string).collect(),
        }
    }
}
