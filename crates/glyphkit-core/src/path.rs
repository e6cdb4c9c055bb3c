//! Path model: draw commands and glyph paths
//!
//! A glyph outline is an ordered sequence of draw commands. The command
//! set is a closed sum - move, line, cubic curve, close - so encode,
//! decode, and approximate all match exhaustively and a new command
//! kind is a compile error everywhere at once.
//!
//! The serde representation is the transport form used by everything
//! downstream of the codec: each command is a tagged tuple
//! (`["M",[x,y]]`, `["L",[x,y]]`, `["C",[x1,y1],[x2,y2],[x3,y3]]`,
//! `["Z"]`), preserving order.

use serde::de::{self, SeqAccess, Visitor};
use serde::ser::SerializeSeq;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use smallvec::SmallVec;
use std::fmt;

/// A 2D coordinate in path space (font units before normalization).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// The command kind, in the fixed order used by the one-hot columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CommandKind {
    MoveTo,
    LineTo,
    CurveTo,
    Close,
}

impl CommandKind {
    /// Column index of this kind in the one-hot block.
    pub fn index(self) -> usize {
        match self {
            CommandKind::MoveTo => 0,
            CommandKind::LineTo => 1,
            CommandKind::CurveTo => 2,
            CommandKind::Close => 3,
        }
    }

    /// Kind for a one-hot column index, if in range.
    pub fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(CommandKind::MoveTo),
            1 => Some(CommandKind::LineTo),
            2 => Some(CommandKind::CurveTo),
            3 => Some(CommandKind::Close),
            _ => None,
        }
    }

    /// Number of points a command of this kind carries.
    pub fn point_count(self) -> usize {
        match self {
            CommandKind::MoveTo | CommandKind::LineTo => 1,
            CommandKind::CurveTo => 3,
            CommandKind::Close => 0,
        }
    }

    /// The transport tag ("M", "L", "C", "Z").
    pub fn tag(self) -> &'static str {
        match self {
            CommandKind::MoveTo => "M",
            CommandKind::LineTo => "L",
            CommandKind::CurveTo => "C",
            CommandKind::Close => "Z",
        }
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// One drawing primitive of a glyph outline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    /// Start a new subpath at a point.
    MoveTo(Point),
    /// Straight segment to a point.
    LineTo(Point),
    /// Cubic Bezier segment: two control points, then the end point.
    CurveTo(Point, Point, Point),
    /// Close the current subpath.
    Close,
}

impl PathCommand {
    pub fn kind(&self) -> CommandKind {
        match self {
            PathCommand::MoveTo(_) => CommandKind::MoveTo,
            PathCommand::LineTo(_) => CommandKind::LineTo,
            PathCommand::CurveTo(..) => CommandKind::CurveTo,
            PathCommand::Close => CommandKind::Close,
        }
    }

    /// The command's points in drawing order (empty for `Close`).
    pub fn points(&self) -> SmallVec<[Point; 3]> {
        match self {
            PathCommand::MoveTo(p) | PathCommand::LineTo(p) => SmallVec::from_slice(&[*p]),
            PathCommand::CurveTo(c1, c2, to) => SmallVec::from_slice(&[*c1, *c2, *to]),
            PathCommand::Close => SmallVec::new(),
        }
    }

    pub fn point_count(&self) -> usize {
        self.kind().point_count()
    }
}

impl Serialize for PathCommand {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let points = self.points();
        let mut seq = serializer.serialize_seq(Some(1 + points.len()))?;
        seq.serialize_element(self.kind().tag())?;
        for p in &points {
            seq.serialize_element(&[p.x, p.y])?;
        }
        seq.end()
    }
}

impl<'de> Deserialize<'de> for PathCommand {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct CommandVisitor;

        impl<'de> Visitor<'de> for CommandVisitor {
            type Value = PathCommand;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a tagged command tuple like [\"M\",[x,y]]")
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<PathCommand, A::Error>
            where
                A: SeqAccess<'de>,
            {
                let tag: String = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(0, &self))?;

                let mut next_point = |index: usize| -> Result<Point, A::Error> {
                    let pair: [f64; 2] = seq
                        .next_element()?
                        .ok_or_else(|| de::Error::invalid_length(index, &self))?;
                    Ok(Point::new(pair[0], pair[1]))
                };

                match tag.as_str() {
                    "M" => Ok(PathCommand::MoveTo(next_point(1)?)),
                    "L" => Ok(PathCommand::LineTo(next_point(1)?)),
                    "C" => {
                        let c1 = next_point(1)?;
                        let c2 = next_point(2)?;
                        let to = next_point(3)?;
                        Ok(PathCommand::CurveTo(c1, c2, to))
                    }
                    "Z" => Ok(PathCommand::Close),
                    other => Err(de::Error::unknown_variant(other, &["M", "L", "C", "Z"])),
                }
            }
        }

        deserializer.deserialize_seq(CommandVisitor)
    }
}

/// An ordered sequence of draw commands describing one glyph outline.
///
/// Order is drawing order and is semantically significant. A path may
/// be empty (a glyph that is mapped but draws nothing).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GlyphPath {
    commands: Vec<PathCommand>,
}

impl GlyphPath {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, command: PathCommand) {
        self.commands.push(command);
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PathCommand> {
        self.commands.iter()
    }

    /// Maximum point count over all commands (0 for an empty path or a
    /// close-only path).
    pub fn max_point_count(&self) -> usize {
        self.commands
            .iter()
            .map(PathCommand::point_count)
            .max()
            .unwrap_or(0)
    }

    /// Total point count across all commands. This is the length of the
    /// per-axis coordinate channels, not the command count.
    pub fn total_point_count(&self) -> usize {
        self.commands.iter().map(PathCommand::point_count).sum()
    }

    /// The command kinds in order, useful for structure comparisons.
    pub fn kinds(&self) -> Vec<CommandKind> {
        self.commands.iter().map(PathCommand::kind).collect()
    }
}

impl From<Vec<PathCommand>> for GlyphPath {
    fn from(commands: Vec<PathCommand>) -> Self {
        Self { commands }
    }
}

impl FromIterator<PathCommand> for GlyphPath {
    fn from_iter<T: IntoIterator<Item = PathCommand>>(iter: T) -> Self {
        Self {
            commands: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a GlyphPath {
    type Item = &'a PathCommand;
    type IntoIter = std::slice::Iter<'a, PathCommand>;

    fn into_iter(self) -> Self::IntoIter {
        self.commands.iter()
    }
}
