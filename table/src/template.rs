//! Column templates: a subset of the CSS grid track list syntax.
//!
//! A template is parsed once and resolved into pixel widths every frame
//! against the width of the row content box. The header and the body rows
//! of one table resolve against the same width, which is what keeps their
//! columns aligned.
//!
//! Supported tracks:
//! - `120px`, `25%`, `2fr`
//! - `auto` (shares leftover space like `1fr`, no content sizing)
//! - `minmax(<length>, <length | fr>)`
//! - `repeat(<count>, <track list>)`

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Template used when the caller does not provide one: nine equal flexible tracks.
pub const DEFAULT_COLUMN_TEMPLATE: &str = "repeat(9, 1fr)";

/// Below this amount of free space distribution stops.
const EPSILON: f32 = 0.001;

/// Largest count `repeat()` accepts.
pub const MAX_REPEAT_COUNT: usize = 10_000;

/// Largest number of tracks a template may expand to.
pub const MAX_TRACKS: usize = 10_000;

/// Errors returned while parsing a column template.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TemplateError {
    #[error("column template is empty")]
    Empty,
    #[error("unexpected end of column template, expected {expected}")]
    UnexpectedEnd { expected: &'static str },
    #[error("unexpected `{found}` at offset {offset} in column template")]
    UnexpectedChar { found: char, offset: usize },
    #[error("invalid number `{text}` in column template")]
    InvalidNumber { text: String },
    #[error("`{text}` needs a unit (px, %, fr)")]
    MissingUnit { text: String },
    #[error("unknown unit `{unit}` in column template")]
    UnknownUnit { unit: String },
    #[error("unknown track function `{name}` in column template")]
    UnknownFunction { name: String },
    #[error("repeat count must be an integer from 1 to {MAX_REPEAT_COUNT}, got `{text}`")]
    InvalidRepeatCount { text: String },
    #[error("repeat() cannot be nested")]
    NestedRepeat,
    #[error("minmax() minimum cannot be a flexible size")]
    FlexibleMinimum,
    #[error("track sizes cannot be negative, got `{text}`")]
    NegativeSize { text: String },
    #[error("column template expands to more than {MAX_TRACKS} tracks")]
    TooManyTracks,
}

/// A definite length: pixels or a percentage of the row content width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Breadth {
    Px(f32),
    Percent(f32),
}

impl Breadth {
    #[inline]
    fn resolve(self, width: f32) -> f32 {
        match self {
            Self::Px(px) => px,
            Self::Percent(percent) => width * percent / 100.0,
        }
    }
}

/// Upper bound of a track.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TrackMax {
    Fixed(Breadth),
    /// Flexible factor (`fr`).
    Flex(f32),
}

/// One column track, normalized to a `minmax(min, max)` pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Track {
    pub min: Breadth,
    pub max: TrackMax,
}

impl Track {
    pub const fn px(px: f32) -> Self {
        Self {
            min: Breadth::Px(px),
            max: TrackMax::Fixed(Breadth::Px(px)),
        }
    }

    pub const fn percent(percent: f32) -> Self {
        Self {
            min: Breadth::Percent(percent),
            max: TrackMax::Fixed(Breadth::Percent(percent)),
        }
    }

    pub const fn fr(factor: f32) -> Self {
        Self {
            min: Breadth::Px(0.0),
            max: TrackMax::Flex(factor),
        }
    }

    pub const fn minmax(min: Breadth, max: TrackMax) -> Self {
        Self { min, max }
    }

    fn flex_factor(&self) -> Option<f32> {
        match self.max {
            TrackMax::Flex(factor) if factor > 0.0 => Some(factor),
            _ => None,
        }
    }
}

/// A parsed column template.
///
/// Serializes as its source text.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ColumnTemplate {
    source: String,
    tracks: Vec<Track>,
}

impl ColumnTemplate {
    /// The template text as written by the caller.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Number of columns after `repeat()` expansion.
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Resolves every track to a width in points for a row content box of `width`.
    ///
    /// Fixed and percentage tracks take their size, bounded `minmax()` tracks grow
    /// evenly toward their maximum, and flexible tracks share what is left by
    /// factor. No track shrinks below its minimum, so the sum may exceed `width`.
    pub fn resolve(&self, width: f32) -> Vec<f32> {
        let width = width.max(0.0);
        let mut sizes: Vec<f32> = self
            .tracks
            .iter()
            .map(|track| track.min.resolve(width).max(0.0))
            .collect();

        let limits: Vec<Option<f32>> = self
            .tracks
            .iter()
            .zip(&sizes)
            .map(|(track, base)| match track.max {
                TrackMax::Fixed(max) => Some(max.resolve(width).max(*base)),
                TrackMax::Flex(_) => None,
            })
            .collect();

        let mut free = width - sizes.iter().sum::<f32>();
        while free > EPSILON {
            let growable: Vec<usize> = limits
                .iter()
                .enumerate()
                .filter_map(|(i, limit)| limit.filter(|l| sizes[i] < l - EPSILON).map(|_| i))
                .collect();
            if growable.is_empty() {
                break;
            }
            let share = free / growable.len() as f32;
            for i in growable {
                let limit = limits[i].unwrap_or(sizes[i]);
                let grow = share.min(limit - sizes[i]);
                sizes[i] += grow;
                free -= grow;
            }
        }

        // Find the size of one `fr`. A flexible track whose minimum is larger
        // than its share is frozen at that minimum and the share recomputed.
        let mut flexible: Vec<usize> = self
            .tracks
            .iter()
            .enumerate()
            .filter(|(_, track)| track.flex_factor().is_some())
            .map(|(i, _)| i)
            .collect();

        while !flexible.is_empty() {
            let inflexible: f32 = sizes
                .iter()
                .enumerate()
                .filter(|(i, _)| !flexible.contains(i))
                .map(|(_, size)| *size)
                .sum();
            let space = (width - inflexible).max(0.0);
            let factors: f32 = flexible
                .iter()
                .filter_map(|i| self.tracks[*i].flex_factor())
                .sum::<f32>()
                .max(1.0);
            let unit = space / factors;

            let before = flexible.len();
            flexible.retain(|i| {
                let factor = self.tracks[*i].flex_factor().unwrap_or_default();
                sizes[*i] <= factor * unit
            });

            if flexible.len() == before {
                for i in &flexible {
                    sizes[*i] = self.tracks[*i].flex_factor().unwrap_or_default() * unit;
                }
                break;
            }
        }

        sizes
    }
}

impl Default for ColumnTemplate {
    fn default() -> Self {
        Self {
            source: DEFAULT_COLUMN_TEMPLATE.to_owned(),
            tracks: vec![Track::fr(1.0); 9],
        }
    }
}

impl PartialEq for ColumnTemplate {
    fn eq(&self, other: &Self) -> bool {
        self.tracks == other.tracks
    }
}

impl fmt::Display for ColumnTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

impl FromStr for ColumnTemplate {
    type Err = TemplateError;

    fn from_str(source: &str) -> Result<Self, Self::Err> {
        let source = source.trim();
        let mut parser = Parser { src: source, pos: 0 };
        let tracks = parser.track_list(false)?;

        Ok(Self {
            source: source.to_owned(),
            tracks,
        })
    }
}

impl TryFrom<String> for ColumnTemplate {
    type Error = TemplateError;

    fn try_from(source: String) -> Result<Self, Self::Error> {
        source.parse()
    }
}

impl From<ColumnTemplate> for String {
    fn from(template: ColumnTemplate) -> Self {
        template.source
    }
}

enum Dimension {
    Length(Breadth),
    Flex(f32),
}

struct Parser<'s> {
    src: &'s str,
    pos: usize,
}

impl<'s> Parser<'s> {
    fn rest(&self) -> &'s str {
        &self.src[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn skip_whitespace(&mut self) {
        let trimmed = self.rest().trim_start();
        self.pos = self.src.len() - trimmed.len();
    }

    fn take_while(&mut self, accept: impl Fn(char) -> bool) -> &'s str {
        let start = self.pos;
        let len = self
            .rest()
            .find(|c: char| !accept(c))
            .unwrap_or(self.rest().len());
        self.pos += len;
        &self.src[start..self.pos]
    }

    fn unexpected(&self, expected: &'static str) -> TemplateError {
        match self.peek() {
            Some(found) => TemplateError::UnexpectedChar {
                found,
                offset: self.pos,
            },
            None => TemplateError::UnexpectedEnd { expected },
        }
    }

    fn expect(&mut self, c: char, expected: &'static str) -> Result<(), TemplateError> {
        self.skip_whitespace();
        if self.peek() == Some(c) {
            self.pos += c.len_utf8();
            Ok(())
        } else {
            Err(self.unexpected(expected))
        }
    }

    fn track_list(&mut self, in_repeat: bool) -> Result<Vec<Track>, TemplateError> {
        let mut tracks = Vec::new();

        loop {
            self.skip_whitespace();
            match self.peek() {
                None => break,
                Some(')') if in_repeat => break,
                Some(_) => self.track_item(in_repeat, &mut tracks)?,
            }

            // Tracks are separated by whitespace.
            match self.peek() {
                None => {}
                Some(c) if c.is_whitespace() => {}
                Some(')') if in_repeat => {}
                Some(_) => return Err(self.unexpected("whitespace")),
            }
        }

        if tracks.len() > MAX_TRACKS {
            return Err(TemplateError::TooManyTracks);
        }
        if tracks.is_empty() {
            return Err(if in_repeat {
                self.unexpected("a track")
            } else {
                TemplateError::Empty
            });
        }

        Ok(tracks)
    }

    fn track_item(
        &mut self,
        in_repeat: bool,
        tracks: &mut Vec<Track>,
    ) -> Result<(), TemplateError> {
        let name = if self.peek().is_some_and(|c| c.is_ascii_alphabetic()) {
            self.take_while(|c| c.is_ascii_alphabetic() || c == '-')
                .to_ascii_lowercase()
        } else {
            String::new()
        };

        match name.as_str() {
            "" => {
                let track = match self.dimension()? {
                    Dimension::Length(Breadth::Px(px)) => Track::px(px),
                    Dimension::Length(Breadth::Percent(percent)) => Track::percent(percent),
                    Dimension::Flex(factor) => Track::fr(factor),
                };
                tracks.push(track);
            }
            "auto" => tracks.push(Track::fr(1.0)),
            "minmax" => {
                self.expect('(', "`(`")?;
                self.skip_whitespace();
                let min = match self.dimension()? {
                    Dimension::Length(breadth) => breadth,
                    Dimension::Flex(_) => return Err(TemplateError::FlexibleMinimum),
                };
                self.expect(',', "`,`")?;
                self.skip_whitespace();
                let max = match self.dimension()? {
                    Dimension::Length(breadth) => TrackMax::Fixed(breadth),
                    Dimension::Flex(factor) => TrackMax::Flex(factor),
                };
                self.expect(')', "`)`")?;
                tracks.push(Track::minmax(min, max));
            }
            "repeat" => {
                if in_repeat {
                    return Err(TemplateError::NestedRepeat);
                }
                self.expect('(', "`(`")?;
                self.skip_whitespace();
                let text = self.take_while(|c| c != ',' && c != ')' && !c.is_whitespace());
                let count = match text.parse::<usize>() {
                    Ok(count) if (1..=MAX_REPEAT_COUNT).contains(&count) => count,
                    _ => {
                        return Err(TemplateError::InvalidRepeatCount {
                            text: text.to_owned(),
                        });
                    }
                };
                self.expect(',', "`,`")?;
                let inner = self.track_list(true)?;
                self.expect(')', "`)`")?;
                let total = count
                    .checked_mul(inner.len())
                    .and_then(|added| added.checked_add(tracks.len()))
                    .filter(|total| *total <= MAX_TRACKS);
                if total.is_none() {
                    return Err(TemplateError::TooManyTracks);
                }
                tracks.reserve(count * inner.len());
                for _ in 0..count {
                    tracks.extend_from_slice(&inner);
                }
            }
            _ => return Err(TemplateError::UnknownFunction { name }),
        }

        Ok(())
    }

    fn dimension(&mut self) -> Result<Dimension, TemplateError> {
        let start = self.pos;
        let number = self.take_while(|c| c.is_ascii_digit() || matches!(c, '.' | '-' | '+'));
        if number.is_empty() {
            return Err(self.unexpected("a number"));
        }
        let invalid = || TemplateError::InvalidNumber {
            text: number.to_owned(),
        };
        let value: f32 = number.parse().map_err(|_err| invalid())?;
        if !value.is_finite() {
            return Err(invalid());
        }
        let unit = self
            .take_while(|c| c.is_ascii_alphabetic() || c == '%')
            .to_ascii_lowercase();
        let text = self.src[start..self.pos].to_owned();

        if value < 0.0 {
            return Err(TemplateError::NegativeSize { text });
        }

        match unit.as_str() {
            "px" => Ok(Dimension::Length(Breadth::Px(value))),
            "%" => Ok(Dimension::Length(Breadth::Percent(value))),
            "fr" => Ok(Dimension::Flex(value)),
            "" if value == 0.0 => Ok(Dimension::Length(Breadth::Px(0.0))),
            "" => Err(TemplateError::MissingUnit { text }),
            _ => Err(TemplateError::UnknownUnit { unit }),
        }
    }
}
