//! Encoded polyline codec for route geometries.
//!
//! Directions providers return route geometry as a compact ASCII string:
//! each coordinate is stored as a fixed-point integer at 1e-5 degree
//! precision, delta-coded against the previous point, zig-zag signed and
//! split into 5-bit chunks offset by 63. Latitude and longitude deltas
//! alternate, one pair per point.
//!
//! Decoding is strict. A chunk run that reaches the end of input with the
//! continuation bit still set is reported as [`PolylineError::Truncated`]
//! instead of producing a partial path.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::position::Position;

/// Fixed-point scale of the format (5 decimal digits).
const PRECISION: f64 = 1e5;

/// Every encoded byte is a 6-bit chunk shifted into the printable range.
const CHUNK_OFFSET: u8 = 63;
const MAX_BYTE: u8 = CHUNK_OFFSET + 0x3f;

const CONTINUATION_BIT: i64 = 0x20;
const CHUNK_MASK: i64 = 0x1f;

/// Longest run of chunks accepted for a single value (35 bits of payload).
const MAX_CHUNKS: u32 = 7;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PolylineError {
    #[error("polyline truncated: value starting at byte {offset} is not terminated")]
    Truncated { offset: usize },

    #[error("polyline contains invalid byte {byte:#04x} at offset {offset}")]
    InvalidCharacter { offset: usize, byte: u8 },

    #[error("polyline value starting at byte {offset} overflows")]
    Overflow { offset: usize },

    #[error("point {index} is not a finite coordinate within range")]
    InvalidCoordinate { index: usize },
}

/// A polyline representing a route geometry as decoded coordinates.
///
/// Stores positions directly for internal processing. Encoding to and from
/// the compact polyline format happens at the provider boundary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Polyline {
    points: Vec<Position>,
}

impl Polyline {
    /// Creates a new Polyline from decoded coordinate points.
    pub fn new(points: Vec<Position>) -> Self {
        Self { points }
    }

    /// Decodes an encoded polyline string.
    pub fn decode(encoded: &str) -> Result<Self, PolylineError> {
        decode(encoded).map(Self::new)
    }

    /// Encodes the points back into the compact string form.
    pub fn encode(&self) -> Result<String, PolylineError> {
        encode(&self.points)
    }

    /// Returns a reference to the coordinate points.
    pub fn points(&self) -> &[Position] {
        &self.points
    }

    /// Consumes the polyline and returns the owned coordinate points.
    pub fn into_points(self) -> Vec<Position> {
        self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Decodes an encoded polyline into positions, in encounter order.
///
/// The empty string decodes to an empty path. A point cut short after its
/// latitude is reported as `Truncated` at the offset where that point starts.
pub fn decode(encoded: &str) -> Result<Vec<Position>, PolylineError> {
    let bytes = encoded.as_bytes();
    let mut points = Vec::new();
    let mut index = 0;
    let mut lat: i64 = 0;
    let mut lng: i64 = 0;

    while index < bytes.len() {
        let lat_offset = index;
        let dlat = next_value(bytes, &mut index)?;
        if index >= bytes.len() {
            return Err(PolylineError::Truncated { offset: lat_offset });
        }
        let lng_offset = index;
        let dlng = next_value(bytes, &mut index)?;

        lat = lat
            .checked_add(dlat)
            .ok_or(PolylineError::Overflow { offset: lat_offset })?;
        lng = lng
            .checked_add(dlng)
            .ok_or(PolylineError::Overflow { offset: lng_offset })?;

        points.push(Position::new(lat as f64 / PRECISION, lng as f64 / PRECISION));
    }

    Ok(points)
}

/// Encodes positions into the compact polyline string.
///
/// Coordinates are rounded to 1e-5 degrees; an empty slice encodes to `""`.
/// Points that are not finite or lie outside the degree ranges are rejected.
pub fn encode(points: &[Position]) -> Result<String, PolylineError> {
    let mut encoded = String::with_capacity(points.len() * 8);
    let mut prev_lat: i64 = 0;
    let mut prev_lng: i64 = 0;

    for (index, point) in points.iter().enumerate() {
        if !point.is_valid() {
            return Err(PolylineError::InvalidCoordinate { index });
        }
        let lat = to_fixed(point.lat);
        let lng = to_fixed(point.lng);
        push_value(&mut encoded, lat - prev_lat);
        push_value(&mut encoded, lng - prev_lng);
        prev_lat = lat;
        prev_lng = lng;
    }

    Ok(encoded)
}

fn to_fixed(degrees: f64) -> i64 {
    (degrees * PRECISION).round() as i64
}

/// Reads one zig-zag value starting at `index`, advancing past its chunk run.
fn next_value(bytes: &[u8], index: &mut usize) -> Result<i64, PolylineError> {
    let offset = *index;
    let mut result: i64 = 0;
    let mut chunks = 0;

    loop {
        let byte = *bytes
            .get(*index)
            .ok_or(PolylineError::Truncated { offset })?;
        if !(CHUNK_OFFSET..=MAX_BYTE).contains(&byte) {
            return Err(PolylineError::InvalidCharacter {
                offset: *index,
                byte,
            });
        }
        if chunks == MAX_CHUNKS {
            return Err(PolylineError::Overflow { offset });
        }
        *index += 1;

        let chunk = i64::from(byte - CHUNK_OFFSET);
        result |= (chunk & CHUNK_MASK) << (5 * chunks);
        chunks += 1;

        if chunk & CONTINUATION_BIT == 0 {
            break;
        }
    }

    Ok(if result & 1 == 1 {
        !(result >> 1)
    } else {
        result >> 1
    })
}

fn push_value(encoded: &mut String, value: i64) {
    let mut zigzag = (value << 1) ^ (value >> 63);
    while zigzag >= CONTINUATION_BIT {
        push_chunk(encoded, (CONTINUATION_BIT | (zigzag & CHUNK_MASK)) as u8);
        zigzag >>= 5;
    }
    push_chunk(encoded, zigzag as u8);
}

fn push_chunk(encoded: &mut String, chunk: u8) {
    encoded.push(char::from(chunk + CHUNK_OFFSET));
}
