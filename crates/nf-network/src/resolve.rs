//! Per-element attribute resolution.
//!
//! Every rule here works on the raw string attributes of one node or edge
//! and reports failures as an [`AttributeError`] without graph context; the
//! builder attaches the graph name and element description.
//!
//! # Numeric attribute rules
//!
//! For an ordered list of candidate attribute names, the first one that is
//! present, non-empty and parses to a **nonzero** value wins.  A zero value
//! falls through to the next candidate (and finally to the caller's
//! fallback).  Non-numeric, negative or non-finite values are errors, never
//! silently defaulted.

use nf_core::GeoPoint;
use nf_graphml::Attributes;

/// Longitude attribute names, in order of preference.
pub const LON_ATTRIBUTES: [&str; 3] = ["x", "lon", "lng"];
/// Latitude attribute names, in order of preference.
pub const LAT_ATTRIBUTES: [&str; 2] = ["y", "lat"];
/// Explicit link length attribute names, metres.
pub const LENGTH_ATTRIBUTES: [&str; 2] = ["distance", "length"];
/// Speed attribute names used unless a layer configures its own, m/s.
pub const SPEED_ATTRIBUTES: [&str; 2] = ["walking_speed", "maxspeed"];

/// Values of the `oneway` attribute that mean "one direction only".
const TRUTHY: [&str; 3] = ["true", "1", "yes"];

/// A single attribute whose value could not be used.
#[derive(Clone, Debug, PartialEq)]
pub struct AttributeError {
    pub attribute: String,
    pub value:     String,
    pub reason:    &'static str,
}

// ── Coordinates ───────────────────────────────────────────────────────────────

/// Geographic coordinate of a node.
///
/// Returns `Ok(None)` when no longitude or no latitude attribute is present
/// (the caller reports that as a missing coordinate).
pub fn node_coordinate(attrs: &Attributes) -> Result<Option<GeoPoint>, AttributeError> {
    let lon = first_number(attrs, LON_ATTRIBUTES.iter().copied(), false)?;
    let lat = first_number(attrs, LAT_ATTRIBUTES.iter().copied(), false)?;
    match (lon, lat) {
        (Some((_, lon)), Some((lat_key, lat))) => {
            if lat.abs() > 90.0 {
                return Err(AttributeError {
                    attribute: lat_key.to_owned(),
                    value:     lat.to_string(),
                    reason:    "is outside the valid latitude range",
                });
            }
            Ok(Some(GeoPoint::new(lon, lat)))
        }
        _ => Ok(None),
    }
}

// ── Length ────────────────────────────────────────────────────────────────────

/// Resolves link length in metres: explicit attribute first, otherwise the
/// haversine distance between the endpoints' geographic coordinates.
///
/// Projected coordinates are deliberately not used; the fallback must not
/// inherit the projection's scale distortion.
#[derive(Clone, Debug)]
pub struct LengthResolver {
    attributes: Vec<String>,
}

impl LengthResolver {
    pub fn new(attributes: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self { attributes: attributes.into_iter().map(Into::into).collect() }
    }

    pub fn resolve(
        &self,
        attrs: &Attributes,
        from:  GeoPoint,
        to:    GeoPoint,
    ) -> Result<f64, AttributeError> {
        let explicit = first_number(attrs, self.attributes.iter().map(String::as_str), true)?;
        Ok(match explicit {
            Some((_, length)) => length,
            None => from.distance_m(to),
        })
    }
}

impl Default for LengthResolver {
    fn default() -> Self {
        Self::new(LENGTH_ATTRIBUTES)
    }
}

// ── Speed ─────────────────────────────────────────────────────────────────────

/// Resolves free-flow speed in m/s from mode-appropriate attributes, falling
/// back to a caller-supplied per-mode default.
#[derive(Clone, Debug)]
pub struct SpeedResolver {
    attributes: Vec<String>,
}

impl SpeedResolver {
    pub fn new(attributes: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self { attributes: attributes.into_iter().map(Into::into).collect() }
    }

    pub fn resolve(&self, attrs: &Attributes, mode_default: f64) -> Result<f64, AttributeError> {
        let explicit = first_number(attrs, self.attributes.iter().map(String::as_str), true)?;
        Ok(explicit.map_or(mode_default, |(_, speed)| speed))
    }
}

impl Default for SpeedResolver {
    fn default() -> Self {
        Self::new(SPEED_ATTRIBUTES)
    }
}

// ── Directionality ────────────────────────────────────────────────────────────

/// `true` if the edge yields a single link.
///
/// An absent flag means one-way.  A present flag means one-way only for
/// `true`/`1`/`yes` (any case); every other value means both directions.
pub fn is_oneway(attrs: &Attributes) -> bool {
    match attrs.get("oneway") {
        None => true,
        Some(v) => {
            let v = v.trim().to_ascii_lowercase();
            TRUTHY.contains(&v.as_str())
        }
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

/// First candidate that is present and non-empty, parsed as `f64`.
///
/// With `skip_zero`, a parsed zero falls through to the next candidate and
/// negative values are rejected.
fn first_number<'k>(
    attrs:      &Attributes,
    candidates: impl Iterator<Item = &'k str>,
    skip_zero:  bool,
) -> Result<Option<(&'k str, f64)>, AttributeError> {
    for key in candidates {
        let Some(raw) = attrs.get(key) else { continue };
        let raw = raw.trim();
        if raw.is_empty() {
            continue;
        }
        let value = parse_finite(key, raw)?;
        if skip_zero {
            if value == 0.0 {
                continue;
            }
            if value < 0.0 {
                return Err(AttributeError {
                    attribute: key.to_owned(),
                    value:     raw.to_owned(),
                    reason:    "must not be negative",
                });
            }
        }
        return Ok(Some((key, value)));
    }
    Ok(None)
}

fn parse_finite(key: &str, raw: &str) -> Result<f64, AttributeError> {
    match raw.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        Ok(_) => Err(AttributeError {
            attribute: key.to_owned(),
            value:     raw.to_owned(),
            reason:    "is not a finite number",
        }),
        Err(_) => Err(AttributeError {
            attribute: key.to_owned(),
            value:     raw.to_owned(),
            reason:    "is not a number",
        }),
    }
}
