//! Deterministic visual identity for entities.
//!
//! Every identifier maps to a stable three-stop diagonal gradient. The mapping is
//! pure: no randomness, no clock, no I/O, so the same identifier renders the same
//! background on every page load and every machine.
//!
//! ```rust
//! use sigil::gradient;
//!
//! assert_eq!(
//!     gradient::gradient_css(""),
//!     "linear-gradient(135deg, hsl(0, 70%, 20%), hsl(40, 80%, 30%), hsl(80, 70%, 25%))"
//! );
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// Angle of every derived gradient, in degrees.
pub const GRADIENT_ANGLE: u16 = 135;

/// Hue offsets of the second and third stops relative to the first.
const HUE_OFFSETS: [u32; 3] = [0, 40, 80];

/// (saturation, lightness) for each stop, in percent.
const STOP_TONES: [(u8, u8); 3] = [(70, 20), (80, 30), (70, 25)];

// ============================================================================
// Color types
// ============================================================================

/// A hue/saturation/lightness color. Hue is in degrees `[0, 360)`,
/// saturation and lightness are percentages.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Hsl {
    pub hue: u16,
    pub saturation: u8,
    pub lightness: u8,
}

impl Hsl {
    pub fn new(hue: u16, saturation: u8, lightness: u8) -> Self {
        Self {
            hue,
            saturation,
            lightness,
        }
    }
}

impl fmt::Display for Hsl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "hsl({}, {}%, {}%)",
            self.hue, self.saturation, self.lightness
        )
    }
}

/// A fixed-angle, three-stop linear gradient.
///
/// Rendered through [`Display`](fmt::Display) as a CSS `linear-gradient(...)` value.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Gradient {
    pub angle: u16,
    pub stops: [Hsl; 3],
}

impl Gradient {
    /// The gradient as an inline `background` declaration.
    pub fn background_style(&self) -> String {
        format!("background: {};", self)
    }

    /// Hues of the three stops, in stop order.
    pub fn hues(&self) -> [u16; 3] {
        self.stops.map(|s| s.hue)
    }
}

impl fmt::Display for Gradient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c] = &self.stops;
        write!(f, "linear-gradient({}deg, {}, {}, {})", self.angle, a, b, c)
    }
}

// ============================================================================
// Derivation
// ============================================================================

/// Folds an identifier into a signed 32-bit hash.
///
/// For each Unicode scalar value `c`: `acc = c + ((acc << 5) - acc)`, i.e.
/// `acc * 31 + c`, wrapping exactly like a 32-bit signed integer at every step.
///
/// Characters above U+FFFF contribute one code point here, whereas a browser
/// folding `charCodeAt` sees two UTF-16 surrogates and lands on a different hash.
/// Use [`identity_hash_utf16`] where colors must match such a client.
pub fn identity_hash(identifier: &str) -> i32 {
    // Scalar values top out at 0x10FFFF, well inside i32.
    fold(identifier.chars().map(|c| c as i32))
}

/// Same fold as [`identity_hash`], over UTF-16 code units.
///
/// Identical to [`identity_hash`] for identifiers made only of
/// Basic Multilingual Plane characters.
pub fn identity_hash_utf16(identifier: &str) -> i32 {
    fold(identifier.encode_utf16().map(i32::from))
}

fn fold(codes: impl Iterator<Item = i32>) -> i32 {
    codes.fold(0i32, |acc, code| {
        code.wrapping_add(acc.wrapping_shl(5).wrapping_sub(acc))
    })
}

fn hues_from_hash(hash: i32) -> [u16; 3] {
    // unsigned_abs so i32::MIN maps to 2^31 instead of overflowing
    let magnitude = hash.unsigned_abs();
    HUE_OFFSETS.map(|offset| ((magnitude as u64 + offset as u64) % 360) as u16)
}

fn gradient_from_hash(hash: i32) -> Gradient {
    let hues = hues_from_hash(hash);
    let mut stops = [Hsl::new(0, 0, 0); 3];
    for (i, stop) in stops.iter_mut().enumerate() {
        let (saturation, lightness) = STOP_TONES[i];
        *stop = Hsl::new(hues[i], saturation, lightness);
    }

    Gradient {
        angle: GRADIENT_ANGLE,
        stops,
    }
}

/// The three stop hues for an identifier, each in `[0, 360)`.
pub fn hues(identifier: &str) -> [u16; 3] {
    hues_from_hash(identity_hash(identifier))
}

/// Derives the gradient descriptor for an identifier.
///
/// # Arguments
/// * `identifier` - Any string, including empty and non-ASCII ones
///
/// # Returns
/// The same [`Gradient`] for the same identifier, always.
pub fn derive(identifier: &str) -> Gradient {
    gradient_from_hash(identity_hash(identifier))
}

/// Derives the gradient from the UTF-16 hash, see [`identity_hash_utf16`].
pub fn derive_utf16(identifier: &str) -> Gradient {
    gradient_from_hash(identity_hash_utf16(identifier))
}

/// Derives the gradient for an identifier and renders it as a CSS value.
pub fn gradient_css(identifier: &str) -> String {
    derive(identifier).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_identifier() {
        assert_eq!(identity_hash(""), 0);
        assert_eq!(hues(""), [0, 40, 80]);
        assert_eq!(
            gradient_css(""),
            "linear-gradient(135deg, hsl(0, 70%, 20%), hsl(40, 80%, 30%), hsl(80, 70%, 25%))"
        );
    }

    #[test]
    fn test_short_identifiers() {
        assert_eq!(identity_hash("a"), 97);
        assert_eq!(hues("a"), [97, 137, 177]);

        assert_eq!(identity_hash("ab"), 3105);
        assert_eq!(hues("ab"), [225, 265, 305]);
    }

    #[test]
    fn test_hash_wraps_as_i32() {
        assert_eq!(identity_hash("workspace-7f3a9c"), 1098819103);
        assert_eq!(
            identity_hash("the quick brown fox jumps over the lazy dog"),
            -2082818701
        );
        assert_eq!(
            hues("the quick brown fox jumps over the lazy dog"),
            [181, 221, 261]
        );
    }

    #[test]
    fn test_non_ascii_uses_code_points() {
        assert_eq!(identity_hash("Ωmega"), 868686747);
        assert_eq!(hues("Ωmega"), [267, 307, 347]);

        assert_eq!(identity_hash("🚀 launch"), -650885805);
        assert_eq!(hues("🚀 launch"), [45, 85, 125]);
    }

    #[test]
    fn test_utf16_hash_matches_code_units() {
        assert_eq!(identity_hash_utf16(""), 0);
        assert_eq!(identity_hash_utf16("Ωmega"), identity_hash("Ωmega"));
        assert_eq!(
            identity_hash_utf16("workspace-7f3a9c"),
            identity_hash("workspace-7f3a9c")
        );

        // 🚀 is a surrogate pair in UTF-16
        assert_eq!(identity_hash_utf16("🚀 launch"), -1575507824);
        assert_ne!(identity_hash_utf16("🚀 launch"), identity_hash("🚀 launch"));
        assert_eq!(derive_utf16("🚀 launch").hues(), [224, 264, 304]);
    }

    #[test]
    fn test_stop_tones() {
        let gradient = derive("ab");
        assert_eq!(gradient.angle, 135);
        assert_eq!(gradient.stops[0], Hsl::new(225, 70, 20));
        assert_eq!(gradient.stops[1], Hsl::new(265, 80, 30));
        assert_eq!(gradient.stops[2], Hsl::new(305, 70, 25));
        assert_eq!(gradient.hues(), [225, 265, 305]);
    }

    #[test]
    fn test_background_style() {
        assert_eq!(
            derive("a").background_style(),
            "background: linear-gradient(135deg, hsl(97, 70%, 20%), hsl(137, 80%, 30%), hsl(177, 70%, 25%));"
        );
    }

    #[test]
    fn test_gradient_serializes() {
        let value = serde_json::to_value(derive("")).unwrap();
        assert_eq!(value["angle"], 135);
        assert_eq!(value["stops"][1]["hue"], 40);
        assert_eq!(value["stops"][1]["saturation"], 80);
    }
}
