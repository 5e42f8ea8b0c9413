//! Domain DTOs for the character catalog.
//!
//! # Design
//! The enumerations travel as string labels (`"Rebellion"`, `"Prequel"`), and
//! the casing of those labels is part of the wire contract. Each enumeration
//! therefore carries an explicit label table that drives `Display`, `FromStr`
//! and the serde impls, instead of relying on derived variant names. An
//! unrecognized label is always an error, never a silent default.
//!
//! `Character` ignores JSON fields it does not know about so the catalog can
//! grow its schema without breaking older clients.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Documented upper bound on `Character::name`, in characters. The catalog
/// enforces it; the client does not.
pub const MAX_NAME_LEN: usize = 850;

/// A label that matches no variant of the target enumeration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} label `{label}`")]
pub struct ParseLabelError {
    pub kind: &'static str,
    pub label: String,
}

macro_rules! labelled_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:literal {
            $( $(#[$vmeta:meta])* $variant:ident => $label:literal, )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
        pub enum $name {
            #[default]
            $( $(#[$vmeta])* $variant, )+
        }

        impl $name {
            /// Every variant, in wire-label order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Variant-to-label table; the single source of truth for the wire form.
            const LABELS: &'static [($name, &'static str)] = &[$(($name::$variant, $label)),+];

            const LABEL_NAMES: &'static [&'static str] = &[$($label),+];

            pub fn label(self) -> &'static str {
                Self::LABELS
                    .iter()
                    .find(|(variant, _)| *variant == self)
                    .map(|(_, label)| *label)
                    .unwrap_or_default()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }

        impl FromStr for $name {
            type Err = ParseLabelError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::LABELS
                    .iter()
                    .find(|(_, label)| *label == s)
                    .map(|(variant, _)| *variant)
                    .ok_or_else(|| ParseLabelError {
                        kind: $kind,
                        label: s.to_string(),
                    })
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.label())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let label = String::deserialize(deserializer)?;
                label
                    .parse()
                    .map_err(|_| serde::de::Error::unknown_variant(&label, Self::LABEL_NAMES))
            }
        }
    };
}

labelled_enum! {
    /// Factional affiliation of a character.
    Allegiance, "allegiance" {
        /// No allegiance.
        None => "None",
        /// The Rebel Alliance, its forerunners, or the New Republic.
        Rebellion => "Rebellion",
        /// The Galactic Empire, the Imperial Remnant, or the First Order.
        Empire => "Empire",
    }
}

labelled_enum! {
    /// Film trilogy in which a character first appears.
    Trilogy, "trilogy" {
        None => "None",
        /// Episodes IV to VI.
        Original => "Original",
        /// Episodes I to III.
        Prequel => "Prequel",
        /// Episodes VII to IX.
        Sequel => "Sequel",
    }
}

/// A single character returned by the catalog.
///
/// Fields missing from the body take their default (`0`, empty, `None`,
/// `false`); fields that are present must be well-formed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Character {
    /// Assigned by the catalog.
    pub id: i32,
    /// Unique within the catalog; see [`MAX_NAME_LEN`].
    pub name: String,
    pub allegiance: Allegiance,
    pub trilogy_introduced_in: Trilogy,
    pub is_jedi: bool,
}
