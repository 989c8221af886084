//! Module kind tags using string interning for cheap copies and comparisons
//!
//! This module provides the [`ModuleKind`] type. Kinds are opaque to the
//! layout engine beyond being copied onto every placement and used as the key
//! of footprint lookups.

use std::{
    fmt,
    sync::{Mutex, MutexGuard, OnceLock},
};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use string_interner::{DefaultStringInterner, DefaultSymbol};

/// Global string interner for module kind names.
///
/// # Thread Safety
///
/// This uses `Mutex` for thread-safe access to the string interner.
static INTERNER: OnceLock<Mutex<DefaultStringInterner>> = OnceLock::new();

fn interner() -> MutexGuard<'static, DefaultStringInterner> {
    INTERNER
        .get_or_init(|| Mutex::new(DefaultStringInterner::new()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Interned tag identifying the kind of a module (e.g. a container class).
///
/// # Examples
///
/// ```
/// use gantry_core::identifier::ModuleKind;
///
/// let hd5 = ModuleKind::new("HD5");
/// assert_eq!(hd5, ModuleKind::default());
/// assert_eq!(hd5, "HD5");
///
/// let transformer: ModuleKind = "TRANSFORMER".into();
/// assert_ne!(transformer, hd5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ModuleKind(DefaultSymbol);

impl ModuleKind {
    /// Name of the single module class the command grammar produces.
    pub const DEFAULT_NAME: &'static str = "HD5";

    /// Creates a `ModuleKind` from &str.
    pub fn new(name: &str) -> Self {
        Self(interner().get_or_intern(name))
    }
}

impl Default for ModuleKind {
    fn default() -> Self {
        Self::new(Self::DEFAULT_NAME)
    }
}

impl fmt::Display for ModuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let interner = interner();
        let name = interner.resolve(self.0).unwrap_or_default();
        write!(f, "{name}")
    }
}

impl std::str::FromStr for ModuleKind {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

impl From<&str> for ModuleKind {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl PartialEq<str> for ModuleKind {
    /// Allows direct comparison with string slices: `kind == "HD5"`
    fn eq(&self, other: &str) -> bool {
        interner().resolve(self.0) == Some(other)
    }
}

impl PartialEq<&str> for ModuleKind {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

impl Serialize for ModuleKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ModuleKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(Self::new(&name))
    }
}
