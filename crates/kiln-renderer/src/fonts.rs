//! Fixed-capacity font registry
//!
//! Fonts are loaded by the application and handed over as opaque handles
//! during startup. Ids are stable for the registry's lifetime: there is no
//! removal, and a full registry refuses new fonts without changing state.

use kiln_core::{kiln_debug, kiln_warn, KilnError, LogCategory, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Small integer handle to a registered font
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FontId(i32);

impl FontId {
    /// The backend's built-in font
    pub const SYSTEM: FontId = FontId(0);
    /// Returned to callers that want a sentinel instead of an error
    pub const INVALID: FontId = FontId(-1);

    pub const fn from_raw(raw: i32) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> i32 {
        self.0
    }

    pub const fn is_system(self) -> bool {
        self.0 == Self::SYSTEM.0
    }

    /// Slot in the registry table, if this id can name a registered font
    fn slot(self) -> Option<usize> {
        usize::try_from(self.0).ok()?.checked_sub(1)
    }
}

impl Default for FontId {
    fn default() -> Self {
        Self::SYSTEM
    }
}

impl fmt::Display for FontId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Append-only table of font handles
pub struct FontRegistry<F> {
    fonts: Vec<F>,
    capacity: usize,
}

impl<F> FontRegistry<F> {
    /// Create an empty registry holding at most `capacity` fonts
    pub fn new(capacity: usize) -> Self {
        Self {
            fonts: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Register a font and return its id.
    ///
    /// Ids are handed out contiguously starting right after [`FontId::SYSTEM`].
    /// Registering the same font twice yields two ids.
    pub fn register(&mut self, font: F) -> Result<FontId> {
        if self.is_full() {
            kiln_warn!(
                LogCategory::Fonts,
                "font registry full, rejecting font (capacity={})",
                self.capacity
            );
            return Err(KilnError::FontRegistryFull {
                capacity: self.capacity,
            });
        }

        self.fonts.push(font);
        // Capacity is validated to fit in i32 by RendererConfig.
        let id = FontId(self.fonts.len() as i32);
        kiln_debug!(LogCategory::Fonts, "registered font id={}", id);
        Ok(id)
    }

    /// Look up a font. The system id, the invalid id and unknown ids all
    /// resolve to `None`, meaning "use the system font".
    pub fn resolve(&self, id: FontId) -> Option<&F> {
        self.fonts.get(id.slot()?)
    }

    /// Iterate registered fonts in id order
    pub fn iter(&self) -> impl Iterator<Item = (FontId, &F)> {
        self.fonts
            .iter()
            .enumerate()
            .map(|(slot, font)| (FontId(slot as i32 + 1), font))
    }

    pub fn len(&self) -> usize {
        self.fonts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_full(&self) -> bool {
        self.fonts.len() >= self.capacity
    }
}

impl<F> fmt::Debug for FontRegistry<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FontRegistry")
            .field("len", &self.fonts.len())
            .field("capacity", &self.capacity)
            .finish()
    }
}
