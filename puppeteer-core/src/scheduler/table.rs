//! Scene table
//!
//! Ordered, bounded list of scene entries. Entries are appended in playback
//! order and never modified afterwards; the only way to change the table is
//! to clear it.

use heapless::Vec;

use super::scene::{DelayPolicy, Scene, SceneEntry, SceneId};

/// Hard capacity of a scene table
pub const MAX_SCENES: usize = 100;

/// Errors from scene table operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SceneError {
    /// Not enough free entries; the table is unchanged
    CapacityExceeded,
    /// Scene name not recognized
    UnknownScene,
}

/// Bounded scene table
#[derive(Debug, Clone)]
pub struct SceneTable {
    entries: Vec<SceneEntry, MAX_SCENES>,
    /// Runtime capacity, never above [`MAX_SCENES`]
    limit: usize,
}

impl Default for SceneTable {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneTable {
    /// Create an empty table with the full capacity
    pub fn new() -> Self {
        Self::with_limit(MAX_SCENES)
    }

    /// Create an empty table holding at most `limit` entries
    pub fn with_limit(limit: usize) -> Self {
        Self {
            entries: Vec::new(),
            limit: limit.min(MAX_SCENES),
        }
    }

    /// Append a scene
    ///
    /// Compound scenes take two entries and are added whole or not at all.
    pub fn add(
        &mut self,
        scene: impl Into<SceneId>,
        modifier: Option<i16>,
        speed: u16,
        delay: DelayPolicy,
    ) -> Result<(), SceneError> {
        self.push(SceneEntry::new(scene, modifier, speed, delay))
    }

    /// Append a scene given by its config file name
    pub fn add_named(
        &mut self,
        name: &str,
        modifier: Option<i16>,
        speed: u16,
        delay: DelayPolicy,
    ) -> Result<(), SceneError> {
        let scene = Scene::from_name(name).ok_or(SceneError::UnknownScene)?;
        self.add(scene, modifier, speed, delay)
    }

    /// Append an entry, expanding compound scenes
    pub fn push(&mut self, entry: SceneEntry) -> Result<(), SceneError> {
        let expanded = entry.expand();
        if expanded.len() > self.remaining() {
            warn!(
                "scene table full ({}/{}), dropping scene {}",
                self.entries.len(),
                self.limit,
                entry.scene.0
            );
            return Err(SceneError::CapacityExceeded);
        }

        for phase in expanded {
            self.entries
                .push(phase)
                .map_err(|_| SceneError::CapacityExceeded)?;
        }
        Ok(())
    }

    /// Append a list of entries in order
    ///
    /// Stops at the first entry that does not fit; earlier entries stay.
    pub fn load(&mut self, entries: &[SceneEntry]) -> Result<(), SceneError> {
        entries.iter().try_for_each(|entry| self.push(*entry))
    }

    /// Remove every entry
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of stored entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if no entries are stored
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Runtime capacity
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Free entries left
    pub fn remaining(&self) -> usize {
        self.limit.saturating_sub(self.entries.len())
    }

    /// Entry at `index`, if stored
    pub fn get(&self, index: usize) -> Option<&SceneEntry> {
        self.entries.get(index)
    }

    /// Stored entries in play order
    pub fn entries(&self) -> &[SceneEntry] {
        &self.entries
    }
}
