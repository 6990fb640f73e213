//! Scene identifiers and table entries
//!
//! A scene names one canonical motion of the head. Blink and the two winks
//! are compound: they are stored as two plain eyelid entries so that no
//! scene ever has to wait inside a tick.

use heapless::Vec;

use crate::motion::MOVE_SPEED_FAST;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Lid openness a blink or wink returns to
pub const BLINK_REOPEN_PERCENT: i16 = 50;

/// Canonical motions
///
/// Discriminants are the raw scene ids used in configuration files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(u8)]
pub enum Scene {
    /// Center the eyes and half-open the lids
    EyesAheadOpen = 0,
    /// Center the eyes
    EyesAhead = 1,
    EyesRight = 2,
    EyesLeft = 3,
    EyesUp = 4,
    EyesDown = 5,
    EyesClosed = 6,
    /// Lids half open
    EyesOpen = 7,
    EyesOpenWide = 8,
    WinkLeft = 9,
    WinkRight = 10,
    Blink = 11,
    /// Horizontal position from the modifier
    EyesHorizontal = 12,
    /// Vertical position from the modifier
    EyesVertical = 13,
    /// All lids to the modifier
    EyelidsTo = 14,
    /// Left lids to the modifier
    LeftEyelidsTo = 15,
    /// Right lids to the modifier
    RightEyelidsTo = 16,
}

impl Scene {
    /// Every scene, in raw id order
    pub const ALL: [Scene; 17] = [
        Scene::EyesAheadOpen,
        Scene::EyesAhead,
        Scene::EyesRight,
        Scene::EyesLeft,
        Scene::EyesUp,
        Scene::EyesDown,
        Scene::EyesClosed,
        Scene::EyesOpen,
        Scene::EyesOpenWide,
        Scene::WinkLeft,
        Scene::WinkRight,
        Scene::Blink,
        Scene::EyesHorizontal,
        Scene::EyesVertical,
        Scene::EyelidsTo,
        Scene::LeftEyelidsTo,
        Scene::RightEyelidsTo,
    ];

    /// Raw scene id
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Look up a raw scene id
    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.get(code as usize).copied()
    }

    /// Config file spelling
    pub fn name(self) -> &'static str {
        match self {
            Scene::EyesAheadOpen => "eyes_ahead_open",
            Scene::EyesAhead => "eyes_ahead",
            Scene::EyesRight => "eyes_right",
            Scene::EyesLeft => "eyes_left",
            Scene::EyesUp => "eyes_up",
            Scene::EyesDown => "eyes_down",
            Scene::EyesClosed => "eyes_closed",
            Scene::EyesOpen => "eyes_open",
            Scene::EyesOpenWide => "eyes_open_wide",
            Scene::WinkLeft => "wink_left",
            Scene::WinkRight => "wink_right",
            Scene::Blink => "blink",
            Scene::EyesHorizontal => "eyes_horizontal",
            Scene::EyesVertical => "eyes_vertical",
            Scene::EyelidsTo => "eyelids_to",
            Scene::LeftEyelidsTo => "left_eyelids_to",
            Scene::RightEyelidsTo => "right_eyelids_to",
        }
    }

    /// Parse the config file spelling
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|scene| scene.name() == name)
    }

    /// Check if this scene is stored as more than one table entry
    pub const fn is_compound(self) -> bool {
        matches!(self, Scene::Blink | Scene::WinkLeft | Scene::WinkRight)
    }
}

/// Raw scene id as stored in the table
///
/// May hold an id no [`Scene`] answers to; such entries are reported when
/// dispatched rather than rejected on load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SceneId(pub u8);

impl SceneId {
    /// The scene this id names, if any
    pub fn scene(self) -> Option<Scene> {
        Scene::from_code(self.0)
    }
}

impl From<Scene> for SceneId {
    fn from(scene: Scene) -> Self {
        SceneId(scene.code())
    }
}

/// What the scheduler does once a scene is dispatched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DelayPolicy {
    /// Wait for the estimated move duration plus this many ms
    AfterMove(u32),
    /// Dispatch the next entry on the very next tick
    Immediate,
}

impl DelayPolicy {
    /// Convert a raw config value (`-1` means immediate)
    pub fn from_raw(raw: i32) -> Self {
        if raw < 0 {
            DelayPolicy::Immediate
        } else {
            DelayPolicy::AfterMove(raw as u32)
        }
    }
}

impl Default for DelayPolicy {
    fn default() -> Self {
        DelayPolicy::AfterMove(0)
    }
}

/// One row of the scene table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SceneEntry {
    pub scene: SceneId,
    /// Scene argument, usually a percentage
    pub modifier: Option<i16>,
    pub speed: u16,
    pub delay: DelayPolicy,
}

impl SceneEntry {
    /// Create an entry
    pub fn new(
        scene: impl Into<SceneId>,
        modifier: Option<i16>,
        speed: u16,
        delay: DelayPolicy,
    ) -> Self {
        Self {
            scene: scene.into(),
            modifier,
            speed,
            delay,
        }
    }

    /// Table entries this entry is stored as
    ///
    /// Plain scenes store as themselves. A blink closes every lid at fast
    /// speed, waits for the close to finish, then reopens to half at fast
    /// speed with the caller's delay; a wink does the same to one eye. The
    /// caller's speed and modifier do not apply to compound scenes.
    pub fn expand(self) -> Vec<SceneEntry, 2> {
        let lids = match self.scene.scene() {
            Some(Scene::Blink) => Scene::EyelidsTo,
            Some(Scene::WinkLeft) => Scene::LeftEyelidsTo,
            Some(Scene::WinkRight) => Scene::RightEyelidsTo,
            _ => return Vec::from_slice(&[self]).unwrap_or_default(),
        };

        let close = SceneEntry::new(lids, Some(0), MOVE_SPEED_FAST, DelayPolicy::AfterMove(0));
        let reopen = SceneEntry::new(
            lids,
            Some(BLINK_REOPEN_PERCENT),
            MOVE_SPEED_FAST,
            self.delay,
        );
        Vec::from_slice(&[close, reopen]).unwrap_or_default()
    }
}
