//! Scene scheduling
//!
//! A scene table lists canonical head motions in playback order. The
//! runner dispatches them one at a time, chaining by estimated move
//! duration and each entry's delay policy.

pub mod runner;
pub mod scene;
pub mod table;

pub use runner::{dispatch, RunPhase, SceneEvent, SceneRunner, DEFAULT_MODIFIER, UNKNOWN_SCENE_MS};
pub use scene::{DelayPolicy, Scene, SceneEntry, SceneId, BLINK_REOPEN_PERCENT};
pub use table::{SceneError, SceneTable, MAX_SCENES};
