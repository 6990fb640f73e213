//! Scene runner
//!
//! Plays a scene table against the head, one decision per tick:
//!
//! ```text
//! Idle --start--> Running --past last entry--> Complete
//!   ^                |
//!   +------stop------+
//! ```
//!
//! While running, each tick whose time is past the next decision point
//! dispatches the next entry and schedules the following decision from the
//! entry's estimated duration and delay policy. Every tick advances the
//! head whatever the run phase, so moves in flight keep converging after a
//! stop.

use crate::mechanism::{Head, Limb, Percent, Side};
use crate::traits::{PointOfInterestSource, PwmOutput};

use super::scene::{DelayPolicy, Scene, SceneEntry, SceneId};
use super::table::{SceneError, SceneTable};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Time charged for an entry whose scene id is not recognized
///
/// Used as the entry's duration, so an `AfterMove` dwell still follows it.
/// `Immediate` chaining does not apply to unknown entries.
pub const UNKNOWN_SCENE_MS: u32 = 10_000;

/// Modifier used by modifier-driven scenes when the entry has none
pub const DEFAULT_MODIFIER: i16 = 50;

/// Run phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum RunPhase {
    /// Not running
    Idle,
    /// Playing the table
    Running,
    /// Played past the last entry
    Complete,
}

/// Events produced by [`SceneRunner::process`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SceneEvent {
    /// An entry was dispatched
    SceneStarted {
        index: usize,
        scene: SceneId,
        duration_ms: u32,
    },
    /// An entry named no known scene and was skipped
    UnknownScene { index: usize, scene: SceneId },
    /// The run played its last entry
    RunFinished,
}

/// Head call behind a scene: `(head, modifier, speed, now) -> estimated ms`
type SceneFn = fn(&mut Head, Option<i16>, u16, u64) -> u32;

/// Scene to head call mapping
///
/// Compound scenes are absent: the table stores them as plain eyelid
/// entries.
const DISPATCH_TABLE: &[(Scene, SceneFn)] = &[
    (Scene::EyesAheadOpen, eyes_ahead_open),
    (Scene::EyesAhead, eyes_ahead),
    (Scene::EyesRight, eyes_right),
    (Scene::EyesLeft, eyes_left),
    (Scene::EyesUp, eyes_up),
    (Scene::EyesDown, eyes_down),
    (Scene::EyesHorizontal, eyes_horizontal),
    (Scene::EyesVertical, eyes_vertical),
    (Scene::EyesClosed, eyes_closed),
    (Scene::EyesOpen, eyes_open),
    (Scene::EyesOpenWide, eyes_open_wide),
    (Scene::EyelidsTo, eyelids_to),
    (Scene::LeftEyelidsTo, left_eyelids_to),
    (Scene::RightEyelidsTo, right_eyelids_to),
];

fn modifier_percent(modifier: Option<i16>) -> Percent {
    Percent::from(modifier.unwrap_or(DEFAULT_MODIFIER))
}

fn eyes_ahead_open(head: &mut Head, _: Option<i16>, speed: u16, now: u64) -> u32 {
    let look = head.look_center(speed, now);
    let lids = head.set_eyes_openness(Percent::HALF, speed, now);
    look.max(lids)
}

fn eyes_ahead(head: &mut Head, _: Option<i16>, speed: u16, now: u64) -> u32 {
    head.look_center(speed, now)
}

fn eyes_right(head: &mut Head, _: Option<i16>, speed: u16, now: u64) -> u32 {
    head.look_horizontal(Percent::FULL, speed, now)
}

fn eyes_left(head: &mut Head, _: Option<i16>, speed: u16, now: u64) -> u32 {
    head.look_horizontal(Percent::ZERO, speed, now)
}

fn eyes_up(head: &mut Head, _: Option<i16>, speed: u16, now: u64) -> u32 {
    head.look_vertical(Percent::FULL, speed, now)
}

fn eyes_down(head: &mut Head, _: Option<i16>, speed: u16, now: u64) -> u32 {
    head.look_vertical(Percent::ZERO, speed, now)
}

fn eyes_horizontal(head: &mut Head, modifier: Option<i16>, speed: u16, now: u64) -> u32 {
    head.look_horizontal(modifier_percent(modifier), speed, now)
}

fn eyes_vertical(head: &mut Head, modifier: Option<i16>, speed: u16, now: u64) -> u32 {
    head.look_vertical(modifier_percent(modifier), speed, now)
}

fn eyes_closed(head: &mut Head, _: Option<i16>, speed: u16, now: u64) -> u32 {
    head.set_eyes_openness(Percent::ZERO, speed, now)
}

fn eyes_open(head: &mut Head, _: Option<i16>, speed: u16, now: u64) -> u32 {
    head.set_eyes_openness(Percent::HALF, speed, now)
}

fn eyes_open_wide(head: &mut Head, _: Option<i16>, speed: u16, now: u64) -> u32 {
    head.set_eyes_openness(Percent::FULL, speed, now)
}

fn eyelids_to(head: &mut Head, modifier: Option<i16>, speed: u16, now: u64) -> u32 {
    head.set_eyes_openness(modifier_percent(modifier), speed, now)
}

fn left_eyelids_to(head: &mut Head, modifier: Option<i16>, speed: u16, now: u64) -> u32 {
    head.set_side_openness(Side::Left, modifier_percent(modifier), speed, now)
}

fn right_eyelids_to(head: &mut Head, modifier: Option<i16>, speed: u16, now: u64) -> u32 {
    head.set_side_openness(Side::Right, modifier_percent(modifier), speed, now)
}

/// Start the head call for `entry`
///
/// # Returns
/// Estimated duration, or `None` if the entry names no dispatchable scene
pub fn dispatch(head: &mut Head, entry: &SceneEntry, now_ms: u64) -> Option<u32> {
    let scene = entry.scene.scene()?;
    DISPATCH_TABLE
        .iter()
        .find(|(s, _)| *s == scene)
        .map(|(_, call)| call(head, entry.modifier, entry.speed, now_ms))
}

/// Cooperative scene scheduler
///
/// Owns the scene table and the head. Drive it by calling
/// [`process`](Self::process) at a fixed rate with a monotonic time.
#[derive(Debug, Clone)]
pub struct SceneRunner {
    table: SceneTable,
    head: Head,
    phase: RunPhase,
    /// Index of the entry dispatched last, `None` before the first
    cursor: Option<usize>,
    /// Earliest time the next entry may be dispatched (strictly after)
    next_decision_ms: u64,
}

impl SceneRunner {
    /// Create an idle runner
    pub fn new(table: SceneTable, head: Head) -> Self {
        Self {
            table,
            head,
            phase: RunPhase::Idle,
            cursor: None,
            next_decision_ms: 0,
        }
    }

    /// Drive every servo to its rest position
    pub fn initialize<P: PwmOutput + ?Sized>(&mut self, pwm: &mut P) {
        self.head.initialize(pwm);
    }

    /// Play the table from the first entry
    pub fn start(&mut self, now_ms: u64) {
        info!("scene run started ({} entries)", self.table.len());
        self.cursor = None;
        self.next_decision_ms = now_ms;
        self.phase = RunPhase::Running;
    }

    /// Stop after the current entry
    ///
    /// The cursor is kept; moves in flight are not interrupted.
    pub fn stop(&mut self) {
        if self.phase == RunPhase::Running {
            info!("scene run stopped at {}", self.cursor);
            self.phase = RunPhase::Idle;
        }
    }

    /// Continue a stopped run from its cursor
    ///
    /// A completed run starts over.
    pub fn resume(&mut self, now_ms: u64) {
        match self.phase {
            RunPhase::Idle => {
                info!("scene run resumed at {}", self.cursor);
                self.phase = RunPhase::Running;
            }
            RunPhase::Complete => self.start(now_ms),
            RunPhase::Running => {}
        }
    }

    /// Stop and empty the table
    pub fn clear(&mut self) {
        self.table.clear();
        self.cursor = None;
        self.phase = RunPhase::Idle;
    }

    /// Append a scene to the table
    pub fn add(
        &mut self,
        scene: impl Into<SceneId>,
        modifier: Option<i16>,
        speed: u16,
        delay: DelayPolicy,
    ) -> Result<(), SceneError> {
        self.table.add(scene, modifier, speed, delay)
    }

    /// Check if a run is in progress
    pub fn is_running(&self) -> bool {
        self.phase == RunPhase::Running
    }

    /// Current run phase
    pub fn phase(&self) -> RunPhase {
        self.phase
    }

    /// Index of the entry last dispatched
    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    /// Time after which the next entry is dispatched
    pub fn next_decision_ms(&self) -> u64 {
        self.next_decision_ms
    }

    /// Entries of the scene table
    pub fn entries(&self) -> &[SceneEntry] {
        self.table.entries()
    }

    /// Scene table being played
    pub fn table(&self) -> &SceneTable {
        &self.table
    }

    /// Head driven by the run
    pub fn head(&self) -> &Head {
        &self.head
    }

    /// Direct access to the head for moves outside the table
    pub fn head_mut(&mut self) -> &mut Head {
        &mut self.head
    }

    /// Aim the eyes at the sensor's point of interest
    ///
    /// Only acts while no run is in progress, since a running table owns
    /// the eyes.
    ///
    /// # Returns
    /// Estimated duration of the move, 0 if nothing moved
    pub fn track<S: PointOfInterestSource + ?Sized>(
        &mut self,
        source: &mut S,
        speed: u16,
        now_ms: u64,
    ) -> u32 {
        if self.is_running() {
            return 0;
        }
        let point = source.point_of_interest();
        self.head.look_at(&point, speed, now_ms)
    }

    /// Run one scheduler tick
    ///
    /// # Returns
    /// The event produced by this tick, if any
    pub fn process<P: PwmOutput + ?Sized>(
        &mut self,
        now_ms: u64,
        pwm: &mut P,
    ) -> Option<SceneEvent> {
        let event = if self.is_running() && now_ms > self.next_decision_ms {
            Some(self.advance_cursor(now_ms))
        } else {
            None
        };

        self.head.advance(now_ms, pwm);
        event
    }

    fn advance_cursor(&mut self, now_ms: u64) -> SceneEvent {
        let index = self.cursor.map_or(0, |c| c + 1);

        let Some(entry) = self.table.get(index).copied() else {
            info!("scene run finished after {} entries", self.table.len());
            self.phase = RunPhase::Complete;
            return SceneEvent::RunFinished;
        };
        self.cursor = Some(index);

        match dispatch(&mut self.head, &entry, now_ms) {
            Some(duration_ms) => {
                if let DelayPolicy::AfterMove(dwell_ms) = entry.delay {
                    self.next_decision_ms = now_ms + duration_ms as u64 + dwell_ms as u64;
                }
                trace!(
                    "scene {} (id {}) for {} ms, next at {}",
                    index,
                    entry.scene.0,
                    duration_ms,
                    self.next_decision_ms
                );
                SceneEvent::SceneStarted {
                    index,
                    scene: entry.scene,
                    duration_ms,
                }
            }
            None => {
                error!("scene {}: unknown scene id {}", index, entry.scene.0);
                let dwell_ms = match entry.delay {
                    DelayPolicy::AfterMove(dwell_ms) => dwell_ms as u64,
                    DelayPolicy::Immediate => 0,
                };
                self.next_decision_ms = now_ms + UNKNOWN_SCENE_MS as u64 + dwell_ms;
                SceneEvent::UnknownScene {
                    index,
                    scene: entry.scene,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HeadCalibration;
    use crate::motion::{MotionProfile, MOVE_SPEED_FAST};
    use crate::traits::PointOfInterest;
    use heapless::Vec;

    /// Counts writes and keeps the last one
    #[derive(Default)]
    struct RecordingPwm {
        count: usize,
        last: Option<(u8, u16, u16)>,
    }

    impl PwmOutput for RecordingPwm {
        fn set_pwm(&mut self, channel: u8, on: u16, off: u16) {
            self.count += 1;
            self.last = Some((channel, on, off));
        }
    }

    struct FixedSource(PointOfInterest);

    impl PointOfInterestSource for FixedSource {
        fn point_of_interest(&mut self) -> PointOfInterest {
            self.0
        }
    }

    fn runner(entries: &[SceneEntry]) -> SceneRunner {
        let mut table = SceneTable::new();
        table.load(entries).unwrap();
        let head = Head::new(&HeadCalibration::BOBG, MotionProfile::Linear, 1);
        SceneRunner::new(table, head)
    }

    fn entry(scene: impl Into<SceneId>, delay: DelayPolicy) -> SceneEntry {
        SceneEntry::new(scene, None, MOVE_SPEED_FAST, delay)
    }

    /// Tick once per ms over `range`, collecting `(time, event)` pairs
    fn run(
        runner: &mut SceneRunner,
        pwm: &mut RecordingPwm,
        range: core::ops::Range<u64>,
    ) -> Vec<(u64, SceneEvent), 32> {
        let mut events = Vec::new();
        for now in range {
            if let Some(event) = runner.process(now, pwm) {
                events.push((now, event)).unwrap();
            }
        }
        events
    }

    fn duration(event: &SceneEvent) -> u64 {
        match event {
            SceneEvent::SceneStarted { duration_ms, .. } => *duration_ms as u64,
            _ => panic!("not a scene start: {:?}", event),
        }
    }

    #[test]
    fn test_three_entries_ending_immediate() {
        let mut pwm = RecordingPwm::default();
        let mut runner = runner(&[
            entry(Scene::EyesLeft, DelayPolicy::AfterMove(0)),
            entry(Scene::EyesRight, DelayPolicy::AfterMove(20)),
            entry(Scene::EyesUp, DelayPolicy::Immediate),
        ]);
        runner.initialize(&mut pwm);
        runner.start(0);

        let events = run(&mut runner, &mut pwm, 0..2_000);
        assert_eq!(events.len(), 4);

        let (t0, e0) = events[0];
        assert_eq!(t0, 1);
        assert!(matches!(e0, SceneEvent::SceneStarted { index: 0, .. }));

        let (t1, e1) = events[1];
        assert_eq!(t1, t0 + duration(&e0) + 1);
        assert!(matches!(e1, SceneEvent::SceneStarted { index: 1, .. }));

        let (t2, e2) = events[2];
        assert_eq!(t2, t1 + duration(&e1) + 20 + 1);
        assert!(matches!(
            e2,
            SceneEvent::SceneStarted { index: 2, scene, .. } if scene == SceneId::from(Scene::EyesUp)
        ));

        // Immediate: the very next tick finishes the run
        assert_eq!(events[3], (t2 + 1, SceneEvent::RunFinished));
        assert!(!runner.is_running());
        assert_eq!(runner.phase(), RunPhase::Complete);
        assert_eq!(runner.process(5_000, &mut pwm), None);
    }

    #[test]
    fn test_no_dispatch_at_decision_time() {
        let mut pwm = RecordingPwm::default();
        let mut runner = runner(&[entry(Scene::EyesAhead, DelayPolicy::AfterMove(0))]);
        runner.start(100);

        assert_eq!(runner.process(100, &mut pwm), None);
        assert!(runner.process(101, &mut pwm).is_some());
        assert_eq!(runner.cursor(), Some(0));
    }

    #[test]
    fn test_immediate_chains_on_next_tick() {
        let mut pwm = RecordingPwm::default();
        let mut runner = runner(&[
            entry(Scene::EyesLeft, DelayPolicy::Immediate),
            entry(Scene::EyesOpenWide, DelayPolicy::AfterMove(0)),
        ]);
        runner.initialize(&mut pwm);
        runner.start(0);

        let events = run(&mut runner, &mut pwm, 1..3);
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].0, 1);
        assert_eq!(events[1].0, 2);
        assert!(matches!(events[1].1, SceneEvent::SceneStarted { index: 1, .. }));

        // Both moves overlap
        assert!(!runner.head().eyeballs().is_at_rest());
        assert!(!runner.head().eyelids(Side::Left).0.is_at_rest());
    }

    #[test]
    fn test_last_entry_is_played() {
        let mut pwm = RecordingPwm::default();
        let mut runner = runner(&[entry(Scene::EyesDown, DelayPolicy::AfterMove(0))]);
        runner.initialize(&mut pwm);
        runner.start(0);

        let events = run(&mut runner, &mut pwm, 1..1_000);
        assert_eq!(events.len(), 2);
        assert_eq!(runner.head().eyeballs().y().destination(), 440 - 108);
        assert_eq!(events[1].1, SceneEvent::RunFinished);
    }

    #[test]
    fn test_unknown_scene_waits_sentinel() {
        let mut pwm = RecordingPwm::default();
        let mut runner = runner(&[
            entry(SceneId(200), DelayPolicy::Immediate),
            entry(Scene::EyesUp, DelayPolicy::AfterMove(0)),
        ]);
        runner.start(0);

        assert_eq!(
            runner.process(1, &mut pwm),
            Some(SceneEvent::UnknownScene {
                index: 0,
                scene: SceneId(200)
            })
        );
        assert_eq!(runner.next_decision_ms(), 1 + UNKNOWN_SCENE_MS as u64);
        assert_eq!(runner.process(2, &mut pwm), None);
        assert_eq!(runner.process(10_001, &mut pwm), None);
        assert!(matches!(
            runner.process(10_002, &mut pwm),
            Some(SceneEvent::SceneStarted { index: 1, .. })
        ));
    }

    #[test]
    fn test_unknown_scene_keeps_dwell() {
        let mut pwm = RecordingPwm::default();
        let mut runner = runner(&[
            entry(SceneId(200), DelayPolicy::AfterMove(5_000)),
            entry(Scene::EyesUp, DelayPolicy::AfterMove(0)),
        ]);
        runner.start(0);

        assert!(matches!(
            runner.process(1, &mut pwm),
            Some(SceneEvent::UnknownScene { index: 0, .. })
        ));
        assert_eq!(runner.next_decision_ms(), 1 + UNKNOWN_SCENE_MS as u64 + 5_000);
        assert_eq!(runner.process(15_001, &mut pwm), None);
        assert!(matches!(
            runner.process(15_002, &mut pwm),
            Some(SceneEvent::SceneStarted { index: 1, .. })
        ));
    }

    #[test]
    fn test_empty_table_finishes_immediately() {
        let mut pwm = RecordingPwm::default();
        let mut runner = runner(&[]);
        runner.start(0);
        assert_eq!(runner.process(1, &mut pwm), Some(SceneEvent::RunFinished));
        assert!(!runner.is_running());
    }

    #[test]
    fn test_stop_keeps_motion_and_cursor() {
        let mut pwm = RecordingPwm::default();
        let mut runner = runner(&[
            entry(Scene::EyesLeft, DelayPolicy::AfterMove(0)),
            entry(Scene::EyesRight, DelayPolicy::AfterMove(0)),
        ]);
        runner.initialize(&mut pwm);
        runner.start(0);
        runner.process(1, &mut pwm);
        runner.stop();
        assert_eq!(runner.phase(), RunPhase::Idle);

        let writes_before = pwm.count;
        let events = run(&mut runner, &mut pwm, 2..500);
        assert!(events.is_empty());
        assert!(pwm.count > writes_before);
        assert_eq!(runner.cursor(), Some(0));
        assert!(runner.head().eyeballs().is_at_rest());

        runner.resume(500);
        assert!(matches!(
            runner.process(501, &mut pwm),
            Some(SceneEvent::SceneStarted { index: 1, .. })
        ));
    }

    #[test]
    fn test_resume_after_completion_restarts() {
        let mut pwm = RecordingPwm::default();
        let mut runner = runner(&[entry(Scene::EyesAhead, DelayPolicy::Immediate)]);
        runner.start(0);
        run(&mut runner, &mut pwm, 1..5);
        assert_eq!(runner.phase(), RunPhase::Complete);

        runner.resume(10);
        assert!(runner.is_running());
        assert_eq!(runner.cursor(), None);
        assert!(matches!(
            runner.process(11, &mut pwm),
            Some(SceneEvent::SceneStarted { index: 0, .. })
        ));
    }

    #[test]
    fn test_clear() {
        let mut pwm = RecordingPwm::default();
        let mut runner = runner(&[entry(Scene::EyesAhead, DelayPolicy::AfterMove(0))]);
        runner.start(0);
        runner.process(1, &mut pwm);
        runner.clear();

        assert!(runner.entries().is_empty());
        assert_eq!(runner.cursor(), None);
        assert!(!runner.is_running());
        assert_eq!(runner.process(2, &mut pwm), None);
    }

    #[test]
    fn test_add_while_running() {
        let mut pwm = RecordingPwm::default();
        let mut runner = runner(&[entry(Scene::EyesAhead, DelayPolicy::Immediate)]);
        runner.start(0);
        runner.process(1, &mut pwm);
        runner
            .add(Scene::EyesUp, None, MOVE_SPEED_FAST, DelayPolicy::Immediate)
            .unwrap();
        assert!(matches!(
            runner.process(2, &mut pwm),
            Some(SceneEvent::SceneStarted { index: 1, .. })
        ));
    }

    #[test]
    fn test_blink_reopens_after_close_completes() {
        let mut pwm = RecordingPwm::default();
        let mut runner = runner(&[
            SceneEntry::new(Scene::EyesOpenWide, None, 100, DelayPolicy::AfterMove(0)),
            entry(Scene::Blink, DelayPolicy::AfterMove(0)),
        ]);
        assert_eq!(runner.entries().len(), 3);
        assert!(runner.entries()[1..].iter().all(|e| e.speed == MOVE_SPEED_FAST));
        runner.initialize(&mut pwm);
        runner.start(0);

        let closed = HeadCalibration::BOBG.left_upper.closed;
        let mut lid_before = (0, false);
        let mut reopened = false;
        for now in 1..2_000 {
            let event = runner.process(now, &mut pwm);
            if let Some(SceneEvent::SceneStarted { index: 2, .. }) = event {
                // Previous tick had the lid fully shut
                assert_eq!(lid_before, (closed, true));
                reopened = true;
                break;
            }
            let lid = runner.head().eyelids(Side::Left).0;
            lid_before = (lid.actuator().position(), lid.is_at_rest());
        }
        assert!(reopened);
        assert_eq!(runner.head().eyelids(Side::Left).0.actuator().destination(), 391);
    }

    #[test]
    fn test_eyes_ahead_open_reports_longest_move() {
        let head = Head::new(&HeadCalibration::BOBG, MotionProfile::Linear, 1);
        let look = head.clone().look_center(1, 0);
        let lids = head.clone().set_eyes_openness(Percent::HALF, 1, 0);

        let mut dispatched = head.clone();
        let entry = SceneEntry::new(Scene::EyesAheadOpen, None, 1, DelayPolicy::default());
        assert_eq!(dispatch(&mut dispatched, &entry, 0), Some(look.max(lids)));
    }

    #[test]
    fn test_modifier_defaults_to_half() {
        let mut head = Head::new(&HeadCalibration::BOBG, MotionProfile::Linear, 1);
        let centered = SceneEntry::new(Scene::EyesHorizontal, None, 1, DelayPolicy::default());
        dispatch(&mut head, &centered, 0);
        assert_eq!(head.eyeballs().x().destination(), 380);

        let left = SceneEntry {
            modifier: Some(0),
            ..centered
        };
        dispatch(&mut head, &left, 0);
        assert_eq!(head.eyeballs().x().destination(), 469);
    }

    #[test]
    fn test_every_plain_scene_dispatches() {
        for scene in Scene::ALL {
            let mut head = Head::new(&HeadCalibration::JIMS, MotionProfile::Decay, 1);
            let entry = SceneEntry::new(scene, Some(30), 5, DelayPolicy::default());
            assert_eq!(dispatch(&mut head, &entry, 0).is_some(), !scene.is_compound());
        }
    }

    #[test]
    fn test_track_only_when_idle() {
        let mut pwm = RecordingPwm::default();
        let mut source = FixedSource(PointOfInterest {
            detected_at_ms: 0,
            distance_mm: 300,
            focus: Some((0, 3)),
        });
        let mut runner = runner(&[entry(Scene::EyesUp, DelayPolicy::AfterMove(0))]);

        assert!(runner.track(&mut source, MOVE_SPEED_FAST, 0) > 0);
        assert_eq!(runner.head().eyeballs().x().destination(), 469);

        runner.start(0);
        runner.process(1, &mut pwm);
        let y = runner.head().eyeballs().y().destination();
        source.0.focus = Some((7, 7));
        assert_eq!(runner.track(&mut source, MOVE_SPEED_FAST, 2), 0);
        assert_eq!(runner.head().eyeballs().x().destination(), 469);
        assert_eq!(runner.head().eyeballs().y().destination(), y);
    }
}
