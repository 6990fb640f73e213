//! Simple TOML parser for puppet configuration
//!
//! This is a minimal, allocation-free TOML parser that handles only the
//! subset needed for `puppet.toml`. It does NOT support all of TOML.
//!
//! Supported features:
//! - Key = value pairs (string, integer, boolean)
//! - [section] headers
//! - [section.subsection] headers
//! - [[scene]] array-of-tables headers
//! - Comments (# ...)
//!
//! NOT supported:
//! - Multi-line strings
//! - Arrays and inline tables
//! - Dotted keys outside section headers
//!
//! Unknown keys are ignored so older firmware accepts newer files.

use super::calibration::{EyelidCalibration, HeadCalibration};
use super::types::PuppetConfig;
use crate::motion::{MotionProfile, MOVE_SPEED_FAST};
use crate::scheduler::{DelayPolicy, Scene, SceneEntry, SceneId};

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Invalid or unknown section header
    InvalidSection,
    /// Invalid value type
    InvalidValue,
    /// Too many items (exceeded heapless capacity)
    TooManyItems,
    /// Scene name not recognized
    UnknownScene,
    /// A `[[scene]]` table has no `scene` key
    MissingScene,
}

/// One of the four eyelids
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lid {
    LeftUpper,
    LeftLower,
    RightUpper,
    RightLower,
}

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Board,
    Motion,
    Head,
    Eyeball,
    Eyelid(Lid),
    Scene,
    Scheduler,
}

/// Scene table row being built
#[derive(Debug, Clone, Copy)]
struct PendingScene {
    scene: Option<SceneId>,
    modifier: Option<i16>,
    speed: u16,
    delay: DelayPolicy,
}

impl Default for PendingScene {
    fn default() -> Self {
        Self {
            scene: None,
            modifier: None,
            speed: MOVE_SPEED_FAST,
            delay: DelayPolicy::default(),
        }
    }
}

/// Parse TOML configuration into a [`PuppetConfig`]
///
/// Sections that are absent keep their defaults.
pub fn parse_config(input: &str) -> Result<PuppetConfig, ParseError> {
    let mut config = PuppetConfig::default();
    let mut section = Section::Root;
    let mut current_scene: Option<PendingScene> = None;

    for line in input.lines() {
        let line = line.trim();

        // Skip empty lines and comments
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if line.starts_with('[') {
            save_section(section, &mut config, &mut current_scene)?;
            section = parse_header(line)?;
            if section == Section::Scene {
                current_scene = Some(PendingScene::default());
            }
            continue;
        }

        if let Some((key, value)) = parse_key_value(line) {
            apply_value(section, key, value, &mut config, &mut current_scene)?;
        }
    }

    // Save final section
    save_section(section, &mut config, &mut current_scene)?;

    Ok(config)
}

/// Parse a `[section]` or `[[scene]]` line
fn parse_header(line: &str) -> Result<Section, ParseError> {
    let header = strip_comment(line).trim();

    if let Some(table) = header
        .strip_prefix("[[")
        .and_then(|rest| rest.strip_suffix("]]"))
    {
        return match table.trim() {
            "scene" => Ok(Section::Scene),
            _ => Err(ParseError::InvalidSection),
        };
    }

    let name = header
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .ok_or(ParseError::InvalidSection)?;
    parse_section_header(name)
}

/// Parse section header like "motion" or "eyelid.left_upper"
fn parse_section_header(header: &str) -> Result<Section, ParseError> {
    let header = header.trim();

    if let Some((kind, name)) = header.split_once('.') {
        return match (kind.trim(), name.trim()) {
            ("eyelid", "left_upper") => Ok(Section::Eyelid(Lid::LeftUpper)),
            ("eyelid", "left_lower") => Ok(Section::Eyelid(Lid::LeftLower)),
            ("eyelid", "right_upper") => Ok(Section::Eyelid(Lid::RightUpper)),
            ("eyelid", "right_lower") => Ok(Section::Eyelid(Lid::RightLower)),
            _ => Err(ParseError::InvalidSection),
        };
    }

    match header {
        "board" => Ok(Section::Board),
        "motion" => Ok(Section::Motion),
        "head" => Ok(Section::Head),
        "eyeball" => Ok(Section::Eyeball),
        "scheduler" => Ok(Section::Scheduler),
        _ => Err(ParseError::InvalidSection),
    }
}

/// Drop a trailing `# comment` that is not inside a string
fn strip_comment(text: &str) -> &str {
    let mut in_string = false;
    for (i, c) in text.char_indices() {
        match c {
            '"' => in_string = !in_string,
            '#' if !in_string => return &text[..i],
            _ => {}
        }
    }
    text
}

/// Parse "key = value" line
fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let (key, value) = line.split_once('=')?;
    let key = key.trim();
    let value = strip_comment(value).trim();

    if key.is_empty() || value.is_empty() {
        return None;
    }

    Some((key, value))
}

/// Parse a string value (removes quotes)
fn parse_string(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .unwrap_or(value)
}

/// Parse an integer value, decimal or `0x` hexadecimal, `_` separators allowed
fn parse_int<T: TryFrom<i64>>(value: &str) -> Result<T, ParseError> {
    let mut digits: heapless::String<24> = heapless::String::new();
    for c in value.chars().filter(|c| *c != '_') {
        digits.push(c).map_err(|_| ParseError::InvalidValue)?;
    }

    let raw = match digits.strip_prefix("0x") {
        Some(hex) => i64::from_str_radix(hex, 16),
        None => digits.parse(),
    }
    .map_err(|_| ParseError::InvalidValue)?;
    T::try_from(raw).map_err(|_| ParseError::InvalidValue)
}

/// Parse a boolean value
fn parse_bool(value: &str) -> Result<bool, ParseError> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(ParseError::InvalidValue),
    }
}

fn parse_profile(value: &str) -> Result<MotionProfile, ParseError> {
    MotionProfile::from_name(parse_string(value)).ok_or(ParseError::InvalidValue)
}

/// Parse a scene given by name (`"blink"`) or raw id (`11`)
fn parse_scene(value: &str) -> Result<SceneId, ParseError> {
    if value.starts_with('"') {
        return Scene::from_name(parse_string(value))
            .map(SceneId::from)
            .ok_or(ParseError::UnknownScene);
    }
    if let Some(scene) = Scene::from_name(value) {
        return Ok(scene.into());
    }
    parse_int(value).map(SceneId)
}

fn eyelid_mut(head: &mut HeadCalibration, lid: Lid) -> &mut EyelidCalibration {
    match lid {
        Lid::LeftUpper => &mut head.left_upper,
        Lid::LeftLower => &mut head.left_lower,
        Lid::RightUpper => &mut head.right_upper,
        Lid::RightLower => &mut head.right_lower,
    }
}

/// Apply a key-value pair to the current section
fn apply_value(
    section: Section,
    key: &str,
    value: &str,
    config: &mut PuppetConfig,
    current_scene: &mut Option<PendingScene>,
) -> Result<(), ParseError> {
    match section {
        Section::Board => match key {
            "i2c_address" | "address" => config.board.i2c_address = parse_int(value)?,
            "pwm_hz" => config.board.pwm_hz = parse_int(value)?,
            _ => {}
        },
        Section::Motion => match key {
            "profile" => config.motion.profile = parse_profile(value)?,
            "tick_ms" => config.motion.tick_ms = parse_int(value)?,
            _ => {}
        },
        Section::Head => {
            if key == "preset" {
                config.head =
                    HeadCalibration::preset(parse_string(value)).ok_or(ParseError::InvalidValue)?;
            }
        }
        Section::Eyeball => {
            let eyeball = &mut config.head.eyeball;
            match key {
                "x_channel" => eyeball.x.channel = parse_int(value)?,
                "x_mid" => eyeball.x.mid = parse_int(value)?,
                "x_left_offset" => eyeball.x.low_offset = parse_int(value)?,
                "x_right_offset" => eyeball.x.high_offset = parse_int(value)?,
                "y_channel" => eyeball.y.channel = parse_int(value)?,
                "y_mid" => eyeball.y.mid = parse_int(value)?,
                "y_down_offset" => eyeball.y.low_offset = parse_int(value)?,
                "y_up_offset" => eyeball.y.high_offset = parse_int(value)?,
                _ => {}
            }
        }
        Section::Eyelid(lid) => {
            let eyelid = eyelid_mut(&mut config.head, lid);
            match key {
                "channel" => eyelid.channel = parse_int(value)?,
                "closed" => eyelid.closed = parse_int(value)?,
                "open" => eyelid.open = parse_int(value)?,
                _ => {}
            }
        }
        Section::Scene => {
            let scene = current_scene.as_mut().ok_or(ParseError::InvalidSection)?;
            match key {
                "scene" => scene.scene = Some(parse_scene(value)?),
                "modifier" => scene.modifier = Some(parse_int(value)?),
                "speed" => scene.speed = parse_int(value)?,
                "delay" | "delay_ms" => scene.delay = DelayPolicy::from_raw(parse_int(value)?),
                _ => {}
            }
        }
        Section::Scheduler => match key {
            "autostart" => config.scheduler.autostart = parse_bool(value)?,
            "loop_run" | "loop" => config.scheduler.loop_run = parse_bool(value)?,
            "scene_limit" => config.scheduler.scene_limit = parse_int(value)?,
            _ => {}
        },
        Section::Root => {
            // No root-level keys
        }
    }

    Ok(())
}

/// Save the section being closed
fn save_section(
    section: Section,
    config: &mut PuppetConfig,
    current_scene: &mut Option<PendingScene>,
) -> Result<(), ParseError> {
    if section != Section::Scene {
        return Ok(());
    }

    if let Some(pending) = current_scene.take() {
        let scene = pending.scene.ok_or(ParseError::MissingScene)?;
        config
            .scenes
            .push(SceneEntry::new(
                scene,
                pending.modifier,
                pending.speed,
                pending.delay,
            ))
            .map_err(|_| ParseError::TooManyItems)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::calibration::channel;
    use crate::scheduler::MAX_SCENES;

    #[test]
    fn test_parse_section_header() {
        assert_eq!(parse_header("[motion]"), Ok(Section::Motion));
        assert_eq!(
            parse_header("[eyelid.right_lower]"),
            Ok(Section::Eyelid(Lid::RightLower))
        );
        assert_eq!(parse_header("[[scene]]  # first"), Ok(Section::Scene));
        assert_eq!(parse_header("[eyelid.middle]"), Err(ParseError::InvalidSection));
        assert_eq!(parse_header("[mouth]"), Err(ParseError::InvalidSection));
        assert_eq!(parse_header("[[pose]]"), Err(ParseError::InvalidSection));
    }

    #[test]
    fn test_parse_key_value_strips_comments() {
        assert_eq!(parse_key_value("tick_ms = 5 # fast"), Some(("tick_ms", "5")));
        assert_eq!(
            parse_key_value("scene = \"eyes#left\""),
            Some(("scene", "\"eyes#left\""))
        );
        assert_eq!(parse_key_value("tick_ms ="), None);
        assert_eq!(parse_key_value("no equals sign"), None);
    }

    #[test]
    fn test_parse_int() {
        assert_eq!(parse_int::<u8>("0x40"), Ok(0x40));
        assert_eq!(parse_int::<i32>("-108"), Ok(-108));
        assert_eq!(parse_int::<u32>("10_000"), Ok(10_000));
        assert_eq!(parse_int::<u8>("300"), Err(ParseError::InvalidValue));
        assert_eq!(parse_int::<u16>("fast"), Err(ParseError::InvalidValue));
    }

    #[test]
    fn test_parse_scene() {
        assert_eq!(parse_scene("\"blink\""), Ok(SceneId::from(Scene::Blink)));
        assert_eq!(parse_scene("eyes_up"), Ok(SceneId::from(Scene::EyesUp)));
        assert_eq!(parse_scene("7"), Ok(SceneId::from(Scene::EyesOpen)));
        assert_eq!(parse_scene("120"), Ok(SceneId(120)));
        assert_eq!(parse_scene("\"squint\""), Err(ParseError::UnknownScene));
    }

    #[test]
    fn test_empty_input_gives_defaults() {
        let config = parse_config("# nothing here\n\n").unwrap();
        assert_eq!(config.head, HeadCalibration::BOBG);
        assert_eq!(config.motion.profile, MotionProfile::Decay);
        assert!(config.scenes.is_empty());
    }

    #[test]
    fn test_parse_full_config() {
        let config_str = r#"
[board]
i2c_address = 0x41
pwm_hz = 50

[motion]
profile = "linear"
tick_ms = 2

[head]
preset = "jims"

[eyeball]
x_mid = 390          # recentred after horn swap
y_up_offset = 90

[eyelid.left_upper]
channel = 8
closed = 480
open = 290

[scheduler]
autostart = false
loop_run = false
scene_limit = 20

[[scene]]
scene = "eyes_ahead_open"
speed = 1
delay = 500

[[scene]]
scene = "eyes_horizontal"
modifier = 25
speed = 10
delay = -1

[[scene]]
scene = "blink"
"#;

        let config = parse_config(config_str).unwrap();
        assert_eq!(config.board.i2c_address, 0x41);
        assert_eq!(config.board.pwm_hz, 50);
        assert_eq!(config.motion.profile, MotionProfile::Linear);
        assert_eq!(config.motion.tick_ms, 2);

        // Preset first, then per-key overrides
        assert_eq!(config.head.eyeball.x.mid, 390);
        assert_eq!(config.head.eyeball.x.low_offset, 141);
        assert_eq!(config.head.eyeball.y.high_offset, 90);
        assert_eq!(config.head.left_upper, EyelidCalibration::new(8, 480, 290));
        assert_eq!(config.head.right_lower, HeadCalibration::JIMS.right_lower);
        assert_eq!(config.head.eyeball.y.channel, channel::EYEBALL_Y);

        assert!(!config.scheduler.autostart);
        assert!(!config.scheduler.loop_run);
        assert_eq!(config.scheduler.scene_limit, 20);

        assert_eq!(config.scenes.len(), 3);
        assert_eq!(
            config.scenes[0],
            SceneEntry::new(Scene::EyesAheadOpen, None, 1, DelayPolicy::AfterMove(500))
        );
        assert_eq!(
            config.scenes[1],
            SceneEntry::new(Scene::EyesHorizontal, Some(25), 10, DelayPolicy::Immediate)
        );
        assert_eq!(
            config.scenes[2],
            SceneEntry::new(Scene::Blink, None, MOVE_SPEED_FAST, DelayPolicy::AfterMove(0))
        );
    }

    #[test]
    fn test_scene_without_name_is_rejected() {
        let config_str = "[[scene]]\nspeed = 3\n\n[scheduler]\nautostart = true\n";
        assert_eq!(parse_config(config_str).unwrap_err(), ParseError::MissingScene);
    }

    #[test]
    fn test_invalid_values() {
        assert_eq!(
            parse_config("[motion]\nprofile = \"bezier\"\n").unwrap_err(),
            ParseError::InvalidValue
        );
        assert_eq!(
            parse_config("[scheduler]\nautostart = yes\n").unwrap_err(),
            ParseError::InvalidValue
        );
        assert_eq!(
            parse_config("[head]\npreset = \"nobody\"\n").unwrap_err(),
            ParseError::InvalidValue
        );
    }

    #[test]
    fn test_too_many_scenes() {
        let mut input: heapless::String<4096> = heapless::String::new();
        for _ in 0..=MAX_SCENES {
            input.push_str("[[scene]]\nscene=1\n").unwrap();
        }
        assert_eq!(parse_config(&input).unwrap_err(), ParseError::TooManyItems);
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let config = parse_config("[board]\ncolour = \"red\"\npwm_hz = 55\n").unwrap();
        assert_eq!(config.board.pwm_hz, 55);
    }
}
