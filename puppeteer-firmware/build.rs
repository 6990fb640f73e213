//! Build script for puppeteer-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates puppet.toml at compile time

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use puppeteer_core::config::toml::parse_config;
use puppeteer_core::scheduler::Scene;

const SECTIONS: &[&str] = &[
    "board",
    "motion",
    "head",
    "eyeball",
    "eyelid",
    "scheduler",
    "scene",
];

const EYELIDS: &[&str] = &["left_upper", "left_lower", "right_upper", "right_lower"];

/// Raw counts a PCA9685 channel accepts
const PWM_MAX: i64 = 4095;

/// Eyeball keys holding a raw position
const EYEBALL_POSITIONS: &[&str] = &["x_mid", "y_mid"];

/// Eyeball keys holding an offset from the mid position
const EYEBALL_OFFSETS: &[&str] = &[
    "x_left_offset",
    "x_right_offset",
    "y_down_offset",
    "y_up_offset",
];

fn main() {
    setup_linker();
    validate_config();
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate puppet.toml at compile time
fn validate_config() {
    println!("cargo:rerun-if-changed=puppet.toml");

    let config_path = Path::new("puppet.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: puppet.toml not found!                                   ║\n\
            ║                                                                  ║\n\
            ║  The firmware embeds a puppet.toml configuration file.           ║\n\
            ║  Please create one in the puppeteer-firmware directory.          ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => report("Failed to read puppet.toml", &[e.to_string()]),
    };

    let config: toml::Value = match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => {
            let lines: Vec<String> = e.to_string().lines().map(str::to_string).collect();
            report("Invalid TOML syntax in puppet.toml", &lines);
        }
    };

    validate_sections(&config);
    validate_scenes(&config);

    // The firmware's own parser must accept what toml accepted
    match parse_config(&config_content) {
        Ok(parsed) => {
            if parsed.scenes.len() > parsed.scheduler.scene_limit {
                println!(
                    "cargo:warning=puppet.toml lists {} scenes, only {} fit the scene table",
                    parsed.scenes.len(),
                    parsed.scheduler.scene_limit
                );
            }
        }
        Err(e) => report(
            "puppet.toml rejected by the firmware parser",
            &[format!("{:?}", e)],
        ),
    }

    println!("cargo:warning=puppet.toml validated successfully");
}

/// Abort the build with a boxed error list
fn report(title: &str, errors: &[String]) -> ! {
    panic!(
        "\n\
        ╔══════════════════════════════════════════════════════════════════╗\n\
        ║  ERROR: {:<56} ║\n\
        ╠══════════════════════════════════════════════════════════════════╣\n\
        {}\n\
        ╚══════════════════════════════════════════════════════════════════╝\n",
        title,
        errors
            .iter()
            .map(|e| {
                let truncated = if e.len() > 62 {
                    format!("{}...", &e[..59])
                } else {
                    e.clone()
                };
                format!("║  • {:<62} ║", truncated)
            })
            .collect::<Vec<_>>()
            .join("\n")
    );
}

/// Reject unknown sections and eyelids
fn validate_sections(config: &toml::Value) {
    let root = match config.as_table() {
        Some(t) => t,
        None => return,
    };

    let mut errors = Vec::new();

    for (name, value) in root {
        if !SECTIONS.contains(&name.as_str()) {
            errors.push(format!("unknown section [{}]", name));
            continue;
        }
        if name == "eyelid" {
            match value.as_table() {
                Some(lids) => {
                    for lid in lids.keys() {
                        if !EYELIDS.contains(&lid.as_str()) {
                            errors.push(format!("unknown eyelid [eyelid.{}]", lid));
                        }
                    }
                }
                None => errors.push("[eyelid] must hold eyelid tables".to_string()),
            }
        }
    }

    validate_calibration(config, &mut errors);

    if let Some(toml::Value::String(preset)) = config.get("head").and_then(|h| h.get("preset")) {
        if !["bobg", "jims"].contains(&preset.as_str()) {
            errors.push(format!("[head] preset must be 'bobg' or 'jims', got '{}'", preset));
        }
    }

    if !errors.is_empty() {
        report("Invalid sections in puppet.toml", &errors);
    }
}

/// Keep calibration values inside the servo board's range
fn validate_calibration(config: &toml::Value, errors: &mut Vec<String>) {
    let mut check = |label: String, value: Option<&toml::Value>, min: i64| {
        if let Some(toml::Value::Integer(v)) = value {
            if *v < min || *v > PWM_MAX {
                errors.push(format!("{} must be {}..={}, got {}", label, min, PWM_MAX, v));
            }
        }
    };

    if let Some(eyeball) = config.get("eyeball") {
        for key in EYEBALL_POSITIONS {
            check(format!("[eyeball] {}", key), eyeball.get(*key), 0);
        }
        for key in EYEBALL_OFFSETS {
            check(format!("[eyeball] {}", key), eyeball.get(*key), -PWM_MAX);
        }
    }

    if let Some(lids) = config.get("eyelid").and_then(|e| e.as_table()) {
        for (lid, table) in lids {
            for key in ["closed", "open"] {
                check(format!("[eyelid.{}] {}", lid, key), table.get(key), 0);
            }
        }
    }
}

/// Validate the scene list
fn validate_scenes(config: &toml::Value) {
    let scenes = match config.get("scene") {
        Some(toml::Value::Array(scenes)) => scenes,
        Some(_) => report(
            "Invalid scene list in puppet.toml",
            &["scenes must be written as [[scene]] tables".to_string()],
        ),
        None => {
            println!("cargo:warning=puppet.toml has no [[scene]] entries, the puppet will idle");
            return;
        }
    };

    let mut errors = Vec::new();

    for (i, scene) in scenes.iter().enumerate() {
        let scene = match scene.as_table() {
            Some(t) => t,
            None => {
                errors.push(format!("scene {} must be a table", i));
                continue;
            }
        };

        match scene.get("scene") {
            Some(toml::Value::String(name)) => {
                if Scene::from_name(name).is_none() {
                    errors.push(format!("scene {} names unknown scene '{}'", i, name));
                }
            }
            Some(toml::Value::Integer(code)) => {
                if *code < 0 || *code > u8::MAX as i64 {
                    errors.push(format!("scene {} id must be 0-255", i));
                } else if Scene::from_code(*code as u8).is_none() {
                    println!(
                        "cargo:warning=scene {} uses unassigned id {}, it will be skipped",
                        i, code
                    );
                }
            }
            Some(_) => errors.push(format!("scene {} 'scene' must be a name or id", i)),
            None => errors.push(format!("scene {} missing 'scene'", i)),
        }

        if let Some(toml::Value::Integer(speed)) = scene.get("speed") {
            if *speed < 1 || *speed > 100 {
                errors.push(format!("scene {} speed must be 1-100", i));
            }
        }

        if let Some(toml::Value::Integer(modifier)) = scene.get("modifier") {
            if *modifier < i16::MIN as i64 || *modifier > i16::MAX as i64 {
                errors.push(format!("scene {} modifier out of range", i));
            }
        }
    }

    if !errors.is_empty() {
        report("Invalid scene configuration", &errors);
    }
}
