//! Configuration for tethered elements.
//!
//! Settings can be constructed programmatically, parsed from JSON, or loaded
//! from environment variables. Environment values that do not parse fall back
//! to their defaults with a warning.

use crate::TetherError;
use anyhow::Result;
use core::fmt;
use dom::EventType;
use serde::{Deserialize, Serialize};
use std::env;
use tether_layout::{DEFAULT_MIN_BOTTOM_SPACE, VerticalOverflowRule};

const ENV_MIN_BOTTOM_SPACE: &str = "TETHER_MIN_BOTTOM_SPACE";
const ENV_VERTICAL_RULE: &str = "TETHER_VERTICAL_RULE";
const ENV_OBSERVE_WHEEL: &str = "TETHER_OBSERVE_WHEEL";
const ENV_ON_CHANGE: &str = "TETHER_ON_CHANGE";

/// What happens when a new tether is assigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TetherChangePolicy {
    /// Recompute the position immediately.
    #[default]
    Recompute,
    /// Wait for the next observed event or explicit update.
    Defer,
}

impl TetherChangePolicy {
    fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "recompute" => Some(Self::Recompute),
            "defer" => Some(Self::Defer),
            _ => None,
        }
    }
}

/// Settings shared by the tethered elements of a page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TetherConfig {
    /// Initial minimum space (px) below the tether for bottom alignment.
    pub min_bottom_space: f64,
    /// How the space below the tether is measured.
    pub vertical_rule: VerticalOverflowRule,
    /// Whether wheel events trigger recomputation in addition to resize, scroll and touchmove.
    pub observe_wheel: bool,
    /// Behaviour of `set_tether`.
    pub tether_change: TetherChangePolicy,
}

impl Default for TetherConfig {
    fn default() -> Self {
        Self {
            min_bottom_space: DEFAULT_MIN_BOTTOM_SPACE,
            vertical_rule: VerticalOverflowRule::TetherEdge,
            observe_wheel: true,
            tether_change: TetherChangePolicy::Recompute,
        }
    }
}

impl TetherConfig {
    /// Load configuration from environment variables.
    ///
    /// Reads the following environment variables:
    /// - `TETHER_MIN_BOTTOM_SPACE`: minimum space below the tether in px (default: 120)
    /// - `TETHER_VERTICAL_RULE`: `tether-edge` or `content-extent` (default: `tether-edge`)
    /// - `TETHER_OBSERVE_WHEEL`: set to "0" to stop observing wheel events (default: observed)
    /// - `TETHER_ON_CHANGE`: `recompute` or `defer` (default: `recompute`)
    ///
    /// # Returns
    ///
    /// A new `TetherConfig` populated from environment variables
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a configuration from a key lookup, using the environment variable names as keys.
    #[must_use]
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let min_bottom_space = lookup(ENV_MIN_BOTTOM_SPACE)
            .map_or(defaults.min_bottom_space, |raw| {
                parse_or_default(ENV_MIN_BOTTOM_SPACE, &raw, defaults.min_bottom_space, |value| {
                    value.trim().parse::<f64>().ok().filter(|px| px.is_finite())
                })
            });
        let vertical_rule = lookup(ENV_VERTICAL_RULE).map_or(defaults.vertical_rule, |raw| {
            parse_or_default(
                ENV_VERTICAL_RULE,
                &raw,
                defaults.vertical_rule,
                VerticalOverflowRule::from_name,
            )
        });
        let observe_wheel = lookup(ENV_OBSERVE_WHEEL).map_or(defaults.observe_wheel, |raw| {
            parse_or_default(ENV_OBSERVE_WHEEL, &raw, defaults.observe_wheel, |value| {
                match value.trim() {
                    "1" => Some(true),
                    "0" => Some(false),
                    _ => None,
                }
            })
        });
        let tether_change = lookup(ENV_ON_CHANGE).map_or(defaults.tether_change, |raw| {
            parse_or_default(
                ENV_ON_CHANGE,
                &raw,
                defaults.tether_change,
                TetherChangePolicy::from_name,
            )
        });
        Self {
            min_bottom_space,
            vertical_rule,
            observe_wheel,
            tether_change,
        }
    }

    /// Parse a JSON object; missing fields take their defaults.
    ///
    /// # Errors
    /// Returns an error if the JSON is malformed or a value is out of range.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges.
    ///
    /// # Errors
    /// Returns [`TetherError::InvalidConfig`] for a non-finite minimum bottom space.
    pub fn validate(&self) -> Result<()> {
        if !self.min_bottom_space.is_finite() {
            return Err(TetherError::InvalidConfig {
                key: "min_bottom_space".to_owned(),
                value: self.min_bottom_space.to_string(),
            }
            .into());
        }
        Ok(())
    }

    /// Window events that trigger recomputation, in registration order.
    pub fn observed_events(&self) -> Vec<EventType> {
        EventType::ALL
            .into_iter()
            .filter(|event| self.observe_wheel || *event != EventType::Wheel)
            .collect()
    }
}

fn parse_or_default<T, P>(key: &str, raw: &str, default: T, parse: P) -> T
where
    T: Copy + fmt::Debug,
    P: Fn(&str) -> Option<T>,
{
    parse(raw).unwrap_or_else(|| {
        log::warn!("Ignoring {key}={raw:?}, using default {default:?}");
        default
    })
}
