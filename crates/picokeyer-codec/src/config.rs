//! Records carried by the keyer payloads.
//!
//! Records hold the raw wire integers so that a decode followed by an encode
//! reproduces the payload. `wpm` is the only non-integer field: it travels as
//! `round(wpm * 100)` in 16 bits.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Fixed-point scale of the `wpm` field.
pub const WPM_SCALE: f64 = 100.0;

/// Protocol version the configurator understands.
pub const FIRMWARE_VERSION: u16 = 2;

/// Converts words per minute to the transported integer. Negative and NaN inputs become 0.
pub fn wpm_to_fixed(wpm: f64) -> u64 {
    (wpm * WPM_SCALE).round() as u64
}

pub fn wpm_from_fixed(value: u64) -> f64 {
    value as f64 / WPM_SCALE
}

/// How the key inputs are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum KeyMode {
    None = 0,
    StraightKey = 1,
    Paddles = 2,
}

impl TryFrom<u8> for KeyMode {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(KeyMode::None),
            1 => Ok(KeyMode::StraightKey),
            2 => Ok(KeyMode::Paddles),
            other => Err(other),
        }
    }
}

/// Which LED, if any, mirrors the key state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum LedMode {
    Disabled = 0,
    Normal = 1,
    Rgb = 2,
}

impl TryFrom<u8> for LedMode {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(LedMode::Disabled),
            1 => Ok(LedMode::Normal),
            2 => Ok(LedMode::Rgb),
            other => Err(other),
        }
    }
}

/// Keyer configuration, one member per wire field.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ConfigRecord {
    pub key_mode: u8,
    pub pin_mode: u8,
    pub led_mode: u8,
    pub gpio_output_mode: u8,
    pub output: u8,
    #[cfg_attr(feature = "serde", serde(rename = "normalLED"))]
    pub normal_led: u8,
    #[cfg_attr(feature = "serde", serde(rename = "rgbLED"))]
    pub rgb_led: u8,
    pub dit_paddle: u8,
    pub dah_paddle: u8,
    pub straight_key: u8,
    /// Words per minute, two decimal places survive the round-trip.
    pub wpm: f64,
    pub channel: u8,
    pub note: u8,
    pub volume: u8,
}

impl Default for ConfigRecord {
    /// Factory settings of the keyer firmware.
    fn default() -> Self {
        ConfigRecord {
            key_mode: KeyMode::None as u8,
            // INPUT_PULLUP
            pin_mode: 2,
            led_mode: LedMode::Disabled as u8,
            gpio_output_mode: 0,
            output: 0,
            normal_led: 0,
            rgb_led: 16,
            dit_paddle: 3,
            dah_paddle: 29,
            straight_key: 3,
            wpm: 12.0,
            channel: 1,
            note: 77,
            volume: 40,
        }
    }
}

impl ConfigRecord {
    /// `None` when the stored code is not a known key mode.
    pub fn key_mode(&self) -> Option<KeyMode> {
        KeyMode::try_from(self.key_mode).ok()
    }

    pub fn led_mode(&self) -> Option<LedMode> {
        LedMode::try_from(self.led_mode).ok()
    }

    /// Wire values in [crate::schema::CONFIG_SCHEMA] order, before masking.
    pub fn to_values(&self) -> [u64; 14] {
        [
            self.key_mode as u64,
            self.pin_mode as u64,
            self.led_mode as u64,
            self.gpio_output_mode as u64,
            self.output as u64,
            self.normal_led as u64,
            self.rgb_led as u64,
            self.dit_paddle as u64,
            self.dah_paddle as u64,
            self.straight_key as u64,
            wpm_to_fixed(self.wpm),
            self.channel as u64,
            self.note as u64,
            self.volume as u64,
        ]
    }

    /// Rebuilds a record from values extracted in schema order.
    /// Every value is expected to fit its field, which extraction guarantees.
    pub(crate) fn from_values(values: &[u64; 14]) -> Self {
        ConfigRecord {
            key_mode: values[0] as u8,
            pin_mode: values[1] as u8,
            led_mode: values[2] as u8,
            gpio_output_mode: values[3] as u8,
            output: values[4] as u8,
            normal_led: values[5] as u8,
            rgb_led: values[6] as u8,
            dit_paddle: values[7] as u8,
            dah_paddle: values[8] as u8,
            straight_key: values[9] as u8,
            wpm: wpm_from_fixed(values[10]),
            channel: values[11] as u8,
            note: values[12] as u8,
            volume: values[13] as u8,
        }
    }
}

/// Firmware version reported by the keyer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct VersionRecord {
    pub version: u16,
}

impl VersionRecord {
    pub fn new(version: u16) -> Self {
        VersionRecord { version }
    }

    /// Whether the firmware speaks the protocol this crate implements.
    pub fn is_supported(&self) -> bool {
        self.version == FIRMWARE_VERSION
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wpm_fixed_point() {
        assert_eq!(wpm_to_fixed(20.0), 2000);
        assert_eq!(wpm_to_fixed(12.345), 1235);
        assert_eq!(wpm_to_fixed(12.344), 1234);
        assert_eq!(wpm_from_fixed(2000), 20.0);
    }

    #[test]
    fn test_wpm_negative_and_nan() {
        assert_eq!(wpm_to_fixed(-5.0), 0);
        assert_eq!(wpm_to_fixed(f64::NAN), 0);
    }

    #[test]
    fn test_mode_codes() {
        assert_eq!(KeyMode::try_from(2), Ok(KeyMode::Paddles));
        assert_eq!(KeyMode::try_from(3), Err(3));
        assert_eq!(LedMode::try_from(2), Ok(LedMode::Rgb));
    }

    #[test]
    fn test_default_record() {
        let record = ConfigRecord::default();
        assert_eq!(record.key_mode(), Some(KeyMode::None));
        assert_eq!(record.led_mode(), Some(LedMode::Disabled));
        assert_eq!(record.wpm, 12.0);
        assert_eq!(record.dah_paddle, 29);
    }

    #[test]
    fn test_values_order() {
        let record = ConfigRecord {
            key_mode: 1,
            note: 60,
            wpm: 20.0,
            ..Default::default()
        };
        let values = record.to_values();

        assert_eq!(values[0], 1);
        assert_eq!(values[10], 2000);
        assert_eq!(values[12], 60);
        assert_eq!(ConfigRecord::from_values(&values), record);
    }

    #[test]
    fn test_version_supported() {
        assert!(VersionRecord::new(FIRMWARE_VERSION).is_supported());
        assert!(!VersionRecord::new(1).is_supported());
    }
}
