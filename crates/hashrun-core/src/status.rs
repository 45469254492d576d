//! Decoding of hashcat's machine-readable status stream.
//!
//! With `--status --status-json` hashcat prints one JSON object per status
//! tick on stdout, interleaved with plain log lines. Only the JSON objects
//! are snapshots; everything else is noise and is skipped.

use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer};

use crate::error::CoreError;

/// Throughput of one compute device at snapshot time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct DeviceStatus {
    /// Device index as reported by hashcat.
    #[serde(alias = "device_id")]
    pub id: u32,

    /// Speed in KHash/s.
    pub speed: u64,
}

/// One decoded progress report.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StatusSnapshot {
    /// Per-device speed, in device order.
    pub devices: Vec<DeviceStatus>,

    /// Estimated finish time as a Unix timestamp, if hashcat knows it.
    #[serde(default, rename = "estimated_stop")]
    pub estimated_stop_epoch: Option<i64>,

    /// Number of secrets recovered so far.
    #[serde(
        default,
        rename = "recovered_hashes",
        deserialize_with = "count_entries"
    )]
    pub recovered_count: usize,
}

fn count_entries<'de, D>(deserializer: D) -> Result<usize, D::Error>
where
    D: Deserializer<'de>,
{
    let entries = Vec::<IgnoredAny>::deserialize(deserializer)?;
    Ok(entries.len())
}

impl StatusSnapshot {
    /// Decode a single status line.
    ///
    /// Fails on blank lines, non-JSON log output, partial JSON and JSON
    /// values that are not status objects.
    pub fn from_line(line: &str) -> Result<Self, CoreError> {
        let trimmed = line.trim();
        if !trimmed.starts_with('{') {
            let preview: String = trimmed.chars().take(80).collect();
            return Err(CoreError::NotAStatus(preview));
        }
        Ok(serde_json::from_str(trimmed)?)
    }

    /// Aggregate speed across all devices, in KHash/s.
    pub fn total_speed(&self) -> u64 {
        self.devices
            .iter()
            .fold(0u64, |acc, dev| acc.saturating_add(dev.speed))
    }

    /// Seconds until the estimated stop, clamped at zero.
    ///
    /// Returns `None` when hashcat did not report an estimate.
    pub fn remaining_secs(&self, now_epoch: i64) -> Option<u64> {
        self.estimated_stop_epoch
            .map(|stop| u64::try_from(stop.saturating_sub(now_epoch)).unwrap_or(0))
    }
}

/// Decode a status line, discarding anything that is not a snapshot.
///
/// Decode failures are routine on this stream and must never interrupt
/// the caller's read loop.
pub fn parse_status_line(line: &str) -> Option<StatusSnapshot> {
    StatusSnapshot::from_line(line).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_status_line() {
        let line = r#"{"devices":[{"id":0,"speed":1000},{"id":1,"speed":1500}],"recovered_hashes":["a"],"estimated_stop":1700000060}"#;
        let snapshot = parse_status_line(line).unwrap();

        assert_eq!(snapshot.devices.len(), 2);
        assert_eq!(snapshot.devices[1], DeviceStatus { id: 1, speed: 1500 });
        assert_eq!(snapshot.total_speed(), 2500);
        assert_eq!(snapshot.recovered_count, 1);
        assert_eq!(snapshot.estimated_stop_epoch, Some(1_700_000_060));
    }

    #[test]
    fn test_parse_native_hashcat_fields() {
        let line = r#"{"session":"hashcat","status":3,"devices":[{"device_id":1,"device_name":"GPU","speed":4200,"temp":61,"util":99}],"recovered_hashes":[0,1],"estimated_stop":1700000000,"progress":[10,100]}"#;
        let snapshot = parse_status_line(line).unwrap();

        assert_eq!(snapshot.devices, vec![DeviceStatus { id: 1, speed: 4200 }]);
        assert_eq!(snapshot.recovered_count, 2);
    }

    #[test]
    fn test_missing_optional_fields() {
        let snapshot = parse_status_line(r#"{"devices":[]}"#).unwrap();

        assert_eq!(snapshot.total_speed(), 0);
        assert_eq!(snapshot.recovered_count, 0);
        assert_eq!(snapshot.estimated_stop_epoch, None);
        assert_eq!(snapshot.remaining_secs(1_700_000_000), None);

        let snapshot =
            parse_status_line(r#"{"devices":[],"estimated_stop":null}"#).unwrap();
        assert_eq!(snapshot.estimated_stop_epoch, None);
    }

    #[test]
    fn test_malformed_lines_are_not_snapshots() {
        let lines = [
            "",
            "   ",
            "hashcat (v6.2.6) starting",
            "Session..........: hashcat",
            r#"{"devices":[{"id":0,"speed":10}"#,
            r#"{"recovered_hashes":[]}"#,
            r#"{"devices":"gpu"}"#,
            r#"{"devices":[{"id":0,"speed":-5}]}"#,
            "[1, 2, 3]",
            "null",
        ];

        for line in lines {
            assert!(parse_status_line(line).is_none(), "parsed: {line:?}");
        }
    }

    #[test]
    fn test_from_line_reports_reason() {
        assert!(matches!(
            StatusSnapshot::from_line("Dictionary cache hit"),
            Err(CoreError::NotAStatus(_))
        ));
        assert!(matches!(
            StatusSnapshot::from_line("{\"devices\":"),
            Err(CoreError::Decode(_))
        ));
    }

    #[test]
    fn test_trailing_newline_is_accepted() {
        let snapshot = parse_status_line("{\"devices\":[{\"id\":0,\"speed\":7}]}\r\n").unwrap();
        assert_eq!(snapshot.total_speed(), 7);
    }

    #[test]
    fn test_remaining_secs_is_clamped() {
        let snapshot = StatusSnapshot {
            devices: vec![],
            estimated_stop_epoch: Some(100),
            recovered_count: 0,
        };

        assert_eq!(snapshot.remaining_secs(40), Some(60));
        assert_eq!(snapshot.remaining_secs(100), Some(0));
        assert_eq!(snapshot.remaining_secs(250), Some(0));
    }

    #[test]
    fn test_total_speed_saturates() {
        let snapshot = StatusSnapshot {
            devices: vec![
                DeviceStatus { id: 0, speed: u64::MAX },
                DeviceStatus { id: 1, speed: 10 },
            ],
            estimated_stop_epoch: None,
            recovered_count: 0,
        };

        assert_eq!(snapshot.total_speed(), u64::MAX);
    }
}
