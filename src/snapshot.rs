//! Status snapshot types
//!
//! Wire types for the monitor backend's JSON API and their typed views.

use serde::de::{Deserializer, MapAccess, Visitor};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One full poll response: overall relay state plus every known device.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct StatusSnapshot {
    pub output_status: bool,
    pub device_list: DeviceList,
    /// Backend clock at the time the snapshot was taken, seconds since epoch.
    #[serde(default)]
    pub timestamp: Option<f64>,
}

impl StatusSnapshot {
    pub fn relay_indicator(&self) -> RelayIndicator {
        if self.output_status {
            RelayIndicator::On
        } else {
            RelayIndicator::Off
        }
    }
}

/// Per-device entry of a snapshot. Only `status` is required to render a card.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DeviceInfo {
    #[serde(default, deserialize_with = "strict_bool")]
    pub status: Option<bool>,
    #[serde(default)]
    pub ip: Option<String>,
    #[serde(default)]
    pub last_online: Option<String>,
}

impl DeviceInfo {
    pub fn state(&self) -> DeviceState {
        DeviceState::from(self.status)
    }
}

/// Anything other than a JSON boolean means the backend has no verdict yet.
fn strict_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value.as_bool())
}

/// Devices keyed by name, in the order the backend listed them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeviceList(Vec<(String, DeviceInfo)>);

impl DeviceList {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &DeviceInfo)> {
        self.0.iter().map(|(name, info)| (name.as_str(), info))
    }

    #[cfg(test)]
    pub fn get(&self, name: &str) -> Option<&DeviceInfo> {
        self.0
            .iter()
            .find(|(device, _)| device == name)
            .map(|(_, info)| info)
    }
}

impl FromIterator<(String, DeviceInfo)> for DeviceList {
    fn from_iter<I: IntoIterator<Item = (String, DeviceInfo)>>(iter: I) -> Self {
        let mut list = DeviceList::default();
        for (name, info) in iter {
            list.insert(name, info);
        }
        list
    }
}

impl DeviceList {
    /// Last write wins for a repeated key but the first position is kept,
    /// matching how a JSON object is read by a browser.
    fn insert(&mut self, name: String, info: DeviceInfo) {
        match self.0.iter_mut().find(|(device, _)| *device == name) {
            Some(entry) => entry.1 = info,
            None => self.0.push((name, info)),
        }
    }
}

impl<'de> Deserialize<'de> for DeviceList {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct DeviceListVisitor;

        impl<'de> Visitor<'de> for DeviceListVisitor {
            type Value = DeviceList;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a map of device name to device info")
            }

            fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut list = DeviceList(Vec::with_capacity(access.size_hint().unwrap_or(0)));
                while let Some((name, info)) = access.next_entry::<String, DeviceInfo>()? {
                    list.insert(name, info);
                }
                Ok(list)
            }
        }

        deserializer.deserialize_any(DeviceListVisitor)
    }
}

/// Reachability of a single device as rendered on its card.
#[derive(Debug, Copy, Clone, PartialEq, Eq, strum::Display)]
pub enum DeviceState {
    Online,
    Offline,
    Checking,
}

impl From<Option<bool>> for DeviceState {
    fn from(status: Option<bool>) -> Self {
        match status {
            Some(true) => DeviceState::Online,
            Some(false) => DeviceState::Offline,
            None => DeviceState::Checking,
        }
    }
}

/// The top-level relay indicator.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum RelayIndicator {
    /// No poll has completed yet.
    #[default]
    Unknown,
    On,
    Off,
    /// The most recent poll failed.
    Error,
}

impl RelayIndicator {
    pub fn text(&self) -> &'static str {
        match self {
            RelayIndicator::Unknown => "Waiting for status...",
            RelayIndicator::On => "Relay Status ON",
            RelayIndicator::Off => "Relay Status OFF",
            RelayIndicator::Error => "Error checking status",
        }
    }

    /// Whether the indicator is drawn in the online style.
    pub fn is_online_style(&self) -> bool {
        matches!(self, RelayIndicator::On)
    }
}

/// Body of `POST /api/add-device`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AddDeviceRequest {
    pub name: String,
    pub ip: String,
}

/// Body of `POST /api/remove-device`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RemoveDeviceRequest {
    pub name: String,
}

/// Reply of both mutation endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct MutationResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}
