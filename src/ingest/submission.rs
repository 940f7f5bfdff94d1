//! Submission payload types.
//!
//! The loosely-typed identity fields accept any JSON shape, so they are held as
//! [`serde_json::Value`]. Each one distinguishes three states: absent from the
//! payload (`None`), sent as `null` (`Some(Value::Null)`), or sent with a value.
//! Absent fields are skipped on serialization; explicit nulls are kept.
//!
//! The top-level `level`, `minimal` and `full` have no such distinction: a
//! `null` there reads as the empty value, same as a missing key.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// One inbound payload as posted by a pinger client.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Submission {
    #[serde(default, deserialize_with = "or_default")]
    pub level: String,

    #[serde(default, deserialize_with = "or_default")]
    pub minimal: MinimalIdentity,

    #[serde(default, deserialize_with = "or_default")]
    pub full: FullIdentity,
}

/// Coarse identity summary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MinimalIdentity {
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub platform: Option<Value>,

    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub original_os_version: Option<Value>,

    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub current_os_version: Option<Value>,

    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub instance_type: Option<Value>,
}

impl MinimalIdentity {
    /// True when every field is absent or null.
    pub fn is_empty(&self) -> bool {
        [
            &self.platform,
            &self.original_os_version,
            &self.current_os_version,
            &self.instance_type,
        ]
        .iter()
        .all(|field| matches!(field, None | Some(Value::Null)))
    }
}

/// Detailed hardware, network and container runtime snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FullIdentity {
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub hardware: Option<Value>,

    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub network: Option<Value>,

    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub container_rt: Option<Value>,
}

/// Marks a field as present, keeping an explicit `null` as `Some(Value::Null)`.
///
/// Only invoked when the key exists; `#[serde(default)]` covers absence.
fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

/// Reads an explicit `null` as `T::default()`.
fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Render a sub-record as the JSON object that gets stored.
pub fn to_document<T: Serialize>(record: &T) -> Result<Map<String, Value>, serde_json::Error> {
    match serde_json::to_value(record)? {
        Value::Object(map) => Ok(map),
        other => Err(serde::ser::Error::custom(format!(
            "expected a JSON object, got {}",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_absent_and_null_are_distinct() {
        let minimal: MinimalIdentity =
            serde_json::from_value(json!({"platform": "qemu", "instance_type": null})).unwrap();

        assert_eq!(minimal.platform, Some(json!("qemu")));
        assert_eq!(minimal.instance_type, Some(Value::Null));
        assert_eq!(minimal.current_os_version, None);

        let doc = to_document(&minimal).unwrap();
        assert_eq!(Value::Object(doc), json!({"platform": "qemu", "instance_type": null}));
    }

    #[test]
    fn test_minimal_emptiness() {
        assert!(MinimalIdentity::default().is_empty());

        let all_null: MinimalIdentity = serde_json::from_value(json!({
            "platform": null,
            "original_os_version": null,
            "current_os_version": null,
            "instance_type": null
        }))
        .unwrap();
        assert!(all_null.is_empty());

        let empty_string: MinimalIdentity =
            serde_json::from_value(json!({"original_os_version": ""})).unwrap();
        assert!(!empty_string.is_empty());
    }

    #[test]
    fn test_missing_sections_default() {
        let submission: Submission = serde_json::from_str(r#"{"level": "minimal"}"#).unwrap();
        assert_eq!(submission.level, "minimal");
        assert!(submission.minimal.is_empty());
        assert_eq!(submission.full, FullIdentity::default());
    }

    #[test]
    fn test_null_sections_read_as_empty() {
        let submission: Submission =
            serde_json::from_str(r#"{"level": null, "minimal": null, "full": null}"#).unwrap();
        assert_eq!(submission, Submission::default());

        let submission: Submission = serde_json::from_str(
            r#"{"level": "full", "minimal": {"platform": "qemu"}, "full": null}"#,
        )
        .unwrap();
        assert_eq!(submission.minimal.platform, Some(json!("qemu")));
        assert!(to_document(&submission.full).unwrap().is_empty());
    }

    #[test]
    fn test_wrong_section_type_still_fails() {
        assert!(serde_json::from_str::<Submission>(r#"{"level": 3}"#).is_err());
        assert!(serde_json::from_str::<Submission>(r#"{"minimal": []}"#).is_err());
    }

    #[test]
    fn test_unknown_fields_rejected_at_every_level() {
        assert!(serde_json::from_str::<Submission>(r#"{"level": "x", "extra": 1}"#).is_err());
        assert!(serde_json::from_str::<Submission>(
            r#"{"level": "x", "minimal": {"platform": "qemu", "kernel": "6.1"}}"#
        )
        .is_err());
        assert!(serde_json::from_str::<Submission>(r#"{"level": "x", "full": {"disks": []}}"#)
            .is_err());
    }

    #[test]
    fn test_fields_accept_any_shape() {
        let full: FullIdentity = serde_json::from_value(json!({
            "hardware": {"cpu": [{"field": "Architecture:", "data": "x86_64"}]},
            "network": ["eth0", "lo"],
            "container_rt": 3
        }))
        .unwrap();
        assert_eq!(full.container_rt, Some(json!(3)));
        assert!(full.network.as_ref().unwrap().is_array());
    }

    #[test]
    fn test_empty_full_renders_empty_document() {
        assert!(to_document(&FullIdentity::default()).unwrap().is_empty());
    }
}
