//! The root of a report tree.

use crate::truncate::{is_owned, opt_into_owned, opt_owned, truncate_opt, truncate_str, Truncatable};
use crate::{Body, Level, Person, Request};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::BTreeMap;
use uuid::Uuid;

/// Language tag sent with every report.
pub const LANGUAGE: &str = "rust";

/// One captured report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Data {
    /// Deployment environment, e.g. `production`.
    pub environment: String,

    /// Main content.
    pub body: Body,

    /// Severity.
    #[serde(default)]
    pub level: Level,

    /// Capture time, seconds since the epoch on the wire.
    #[serde(with = "chrono::serde::ts_seconds")]
    pub timestamp: DateTime<Utc>,

    /// Version of the reporting application.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code_version: Option<String>,

    /// Source language of the reporting application.
    pub language: String,

    /// Short title shown in listings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Client-side identifier for de-duplication.
    pub uuid: Uuid,

    /// Request being handled, when there was one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request: Option<Request>,

    /// Affected user, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub person: Option<Person>,

    /// Free-form values. Opaque to truncation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom: Option<BTreeMap<String, serde_json::Value>>,
}

impl Data {
    /// Create a report stamped with the current time and a fresh uuid.
    pub fn new(environment: impl Into<String>, body: Body) -> Self {
        Self {
            environment: environment.into(),
            body,
            level: Level::default(),
            timestamp: Utc::now(),
            code_version: None,
            language: LANGUAGE.to_string(),
            title: None,
            uuid: Uuid::new_v4(),
            request: None,
            person: None,
            custom: None,
        }
    }

    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    pub fn with_code_version(mut self, code_version: impl Into<String>) -> Self {
        self.code_version = Some(code_version.into());
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_request(mut self, request: Option<Request>) -> Self {
        self.request = request;
        self
    }

    pub fn with_person(mut self, person: Option<Person>) -> Self {
        self.person = person;
        self
    }

    pub fn with_custom(mut self, custom: BTreeMap<String, serde_json::Value>) -> Self {
        self.custom = Some(custom);
        self
    }

    /// Size of the JSON encoding in bytes.
    pub fn encoded_len(&self) -> crate::Result<usize> {
        Ok(serde_json::to_vec(self)?.len())
    }
}

impl Truncatable for Data {
    fn truncate_strings(&self, max_length: usize) -> Cow<'_, Self> {
        let environment = truncate_str(&self.environment, max_length);
        let body = self.body.truncate_strings(max_length);
        let code_version = truncate_opt(&self.code_version, max_length);
        let language = truncate_str(&self.language, max_length);
        let title = truncate_opt(&self.title, max_length);
        let request = self.request.as_ref().map(|r| r.truncate_strings(max_length));
        let person = self.person.as_ref().map(|p| p.truncate_strings(max_length));

        if !is_owned(&environment)
            && !is_owned(&body)
            && !opt_owned(&code_version)
            && !is_owned(&language)
            && !opt_owned(&title)
            && !opt_owned(&request)
            && !opt_owned(&person)
        {
            return Cow::Borrowed(self);
        }

        Cow::Owned(Data {
            environment: environment.into_owned(),
            body: body.into_owned(),
            level: self.level,
            timestamp: self.timestamp,
            code_version: opt_into_owned(code_version),
            language: language.into_owned(),
            title: opt_into_owned(title),
            uuid: self.uuid,
            request: request.map(Cow::into_owned),
            person: person.map(Cow::into_owned),
            custom: self.custom.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let data = Data::new("production", Body::message("hi"));
        assert_eq!(data.level, Level::Error);
        assert_eq!(data.language, "rust");
        assert!(data.request.is_none());
    }

    #[test]
    fn test_identity_fields_survive_truncation() {
        let data = Data::new("staging", Body::message("m".repeat(50)))
            .with_title("t".repeat(50))
            .with_level(Level::Warning);
        let out = data.truncate_strings(8);

        assert_eq!(out.uuid, data.uuid);
        assert_eq!(out.timestamp, data.timestamp);
        assert_eq!(out.level, Level::Warning);
        assert_eq!(out.title.as_deref(), Some("tttttttt"));
        assert_eq!(out.environment, "staging");
    }

    #[test]
    fn test_custom_is_opaque() {
        let mut custom = BTreeMap::new();
        custom.insert("blob".to_string(), serde_json::json!("z".repeat(100)));
        let data = Data::new("dev", Body::message("x".repeat(20))).with_custom(custom.clone());
        let out = data.truncate_strings(4);
        assert_eq!(out.custom, Some(custom));
    }

    #[test]
    fn test_encoded_len_matches_serialization() {
        let data = Data::new("dev", Body::message("abc"));
        let expected = serde_json::to_string(&data).unwrap().len();
        assert_eq!(data.encoded_len().unwrap(), expected);
    }

    #[test]
    fn test_timestamp_is_seconds_on_wire() {
        let data = Data::new("dev", Body::message("abc"));
        let json = serde_json::to_value(&data).unwrap();
        assert_eq!(json["timestamp"], data.timestamp.timestamp());
    }
}
