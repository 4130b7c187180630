//! Report assembly.
//!
//! Providers supply the request and person parts, the body comes from the
//! caller, and the finished tree is bounded before it is handed off:
//! first every string is truncated to `max_string_length`, then the whole
//! encoding is fitted to `max_payload_bytes`.

use crate::{PersonProvider, Provider, RequestProvider, Result};
use fl_config::Settings;
use fl_payload::{truncate, Body, Data, Level, PayloadTruncator, Person, Request};
use serde_json::Value;
use std::collections::BTreeMap;
use std::error::Error;

type BoxedProvider<T> = Box<dyn Provider<T> + Send + Sync>;

/// Assembles bounded reports from configured providers.
pub struct ReportBuilder {
    environment: String,
    code_version: Option<String>,
    max_string_length: usize,
    truncator: PayloadTruncator,
    request_provider: Option<BoxedProvider<Request>>,
    person_provider: Option<BoxedProvider<Person>>,
    custom_provider: Option<BoxedProvider<BTreeMap<String, Value>>>,
}

impl ReportBuilder {
    /// A builder with settings-driven request and person providers.
    pub fn from_settings(settings: &Settings) -> Self {
        Self::bare(settings)
            .with_request_provider(RequestProvider::from_settings(settings))
            .with_person_provider(PersonProvider)
    }

    /// A builder with no providers.
    pub fn bare(settings: &Settings) -> Self {
        Self {
            environment: settings.environment.clone(),
            code_version: settings.code_version.clone(),
            max_string_length: settings.max_string_length,
            truncator: PayloadTruncator::new(
                settings.max_payload_bytes,
                settings.max_string_length,
            ),
            request_provider: None,
            person_provider: None,
            custom_provider: None,
        }
    }

    pub fn with_request_provider(
        mut self,
        provider: impl Provider<Request> + Send + Sync + 'static,
    ) -> Self {
        self.request_provider = Some(Box::new(provider));
        self
    }

    pub fn with_person_provider(
        mut self,
        provider: impl Provider<Person> + Send + Sync + 'static,
    ) -> Self {
        self.person_provider = Some(Box::new(provider));
        self
    }

    pub fn with_custom_provider(
        mut self,
        provider: impl Provider<BTreeMap<String, Value>> + Send + Sync + 'static,
    ) -> Self {
        self.custom_provider = Some(Box::new(provider));
        self
    }

    /// Replace the payload size strategies.
    pub fn with_truncator(mut self, truncator: PayloadTruncator) -> Self {
        self.truncator = truncator;
        self
    }

    pub fn max_string_length(&self) -> usize {
        self.max_string_length
    }

    /// Assemble a report without bounding it.
    pub fn assemble(&self, body: Body, level: Level, title: Option<String>) -> Data {
        let mut data = Data::new(self.environment.clone(), body)
            .with_level(level)
            .with_request(self.request_provider.as_ref().and_then(|p| p.provide()))
            .with_person(self.person_provider.as_ref().and_then(|p| p.provide()));
        data.code_version = self.code_version.clone();
        data.title = title;
        data.custom = self.custom_provider.as_ref().and_then(|p| p.provide());
        data
    }

    /// Bound an assembled report: truncate strings, then fit the byte budget.
    pub fn finish(&self, data: Data) -> Result<Data> {
        let data = truncate(&data, self.max_string_length).into_owned();
        Ok(self.truncator.fit(data)?)
    }

    /// Build a bounded report for an error and its causes.
    pub fn error(&self, error: &(dyn Error + 'static), level: Level) -> Result<Data> {
        let title = error.to_string();
        self.finish(self.assemble(Body::from_error(error), level, Some(title)))
    }

    /// Build a bounded report for a message.
    pub fn message(&self, message: impl Into<String>, level: Level) -> Result<Data> {
        self.finish(self.assemble(Body::message(message), level, None))
    }
}

impl std::fmt::Debug for ReportBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReportBuilder")
            .field("environment", &self.environment)
            .field("code_version", &self.code_version)
            .field("max_string_length", &self.max_string_length)
            .field("truncator", &self.truncator)
            .field("request_provider", &self.request_provider.is_some())
            .field("person_provider", &self.person_provider.is_some())
            .field("custom_provider", &self.custom_provider.is_some())
            .finish()
    }
}
