//! Capturing failures and handing finished reports to a transport.

use crate::{ReportBuilder, Result};
use fl_config::{load_settings, Settings};
use fl_payload::{Data, Level};
use std::error::Error;
use std::path::Path;
use tracing::{debug, error, info};

/// Delivers a finished report. Transport and retries live behind this.
pub trait Sender {
    fn send(&self, data: &Data) -> Result<()>;
}

impl<S: Sender + ?Sized> Sender for &S {
    fn send(&self, data: &Data) -> Result<()> {
        (**self).send(data)
    }
}

impl<S: Sender + ?Sized> Sender for Box<S> {
    fn send(&self, data: &Data) -> Result<()> {
        (**self).send(data)
    }
}

/// Builds reports and sends them.
pub struct Reporter<S> {
    builder: ReportBuilder,
    sender: S,
}

impl<S> std::fmt::Debug for Reporter<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Reporter")
            .field("builder", &self.builder)
            .field("sender", &std::any::type_name::<S>())
            .finish()
    }
}

impl<S: Sender> Reporter<S> {
    pub fn new(builder: ReportBuilder, sender: S) -> Self {
        Self { builder, sender }
    }

    /// A reporter with settings-driven providers.
    pub fn from_settings(settings: &Settings, sender: S) -> Self {
        Self::new(ReportBuilder::from_settings(settings), sender)
    }

    /// A reporter configured from the resolved settings file and the
    /// `FAULTLINE_*` environment.
    pub fn load(explicit: Option<&Path>, sender: S) -> Result<Self> {
        let (settings, source) = load_settings(explicit)?;
        info!(source = %source, environment = %settings.environment, "reporter configured");
        Ok(Self::from_settings(&settings, sender))
    }

    pub fn builder(&self) -> &ReportBuilder {
        &self.builder
    }

    pub fn sender(&self) -> &S {
        &self.sender
    }

    /// Report an error at `error` level.
    pub fn report(&self, err: &(dyn Error + 'static)) -> Result<()> {
        self.report_with_level(err, Level::Error)
    }

    pub fn report_with_level(&self, err: &(dyn Error + 'static), level: Level) -> Result<()> {
        let data = self.builder.error(err, level)?;
        self.deliver(&data)
    }

    /// Report a plain message.
    pub fn report_message(&self, message: impl Into<String>, level: Level) -> Result<()> {
        let data = self.builder.message(message, level)?;
        self.deliver(&data)
    }

    /// Run `f`, reporting any error it returns.
    ///
    /// The error is passed back unchanged. A failure to report is logged and
    /// never replaces it.
    pub fn guard<T, E>(
        &self,
        f: impl FnOnce() -> std::result::Result<T, E>,
    ) -> std::result::Result<T, E>
    where
        E: Error + 'static,
    {
        f().map_err(|err| {
            if let Err(report_err) = self.report(&err) {
                error!(error = %err, report_error = %report_err, "failed to report error");
            }
            err
        })
    }

    fn deliver(&self, data: &Data) -> Result<()> {
        self.sender.send(data)?;
        debug!(uuid = %data.uuid, level = %data.level, "report sent");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CaptureError;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Recording {
        sent: Mutex<Vec<Data>>,
    }

    impl Sender for Recording {
        fn send(&self, data: &Data) -> Result<()> {
            self.sent.lock().unwrap().push(data.clone());
            Ok(())
        }
    }

    struct Failing;

    impl Sender for Failing {
        fn send(&self, _data: &Data) -> Result<()> {
            Err(CaptureError::Send("connection refused".to_string()))
        }
    }

    #[derive(Debug)]
    struct Oops;

    impl std::fmt::Display for Oops {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "oops")
        }
    }

    impl Error for Oops {}

    #[test]
    fn test_report_sends_once() {
        let reporter = Reporter::from_settings(&Settings::default(), Recording::default());
        reporter.report(&Oops).unwrap();

        let sent = reporter.sender().sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].title.as_deref(), Some("oops"));
    }

    #[test]
    fn test_guard_passes_success_through() {
        let reporter = Reporter::from_settings(&Settings::default(), Recording::default());
        let value: std::result::Result<u8, Oops> = reporter.guard(|| Ok(5));
        assert_eq!(value.unwrap(), 5);
        assert!(reporter.sender().sent.lock().unwrap().is_empty());
    }

    #[test]
    fn test_guard_reports_and_returns_error() {
        let reporter = Reporter::from_settings(&Settings::default(), Recording::default());
        let result: std::result::Result<(), Oops> = reporter.guard(|| Err(Oops));
        assert!(result.is_err());
        assert_eq!(reporter.sender().sent.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_send_failure_never_masks_original_error() {
        let reporter = Reporter::from_settings(&Settings::default(), Failing);
        let result: std::result::Result<(), Oops> = reporter.guard(|| Err(Oops));
        assert_eq!(result.unwrap_err().to_string(), "oops");
    }

    #[test]
    fn test_send_failure_surfaces_from_report() {
        let reporter = Reporter::from_settings(&Settings::default(), Failing);
        let err = reporter.report_message("hi", Level::Info).unwrap_err();
        assert!(matches!(err, CaptureError::Send(_)));
    }

    #[test]
    fn test_load_rejects_invalid_settings_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("faultline.json");
        std::fs::write(&path, r#"{"max_string_length": -1}"#).unwrap();

        let err = Reporter::load(Some(&path), Recording::default()).unwrap_err();
        assert!(matches!(err, CaptureError::Config(_)));
    }

    #[test]
    fn test_debug_does_not_require_debug_sender() {
        let reporter = Reporter::from_settings(&Settings::default(), Recording::default());
        let rendered = format!("{:?}", reporter);
        assert!(rendered.starts_with("Reporter"));
        assert!(rendered.contains("Recording"));
    }

    #[test]
    fn test_borrowed_sender() {
        let recording = Recording::default();
        let reporter = Reporter::from_settings(&Settings::default(), &recording);
        reporter.report_message("hi", Level::Info).unwrap();
        assert_eq!(recording.sent.lock().unwrap().len(), 1);
    }
}
