//! A single exception with its frames.

use crate::truncate::{
    is_owned, opt_into_owned, opt_owned, truncate_opt, truncate_slice, truncate_str, Truncatable,
};
use crate::Frame;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::error::Error;

/// Class and message of an exception.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExceptionInfo {
    /// Error type name.
    #[serde(rename = "class")]
    pub class_name: String,

    /// Error message.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// Longer human description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ExceptionInfo {
    pub fn new(class_name: impl Into<String>) -> Self {
        Self {
            class_name: class_name.into(),
            message: None,
            description: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Describe one error, without walking its sources.
    ///
    /// The class is the leading identifier of the error's `Debug` output,
    /// which is the type or variant name for derived impls.
    pub fn from_error(error: &(dyn Error + 'static)) -> Self {
        let debug = format!("{:?}", error);
        let class_name: String = debug
            .chars()
            .take_while(|c| c.is_alphanumeric() || *c == '_' || *c == ':')
            .collect();
        let class_name = if class_name.is_empty() {
            "Error".to_string()
        } else {
            class_name
        };
        Self::new(class_name).with_message(error.to_string())
    }
}

impl Truncatable for ExceptionInfo {
    fn truncate_strings(&self, max_length: usize) -> Cow<'_, Self> {
        let class_name = truncate_str(&self.class_name, max_length);
        let message = truncate_opt(&self.message, max_length);
        let description = truncate_opt(&self.description, max_length);

        if !is_owned(&class_name) && !opt_owned(&message) && !opt_owned(&description) {
            return Cow::Borrowed(self);
        }

        Cow::Owned(ExceptionInfo {
            class_name: class_name.into_owned(),
            message: opt_into_owned(message),
            description: opt_into_owned(description),
        })
    }
}

/// One exception and the frames that raised it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trace {
    /// Frames, outermost call first.
    pub frames: Vec<Frame>,

    /// The exception itself.
    pub exception: ExceptionInfo,
}

impl Trace {
    /// Create a trace with no frames.
    pub fn new(exception: ExceptionInfo) -> Self {
        Self {
            frames: Vec::new(),
            exception,
        }
    }

    /// Replace the frame list.
    pub fn with_frames(mut self, frames: Vec<Frame>) -> Self {
        self.frames = frames;
        self
    }

    /// Append a frame.
    pub fn push_frame(&mut self, frame: Frame) {
        self.frames.push(frame);
    }

    /// Trace for a single error. Frames are left empty.
    pub fn from_error(error: &(dyn Error + 'static)) -> Self {
        Self::new(ExceptionInfo::from_error(error))
    }
}

impl Truncatable for Trace {
    fn truncate_strings(&self, max_length: usize) -> Cow<'_, Self> {
        let frames = truncate_slice(&self.frames, max_length);
        let exception = self.exception.truncate_strings(max_length);

        if !is_owned(&frames) && !is_owned(&exception) {
            return Cow::Borrowed(self);
        }

        Cow::Owned(Trace {
            frames: frames.into_owned(),
            exception: exception.into_owned(),
        })
    }
}
