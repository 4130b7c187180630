//! Single stack frame.

use crate::truncate::{is_owned, opt_into_owned, opt_owned, truncate_opt, truncate_str, Truncatable};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// One frame of a trace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    /// Source file name.
    pub filename: String,

    /// Line number (1-based).
    #[serde(rename = "lineno", skip_serializing_if = "Option::is_none")]
    pub line_number: Option<u32>,

    /// Column number (1-based).
    #[serde(rename = "colno", skip_serializing_if = "Option::is_none")]
    pub column_number: Option<u32>,

    /// Function or method name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,

    /// Line of source code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,

    /// Enclosing type or module path.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,

    /// Argument values. Opaque to truncation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub args: Option<Vec<serde_json::Value>>,
}

impl Frame {
    /// Create a frame for a file.
    pub fn new(filename: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            line_number: None,
            column_number: None,
            method: None,
            code: None,
            class_name: None,
            args: None,
        }
    }

    /// Set the line number.
    pub fn with_line(mut self, line: u32) -> Self {
        self.line_number = Some(line);
        self
    }

    /// Set the column number.
    pub fn with_column(mut self, column: u32) -> Self {
        self.column_number = Some(column);
        self
    }

    /// Set the method name.
    pub fn with_method(mut self, method: impl Into<String>) -> Self {
        self.method = Some(method.into());
        self
    }

    /// Set the source line.
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// Set the enclosing type name.
    pub fn with_class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = Some(class_name.into());
        self
    }

    /// Attach opaque argument values.
    pub fn with_args(mut self, args: Vec<serde_json::Value>) -> Self {
        self.args = Some(args);
        self
    }
}

impl Truncatable for Frame {
    fn truncate_strings(&self, max_length: usize) -> Cow<'_, Self> {
        let filename = truncate_str(&self.filename, max_length);
        let method = truncate_opt(&self.method, max_length);
        let code = truncate_opt(&self.code, max_length);
        let class_name = truncate_opt(&self.class_name, max_length);

        if !is_owned(&filename) && !opt_owned(&method) && !opt_owned(&code) && !opt_owned(&class_name)
        {
            return Cow::Borrowed(self);
        }

        Cow::Owned(Frame {
            filename: filename.into_owned(),
            line_number: self.line_number,
            column_number: self.column_number,
            method: opt_into_owned(method),
            code: opt_into_owned(code),
            class_name: opt_into_owned(class_name),
            args: self.args.clone(),
        })
    }
}
