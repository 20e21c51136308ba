//! Record builder: `Params` is one log event, `Param` one step that shapes it
//!
//! All three calling conventions (positional, formatted, structured) funnel
//! into the same sequence of `Param` applications.

use super::caller::Caller;
use super::level::Level;
use super::render;
use super::value::Value;
use serde::Serialize;
use std::fmt;

/// Key used for a trailing field that has no value partner
pub const BAD_KEY: &str = "!BADKEY";

/// A single log record
///
/// `format` being `Some` selects template rendering; `None` selects bare
/// positional rendering. Fields are an alternating key/value sequence.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Params {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caller: Option<Caller>,
    pub level: Level,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    pub args: Vec<Value>,
    pub fields: Vec<Value>,
}

impl Params {
    /// Build a record from a level, an optional template and a sequence of steps
    pub fn build<I>(level: Level, format: Option<&str>, params: I) -> Self
    where
        I: IntoIterator<Item = Param>,
    {
        let mut record = Params {
            level,
            format: format.map(str::to_string),
            ..Default::default()
        };
        for param in params {
            param.apply(&mut record);
        }
        record
    }

    /// Render template and arguments into the final message text
    ///
    /// A missing or empty template joins the arguments; otherwise the template
    /// is expanded printf-style. Mismatches render inline markers rather than
    /// failing.
    pub fn message(&self) -> String {
        match self.format.as_deref() {
            None | Some("") => render::sprint(&self.args),
            Some(template) if self.args.is_empty() => template.to_string(),
            Some(template) => render::sprintf(template, &self.args),
        }
    }

    /// Interpret `fields` as key/value pairs
    ///
    /// Non-string keys are rendered to text; a dangling key is paired with
    /// [`BAD_KEY`].
    pub fn field_pairs(&self) -> Vec<(String, &Value)> {
        let mut pairs = Vec::with_capacity(self.fields.len() / 2 + 1);
        for chunk in self.fields.chunks(2) {
            match chunk {
                [key, value] => pairs.push((key.to_string(), value)),
                [dangling] => pairs.push((BAD_KEY.to_string(), dangling)),
                _ => {}
            }
        }
        pairs
    }
}

/// One transformation applied to a record under construction
pub enum Param {
    /// Append positional arguments
    Args(Vec<Value>),
    /// Set the template, or extend it when one is already set, then append arguments
    Argsf(String, Vec<Value>),
    /// Append structured fields
    Fields(Vec<Value>),
    /// Arbitrary in-place edit
    With(Box<dyn FnOnce(&mut Params) + Send>),
}

impl Param {
    pub fn apply(self, record: &mut Params) {
        match self {
            Param::Args(values) => record.args.extend(values),
            Param::Argsf(template, values) => {
                match record.format.as_mut() {
                    Some(existing) => existing.push_str(&template),
                    None => record.format = Some(template),
                }
                record.args.extend(values);
            }
            Param::Fields(values) => record.fields.extend(values),
            Param::With(edit) => edit(record),
        }
    }

    pub fn with<F>(edit: F) -> Self
    where
        F: FnOnce(&mut Params) + Send + 'static,
    {
        Param::With(Box::new(edit))
    }
}

impl fmt::Debug for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Param::Args(values) => f.debug_tuple("Args").field(values).finish(),
            Param::Argsf(template, values) => {
                f.debug_tuple("Argsf").field(template).field(values).finish()
            }
            Param::Fields(values) => f.debug_tuple("Fields").field(values).finish(),
            Param::With(_) => f.write_str("With(..)"),
        }
    }
}

/// Append positional arguments
pub fn args<I, V>(values: I) -> Param
where
    I: IntoIterator<Item = V>,
    V: Into<Value>,
{
    Param::Args(values.into_iter().map(Into::into).collect())
}

/// Set (or concatenate onto) the template and append its arguments
///
/// Applying this twice to one record concatenates the templates verbatim,
/// with no separator.
pub fn argsf<I, V>(template: impl Into<String>, values: I) -> Param
where
    I: IntoIterator<Item = V>,
    V: Into<Value>,
{
    Param::Argsf(
        template.into(),
        values.into_iter().map(Into::into).collect(),
    )
}

/// Append structured fields, conventionally alternating key and value
pub fn fields<I, V>(values: I) -> Param
where
    I: IntoIterator<Item = V>,
    V: Into<Value>,
{
    Param::Fields(values.into_iter().map(Into::into).collect())
}
