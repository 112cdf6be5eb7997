use std::result;
use thiserror::Error;

pub type Result<T> = result::Result<T, BrushFilterError>;

#[derive(Clone, Debug, Default)]
pub struct ErrorContext {
    pub contexts: Vec<String>,
}

impl std::fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        for (i, context) in self.contexts.iter().enumerate() {
            writeln!(f, "    Context[{i}]: {context}")?;
        }
        Ok(())
    }
}

#[derive(Error, Debug)]
pub enum BrushFilterError {
    #[error("Internal error: {0}\n{1}")]
    InternalError(String, ErrorContext),

    #[error("Chart Specification error: {0}\n{1}")]
    SpecificationError(String, ErrorContext),

    #[error("Scale error: {0}\n{1}")]
    ScaleError(String, ErrorContext),

    #[error("View update error: {0}\n{1}")]
    UpdateError(String, ErrorContext),

    #[cfg(feature = "json")]
    #[error("Serde JSON Error: {0}\n{1}")]
    SerdeJsonError(serde_json::Error, ErrorContext),
}

impl BrushFilterError {
    /// Append a new context level to the error
    pub fn with_context<S, F>(self, context_fn: F) -> Self
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        use BrushFilterError::*;
        match self {
            InternalError(msg, mut context) => {
                context.contexts.push(context_fn().into());
                BrushFilterError::InternalError(msg, context)
            }
            SpecificationError(msg, mut context) => {
                context.contexts.push(context_fn().into());
                BrushFilterError::SpecificationError(msg, context)
            }
            ScaleError(msg, mut context) => {
                context.contexts.push(context_fn().into());
                BrushFilterError::ScaleError(msg, context)
            }
            UpdateError(msg, mut context) => {
                context.contexts.push(context_fn().into());
                BrushFilterError::UpdateError(msg, context)
            }
            #[cfg(feature = "json")]
            SerdeJsonError(err, mut context) => {
                context.contexts.push(context_fn().into());
                BrushFilterError::SerdeJsonError(err, context)
            }
        }
    }

    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::InternalError(message.into(), Default::default())
    }

    pub fn specification<S: Into<String>>(message: S) -> Self {
        Self::SpecificationError(message.into(), Default::default())
    }

    pub fn scale<S: Into<String>>(message: S) -> Self {
        Self::ScaleError(message.into(), Default::default())
    }

    pub fn update<S: Into<String>>(message: S) -> Self {
        Self::UpdateError(message.into(), Default::default())
    }
}

pub trait ResultWithContext<R> {
    fn with_context<S, F>(self, context_fn: F) -> Result<R>
    where
        F: FnOnce() -> S,
        S: Into<String>;
}

impl<R, E> ResultWithContext<R> for result::Result<R, E>
where
    E: Into<BrushFilterError>,
{
    fn with_context<S, F>(self, context_fn: F) -> Result<R>
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        match self {
            Ok(val) => Ok(val),
            Err(err) => {
                let brush_filter_error: BrushFilterError = err.into();
                Err(brush_filter_error.with_context(context_fn))
            }
        }
    }
}

#[cfg(feature = "json")]
impl From<serde_json::Error> for BrushFilterError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerdeJsonError(err, Default::default())
    }
}
