//! Error-like values and nil classification
//!
//! `ErrorLike` is the capability a value needs to be handed to
//! [`Logger::not_nil`](crate::Logger::not_nil): it either carries a
//! human-readable failure message or represents "no error".
//!
//! Wrappers defer to what they wrap, so a null nested inside an otherwise
//! present wrapper (`Some(None)`, `Box<Option<E>>`, `Ok(..)`) still
//! classifies as nil.

use super::error::LoggerError;
use super::value::FieldValue;
use std::error::Error;
use std::rc::Rc;
use std::sync::Arc;

pub trait ErrorLike {
    /// The failure message, or `None` when the value represents "no error"
    fn failure_message(&self) -> Option<String>;

    /// Whether this value represents "no error"
    ///
    /// Must agree with `failure_message().is_none()`. Override it when the
    /// answer is known without building the message.
    fn is_nil(&self) -> bool {
        self.failure_message().is_none()
    }
}

/// Whether `value` represents the absence of an error
#[inline]
pub fn is_nil<E: ErrorLike + ?Sized>(value: &E) -> bool {
    value.is_nil()
}

impl<'a> ErrorLike for dyn Error + 'a {
    fn failure_message(&self) -> Option<String> {
        Some(self.to_string())
    }

    fn is_nil(&self) -> bool {
        false
    }
}

impl<'a> ErrorLike for dyn Error + Send + 'a {
    fn failure_message(&self) -> Option<String> {
        Some(self.to_string())
    }

    fn is_nil(&self) -> bool {
        false
    }
}

impl<'a> ErrorLike for dyn Error + Send + Sync + 'a {
    fn failure_message(&self) -> Option<String> {
        Some(self.to_string())
    }

    fn is_nil(&self) -> bool {
        false
    }
}

/// Implement [`ErrorLike`] for types whose `Display` output is the failure message
///
/// ```
/// #[derive(Debug)]
/// struct Timeout;
///
/// impl std::fmt::Display for Timeout {
///     fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
///         f.write_str("timed out")
///     }
/// }
///
/// rust_kvlog::impl_error_like!(Timeout);
/// assert!(!rust_kvlog::is_nil(&Some(Timeout)));
/// ```
#[macro_export]
macro_rules! impl_error_like {
    ($($t:ty),+ $(,)?) => {
        $(
            impl $crate::ErrorLike for $t {
                fn failure_message(&self) -> ::std::option::Option<::std::string::String> {
                    ::std::option::Option::Some(::std::string::ToString::to_string(self))
                }

                fn is_nil(&self) -> bool {
                    false
                }
            }
        )+
    };
}

crate::impl_error_like!(
    LoggerError,
    std::io::Error,
    std::fmt::Error,
    serde_json::Error,
    std::num::ParseIntError,
    std::num::ParseFloatError,
    std::str::Utf8Error,
    std::string::FromUtf8Error,
    chrono::ParseError,
    str,
    String,
);

impl ErrorLike for FieldValue {
    fn failure_message(&self) -> Option<String> {
        match self {
            FieldValue::Null => None,
            other => Some(other.to_string()),
        }
    }

    fn is_nil(&self) -> bool {
        matches!(self, FieldValue::Null)
    }
}

impl<T: ErrorLike + ?Sized> ErrorLike for &T {
    fn failure_message(&self) -> Option<String> {
        (**self).failure_message()
    }

    fn is_nil(&self) -> bool {
        (**self).is_nil()
    }
}

impl<T: ErrorLike + ?Sized> ErrorLike for Box<T> {
    fn failure_message(&self) -> Option<String> {
        (**self).failure_message()
    }

    fn is_nil(&self) -> bool {
        (**self).is_nil()
    }
}

impl<T: ErrorLike + ?Sized> ErrorLike for Arc<T> {
    fn failure_message(&self) -> Option<String> {
        (**self).failure_message()
    }

    fn is_nil(&self) -> bool {
        (**self).is_nil()
    }
}

impl<T: ErrorLike + ?Sized> ErrorLike for Rc<T> {
    fn failure_message(&self) -> Option<String> {
        (**self).failure_message()
    }

    fn is_nil(&self) -> bool {
        (**self).is_nil()
    }
}

impl<T: ErrorLike> ErrorLike for Option<T> {
    fn failure_message(&self) -> Option<String> {
        self.as_ref().and_then(ErrorLike::failure_message)
    }

    fn is_nil(&self) -> bool {
        self.as_ref().map_or(true, ErrorLike::is_nil)
    }
}

impl<T, E: ErrorLike> ErrorLike for Result<T, E> {
    fn failure_message(&self) -> Option<String> {
        self.as_ref().err().and_then(ErrorLike::failure_message)
    }

    fn is_nil(&self) -> bool {
        self.as_ref().err().map_or(true, ErrorLike::is_nil)
    }
}
