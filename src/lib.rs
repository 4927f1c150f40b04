#[macro_use]
extern crate enum_primitive;
extern crate failure;
#[macro_use]
extern crate failure_derive;
extern crate log;

use std::env;
use std::ffi;
use std::fmt;

use log::{debug, trace, warn};

pub use crate::factory::FactoryHandle;
pub use crate::factory::FactoryParameter;
pub use crate::factory::FactoryParameterCollection;
pub use crate::factory::FactoryParameterValue;
pub use crate::factory::SpeechFactory;
pub use crate::parameter::MAX_PARAMETER_NAME_BYTES;
pub use crate::parameter::MAX_STRING_VALUE_BYTES;
pub use crate::parameter::NamedParameter;
pub use crate::parameter::ParameterCollection;
pub use crate::parameter::ParameterHandle;
pub use crate::parameter::ParameterValue;
pub use crate::recognizer::SpeechRecognizer;
pub use crate::session::Session;
pub use crate::session::SessionHandle;
pub use crate::session::SessionParameter;
pub use crate::session::SessionParameterCollection;
pub use crate::session::SessionParameterValue;
pub use crate::value::Value;
pub use crate::value::ValueCollection;

pub mod speech_api;
mod factory;
mod parameter;
mod recognizer;
mod session;
mod value;

use crate::speech_api::*;

pub const SPXHANDLE_INVALID: SPXHANDLE = 0;

#[derive(Fail, Debug, Clone, PartialEq, Eq)]
pub enum SpxError {
    #[fail(display = "Speech API error code: {}.", _0)]
    General(SPXHR),
    #[fail(display = "Invalid CString (NulError).")]
    StrNulError(#[cause] ffi::NulError),
    #[fail(display = "Missing configuration: {}.", _0)]
    MissingConfig(String),
}

impl SpxError {
    /// Status code reported by the handle layer, if the error came from there.
    pub fn code(&self) -> Option<SPXHR> {
        match *self {
            SpxError::General(hr) => Some(hr),
            _ => None,
        }
    }
}

impl From<ffi::NulError> for SpxError {
    fn from(err: ffi::NulError) -> Self {
        SpxError::StrNulError(err)
    }
}

#[inline(always)]
pub(crate) fn convert_err(hr: SPXHR) -> Result<(), SpxError> {
    if hr != SPX_NOERROR {
        return Err(SpxError::General(hr));
    }
    Ok(())
}

pub(crate) fn env_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.is_empty())
}

/// Owns a handle-layer handle and closes it on drop.
pub struct SmartHandle<T: Copy + fmt::Debug + PartialEq> {
    name: &'static str,
    internal: T,
    invalid: T,
    release_fn: fn(T) -> SPXHR,
}

impl<T: Copy + fmt::Debug + PartialEq> SmartHandle<T> {
    #[inline(always)]
    pub(crate) fn create(name: &'static str, handle: T, invalid: T, release_fn: fn(T) -> SPXHR) -> SmartHandle<T> {
        let result = SmartHandle { name, internal: handle, invalid, release_fn };
        debug!("create {}", result);
        result
    }

    #[inline(always)]
    pub fn get(&self) -> T {
        self.internal
    }

    /// Releases the handle now, reporting the handle layer's status.
    pub(crate) fn close(&mut self) -> Result<(), SpxError> {
        if self.internal == self.invalid {
            return Ok(());
        }
        let handle = self.internal;
        self.internal = self.invalid;
        trace!("release {}({:?})", self.name, handle);
        convert_err((self.release_fn)(handle))
    }
}

impl<T: Copy + fmt::Debug + PartialEq> Drop for SmartHandle<T> {
    fn drop(&mut self) {
        if let Err(err) = self.close() {
            warn!("failed to release {}: {}", self.name, err);
        }
    }
}

impl<T: Copy + fmt::Debug + PartialEq> fmt::Display for SmartHandle<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}({:?})", self.name, self.internal)
    }
}

impl<T: Copy + fmt::Debug + PartialEq> fmt::Debug for SmartHandle<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
