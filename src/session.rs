use std::ffi::CStr;
use std::ops::Deref;

use enum_primitive::FromPrimitive;

use crate::convert_err;
use crate::parameter::{NamedParameter, ParameterCollection, ParameterHandle, ParameterValue};
use crate::speech_api::*;
use crate::SmartHandle;
use crate::SpeechRecognizer;
use crate::SpxError;
use crate::SPXHANDLE_INVALID;

enum_from_primitive! {
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SessionParameter {
    SubscriptionKey = 1,
    AuthorizationToken = 2
}
}

impl SessionParameter {
    pub fn from_raw(raw: i32) -> Result<SessionParameter, SpxError> {
        SessionParameter::from_i32(raw).ok_or(SpxError::General(SPXERR_INVALID_ARG))
    }
}

// Shares names with the factory so seeded values line up.
impl NamedParameter for SessionParameter {
    fn canonical_name(self) -> &'static str {
        match self {
            SessionParameter::SubscriptionKey => "SPEECH-SubscriptionKey",
            SessionParameter::AuthorizationToken => "SPEECH-AuthToken",
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct SessionHandle(pub SPXSESSIONHANDLE);

impl ParameterHandle for SessionHandle {
    type Parameter = SessionParameter;

    fn set_parameter_string(self, name: &CStr, value: &CStr) -> SPXHR {
        session_set_parameter_string(self.0, name, value)
    }

    fn get_parameter_string(self, name: &CStr, value: &mut [u8], default: &CStr) -> SPXHR {
        session_get_parameter_string(self.0, name, value, default)
    }

    fn contains_parameter_string(self, name: &CStr) -> bool {
        session_contains_parameter_string(self.0, name)
    }

    fn set_parameter_int32(self, name: &CStr, value: i32) -> SPXHR {
        session_set_parameter_int32(self.0, name, value)
    }

    fn get_parameter_int32(self, name: &CStr, value: &mut i32, default: i32) -> SPXHR {
        session_get_parameter_int32(self.0, name, value, default)
    }

    fn contains_parameter_int32(self, name: &CStr) -> bool {
        session_contains_parameter_int32(self.0, name)
    }

    fn set_parameter_bool(self, name: &CStr, value: bool) -> SPXHR {
        session_set_parameter_bool(self.0, name, value)
    }

    fn get_parameter_bool(self, name: &CStr, value: &mut bool, default: bool) -> SPXHR {
        session_get_parameter_bool(self.0, name, value, default)
    }

    fn contains_parameter_bool(self, name: &CStr) -> bool {
        session_contains_parameter_bool(self.0, name)
    }
}

pub type SessionParameterValue = ParameterValue<SessionHandle>;
pub type SessionParameterCollection = ParameterCollection<SessionHandle>;

/// Session of a recognizer. All sessions taken from the same recognizer
/// see the same parameters.
#[derive(Debug)]
pub struct Session {
    handle: SmartHandle<SPXSESSIONHANDLE>,
    parameters: SessionParameterCollection,
}

impl Session {
    pub fn from_recognizer(recognizer: &SpeechRecognizer) -> Result<Session, SpxError> {
        let mut handle = SPXHANDLE_INVALID;
        convert_err(session_from_recognizer(recognizer.get_handle(), &mut handle))?;
        Ok(Session {
            handle: SmartHandle::create("Session", handle, SPXHANDLE_INVALID, session_handle_close),
            parameters: SessionParameterCollection::new(SessionHandle(handle)),
        })
    }

    pub fn is_valid(&self) -> bool {
        session_handle_is_valid(self.handle.get())
    }

    pub fn close(mut self) -> Result<(), SpxError> {
        self.handle.close()
    }

    #[inline]
    pub fn get_handle(&self) -> SPXSESSIONHANDLE {
        self.handle.get()
    }
}

impl Deref for Session {
    type Target = SessionParameterCollection;

    fn deref(&self) -> &Self::Target {
        &self.parameters
    }
}
