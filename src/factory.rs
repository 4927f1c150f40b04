use std::ffi::CStr;
use std::ops::Deref;

use enum_primitive::FromPrimitive;
use log::info;

use crate::convert_err;
use crate::env_var;
use crate::parameter::{NamedParameter, ParameterCollection, ParameterHandle, ParameterValue};
use crate::speech_api::*;
use crate::SmartHandle;
use crate::SpxError;
use crate::SpeechRecognizer;
use crate::ValueCollection;
use crate::Value;
use crate::SPXHANDLE_INVALID;

enum_from_primitive! {
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum FactoryParameter {
    Region = 1,
    SubscriptionKey = 2,
    AuthorizationToken = 3,
    Endpoint = 4
}
}

impl FactoryParameter {
    /// Maps a raw identifier from the handle layer onto the enum.
    pub fn from_raw(raw: i32) -> Result<FactoryParameter, SpxError> {
        FactoryParameter::from_i32(raw).ok_or(SpxError::General(SPXERR_INVALID_ARG))
    }
}

impl NamedParameter for FactoryParameter {
    fn canonical_name(self) -> &'static str {
        match self {
            FactoryParameter::Region => "SPEECH-Region",
            FactoryParameter::SubscriptionKey => "SPEECH-SubscriptionKey",
            FactoryParameter::AuthorizationToken => "SPEECH-AuthToken",
            FactoryParameter::Endpoint => "SPEECH-Endpoint",
        }
    }
}

/// Borrowed factory handle.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct FactoryHandle(pub SPXFACTORYHANDLE);

impl ParameterHandle for FactoryHandle {
    type Parameter = FactoryParameter;

    fn set_parameter_string(self, name: &CStr, value: &CStr) -> SPXHR {
        speech_factory_set_parameter_string(self.0, name, value)
    }

    fn get_parameter_string(self, name: &CStr, value: &mut [u8], default: &CStr) -> SPXHR {
        speech_factory_get_parameter_string(self.0, name, value, default)
    }

    fn contains_parameter_string(self, name: &CStr) -> bool {
        speech_factory_contains_parameter_string(self.0, name)
    }

    fn set_parameter_int32(self, name: &CStr, value: i32) -> SPXHR {
        speech_factory_set_parameter_int32(self.0, name, value)
    }

    fn get_parameter_int32(self, name: &CStr, value: &mut i32, default: i32) -> SPXHR {
        speech_factory_get_parameter_int32(self.0, name, value, default)
    }

    fn contains_parameter_int32(self, name: &CStr) -> bool {
        speech_factory_contains_parameter_int32(self.0, name)
    }

    fn set_parameter_bool(self, name: &CStr, value: bool) -> SPXHR {
        speech_factory_set_parameter_bool(self.0, name, value)
    }

    fn get_parameter_bool(self, name: &CStr, value: &mut bool, default: bool) -> SPXHR {
        speech_factory_get_parameter_bool(self.0, name, value, default)
    }

    fn contains_parameter_bool(self, name: &CStr) -> bool {
        speech_factory_contains_parameter_bool(self.0, name)
    }
}

pub type FactoryParameterValue = ParameterValue<FactoryHandle>;
pub type FactoryParameterCollection = ParameterCollection<FactoryHandle>;

#[derive(Debug)]
pub struct SpeechFactory {
    handle: SmartHandle<SPXFACTORYHANDLE>,
    parameters: FactoryParameterCollection,
}

impl SpeechFactory {
    pub fn new() -> Result<SpeechFactory, SpxError> {
        let mut handle = SPXHANDLE_INVALID;
        convert_err(speech_factory_create(&mut handle))?;
        Ok(SpeechFactory {
            handle: SmartHandle::create("SpeechFactory", handle, SPXHANDLE_INVALID, speech_factory_handle_close),
            parameters: FactoryParameterCollection::new(FactoryHandle(handle)),
        })
    }

    pub fn from_subscription<S1, S2>(subscription: S1, region: S2) -> Result<SpeechFactory, SpxError>
        where S1: AsRef<str>, S2: AsRef<str> {
        let result = SpeechFactory::new()?;
        result.parameter(FactoryParameter::SubscriptionKey)?.set_string(subscription.as_ref())?;
        result.parameter(FactoryParameter::Region)?.set_string(region.as_ref())?;
        Ok(result)
    }

    pub fn from_authorization_token<S1, S2>(token: S1, region: S2) -> Result<SpeechFactory, SpxError>
        where S1: AsRef<str>, S2: AsRef<str> {
        let result = SpeechFactory::new()?;
        result.parameter(FactoryParameter::AuthorizationToken)?.set_string(token.as_ref())?;
        result.parameter(FactoryParameter::Region)?.set_string(region.as_ref())?;
        Ok(result)
    }

    pub fn from_endpoint<S1, S2>(endpoint: S1, subscription: S2) -> Result<SpeechFactory, SpxError>
        where S1: AsRef<str>, S2: AsRef<str> {
        let result = SpeechFactory::new()?;
        result.parameter(FactoryParameter::Endpoint)?.set_string(endpoint.as_ref())?;
        result.parameter(FactoryParameter::SubscriptionKey)?.set_string(subscription.as_ref())?;
        Ok(result)
    }

    /// Reads `SPEECH_SUBSCRIPTION_KEY` and `SPEECH_REGION`, plus the optional
    /// `SPEECH_ENDPOINT` and `SPEECH_AUTH_TOKEN`.
    pub fn from_env() -> Result<SpeechFactory, SpxError> {
        let key = env_var("SPEECH_SUBSCRIPTION_KEY")
            .ok_or_else(|| SpxError::MissingConfig("SPEECH_SUBSCRIPTION_KEY".to_owned()))?;
        let region = env_var("SPEECH_REGION")
            .ok_or_else(|| SpxError::MissingConfig("SPEECH_REGION".to_owned()))?;
        let result = SpeechFactory::from_subscription(key, region)?;
        if let Some(endpoint) = env_var("SPEECH_ENDPOINT") {
            result.set_string(FactoryParameter::Endpoint.canonical_name(), &endpoint)?;
        }
        if let Some(token) = env_var("SPEECH_AUTH_TOKEN") {
            result.set_string(FactoryParameter::AuthorizationToken.canonical_name(), &token)?;
        }
        info!("speech factory configured from environment");
        Ok(result)
    }

    pub fn create_speech_recognizer(&self) -> Result<SpeechRecognizer, SpxError> {
        SpeechRecognizer::from_factory(self)
    }

    #[inline]
    pub fn get_handle(&self) -> SPXFACTORYHANDLE {
        self.handle.get()
    }
}

impl Deref for SpeechFactory {
    type Target = FactoryParameterCollection;

    fn deref(&self) -> &Self::Target {
        &self.parameters
    }
}

impl AsRef<SpeechFactory> for SpeechFactory {
    fn as_ref(&self) -> &SpeechFactory {
        self
    }
}
