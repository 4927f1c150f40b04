use std::ffi::CStr;
use std::ffi::CString;
use std::fmt;

use crate::convert_err;
use crate::speech_api::*;
use crate::SpxError;
use crate::Value;
use crate::ValueCollection;

/// Longest canonical name, in UTF-8 bytes, a well-known parameter may resolve to.
pub const MAX_PARAMETER_NAME_BYTES: usize = 4096;

/// Longest string value, in UTF-8 bytes, that can be stored and read back.
pub const MAX_STRING_VALUE_BYTES: usize = 1024;

/// A well-known parameter identified by an enum rather than by name.
pub trait NamedParameter: Copy + fmt::Debug {
    fn canonical_name(self) -> &'static str;
}

/// Handle-layer entry points for one kind of handle.
///
/// The handle is a borrowed token: implementors must not release it.
pub trait ParameterHandle: Copy + fmt::Debug {
    type Parameter: NamedParameter;

    fn set_parameter_string(self, name: &CStr, value: &CStr) -> SPXHR;
    fn get_parameter_string(self, name: &CStr, value: &mut [u8], default: &CStr) -> SPXHR;
    fn contains_parameter_string(self, name: &CStr) -> bool;

    fn set_parameter_int32(self, name: &CStr, value: i32) -> SPXHR;
    fn get_parameter_int32(self, name: &CStr, value: &mut i32, default: i32) -> SPXHR;
    fn contains_parameter_int32(self, name: &CStr) -> bool;

    fn set_parameter_bool(self, name: &CStr, value: bool) -> SPXHR;
    fn get_parameter_bool(self, name: &CStr, value: &mut bool, default: bool) -> SPXHR;
    fn contains_parameter_bool(self, name: &CStr) -> bool;
}

/// Copies `name` into a lookup of `capacity` bytes, refusing to truncate.
pub(crate) fn resolve_parameter_name(name: &str, capacity: usize) -> Result<String, SpxError> {
    if name.len() > capacity {
        return Err(SpxError::General(SPXERR_BUFFER_TOO_SMALL));
    }
    Ok(name.to_owned())
}

/// Typed access to one named parameter of a handle.
#[derive(Debug, Clone)]
pub struct ParameterValue<H> {
    handle: H,
    name: CString,
}

impl<H: ParameterHandle> ParameterValue<H> {
    pub fn new(handle: H, name: &str) -> Result<ParameterValue<H>, SpxError> {
        Ok(ParameterValue {
            handle,
            name: CString::new(name)?,
        })
    }

    pub fn from_parameter(handle: H, parameter: H::Parameter) -> Result<ParameterValue<H>, SpxError> {
        let name = resolve_parameter_name(parameter.canonical_name(), MAX_PARAMETER_NAME_BYTES)?;
        ParameterValue::new(handle, &name)
    }

    pub fn name(&self) -> &str {
        // built from a &str, so always valid UTF-8
        self.name.to_str().unwrap_or_default()
    }

    #[inline]
    pub fn get_handle(&self) -> H {
        self.handle
    }
}

impl<H: ParameterHandle> Value for ParameterValue<H> {
    fn is_string(&self) -> bool {
        self.handle.contains_parameter_string(&self.name)
    }

    fn get_string(&self, default: &str) -> Result<String, SpxError> {
        let default = CString::new(default)?;
        // an absent value copies the default back, so it must always fit
        let capacity = MAX_STRING_VALUE_BYTES.max(default.as_bytes().len());
        let mut buff = vec![0u8; capacity + 1];
        convert_err(self.handle.get_parameter_string(&self.name, &mut buff, &default))?;
        let value = match CStr::from_bytes_until_nul(&buff) {
            Ok(s) => s.to_string_lossy().into_owned(),
            Err(_) => return Err(SpxError::General(SPXERR_BUFFER_TOO_SMALL)),
        };
        Ok(value)
    }

    fn set_string(&self, value: &str) -> Result<(), SpxError> {
        if value.len() > MAX_STRING_VALUE_BYTES {
            return Err(SpxError::General(SPXERR_BUFFER_TOO_SMALL));
        }
        let value = CString::new(value)?;
        convert_err(self.handle.set_parameter_string(&self.name, &value))
    }

    fn is_number(&self) -> bool {
        self.handle.contains_parameter_int32(&self.name)
    }

    fn get_number(&self, default: i32) -> Result<i32, SpxError> {
        let mut value = default;
        convert_err(self.handle.get_parameter_int32(&self.name, &mut value, default))?;
        Ok(value)
    }

    fn set_number(&self, value: i32) -> Result<(), SpxError> {
        convert_err(self.handle.set_parameter_int32(&self.name, value))
    }

    fn is_bool(&self) -> bool {
        self.handle.contains_parameter_bool(&self.name)
    }

    fn get_bool(&self, default: bool) -> Result<bool, SpxError> {
        let mut value = default;
        convert_err(self.handle.get_parameter_bool(&self.name, &mut value, default))?;
        Ok(value)
    }

    fn set_bool(&self, value: bool) -> Result<(), SpxError> {
        convert_err(self.handle.set_parameter_bool(&self.name, value))
    }
}

/// Produces [`ParameterValue`]s for a handle, by name or well-known enum.
///
/// Holds nothing but the handle; every lookup hits the handle layer.
#[derive(Debug, Clone, Copy)]
pub struct ParameterCollection<H> {
    handle: H,
}

impl<H: ParameterHandle> ParameterCollection<H> {
    pub fn new(handle: H) -> ParameterCollection<H> {
        ParameterCollection { handle }
    }

    pub fn parameter(&self, parameter: H::Parameter) -> Result<ParameterValue<H>, SpxError> {
        ParameterValue::from_parameter(self.handle, parameter)
    }

    #[inline]
    pub fn get_handle(&self) -> H {
        self.handle
    }
}

impl<H: ParameterHandle> ValueCollection for ParameterCollection<H> {
    type Value = ParameterValue<H>;

    fn value(&self, name: &str) -> Result<ParameterValue<H>, SpxError> {
        ParameterValue::new(self.handle, name)
    }
}
