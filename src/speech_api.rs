//! Handle layer: the status-code based entry points every wrapper in this
//! crate forwards to. Handles are plain integers; the state they refer to
//! lives in a process-wide table.
#![allow(non_camel_case_types)]

use std::collections::BTreeMap;
use std::collections::HashMap;
use std::ffi::CStr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use log::trace;

pub type SPXHR = usize;
pub type SPXHANDLE = usize;
pub type SPXFACTORYHANDLE = SPXHANDLE;
pub type SPXRECOHANDLE = SPXHANDLE;
pub type SPXSESSIONHANDLE = SPXHANDLE;

pub const SPX_NOERROR: SPXHR = 0x000;
pub const SPXERR_INVALID_ARG: SPXHR = 0x005;
pub const SPXERR_BUFFER_TOO_SMALL: SPXHR = 0x019;
pub const SPXERR_INVALID_HANDLE: SPXHR = 0x021;

#[derive(Debug, Clone, PartialEq)]
enum StoredValue {
    String(String),
    Int32(i32),
    Bool(bool),
}

type ParameterMap = HashMap<String, StoredValue>;
type SharedParameters = Arc<Mutex<ParameterMap>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HandleKind {
    Factory,
    Recognizer,
    Session,
}

#[derive(Debug)]
struct HandleEntry {
    kind: HandleKind,
    parameters: SharedParameters,
}

static HANDLES: Mutex<BTreeMap<SPXHANDLE, HandleEntry>> = Mutex::new(BTreeMap::new());
static NEXT_HANDLE: AtomicUsize = AtomicUsize::new(1);

fn lock<T>(m: &Mutex<T>) -> MutexGuard<T> {
    m.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn register(kind: HandleKind, parameters: SharedParameters) -> SPXHANDLE {
    let handle = NEXT_HANDLE.fetch_add(1, Ordering::Relaxed);
    lock(&HANDLES).insert(handle, HandleEntry { kind, parameters });
    handle
}

fn lookup(handle: SPXHANDLE, kind: HandleKind) -> Option<SharedParameters> {
    lock(&HANDLES)
        .get(&handle)
        .filter(|entry| entry.kind == kind)
        .map(|entry| entry.parameters.clone())
}

fn is_valid(handle: SPXHANDLE, kind: HandleKind) -> bool {
    lookup(handle, kind).is_some()
}

fn close(handle: SPXHANDLE, kind: HandleKind) -> SPXHR {
    let mut handles = lock(&HANDLES);
    match handles.get(&handle) {
        Some(entry) if entry.kind == kind => {
            handles.remove(&handle);
            SPX_NOERROR
        }
        _ => SPXERR_INVALID_HANDLE,
    }
}

fn key(name: &CStr) -> Result<String, SPXHR> {
    let bytes = name.to_bytes();
    if bytes.is_empty() {
        return Err(SPXERR_INVALID_ARG);
    }
    Ok(String::from_utf8_lossy(bytes).into_owned())
}

fn set_parameter(handle: SPXHANDLE, kind: HandleKind, name: &CStr, value: StoredValue) -> SPXHR {
    let name = match key(name) {
        Ok(name) => name,
        Err(hr) => return hr,
    };
    match lookup(handle, kind) {
        Some(parameters) => {
            trace!("set parameter {:?} on handle {}: {:?}", name, handle, value);
            lock(&parameters).insert(name, value);
            SPX_NOERROR
        }
        None => SPXERR_INVALID_HANDLE,
    }
}

fn get_parameter(handle: SPXHANDLE, kind: HandleKind, name: &CStr) -> Result<Option<StoredValue>, SPXHR> {
    let name = key(name)?;
    let parameters = lookup(handle, kind).ok_or(SPXERR_INVALID_HANDLE)?;
    let value = lock(&parameters).get(&name).cloned();
    Ok(value)
}

fn contains_parameter(handle: SPXHANDLE, kind: HandleKind, name: &CStr, kind_of: fn(&StoredValue) -> bool) -> bool {
    match get_parameter(handle, kind, name) {
        Ok(Some(ref value)) => kind_of(value),
        _ => false,
    }
}

fn copy_to_buffer(value: &[u8], buffer: &mut [u8]) -> SPXHR {
    // One byte is reserved for the terminating NUL.
    if value.len() >= buffer.len() {
        return SPXERR_BUFFER_TOO_SMALL;
    }
    buffer[..value.len()].copy_from_slice(value);
    buffer[value.len()] = 0;
    SPX_NOERROR
}

fn get_string(handle: SPXHANDLE, kind: HandleKind, name: &CStr, buffer: &mut [u8], default: &CStr) -> SPXHR {
    match get_parameter(handle, kind, name) {
        Ok(Some(StoredValue::String(s))) => copy_to_buffer(s.as_bytes(), buffer),
        Ok(_) => copy_to_buffer(default.to_bytes(), buffer),
        Err(hr) => hr,
    }
}

fn get_int32(handle: SPXHANDLE, kind: HandleKind, name: &CStr, value: &mut i32, default: i32) -> SPXHR {
    match get_parameter(handle, kind, name) {
        Ok(Some(StoredValue::Int32(v))) => *value = v,
        Ok(_) => *value = default,
        Err(hr) => return hr,
    }
    SPX_NOERROR
}

fn get_bool(handle: SPXHANDLE, kind: HandleKind, name: &CStr, value: &mut bool, default: bool) -> SPXHR {
    match get_parameter(handle, kind, name) {
        Ok(Some(StoredValue::Bool(v))) => *value = v,
        Ok(_) => *value = default,
        Err(hr) => return hr,
    }
    SPX_NOERROR
}

fn is_string(value: &StoredValue) -> bool {
    matches!(value, StoredValue::String(_))
}

fn is_int32(value: &StoredValue) -> bool {
    matches!(value, StoredValue::Int32(_))
}

fn is_bool(value: &StoredValue) -> bool {
    matches!(value, StoredValue::Bool(_))
}

// factory

pub fn speech_factory_create(phfactory: &mut SPXFACTORYHANDLE) -> SPXHR {
    *phfactory = register(HandleKind::Factory, SharedParameters::default());
    SPX_NOERROR
}

pub fn speech_factory_handle_is_valid(hfactory: SPXFACTORYHANDLE) -> bool {
    is_valid(hfactory, HandleKind::Factory)
}

pub fn speech_factory_handle_close(hfactory: SPXFACTORYHANDLE) -> SPXHR {
    close(hfactory, HandleKind::Factory)
}

pub fn speech_factory_set_parameter_string(hfactory: SPXFACTORYHANDLE, name: &CStr, value: &CStr) -> SPXHR {
    let value = StoredValue::String(value.to_string_lossy().into_owned());
    set_parameter(hfactory, HandleKind::Factory, name, value)
}

pub fn speech_factory_get_parameter_string(hfactory: SPXFACTORYHANDLE, name: &CStr, value: &mut [u8], default: &CStr) -> SPXHR {
    get_string(hfactory, HandleKind::Factory, name, value, default)
}

pub fn speech_factory_contains_parameter_string(hfactory: SPXFACTORYHANDLE, name: &CStr) -> bool {
    contains_parameter(hfactory, HandleKind::Factory, name, is_string)
}

pub fn speech_factory_set_parameter_int32(hfactory: SPXFACTORYHANDLE, name: &CStr, value: i32) -> SPXHR {
    set_parameter(hfactory, HandleKind::Factory, name, StoredValue::Int32(value))
}

pub fn speech_factory_get_parameter_int32(hfactory: SPXFACTORYHANDLE, name: &CStr, value: &mut i32, default: i32) -> SPXHR {
    get_int32(hfactory, HandleKind::Factory, name, value, default)
}

pub fn speech_factory_contains_parameter_int32(hfactory: SPXFACTORYHANDLE, name: &CStr) -> bool {
    contains_parameter(hfactory, HandleKind::Factory, name, is_int32)
}

pub fn speech_factory_set_parameter_bool(hfactory: SPXFACTORYHANDLE, name: &CStr, value: bool) -> SPXHR {
    set_parameter(hfactory, HandleKind::Factory, name, StoredValue::Bool(value))
}

pub fn speech_factory_get_parameter_bool(hfactory: SPXFACTORYHANDLE, name: &CStr, value: &mut bool, default: bool) -> SPXHR {
    get_bool(hfactory, HandleKind::Factory, name, value, default)
}

pub fn speech_factory_contains_parameter_bool(hfactory: SPXFACTORYHANDLE, name: &CStr) -> bool {
    contains_parameter(hfactory, HandleKind::Factory, name, is_bool)
}

// recognizer

/// Creates a recognizer whose session parameters start as a copy of the
/// factory's current parameters.
pub fn speech_factory_create_speech_recognizer(hfactory: SPXFACTORYHANDLE, phreco: &mut SPXRECOHANDLE) -> SPXHR {
    let factory_parameters = match lookup(hfactory, HandleKind::Factory) {
        Some(parameters) => parameters,
        None => return SPXERR_INVALID_HANDLE,
    };
    let seeded = lock(&factory_parameters).clone();
    *phreco = register(HandleKind::Recognizer, Arc::new(Mutex::new(seeded)));
    SPX_NOERROR
}

pub fn recognizer_handle_is_valid(hreco: SPXRECOHANDLE) -> bool {
    is_valid(hreco, HandleKind::Recognizer)
}

pub fn recognizer_handle_close(hreco: SPXRECOHANDLE) -> SPXHR {
    close(hreco, HandleKind::Recognizer)
}

// session

pub fn session_from_recognizer(hreco: SPXRECOHANDLE, phsession: &mut SPXSESSIONHANDLE) -> SPXHR {
    match lookup(hreco, HandleKind::Recognizer) {
        Some(parameters) => {
            *phsession = register(HandleKind::Session, parameters);
            SPX_NOERROR
        }
        None => SPXERR_INVALID_HANDLE,
    }
}

pub fn session_handle_is_valid(hsession: SPXSESSIONHANDLE) -> bool {
    is_valid(hsession, HandleKind::Session)
}

pub fn session_handle_close(hsession: SPXSESSIONHANDLE) -> SPXHR {
    close(hsession, HandleKind::Session)
}

pub fn session_set_parameter_string(hsession: SPXSESSIONHANDLE, name: &CStr, value: &CStr) -> SPXHR {
    let value = StoredValue::String(value.to_string_lossy().into_owned());
    set_parameter(hsession, HandleKind::Session, name, value)
}

pub fn session_get_parameter_string(hsession: SPXSESSIONHANDLE, name: &CStr, value: &mut [u8], default: &CStr) -> SPXHR {
    get_string(hsession, HandleKind::Session, name, value, default)
}

pub fn session_contains_parameter_string(hsession: SPXSESSIONHANDLE, name: &CStr) -> bool {
    contains_parameter(hsession, HandleKind::Session, name, is_string)
}

pub fn session_set_parameter_int32(hsession: SPXSESSIONHANDLE, name: &CStr, value: i32) -> SPXHR {
    set_parameter(hsession, HandleKind::Session, name, StoredValue::Int32(value))
}

pub fn session_get_parameter_int32(hsession: SPXSESSIONHANDLE, name: &CStr, value: &mut i32, default: i32) -> SPXHR {
    get_int32(hsession, HandleKind::Session, name, value, default)
}

pub fn session_contains_parameter_int32(hsession: SPXSESSIONHANDLE, name: &CStr) -> bool {
    contains_parameter(hsession, HandleKind::Session, name, is_int32)
}

pub fn session_set_parameter_bool(hsession: SPXSESSIONHANDLE, name: &CStr, value: bool) -> SPXHR {
    set_parameter(hsession, HandleKind::Session, name, StoredValue::Bool(value))
}

pub fn session_get_parameter_bool(hsession: SPXSESSIONHANDLE, name: &CStr, value: &mut bool, default: bool) -> SPXHR {
    get_bool(hsession, HandleKind::Session, name, value, default)
}

pub fn session_contains_parameter_bool(hsession: SPXSESSIONHANDLE, name: &CStr) -> bool {
    contains_parameter(hsession, HandleKind::Session, name, is_bool)
}
