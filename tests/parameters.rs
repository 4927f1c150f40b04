extern crate speech_parameters;

use std::ffi::CStr;
use std::ffi::CString;

use speech_parameters::speech_api::*;
use speech_parameters::*;

fn factory() -> SpeechFactory {
    SpeechFactory::new().unwrap()
}

#[test]
fn unset_names_read_defaults() {
    let f = factory();
    let v = f.value("missing").unwrap();
    assert_eq!(v.get_string("fallback").unwrap(), "fallback");
    assert_eq!(v.get_number(-3).unwrap(), -3);
    assert_eq!(v.get_bool(true).unwrap(), true);
    assert!(!v.is_string());
    assert!(!v.is_number());
    assert!(!v.is_bool());
}

#[test]
fn set_values_read_back() {
    let f = factory();
    let s = f.value("s").unwrap();
    s.set_string("hello").unwrap();
    assert_eq!(s.get_string("").unwrap(), "hello");
    assert!(s.is_string());

    let n = f.value("n").unwrap();
    n.set_number(i32::min_value()).unwrap();
    assert_eq!(n.get_number(0).unwrap(), i32::min_value());
    assert!(n.is_number());

    let b = f.value("b").unwrap();
    b.set_bool(false).unwrap();
    assert_eq!(b.get_bool(true).unwrap(), false);
    assert!(b.is_bool());
}

#[test]
fn cross_kind_reads_fall_back_to_default() {
    let f = factory();
    let v = f.value("x").unwrap();
    v.set_number(5).unwrap();
    assert_eq!(v.get_string("d").unwrap(), "d");
    assert_eq!(v.get_bool(true).unwrap(), true);
    assert!(!v.is_string());

    // last writer's kind wins
    v.set_string("five").unwrap();
    assert_eq!(v.get_number(0).unwrap(), 0);
    assert!(!v.is_number());
    assert_eq!(v.get_string("").unwrap(), "five");
}

#[test]
fn enum_and_canonical_name_are_the_same_parameter() {
    let f = factory();
    f.parameter(FactoryParameter::Region).unwrap().set_string("eastasia").unwrap();
    assert_eq!(f.get_string(FactoryParameter::Region.canonical_name(), None).unwrap(), "eastasia");

    f.set_string("SPEECH-Endpoint", "wss://example").unwrap();
    let endpoint = f.parameter(FactoryParameter::Endpoint).unwrap();
    assert_eq!(endpoint.name(), "SPEECH-Endpoint");
    assert_eq!(endpoint.get_string("").unwrap(), "wss://example");
}

#[derive(Debug, Clone, Copy)]
struct Oversized;

impl NamedParameter for Oversized {
    fn canonical_name(self) -> &'static str {
        Box::leak("p".repeat(MAX_PARAMETER_NAME_BYTES + 1).into_boxed_str())
    }
}

/// Factory handle with a parameter enum whose name cannot be resolved, and
/// an optional forced failure for every call.
#[derive(Debug, Clone, Copy)]
struct TestHandle {
    inner: FactoryHandle,
    fail_with: Option<SPXHR>,
}

impl ParameterHandle for TestHandle {
    type Parameter = Oversized;

    fn set_parameter_string(self, name: &CStr, value: &CStr) -> SPXHR {
        self.fail_with.unwrap_or_else(|| self.inner.set_parameter_string(name, value))
    }

    fn get_parameter_string(self, name: &CStr, value: &mut [u8], default: &CStr) -> SPXHR {
        self.fail_with.unwrap_or_else(|| self.inner.get_parameter_string(name, value, default))
    }

    fn contains_parameter_string(self, name: &CStr) -> bool {
        self.inner.contains_parameter_string(name)
    }

    fn set_parameter_int32(self, name: &CStr, value: i32) -> SPXHR {
        self.fail_with.unwrap_or_else(|| self.inner.set_parameter_int32(name, value))
    }

    fn get_parameter_int32(self, name: &CStr, value: &mut i32, default: i32) -> SPXHR {
        self.fail_with.unwrap_or_else(|| self.inner.get_parameter_int32(name, value, default))
    }

    fn contains_parameter_int32(self, name: &CStr) -> bool {
        self.inner.contains_parameter_int32(name)
    }

    fn set_parameter_bool(self, name: &CStr, value: bool) -> SPXHR {
        self.fail_with.unwrap_or_else(|| self.inner.set_parameter_bool(name, value))
    }

    fn get_parameter_bool(self, name: &CStr, value: &mut bool, default: bool) -> SPXHR {
        self.fail_with.unwrap_or_else(|| self.inner.get_parameter_bool(name, value, default))
    }

    fn contains_parameter_bool(self, name: &CStr) -> bool {
        self.inner.contains_parameter_bool(name)
    }
}

#[test]
fn oversized_enum_name_is_an_error() {
    assert!(Oversized.canonical_name().len() > MAX_PARAMETER_NAME_BYTES);
    let f = factory();
    let collection = ParameterCollection::new(TestHandle { inner: FactoryHandle(f.get_handle()), fail_with: None });
    let err = collection.parameter(Oversized).unwrap_err();
    assert_eq!(err.code(), Some(SPXERR_BUFFER_TOO_SMALL));
}

#[test]
fn handle_layer_failures_surface_with_their_code() {
    let f = factory();
    f.set_number("n", 1).unwrap();
    let collection = ParameterCollection::new(TestHandle { inner: FactoryHandle(f.get_handle()), fail_with: Some(0x1234) });
    assert_eq!(collection.get_number("n", None).unwrap_err(), SpxError::General(0x1234));
    assert_eq!(collection.set_string("n", "x").unwrap_err(), SpxError::General(0x1234));
    assert!(collection.contains_number("n").unwrap());
}

#[test]
fn string_scenario() {
    let f = factory();
    assert_eq!(f.value("X").unwrap().get_string("fallback").unwrap(), "fallback");
    assert!(!f.contains_string("X").unwrap());
    f.value("X").unwrap().set_string("value1").unwrap();
    assert_eq!(f.value("X").unwrap().get_string("fallback").unwrap(), "value1");
    assert!(f.contains_string("X").unwrap());
}

#[test]
fn subscription_key_scenario() {
    let f = factory();
    f.parameter(FactoryParameter::SubscriptionKey).unwrap().set_string("abc123").unwrap();
    assert_eq!(f.get_string("SPEECH-SubscriptionKey", None).unwrap(), "abc123");
    assert_eq!(f.get_string("SubscriptionKey", None).unwrap(), "");
}

#[test]
fn bulk_defaults() {
    let f = factory();
    assert_eq!(f.get_string("none", None).unwrap(), "");
    assert_eq!(f.get_number("none", None).unwrap(), 0);
    assert_eq!(f.get_bool("none", None).unwrap(), false);
    assert_eq!(f.get_number("none", Some(9)).unwrap(), 9);
}

#[cfg(not(feature = "legacy_contains_bool"))]
#[test]
fn bulk_contains_bool_matches_accessor() {
    let f = factory();
    f.set_bool("flag", true).unwrap();
    f.set_number("count", 1).unwrap();
    assert_eq!(f.contains_bool("flag").unwrap(), f.value("flag").unwrap().is_bool());
    assert!(f.contains_bool("flag").unwrap());
    assert!(!f.contains_bool("count").unwrap());
}

#[cfg(feature = "legacy_contains_bool")]
#[test]
fn legacy_bulk_contains_bool_checks_numbers() {
    let f = factory();
    f.set_bool("flag", true).unwrap();
    f.set_number("count", 1).unwrap();
    assert!(f.value("flag").unwrap().is_bool());
    assert!(!f.contains_bool("flag").unwrap());
    assert!(f.contains_bool("count").unwrap());
}

#[test]
fn strings_longer_than_read_buffer_are_refused() {
    let f = factory();
    let long = "x".repeat(MAX_STRING_VALUE_BYTES + 1);
    assert_eq!(f.set_string("long", &long).unwrap_err().code(), Some(SPXERR_BUFFER_TOO_SMALL));
    assert!(!f.contains_string("long").unwrap());

    let fits = "y".repeat(MAX_STRING_VALUE_BYTES);
    f.set_string("fits", &fits).unwrap();
    assert_eq!(f.get_string("fits", None).unwrap(), fits);
}

#[test]
fn oversized_value_written_below_the_accessor_is_not_truncated() {
    let f = factory();
    let name = CString::new("raw").unwrap();
    let long = CString::new("z".repeat(MAX_STRING_VALUE_BYTES + 1)).unwrap();
    assert_eq!(speech_factory_set_parameter_string(f.get_handle(), &name, &long), SPX_NOERROR);
    assert_eq!(f.get_string("raw", None).unwrap_err().code(), Some(SPXERR_BUFFER_TOO_SMALL));
}

#[test]
fn long_default_is_returned_for_absent_string() {
    let f = factory();
    let default = "d".repeat(MAX_STRING_VALUE_BYTES + 1);
    assert_eq!(f.value("absent").unwrap().get_string(&default).unwrap(), default);
    assert_eq!(f.get_string("absent", Some(default.as_str())).unwrap(), default);

    // a stored value still wins over a long default
    f.set_string("present", "short").unwrap();
    assert_eq!(f.get_string("present", Some(default.as_str())).unwrap(), "short");
}

#[test]
fn multibyte_strings_round_trip_within_byte_capacity() {
    let f = factory();
    let v = f.value("s").unwrap();

    // 512 two-byte characters fill the buffer exactly
    let fits = "é".repeat(MAX_STRING_VALUE_BYTES / 2);
    v.set_string(&fits).unwrap();
    assert_eq!(v.get_string("").unwrap(), fits);

    let over = "é".repeat(MAX_STRING_VALUE_BYTES / 2 + 1);
    assert_eq!(v.set_string(&over).unwrap_err().code(), Some(SPXERR_BUFFER_TOO_SMALL));
    assert_eq!(v.get_string("").unwrap(), fits);
}

#[test]
fn interior_nul_is_rejected() {
    let f = factory();
    match f.value("bad\0name") {
        Err(SpxError::StrNulError(_)) => {}
        other => panic!("unexpected: {:?}", other),
    }
    match f.set_string("ok", "bad\0value") {
        Err(SpxError::StrNulError(_)) => {}
        other => panic!("unexpected: {:?}", other),
    }
}

#[test]
fn empty_name_is_invalid_arg() {
    let f = factory();
    assert_eq!(f.set_bool("", true).unwrap_err().code(), Some(SPXERR_INVALID_ARG));
    assert!(!f.contains_bool("").unwrap());
}

#[test]
fn session_parameters_are_seeded_from_factory() {
    let f = SpeechFactory::from_subscription("key", "westus").unwrap();
    let recognizer = f.create_speech_recognizer().unwrap();
    let session = recognizer.session().unwrap();
    let key = session.parameter(SessionParameter::SubscriptionKey).unwrap();
    assert_eq!(key.get_string("").unwrap(), "key");

    // later factory writes do not reach an existing recognizer
    f.set_string("SPEECH-Region", "eastus").unwrap();
    assert_eq!(session.get_string("SPEECH-Region", None).unwrap(), "westus");

    session.parameter(SessionParameter::AuthorizationToken).unwrap().set_string("token").unwrap();
    let other = recognizer.session().unwrap();
    assert_eq!(other.get_string("SPEECH-AuthToken", None).unwrap(), "token");
    assert!(!f.contains_string("SPEECH-AuthToken").unwrap());
}

#[test]
fn session_lifecycle() {
    let f = factory();
    let recognizer = SpeechRecognizer::from_factory(&f).unwrap();
    assert!(recognizer.is_valid());
    let session = Session::from_recognizer(&recognizer).unwrap();
    assert!(session.is_valid());
    let handle = session.get_handle();
    let parameters = *session;
    session.close().unwrap();
    assert!(!session_handle_is_valid(handle));
    assert_eq!(parameters.set_number("n", 1).unwrap_err().code(), Some(SPXERR_INVALID_HANDLE));
}
