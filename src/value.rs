use crate::SpxError;

/// A named value whose kind is decided by the accessor the caller uses.
///
/// Getters return the supplied default when nothing of the requested kind
/// is stored; only failures of the underlying handle surface as errors.
pub trait Value {
    fn is_string(&self) -> bool;
    fn get_string(&self, default: &str) -> Result<String, SpxError>;
    fn set_string(&self, value: &str) -> Result<(), SpxError>;

    fn is_number(&self) -> bool;
    fn get_number(&self, default: i32) -> Result<i32, SpxError>;
    fn set_number(&self, value: i32) -> Result<(), SpxError>;

    fn is_bool(&self) -> bool;
    fn get_bool(&self, default: bool) -> Result<bool, SpxError>;
    fn set_bool(&self, value: bool) -> Result<(), SpxError>;
}

/// Keyed view over a handle's values.
///
/// Every bulk helper builds a fresh [`Value`] for the name and forwards to
/// it. Bulk getters treat a `None` default as `""`, `0` or `false`.
pub trait ValueCollection {
    type Value: Value;

    fn value(&self, name: &str) -> Result<Self::Value, SpxError>;

    fn contains_string(&self, name: &str) -> Result<bool, SpxError> {
        Ok(self.value(name)?.is_string())
    }

    fn get_string(&self, name: &str, default: Option<&str>) -> Result<String, SpxError> {
        self.value(name)?.get_string(default.unwrap_or(""))
    }

    fn set_string(&self, name: &str, value: &str) -> Result<(), SpxError> {
        self.value(name)?.set_string(value)
    }

    fn contains_number(&self, name: &str) -> Result<bool, SpxError> {
        Ok(self.value(name)?.is_number())
    }

    fn get_number(&self, name: &str, default: Option<i32>) -> Result<i32, SpxError> {
        self.value(name)?.get_number(default.unwrap_or(0))
    }

    fn set_number(&self, name: &str, value: i32) -> Result<(), SpxError> {
        self.value(name)?.set_number(value)
    }

    /// With the `legacy_contains_bool` feature this answers with the numeric
    /// existence check, matching older bindings.
    fn contains_bool(&self, name: &str) -> Result<bool, SpxError> {
        let value = self.value(name)?;
        if cfg!(feature = "legacy_contains_bool") {
            Ok(value.is_number())
        } else {
            Ok(value.is_bool())
        }
    }

    fn get_bool(&self, name: &str, default: Option<bool>) -> Result<bool, SpxError> {
        self.value(name)?.get_bool(default.unwrap_or(false))
    }

    fn set_bool(&self, name: &str, value: bool) -> Result<(), SpxError> {
        self.value(name)?.set_bool(value)
    }
}
