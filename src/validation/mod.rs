use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").unwrap());
static PASSWORD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z0-9.!_@#$%^&*].{8,}$").unwrap());
static USERNAME_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-zA-Z0-9_-]{3,16}$").unwrap());

/// Per-request accumulator for field validation failures.
///
/// Checks never short-circuit: every field is examined even after an earlier
/// failure, so a single response carries the complete list of problems.
/// A `Validator` is one-shot — build it, run the chained checks, then read
/// the errors. Never reuse one across requests.
#[derive(Debug, Default)]
pub struct Validator {
    errors: Vec<String>,
    checked: usize,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Number of fields that went through `check_string`/`check_number`.
    pub fn checked_fields(&self) -> usize {
        self.checked
    }

    pub fn add_error(&mut self, msg: String) {
        self.errors.push(msg);
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn into_errors(self) -> Vec<String> {
        self.errors
    }

    /// Bind a string field for chained constraint checks.
    pub fn check_string<'v>(&'v mut self, value: &'v str, name: &'static str) -> StringCheck<'v> {
        self.checked += 1;
        StringCheck {
            value,
            name,
            validator: self,
        }
    }

    /// Bind a numeric field for chained constraint checks. Accepts any
    /// primitive numeric width via the `Numeric` conversions.
    pub fn check_number<'v>(
        &'v mut self,
        value: impl Into<Numeric>,
        name: &'static str,
    ) -> NumberCheck<'v> {
        self.checked += 1;
        NumberCheck {
            value: value.into(),
            name,
            validator: self,
        }
    }
}

/// Chained constraints over one string field. Each method appends to the
/// shared validator's error list and returns the check for further chaining.
pub struct StringCheck<'v> {
    value: &'v str,
    name: &'static str,
    validator: &'v mut Validator,
}

impl<'v> StringCheck<'v> {
    /// Fails when the Unicode-codepoint length is below `min`.
    pub fn is_min(self, min: usize) -> Self {
        let length = self.value.chars().count();
        if length < min {
            self.validator.add_error(format!(
                "[{}] - Min required length is {}, Provided: {}",
                self.name, min, length
            ));
        }
        self
    }

    /// Fails when the Unicode-codepoint length exceeds `max`.
    pub fn is_max(self, max: usize) -> Self {
        let length = self.value.chars().count();
        if length > max {
            self.validator.add_error(format!(
                "[{}] - Max available length is {}, Provided: {}",
                self.name, max, length
            ));
        }
        self
    }

    pub fn is_email(self) -> Self {
        if !EMAIL_RE.is_match(self.value) {
            self.validator.add_error(format!(
                "[{}] - Invalid email. Must contain: letters (a-z, A-Z), digits (0-9), \
                 or symbols ._%+- before @, followed by a valid domain with a TLD (e.g., .com, .org).",
                self.name
            ));
        }
        self
    }

    /// Minimum total length 9, first character from the allowed set.
    pub fn is_password(self) -> Self {
        if !PASSWORD_RE.is_match(self.value) {
            self.validator.add_error(format!(
                "[{}] - Invalid password. Must be at least 8 characters long and can \
                 include letters, digits, and symbols .!_@#$%^&*.",
                self.name
            ));
        }
        self
    }

    /// 3-16 characters of letters, digits, hyphen, underscore.
    pub fn is_valid_username(self) -> Self {
        if !USERNAME_RE.is_match(self.value) {
            self.validator.add_error(format!(
                "[{}] - Invalid username. Must be 3-16 characters long and contain only \
                 letters, digits, hyphens (-), or underscores (_).",
                self.name
            ));
        }
        self
    }
}

/// Numeric value of any supported primitive representation, carried as a
/// tagged union so range checks compare through one normalized type.
/// The `Unsupported` variant records inputs that cannot be normalized;
/// range checks on it produce a validation error rather than a panic.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Numeric {
    Int(i64),
    UInt(u64),
    Float(f64),
    Unsupported(&'static str),
}

impl Numeric {
    /// Normalize to f64. A u64 above `i64::MAX` is out of the comparable
    /// range and reports as unsupported instead of wrapping.
    fn as_f64(self) -> Result<f64, &'static str> {
        match self {
            Numeric::Int(v) => Ok(v as f64),
            Numeric::UInt(v) => {
                if v > i64::MAX as u64 {
                    Err("u64")
                } else {
                    Ok(v as f64)
                }
            }
            Numeric::Float(v) => Ok(v),
            Numeric::Unsupported(ty) => Err(ty),
        }
    }
}

macro_rules! numeric_from_int {
    ($($t:ty),*) => {
        $(impl From<$t> for Numeric {
            fn from(v: $t) -> Self {
                Numeric::Int(v as i64)
            }
        })*
    };
}

macro_rules! numeric_from_uint {
    ($($t:ty),*) => {
        $(impl From<$t> for Numeric {
            fn from(v: $t) -> Self {
                Numeric::UInt(v as u64)
            }
        })*
    };
}

numeric_from_int!(i8, i16, i32, i64, isize);
numeric_from_uint!(u8, u16, u32, u64, usize);

impl From<f32> for Numeric {
    fn from(v: f32) -> Self {
        Numeric::Float(v as f64)
    }
}

impl From<f64> for Numeric {
    fn from(v: f64) -> Self {
        Numeric::Float(v)
    }
}

impl From<&str> for Numeric {
    fn from(_: &str) -> Self {
        Numeric::Unsupported("&str")
    }
}

impl From<String> for Numeric {
    fn from(_: String) -> Self {
        Numeric::Unsupported("String")
    }
}

impl From<bool> for Numeric {
    fn from(_: bool) -> Self {
        Numeric::Unsupported("bool")
    }
}

/// Chained range constraints over one numeric field.
pub struct NumberCheck<'v> {
    value: Numeric,
    name: &'static str,
    validator: &'v mut Validator,
}

impl<'v> NumberCheck<'v> {
    pub fn is_min(self, min: f64) -> Self {
        match self.value.as_f64() {
            Err(ty) => {
                self.validator
                    .add_error(format!("[{}] - Unsupported type: {}", self.name, ty));
            }
            Ok(value) if value < min => {
                self.validator.add_error(format!(
                    "[{}] - Min required: {}, Provided: {}",
                    self.name, min, value
                ));
            }
            Ok(_) => {}
        }
        self
    }

    pub fn is_max(self, max: f64) -> Self {
        match self.value.as_f64() {
            Err(ty) => {
                self.validator
                    .add_error(format!("[{}] - Unsupported type: {}", self.name, ty));
            }
            Ok(value) if value > max => {
                self.validator.add_error(format!(
                    "[{}] - Max available: {}, Provided: {}",
                    self.name, max, value
                ));
            }
            Ok(_) => {}
        }
        self
    }
}
