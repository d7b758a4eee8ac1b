//! Fluent assertions
//!
//! Failures print the call site plus expected and received values.

use std::fmt::Debug;

/// Wrapper produced by `expect!`
pub struct Expect<T> {
    value: T,
    location: &'static str,
}

impl<T> Expect<T> {
    /// Use the `expect!` macro instead
    pub fn new(value: T, location: &'static str) -> Self {
        Self { value, location }
    }

    fn fail(&self, matcher: &str, expected: impl Debug, received: impl Debug) -> ! {
        panic!(
            "\nassertion failed at {}\n  expect!(value).{}\n\n  Expected: {:?}\n  Received: {:?}\n",
            self.location, matcher, expected, received
        );
    }
}

impl<T: Debug + PartialEq> Expect<T> {
    pub fn to_equal(&self, expected: T) {
        if self.value != expected {
            self.fail("to_equal(expected)", &expected, &self.value);
        }
    }

    pub fn to_not_equal(&self, unexpected: T) {
        if self.value == unexpected {
            self.fail("to_not_equal(value)", format!("not {:?}", unexpected), &self.value);
        }
    }
}

impl Expect<bool> {
    pub fn to_be_true(&self) {
        if !self.value {
            self.fail("to_be_true()", true, false);
        }
    }

    pub fn to_be_false(&self) {
        if self.value {
            self.fail("to_be_false()", false, true);
        }
    }
}

impl<T: Debug> Expect<Option<T>> {
    pub fn to_be_some(&self) {
        if self.value.is_none() {
            self.fail("to_be_some()", "Some(_)", "None");
        }
    }

    pub fn to_be_none(&self) {
        if let Some(value) = &self.value {
            self.fail("to_be_none()", "None", value);
        }
    }
}

impl<T: Debug, E: Debug> Expect<Result<T, E>> {
    pub fn to_be_ok(&self) {
        if let Err(err) = &self.value {
            self.fail("to_be_ok()", "Ok(_)", err);
        }
    }

    pub fn to_be_err(&self) {
        if let Ok(value) = &self.value {
            self.fail("to_be_err()", "Err(_)", value);
        }
    }
}

impl<T: Debug> Expect<Vec<T>> {
    pub fn to_have_length(&self, expected: usize) {
        if self.value.len() != expected {
            self.fail("to_have_length(n)", expected, self.value.len());
        }
    }

    pub fn to_be_empty(&self) {
        if !self.value.is_empty() {
            self.fail("to_be_empty()", "[]", &self.value);
        }
    }
}

impl<T: Debug + PartialEq> Expect<Vec<T>> {
    pub fn to_contain(&self, item: &T) {
        if !self.value.contains(item) {
            self.fail("to_contain(item)", item, &self.value);
        }
    }
}

impl Expect<String> {
    pub fn to_contain(&self, substring: &str) {
        if !self.value.contains(substring) {
            self.fail("to_contain(substring)", substring, &self.value);
        }
    }
}

impl Expect<&str> {
    pub fn to_contain(&self, substring: &str) {
        if !self.value.contains(substring) {
            self.fail("to_contain(substring)", substring, self.value);
        }
    }
}

impl<T: Debug + PartialOrd> Expect<T> {
    pub fn to_be_greater_than(&self, expected: T) {
        if self.value <= expected {
            self.fail("to_be_greater_than(n)", format!("> {:?}", expected), &self.value);
        }
    }

    pub fn to_be_less_than_or_equal(&self, expected: T) {
        if self.value > expected {
            self.fail("to_be_less_than_or_equal(n)", format!("<= {:?}", expected), &self.value);
        }
    }
}

/// Fluent assertion with call-site reporting
///
/// ```rust,ignore
/// expect!(todos).to_have_length(2);
/// expect!(response.status).to_equal(201);
/// ```
#[macro_export]
macro_rules! expect {
    ($value:expr) => {
        $crate::testing::Expect::new($value, concat!(file!(), ":", line!()))
    };
}
