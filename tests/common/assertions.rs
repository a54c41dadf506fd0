//! Assertion macros for service results

/// Unwrap an `Ok`, panicking with the error's debug form otherwise.
#[macro_export]
macro_rules! assert_ok {
    ($result:expr) => {
        match $result {
            Ok(value) => value,
            Err(e) => panic!("request failed: {:?}", e),
        }
    };
}

/// Expect an `Err` matching `$pattern`.
#[macro_export]
macro_rules! assert_err {
    ($result:expr, $pattern:pat) => {
        match $result {
            Err($pattern) => {}
            Err(e) => panic!("wrong error kind: {:?}", e),
            Ok(value) => panic!("expected an error, got {:?}", value),
        }
    };
}

/// Expect a request body (or any string) to contain `$needle`.
#[macro_export]
macro_rules! assert_contains {
    ($haystack:expr, $needle:expr) => {
        assert!(
            $haystack.contains($needle),
            "{:?} not found in:\n{}",
            $needle,
            $haystack
        );
    };
}

/// Expect a validation error with exactly one problem on `$field`.
#[macro_export]
macro_rules! assert_field_error {
    ($error:expr, $field:expr, $message:expr) => {
        match $error.field_errors() {
            [only] => {
                assert_eq!(only.field, $field);
                assert_eq!(only.message, $message);
            }
            other => panic!("expected one field error, got {:?}", other),
        }
    };
}
