// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

//! Error type shared by every fallible operation in the crate.
//!
//! Nothing on the configuration read path can fail; errors only surface from
//! custom (de)serialization functions, typed downcasts of registered
//! functions, and engine calls made during warm-up.

use std::borrow::Cow;

use thiserror::Error;

/// Set `JSCONF_PANIC_ON_ERROR=1` at compile time to panic where an error is created.
pub const PANIC_ON_ERROR: bool = option_env!("JSCONF_PANIC_ON_ERROR").is_some();

/// Error type for configuration, override and warm-up operations.
///
/// Always build values through the constructor functions
/// ([`Error::type_mismatch`], [`Error::invalid_data`], ...) rather than the
/// variants, so that the `JSCONF_PANIC_ON_ERROR` switch is honoured.
///
/// ```rust
/// use jsconf_core::error::Error;
///
/// let err = Error::invalid_data("amount is not a number");
/// assert_eq!(err.to_string(), "amount is not a number");
/// ```
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// A registered function was requested for a type it was not registered with.
    #[error("Type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        expected: Cow<'static, str>,
        found: Cow<'static, str>,
    },

    /// Text handed to a deserializer could not be turned into a value.
    #[error("{0}")]
    InvalidData(Cow<'static, str>),

    /// General type-related error.
    #[error("{0}")]
    TypeError(Cow<'static, str>),

    /// The engine does not support the requested operation.
    #[error("{0}")]
    Unsupported(Cow<'static, str>),

    /// A warm-up call panicked; holds the panic message.
    #[error("{0}")]
    Unknown(Cow<'static, str>),
}

impl Error {
    /// Creates a new [`Error::TypeMismatch`].
    #[inline(always)]
    #[cold]
    #[track_caller]
    pub fn type_mismatch<E, F>(expected: E, found: F) -> Self
    where
        E: Into<Cow<'static, str>>,
        F: Into<Cow<'static, str>>,
    {
        let err = Error::TypeMismatch {
            expected: expected.into(),
            found: found.into(),
        };
        if PANIC_ON_ERROR {
            panic!("JSCONF_PANIC_ON_ERROR: {}", err);
        }
        err
    }

    /// Creates a new [`Error::InvalidData`].
    ///
    /// ```
    /// use jsconf_core::error::Error;
    ///
    /// let err = Error::invalid_data(format!("bad amount {:?}", "x1"));
    /// ```
    #[inline(always)]
    #[cold]
    #[track_caller]
    pub fn invalid_data<S: Into<Cow<'static, str>>>(s: S) -> Self {
        let err = Error::InvalidData(s.into());
        if PANIC_ON_ERROR {
            panic!("JSCONF_PANIC_ON_ERROR: {}", err);
        }
        err
    }

    /// Creates a new [`Error::TypeError`].
    #[inline(always)]
    #[cold]
    #[track_caller]
    pub fn type_error<S: Into<Cow<'static, str>>>(s: S) -> Self {
        let err = Error::TypeError(s.into());
        if PANIC_ON_ERROR {
            panic!("JSCONF_PANIC_ON_ERROR: {}", err);
        }
        err
    }

    /// Creates a new [`Error::Unsupported`].
    #[inline(always)]
    #[cold]
    #[track_caller]
    pub fn unsupported<S: Into<Cow<'static, str>>>(s: S) -> Self {
        let err = Error::Unsupported(s.into());
        if PANIC_ON_ERROR {
            panic!("JSCONF_PANIC_ON_ERROR: {}", err);
        }
        err
    }

    /// Creates a new [`Error::Unknown`].
    #[inline(always)]
    #[cold]
    #[track_caller]
    pub fn unknown<S: Into<Cow<'static, str>>>(s: S) -> Self {
        let err = Error::Unknown(s.into());
        if PANIC_ON_ERROR {
            panic!("JSCONF_PANIC_ON_ERROR: {}", err);
        }
        err
    }

    /// Appends the Rust type name to a [`Error::TypeError`] or
    /// [`Error::InvalidData`] message; other errors are returned unchanged.
    #[inline(never)]
    pub fn with_type_name<T: ?Sized + 'static>(err: Error) -> Error {
        let type_name = std::any::type_name::<T>();
        match err {
            Error::TypeError(s) => Error::type_error(format!("{s} (type: {type_name})")),
            Error::InvalidData(s) => Error::invalid_data(format!("{s} (type: {type_name})")),
            other => other,
        }
    }
}
