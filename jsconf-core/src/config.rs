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

use crate::error::Error;
use crate::option_cell::OptionCell;
use crate::types::{DateHandler, TimeSpanHandler};

/// Resolved serialization options.
///
/// A `Config` is a plain snapshot: engines take one per call (from
/// [`GlobalConfigStore::resolve`] or [`GlobalConfigStore::resolve_with`])
/// and read it without touching shared state again.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Config {
    /// Whether properties holding null are written out.
    pub include_null_values: bool,
    /// Whether values typed as a bare object are read as string maps.
    pub convert_object_types_into_string_dictionary: bool,
    /// Whether type information is left out of the output.
    pub exclude_type_info: bool,
    /// Whether member names are emitted in camelCase.
    pub emit_camel_case_names: bool,
    pub date_handler: DateHandler,
    pub time_span_handler: TimeSpanHandler,
    /// Whether a parse failure aborts the whole call instead of skipping the
    /// offending field or element.
    pub throw_on_deserialization_error: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            include_null_values: false,
            convert_object_types_into_string_dictionary: false,
            exclude_type_info: false,
            emit_camel_case_names: false,
            date_handler: DateHandler::TimestampOffset,
            time_span_handler: TimeSpanHandler::DurationFormat,
            throw_on_deserialization_error: false,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn include_null_values(mut self, include_null_values: bool) -> Self {
        self.include_null_values = include_null_values;
        self
    }

    pub fn convert_object_types_into_string_dictionary(mut self, convert: bool) -> Self {
        self.convert_object_types_into_string_dictionary = convert;
        self
    }

    pub fn exclude_type_info(mut self, exclude_type_info: bool) -> Self {
        self.exclude_type_info = exclude_type_info;
        self
    }

    pub fn emit_camel_case_names(mut self, emit_camel_case_names: bool) -> Self {
        self.emit_camel_case_names = emit_camel_case_names;
        self
    }

    pub fn date_handler(mut self, date_handler: DateHandler) -> Self {
        self.date_handler = date_handler;
        self
    }

    pub fn time_span_handler(mut self, time_span_handler: TimeSpanHandler) -> Self {
        self.time_span_handler = time_span_handler;
        self
    }

    pub fn throw_on_deserialization_error(mut self, throw: bool) -> Self {
        self.throw_on_deserialization_error = throw;
        self
    }

    #[inline(always)]
    pub fn is_include_null_values(&self) -> bool {
        self.include_null_values
    }

    #[inline(always)]
    pub fn is_convert_object_types_into_string_dictionary(&self) -> bool {
        self.convert_object_types_into_string_dictionary
    }

    #[inline(always)]
    pub fn is_exclude_type_info(&self) -> bool {
        self.exclude_type_info
    }

    #[inline(always)]
    pub fn is_emit_camel_case_names(&self) -> bool {
        self.emit_camel_case_names
    }

    #[inline(always)]
    pub fn get_date_handler(&self) -> DateHandler {
        self.date_handler
    }

    #[inline(always)]
    pub fn get_time_span_handler(&self) -> TimeSpanHandler {
        self.time_span_handler
    }

    #[inline(always)]
    pub fn is_throw_on_deserialization_error(&self) -> bool {
        self.throw_on_deserialization_error
    }

    /// Applies the deserialization error policy to a parse failure.
    ///
    /// Returns the error when `throw_on_deserialization_error` is set, so the
    /// engine fails the call. Otherwise the failure is logged and `Ok(())`
    /// tells the engine to skip the field or element and keep parsing.
    ///
    /// ```rust
    /// use jsconf_core::config::Config;
    /// use jsconf_core::error::Error;
    ///
    /// let lenient = Config::default();
    /// assert!(lenient.on_deserialize_error(Error::invalid_data("bad int")).is_ok());
    ///
    /// let strict = Config::default().throw_on_deserialization_error(true);
    /// assert!(strict.on_deserialize_error(Error::invalid_data("bad int")).is_err());
    /// ```
    pub fn on_deserialize_error(&self, err: Error) -> Result<(), Error> {
        if self.throw_on_deserialization_error {
            return Err(err);
        }
        log::warn!("skipping value that failed to deserialize: {}", err);
        Ok(())
    }
}

/// Per-call option overrides layered on top of the resolved store values.
///
/// Unset fields leave the underlying value untouched.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ConfigOverlay {
    pub include_null_values: Option<bool>,
    pub convert_object_types_into_string_dictionary: Option<bool>,
    pub exclude_type_info: Option<bool>,
    pub emit_camel_case_names: Option<bool>,
    pub date_handler: Option<DateHandler>,
    pub time_span_handler: Option<TimeSpanHandler>,
    pub throw_on_deserialization_error: Option<bool>,
}

impl ConfigOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn include_null_values(mut self, value: bool) -> Self {
        self.include_null_values = Some(value);
        self
    }

    pub fn convert_object_types_into_string_dictionary(mut self, value: bool) -> Self {
        self.convert_object_types_into_string_dictionary = Some(value);
        self
    }

    pub fn exclude_type_info(mut self, value: bool) -> Self {
        self.exclude_type_info = Some(value);
        self
    }

    pub fn emit_camel_case_names(mut self, value: bool) -> Self {
        self.emit_camel_case_names = Some(value);
        self
    }

    pub fn date_handler(mut self, value: DateHandler) -> Self {
        self.date_handler = Some(value);
        self
    }

    pub fn time_span_handler(mut self, value: TimeSpanHandler) -> Self {
        self.time_span_handler = Some(value);
        self
    }

    pub fn throw_on_deserialization_error(mut self, value: bool) -> Self {
        self.throw_on_deserialization_error = Some(value);
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == ConfigOverlay::default()
    }

    pub fn apply(&self, base: Config) -> Config {
        let mut config = base;
        if let Some(value) = self.include_null_values {
            config.include_null_values = value;
        }
        if let Some(value) = self.convert_object_types_into_string_dictionary {
            config.convert_object_types_into_string_dictionary = value;
        }
        if let Some(value) = self.exclude_type_info {
            config.exclude_type_info = value;
        }
        if let Some(value) = self.emit_camel_case_names {
            config.emit_camel_case_names = value;
        }
        if let Some(value) = self.date_handler {
            config.date_handler = value;
        }
        if let Some(value) = self.time_span_handler {
            config.time_span_handler = value;
        }
        if let Some(value) = self.throw_on_deserialization_error {
            config.throw_on_deserialization_error = value;
        }
        config
    }
}

/// The named option cells shared by every engine in the process.
///
/// Options are independent. Hardcoded fallbacks are those of
/// [`Config::default`].
#[derive(Debug)]
pub struct GlobalConfigStore {
    include_null_values: OptionCell<bool>,
    convert_object_types_into_string_dictionary: OptionCell<bool>,
    exclude_type_info: OptionCell<bool>,
    emit_camel_case_names: OptionCell<bool>,
    date_handler: OptionCell<DateHandler>,
    time_span_handler: OptionCell<TimeSpanHandler>,
    throw_on_deserialization_error: OptionCell<bool>,
}

impl Default for GlobalConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl GlobalConfigStore {
    pub fn new() -> Self {
        let fallback = Config::default();
        GlobalConfigStore {
            include_null_values: OptionCell::new(
                "include_null_values",
                fallback.include_null_values,
            ),
            convert_object_types_into_string_dictionary: OptionCell::new(
                "convert_object_types_into_string_dictionary",
                fallback.convert_object_types_into_string_dictionary,
            ),
            exclude_type_info: OptionCell::new("exclude_type_info", fallback.exclude_type_info),
            emit_camel_case_names: OptionCell::new(
                "emit_camel_case_names",
                fallback.emit_camel_case_names,
            ),
            date_handler: OptionCell::new("date_handler", fallback.date_handler),
            time_span_handler: OptionCell::new("time_span_handler", fallback.time_span_handler),
            throw_on_deserialization_error: OptionCell::new(
                "throw_on_deserialization_error",
                fallback.throw_on_deserialization_error,
            ),
        }
    }

    #[inline(always)]
    pub fn include_null_values(&self) -> &OptionCell<bool> {
        &self.include_null_values
    }

    #[inline(always)]
    pub fn convert_object_types_into_string_dictionary(&self) -> &OptionCell<bool> {
        &self.convert_object_types_into_string_dictionary
    }

    #[inline(always)]
    pub fn exclude_type_info(&self) -> &OptionCell<bool> {
        &self.exclude_type_info
    }

    #[inline(always)]
    pub fn emit_camel_case_names(&self) -> &OptionCell<bool> {
        &self.emit_camel_case_names
    }

    #[inline(always)]
    pub fn date_handler(&self) -> &OptionCell<DateHandler> {
        &self.date_handler
    }

    #[inline(always)]
    pub fn time_span_handler(&self) -> &OptionCell<TimeSpanHandler> {
        &self.time_span_handler
    }

    #[inline(always)]
    pub fn throw_on_deserialization_error(&self) -> &OptionCell<bool> {
        &self.throw_on_deserialization_error
    }

    /// Snapshot of every option as resolved for the calling thread.
    pub fn resolve(&self) -> Config {
        Config {
            include_null_values: self.include_null_values.get(),
            convert_object_types_into_string_dictionary: self
                .convert_object_types_into_string_dictionary
                .get(),
            exclude_type_info: self.exclude_type_info.get(),
            emit_camel_case_names: self.emit_camel_case_names.get(),
            date_handler: self.date_handler.get(),
            time_span_handler: self.time_span_handler.get(),
            throw_on_deserialization_error: self.throw_on_deserialization_error.get(),
        }
    }

    /// Snapshot with an explicit per-call overlay applied last.
    pub fn resolve_with(&self, overlay: &ConfigOverlay) -> Config {
        overlay.apply(self.resolve())
    }

    /// Sets every option from `config` through the normal `set` path, so the
    /// values become this thread's overrides and, where still unset, the
    /// global values.
    pub fn apply(&self, config: &Config) {
        self.include_null_values.set(config.include_null_values);
        self.convert_object_types_into_string_dictionary
            .set(config.convert_object_types_into_string_dictionary);
        self.exclude_type_info.set(config.exclude_type_info);
        self.emit_camel_case_names.set(config.emit_camel_case_names);
        self.date_handler.set(config.date_handler);
        self.time_span_handler.set(config.time_span_handler);
        self.throw_on_deserialization_error
            .set(config.throw_on_deserialization_error);
    }

    /// Reverts every option to its hardcoded fallback on every thread.
    pub fn reset(&self) {
        self.include_null_values.reset();
        self.convert_object_types_into_string_dictionary.reset();
        self.exclude_type_info.reset();
        self.emit_camel_case_names.reset();
        self.date_handler.reset();
        self.time_span_handler.reset();
        self.throw_on_deserialization_error.reset();
        log::debug!("global config store reset");
    }
}
