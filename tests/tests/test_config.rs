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

use jsconf_core::config::{Config, ConfigOverlay, GlobalConfigStore};
use jsconf_core::error::Error;
use jsconf_core::types::{DateHandler, TimeSpanHandler};
use std::thread;

#[test]
fn test_fallbacks() {
    let config = Config::default();
    assert!(!config.is_include_null_values());
    assert!(!config.is_convert_object_types_into_string_dictionary());
    assert!(!config.is_exclude_type_info());
    assert!(!config.is_emit_camel_case_names());
    assert_eq!(config.get_date_handler(), DateHandler::TimestampOffset);
    assert_eq!(
        config.get_time_span_handler(),
        TimeSpanHandler::DurationFormat
    );
    assert!(!config.is_throw_on_deserialization_error());
    assert_eq!(Config::new(), config);
}

#[test]
fn test_string_dictionary_toggle_is_honoured() {
    let store = GlobalConfigStore::new();
    let option = store.convert_object_types_into_string_dictionary();
    option.set(true);
    let config = store.resolve();
    assert!(config.is_convert_object_types_into_string_dictionary());
    store.reset();
    let config = store.resolve();
    assert!(!config.is_convert_object_types_into_string_dictionary());
}

#[test]
fn test_apply_sets_every_option() {
    let store = GlobalConfigStore::new();
    let wanted = Config::new()
        .include_null_values(true)
        .exclude_type_info(true)
        .date_handler(DateHandler::Iso8601)
        .time_span_handler(TimeSpanHandler::StandardFormat);
    store.apply(&wanted);
    assert_eq!(store.resolve(), wanted);

    // applied values became the global ones for other threads
    let seen = thread::scope(|s| s.spawn(|| store.resolve()).join().unwrap());
    assert_eq!(seen, wanted);
}

#[test]
fn test_overlay_applies_last() {
    let store = GlobalConfigStore::new();
    store.include_null_values().set(true);
    let overlay = ConfigOverlay::new()
        .include_null_values(false)
        .time_span_handler(TimeSpanHandler::StandardFormat);
    let config = store.resolve_with(&overlay);
    assert!(!config.is_include_null_values());
    assert_eq!(
        config.get_time_span_handler(),
        TimeSpanHandler::StandardFormat
    );
    // the store is untouched
    assert!(store.include_null_values().get());
}

#[test]
fn test_deserialize_error_policy() {
    tests::init_logger();
    let lenient = Config::default();
    assert!(lenient
        .on_deserialize_error(Error::invalid_data("bad number"))
        .is_ok());

    let strict = Config::default().throw_on_deserialization_error(true);
    let err = strict
        .on_deserialize_error(Error::invalid_data("bad number"))
        .unwrap_err();
    assert!(matches!(err, Error::InvalidData(_)));
    assert!(err.to_string().contains("bad number"));
}

#[test]
fn test_handler_numeric_and_text_forms() {
    assert_eq!(u8::from(DateHandler::Iso8601), 2);
    assert_eq!(
        DateHandler::try_from(1u8).unwrap(),
        DateHandler::DcjsCompatible
    );
    assert!(DateHandler::try_from(7u8).is_err());
    assert_eq!(
        "iso8601".parse::<DateHandler>().unwrap(),
        DateHandler::Iso8601
    );
    assert_eq!(
        "standard-format".parse::<TimeSpanHandler>().unwrap(),
        TimeSpanHandler::StandardFormat
    );
    assert!("yesterday".parse::<DateHandler>().is_err());
    assert_eq!(DateHandler::DcjsCompatible.to_string(), "DCJSCompatible");
}
