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

use jsconf_core::aot::{AotRegistrar, Placeholder};
use jsconf_core::engine::NoopEngine;
use jsconf_core::types::KeyValue;
use std::time::{Duration, SystemTime};
use tests::{FaultyEngine, RecordingEngine};

#[test]
fn test_register_type_drives_every_single_type_path() {
    let engine = RecordingEngine::new();
    let registrar = AotRegistrar::new(&engine);
    assert!(registrar.register_type::<Placeholder>());
    for path in [
        "parse",
        "write",
        "parse_array",
        "parse_list",
        "parse_collection",
        "parse_queue",
        "parse_stack",
        "write_list",
        "write_enumerable",
        "write_query_string",
        "write_csv",
        "write_csv_row",
    ] {
        assert!(engine.was_called::<Placeholder>(path), "missing {path}");
    }
    assert_eq!(engine.calls().len(), 12);
}

#[test]
fn test_register_element_covers_maps_both_ways() {
    let engine = RecordingEngine::new();
    let registrar = AotRegistrar::new(&engine);
    assert!(registrar.register_element::<Placeholder, i32>());
    assert!(engine.was_called::<i32>("parse"));
    assert!(engine.was_called::<i32>("write"));
    assert!(engine.was_called::<KeyValue<Placeholder, i32>>("parse_map"));
    assert!(engine.was_called::<KeyValue<i32, Placeholder>>("parse_map"));
    assert!(engine.was_called::<KeyValue<Placeholder, i32>>("write_map"));
    assert!(engine.was_called::<KeyValue<i32, Placeholder>>("write_map"));
    assert!(engine.was_called::<i32>("parse_array"));
    assert!(engine.was_called::<i32>("parse_list"));
}

#[test]
fn test_register_for_aot_covers_primitives_and_options() {
    let engine = RecordingEngine::new();
    let registrar = AotRegistrar::new(&engine);
    AotRegistrar::<RecordingEngine>::init_for_aot();
    assert!(registrar.register_for_aot());
    assert!(engine.was_called::<String>("parse"));
    assert!(engine.was_called::<u64>("write"));
    assert!(engine.was_called::<usize>("parse"));
    assert!(engine.was_called::<Option<isize>>("write"));
    assert!(engine.was_called::<Option<bool>>("parse"));
    assert!(engine.was_called::<Duration>("write"));
    assert!(engine.was_called::<Option<SystemTime>>("parse_list"));
    assert!(engine.was_called::<Placeholder>("write_query_string"));
    assert!(engine.was_called::<Placeholder>("write_csv_row"));
}

#[test]
fn test_registration_is_idempotent() {
    let engine = RecordingEngine::new();
    let registrar = AotRegistrar::new(&engine);
    assert!(registrar.register_for_aot());
    let first = engine.calls();
    assert!(registrar.register_for_aot());
    let all = engine.calls();
    assert_eq!(all.len(), first.len() * 2);
    assert_eq!(&all[first.len()..], &first[..]);
}

#[test]
fn test_failures_and_panics_are_swallowed() {
    tests::init_logger();
    let engine = FaultyEngine;
    let registrar = AotRegistrar::new(&engine);
    assert!(!registrar.register_type::<Vec<String>>());
    assert!(!registrar.register_for_aot());
    // paths that neither fail nor panic still succeed
    assert!(registrar.register_query_string_writer());
    assert!(registrar.register_csv_serializer());
}

#[test]
fn test_noop_engine_warm_up() {
    let registrar = AotRegistrar::new(&NoopEngine);
    assert!(registrar.register_for_aot());
    assert!(registrar.register_builtin::<Option<String>>());
}
