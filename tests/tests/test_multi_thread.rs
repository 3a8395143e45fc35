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

use jsconf_core::config::GlobalConfigStore;
use jsconf_core::resolver::TypeOverrideRegistry;
use jsconf_core::types::{Identify, TypeKey};
use std::sync::{Arc, Barrier};
use std::thread;

struct Celsius(f64);
impl Identify for Celsius {}

struct Fahrenheit(f64);
impl Identify for Fahrenheit {}

struct Kelvin(f64);
impl Identify for Kelvin {}

#[test]
fn test_concurrent_registration_of_different_types() {
    let registry = Arc::new(TypeOverrideRegistry::new());
    let start = Arc::new(Barrier::new(3));
    let spawn = |f: fn(&TypeOverrideRegistry)| {
        let registry = Arc::clone(&registry);
        let start = Arc::clone(&start);
        thread::spawn(move || {
            start.wait();
            for _ in 0..100 {
                f(&registry);
            }
        })
    };

    let handles = vec![
        spawn(|r| {
            r.of::<Celsius>()
                .serialize_fn(|c: &Celsius| format!("{}C", c.0));
        }),
        spawn(|r| {
            r.of::<Fahrenheit>()
                .serialize_fn(|f: &Fahrenheit| format!("{}F", f.0));
            r.of::<Fahrenheit>().clear_serialize_fn();
        }),
        spawn(|r| {
            r.of::<Kelvin>()
                .serialize_fn(|k: &Kelvin| format!("{}K", k.0))
                .exclude_type_info(true);
        }),
    ];
    for handle in handles {
        handle.join().unwrap();
    }

    assert!(registry.has_serializer(TypeKey::of::<Celsius>()));
    assert!(!registry.has_serializer(TypeKey::of::<Fahrenheit>()));
    assert!(registry.has_serializer(TypeKey::of::<Kelvin>()));
    assert_eq!(registry.serializer_types().len(), 2);
    assert_eq!(registry.of::<Kelvin>().get_exclude_type_info(), Some(true));
    let celsius = registry.of::<Celsius>();
    assert_eq!(celsius.serialize(&Celsius(21.5)).as_deref(), Some("21.5C"));
}

#[test]
fn test_readers_see_consistent_index() {
    let registry = Arc::new(TypeOverrideRegistry::new());
    let writer = {
        let registry = Arc::clone(&registry);
        thread::spawn(move || {
            for _ in 0..200 {
                let celsius = registry.of::<Celsius>();
                celsius.serialize_fn(|c: &Celsius| c.0.to_string());
                celsius.clear_serialize_fn();
            }
        })
    };
    let reader = {
        let registry = Arc::clone(&registry);
        thread::spawn(move || {
            for _ in 0..200 {
                if let Some(text) = registry.of::<Celsius>().serialize(&Celsius(1.5)) {
                    assert_eq!(text, "1.5");
                }
                if let Some(entry) = registry.entry(TypeKey::of::<Celsius>()) {
                    assert!(entry.has_serializer());
                }
            }
        })
    };
    writer.join().unwrap();
    reader.join().unwrap();
    assert!(!registry.has_serializer(TypeKey::of::<Celsius>()));
    assert!(registry.entry(TypeKey::of::<Celsius>()).is_none());
}

#[test]
fn test_store_per_thread_overrides() {
    let store = Arc::new(GlobalConfigStore::new());
    store.include_null_values().set(true);
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                let own = i % 2 == 0;
                store.exclude_type_info().set(own);
                let config = store.resolve();
                assert!(config.is_include_null_values());
                config.is_exclude_type_info() == own
            })
        })
        .collect();
    for handle in handles {
        assert!(handle.join().unwrap());
    }
}
