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

//! Shared fixtures for the integration tests.

use jsconf_core::engine::TextEngine;
use jsconf_core::error::Error;
use jsconf_core::types::{Identify, KeyValue};
use std::any::type_name;
use std::collections::VecDeque;
use std::sync::Mutex;

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Engine that records every entry point it is asked to run.
#[derive(Debug, Default)]
pub struct RecordingEngine {
    calls: Mutex<Vec<(&'static str, &'static str)>>,
}

impl RecordingEngine {
    pub fn new() -> Self {
        Self::default()
    }

    fn record<T: ?Sized>(&self, path: &'static str) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push((path, type_name::<T>()));
        }
    }

    pub fn calls(&self) -> Vec<(&'static str, &'static str)> {
        self.calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }

    pub fn count(&self, path: &str) -> usize {
        self.calls().iter().filter(|(p, _)| *p == path).count()
    }

    pub fn was_called<T: ?Sized>(&self, path: &str) -> bool {
        self.calls()
            .iter()
            .any(|(p, name)| *p == path && *name == type_name::<T>())
    }
}

impl TextEngine for RecordingEngine {
    fn write_string(&self, out: &mut String, value: &str) -> Result<(), Error> {
        self.record::<str>("write_string");
        out.push('"');
        out.push_str(value);
        out.push('"');
        Ok(())
    }

    fn parse<T: Identify>(&self, _text: Option<&str>) -> Result<Option<T>, Error> {
        self.record::<T>("parse");
        Ok(None)
    }

    fn write<T: Identify>(&self, _out: &mut String, _value: Option<&T>) -> Result<(), Error> {
        self.record::<T>("write");
        Ok(())
    }

    fn parse_array<T: Identify>(&self, _text: Option<&str>) -> Result<Option<Box<[T]>>, Error> {
        self.record::<T>("parse_array");
        Ok(None)
    }

    fn parse_list<T: Identify>(&self, _text: Option<&str>) -> Result<Option<Vec<T>>, Error> {
        self.record::<T>("parse_list");
        Ok(None)
    }

    fn parse_collection<T: Identify>(&self, _text: Option<&str>) -> Result<Option<Vec<T>>, Error> {
        self.record::<T>("parse_collection");
        Ok(None)
    }

    fn parse_queue<T: Identify>(&self, _text: Option<&str>) -> Result<Option<VecDeque<T>>, Error> {
        self.record::<T>("parse_queue");
        Ok(None)
    }

    fn parse_stack<T: Identify>(&self, _text: Option<&str>) -> Result<Option<Vec<T>>, Error> {
        self.record::<T>("parse_stack");
        Ok(None)
    }

    fn write_list<T: Identify>(
        &self,
        _out: &mut String,
        _items: Option<&[T]>,
    ) -> Result<(), Error> {
        self.record::<T>("write_list");
        Ok(())
    }

    fn write_enumerable<T: Identify>(
        &self,
        _out: &mut String,
        _items: Option<&mut dyn Iterator<Item = &T>>,
    ) -> Result<(), Error> {
        self.record::<T>("write_enumerable");
        Ok(())
    }

    fn parse_map<K: Identify, V: Identify>(
        &self,
        _text: Option<&str>,
    ) -> Result<Option<Vec<KeyValue<K, V>>>, Error> {
        self.record::<KeyValue<K, V>>("parse_map");
        Ok(None)
    }

    fn write_map<K: Identify, V: Identify>(
        &self,
        _out: &mut String,
        _entries: Option<&[KeyValue<K, V>]>,
    ) -> Result<(), Error> {
        self.record::<KeyValue<K, V>>("write_map");
        Ok(())
    }

    fn write_csv<T: Identify>(&self, _out: &mut String, _rows: Option<&[T]>) -> Result<(), Error> {
        self.record::<T>("write_csv");
        Ok(())
    }

    fn write_csv_row<T: Identify>(&self, _out: &mut String, _row: Option<&T>) -> Result<(), Error> {
        self.record::<T>("write_csv_row");
        Ok(())
    }

    fn write_query_string<T: Identify>(
        &self,
        _out: &mut String,
        _value: Option<&T>,
    ) -> Result<(), Error> {
        self.record::<T>("write_query_string");
        Ok(())
    }
}

/// Engine whose parse path fails and whose list writer panics.
#[derive(Debug, Default)]
pub struct FaultyEngine;

impl TextEngine for FaultyEngine {
    fn parse<T: Identify>(&self, _text: Option<&str>) -> Result<Option<T>, Error> {
        Err(Error::unsupported(format!("no parser for {}", type_name::<T>())))
    }

    fn write_list<T: Identify>(
        &self,
        _out: &mut String,
        _items: Option<&[T]>,
    ) -> Result<(), Error> {
        panic!("list writer unavailable for {}", type_name::<T>());
    }
}
