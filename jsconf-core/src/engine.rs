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

//! Entry points of the text serialization engine.
//!
//! The engine itself (tokenizers, writers, reflection) lives outside this
//! crate. [`TextEngine`] names the generic entry points it exposes so that
//! [`crate::aot::AotRegistrar`] can instantiate them for a given type, and so
//! that [`crate::resolver::TypeOverrideRegistry::write_override`] can hand
//! custom output back to the engine's string writer.
//!
//! Every method has a no-op default. An engine on a target that compiles
//! generics on demand does not need to override any of them.

use crate::error::Error;
use crate::types::{Identify, KeyValue};
use std::collections::VecDeque;

pub trait TextEngine {
    /// Writes `value` as a string literal, quoting and escaping as the
    /// format requires.
    fn write_string(&self, out: &mut String, value: &str) -> Result<(), Error> {
        out.push_str(value);
        Ok(())
    }

    fn parse<T: Identify>(&self, _text: Option<&str>) -> Result<Option<T>, Error> {
        Ok(None)
    }

    fn write<T: Identify>(&self, _out: &mut String, _value: Option<&T>) -> Result<(), Error> {
        Ok(())
    }

    fn parse_array<T: Identify>(&self, _text: Option<&str>) -> Result<Option<Box<[T]>>, Error> {
        Ok(None)
    }

    fn parse_list<T: Identify>(&self, _text: Option<&str>) -> Result<Option<Vec<T>>, Error> {
        Ok(None)
    }

    /// Parses into the engine's generic collection target.
    fn parse_collection<T: Identify>(&self, _text: Option<&str>) -> Result<Option<Vec<T>>, Error> {
        Ok(None)
    }

    fn parse_queue<T: Identify>(&self, _text: Option<&str>) -> Result<Option<VecDeque<T>>, Error> {
        Ok(None)
    }

    /// Parses a stack; the last element of the returned `Vec` is the top.
    fn parse_stack<T: Identify>(&self, _text: Option<&str>) -> Result<Option<Vec<T>>, Error> {
        Ok(None)
    }

    fn write_list<T: Identify>(
        &self,
        _out: &mut String,
        _items: Option<&[T]>,
    ) -> Result<(), Error> {
        Ok(())
    }

    fn write_enumerable<T: Identify>(
        &self,
        _out: &mut String,
        _items: Option<&mut dyn Iterator<Item = &T>>,
    ) -> Result<(), Error> {
        Ok(())
    }

    fn parse_map<K: Identify, V: Identify>(
        &self,
        _text: Option<&str>,
    ) -> Result<Option<Vec<KeyValue<K, V>>>, Error> {
        Ok(None)
    }

    fn write_map<K: Identify, V: Identify>(
        &self,
        _out: &mut String,
        _entries: Option<&[KeyValue<K, V>]>,
    ) -> Result<(), Error> {
        Ok(())
    }

    fn write_csv<T: Identify>(&self, _out: &mut String, _rows: Option<&[T]>) -> Result<(), Error> {
        Ok(())
    }

    fn write_csv_row<T: Identify>(&self, _out: &mut String, _row: Option<&T>) -> Result<(), Error> {
        Ok(())
    }

    fn write_query_string<T: Identify>(
        &self,
        _out: &mut String,
        _value: Option<&T>,
    ) -> Result<(), Error> {
        Ok(())
    }
}

/// Engine that does nothing; every entry point keeps its default.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopEngine;

impl TextEngine for NoopEngine {}
