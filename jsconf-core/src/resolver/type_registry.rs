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

use crate::config::Config;
use crate::engine::TextEngine;
use crate::error::Error;
use crate::types::{Identify, TypeIdentity, TypeKey, KEY_VALUE_DEFINITION};
use crate::util::to_camel_case;
use arc_swap::ArcSwap;
use std::any::{type_name, Any};
use std::borrow::Cow;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;

/// Custom serializer: renders a value as text that replaces the generic output.
pub type SerializeFn<T> = Arc<dyn Fn(&T) -> String + Send + Sync>;
/// Custom deserializer: parses text produced for the type.
pub type DeserializeFn<T> = Arc<dyn Fn(&str) -> Result<T, Error> + Send + Sync>;

type ErasedSerializeFn = Arc<dyn Fn(&dyn Any) -> Result<String, Error> + Send + Sync>;
type ErasedDeserializeFn = Arc<dyn Fn(&str) -> Result<Box<dyn Any>, Error> + Send + Sync>;

// The typed function is kept behind `dyn Any` for downcasting back to
// `SerializeFn<T>`; the erased one serves engines that only hold `&dyn Any`.
#[derive(Clone)]
struct SerializerSlot {
    typed: Arc<dyn Any + Send + Sync>,
    erased: ErasedSerializeFn,
}

#[derive(Clone)]
struct DeserializerSlot {
    typed: Arc<dyn Any + Send + Sync>,
    erased: ErasedDeserializeFn,
}

/// Overrides recorded for one type key.
#[derive(Clone, Default)]
pub struct TypeOverride {
    exclude_type_info: Option<bool>,
    emit_camel_case_names: Option<bool>,
    excluded_property_names: Option<Arc<[String]>>,
    serializer: Option<SerializerSlot>,
    deserializer: Option<DeserializerSlot>,
}

impl TypeOverride {
    #[inline(always)]
    pub fn get_exclude_type_info(&self) -> Option<bool> {
        self.exclude_type_info
    }

    #[inline(always)]
    pub fn get_emit_camel_case_names(&self) -> Option<bool> {
        self.emit_camel_case_names
    }

    #[inline(always)]
    pub fn get_excluded_property_names(&self) -> Option<&[String]> {
        self.excluded_property_names.as_deref()
    }

    #[inline(always)]
    pub fn has_serializer(&self) -> bool {
        self.serializer.is_some()
    }

    #[inline(always)]
    pub fn has_deserializer(&self) -> bool {
        self.deserializer.is_some()
    }

    fn is_empty(&self) -> bool {
        self.exclude_type_info.is_none()
            && self.emit_camel_case_names.is_none()
            && self.excluded_property_names.is_none()
            && self.serializer.is_none()
            && self.deserializer.is_none()
    }
}

impl fmt::Debug for TypeOverride {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeOverride")
            .field("exclude_type_info", &self.exclude_type_info)
            .field("emit_camel_case_names", &self.emit_camel_case_names)
            .field("excluded_property_names", &self.excluded_property_names)
            .field("has_serializer", &self.has_serializer())
            .field("has_deserializer", &self.has_deserializer())
            .finish()
    }
}

#[derive(Clone)]
struct Snapshot {
    entries: HashMap<TypeKey, Arc<TypeOverride>>,
    // Keys whose entry holds a serializer.
    has_serialize_fn: HashSet<TypeKey>,
    ref_types: HashSet<TypeKey>,
}

impl Snapshot {
    fn baseline() -> Self {
        Snapshot {
            entries: HashMap::new(),
            has_serialize_fn: HashSet::new(),
            ref_types: HashSet::from([KEY_VALUE_DEFINITION]),
        }
    }

    fn store_entry(&mut self, key: TypeKey, entry: TypeOverride) {
        if entry.serializer.is_some() {
            self.has_serialize_fn.insert(key);
        } else {
            self.has_serialize_fn.remove(&key);
        }
        if entry.is_empty() {
            self.entries.remove(&key);
        } else {
            self.entries.insert(key, Arc::new(entry));
        }
    }

    fn find<R>(
        &self,
        identity: &TypeIdentity,
        f: impl Fn(&TypeOverride) -> Option<R>,
    ) -> Option<R> {
        identity
            .candidates()
            .find_map(|key| self.entries.get(&key).and_then(|entry| f(&**entry)))
    }

    fn is_ref_type(&self, identity: &TypeIdentity) -> bool {
        identity
            .candidates()
            .any(|key| self.ref_types.contains(&key))
    }
}

/// Per-type override registry.
///
/// Reads load an immutable snapshot without locking. Every mutation clones
/// the snapshot, edits it and swaps it in with a compare-and-swap retry loop,
/// so the serializer index always agrees with the entries a reader sees and
/// concurrent writers never drop each other's changes. Mutation is meant for
/// start-up; [`TypeOverrideRegistry::reset`] must not race with live
/// serialization.
pub struct TypeOverrideRegistry {
    state: ArcSwap<Snapshot>,
}

impl Default for TypeOverrideRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeOverrideRegistry {
    pub fn new() -> Self {
        TypeOverrideRegistry {
            state: ArcSwap::from_pointee(Snapshot::baseline()),
        }
    }

    /// Typed handle for the overrides of `T`.
    pub fn of<T: Identify>(&self) -> super::TypeConfig<'_, T> {
        super::TypeConfig::new(self)
    }

    fn update(&self, f: impl Fn(&mut Snapshot)) {
        let _ = self.state.rcu(|current| {
            let mut next = Snapshot::clone(current);
            f(&mut next);
            next
        });
    }

    fn update_entry(&self, key: TypeKey, f: impl Fn(&mut TypeOverride)) {
        self.update(|snapshot| {
            let mut entry = snapshot
                .entries
                .get(&key)
                .map(|entry| TypeOverride::clone(entry))
                .unwrap_or_default();
            f(&mut entry);
            snapshot.store_entry(key, entry);
        });
    }

    /// Installs or, with `None`, removes the custom serializer of `T`.
    pub fn set_serializer<T: Identify>(&self, serialize_fn: Option<SerializeFn<T>>) {
        let key = T::type_key();
        let slot = serialize_fn.map(|typed| {
            let call = Arc::clone(&typed);
            let erased: ErasedSerializeFn = Arc::new(move |value: &dyn Any| {
                let Some(value) = value.downcast_ref::<T>() else {
                    return Err(Error::type_mismatch(type_name::<T>(), "value of another type"));
                };
                Ok((*call)(value))
            });
            SerializerSlot {
                typed: Arc::new(typed),
                erased,
            }
        });
        log::debug!(
            "{} custom serializer for {}",
            if slot.is_some() { "set" } else { "cleared" },
            key
        );
        self.update_entry(key, |entry| entry.serializer = slot.clone());
    }

    /// Installs or, with `None`, removes the custom deserializer of `T`.
    pub fn set_deserializer<T: Identify>(&self, deserialize_fn: Option<DeserializeFn<T>>) {
        let key = T::type_key();
        let slot = deserialize_fn.map(|typed| {
            let call = Arc::clone(&typed);
            let erased: ErasedDeserializeFn = Arc::new(move |text: &str| {
                let value = (*call)(text)?;
                Ok(Box::new(value) as Box<dyn Any>)
            });
            DeserializerSlot {
                typed: Arc::new(typed),
                erased,
            }
        });
        log::debug!(
            "{} custom deserializer for {}",
            if slot.is_some() { "set" } else { "cleared" },
            key
        );
        self.update_entry(key, |entry| entry.deserializer = slot.clone());
    }

    /// Membership test against the serializer index. No per-type reflection.
    #[inline]
    pub fn has_serializer(&self, key: TypeKey) -> bool {
        self.state.load().has_serialize_fn.contains(&key)
    }

    #[inline]
    pub fn has_deserializer(&self, key: TypeKey) -> bool {
        self.state
            .load()
            .entries
            .get(&key)
            .is_some_and(|entry| entry.has_deserializer())
    }

    pub fn serializer<T: Identify>(&self) -> Option<SerializeFn<T>> {
        let state = self.state.load();
        let slot = state.entries.get(&T::type_key())?.serializer.as_ref()?;
        slot.typed.downcast_ref::<SerializeFn<T>>().cloned()
    }

    pub fn deserializer<T: Identify>(&self) -> Option<DeserializeFn<T>> {
        let state = self.state.load();
        let slot = state.entries.get(&T::type_key())?.deserializer.as_ref()?;
        slot.typed.downcast_ref::<DeserializeFn<T>>().cloned()
    }

    /// Runs the custom serializer registered for `key` on a type-erased value.
    ///
    /// Returns `None` when no serializer is registered, and a
    /// [`Error::TypeMismatch`] when `value` is not of the registered type.
    pub fn serialize_dyn(&self, key: TypeKey, value: &dyn Any) -> Option<Result<String, Error>> {
        let erased = {
            let state = self.state.load();
            let slot = state.entries.get(&key)?.serializer.as_ref()?;
            Arc::clone(&slot.erased)
        };
        Some((*erased)(value))
    }

    /// Runs the custom deserializer registered for `key`, boxing the result.
    pub fn deserialize_dyn(
        &self,
        key: TypeKey,
        text: &str,
    ) -> Option<Result<Box<dyn Any>, Error>> {
        let erased = {
            let state = self.state.load();
            let slot = state.entries.get(&key)?.deserializer.as_ref()?;
            Arc::clone(&slot.erased)
        };
        Some((*erased)(text))
    }

    /// Renders `value` through its custom serializer and hands the text to
    /// the engine's string writer.
    ///
    /// Returns `Ok(false)` without writing when `T` has no serializer, so the
    /// engine can fall back to its generic path.
    pub fn write_override<T: Identify, E: TextEngine>(
        &self,
        engine: &E,
        out: &mut String,
        value: &T,
    ) -> Result<bool, Error> {
        match self.serializer::<T>() {
            Some(serialize_fn) => {
                let text = (*serialize_fn)(value);
                engine.write_string(out, &text)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Parses `text` through the custom deserializer of `T`, if any.
    pub fn parse_override<T: Identify>(&self, text: &str) -> Option<Result<T, Error>> {
        let deserialize_fn = self.deserializer::<T>()?;
        Some((*deserialize_fn)(text).map_err(Error::with_type_name::<T>))
    }

    /// Adds or removes `key` from the set of value types serialized with
    /// reference semantics (explicit null, no value-type shortcuts).
    pub fn treat_as_ref_type(&self, key: TypeKey, enabled: bool) {
        log::debug!("treat {} as ref type: {}", key, enabled);
        self.update(|snapshot| {
            if enabled {
                snapshot.ref_types.insert(key);
            } else {
                snapshot.ref_types.remove(&key);
            }
        });
    }

    /// Whether the type, or failing that its generic definition, is treated
    /// as a reference type.
    #[inline]
    pub fn is_ref_type(&self, identity: &TypeIdentity) -> bool {
        self.state.load().is_ref_type(identity)
    }

    pub fn exclude_property_names<I, S>(&self, key: TypeKey, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Arc<[String]> = names.into_iter().map(Into::into).collect();
        log::debug!("exclude properties {:?} of {}", names, key);
        self.update_entry(key, |entry| {
            entry.excluded_property_names = Some(Arc::clone(&names));
        });
    }

    pub fn exclude_type_info(&self, key: TypeKey, exclude: bool) {
        self.update_entry(key, |entry| entry.exclude_type_info = Some(exclude));
    }

    pub fn emit_camel_case_names(&self, key: TypeKey, emit: bool) {
        self.update_entry(key, |entry| entry.emit_camel_case_names = Some(emit));
    }

    #[inline]
    pub fn get_exclude_type_info(&self, identity: &TypeIdentity) -> Option<bool> {
        self.state
            .load()
            .find(identity, |entry| entry.exclude_type_info)
    }

    #[inline]
    pub fn get_emit_camel_case_names(&self, identity: &TypeIdentity) -> Option<bool> {
        self.state
            .load()
            .find(identity, |entry| entry.emit_camel_case_names)
    }

    #[inline]
    pub fn get_excluded_property_names(&self, identity: &TypeIdentity) -> Option<Arc<[String]>> {
        self.state
            .load()
            .find(identity, |entry| entry.excluded_property_names.clone())
    }

    /// The entry recorded for exactly `key`, without definition fallback.
    pub fn entry(&self, key: TypeKey) -> Option<Arc<TypeOverride>> {
        self.state.load().entries.get(&key).cloned()
    }

    /// Drops every override recorded for `key`. Ref-type membership is kept.
    pub fn remove(&self, key: TypeKey) {
        self.update(|snapshot| snapshot.store_entry(key, TypeOverride::default()));
    }

    /// Keys that currently have a custom serializer.
    pub fn serializer_types(&self) -> Vec<TypeKey> {
        self.state.load().has_serialize_fn.iter().copied().collect()
    }

    /// Keys currently treated as reference types.
    pub fn ref_types(&self) -> Vec<TypeKey> {
        self.state.load().ref_types.iter().copied().collect()
    }

    /// Effective configuration of one type: per-type values where present,
    /// otherwise the resolved global values from `config`.
    pub fn view(&self, identity: &TypeIdentity, config: &Config) -> TypeView {
        let state = self.state.load();
        TypeView {
            exclude_type_info: state
                .find(identity, |entry| entry.exclude_type_info)
                .unwrap_or(config.exclude_type_info),
            emit_camel_case_names: state
                .find(identity, |entry| entry.emit_camel_case_names)
                .unwrap_or(config.emit_camel_case_names),
            excluded_property_names: state
                .find(identity, |entry| entry.excluded_property_names.clone()),
            is_ref_type: state.is_ref_type(identity),
            has_serializer: state.has_serialize_fn.contains(&identity.key()),
        }
    }

    /// Drops every override and restores the built-in ref-type set, which
    /// holds only the [`crate::types::KeyValue`] definition.
    pub fn reset(&self) {
        self.state.store(Arc::new(Snapshot::baseline()));
        log::debug!("type override registry reset");
    }
}

impl fmt::Debug for TypeOverrideRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.load();
        f.debug_struct("TypeOverrideRegistry")
            .field("entries", &state.entries)
            .field("has_serialize_fn", &state.has_serialize_fn)
            .field("ref_types", &state.ref_types)
            .finish()
    }
}

/// Effective per-type configuration, see [`TypeOverrideRegistry::view`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeView {
    exclude_type_info: bool,
    emit_camel_case_names: bool,
    excluded_property_names: Option<Arc<[String]>>,
    is_ref_type: bool,
    has_serializer: bool,
}

impl TypeView {
    #[inline(always)]
    pub fn is_exclude_type_info(&self) -> bool {
        self.exclude_type_info
    }

    #[inline(always)]
    pub fn is_emit_camel_case_names(&self) -> bool {
        self.emit_camel_case_names
    }

    #[inline(always)]
    pub fn is_ref_type(&self) -> bool {
        self.is_ref_type
    }

    #[inline(always)]
    pub fn has_serializer(&self) -> bool {
        self.has_serializer
    }

    pub fn excluded_property_names(&self) -> &[String] {
        self.excluded_property_names.as_deref().unwrap_or(&[])
    }

    pub fn includes_property(&self, name: &str) -> bool {
        let excluded = self.excluded_property_names();
        !excluded.iter().any(|excluded| excluded == name)
    }

    /// The name to emit for a member, camelCased when the effective flag is on.
    pub fn member_name<'a>(&self, name: &'a str) -> Cow<'a, str> {
        if self.emit_camel_case_names {
            to_camel_case(name)
        } else {
            Cow::Borrowed(name)
        }
    }
}
