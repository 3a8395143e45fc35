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

use super::type_registry::{DeserializeFn, SerializeFn, TypeOverrideRegistry, TypeView};
use crate::config::Config;
use crate::error::Error;
use crate::types::{Identify, TypeIdentity};
use std::marker::PhantomData;
use std::sync::Arc;

/// Typed view of the overrides of one type, obtained with
/// [`TypeOverrideRegistry::of`].
///
/// Setters write to the concrete key of `T`. Flag getters fall back to the
/// generic definition of `T` when the concrete type has no value.
///
/// ```rust
/// use jsconf_core::resolver::TypeOverrideRegistry;
/// use jsconf_core::types::Identify;
///
/// struct Money {
///     amount: u64,
/// }
/// impl Identify for Money {}
///
/// let registry = TypeOverrideRegistry::new();
/// let money = registry.of::<Money>();
/// money.serialize_fn(|m: &Money| format!("${}", m.amount));
/// assert!(money.has_serialize_fn());
/// assert_eq!(money.serialize(&Money { amount: 5 }).as_deref(), Some("$5"));
///
/// money.clear_serialize_fn();
/// assert!(!money.has_serialize_fn());
/// ```
pub struct TypeConfig<'r, T> {
    registry: &'r TypeOverrideRegistry,
    _marker: PhantomData<fn() -> T>,
}

impl<'r, T: Identify> TypeConfig<'r, T> {
    pub(crate) fn new(registry: &'r TypeOverrideRegistry) -> Self {
        TypeConfig {
            registry,
            _marker: PhantomData,
        }
    }

    pub fn serialize_fn<F>(&self, serialize_fn: F) -> &Self
    where
        F: Fn(&T) -> String + Send + Sync + 'static,
    {
        let serialize_fn: SerializeFn<T> = Arc::new(serialize_fn);
        self.registry.set_serializer::<T>(Some(serialize_fn));
        self
    }

    pub fn clear_serialize_fn(&self) -> &Self {
        self.registry.set_serializer::<T>(None);
        self
    }

    pub fn deserialize_fn<F>(&self, deserialize_fn: F) -> &Self
    where
        F: Fn(&str) -> Result<T, Error> + Send + Sync + 'static,
    {
        let deserialize_fn: DeserializeFn<T> = Arc::new(deserialize_fn);
        self.registry.set_deserializer::<T>(Some(deserialize_fn));
        self
    }

    pub fn clear_deserialize_fn(&self) -> &Self {
        self.registry.set_deserializer::<T>(None);
        self
    }

    pub fn treat_value_as_ref_type(&self, enabled: bool) -> &Self {
        self.registry.treat_as_ref_type(T::type_key(), enabled);
        self
    }

    pub fn exclude_type_info(&self, exclude: bool) -> &Self {
        self.registry.exclude_type_info(T::type_key(), exclude);
        self
    }

    pub fn emit_camel_case_names(&self, emit: bool) -> &Self {
        self.registry.emit_camel_case_names(T::type_key(), emit);
        self
    }

    pub fn exclude_property_names<I, S>(&self, names: I) -> &Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.registry.exclude_property_names(T::type_key(), names);
        self
    }

    #[inline]
    pub fn has_serialize_fn(&self) -> bool {
        self.registry.has_serializer(T::type_key())
    }

    #[inline]
    pub fn has_deserialize_fn(&self) -> bool {
        self.registry.has_deserializer(T::type_key())
    }

    pub fn get_serialize_fn(&self) -> Option<SerializeFn<T>> {
        self.registry.serializer::<T>()
    }

    pub fn get_deserialize_fn(&self) -> Option<DeserializeFn<T>> {
        self.registry.deserializer::<T>()
    }

    pub fn serialize(&self, value: &T) -> Option<String> {
        self.get_serialize_fn().map(|f| (*f)(value))
    }

    pub fn deserialize(&self, text: &str) -> Option<Result<T, Error>> {
        self.registry.parse_override::<T>(text)
    }

    #[inline]
    pub fn is_ref_type(&self) -> bool {
        self.registry.is_ref_type(&TypeIdentity::of::<T>())
    }

    pub fn get_exclude_type_info(&self) -> Option<bool> {
        self.registry
            .get_exclude_type_info(&TypeIdentity::of::<T>())
    }

    pub fn get_emit_camel_case_names(&self) -> Option<bool> {
        self.registry
            .get_emit_camel_case_names(&TypeIdentity::of::<T>())
    }

    pub fn get_excluded_property_names(&self) -> Option<Arc<[String]>> {
        self.registry
            .get_excluded_property_names(&TypeIdentity::of::<T>())
    }

    pub fn view(&self, config: &Config) -> TypeView {
        self.registry.view(&TypeIdentity::of::<T>(), config)
    }
}
