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

//! Type identities and the option value types.
//!
//! A [`TypeKey`] names either a concrete Rust type or an unparameterized
//! generic definition. Types opt into identification through [`Identify`];
//! `#[derive(Identify)]` from `jsconf-derive` fills it in for user types.

use crate::error::Error;
use num_enum::{IntoPrimitive, TryFromPrimitive};
use std::any::TypeId;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, LinkedList, VecDeque};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;
use std::str::FromStr;
use std::sync::Arc;
use std::time::{Duration, SystemTime};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
enum KeyRepr {
    Type(TypeId),
    Definition(&'static str),
}

/// Identity of a type as seen by the override registry.
///
/// Equality and hashing only consider the underlying identity; the name is
/// kept for diagnostics.
#[derive(Clone, Copy)]
pub struct TypeKey {
    repr: KeyRepr,
    name: &'static str,
}

impl TypeKey {
    /// Key of the concrete type `T`.
    #[inline(always)]
    pub fn of<T: ?Sized + 'static>() -> Self {
        TypeKey {
            repr: KeyRepr::Type(TypeId::of::<T>()),
            name: std::any::type_name::<T>(),
        }
    }

    /// Key of a generic definition, e.g. `"jsconf_core::types::KeyValue"`.
    ///
    /// All instantiations of a generic type report the same definition key
    /// through [`Identify::generic_definition`].
    #[inline(always)]
    pub const fn definition(path: &'static str) -> Self {
        TypeKey {
            repr: KeyRepr::Definition(path),
            name: path,
        }
    }

    #[inline(always)]
    pub fn name(&self) -> &'static str {
        self.name
    }

    #[inline(always)]
    pub fn is_definition(&self) -> bool {
        matches!(self.repr, KeyRepr::Definition(_))
    }
}

impl PartialEq for TypeKey {
    #[inline(always)]
    fn eq(&self, other: &Self) -> bool {
        self.repr == other.repr
    }
}

impl Eq for TypeKey {}

impl Hash for TypeKey {
    #[inline(always)]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.repr.hash(state);
    }
}

impl fmt::Debug for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.repr {
            KeyRepr::Type(_) => write!(f, "TypeKey({})", self.name),
            KeyRepr::Definition(_) => write!(f, "TypeKey({}<..>)", self.name),
        }
    }
}

impl fmt::Display for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Types that can be addressed in the override registry.
///
/// Non-generic types only need an empty impl. Generic types should return
/// their definition key so that one registration covers every instantiation.
///
/// ```rust
/// use jsconf_core::types::{Identify, TypeKey};
///
/// struct Money {
///     amount: u64,
/// }
/// impl Identify for Money {}
///
/// struct Envelope<T>(T);
/// impl<T: 'static> Identify for Envelope<T> {
///     fn generic_definition() -> Option<TypeKey> {
///         Some(TypeKey::definition("app::Envelope"))
///     }
/// }
///
/// assert_eq!(Money::type_key(), TypeKey::of::<Money>());
/// assert_eq!(
///     Envelope::<u8>::generic_definition(),
///     Envelope::<String>::generic_definition()
/// );
/// ```
pub trait Identify: Sized + 'static {
    #[inline(always)]
    fn type_key() -> TypeKey {
        TypeKey::of::<Self>()
    }

    #[inline(always)]
    fn generic_definition() -> Option<TypeKey> {
        None
    }
}

/// A concrete key plus the generic definition it was instantiated from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TypeIdentity {
    key: TypeKey,
    definition: Option<TypeKey>,
}

impl TypeIdentity {
    #[inline(always)]
    pub fn of<T: Identify>() -> Self {
        TypeIdentity {
            key: T::type_key(),
            definition: T::generic_definition(),
        }
    }

    #[inline(always)]
    pub const fn new(key: TypeKey, definition: Option<TypeKey>) -> Self {
        TypeIdentity { key, definition }
    }

    #[inline(always)]
    pub fn key(&self) -> TypeKey {
        self.key
    }

    #[inline(always)]
    pub fn definition(&self) -> Option<TypeKey> {
        self.definition
    }

    /// The keys a lookup should try, most specific first.
    #[inline(always)]
    pub(crate) fn candidates(&self) -> impl Iterator<Item = TypeKey> {
        let key = self.key;
        std::iter::once(key).chain(self.definition.filter(move |def| *def != key))
    }
}

/// The built-in pair-like generic type.
///
/// Its definition is treated as a reference type out of the box, so a
/// missing pair serializes as an explicit null.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct KeyValue<K, V> {
    pub key: K,
    pub value: V,
}

impl<K, V> KeyValue<K, V> {
    pub fn new(key: K, value: V) -> Self {
        KeyValue { key, value }
    }
}

impl<K, V> From<(K, V)> for KeyValue<K, V> {
    fn from((key, value): (K, V)) -> Self {
        KeyValue { key, value }
    }
}

pub const KEY_VALUE_DEFINITION: TypeKey = TypeKey::definition("jsconf_core::types::KeyValue");
pub const TUPLE2_DEFINITION: TypeKey = TypeKey::definition("(,)");

macro_rules! impl_identify {
    ($($ty:ty),* $(,)?) => {
        $(impl Identify for $ty {})*
    };
}

impl_identify! {
    bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64,
    String, (), Duration, SystemTime,
}

macro_rules! impl_identify_generic {
    ($($path:literal => $name:ident < $($param:ident),+ >;)*) => {
        $(
            impl<$($param: 'static),+> Identify for $name<$($param),+> {
                #[inline(always)]
                fn generic_definition() -> Option<TypeKey> {
                    Some(TypeKey::definition($path))
                }
            }
        )*
    };
}

impl_identify_generic! {
    "core::option::Option" => Option<T>;
    "alloc::vec::Vec" => Vec<T>;
    "alloc::collections::VecDeque" => VecDeque<T>;
    "alloc::collections::LinkedList" => LinkedList<T>;
    "alloc::boxed::Box" => Box<T>;
    "alloc::rc::Rc" => Rc<T>;
    "alloc::sync::Arc" => Arc<T>;
    "std::collections::HashMap" => HashMap<K, V>;
    "std::collections::HashSet" => HashSet<T>;
    "alloc::collections::BTreeMap" => BTreeMap<K, V>;
    "alloc::collections::BTreeSet" => BTreeSet<T>;
}

impl<K: 'static, V: 'static> Identify for KeyValue<K, V> {
    #[inline(always)]
    fn generic_definition() -> Option<TypeKey> {
        Some(KEY_VALUE_DEFINITION)
    }
}

impl<A: 'static, B: 'static> Identify for (A, B) {
    #[inline(always)]
    fn generic_definition() -> Option<TypeKey> {
        Some(TUPLE2_DEFINITION)
    }
}

fn normalize_variant(s: &str) -> String {
    s.chars()
        .filter(|c| !matches!(c, '_' | '-' | ' '))
        .flat_map(char::to_lowercase)
        .collect()
}

/// How dates are rendered by the engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, TryFromPrimitive, IntoPrimitive)]
#[repr(u8)]
pub enum DateHandler {
    /// `/Date(1700000000000+0000)/`
    TimestampOffset = 0,
    /// `/Date(1700000000000)/`, the WCF DataContractJsonSerializer layout.
    DcjsCompatible = 1,
    Iso8601 = 2,
}

impl Default for DateHandler {
    fn default() -> Self {
        DateHandler::TimestampOffset
    }
}

impl fmt::Display for DateHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DateHandler::TimestampOffset => "TimestampOffset",
            DateHandler::DcjsCompatible => "DCJSCompatible",
            DateHandler::Iso8601 => "ISO8601",
        })
    }
}

impl FromStr for DateHandler {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_variant(s).as_str() {
            "timestampoffset" => Ok(DateHandler::TimestampOffset),
            "dcjscompatible" => Ok(DateHandler::DcjsCompatible),
            "iso8601" => Ok(DateHandler::Iso8601),
            _ => Err(Error::invalid_data(format!("unknown date handler {s:?}"))),
        }
    }
}

/// How time spans are rendered by the engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, TryFromPrimitive, IntoPrimitive)]
#[repr(u8)]
pub enum TimeSpanHandler {
    /// xsd duration, e.g. `PT15H10M20S`.
    DurationFormat = 0,
    /// `hh:mm:ss` style.
    StandardFormat = 1,
}

impl Default for TimeSpanHandler {
    fn default() -> Self {
        TimeSpanHandler::DurationFormat
    }
}

impl fmt::Display for TimeSpanHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TimeSpanHandler::DurationFormat => "DurationFormat",
            TimeSpanHandler::StandardFormat => "StandardFormat",
        })
    }
}

impl FromStr for TimeSpanHandler {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_variant(s).as_str() {
            "durationformat" => Ok(TimeSpanHandler::DurationFormat),
            "standardformat" => Ok(TimeSpanHandler::StandardFormat),
            _ => Err(Error::invalid_data(format!("unknown time span handler {s:?}"))),
        }
    }
}
