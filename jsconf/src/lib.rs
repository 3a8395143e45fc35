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

//! # jsconf
//!
//! Process-wide configuration and per-type customization for reflection-driven
//! text serializers. An engine producing JSON, JSV or CSV consults this crate
//! for every option it honours and for any custom serializer, deserializer or
//! naming rule a user registered for a type.
//!
//! ## Options
//!
//! Every option resolves in three tiers: a value set on the current thread,
//! the first value set globally, and a hardcoded default. The first `set`
//! from any thread becomes the global value; later writes only affect the
//! writing thread.
//!
//! ```rust
//! use jsconf::{config, reset, DateHandler};
//!
//! reset();
//! assert_eq!(config().date_handler().get(), DateHandler::TimestampOffset);
//! config().date_handler().set(DateHandler::Iso8601);
//! let resolved = config().resolve();
//! assert_eq!(resolved.get_date_handler(), DateHandler::Iso8601);
//! reset();
//! ```
//!
//! ## Type overrides
//!
//! Custom functions are registered for a concrete type, while flags set on a
//! generic definition apply to every instantiation.
//!
//! ```rust
//! use jsconf::{types, Identify, TypeIdentity};
//!
//! struct Money {
//!     amount: u64,
//! }
//! impl Identify for Money {}
//!
//! types()
//!     .of::<Money>()
//!     .serialize_fn(|m: &Money| format!("${}", m.amount))
//!     .deserialize_fn(|s: &str| {
//!         s.trim_start_matches('$')
//!             .parse()
//!             .map(|amount| Money { amount })
//!             .map_err(|e| jsconf::Error::invalid_data(format!("{e}")))
//!     });
//!
//! assert_eq!(types().of::<Money>().serialize(&Money { amount: 5 }).as_deref(), Some("$5"));
//! assert!(types().is_ref_type(&TypeIdentity::of::<jsconf::KeyValue<String, i32>>()));
//! # types().of::<Money>().clear_serialize_fn().clear_deserialize_fn();
//! ```
//!
//! ## Deriving identities
//!
//! `#[derive(Identify)]` gives generic types a shared definition key, so a
//! flag set once covers `Wrapper<i32>`, `Wrapper<String>` and the rest. The
//! generated impl names `jsconf_core`, which must be a dependency of the
//! deriving crate.

pub use jsconf_core::{aot, config, engine, error, global, option_cell, resolver, types, util};
pub use jsconf_core::{
    reset, AotRegistrar, Config, ConfigOverlay, DateHandler, DeserializeFn, Error,
    GlobalConfigStore, Identify, KeyValue, NoopEngine, OptionCell, Placeholder, SerializeFn,
    TextEngine, TimeSpanHandler, TypeConfig, TypeIdentity, TypeKey, TypeOverride,
    TypeOverrideRegistry, TypeView, KEY_VALUE_DEFINITION,
};
pub use jsconf_derive::Identify;
