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

//! # jsconf core
//!
//! Configuration resolution and per-type customization for reflection-driven
//! text serializers (JSON, JSV, CSV). The serializer engine reads option
//! values and type overrides from here; this crate never parses or emits
//! text itself.
//!
//! ## Architecture
//!
//! - **`option_cell`**: [`OptionCell`], a value resolved as thread override,
//!   then sticky global value, then hardcoded default
//! - **`config`**: [`GlobalConfigStore`] holding one cell per option, the
//!   resolved [`Config`] snapshot and the per-call [`ConfigOverlay`]
//! - **`resolver`**: [`TypeOverrideRegistry`], custom serializers and
//!   per-type flags keyed by type identity
//! - **`aot`**: [`AotRegistrar`], optional warm-up of the engine's generic
//!   entry points
//! - **`engine`**: the [`TextEngine`] entry points consumed from the engine
//! - **`types`**: type identities, [`KeyValue`] and the option enums
//! - **`global`**: the process-wide store and registry, and [`reset`]
//!
//! ## Option resolution
//!
//! ```rust
//! use jsconf_core::{config, reset};
//!
//! reset();
//! config().emit_camel_case_names().set(true);
//! std::thread::spawn(|| {
//!     // the first write became everyone's default
//!     assert!(config().emit_camel_case_names().get());
//!     config().emit_camel_case_names().set(false);
//!     assert!(!config().emit_camel_case_names().get());
//! })
//! .join()
//! .unwrap();
//! assert!(config().emit_camel_case_names().get());
//! reset();
//! ```
//!
//! ## Type overrides
//!
//! ```rust
//! use jsconf_core::types::{Identify, TypeIdentity, TypeKey};
//! use jsconf_core::{config, types};
//!
//! struct Money {
//!     amount: u64,
//! }
//! impl Identify for Money {}
//!
//! types().of::<Money>().serialize_fn(|m: &Money| format!("${}", m.amount));
//! assert!(types().has_serializer(TypeKey::of::<Money>()));
//! let view = types().view(&TypeIdentity::of::<Money>(), &config().resolve());
//! assert!(view.has_serializer());
//! # types().of::<Money>().clear_serialize_fn();
//! ```

pub mod aot;
pub mod config;
pub mod engine;
pub mod error;
pub mod global;
pub mod option_cell;
pub mod resolver;
pub mod types;
pub mod util;

pub use crate::aot::{AotRegistrar, Placeholder};
pub use crate::config::{Config, ConfigOverlay, GlobalConfigStore};
pub use crate::engine::{NoopEngine, TextEngine};
pub use crate::error::Error;
pub use crate::global::{config, reset, types};
pub use crate::option_cell::OptionCell;
pub use crate::resolver::{
    DeserializeFn, SerializeFn, TypeConfig, TypeOverride, TypeOverrideRegistry, TypeView,
};
pub use crate::types::{
    DateHandler, Identify, KeyValue, TimeSpanHandler, TypeIdentity, TypeKey, KEY_VALUE_DEFINITION,
};
