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

//! Ahead-of-time warm-up of the engine's generic entry points.
//!
//! Rust monomorphizes generics at build time, so none of this is needed for
//! correctness: calling a generic engine method from here merely guarantees
//! that the instantiation exists in the binary. The registrar is kept as an
//! explicitly invoked utility that exercises every code path a type could
//! need, with empty inputs. Failures and panics of those calls are swallowed
//! here and nowhere else.

use crate::engine::TextEngine;
use crate::error::Error;
use crate::types::Identify;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::time::{Duration, SystemTime};

fn panic_error(payload: Box<dyn Any + Send>) -> Error {
    match payload.downcast::<String>() {
        Ok(message) => Error::unknown(*message),
        Err(payload) => match payload.downcast::<&'static str>() {
            Ok(message) => Error::unknown(*message),
            Err(_) => Error::unknown("non-string panic payload"),
        },
    }
}

/// Canonical placeholder type registered against every primitive.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Placeholder {
    pub dummy: Option<String>,
}

impl Identify for Placeholder {}

/// Drives every generic entry point of `E` for the types it is asked about.
///
/// Registration holds no state and writes no configuration, so registering
/// a type twice is indistinguishable from registering it once.
///
/// ```rust
/// use jsconf_core::aot::AotRegistrar;
/// use jsconf_core::engine::NoopEngine;
///
/// let engine = NoopEngine;
/// let registrar = AotRegistrar::new(&engine);
/// assert!(registrar.register_for_aot());
/// assert!(registrar.register_type::<Vec<String>>());
/// ```
#[derive(Debug)]
pub struct AotRegistrar<'e, E> {
    engine: &'e E,
}

impl<'e, E: TextEngine> AotRegistrar<'e, E> {
    pub fn new(engine: &'e E) -> Self {
        AotRegistrar { engine }
    }

    /// Marker entry point; calling it keeps the registrar linked in.
    #[inline(never)]
    pub fn init_for_aot() {}

    fn force<R>(
        &self,
        path: &'static str,
        type_name: &'static str,
        call: impl FnOnce() -> Result<R, Error>,
    ) -> bool {
        match panic::catch_unwind(AssertUnwindSafe(call)) {
            Ok(Ok(_)) => true,
            Ok(Err(err)) => {
                log::debug!("warm-up of `{}` for {} failed: {}", path, type_name, err);
                false
            }
            Err(payload) => {
                let err = panic_error(payload);
                log::debug!("warm-up of `{}` for {} panicked: {}", path, type_name, err);
                false
            }
        }
    }

    /// Exercises every single-type code path for `T`.
    ///
    /// Returns `true` when every forced call completed without error.
    #[inline(never)]
    pub fn register_type<T: Identify>(&self) -> bool {
        let name = std::any::type_name::<T>();
        let engine = self.engine;
        let mut ok = true;
        ok &= self.force("parse", name, || engine.parse::<T>(None));
        ok &= self.force("write", name, || engine.write::<T>(&mut String::new(), None));
        ok &= self.force("parse_array", name, || engine.parse_array::<T>(None));
        ok &= self.force("parse_list", name, || engine.parse_list::<T>(None));
        ok &= self.force("parse_collection", name, || engine.parse_collection::<T>(None));
        ok &= self.force("parse_queue", name, || engine.parse_queue::<T>(None));
        ok &= self.force("parse_stack", name, || engine.parse_stack::<T>(None));
        ok &= self.force("write_list", name, || engine.write_list::<T>(&mut String::new(), None));
        ok &= self.force("write_enumerable", name, || {
            engine.write_enumerable::<T>(&mut String::new(), None)
        });
        ok &= self.force("write_query_string", name, || {
            engine.write_query_string::<T>(&mut String::new(), None)
        });
        ok &= self.force("write_csv", name, || engine.write_csv::<T>(&mut String::new(), None));
        ok &= self.force("write_csv_row", name, || {
            engine.write_csv_row::<T>(&mut String::new(), None)
        });
        ok
    }

    /// Exercises the plain parse and write paths of an element type.
    #[inline(never)]
    pub fn register_builtin<T: Identify>(&self) -> bool {
        let name = std::any::type_name::<T>();
        let engine = self.engine;
        let mut ok = true;
        ok &= self.force("parse", name, || engine.parse::<T>(None));
        ok &= self.force("write", name, || engine.write::<T>(&mut String::new(), None));
        ok
    }

    /// Exercises the paths parameterized jointly by a container type `C` and
    /// an element type `V`: maps keyed either way, plus the array and list
    /// paths of `V`.
    #[inline(never)]
    pub fn register_element<C: Identify, V: Identify>(&self) -> bool {
        let name = std::any::type_name::<V>();
        let engine = self.engine;
        let mut ok = self.register_builtin::<V>();
        ok &= self.force("parse_map", name, || engine.parse_map::<C, V>(None));
        ok &= self.force("parse_map", name, || engine.parse_map::<V, C>(None));
        ok &= self.force("write_map", name, || engine.write_map::<C, V>(&mut String::new(), None));
        ok &= self.force("write_map", name, || engine.write_map::<V, C>(&mut String::new(), None));
        ok &= self.force("parse_array", name, || engine.parse_array::<V>(None));
        ok &= self.force("parse_list", name, || engine.parse_list::<V>(None));
        ok
    }

    #[inline(never)]
    pub fn register_query_string_writer(&self) -> bool {
        let engine = self.engine;
        self.force("write_query_string", "Placeholder", || {
            engine.write_query_string::<Placeholder>(&mut String::new(), None)
        })
    }

    #[inline(never)]
    pub fn register_csv_serializer(&self) -> bool {
        let engine = self.engine;
        let mut ok = true;
        ok &= self.force("write_csv", "Placeholder", || {
            engine.write_csv::<Placeholder>(&mut String::new(), None)
        });
        ok &= self.force("write_csv_row", "Placeholder", || {
            engine.write_csv_row::<Placeholder>(&mut String::new(), None)
        });
        ok
    }

    /// Registers [`Placeholder`] against every primitive, `String`, the
    /// date and time span types, and their `Option` forms.
    #[inline(never)]
    pub fn register_for_aot(&self) -> bool {
        macro_rules! register_elements {
            ($($ty:ty),* $(,)?) => {{
                let mut ok = true;
                $(
                    ok &= self.register_element::<Placeholder, $ty>();
                    ok &= self.register_element::<Placeholder, Option<$ty>>();
                )*
                ok
            }};
        }

        let mut ok = self.register_type::<Placeholder>();
        ok &= self.register_element::<Placeholder, String>();
        ok &= register_elements! {
            bool, char, u8, i8, i16, u16, i32, u32, i64, u64, i128, u128, isize, usize, f32, f64,
            Duration, SystemTime,
        };
        ok &= self.register_query_string_writer();
        ok &= self.register_csv_serializer();
        ok
    }
}
