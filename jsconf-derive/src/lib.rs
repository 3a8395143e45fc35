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

//! Derive macros for `jsconf-core`.
//!
//! `#[derive(Identify)]` implements `jsconf_core::types::Identify`. Generic
//! types report a definition key shared by all their instantiations, named
//! after the type's module path unless `#[jsconf(definition = "...")]`
//! overrides it. Generated code refers to `jsconf_core`, so the crate using
//! the derive must depend on it.
//!
//! ```rust,ignore
//! use jsconf_derive::Identify;
//!
//! #[derive(Identify)]
//! struct Money {
//!     amount: u64,
//! }
//!
//! #[derive(Identify)]
//! #[jsconf(definition = "billing::Ledger")]
//! struct Ledger<T> {
//!     entries: Vec<T>,
//! }
//! ```

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

mod identify;

#[proc_macro_derive(Identify, attributes(jsconf))]
pub fn proc_macro_derive_identify(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    identify::derive_identify(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
