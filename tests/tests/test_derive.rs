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

use jsconf::resolver::TypeOverrideRegistry;
use jsconf::{Identify, TypeIdentity, TypeKey};
use std::marker::PhantomData;

#[derive(Identify)]
struct Plain {
    _id: u32,
}

#[derive(Identify)]
struct Envelope<T> {
    _body: T,
}

#[derive(Identify)]
#[jsconf(definition = "billing::Ledger")]
struct Ledger<K, V> {
    _marker: PhantomData<(K, V)>,
}

#[derive(Identify)]
#[jsconf(definition = "billing::Status")]
enum Status {
    _Open,
    _Closed,
}

#[test]
fn test_non_generic_has_no_definition() {
    assert_eq!(Plain::type_key(), TypeKey::of::<Plain>());
    assert!(Plain::generic_definition().is_none());
    assert_eq!(TypeIdentity::of::<Plain>().definition(), None);
}

#[test]
fn test_generic_definition_is_shared() {
    let expected = TypeKey::definition("test_derive::Envelope");
    assert_eq!(Envelope::<i32>::generic_definition(), Some(expected));
    assert_eq!(Envelope::<String>::generic_definition(), Some(expected));
    assert_ne!(Envelope::<i32>::type_key(), Envelope::<String>::type_key());
}

#[test]
fn test_explicit_definition() {
    assert_eq!(
        Ledger::<String, u64>::generic_definition(),
        Some(TypeKey::definition("billing::Ledger"))
    );
    assert_eq!(
        Status::generic_definition(),
        Some(TypeKey::definition("billing::Status"))
    );
}

#[test]
fn test_derived_definition_drives_flag_fallback() {
    let registry = TypeOverrideRegistry::new();
    registry.exclude_type_info(TypeKey::definition("test_derive::Envelope"), true);
    registry.treat_as_ref_type(TypeKey::definition("billing::Ledger"), true);

    let flat = registry.of::<Envelope<u8>>();
    assert_eq!(flat.get_exclude_type_info(), Some(true));
    let nested = registry.of::<Envelope<Vec<String>>>();
    assert_eq!(nested.get_exclude_type_info(), Some(true));
    assert!(registry.of::<Ledger<String, i32>>().is_ref_type());
    assert!(!registry.of::<Plain>().is_ref_type());
}
