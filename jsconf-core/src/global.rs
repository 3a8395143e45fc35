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

//! Process-wide configuration and override state.

use crate::config::GlobalConfigStore;
use crate::resolver::TypeOverrideRegistry;
use once_cell::sync::Lazy;

static CONFIG: Lazy<GlobalConfigStore> = Lazy::new(GlobalConfigStore::new);
static TYPES: Lazy<TypeOverrideRegistry> = Lazy::new(TypeOverrideRegistry::new);

/// The process-wide option store.
#[inline]
pub fn config() -> &'static GlobalConfigStore {
    &CONFIG
}

/// The process-wide type override registry.
#[inline]
pub fn types() -> &'static TypeOverrideRegistry {
    &TYPES
}

/// Restores every option and override to its just-initialized state.
///
/// Intended for test isolation and reconfiguration at start-up; must not be
/// called while serialization is running on other threads.
pub fn reset() {
    CONFIG.reset();
    TYPES.reset();
}
