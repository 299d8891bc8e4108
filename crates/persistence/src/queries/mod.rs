// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only queries.
//!
//! ## Module Organization
//!
//! - `leagues`: League lookup
//! - `events`: Event catalog reads
//! - `cards`: Card and pick reads
//! - `audit`: League activity reads

pub mod audit;
pub mod cards;
pub mod events;
pub mod leagues;
