// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Write-side mutations.
//!
//! ## Module Organization
//!
//! - `leagues`: League creation
//! - `events`: Event feed upserts
//! - `submission`: The card submission transaction
//! - `audit`: Activity record persistence

pub mod audit;
pub mod events;
pub mod leagues;
pub mod submission;
