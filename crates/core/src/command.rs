// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use betbuddies_domain::{PickKey, PickSelection};

/// A command represents member intent against the selection buffer as data only.
///
/// Commands are the only way to change an edit session.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Place a pick, replacing any pick on the same event and bet type.
    SelectPick {
        /// The candidate pick.
        pick: PickSelection,
    },
    /// Place a pick, or remove it if the identical pick is already held.
    TogglePick {
        /// The candidate pick.
        pick: PickSelection,
    },
    /// Remove the pick at a key, if any.
    RemovePick {
        /// The key to clear.
        key: PickKey,
    },
}
