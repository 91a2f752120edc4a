//! Admin ID Value Object

use kernel::id::Id;

/// Marker for admin identifiers
pub enum AdminMarker {}

/// Store-assigned admin identifier
pub type AdminId = Id<AdminMarker>;
