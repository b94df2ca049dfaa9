//! Shared CSS selectors used by admin Datastar responses.

pub const PANEL: &str = "[data-role=\"panel\"]";
pub const TOAST_STACK: &str = "[data-admin-toast=\"stack\"]";

pub const CONTENT_EDITOR: &str = "[data-role=\"content-editor\"]";
pub const UNSAVED_FLAG: &str = "[data-role=\"unsaved-flag\"]";
