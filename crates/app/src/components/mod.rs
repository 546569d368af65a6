pub mod error_panel;
pub mod fallback_notice;
pub mod module_gate;
pub mod require_roles;

pub use error_panel::{AccessDenied, ErrorPanel};
pub use fallback_notice::FallbackNotice;
pub use module_gate::{ModuleGate, OrgModules};
pub use require_roles::RequireRoles;
