// Standalone components
pub mod badge;
pub mod banner;
pub mod button;
pub mod card;
pub mod data_table;
pub mod form;
pub mod form_select;
pub mod input;
pub mod page_header;
pub mod progress_bar;
pub mod search_bar;
pub mod skeleton;
pub mod stat_card;
pub mod tab_bar;

// Overlays; confirm_dialog builds on modal and button
pub mod modal;
pub mod confirm_dialog;
pub mod toast;

// Shell
pub mod sidebar;

pub use badge::*;
pub use banner::*;
pub use button::*;
pub use card::*;
pub use confirm_dialog::*;
pub use data_table::*;
pub use form::*;
pub use form_select::*;
pub use input::*;
pub use modal::*;
pub use page_header::*;
pub use progress_bar::*;
pub use search_bar::*;
pub use sidebar::*;
pub use skeleton::*;
pub use stat_card::*;
pub use tab_bar::*;
pub use toast::*;
