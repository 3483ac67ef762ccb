pub mod layout;
pub mod pointer;
pub mod scroll;
pub mod visibility;

pub use layout::wire_layout_handlers;
pub use pointer::wire_click_handler;
pub use scroll::wire_scroll_handler;
pub use visibility::observe_visibility;
