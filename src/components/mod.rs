//! UI Components
//!
//! Reusable Leptos components.

mod delete_icon;
mod new_thing_form;
mod notice_tray;
mod thing_list;
mod thing_row;

pub use delete_icon::DeleteIcon;
pub use new_thing_form::NewThingForm;
pub use notice_tray::NoticeTray;
pub use thing_list::ThingList;
pub use thing_row::ThingRow;
