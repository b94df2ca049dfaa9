mod errors;
mod forms;
mod handlers;
mod panel;

pub(super) use handlers::{
    admin_post_edit, admin_post_edit_change, admin_post_edit_panel, admin_post_edit_tab,
    admin_post_update,
};
