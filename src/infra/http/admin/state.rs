use std::sync::Arc;

use crate::application::admin::{chrome::AdminChromeService, posts::AdminPostEditService};
use crate::application::render::PreviewRenderer;

#[derive(Clone)]
pub struct AdminState {
    pub chrome: Arc<AdminChromeService>,
    pub posts: Arc<AdminPostEditService>,
    pub preview: Arc<dyn PreviewRenderer>,
}
