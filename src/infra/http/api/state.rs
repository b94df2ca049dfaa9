use std::sync::Arc;

use crate::application::admin::posts::AdminPostEditService;

#[derive(Clone)]
pub struct ApiState {
    pub posts: Arc<AdminPostEditService>,
}
