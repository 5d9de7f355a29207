use std::sync::Arc;

use foodease_core::application::FoodeaseService;

use crate::args::Args;

#[derive(Clone)]
pub struct AppState {
    pub args: Arc<Args>,
    pub service: FoodeaseService,
}

impl AppState {
    pub fn new(args: Arc<Args>, service: FoodeaseService) -> Self {
        Self { args, service }
    }
}
