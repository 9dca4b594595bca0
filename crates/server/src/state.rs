use std::sync::Arc;

use service::students::StudentStore;

/// Shared handler state; the directory lives exactly as long as the router using it.
#[derive(Clone)]
pub struct ServerState {
    pub students: Arc<dyn StudentStore>,
}

impl ServerState {
    pub fn new(students: Arc<dyn StudentStore>) -> Self {
        Self { students }
    }
}
