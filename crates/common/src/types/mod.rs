use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug)]
pub struct Health {
    pub status: &'static str,
}

/// Fixed payload returned by the root route.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Greeting {
    pub message: String,
}

impl Default for Greeting {
    fn default() -> Self {
        Self { message: "What your name ?".to_string() }
    }
}
