use serde::{Deserialize, Serialize};

pub mod run_auto_cancel_sweep {
    use super::*;

    #[derive(Deserialize, Serialize, Debug)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        /// Number of pending appointments that were cancelled
        pub updated: u64,
    }
}

pub mod run_auto_complete_sweep {
    use super::*;

    #[derive(Deserialize, Serialize, Debug)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        /// Number of confirmed appointments that were completed
        pub updated: u64,
    }
}

pub mod run_reminder_sweep {
    use super::*;

    #[derive(Deserialize, Serialize, Debug)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub sent: usize,
        pub failed: usize,
    }
}
