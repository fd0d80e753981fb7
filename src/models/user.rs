//! User model, persisted client-side as JSON.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// The signed-in user, created on successful authentication.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(feature = "binding-generation", ts(export, export_to = "bindings/"))]
pub struct User {
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub id: u64,
    pub email: String,
    /// Display name
    pub name: String,
    /// Subscription tier (e.g. "trial")
    pub subscription: String,
    /// Days left in the free trial
    pub trial_days: u32,
}
