// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Fitness program models.
//!
//! A [`Program`] is generated fresh on every request and never persisted;
//! it lives only as long as the modal that displays it.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Profile sent when asking for a program.
///
/// Every field is optional on the wire; missing values fall back to defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(feature = "binding-generation", ts(export, export_to = "bindings/"))]
pub struct UserProfile {
    pub age: u32,
    /// Body weight (kg)
    pub weight: u32,
    /// Height (cm)
    pub height: u32,
    pub goal: String,
    pub experience: String,
}

impl UserProfile {
    /// Profile used by the landing page's "generate program" button.
    pub fn landing_page() -> Self {
        Self {
            age: 30,
            weight: 70,
            height: 175,
            goal: "muscle_gain".to_string(),
            experience: "intermediate".to_string(),
        }
    }
}

/// A generated training and nutrition plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(feature = "binding-generation", ts(export, export_to = "bindings/"))]
pub struct Program {
    /// Generation timestamp in milliseconds, distinguishes successive results
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub id: i64,
    pub name: String,
    pub duration: String,
    /// Ordered training days
    pub workouts: Vec<Workout>,
    pub nutrition: Nutrition,
}

/// One training day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(feature = "binding-generation", ts(export, export_to = "bindings/"))]
pub struct Workout {
    pub day: String,
    pub exercises: Vec<String>,
    pub duration: String,
}

/// Daily nutrition targets. Macros are display strings such as "140g".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(feature = "binding-generation", ts(export, export_to = "bindings/"))]
pub struct Nutrition {
    pub calories: u32,
    pub protein: String,
    pub carbs: String,
    pub fat: String,
}

/// Response body of the program generation endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(feature = "binding-generation", ts(export, export_to = "bindings/"))]
pub struct GenerateProgramResponse {
    pub success: bool,
    pub program: Program,
}
