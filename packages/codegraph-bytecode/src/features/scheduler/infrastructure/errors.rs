//! Scheduling errors
//!
//! All fatal: `ExecutionPlanBuilder::build` never returns a partial plan.

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum OrderingConstraintError {
    #[error("constraint '{constraint}' of plugin '{plugin}' selects no registered detector")]
    EmptySelector { plugin: String, constraint: String },

    #[error("plugin '{plugin}' is registered more than once")]
    DuplicatePlugin { plugin: String },

    #[error("detector '{id}' is declared by both '{first_plugin}' and '{second_plugin}'")]
    DuplicateDetector {
        id: String,
        first_plugin: String,
        second_plugin: String,
    },

    #[error("inter-pass constraints form a cycle among {detectors:?}")]
    InterPassCycle { detectors: Vec<String> },

    #[error("intra-pass constraints of pass {pass} form a cycle among {detectors:?}")]
    IntraPassCycle { pass: usize, detectors: Vec<String> },
}

impl OrderingConstraintError {
    /// Detectors named by a cycle error
    pub fn cycle_members(&self) -> Option<&[String]> {
        match self {
            Self::InterPassCycle { detectors } | Self::IntraPassCycle { detectors, .. } => {
                Some(detectors)
            }
            _ => None,
        }
    }
}
