// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors reported by option validation and transition guards.

use crate::options::OptionKey;
use crate::types::Side;

/// Failure of a configuration write or a requested transition.
///
/// None of these are fatal. Every operation that returns one leaves the
/// controller exactly as it was before the call.
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RevealError {
    /// A supplied option value does not have the type the option expects.
    #[error("option `{key}` expects {expected}")]
    InvalidOptionKind {
        /// Option that rejected the value.
        key: OptionKey,
        /// Human readable description of the accepted values.
        expected: &'static str,
    },
    /// The requested side panel was not supplied at construction.
    #[error("no {0} panel is configured")]
    NoSuchPanel(Side),
    /// Presentation mode is not available for the requested side, or the
    /// controller is not focused on that side.
    #[error("presentation mode is unavailable for the {0} panel")]
    PresentationModeUnavailable(Side),
}
