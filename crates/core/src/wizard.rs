//! Registration wizard step gating.
//!
//! The registration flow is presented to artists as a six-step wizard. Which
//! step may be opened is derived entirely from the artist's submission data
//! for one exhibition year: a handful of sequential boolean checks over
//! [`SubmissionFacts`]. Nothing about the wizard itself is persisted -- the
//! API recomputes the facts on every request and evaluates them here.

use serde::Serialize;

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Steps
// ---------------------------------------------------------------------------

/// The six steps of the registration wizard, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    Profile,
    Registration,
    Entries,
    Images,
    Summary,
    Payment,
}

/// Total number of steps in the wizard.
pub const TOTAL_STEPS: u8 = 6;

/// Minimum step number (1-based).
pub const MIN_STEP: u8 = 1;

/// Maximum step number (1-based).
pub const MAX_STEP: u8 = 6;

/// All steps in wizard order.
pub const ALL_STEPS: [WizardStep; TOTAL_STEPS as usize] = [
    WizardStep::Profile,
    WizardStep::Registration,
    WizardStep::Entries,
    WizardStep::Images,
    WizardStep::Summary,
    WizardStep::Payment,
];

impl WizardStep {
    /// Convert a 1-based step number to a `WizardStep`.
    pub fn from_number(n: u8) -> Result<Self, CoreError> {
        match n {
            1 => Ok(Self::Profile),
            2 => Ok(Self::Registration),
            3 => Ok(Self::Entries),
            4 => Ok(Self::Images),
            5 => Ok(Self::Summary),
            6 => Ok(Self::Payment),
            _ => Err(CoreError::Validation(format!(
                "Invalid step number {n}. Must be between {MIN_STEP} and {MAX_STEP}"
            ))),
        }
    }

    /// Convert to a 1-based step number.
    pub fn to_number(self) -> u8 {
        match self {
            Self::Profile => 1,
            Self::Registration => 2,
            Self::Entries => 3,
            Self::Images => 4,
            Self::Summary => 5,
            Self::Payment => 6,
        }
    }

    /// Human-readable label for the step.
    pub fn label(self) -> &'static str {
        match self {
            Self::Profile => "Profile",
            Self::Registration => "Registration",
            Self::Entries => "Entries",
            Self::Images => "Images",
            Self::Summary => "Summary",
            Self::Payment => "Payment",
        }
    }
}

// ---------------------------------------------------------------------------
// Derived facts
// ---------------------------------------------------------------------------

/// Booleans derived from an artist's submission data for one exhibition year.
///
/// Assembled by a single aggregate query in the repository layer; the wizard
/// logic only ever sees these flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SubmissionFacts {
    /// The contact fields of the artist profile are filled in.
    pub profile_complete: bool,
    /// A registration row exists for the year.
    pub registration_exists: bool,
    /// The registration has at least one entry.
    pub has_entries: bool,
    /// Every entry of the registration has a primary image.
    pub all_entries_have_primary_image: bool,
    /// The registration has been submitted.
    pub submitted: bool,
    /// A settled payment exists for the registration.
    pub paid: bool,
}

/// Whether a single step is satisfied by the given facts.
fn step_complete(step: WizardStep, facts: &SubmissionFacts) -> bool {
    match step {
        WizardStep::Profile => facts.profile_complete,
        WizardStep::Registration => facts.registration_exists,
        WizardStep::Entries => facts.has_entries,
        // An empty registration has no images to flag, so the images step
        // only counts as complete once there is something to cover.
        WizardStep::Images => facts.has_entries && facts.all_entries_have_primary_image,
        WizardStep::Summary => facts.submitted,
        WizardStep::Payment => facts.paid,
    }
}

/// Whether a step may be opened: every step before it must be complete.
fn step_reachable(step: WizardStep, facts: &SubmissionFacts) -> bool {
    ALL_STEPS
        .iter()
        .take_while(|s| **s != step)
        .all(|s| step_complete(*s, facts))
}

// ---------------------------------------------------------------------------
// Evaluation
// ---------------------------------------------------------------------------

/// Gate evaluation for a single step.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct StepAccess {
    pub step: WizardStep,
    pub number: u8,
    pub label: &'static str,
    pub reachable: bool,
    pub complete: bool,
}

/// The full derived wizard state returned to the client.
#[derive(Debug, Clone, Serialize)]
pub struct WizardState {
    pub steps: Vec<StepAccess>,
    /// The first incomplete reachable step; [`MAX_STEP`] once everything is
    /// done.
    pub current_step: u8,
}

/// Evaluate all step gates for the given facts.
pub fn evaluate(facts: &SubmissionFacts) -> WizardState {
    let steps: Vec<StepAccess> = ALL_STEPS
        .iter()
        .map(|step| StepAccess {
            step: *step,
            number: step.to_number(),
            label: step.label(),
            reachable: step_reachable(*step, facts),
            complete: step_complete(*step, facts),
        })
        .collect();

    let current_step = steps
        .iter()
        .find(|s| s.reachable && !s.complete)
        .map(|s| s.number)
        .unwrap_or(MAX_STEP);

    WizardState {
        steps,
        current_step,
    }
}

/// Check that a step number names a step the facts allow opening.
///
/// Used by handlers that take an explicit `step` parameter.
pub fn validate_step_access(step: u8, facts: &SubmissionFacts) -> Result<WizardStep, CoreError> {
    let step = WizardStep::from_number(step)?;
    if !step_reachable(step, facts) {
        return Err(CoreError::Forbidden(format!(
            "Step {} ({}) is not reachable yet",
            step.to_number(),
            step.label()
        )));
    }
    Ok(step)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
