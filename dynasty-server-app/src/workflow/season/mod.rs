use crate::{
    domain::CoachId,
    workflow::{coach::CoachView, dynasty::DynastyView},
};

pub mod advance;
pub mod rollback;
pub mod toggle;
pub mod update;

/// Result of moving a whole dynasty one year forward or back.
#[derive(Clone, Debug, PartialEq)]
pub struct SeasonTransitionView {
    pub dynasty: DynastyView,
    /// Coaches that were transitioned and saved.
    pub coaches: Vec<CoachView>,
    pub failures: Vec<CoachFailure>,
}

/// A coach the transition could not be applied to. Its stored state is unchanged
/// unless the store itself failed mid-write.
#[derive(Clone, Debug, PartialEq)]
pub struct CoachFailure {
    pub coach_id: CoachId,
    pub message: String,
}
