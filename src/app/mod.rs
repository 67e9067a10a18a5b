// Application layer - Use case interactors

pub mod container;
pub mod thin_interactor;

// Re-export interactors
pub use thin_interactor::{FileOutcome, ThinInteractor};
