pub mod advice;
pub mod summary;
pub mod transaction;

pub use advice::{AdviceKind, AiProvider};
pub use summary::{CategoryTotal, SpendingProfile, SpendingSummary, SubscriptionTotal};
pub use transaction::{LoadedTable, Transaction};
