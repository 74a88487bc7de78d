pub mod constants;
pub mod error;
pub mod io;
pub mod memory;
pub mod replacement;
pub mod tlb;
pub mod translation;
pub mod vm_manager;

// Re-export commonly used items for convenience
pub use constants::*;
pub use error::{Result, VmError};
pub use replacement::PolicyKind;
pub use translation::{TlbOutcome, TranslationResult, VirtualAddress};
pub use vm_manager::{EngineConfig, Stats, TranslationEngine};
