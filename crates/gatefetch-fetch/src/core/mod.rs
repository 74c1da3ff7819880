//! Pure transformations for fetching.
//!
//! Block-size adaptation, progress estimates, retry timing, status and header
//! checks, and the integrity verdict. Nothing in here touches the network or
//! the filesystem.

mod block;
mod estimate;
mod integrity;
mod retry;
mod validation;

pub use block::{DEFAULT_BLOCK_SIZE, MAX_BLOCK_SIZE, best_block_size};
pub use estimate::{FINISHED_ETA, UNKNOWN_ETA, UNKNOWN_PERCENT, eta, percent_complete};
pub use integrity::{Verdict, evaluate};
pub use retry::{is_retryable_status, retry_delay};
pub use validation::{content_type_matches, is_ok_status, is_success_status, media_type, parse_content_length};
