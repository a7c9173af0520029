pub mod analyze;
pub mod dedupe;
pub mod export;
pub mod init;
pub mod score;
pub mod validate;
