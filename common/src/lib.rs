pub mod constants;
pub mod mem;
pub mod misc;
pub mod syscall;
pub mod word;

pub use syscall::Syscall;
pub use word::{Word, WordError};
