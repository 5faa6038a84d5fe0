use std::fmt;

use num_derive::{FromPrimitive, ToPrimitive};
use num_traits::{FromPrimitive, ToPrimitive};

/// Kernel/user calling contract. Numbers are stable once assigned; new calls
/// are only ever appended.
#[derive(Debug, Clone, Copy, FromPrimitive, ToPrimitive, PartialEq, Eq, Hash)]
pub enum Syscall {
    Exit = 0,
    Fork = 1,
    Read = 2,
    Write = 3,
    Open = 4,
    Close = 5,
    Brk = 6,
}

impl Syscall {
    pub const ALL: &[Syscall] = &[
        Syscall::Exit,
        Syscall::Fork,
        Syscall::Read,
        Syscall::Write,
        Syscall::Open,
        Syscall::Close,
        Syscall::Brk,
    ];

    pub fn from_number(num: u16) -> Option<Syscall> {
        Syscall::from_u16(num)
    }

    pub fn number(self) -> u16 {
        // Discriminants are all small and non-negative.
        self.to_u16().unwrap_or_default()
    }

    pub fn name(self) -> &'static str {
        use Syscall::*;
        match self {
            Exit => "exit",
            Fork => "fork",
            Read => "read",
            Write => "write",
            Open => "open",
            Close => "close",
            Brk => "brk",
        }
    }
}

impl fmt::Display for Syscall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.name(), self.number())
    }
}
