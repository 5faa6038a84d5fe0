//! Fixed layouts: the kernel's regions in bank 7 and the segments of a user
//! bank. Both are link-time contracts and never move at run time.

use crate::bank::Address;

use common::constants::*;

use std::ops::Range;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KernelRegion {
    InterruptTable,
    Trampoline,
    Text,
    Data,
    ZeroPage,
}

impl KernelRegion {
    // In address order.
    pub const ALL: &[KernelRegion] = &[
        KernelRegion::InterruptTable,
        KernelRegion::Trampoline,
        KernelRegion::Text,
        KernelRegion::Data,
        KernelRegion::ZeroPage,
    ];

    pub fn range(self) -> Range<u16> {
        use KernelRegion::*;
        match self {
            InterruptTable => KERN_INTERRUPT_TABLE_BASE..KERN_BANK_SWITCH_THUNKS,
            Trampoline => KERN_BANK_SWITCH_THUNKS..KERN_TEXT_BASE,
            Text => KERN_TEXT_BASE..KERN_DATA_BASE,
            Data => KERN_DATA_BASE..KERN_ZP_WORK_AREA,
            ZeroPage => KERN_ZP_WORK_AREA..KERN_END,
        }
    }

    pub fn base(self) -> u16 {
        self.range().start
    }

    pub fn containing(offset: u16) -> Option<KernelRegion> {
        Self::ALL.iter().copied().find(|r| r.range().contains(&offset))
    }

    pub fn name(self) -> &'static str {
        use KernelRegion::*;
        match self {
            InterruptTable => "interrupt table",
            Trampoline => "trampoline",
            Text => "kernel text",
            Data => "kernel data",
            ZeroPage => "kernel zero page",
        }
    }
}

/// True for addresses in bank 7 that belong to one of the kernel's regions.
/// User code must not touch these directly.
pub fn in_kernel_range(addr: Address) -> bool {
    addr.in_kernel_range()
}

////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UserSegment {
    Text,
    Data,
    Heap,
    Stack,
}

impl UserSegment {
    pub const ALL: &[UserSegment] = &[UserSegment::Text, UserSegment::Data, UserSegment::Heap, UserSegment::Stack];

    pub fn base(self) -> u16 {
        use UserSegment::*;
        match self {
            Text => USER_TEXT_BASE,
            Data => USER_DATA_BASE,
            Heap => USER_HEAP_BASE,
            Stack => USER_STACK_BASE,
        }
    }

    // Budget, in words.
    pub fn size(self) -> u16 {
        use UserSegment::*;
        match self {
            Text => USER_TEXT_SIZE,
            Data => USER_DATA_SIZE,
            Heap => USER_HEAP_SIZE,
            Stack => USER_STACK_SIZE,
        }
    }

    // The last segment ends at the top of the bank, so compute in u32.
    pub fn range(self) -> Range<u32> {
        let base = self.base() as u32;
        base..base + self.size() as u32
    }

    pub fn containing(offset: u16) -> Option<UserSegment> {
        Self::ALL.iter().copied().find(|s| s.range().contains(&(offset as u32)))
    }

    pub fn name(self) -> &'static str {
        use UserSegment::*;
        match self {
            Text => "text",
            Data => "data",
            Heap => "heap",
            Stack => "stack",
        }
    }
}
