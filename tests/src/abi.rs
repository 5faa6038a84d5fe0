use common::constants::*;
use common::{Syscall, Word};
use mem_lib::packed::{get_high, get_low, put_high, put_low};
use mem_lib::{KernelRegion, UserSegment};

#[test]
fn subfield_constants() {
    assert_eq!(HIGH_MASK, 0o7700);
    assert_eq!(HIGH_SHIFT, 6);
    assert_eq!(LOW_MASK, 0o0077);
    assert_eq!(LOW_SHIFT, 0);

    let w = Word::masked(0o4321);
    assert_eq!(get_high(w) as u16, (w.to_raw() & HIGH_MASK) >> HIGH_SHIFT);
    assert_eq!(get_low(w) as u16, (w.to_raw() & LOW_MASK) >> LOW_SHIFT);
    assert_eq!(put_high(Word::ZERO, 0o77).to_raw(), HIGH_MASK);
    assert_eq!(put_low(Word::ZERO, 0o77).to_raw(), LOW_MASK);
}

#[test]
fn kernel_layout_offsets() {
    assert_eq!(KernelRegion::InterruptTable.base(), 0o6000);
    assert_eq!(KernelRegion::Trampoline.base(), 0o6100);
    assert_eq!(KernelRegion::Text.base(), 0o6200);
    assert_eq!(KernelRegion::Data.base(), 0o7000);
    assert_eq!(KernelRegion::ZeroPage.base(), 0o7600);
}

#[test]
fn user_budgets() {
    assert_eq!(UserSegment::Text.size(), 0o4000);
    assert_eq!(UserSegment::Data.size(), 0o2000);
    assert_eq!(UserSegment::Heap.size(), 0o1000);
    assert_eq!(UserSegment::Stack.size(), 0o1000);
    let total: u32 = UserSegment::ALL.iter().map(|s| s.size() as u32).sum();
    assert_eq!(total, BANK_SIZE as u32);
}

#[test]
fn bank_geometry() {
    assert_eq!(NUM_BANKS, 8);
    assert_eq!(KERNEL_BANK, 7);
    assert_eq!(BANK_SIZE, 4096);
    assert_eq!(ADDR_MASK, 4095);
}

#[test]
fn syscalls() {
    let names: Vec<_> = Syscall::ALL.iter().map(|s| (s.name(), s.number())).collect();
    assert_eq!(
        names,
        [("exit", 0), ("fork", 1), ("read", 2), ("write", 3), ("open", 4), ("close", 5), ("brk", 6)]
    );
}
