use crate::error::MemError;
use crate::layout::KernelRegion;
use crate::store::WordStore;

use common::constants::{ADDR_MASK, BANK_SIZE, KERNEL_BANK, NUM_BANKS, USER_BANK_END, USER_BANK_START};
use common::Word;

use std::fmt;

use derive_more::{Display, IsVariant};
use log::trace;

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Bank(u8);

impl Bank {
    pub const KERNEL: Bank = Bank(KERNEL_BANK);

    pub fn new(num: u8) -> Result<Bank, MemError> {
        if num >= NUM_BANKS {
            return Err(MemError::InvalidBank(num as u16));
        }
        Ok(Bank(num))
    }

    pub fn to_raw(self) -> u8 {
        self.0
    }

    pub fn is_kernel(self) -> bool {
        self == Bank::KERNEL
    }

    pub fn is_user(self) -> bool {
        (USER_BANK_START..=USER_BANK_END).contains(&self.0)
    }

    pub fn users() -> impl Iterator<Item = Bank> {
        (USER_BANK_START..=USER_BANK_END).map(Bank)
    }
}

////////////////////////////////////////////////////////////////////////////////

/// A bank and an offset within it. Offset arithmetic wraps inside the bank and
/// never carries into the bank number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Address {
    bank: Bank,
    offset: u16,
}

impl Address {
    pub fn new(bank: Bank, offset: u16) -> Result<Address, MemError> {
        if offset & !ADDR_MASK != 0 {
            return Err(MemError::InvalidOffset(offset as u32));
        }
        Ok(Address { bank, offset })
    }

    pub fn bank(self) -> Bank {
        self.bank
    }

    pub fn offset(self) -> u16 {
        self.offset
    }

    pub fn wrapping_add(self, words: u16) -> Address {
        let offset = Word::masked(self.offset).wrapping_add(Word::masked(words));
        Address { bank: self.bank, offset: offset.to_raw() }
    }

    pub fn in_kernel_range(self) -> bool {
        self.bank.is_kernel() && KernelRegion::containing(self.offset).is_some()
    }

    fn phys_index(self) -> usize {
        (self.bank.0 as usize) * (BANK_SIZE as usize) + (self.offset as usize)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{:04o}", self.bank, self.offset)
    }
}

/// A validated storage location, obtained from `resolve`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell(Address);

impl Cell {
    pub fn address(self) -> Address {
        self.0
    }
}

pub fn resolve(bank: u8, offset: u16) -> Result<Cell, MemError> {
    let bank = Bank::new(bank)?;
    Ok(Cell(Address::new(bank, offset)?))
}

////////////////////////////////////////////////////////////////////////////////

/// Proof that the holder runs in kernel context. Not `Clone`: a holder can
/// lend it out but not duplicate it.
#[derive(Debug)]
pub struct KernelCap(());

impl KernelCap {
    /// The only way to mint a capability. Only the privilege-separation layer
    /// may call this, once per kernel-context entry; user-bank code must never
    /// be handed the result. Nothing here enforces that.
    pub fn assume_kernel() -> KernelCap {
        KernelCap(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, IsVariant)]
pub enum Mapping {
    User(Bank),
    Kernel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SavedBank(Bank);

// The bank register, passed explicitly to anything that depends on it.
#[derive(Debug)]
pub struct BankContext {
    mapped: Bank,
    interrupts_masked: bool,
}

impl BankContext {
    // Execution starts in the kernel bank.
    pub fn new() -> BankContext {
        BankContext { mapped: Bank::KERNEL, interrupts_masked: false }
    }

    pub fn mapped(&self) -> Bank {
        self.mapped
    }

    pub fn mapping(&self) -> Mapping {
        if self.mapped.is_kernel() {
            Mapping::Kernel
        } else {
            Mapping::User(self.mapped)
        }
    }

    pub fn interrupts_masked(&self) -> bool {
        self.interrupts_masked
    }

    pub fn select_bank(&mut self, _cap: &KernelCap, bank: Bank) {
        trace!("Bank: mapping {} -> {}", self.mapped, bank);
        self.mapped = bank;
    }

    pub fn save(&self) -> SavedBank {
        SavedBank(self.mapped)
    }

    pub fn restore(&mut self, cap: &KernelCap, saved: SavedBank) {
        self.select_bank(cap, saved.0);
    }

    /// Runs `f` with interrupts masked. Whatever bank `f` leaves mapped, the
    /// one mapped on entry is mapped again on return.
    pub fn critical<R>(&mut self, cap: &KernelCap, f: impl FnOnce(&mut BankContext) -> R) -> R {
        let saved = self.save();
        let was_masked = self.interrupts_masked;
        self.interrupts_masked = true;
        let ret = f(self);
        self.restore(cap, saved);
        self.interrupts_masked = was_masked;
        ret
    }
}

impl Default for BankContext {
    fn default() -> Self {
        Self::new()
    }
}

////////////////////////////////////////////////////////////////////////////////

/// Physical memory: every word of every bank.
pub struct AddressSpace {
    mem: Vec<Word>,
}

impl AddressSpace {
    pub fn new() -> Self {
        AddressSpace { mem: vec![Word::ZERO; (NUM_BANKS as usize) * (BANK_SIZE as usize)] }
    }

    pub fn read(&self, cell: Cell) -> Word {
        self.mem[cell.0.phys_index()]
    }

    pub fn write(&mut self, cell: Cell, val: Word) {
        trace!("Mem: writing {val} to {}", cell.0);
        self.mem[cell.0.phys_index()] = val;
    }

    pub fn bank(&self, bank: Bank) -> &[Word] {
        let start = Address { bank, offset: 0 }.phys_index();
        &self.mem[start..start + BANK_SIZE as usize]
    }

    fn bank_mut(&mut self, bank: Bank) -> &mut [Word] {
        let start = Address { bank, offset: 0 }.phys_index();
        &mut self.mem[start..start + BANK_SIZE as usize]
    }

    // Writes `words` starting at `at`. The run must not cross the end of the bank.
    pub fn load(&mut self, at: Address, words: &[Word]) -> Result<(), MemError> {
        let end = at.offset as usize + words.len();
        if end > BANK_SIZE as usize {
            return Err(MemError::InvalidOffset(end as u32));
        }
        trace!("Mem: loading {} words at {at}", words.len());
        let start = at.offset as usize;
        self.bank_mut(at.bank)[start..end].copy_from_slice(words);
        Ok(())
    }

    /// The bank currently mapped in `ctx`, as word storage.
    pub fn window(&mut self, ctx: &BankContext) -> BankWindow<'_> {
        let bank = ctx.mapped();
        BankWindow { bank, words: self.bank_mut(bank) }
    }

    /// Maps `bank`, hands its window to `f`, then puts the previous mapping
    /// back. Interrupts are masked throughout.
    pub fn with_bank<R>(
        &mut self,
        ctx: &mut BankContext,
        cap: &KernelCap,
        bank: Bank,
        f: impl FnOnce(&mut BankWindow<'_>) -> R,
    ) -> R {
        ctx.critical(cap, |ctx| {
            ctx.select_bank(cap, bank);
            let mut window = self.window(ctx);
            f(&mut window)
        })
    }
}

impl Default for AddressSpace {
    fn default() -> Self {
        Self::new()
    }
}

/// One bank seen through the addressable window: offsets only, no bank bits.
pub struct BankWindow<'a> {
    bank: Bank,
    words: &'a mut [Word],
}

impl BankWindow<'_> {
    pub fn bank(&self) -> Bank {
        self.bank
    }

    // Offsets wrap, the way the hardware's 12-bit address does.
    pub fn read(&self, offset: u16) -> Word {
        self.words[(offset & ADDR_MASK) as usize]
    }

    pub fn write(&mut self, offset: u16, val: Word) {
        let offset = offset & ADDR_MASK;
        trace!("Mem: writing {val} to {}:{offset:04o}", self.bank);
        self.words[offset as usize] = val;
    }
}

impl WordStore for BankWindow<'_> {
    fn len_words(&self) -> usize {
        self.words.len()
    }

    fn read_word(&self, idx: usize) -> Word {
        self.words[idx]
    }

    fn write_word(&mut self, idx: usize, val: Word) {
        trace!("Mem: writing {val} to {}:{idx:04o}", self.bank);
        self.words[idx] = val;
    }
}
