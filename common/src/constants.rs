pub const WORD_MASK: u16 = 0o7777;
pub const WORD_MODULUS: u32 = 0o10000;

// Packed sub-fields. This is ABI: anything that packs text for this machine
// must agree bit for bit.
pub const HIGH_MASK: u16 = 0o7700;
pub const HIGH_SHIFT: u16 = 6;
pub const LOW_MASK: u16 = 0o0077;
pub const LOW_SHIFT: u16 = 0;
pub const SUBFIELD_MASK: u8 = 0o77;
pub const BYTES_PER_WORD: usize = 2;

// Banks ("fields").
pub const NUM_BANKS: u8 = 8;
pub const KERNEL_BANK: u8 = 7;
pub const USER_BANK_START: u8 = 0;
pub const USER_BANK_END: u8 = 6; // Inclusive
pub const BANK_SIZE: u16 = 0o10000; // Words
pub const ADDR_MASK: u16 = 0o7777;

// Kernel layout within bank 7. Each region ends where the next begins.
pub const KERN_INTERRUPT_TABLE_BASE: u16 = 0o6000;
pub const KERN_BANK_SWITCH_THUNKS: u16 = 0o6100;
pub const KERN_TEXT_BASE: u16 = 0o6200;
pub const KERN_DATA_BASE: u16 = 0o7000;
pub const KERN_ZP_WORK_AREA: u16 = 0o7600;
pub const KERN_END: u16 = BANK_SIZE; // Exclusive

// User image budgets, in words.
pub const USER_TEXT_SIZE: u16 = 0o4000;
pub const USER_DATA_SIZE: u16 = 0o2000;
pub const USER_HEAP_SIZE: u16 = 0o1000;
pub const USER_STACK_SIZE: u16 = 0o1000;

pub const USER_TEXT_BASE: u16 = 0o0;
pub const USER_DATA_BASE: u16 = USER_TEXT_BASE + USER_TEXT_SIZE;
pub const USER_HEAP_BASE: u16 = USER_DATA_BASE + USER_DATA_SIZE;
pub const USER_STACK_BASE: u16 = USER_HEAP_BASE + USER_HEAP_SIZE;
pub const USER_END: u16 = USER_STACK_BASE + USER_STACK_SIZE; // Exclusive

const _: () = assert!(KERN_INTERRUPT_TABLE_BASE < KERN_BANK_SWITCH_THUNKS);
const _: () = assert!(KERN_BANK_SWITCH_THUNKS < KERN_TEXT_BASE);
const _: () = assert!(KERN_TEXT_BASE < KERN_DATA_BASE);
const _: () = assert!(KERN_DATA_BASE < KERN_ZP_WORK_AREA);
const _: () = assert!(KERN_ZP_WORK_AREA < KERN_END);
const _: () = assert!(USER_END <= BANK_SIZE);
const _: () = assert!(HIGH_MASK & LOW_MASK == 0);
const _: () = assert!(HIGH_MASK | LOW_MASK == WORD_MASK);
