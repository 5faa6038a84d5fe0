pub mod bank;
pub mod error;
pub mod image;
pub mod layout;
pub mod packed;
pub mod store;

pub use bank::{resolve, Address, AddressSpace, Bank, BankContext, BankWindow, Cell, KernelCap, Mapping};
pub use error::MemError;
pub use image::{LoadedImage, UserImage};
pub use layout::{in_kernel_range, KernelRegion, UserSegment};
pub use packed::{ByteOrder, PackedPtr, PackedView, Subfield, DEFAULT_BYTE_ORDER};
pub use store::WordStore;
