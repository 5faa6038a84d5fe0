//! Byte access to word storage. Two 6-bit sub-fields per 12-bit word; byte
//! `i` lives in word `i / 2`, and `ByteOrder` decides which sub-field holds the
//! even byte.
//!
//! Values wider than six bits are truncated on store. Nothing here reports
//! that except the `_strict` packers, so text that needs all eight bits can't
//! round-trip through this format.

use crate::error::MemError;
use crate::store::WordStore;

use common::constants::{BYTES_PER_WORD, HIGH_MASK, HIGH_SHIFT, LOW_MASK, LOW_SHIFT, SUBFIELD_MASK};
use common::misc::{words_for_bytes, FitsSubfield, IsEven};
use common::Word;

use std::cmp::Ordering;
use std::fmt;

use derive_more::IsVariant;
use log::{debug, trace};

pub fn get_high(word: Word) -> u8 {
    ((word.to_raw() & HIGH_MASK) >> HIGH_SHIFT) as u8
}

pub fn get_low(word: Word) -> u8 {
    ((word.to_raw() & LOW_MASK) >> LOW_SHIFT) as u8
}

// Bits of `byte` above bit 5 are dropped.
pub fn put_high(word: Word, byte: u8) -> Word {
    Word::masked((word.to_raw() & LOW_MASK) | (((byte as u16) << HIGH_SHIFT) & HIGH_MASK))
}

pub fn put_low(word: Word, byte: u8) -> Word {
    Word::masked((word.to_raw() & HIGH_MASK) | (((byte as u16) << LOW_SHIFT) & LOW_MASK))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, IsVariant)]
pub enum Subfield {
    High,
    Low,
}

impl Subfield {
    pub fn get(self, word: Word) -> u8 {
        match self {
            Subfield::High => get_high(word),
            Subfield::Low => get_low(word),
        }
    }

    pub fn put(self, word: Word, byte: u8) -> Word {
        match self {
            Subfield::High => put_high(word, byte),
            Subfield::Low => put_low(word, byte),
        }
    }
}

/// Which sub-field holds the even-numbered byte of each word. Changing this
/// changes the layout of every packed string already written out.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, IsVariant)]
pub enum ByteOrder {
    #[default]
    HighFirst,
    LowFirst,
}

pub const DEFAULT_BYTE_ORDER: ByteOrder = ByteOrder::HighFirst;

impl ByteOrder {
    pub fn subfield(self, byte_idx: usize) -> Subfield {
        match (self, byte_idx.is_even()) {
            (ByteOrder::HighFirst, true) | (ByteOrder::LowFirst, false) => Subfield::High,
            (ByteOrder::HighFirst, false) | (ByteOrder::LowFirst, true) => Subfield::Low,
        }
    }

    // (word index, sub-field)
    pub fn locate(self, byte_idx: usize) -> (usize, Subfield) {
        (byte_idx / BYTES_PER_WORD, self.subfield(byte_idx))
    }
}

////////////////////////////////////////////////////////////////////////////////

/// Byte offset into a packed view. Not necessarily word aligned.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PackedPtr(pub usize);

impl PackedPtr {
    pub fn word(self) -> usize {
        self.0 / BYTES_PER_WORD
    }

    pub fn advance(self, bytes: usize) -> PackedPtr {
        PackedPtr(self.0 + bytes)
    }
}

impl fmt::Display for PackedPtr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.word(), self.0 % BYTES_PER_WORD)
    }
}

////////////////////////////////////////////////////////////////////////////////

/// A word store read and written as packed bytes.
pub struct PackedView<S> {
    store: S,
    order: ByteOrder,
}

impl<S: WordStore> PackedView<S> {
    pub fn new(store: S) -> Self {
        Self::with_order(store, DEFAULT_BYTE_ORDER)
    }

    pub fn with_order(store: S, order: ByteOrder) -> Self {
        PackedView { store, order }
    }

    pub fn order(&self) -> ByteOrder {
        self.order
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_inner(self) -> S {
        self.store
    }

    // In bytes.
    pub fn capacity(&self) -> usize {
        self.store.len_words() * BYTES_PER_WORD
    }

    fn check_range(&self, start: PackedPtr, len: usize) -> Result<(), MemError> {
        let capacity = self.capacity();
        match start.0.checked_add(len) {
            Some(end) if end <= capacity => Ok(()),
            _ => Err(MemError::OutOfBounds { start: start.0, end: start.0.saturating_add(len), capacity }),
        }
    }

    // Unchecked; callers have validated the range.
    fn load(&self, ptr: PackedPtr) -> u8 {
        let (idx, field) = self.order.locate(ptr.0);
        field.get(self.store.read_word(idx))
    }

    fn store_byte(&mut self, ptr: PackedPtr, byte: u8) {
        let (idx, field) = self.order.locate(ptr.0);
        if !byte.fits_subfield() {
            trace!("Packed: truncating {byte:#o} at byte {ptr}");
        }
        let old = self.store.read_word(idx);
        let new = field.put(old, byte);
        trace!("Packed: writing {:#o} to byte {ptr} ({old} -> {new})", byte & SUBFIELD_MASK);
        self.store.write_word(idx, new);
    }

    pub fn get(&self, ptr: PackedPtr) -> Result<u8, MemError> {
        self.check_range(ptr, 1)?;
        Ok(self.load(ptr))
    }

    pub fn put(&mut self, ptr: PackedPtr, byte: u8) -> Result<(), MemError> {
        self.check_range(ptr, 1)?;
        self.store_byte(ptr, byte);
        Ok(())
    }

    /// Moves `count` bytes from `src` to `dest` within this view. Overlapping
    /// ranges are handled by picking the copy direction, so the result is as
    /// if the source had been copied out first. Returns `dest`.
    pub fn copy_within(&mut self, dest: PackedPtr, src: PackedPtr, count: usize) -> Result<PackedPtr, MemError> {
        self.check_range(src, count)?;
        self.check_range(dest, count)?;
        if count == 0 || dest == src {
            return Ok(dest);
        }

        debug!("Packed: moving {count} bytes from {src} to {dest}");
        if dest < src {
            for i in 0..count {
                let b = self.load(src.advance(i));
                self.store_byte(dest.advance(i), b);
            }
        } else {
            for i in (0..count).rev() {
                let b = self.load(src.advance(i));
                self.store_byte(dest.advance(i), b);
            }
        }
        Ok(dest)
    }

    /// Fills `count` bytes at `dest` with `byte`, truncated to six bits.
    pub fn set(&mut self, dest: PackedPtr, byte: u8, count: usize) -> Result<PackedPtr, MemError> {
        self.check_range(dest, count)?;
        debug!("Packed: setting {count} bytes at {dest} to {byte:#o}");
        for i in 0..count {
            self.store_byte(dest.advance(i), byte);
        }
        Ok(dest)
    }

    /// Number of bytes before the first `sentinel` at or after `start`,
    /// scanning no further than the end of the view. The sentinel is
    /// truncated to six bits like any stored byte, so it matches what `set`
    /// or `put` would have written for it.
    pub fn length(&self, start: PackedPtr, sentinel: u8) -> Result<usize, MemError> {
        let bound = self.capacity().saturating_sub(start.0);
        self.length_bounded(start, sentinel, bound)
    }

    /// Like `length`, but gives up after `bound` bytes.
    pub fn length_bounded(&self, start: PackedPtr, sentinel: u8, bound: usize) -> Result<usize, MemError> {
        self.check_range(start, 0)?;
        let bound = bound.min(self.capacity() - start.0);
        let sentinel = sentinel & SUBFIELD_MASK;
        (0..bound)
            .find(|&i| self.load(start.advance(i)) == sentinel)
            .ok_or(MemError::UnterminatedScan { start: start.0, sentinel, bound })
    }

    /// Copies the bytes at `src` up to and including the first `sentinel` to
    /// `dest`, within this view. Overlap is handled as in `copy_within`. If
    /// there's no terminator before the end of the view, or the terminated
    /// run doesn't fit at `dest`, nothing is written. Returns `dest`.
    pub fn copy_terminated_within(&mut self, dest: PackedPtr, src: PackedPtr, sentinel: u8) -> Result<PackedPtr, MemError> {
        let count = self.length(src, sentinel)? + 1;
        self.copy_within(dest, src, count)
    }

    /// Lexicographic comparison of two ranges in this view.
    pub fn compare(&self, a: PackedPtr, b: PackedPtr, count: usize) -> Result<Ordering, MemError> {
        compare(self, a, self, b, count)
    }

    pub fn read_bytes(&self, start: PackedPtr, count: usize) -> Result<Vec<u8>, MemError> {
        self.check_range(start, count)?;
        Ok((0..count).map(|i| self.load(start.advance(i))).collect())
    }

    pub fn write_bytes(&mut self, start: PackedPtr, bytes: &[u8]) -> Result<PackedPtr, MemError> {
        self.check_range(start, bytes.len())?;
        for (i, &b) in bytes.iter().enumerate() {
            self.store_byte(start.advance(i), b);
        }
        Ok(start)
    }
}

/// Copies `count` bytes between two views. The views can't alias, so this is
/// a plain forward copy. The views' byte orders may differ; bytes keep their
/// logical positions. Returns `dest_ptr`.
pub fn copy<D: WordStore, S: WordStore>(
    dest: &mut PackedView<D>,
    dest_ptr: PackedPtr,
    src: &PackedView<S>,
    src_ptr: PackedPtr,
    count: usize,
) -> Result<PackedPtr, MemError> {
    src.check_range(src_ptr, count)?;
    dest.check_range(dest_ptr, count)?;
    debug!("Packed: copying {count} bytes from {src_ptr} to {dest_ptr}");
    for i in 0..count {
        let b = src.load(src_ptr.advance(i));
        dest.store_byte(dest_ptr.advance(i), b);
    }
    Ok(dest_ptr)
}

/// `copy` of a terminated run: everything at `src_ptr` up to and including
/// the first `sentinel`. Nothing is written unless the whole run fits.
pub fn copy_terminated<D: WordStore, S: WordStore>(
    dest: &mut PackedView<D>,
    dest_ptr: PackedPtr,
    src: &PackedView<S>,
    src_ptr: PackedPtr,
    sentinel: u8,
) -> Result<PackedPtr, MemError> {
    let count = src.length(src_ptr, sentinel)? + 1;
    copy(dest, dest_ptr, src, src_ptr, count)
}

pub fn compare<A: WordStore, B: WordStore>(
    a: &PackedView<A>,
    a_ptr: PackedPtr,
    b: &PackedView<B>,
    b_ptr: PackedPtr,
    count: usize,
) -> Result<Ordering, MemError> {
    a.check_range(a_ptr, count)?;
    b.check_range(b_ptr, count)?;
    for i in 0..count {
        let ord = a.load(a_ptr.advance(i)).cmp(&b.load(b_ptr.advance(i)));
        if ord.is_ne() {
            return Ok(ord);
        }
    }
    Ok(Ordering::Equal)
}

////////////////////////////////////////////////////////////////////////////////

/// Packs `bytes` into fresh words, truncating anything wider than six bits.
/// Returns the words and how many bytes lost bits.
pub fn pack_bytes(bytes: &[u8], order: ByteOrder) -> (Vec<Word>, usize) {
    let mut view = PackedView::with_order(vec![Word::ZERO; words_for_bytes(bytes.len())], order);
    for (i, &b) in bytes.iter().enumerate() {
        view.store_byte(PackedPtr(i), b);
    }
    let truncated = bytes.iter().filter(|b| !b.fits_subfield()).count();
    (view.into_inner(), truncated)
}

/// Packs `bytes`, refusing any that would be truncated.
pub fn pack_bytes_strict(bytes: &[u8], order: ByteOrder) -> Result<Vec<Word>, MemError> {
    if let Some((index, &value)) = bytes.iter().enumerate().find(|(_, b)| !b.fits_subfield()) {
        return Err(MemError::Truncation { index, value });
    }
    Ok(pack_bytes(bytes, order).0)
}

pub fn unpack_bytes(words: &[Word], order: ByteOrder) -> Vec<u8> {
    (0..words.len() * BYTES_PER_WORD)
        .map(|i| {
            let (idx, field) = order.locate(i);
            field.get(words[idx])
        })
        .collect()
}
