use common::Word;

use delegate::delegate;

/// Word-addressed storage the packed codec runs on. Indices are word indices
/// from zero; callers check them against `len_words` before access.
pub trait WordStore {
    fn len_words(&self) -> usize;
    fn read_word(&self, idx: usize) -> Word;
    fn write_word(&mut self, idx: usize, val: Word);

    fn is_empty(&self) -> bool {
        self.len_words() == 0
    }
}

impl WordStore for [Word] {
    fn len_words(&self) -> usize {
        self.len()
    }

    fn read_word(&self, idx: usize) -> Word {
        self[idx]
    }

    fn write_word(&mut self, idx: usize, val: Word) {
        self[idx] = val;
    }
}

impl WordStore for Vec<Word> {
    delegate! {
        to self.as_mut_slice() {
            fn write_word(&mut self, idx: usize, val: Word);
        }
        to self.as_slice() {
            fn len_words(&self) -> usize;
            fn read_word(&self, idx: usize) -> Word;
        }
    }
}

impl<const N: usize> WordStore for [Word; N] {
    delegate! {
        to self.as_mut_slice() {
            fn write_word(&mut self, idx: usize, val: Word);
        }
        to self.as_slice() {
            fn len_words(&self) -> usize;
            fn read_word(&self, idx: usize) -> Word;
        }
    }
}

impl<T: WordStore + ?Sized> WordStore for &mut T {
    fn len_words(&self) -> usize {
        (**self).len_words()
    }

    fn read_word(&self, idx: usize) -> Word {
        (**self).read_word(idx)
    }

    fn write_word(&mut self, idx: usize, val: Word) {
        (**self).write_word(idx, val)
    }
}
