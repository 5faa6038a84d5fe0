use common::Word;
use mem_lib::packed::{copy, copy_terminated, get_high, get_low, pack_bytes, unpack_bytes};
use mem_lib::{ByteOrder, MemError, PackedPtr, PackedView, DEFAULT_BYTE_ORDER};

fn view_of(bytes: &[u8], order: ByteOrder) -> PackedView<Vec<Word>> {
    PackedView::with_order(pack_bytes(bytes, order).0, order)
}

#[test]
fn overlap_matches_temp_copy() {
    let bytes: Vec<u8> = (1..=10).collect();
    let mut view = view_of(&bytes, DEFAULT_BYTE_ORDER);

    let mut expect = bytes.clone();
    let tmp = expect[0..6].to_vec();
    expect[3..9].copy_from_slice(&tmp);

    view.copy_within(PackedPtr(3), PackedPtr(0), 6).unwrap();
    assert_eq!(view.read_bytes(PackedPtr(0), 10).unwrap(), expect);
}

#[test]
fn overlap_every_shift() {
    let bytes: Vec<u8> = (1..=16).collect();
    for order in [ByteOrder::HighFirst, ByteOrder::LowFirst] {
        for src in 0..6 {
            for dest in 0..6 {
                let mut view = view_of(&bytes, order);
                let mut expect = bytes.clone();
                expect.copy_within(src..src + 9, dest);
                view.copy_within(PackedPtr(dest), PackedPtr(src), 9).unwrap();
                assert_eq!(view.read_bytes(PackedPtr(0), 16).unwrap(), expect, "{order:?} {src} -> {dest}");
            }
        }
    }
}

#[test]
fn length_stops_at_sentinel() {
    let view = view_of(&[5, 7, 9, 0, 99], DEFAULT_BYTE_ORDER);
    assert_eq!(view.length(PackedPtr(0), 0).unwrap(), 3);
}

#[test]
fn length_needs_terminator() {
    let view = view_of(&[5, 7, 9, 1], DEFAULT_BYTE_ORDER);
    assert!(matches!(view.length(PackedPtr(0), 0), Err(MemError::UnterminatedScan { .. })));
}

#[test]
fn set_truncates() {
    let mut view = PackedView::new(vec![Word::MAX; 2]);
    view.set(PackedPtr(0), 0o100, 4).unwrap();
    let words = view.into_inner();
    for w in words {
        assert_eq!(get_high(w), 0o100 & 0o77);
        assert_eq!(get_low(w), 0o100 & 0o77);
    }
}

#[test]
fn set_odd_start_and_length() {
    let mut view = PackedView::new(vec![Word::ZERO; 3]);
    view.set(PackedPtr(1), 0o41, 3).unwrap();
    assert_eq!(view.read_bytes(PackedPtr(0), 6).unwrap(), [0, 0o41, 0o41, 0o41, 0, 0]);
}

#[test]
fn copy_into_other_buffer() {
    let src = view_of(&[0o11, 0o22, 0o33, 0o44, 0o55], DEFAULT_BYTE_ORDER);
    let mut dest = PackedView::new(vec![Word::MAX; 4]);
    let ret = copy(&mut dest, PackedPtr(3), &src, PackedPtr(1), 4).unwrap();
    assert_eq!(ret, PackedPtr(3));
    assert_eq!(
        dest.read_bytes(PackedPtr(0), 8).unwrap(),
        [0o77, 0o77, 0o77, 0o22, 0o33, 0o44, 0o55, 0o77]
    );
}

#[test]
fn slices_as_storage() {
    let mut words = [Word::ZERO; 4];
    let mut view = PackedView::new(&mut words[..]);
    view.write_bytes(PackedPtr(2), &[0o12, 0o34, 0o56]).unwrap();
    assert_eq!(view.length(PackedPtr(2), 0).unwrap(), 3);
    assert_eq!(words[1], Word::masked(0o1234));
    assert_eq!(words[2], Word::masked(0o5600));
}

#[test]
fn byte_order_changes_layout_only() {
    let bytes = [0o01, 0o02, 0o03, 0o04];
    let (high, _) = pack_bytes(&bytes, ByteOrder::HighFirst);
    let (low, _) = pack_bytes(&bytes, ByteOrder::LowFirst);
    assert_eq!(high, [Word::masked(0o0102), Word::masked(0o0304)]);
    assert_eq!(low, [Word::masked(0o0201), Word::masked(0o0403)]);
    assert_eq!(unpack_bytes(&high, ByteOrder::HighFirst), bytes);
    assert_eq!(unpack_bytes(&low, ByteOrder::LowFirst), bytes);
}

#[test]
fn terminated_copy_from_odd_offset() {
    let src = view_of(&[0o70, 0o11, 0o22, 0o33, 0, 0o44], DEFAULT_BYTE_ORDER);
    let mut dest = PackedView::with_order(vec![Word::ZERO; 4], ByteOrder::LowFirst);
    let ret = copy_terminated(&mut dest, PackedPtr(2), &src, PackedPtr(1), 0).unwrap();
    assert_eq!(ret, PackedPtr(2));
    assert_eq!(dest.read_bytes(PackedPtr(2), 4).unwrap(), [0o11, 0o22, 0o33, 0]);
    assert_eq!(dest.length(PackedPtr(2), 0).unwrap(), 3);
}

#[test]
fn terminated_move_overlapping() {
    let mut view = view_of(&[0o1, 0o2, 0o3, 0o4, 0o5, 0, 0o7, 0o10], DEFAULT_BYTE_ORDER);
    view.copy_terminated_within(PackedPtr(1), PackedPtr(3), 0).unwrap();
    assert_eq!(view.read_bytes(PackedPtr(0), 8).unwrap(), [0o1, 0o4, 0o5, 0, 0o5, 0, 0o7, 0o10]);
}

#[test]
fn terminated_copy_needs_terminator() {
    let mut view = view_of(&[0o1, 0o2, 0o3, 0o4], DEFAULT_BYTE_ORDER);
    let before = view.read_bytes(PackedPtr(0), 4).unwrap();
    assert!(matches!(
        view.copy_terminated_within(PackedPtr(0), PackedPtr(1), 0),
        Err(MemError::UnterminatedScan { start: 1, sentinel: 0, bound: 3 })
    ));
    assert_eq!(view.read_bytes(PackedPtr(0), 4).unwrap(), before);
}

#[test]
fn scan_past_end_is_out_of_bounds() {
    let view = view_of(&[0o1, 0o2, 0o3, 0o4], DEFAULT_BYTE_ORDER);
    assert!(matches!(view.length(PackedPtr(9), 0), Err(MemError::OutOfBounds { .. })));
}

#[test]
fn wide_sentinel_finds_truncated_store() {
    let mut view = PackedView::new(vec![Word::MAX; 2]);
    view.set(PackedPtr(1), 0o100, 1).unwrap();
    assert_eq!(view.length(PackedPtr(0), 0o100).unwrap(), 1);
}
