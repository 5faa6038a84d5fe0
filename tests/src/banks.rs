use common::Word;
use mem_lib::{in_kernel_range, resolve, AddressSpace, Bank, BankContext, KernelCap, MemError, Mapping, PackedPtr, PackedView};

#[test]
fn kernel_range_checks() {
    let k = resolve(7, 0o6000).unwrap();
    assert!(in_kernel_range(k.address()));
    let u = resolve(3, 0o6000).unwrap();
    assert!(!in_kernel_range(u.address()));
}

#[test]
fn resolve_errors() {
    assert!(matches!(resolve(8, 0), Err(MemError::InvalidBank(8))));
    assert!(matches!(resolve(0, 4096), Err(MemError::InvalidOffset(4096))));
    assert!(resolve(0, 4095).is_ok());
}

#[test]
fn banks_alias_by_offset() {
    let cap = KernelCap::assume_kernel();
    let mut space = AddressSpace::new();
    let mut ctx = BankContext::new();

    for b in Bank::users() {
        ctx.select_bank(&cap, b);
        space.window(&ctx).write(0o200, Word::masked(b.to_raw() as u16));
    }
    for b in Bank::users() {
        assert_eq!(space.read(resolve(b.to_raw(), 0o200).unwrap()), Word::masked(b.to_raw() as u16));
    }
    assert_eq!(space.read(resolve(7, 0o200).unwrap()), Word::ZERO);
}

#[test]
fn codec_on_mapped_bank() {
    let cap = KernelCap::assume_kernel();
    let mut space = AddressSpace::new();
    let mut ctx = BankContext::new();
    let bank = Bank::new(5).unwrap();

    let len = space.with_bank(&mut ctx, &cap, bank, |win| {
        let mut view = PackedView::new(win);
        view.write_bytes(PackedPtr(0o1001), &[0o21, 0o22, 0o23, 0]).unwrap();
        view.copy_within(PackedPtr(0o2000), PackedPtr(0o1001), 4).unwrap();
        view.length(PackedPtr(0o2000), 0).unwrap()
    });
    assert_eq!(len, 3);
    assert_eq!(ctx.mapping(), Mapping::Kernel);

    // Byte 0o2000 is the high half of word 0o1000.
    let w = space.read(resolve(5, 0o1000).unwrap());
    assert_eq!(w, Word::masked(0o2122));
    // Kernel bank untouched.
    assert!(space.bank(Bank::KERNEL).iter().all(|&w| w == Word::ZERO));
}

#[test]
fn interrupt_handler_saves_bank() {
    let cap = KernelCap::assume_kernel();
    let mut ctx = BankContext::new();
    ctx.select_bank(&cap, Bank::new(2).unwrap());

    // What a handler does around its own use of the bank register.
    let saved = ctx.save();
    ctx.select_bank(&cap, Bank::KERNEL);
    assert!(ctx.mapping().is_kernel());
    ctx.restore(&cap, saved);

    assert_eq!(ctx.mapping(), Mapping::User(Bank::new(2).unwrap()));
}

#[test]
fn window_covers_whole_bank() {
    let mut space = AddressSpace::new();
    let ctx = BankContext::new();
    let view = PackedView::new(space.window(&ctx));
    assert_eq!(view.capacity(), 2 * 4096);
    assert!(matches!(view.get(PackedPtr(2 * 4096)), Err(MemError::OutOfBounds { .. })));
}
