use super::*;

#[test]
fn declared_entry_size_is_capped() {
    assert_eq!(capacity_hint(0), 0);
    assert_eq!(capacity_hint(512), 512);
    assert_eq!(capacity_hint(u64::MAX), MAX_PREALLOC as usize);
    assert_eq!(capacity_hint(u64::from(u32::MAX)), MAX_PREALLOC as usize);
}
