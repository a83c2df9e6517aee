use bitflags::bitflags;

bitflags! {
  #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
  pub struct Flags: u32 {
    const NONE = 0b00000000;
    const LITTLE_ENDIAN = 0b00000001;
    const UTF8 = 0b00000010;
  }
}
