/// Reverses the bit order of a byte (bit 0 <-> bit 7, 1 <-> 6, 2 <-> 5, 3 <-> 4).
pub const fn reverse_bits(byte: u8) -> u8 {
    let mut b = byte;
    b = (b & 0xF0) >> 4 | (b & 0x0F) << 4;
    b = (b & 0xCC) >> 2 | (b & 0x33) << 2;
    b = (b & 0xAA) >> 1 | (b & 0x55) << 1;
    b
}

/// Bit-reverses every byte of `buffer` in place.
pub fn reverse_all(buffer: &mut [u8]) {
    for b in buffer.iter_mut() {
        *b = reverse_bits(*b);
    }
}
