/// Accessors for the operand fields packed into a 16-bit instruction word.
///
/// Writing `word.x()` instead of shift-and-mask arithmetic at every use site
/// keeps the decoder readable. Field layout, with the high nibble written
/// first:
///
/// ```text
/// 0xABCD
///   A      family selector (plus, for some families, the low nibble/byte)
///    BCD   nnn: a 12-bit address
///   .B     x:   register Vx, or the range V0..Vx
///    .C    y:   register Vy
///     .D   n:   a 4-bit immediate (sprite height)
///     CD   nn:  an immediate byte
/// ```
pub trait Opcode {
    /// All four nibbles, high to low, for pattern matching in the decoder.
    fn nibbles(&self) -> (u8, u8, u8, u8);

    /// Second nibble: the Vx register selector.
    fn x(&self) -> u8;

    /// Third nibble: the Vy register selector.
    fn y(&self) -> u8;

    /// Low nibble: the 4-bit immediate.
    fn n(&self) -> u8;

    /// Low byte: the 8-bit immediate.
    fn nn(&self) -> u8;

    /// Low 12 bits: the address operand.
    fn nnn(&self) -> u16;
}

impl Opcode for u16 {
    fn nibbles(&self) -> (u8, u8, u8, u8) {
        ((self >> 12) as u8, self.x(), self.y(), self.n())
    }

    fn x(&self) -> u8 {
        ((self >> 8) & 0xF) as u8
    }

    fn y(&self) -> u8 {
        ((self >> 4) & 0xF) as u8
    }

    fn n(&self) -> u8 {
        (self & 0xF) as u8
    }

    fn nn(&self) -> u8 {
        (self & 0xFF) as u8
    }

    fn nnn(&self) -> u16 {
        self & 0xFFF
    }
}

#[cfg(test)]
mod test_opcode {
    use super::*;

    #[test]
    fn test_nibbles() {
        let op: u16 = 0xABCD;
        assert_eq!(op.nibbles(), (0xA, 0xB, 0xC, 0xD));
    }

    #[test]
    fn test_operand_fields() {
        let op: u16 = 0xABCD;
        assert_eq!(op.x(), 0xB);
        assert_eq!(op.y(), 0xC);
        assert_eq!(op.n(), 0xD);
        assert_eq!(op.nn(), 0xCD);
        assert_eq!(op.nnn(), 0xBCD);
    }
}
