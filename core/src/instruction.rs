use crate::error::Error;
use crate::opcode::Opcode;
use crate::operations as ops;
use crate::operations::Keys;
use crate::quirks::Quirks;
use crate::state::State;

/// A fully decoded instruction.
///
/// Decoding is a two-level dispatch: the top nibble picks the family and a
/// few families sub-dispatch on the low nibble or byte. Anything that falls
/// through both levels is a corrupted program and decodes to an error rather
/// than a variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    /// `0NNN` machine-code call, ignored (reserved)
    Sys,
    /// `00E0`
    Clear,
    /// `00EE`
    Return,
    /// `1NNN`
    Jump { nnn: u16 },
    /// `2NNN`
    Call { nnn: u16 },
    /// `3XNN`
    SkipEqImm { x: u8, nn: u8 },
    /// `4XNN`
    SkipNeImm { x: u8, nn: u8 },
    /// `5XY0`
    SkipEqReg { x: u8, y: u8 },
    /// `6XNN`
    LoadImm { x: u8, nn: u8 },
    /// `7XNN`
    AddImm { x: u8, nn: u8 },
    /// `8XY0`
    Move { x: u8, y: u8 },
    /// `8XY1`
    Or { x: u8, y: u8 },
    /// `8XY2`
    And { x: u8, y: u8 },
    /// `8XY3`
    Xor { x: u8, y: u8 },
    /// `8XY4`
    Add { x: u8, y: u8 },
    /// `8XY5`
    Sub { x: u8, y: u8 },
    /// `8XY6`
    ShiftRight { x: u8 },
    /// `8XY7`
    SubFrom { x: u8, y: u8 },
    /// `8XYE`
    ShiftLeft { x: u8 },
    /// `9XY0`
    SkipNeReg { x: u8, y: u8 },
    /// `ANNN`
    LoadIndex { nnn: u16 },
    /// `BNNN`
    JumpOffset { nnn: u16 },
    /// `CXNN`
    Random { x: u8, nn: u8 },
    /// `DXYN`
    Draw { x: u8, y: u8, n: u8 },
    /// `EX9E`
    SkipKeyDown { x: u8 },
    /// `EXA1`
    SkipKeyUp { x: u8 },
    /// `FX07`
    ReadDelay { x: u8 },
    /// `FX0A`
    WaitKey { x: u8 },
    /// `FX15`
    SetDelay { x: u8 },
    /// `FX18`
    SetSound { x: u8 },
    /// `FX1E`
    AddIndex { x: u8 },
    /// `FX29`
    LoadGlyph { x: u8 },
    /// `FX33`
    StoreBcd { x: u8 },
    /// `FX55`
    StoreRegs { x: u8 },
    /// `FX65`
    LoadRegs { x: u8 },
}

impl Instruction {
    /// Decodes one 16-bit word; unknown encodings are a fatal decode failure.
    pub fn decode(op: u16) -> Result<Self, Error> {
        let instruction = match op.nibbles() {
            (0x0, 0x0, 0xE, 0x0) => Instruction::Clear,
            (0x0, 0x0, 0xE, 0xE) => Instruction::Return,
            (0x0, ..) => Instruction::Sys,
            (0x1, ..) => Instruction::Jump { nnn: op.nnn() },
            (0x2, ..) => Instruction::Call { nnn: op.nnn() },
            (0x3, ..) => Instruction::SkipEqImm { x: op.x(), nn: op.nn() },
            (0x4, ..) => Instruction::SkipNeImm { x: op.x(), nn: op.nn() },
            (0x5, .., 0x0) => Instruction::SkipEqReg { x: op.x(), y: op.y() },
            (0x6, ..) => Instruction::LoadImm { x: op.x(), nn: op.nn() },
            (0x7, ..) => Instruction::AddImm { x: op.x(), nn: op.nn() },
            (0x8, .., 0x0) => Instruction::Move { x: op.x(), y: op.y() },
            (0x8, .., 0x1) => Instruction::Or { x: op.x(), y: op.y() },
            (0x8, .., 0x2) => Instruction::And { x: op.x(), y: op.y() },
            (0x8, .., 0x3) => Instruction::Xor { x: op.x(), y: op.y() },
            (0x8, .., 0x4) => Instruction::Add { x: op.x(), y: op.y() },
            (0x8, .., 0x5) => Instruction::Sub { x: op.x(), y: op.y() },
            (0x8, .., 0x6) => Instruction::ShiftRight { x: op.x() },
            (0x8, .., 0x7) => Instruction::SubFrom { x: op.x(), y: op.y() },
            (0x8, .., 0xE) => Instruction::ShiftLeft { x: op.x() },
            (0x9, .., 0x0) => Instruction::SkipNeReg { x: op.x(), y: op.y() },
            (0xA, ..) => Instruction::LoadIndex { nnn: op.nnn() },
            (0xB, ..) => Instruction::JumpOffset { nnn: op.nnn() },
            (0xC, ..) => Instruction::Random { x: op.x(), nn: op.nn() },
            (0xD, ..) => Instruction::Draw {
                x: op.x(),
                y: op.y(),
                n: op.n(),
            },
            (0xE, .., 0x9, 0xE) => Instruction::SkipKeyDown { x: op.x() },
            (0xE, .., 0xA, 0x1) => Instruction::SkipKeyUp { x: op.x() },
            (0xF, .., 0x0, 0x7) => Instruction::ReadDelay { x: op.x() },
            (0xF, .., 0x0, 0xA) => Instruction::WaitKey { x: op.x() },
            (0xF, .., 0x1, 0x5) => Instruction::SetDelay { x: op.x() },
            (0xF, .., 0x1, 0x8) => Instruction::SetSound { x: op.x() },
            (0xF, .., 0x1, 0xE) => Instruction::AddIndex { x: op.x() },
            (0xF, .., 0x2, 0x9) => Instruction::LoadGlyph { x: op.x() },
            (0xF, .., 0x3, 0x3) => Instruction::StoreBcd { x: op.x() },
            (0xF, .., 0x5, 0x5) => Instruction::StoreRegs { x: op.x() },
            (0xF, .., 0x6, 0x5) => Instruction::LoadRegs { x: op.x() },
            _ => return Err(Error::UnknownOpcode { op }),
        };
        Ok(instruction)
    }

    /// Applies exactly one state transition.
    ///
    /// Pure with respect to its inputs: the next `State` is derived from the
    /// current one, the input latch is read-only, and the only fallible
    /// operations are the ones whose address arithmetic can leave memory.
    pub fn execute(self, state: &State, keys: &Keys, quirks: Quirks) -> Result<State, Error> {
        let next = match self {
            Instruction::Sys => ops::sys(state),
            Instruction::Clear => ops::clear(state),
            Instruction::Return => ops::ret(state),
            Instruction::Jump { nnn } => ops::jump(nnn, state),
            Instruction::Call { nnn } => ops::call(nnn, state),
            Instruction::SkipEqImm { x, nn } => ops::skip_eq_imm(x, nn, state),
            Instruction::SkipNeImm { x, nn } => ops::skip_ne_imm(x, nn, state),
            Instruction::SkipEqReg { x, y } => ops::skip_eq_reg(x, y, state),
            Instruction::LoadImm { x, nn } => ops::load_imm(x, nn, state),
            Instruction::AddImm { x, nn } => ops::add_imm(x, nn, state),
            Instruction::Move { x, y } => ops::move_reg(x, y, state),
            Instruction::Or { x, y } => ops::or_reg(x, y, state),
            Instruction::And { x, y } => ops::and_reg(x, y, state),
            Instruction::Xor { x, y } => ops::xor_reg(x, y, state),
            Instruction::Add { x, y } => ops::add_reg(x, y, state),
            Instruction::Sub { x, y } => ops::sub_reg(x, y, state),
            Instruction::ShiftRight { x } => ops::shift_right(x, state),
            Instruction::SubFrom { x, y } => ops::sub_from_reg(x, y, state),
            Instruction::ShiftLeft { x } => ops::shift_left(x, state),
            Instruction::SkipNeReg { x, y } => ops::skip_ne_reg(x, y, state),
            Instruction::LoadIndex { nnn } => ops::load_index(nnn, state),
            Instruction::JumpOffset { nnn } => ops::jump_offset(nnn, state),
            Instruction::Random { x, nn } => ops::random(x, nn, state),
            Instruction::Draw { x, y, n } => return ops::draw(x, y, n, state),
            Instruction::SkipKeyDown { x } => ops::skip_key_down(x, state, keys),
            Instruction::SkipKeyUp { x } => ops::skip_key_up(x, state, keys),
            Instruction::ReadDelay { x } => ops::read_delay(x, state),
            Instruction::WaitKey { x } => ops::wait_key(x, state, keys),
            Instruction::SetDelay { x } => ops::set_delay(x, state),
            Instruction::SetSound { x } => ops::set_sound(x, state),
            Instruction::AddIndex { x } => ops::add_index(x, state, quirks),
            Instruction::LoadGlyph { x } => ops::load_glyph(x, state),
            Instruction::StoreBcd { x } => return ops::store_bcd(x, state),
            Instruction::StoreRegs { x } => return ops::store_regs(x, state, quirks),
            Instruction::LoadRegs { x } => return ops::load_regs(x, state, quirks),
        };
        Ok(next)
    }
}
