use std::fmt;

/// An operand selector: one of the four registers, or one of the four
/// memory addressing forms. Instructions carry two of these (`a1` in bits
/// 10..8, `a2` in bits 13..11); the immediate forms carry only `a1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arg {
    A,    // 0
    D,    // 1
    X,    // 2
    Y,    // 3
    AtX,  // 4 - the byte at [X]
    AtY,  // 5 - the byte at [Y]
    AtXD, // 6 - the byte at [X + D], address mod 256
    AtYD, // 7 - the byte at [Y + D], address mod 256
}

impl Arg {
    /// Map a raw 3-bit selector to its operand form.
    pub fn from_selector(selector: u8) -> Arg {
        match selector & 0b111 {
            0 => Arg::A,
            1 => Arg::D,
            2 => Arg::X,
            3 => Arg::Y,
            4 => Arg::AtX,
            5 => Arg::AtY,
            6 => Arg::AtXD,
            _ => Arg::AtYD,
        }
    }

    /// The selector bits this operand encodes to.
    pub fn selector(self) -> u8 {
        match self {
            Arg::A => 0,
            Arg::D => 1,
            Arg::X => 2,
            Arg::Y => 3,
            Arg::AtX => 4,
            Arg::AtY => 5,
            Arg::AtXD => 6,
            Arg::AtYD => 7,
        }
    }
}

impl fmt::Display for Arg {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let text = match self {
            Arg::A => "A",
            Arg::D => "D",
            Arg::X => "X",
            Arg::Y => "Y",
            Arg::AtX => "[X]",
            Arg::AtY => "[Y]",
            Arg::AtXD => "[X + D]",
            Arg::AtYD => "[Y + D]",
        };
        write!(f, "{}", text)
    }
}

/// A decoded instruction. The machine pattern-matches on this instead of
/// re-deriving fields from the raw word at execution time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Mov { dst: Arg, src: Arg },
    Or { dst: Arg, src: Arg },
    Add { dst: Arg, src: Arg },
    Sub { dst: Arg, src: Arg },
    Adc { dst: Arg, src: Arg },
    Sbb { dst: Arg, src: Arg },
    Xchg { lhs: Arg, rhs: Arg },
    Movi { dst: Arg, imm: u8 },
    Xori { dst: Arg, imm: u8 },
    Addi { dst: Arg, imm: u8 },
    Cmpi { lhs: Arg, imm: u8 },
    Rcr { dst: Arg },
    Clc,
    Stc,
    Jmp { offset: i8 },
    Jnc { offset: i8 },
    Jc { offset: i8 },
    Jnz { offset: i8 },
    Jz { offset: i8 },
    Brk,
    /// Any encoding the ISA leaves undefined. Executes as a no-op.
    Nop,
}

/// Decode one 16-bit instruction word.
///
/// Bit 15 is the MSB. Bits 15..14 select the instruction group:
///
/// * `00` - register/register operations; the low byte picks the operation,
///   `a1` is the destination selector, `a2` the source selector.
/// * `01` - immediate operations; bits 13..11 pick the operation, the low
///   byte is the immediate (RCR is filed here with a fixed immediate of 1).
/// * `10` - flag writes (CLC, STC).
/// * `11` - relative branches with a signed 8-bit offset, and BRK.
pub fn decode(word: u16) -> Operation {
    let a1 = Arg::from_selector((word >> 8) as u8);
    let a2 = Arg::from_selector((word >> 11) as u8);
    let imm = word as u8;

    match word >> 14 {
        0b00 => match word & 0x00FF {
            0x00 => Operation::Mov { dst: a1, src: a2 },
            0x02 => Operation::Or { dst: a1, src: a2 },
            0x04 => Operation::Add { dst: a1, src: a2 },
            0x05 => Operation::Sub { dst: a1, src: a2 },
            0x06 => Operation::Adc { dst: a1, src: a2 },
            0x07 => Operation::Sbb { dst: a1, src: a2 },
            0x08 => Operation::Xchg { lhs: a1, rhs: a2 },
            _ => Operation::Nop,
        },
        0b01 => match (word >> 11) & 0b111 {
            0b000 => Operation::Movi { dst: a1, imm },
            0b011 => Operation::Xori { dst: a1, imm },
            0b100 => Operation::Addi { dst: a1, imm },
            0b101 => Operation::Cmpi { lhs: a1, imm },
            0b110 if imm == 0x01 => Operation::Rcr { dst: a1 },
            _ => Operation::Nop,
        },
        0b10 => match word {
            0x8000 => Operation::Clc,
            0x8100 => Operation::Stc,
            _ => Operation::Nop,
        },
        _ => match word {
            0xFFFF => Operation::Brk,
            _ => match word >> 8 {
                0xC0 => Operation::Jmp { offset: imm as i8 },
                0xC2 => Operation::Jnc { offset: imm as i8 },
                0xC3 => Operation::Jc { offset: imm as i8 },
                0xC4 => Operation::Jnz { offset: imm as i8 },
                0xC5 => Operation::Jz { offset: imm as i8 },
                _ => Operation::Nop,
            },
        },
    }
}

impl fmt::Display for Operation {
    /// Render the instruction as assembly, e.g. `MOVI [X + D], 0x07` or
    /// `JNZ -7`.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Operation::Mov { dst, src } => write!(f, "MOV  {}, {}", dst, src),
            Operation::Or { dst, src } => write!(f, "OR   {}, {}", dst, src),
            Operation::Add { dst, src } => write!(f, "ADD  {}, {}", dst, src),
            Operation::Sub { dst, src } => write!(f, "SUB  {}, {}", dst, src),
            Operation::Adc { dst, src } => write!(f, "ADC  {}, {}", dst, src),
            Operation::Sbb { dst, src } => write!(f, "SBB  {}, {}", dst, src),
            Operation::Xchg { lhs, rhs } => write!(f, "XCHG {}, {}", lhs, rhs),
            Operation::Movi { dst, imm } => write!(f, "MOVI {}, {:#04x}", dst, imm),
            Operation::Xori { dst, imm } => write!(f, "XORI {}, {:#04x}", dst, imm),
            Operation::Addi { dst, imm } => write!(f, "ADDI {}, {:#04x}", dst, imm),
            Operation::Cmpi { lhs, imm } => write!(f, "CMPI {}, {:#04x}", lhs, imm),
            Operation::Rcr { dst } => write!(f, "RCR  {}", dst),
            Operation::Clc => write!(f, "CLC"),
            Operation::Stc => write!(f, "STC"),
            Operation::Jmp { offset } => write!(f, "JMP  {:+}", offset),
            Operation::Jnc { offset } => write!(f, "JNC  {:+}", offset),
            Operation::Jc { offset } => write!(f, "JC   {:+}", offset),
            Operation::Jnz { offset } => write!(f, "JNZ  {:+}", offset),
            Operation::Jz { offset } => write!(f, "JZ   {:+}", offset),
            Operation::Brk => write!(f, "BRK"),
            Operation::Nop => write!(f, "NOP"),
        }
    }
}
