//! IL opcodes understood by the decoder and their operand layouts.

/// Raw opcode numbers from the AMD IL opcode table.
pub mod raw {
    pub const ADD: u16 = 3;
    pub const END: u16 = 35;
    pub const MAD: u16 = 57;
    pub const MOV: u16 = 62;
    pub const MUL: u16 = 63;
    pub const RET_DYN: u16 = 102;
    pub const DCL_LITERAL: u16 = 108;
    pub const DCL_OUTPUT: u16 = 112;
    pub const DCL_INPUT: u16 = 113;
    pub const DCL_RESOURCE: u16 = 115;
    pub const LOAD: u16 = 121;
    pub const DCL_GLOBAL_FLAGS: u16 = 172;
}

/// A decoded opcode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Opcode {
    Add,
    End,
    Mad,
    Mov,
    Mul,
    RetDyn,
    DclLiteral,
    DclOutput,
    DclInput,
    DclResource,
    Load,
    DclGlobalFlags,
    /// Any opcode without a known operand layout.
    Unknown(u16),
}

/// Number of operand and extra tokens that follow an instruction token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperandLayout {
    pub dst_count: usize,
    pub src_count: usize,
    pub extra_count: usize,
    /// Control word carries indexed resource/sampler flags.
    pub indexed_resource_sampler: bool,
}

impl OperandLayout {
    const fn new(dst_count: usize, src_count: usize, extra_count: usize) -> Self {
        Self { dst_count, src_count, extra_count, indexed_resource_sampler: false }
    }

    const fn indexed(mut self) -> Self {
        self.indexed_resource_sampler = true;
        self
    }
}

impl Opcode {
    #[must_use]
    pub const fn from_raw(value: u16) -> Self {
        match value {
            raw::ADD => Self::Add,
            raw::END => Self::End,
            raw::MAD => Self::Mad,
            raw::MOV => Self::Mov,
            raw::MUL => Self::Mul,
            raw::RET_DYN => Self::RetDyn,
            raw::DCL_LITERAL => Self::DclLiteral,
            raw::DCL_OUTPUT => Self::DclOutput,
            raw::DCL_INPUT => Self::DclInput,
            raw::DCL_RESOURCE => Self::DclResource,
            raw::LOAD => Self::Load,
            raw::DCL_GLOBAL_FLAGS => Self::DclGlobalFlags,
            other => Self::Unknown(other),
        }
    }

    #[must_use]
    pub const fn to_raw(self) -> u16 {
        match self {
            Self::Add => raw::ADD,
            Self::End => raw::END,
            Self::Mad => raw::MAD,
            Self::Mov => raw::MOV,
            Self::Mul => raw::MUL,
            Self::RetDyn => raw::RET_DYN,
            Self::DclLiteral => raw::DCL_LITERAL,
            Self::DclOutput => raw::DCL_OUTPUT,
            Self::DclInput => raw::DCL_INPUT,
            Self::DclResource => raw::DCL_RESOURCE,
            Self::Load => raw::LOAD,
            Self::DclGlobalFlags => raw::DCL_GLOBAL_FLAGS,
            Self::Unknown(value) => value,
        }
    }

    /// Operand layout, or `None` for opcodes the decoder cannot size.
    #[must_use]
    pub const fn layout(self) -> Option<OperandLayout> {
        let layout = match self {
            Self::Add | Self::Mul => OperandLayout::new(1, 2, 0),
            Self::End | Self::RetDyn | Self::DclGlobalFlags => OperandLayout::new(0, 0, 0),
            Self::Mad => OperandLayout::new(1, 3, 0),
            Self::Mov => OperandLayout::new(1, 1, 0),
            Self::DclLiteral => OperandLayout::new(0, 1, 4),
            Self::DclOutput | Self::DclInput => OperandLayout::new(1, 0, 0),
            Self::DclResource => OperandLayout::new(0, 0, 1),
            Self::Load => OperandLayout::new(1, 1, 0).indexed(),
            Self::Unknown(_) => return None,
        };
        Some(layout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_values_map_back_to_themselves() {
        for value in 0..=u16::from(u8::MAX) {
            assert_eq!(Opcode::from_raw(value).to_raw(), value);
        }
    }

    #[test]
    fn unknown_opcodes_have_no_layout() {
        assert_eq!(Opcode::from_raw(1), Opcode::Unknown(1));
        assert!(Opcode::Unknown(1).layout().is_none());
    }

    #[test]
    fn layouts_match_operand_counts() {
        let mad = Opcode::Mad.layout();
        assert_eq!(mad.map(|l| (l.dst_count, l.src_count)), Some((1, 3)));

        let literal = Opcode::DclLiteral.layout();
        assert_eq!(literal.map(|l| (l.src_count, l.extra_count)), Some((1, 4)));

        assert!(Opcode::Load.layout().is_some_and(|l| l.indexed_resource_sampler));
        assert!(Opcode::Mov.layout().is_some_and(|l| !l.indexed_resource_sampler));
    }
}
