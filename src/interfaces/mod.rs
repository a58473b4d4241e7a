// ============================================================================
// Interfaces Module
// Contains all trait definitions and contracts
// ============================================================================

mod integer;
mod number;
mod operator;
mod overflow_tag;

pub use integer::{used_digits, Integer};
pub use number::Number;
pub use operator::{
    to_floating, AddOp, ArithmeticOperator, BinaryOperator, BitAndOp, BitNotOp,
    BitOrOp, BitXorOp, DivideOp, ModuloOp, MultiplyOp, NegateOp, Operator, OperatorKind,
    ShiftLeftOp, ShiftOperator, ShiftRightOp, SubtractOp, UnaryOperator,
};
pub use overflow_tag::{Combine, OverflowEvent, OverflowTag, Polarity, PolicyKind};
