//! The fixed left-binding-power (LBP) table.

use crate::token::TokenKind;

/// Returns the left binding power of `kind`. Unlisted kinds bind at 0.
pub fn lbp(kind: TokenKind) -> i32 {
    use TokenKind::*;
    match kind {
        End => -10,

        Semi => 0,

        Assign | AddAssign | SubAssign | MulAssign | RemAssign | OrAssign | ShlAssign
        | ShrAssign | Define => 10,

        Land | Lor => 20,

        Eql | Neq | Lss | Gtr | Leq | Geq => 30,

        Add | Sub => 40,

        Mul | Quo | Rem => 50,

        // `Not` only ever appears in prefix position in this grammar; its
        // LBP of 60 is never consulted by the Pratt loop (it has no infix
        // rule), but the table entry is kept for completeness.
        Not => 60,

        Period | LBrack | LParen => 70,

        _ => 0,
    }
}
