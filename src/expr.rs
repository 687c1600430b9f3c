use std::sync::atomic::{AtomicUsize, Ordering};

use crate::token::Token;

/// Identity of a resolvable expression node.
///
/// The resolver keys its depth side-table on node identity rather than
/// structure (two syntactically identical `x` reads can resolve to different
/// bindings), so the parser stamps every `Variable`, `Assign`, and `This`
/// node with a unique id at construction.
pub type ExprId = usize;

static NEXT_ID: AtomicUsize = AtomicUsize::new(0);

/// Hand out a process-unique id. Ids must stay unique across parses: a REPL
/// session keeps closures (and their resolved depths) alive from earlier
/// lines, so a reused id would corrupt the side-table.
pub fn fresh_id() -> ExprId {
    NEXT_ID.fetch_add(1, Ordering::Relaxed)
}

#[derive(Debug, Clone)]
pub enum Expr {
    /// A literal token: NUMBER, STRING, `true`, `false`, or `nil`.
    Literal(Token),

    Unary {
        operator: Token,
        right: Box<Expr>,
    },

    Binary {
        left: Box<Expr>,
        operator: Token,
        right: Box<Expr>,
    },

    /// Short-circuiting `and` / `or`.
    Logical {
        left: Box<Expr>,
        operator: Token,
        right: Box<Expr>,
    },

    Grouping(Box<Expr>),

    Variable {
        id: ExprId,
        name: Token,
    },

    Assign {
        id: ExprId,
        name: Token,
        value: Box<Expr>,
    },

    Call {
        callee: Box<Expr>,
        /// Closing parenthesis, kept for error reporting at the call site.
        paren: Token,
        arguments: Vec<Expr>,
    },

    /// Property read: `object.name`.
    Get {
        object: Box<Expr>,
        name: Token,
    },

    /// Property write: `object.name = value`.
    Set {
        object: Box<Expr>,
        name: Token,
        value: Box<Expr>,
    },

    This {
        id: ExprId,
        keyword: Token,
    },
}
