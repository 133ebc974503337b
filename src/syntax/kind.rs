//! Node kinds, child roles and the expression precedence table

use serde::{Deserialize, Serialize};
use std::fmt;

/// Closed vocabulary of syntax node types.
///
/// Statement kinds and expression kinds share one enum so that every rewrite
/// rule is an exhaustive `match` over the same type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    // Statements
    Script,
    Block,
    Semicolon,
    If,
    Return,
    Throw,
    Try,
    Catch,
    While,
    DoWhile,
    For,
    ForIn,
    Var,
    Break,
    Continue,

    // Primary expressions
    Function,
    Identifier,
    Number,
    String,
    Regexp,
    True,
    False,
    Null,
    This,
    ArrayInit,
    ObjectInit,
    PropertyInit,

    // Member access and invocation
    Call,
    New,
    NewWithArgs,
    List,
    Dot,
    Index,

    // Operators
    Comma,
    Assign,
    Hook,
    Or,
    And,
    BitwiseOr,
    BitwiseXor,
    BitwiseAnd,
    Eq,
    Ne,
    StrictEq,
    StrictNe,
    Lt,
    Le,
    Ge,
    Gt,
    In,
    Instanceof,
    Lsh,
    Rsh,
    Ursh,
    Plus,
    Minus,
    Mul,
    Div,
    Mod,
    Not,
    BitwiseNot,
    UnaryPlus,
    UnaryMinus,
    Typeof,
    Void,
    Delete,
    Increment,
    Decrement,
    PostIncrement,
    PostDecrement,
}

/// Binding strength of expression kinds, weakest first.
pub mod prec {
    pub const COMMA: u8 = 1;
    pub const ASSIGN: u8 = 2;
    pub const HOOK: u8 = 3;
    pub const OR: u8 = 4;
    pub const AND: u8 = 5;
    pub const BITWISE_OR: u8 = 6;
    pub const BITWISE_XOR: u8 = 7;
    pub const BITWISE_AND: u8 = 8;
    pub const EQUALITY: u8 = 9;
    pub const RELATIONAL: u8 = 10;
    pub const SHIFT: u8 = 11;
    pub const ADDITIVE: u8 = 12;
    pub const MULTIPLICATIVE: u8 = 13;
    pub const UNARY: u8 = 14;
    pub const POSTFIX: u8 = 15;
    pub const NEW: u8 = 16;
    pub const MEMBER: u8 = 17;
    pub const PRIMARY: u8 = 18;
}

impl NodeKind {
    /// Precedence of an expression kind, `None` for statements and for
    /// helper nodes (`List`, `PropertyInit`) that never stand alone.
    pub fn precedence(self) -> Option<u8> {
        use NodeKind::*;
        let level = match self {
            Comma => prec::COMMA,
            Assign => prec::ASSIGN,
            Hook => prec::HOOK,
            Or => prec::OR,
            And => prec::AND,
            BitwiseOr => prec::BITWISE_OR,
            BitwiseXor => prec::BITWISE_XOR,
            BitwiseAnd => prec::BITWISE_AND,
            Eq | Ne | StrictEq | StrictNe => prec::EQUALITY,
            Lt | Le | Ge | Gt | In | Instanceof => prec::RELATIONAL,
            Lsh | Rsh | Ursh => prec::SHIFT,
            Plus | Minus => prec::ADDITIVE,
            Mul | Div | Mod => prec::MULTIPLICATIVE,
            Not | BitwiseNot | UnaryPlus | UnaryMinus | Typeof | Void | Delete | Increment
            | Decrement => prec::UNARY,
            PostIncrement | PostDecrement => prec::POSTFIX,
            New => prec::NEW,
            NewWithArgs | Call | Dot | Index => prec::MEMBER,
            Function | Identifier | Number | String | Regexp | True | False | Null | This
            | ArrayInit | ObjectInit => prec::PRIMARY,
            Script | Block | Semicolon | If | Return | Throw | Try | Catch | While | DoWhile
            | For | ForIn | Var | Break | Continue | List | PropertyInit => return None,
        };
        Some(level)
    }

    /// Whether this kind belongs to the expression category whose
    /// parenthesization is recomputed by the optimizer.
    pub fn is_expression(self) -> bool {
        self.precedence().is_some()
    }

    /// Left-associative binary operators (`a - b - c` is `(a - b) - c`).
    pub fn is_left_assoc_binary(self) -> bool {
        use NodeKind::*;
        matches!(
            self,
            Or | And
                | BitwiseOr
                | BitwiseXor
                | BitwiseAnd
                | Eq
                | Ne
                | StrictEq
                | StrictNe
                | Lt
                | Le
                | Ge
                | Gt
                | In
                | Instanceof
                | Lsh
                | Rsh
                | Ursh
                | Plus
                | Minus
                | Mul
                | Div
                | Mod
        )
    }

    /// Prefix unary operators.
    pub fn is_unary(self) -> bool {
        use NodeKind::*;
        matches!(
            self,
            Not | BitwiseNot
                | UnaryPlus
                | UnaryMinus
                | Typeof
                | Void
                | Delete
                | Increment
                | Decrement
        )
    }

    /// Statements that end control flow of the enclosing block.
    pub fn is_terminator(self) -> bool {
        matches!(self, NodeKind::Return | NodeKind::Throw)
    }

    /// Containers whose children form a statement list.
    pub fn is_statement_list(self) -> bool {
        matches!(self, NodeKind::Block | NodeKind::Script)
    }

    /// Source-level operator token for operator kinds.
    pub fn operator(self) -> Option<&'static str> {
        use NodeKind::*;
        let op = match self {
            Comma => ",",
            Assign => "=",
            Or => "||",
            And => "&&",
            BitwiseOr => "|",
            BitwiseXor => "^",
            BitwiseAnd => "&",
            Eq => "==",
            Ne => "!=",
            StrictEq => "===",
            StrictNe => "!==",
            Lt => "<",
            Le => "<=",
            Ge => ">=",
            Gt => ">",
            In => "in",
            Instanceof => "instanceof",
            Lsh => "<<",
            Rsh => ">>",
            Ursh => ">>>",
            Plus | UnaryPlus => "+",
            Minus | UnaryMinus => "-",
            Mul => "*",
            Div => "/",
            Mod => "%",
            Not => "!",
            BitwiseNot => "~",
            Typeof => "typeof",
            Void => "void",
            Delete => "delete",
            Increment | PostIncrement => "++",
            Decrement | PostDecrement => "--",
            _ => return None,
        };
        Some(op)
    }
}

impl fmt::Display for NodeKind {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        // serde 的 snake_case 名称即节点类型名
        let name = serde_json::to_value(self)
            .ok()
            .and_then(|v| v.as_str().map(str::to_owned))
            .unwrap_or_else(|| format!("{:?}", self));
        f.write_str(&name)
    }
}

/// Named slot a child occupies inside its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Role {
    Condition,
    ThenPart,
    ElsePart,
    Expression,
    Value,
    Exception,
    Body,
    Setup,
    Update,
    Iterator,
    Object,
    Initializer,
    Param,
    TryBlock,
    FinallyBlock,
}

impl fmt::Display for Role {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let name = match self {
            Role::Condition => "condition",
            Role::ThenPart => "thenPart",
            Role::ElsePart => "elsePart",
            Role::Expression => "expression",
            Role::Value => "value",
            Role::Exception => "exception",
            Role::Body => "body",
            Role::Setup => "setup",
            Role::Update => "update",
            Role::Iterator => "iterator",
            Role::Object => "object",
            Role::Initializer => "initializer",
            Role::Param => "param",
            Role::TryBlock => "tryBlock",
            Role::FinallyBlock => "finallyBlock",
        };
        f.write_str(name)
    }
}

/// Operator of a compound assignment (`a += b`). Plain `=` carries none.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssignOp {
    Plus,
    Minus,
    Mul,
    Div,
    Mod,
    BitwiseAnd,
    BitwiseOr,
    BitwiseXor,
    Lsh,
    Rsh,
    Ursh,
}

impl AssignOp {
    pub fn as_str(self) -> &'static str {
        match self {
            AssignOp::Plus => "+",
            AssignOp::Minus => "-",
            AssignOp::Mul => "*",
            AssignOp::Div => "/",
            AssignOp::Mod => "%",
            AssignOp::BitwiseAnd => "&",
            AssignOp::BitwiseOr => "|",
            AssignOp::BitwiseXor => "^",
            AssignOp::Lsh => "<<",
            AssignOp::Rsh => ">>",
            AssignOp::Ursh => ">>>",
        }
    }
}
