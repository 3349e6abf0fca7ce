mod codegen;
pub mod dump;
pub mod lexer;

pub use codegen::{compile, Codegen, CompileError};
pub use lexer::{Lexer, Token, TokenKind};
