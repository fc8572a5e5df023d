//! 隐写核心的错误类型

use thiserror::Error;

/// 编码、解码与消息校验过程中可能出现的错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StegoError {
    #[error(
        "Not enough space in the image to hide the text. Required: {needed} pixels, Available: {available} pixels"
    )]
    Capacity { needed: usize, available: usize },

    #[error("No hidden message found in this image")]
    NoMessageFound,

    #[error(
        "Hidden message is truncated: the image ended after {recovered} characters without a terminator"
    )]
    TruncatedMessage { recovered: usize },

    #[error("Character {ch:?} at position {index} cannot be represented as a single byte")]
    UnsupportedCharacter { ch: char, index: usize },

    #[error("The message contains a NUL character at position {index}, which is reserved as the terminator")]
    ReservedTerminator { index: usize },

    #[error("Pixel buffer of length {len} does not match a {width}x{height} image")]
    GridSize { width: u32, height: u32, len: usize },
}

/// 隐写核心操作的 Result 类型
pub type Result<T> = std::result::Result<T, StegoError>;
