//! # 消息模块
//!
//! 待隐藏的文本以 8 位字符码序列表示。每个字符的码点必须在 0–255 之内，
//! 并且不能是保留的结束标记 (NUL)。码点 `N` 与 Unicode 字符 `U+00NN` 一一对应。

use crate::constants::TERMINATOR;
use crate::error::{Result, StegoError};
use std::fmt;
use std::str::FromStr;

/// 经过校验、可以被编码器接受的消息。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Message {
    codes: Vec<u8>,
}

impl Message {
    /// 校验并转换文本。
    ///
    /// # Errors
    ///
    /// * 某个字符码点大于 255 时返回 [`StegoError::UnsupportedCharacter`]。
    /// * 包含 NUL 字符时返回 [`StegoError::ReservedTerminator`]。
    pub fn new(text: &str) -> Result<Self> {
        let codes = text
            .chars()
            .enumerate()
            .map(|(index, ch)| match u8::try_from(ch) {
                Ok(TERMINATOR) => Err(StegoError::ReservedTerminator { index }),
                Ok(code) => Ok(code),
                Err(_) => Err(StegoError::UnsupportedCharacter { ch, index }),
            })
            .collect::<Result<Vec<u8>>>()?;
        Ok(Self { codes })
    }

    /// 由原始字符码构造消息。
    ///
    /// # Errors
    ///
    /// 包含 0 时返回 [`StegoError::ReservedTerminator`]。
    pub fn from_codes(codes: Vec<u8>) -> Result<Self> {
        if let Some(index) = codes.iter().position(|&c| c == TERMINATOR) {
            return Err(StegoError::ReservedTerminator { index });
        }
        Ok(Self { codes })
    }

    /// 调用方需保证 `codes` 不含结束标记。
    pub(crate) fn from_codes_unchecked(codes: Vec<u8>) -> Self {
        debug_assert!(!codes.contains(&TERMINATOR));
        Self { codes }
    }

    pub fn codes(&self) -> &[u8] {
        &self.codes
    }

    /// 字符数 (不含结束标记)。
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    pub fn to_text(&self) -> String {
        self.codes.iter().map(|&c| char::from(c)).collect()
    }
}

impl FromStr for Message {
    type Err = StegoError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl TryFrom<&str> for Message {
    type Error = StegoError;

    fn try_from(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}
