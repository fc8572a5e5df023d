//! # 隐写核心模块
//!
//! 编码器把消息与结束标记逐字符写入像素网格的副本，解码器按相同的扫描顺序读回。
//! 两者都是无副作用的纯函数，源网格永远不会被修改。

use crate::capacity;
use crate::codec::{embed_unit, extract_unit};
use crate::constants::{PIXELS_PER_UNIT, TERMINATOR};
use crate::error::{Result, StegoError};
use crate::grid::PixelGrid;
use crate::message::Message;
use std::iter;

/// 将 `message` 隐藏到 `source` 的副本中并返回该副本。
///
/// 前 `3 * (message.len() + 1)` 个像素被改写，其后的像素与源网格逐字节相同。
///
/// # Errors
///
/// 图像像素不足时返回 [`StegoError::Capacity`]，此时不会产生任何修改。
pub fn encode(source: &PixelGrid, message: &Message) -> Result<PixelGrid> {
    capacity::check(source.width(), source.height(), message.len())?;

    let mut output = source.clone();
    let symbols = message.codes().iter().copied().chain(iter::once(TERMINATOR));

    output
        .pixels_mut()
        .chunks_exact_mut(PIXELS_PER_UNIT)
        .zip(symbols)
        .for_each(|(unit, code)| embed_unit(code, unit));

    log::debug!(
        "Embedded {} characters plus terminator into {} of {} pixels",
        message.len(),
        capacity::required_pixels(message.len()),
        source.len()
    );

    Ok(output)
}

/// 解码结果，以及是否真正读到了结束标记。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    pub message: Message,
    pub terminated: bool,
}

impl Decoded {
    /// 未读到结束标记时视为错误。
    ///
    /// # Errors
    ///
    /// 返回 [`StegoError::TruncatedMessage`]，携带已恢复的字符数。
    pub fn into_strict(self) -> Result<Message> {
        if !self.terminated {
            return Err(StegoError::TruncatedMessage {
                recovered: self.message.len(),
            });
        }
        Ok(self.message)
    }
}

/// 从网格中读出隐藏的消息，同时报告是否读到了结束标记。
///
/// 网格在找到结束标记之前耗尽 (剩余不足 3 个像素) 时，返回已累积的部分文本，
/// `terminated` 为 `false`。
///
/// # Errors
///
/// 既没有读到结束标记、也没有累积到任何字符时返回 [`StegoError::NoMessageFound`]。
pub fn decode_with_status(grid: &PixelGrid) -> Result<Decoded> {
    let mut codes = Vec::new();
    let mut terminated = false;

    for unit in grid.pixels().chunks_exact(PIXELS_PER_UNIT) {
        let code = extract_unit(unit);
        if code == TERMINATOR {
            terminated = true;
            break;
        }
        codes.push(code);
    }

    if !terminated && codes.is_empty() {
        return Err(StegoError::NoMessageFound);
    }

    log::debug!(
        "Extracted {} characters, terminator {}",
        codes.len(),
        if terminated { "found" } else { "missing" }
    );

    Ok(Decoded {
        message: Message::from_codes_unchecked(codes),
        terminated,
    })
}

/// 从网格中读出隐藏的消息。
///
/// 截断的消息 (网格耗尽而没有结束标记) 会作为正常结果返回；
/// 需要区分时请使用 [`decode_with_status`]。
///
/// # Errors
///
/// 未找到任何消息时返回 [`StegoError::NoMessageFound`]。
pub fn decode(grid: &PixelGrid) -> Result<Message> {
    decode_with_status(grid).map(|decoded| decoded.message)
}
