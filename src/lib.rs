//! # lsb_parity 库
//!
//! 基于像素奇偶性的 LSB 隐写核心逻辑：每 3 个像素的前 8 个 RGB 通道隐藏一个 8 位字符，
//! 消息以 NUL 结束。核心部分 (`codec`、`capacity`、`steganography`) 不做任何 I/O，
//! 文件读写与用户交互由 `handler` 负责。

// 声明库包含的所有模块。

pub mod capacity;
pub mod cli;
pub mod codec;
pub mod constants;
pub mod error;
pub mod grid;
pub mod handler;
pub mod message;
pub mod steganography;

pub use error::{Result, StegoError};
pub use grid::{Pixel, PixelGrid};
pub use message::Message;
pub use steganography::{Decoded, decode, decode_with_status, encode};
