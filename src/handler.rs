//! # 命令处理逻辑模块
//!
//! 包含处理 `hide`、`recover` 和 `capacity` 子命令的高级业务逻辑。
//! 本模块负责协调文件 I/O、决定输出路径、调用核心隐写算法以及向用户报告结果。

use crate::capacity::{self, max_message_len};
use crate::cli::{CapacityArgs, HideArgs, RecoverArgs};
use crate::constants::{HIDDEN_IMAGE_PREFIX, OUTPUT_EXTENSION, RECOVERED_TEXT_PREFIX};
use crate::error::StegoError;
use crate::grid::PixelGrid;
use crate::message::Message;
use crate::steganography::{decode_with_status, encode};
use anyhow::{Context, Result, anyhow, bail};
use colored::Colorize;
use image::ImageFormat;
use std::fs;
use std::path::{Path, PathBuf};

/// 处理 'Hide' 命令的执行逻辑。
///
/// 负责读取图像和文本、校验消息、检查隐写空间是否足够、调用编码器，
/// 最后将结果以 PNG 格式写入目标文件。
///
/// # Arguments
///
/// * `args` - 包含输入/输出路径的 `HideArgs` 结构体。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 目标文件已存在且未指定 `--force`。
/// * 无法读取输入的图像或文本文件。
/// * 消息为空，或包含无法用单字节表示的字符。
/// * 图像没有足够的空间来隐藏文本。
/// * 无法写入到目标图像文件。
pub fn handle_hide(args: HideArgs) -> Result<()> {
    let dest = hidden_image_path(&args.image, args.dest.as_deref());
    ensure_writable(&dest, args.force)?;

    let raw_text = match (&args.text, &args.message) {
        (Some(path), _) => fs::read_to_string(path).with_context(|| {
            format!(
                "Unable to read text file: {}",
                path.to_string_lossy().red().bold()
            )
        })?,
        (None, Some(message)) => message.clone(),
        (None, None) => bail!("Please provide the text to hide with --text or --message."),
    };

    let text = raw_text.trim();
    anyhow::ensure!(!text.is_empty(), "The message to hide is empty.");

    let message = Message::new(text).context(
        "The message can only contain characters whose code point fits in one byte (Latin-1).",
    )?;

    let picture = image::open(&args.image).with_context(|| {
        format!(
            "Unable to read image file: {}",
            args.image.to_string_lossy().red().bold()
        )
    })?;
    let grid = PixelGrid::from(&picture);
    log::debug!(
        "Loaded {}x{} image ({} pixels)",
        grid.width(),
        grid.height(),
        grid.len()
    );

    let encoded = encode(&grid, &message).map_err(|err| match err {
        StegoError::Capacity { needed, available } => anyhow!(
            "Not enough space in the image to hide the text. \nRequired: {} pixels, Available: {} pixels",
            needed.to_string().red().bold(),
            available.to_string().green().bold()
        ),
        other => anyhow::Error::new(other),
    })?;

    encoded
        .into_rgb_image()
        .save_with_format(&dest, ImageFormat::Png)
        .with_context(|| {
            format!(
                "Unable to write to target image file: {}",
                dest.to_string_lossy().red().bold()
            )
        })?;

    log::info!(
        "Hid {} characters in {}",
        message.len(),
        dest.to_string_lossy()
    );
    println!(
        "The text has been successfully hidden and saved: {}",
        dest.to_string_lossy().green().bold()
    );

    Ok(())
}

/// 处理 'Recover' 命令的执行逻辑。
///
/// 负责读取经过隐写的图像、调用解码器，并将恢复的文本写入目标文本文件。
///
/// # Arguments
///
/// * `args` - 包含输入/输出路径的 `RecoverArgs` 结构体。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 目标文件已存在且未指定 `--force`。
/// * 无法读取输入的图像文件。
/// * 图像中没有隐藏消息，或在 `--strict` 模式下消息被截断。
/// * 无法写入到目标文本文件。
pub fn handle_recover(args: RecoverArgs) -> Result<()> {
    let dest = recovered_text_path(&args.image, args.text.as_deref());
    ensure_writable(&dest, args.force)?;

    let picture = image::open(&args.image).with_context(|| {
        format!(
            "Unable to read image file: {}",
            args.image.to_string_lossy().red().bold()
        )
    })?;
    let grid = PixelGrid::from(&picture);

    let decoded = decode_with_status(&grid)?;
    let message = if args.strict {
        decoded.into_strict()?
    } else {
        if !decoded.terminated {
            log::warn!(
                "No terminator found in {}; the recovered text may be truncated",
                args.image.to_string_lossy()
            );
        }
        decoded.message
    };

    if message.is_empty() {
        log::warn!("The hidden message is empty");
    }

    let text = message.to_text();
    fs::write(&dest, &text).with_context(|| {
        format!(
            "Unable to write to target text file: {}",
            dest.to_string_lossy().red().bold()
        )
    })?;

    if args.print {
        println!("{text}");
    }

    log::info!(
        "Recovered {} characters from {}",
        message.len(),
        args.image.to_string_lossy()
    );
    println!(
        "The text has been successfully recovered and saved: {}",
        dest.to_string_lossy().green().bold()
    );
    Ok(())
}

/// 处理 'Capacity' 命令的执行逻辑。
///
/// # Errors
///
/// 无法读取输入图像时返回错误。
pub fn handle_capacity(args: CapacityArgs) -> Result<()> {
    let picture = image::open(&args.image).with_context(|| {
        format!(
            "Unable to read image file: {}",
            args.image.to_string_lossy().red().bold()
        )
    })?;

    let (width, height) = (picture.width(), picture.height());
    let max_chars = max_message_len(width, height);

    println!(
        "{}: {}x{} ({} pixels)",
        args.image.to_string_lossy().bold(),
        width,
        height,
        (width as usize * height as usize).to_string().green()
    );
    println!(
        "Can hide up to {} characters ({} pixels per character plus a terminator).",
        max_chars.to_string().green().bold(),
        capacity::required_pixels(0)
    );
    Ok(())
}

/// 隐写图像的输出路径。
///
/// 未指定时为输入图像旁的 `doctored_<文件名>.png`；
/// 指定的路径扩展名不是 `.png` 时会追加 `.png`，因为结果总是以 PNG 保存。
pub fn hidden_image_path(image: &Path, dest: Option<&Path>) -> PathBuf {
    match dest {
        Some(dest) if has_png_extension(dest) => dest.to_path_buf(),
        Some(dest) => {
            let mut fixed = dest.as_os_str().to_owned();
            fixed.push(".");
            fixed.push(OUTPUT_EXTENSION);
            let fixed = PathBuf::from(fixed);
            log::warn!(
                "Output is always saved as PNG; writing to {}",
                fixed.to_string_lossy()
            );
            fixed
        }
        None => sibling_path(image, HIDDEN_IMAGE_PREFIX, OUTPUT_EXTENSION),
    }
}

/// 恢复文本的输出路径，未指定时为图像旁的 `recovered_<文件名>.txt`。
pub fn recovered_text_path(image: &Path, text: Option<&Path>) -> PathBuf {
    text.map(Path::to_path_buf)
        .unwrap_or_else(|| sibling_path(image, RECOVERED_TEXT_PREFIX, "txt"))
}

fn sibling_path(image: &Path, prefix: &str, extension: &str) -> PathBuf {
    let stem = image
        .file_stem()
        .map(|s| s.to_string_lossy())
        .unwrap_or_default();
    image.with_file_name(format!("{prefix}{stem}.{extension}"))
}

fn has_png_extension(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case(OUTPUT_EXTENSION))
}

fn ensure_writable(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!(
            "Output file already exists: {}. \nUse --force to overwrite it.",
            path.to_string_lossy().red().bold()
        );
    }
    Ok(())
}
