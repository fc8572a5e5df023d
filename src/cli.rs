//! # 命令行接口模块
//!
//! 使用 `clap` 定义了程序的命令行结构，包括子命令和参数。
//! 所有用户通过命令行与程序交互的入口点都在此模块中定义。

use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;

/// 基于像素奇偶性的 LSB 隐写工具：每 3 个像素隐藏一个字符，结果总是保存为 PNG。
#[derive(Parser, Debug)]
#[command(
    version,
    about,
    long_about = "基于像素奇偶性的 LSB 隐写工具：每 3 个像素的前 8 个 RGB 通道隐藏一个字符，以 NUL 作为结束标记，结果总是保存为无损的 PNG。"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 输出更详细的日志 (-v 为 info, -vv 为 debug)。
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
}

/// 可用的子命令：hide (隐藏)、recover (恢复) 和 capacity (容量)。
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// 在图像中隐藏一段文本。
    Hide(HideArgs),

    /// 从经过隐写的图像中恢复隐藏的文本。
    Recover(RecoverArgs),

    /// 显示图像最多能隐藏多少个字符。
    Capacity(CapacityArgs),
}

/// 'hide' 命令所需的参数。
#[derive(Args, Debug)]
#[command(group(clap::ArgGroup::new("source").required(true).args(["text", "message"])))]
pub struct HideArgs {
    /// 用于隐写的输入图像文件路径。
    #[arg(short, long)]
    pub image: PathBuf,

    /// 要隐藏的文本内容的文件路径。
    #[arg(short, long)]
    pub text: Option<PathBuf>,

    /// 直接在命令行中给出要隐藏的文本。
    #[arg(short, long)]
    pub message: Option<String>,

    /// 结果图像的输出路径，默认为输入图像旁的 `doctored_<文件名>.png`。
    #[arg(short, long)]
    pub dest: Option<PathBuf>,

    /// 输出文件已存在时覆盖它。
    #[arg(short, long)]
    pub force: bool,
}

/// 'recover' 命令所需的参数。
#[derive(Args, Debug)]
pub struct RecoverArgs {
    /// 已隐藏文本数据的图像文件路径。
    #[arg(short, long)]
    pub image: PathBuf,

    /// 恢复文本的输出路径，默认为图像旁的 `recovered_<文件名>.txt`。
    #[arg(short, long)]
    pub text: Option<PathBuf>,

    /// 输出文件已存在时覆盖它。
    #[arg(short, long)]
    pub force: bool,

    /// 同时将恢复的文本打印到标准输出。
    #[arg(short, long)]
    pub print: bool,

    /// 没有读到结束标记 (消息被截断) 时视为错误。
    #[arg(short, long)]
    pub strict: bool,
}

/// 'capacity' 命令所需的参数。
#[derive(Args, Debug)]
pub struct CapacityArgs {
    /// 要检查的图像文件路径。
    #[arg(short, long)]
    pub image: PathBuf,
}
