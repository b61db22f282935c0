// cli.rs — 命令行接口定义模块
// 使用 clap 的 derive 模式；三个必填参数都按字符串接收，交给 validate 模块校验

use clap::Parser;
use std::path::PathBuf;

/// 下载 Smashing Magazine 每月的桌面壁纸日历
///
/// 用法示例:
///   smashwall -r 1920x1080 -y 2024 -m 5
///   smashwall --resolution 2560x1440 --year 2023 --month 12 -o ~/Pictures
#[derive(Parser, Debug)]
#[command(name = "smashwall")]
#[command(version)]
pub struct Cli {
    /// Resolution, example: 1920x1080
    #[arg(short, long)]
    pub resolution: String,

    /// Year between 2011 and the current year
    #[arg(short, long)]
    pub year: String,

    /// Month, number format, example: 12
    #[arg(short, long)]
    pub month: String,

    /// Directory under which Wallpaper_<month>_<year> is created
    /// (default: the directory of this executable)
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Path to a TOML config file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}
