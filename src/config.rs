// config.rs — 配置管理模块
// 可选的 TOML 配置文件：默认位于 $XDG_CONFIG_HOME/smashwall/config.toml
// 优先级：命令行 > 环境变量 > 配置文件 > 内置默认值

use crate::error::{Error, Result};
use crate::listing::DEFAULT_BASE_URL;
use serde::Deserialize;
use shellexpand::tilde;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// 覆盖壁纸保存根目录的环境变量
pub const BASE_DIR_ENV: &str = "SMASHWALL_BASE_DIR";

/// 展开路径中的 ~ （相对路径相对于 $HOME）
fn expand_path(path_str: &str) -> PathBuf {
    let p = PathBuf::from(tilde(path_str).into_owned());
    if p.is_absolute() {
        return p;
    }
    match env::var_os("HOME") {
        Some(home) => PathBuf::from(home).join(p),
        None => p,
    }
}

/// 映射 config.toml 文件内容的结构体
#[derive(Debug, Deserialize, Default)]
struct ConfigFile {
    #[serde(default)]
    common: CommonConfig,
    #[serde(default)]
    download: DownloadConfig,
}

#[derive(Debug, Deserialize, Default)]
struct CommonConfig {
    /// 壁纸保存根目录，每次运行会在其下创建 Wallpaper_<month>_<year>
    base_dir: Option<String>,
    /// 列表页站点地址，以 / 结尾
    base_url: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
struct DownloadConfig {
    /// 同时进行的下载数上限，不配置则不限制
    max_concurrent: Option<usize>,
    /// 是否跳过证书校验，默认跳过
    accept_invalid_certs: Option<bool>,
    user_agent: Option<String>,
}

/// 下载阶段用到的设置
#[derive(Debug, Clone, PartialEq)]
pub struct DownloadSettings {
    pub max_concurrent: Option<usize>,
    pub accept_invalid_certs: bool,
    pub user_agent: String,
}

impl Default for DownloadSettings {
    fn default() -> Self {
        Self {
            max_concurrent: None,
            accept_invalid_certs: true,
            user_agent: default_user_agent(),
        }
    }
}

fn default_user_agent() -> String {
    format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
}

/// 应用配置
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// 壁纸保存根目录
    pub base_dir: PathBuf,
    /// 列表页站点地址
    pub base_url: String,
    pub download: DownloadSettings,
}

impl AppConfig {
    /// 加载配置
    ///
    /// `config_path` 为命令行显式指定的配置文件，指定了就必须能读取；
    /// 未指定时查找 XDG 配置目录，找不到就用默认值。
    /// `output_dir` 为命令行给出的保存目录，优先级最高。
    pub fn load(config_path: Option<&Path>, output_dir: Option<&Path>) -> Result<Self> {
        let file = match config_path {
            Some(path) => Self::load_config_from_file(path)?,
            None => match default_config_path() {
                Some(path) => Self::load_config_from_file(&path)?,
                None => ConfigFile::default(),
            },
        };

        Ok(Self::from_parts(file, env::var(BASE_DIR_ENV).ok(), output_dir))
    }

    /// 合并各层来源
    fn from_parts(
        file: ConfigFile,
        env_base_dir: Option<String>,
        output_dir: Option<&Path>,
    ) -> Self {
        let base_dir = if let Some(dir) = output_dir {
            dir.to_path_buf()
        } else if let Some(dir) = env_base_dir.filter(|d| !d.is_empty()) {
            expand_path(&dir)
        } else if let Some(dir) = file.common.base_dir {
            expand_path(&dir)
        } else {
            install_dir()
        };

        let mut base_url = file
            .common
            .base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        if !base_url.ends_with('/') {
            base_url.push('/');
        }

        let defaults = DownloadSettings::default();
        let download = DownloadSettings {
            max_concurrent: file.download.max_concurrent.filter(|n| *n > 0),
            accept_invalid_certs: file
                .download
                .accept_invalid_certs
                .unwrap_or(defaults.accept_invalid_certs),
            user_agent: file.download.user_agent.unwrap_or(defaults.user_agent),
        };

        Self {
            base_dir,
            base_url,
            download,
        }
    }

    /// 解析 TOML 配置文件
    fn load_config_from_file(path: &Path) -> Result<ConfigFile> {
        let content = fs::read_to_string(path).map_err(|e| Error::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        toml::from_str(&content).map_err(|e| Error::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// 本次运行的保存目录：<base_dir>/Wallpaper_<month>_<year>
    pub fn destination(&self, year: &str, month: &str) -> PathBuf {
        self.base_dir.join(format!("Wallpaper_{}_{}", month, year))
    }
}

/// XDG 配置目录下已存在的 config.toml
fn default_config_path() -> Option<PathBuf> {
    xdg::BaseDirectories::with_prefix("smashwall")
        .ok()
        .and_then(|dirs| dirs.find_config_file("config.toml"))
}

/// 可执行文件所在目录，取不到时退回当前目录
fn install_dir() -> PathBuf {
    env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."))
}
