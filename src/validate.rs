// validate.rs — 输入校验模块
// 纯函数，不做任何 I/O；任何一个字段不合法都会在联网之前直接返回错误

use crate::error::{Error, Result};
use chrono::Datelike;

/// 列表页上出现过的全部分辨率
pub const VALID_RESOLUTIONS: [&str; 21] = [
    "320x480", "640x480", "800x480", "800x600", "1024x768", "1024x1024", "1152x864", "1280x720",
    "1280x800", "1280x960", "1280x1024", "1400x1050", "1440x900", "1600x1200", "1680x1050",
    "1680x1200", "1920x1080", "1920x1200", "1920x1440", "2560x1440", "3840x2160",
];

/// 最早一期壁纸日历的年份
pub const FIRST_YEAR: i32 = 2011;

/// 校验分辨率、年份和月份，年份上限取本地时钟的当前年份
pub fn validate(resolution: &str, year: &str, month: &str) -> Result<()> {
    validate_at(resolution, year, month, chrono::Local::now().year())
}

/// 与 `validate` 相同，但由调用方给出当前年份
pub fn validate_at(resolution: &str, year: &str, month: &str, current_year: i32) -> Result<()> {
    if !VALID_RESOLUTIONS.contains(&resolution) {
        return Err(Error::invalid_input(
            "resolution",
            format!(
                "Invalid resolution value: {}. Use one of the: {:?}",
                resolution, VALID_RESOLUTIONS
            ),
        ));
    }

    match month.parse::<u32>() {
        Ok(m) if (1..=12).contains(&m) => {}
        _ => {
            return Err(Error::invalid_input(
                "month",
                "Month value is not valid. Use a digit between 1 and 12.",
            ));
        }
    }

    match year.parse::<i32>() {
        Ok(y) if (FIRST_YEAR..=current_year).contains(&y) => {}
        _ => {
            return Err(Error::invalid_input(
                "year",
                "Year value is not valid. Use a digit between 2011 and the current year.",
            ));
        }
    }

    Ok(())
}
