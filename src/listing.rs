// listing.rs — 壁纸列表页模块
// 负责拼出某月壁纸日历的列表页地址，并从页面中抓出指定分辨率的下载链接

use crate::error::{Error, Result};
use scraper::{Html, Selector}; // HTML 解析与 CSS 选择器
use tracing::debug;

/// 默认的列表页站点
pub const DEFAULT_BASE_URL: &str = "https://www.smashingmagazine.com/";

/// 两位月份到英文月份名的映射
const MONTH_NAMES: [(&str, &str); 12] = [
    ("01", "january"),
    ("02", "february"),
    ("03", "march"),
    ("04", "april"),
    ("05", "may"),
    ("06", "june"),
    ("07", "july"),
    ("08", "august"),
    ("09", "september"),
    ("10", "october"),
    ("11", "november"),
    ("12", "december"),
];

/// 查月份名，month 必须是两位数字形式
fn month_name(month: &str) -> Option<&'static str> {
    // find() 返回第一个满足条件的元素，map() 只取出月份名
    MONTH_NAMES
        .iter()
        .find(|(num, _)| *num == month)
        .map(|(_, name)| *name)
}

/// 计算列表页地址
///
/// 某月的壁纸总是在前一个月发布：一月的壁纸在上一年十二月的目录下，
/// 其余月份在同一年的上一个月目录下。路径里的月份名取发布月份，年份取请求的年份。
///
/// ```text
/// build_url(base, "2024", "05")
///   => <base>2024/04/desktop-wallpaper-calendars-april-2024/
/// ```
pub fn build_url(base: &str, year: &str, month: &str) -> Result<String> {
    // {:0>2} 表示右对齐、宽度 2、左侧补 0，即 "5" -> "05"
    let month = format!("{:0>2}", month);
    if month_name(&month).is_none() {
        return Err(Error::invalid_input(
            "month",
            format!("Month value is not valid: {}", month),
        ));
    }

    // 计算发布年月：一月回退到上一年十二月
    let (pub_year, pub_month) = if month == "01" {
        let year: i32 = year.parse().map_err(|_| {
            Error::invalid_input("year", format!("Year value is not valid: {}", year))
        })?;
        ((year - 1).to_string(), "12".to_string())
    } else {
        // 走到这里 month 一定是 02..=12
        let m: u32 = month.parse().map_err(|_| {
            Error::invalid_input("month", format!("Month value is not valid: {}", month))
        })?;
        (year.to_string(), format!("{:02}", m - 1))
    };

    // 路径中的月份名跟随发布月份
    let name = month_name(&pub_month).ok_or_else(|| {
        Error::invalid_input("month", format!("Month value is not valid: {}", pub_month))
    })?;

    Ok(format!(
        "{}{}/{}/desktop-wallpaper-calendars-{}-{}/",
        base, pub_year, pub_month, name, year
    ))
}

/// 下载列表页并返回匹配分辨率的链接
///
/// 非 2xx 状态码和网络错误都会变成 `Error::Fetch`，不做重试。
pub async fn get_links(
    client: &reqwest::Client,
    url: &str,
    resolution: &str,
) -> Result<Vec<String>> {
    debug!(url, "fetching listing page");

    // error_for_status() 把 4xx/5xx 响应转为错误
    let html = client
        .get(url)
        .send()
        .await
        .and_then(|response| response.error_for_status())
        .map_err(Error::Fetch)?
        .text()
        .await
        .map_err(Error::Fetch)?;

    let links = extract_links(&html, resolution);
    debug!(count = links.len(), "links matched {}", resolution);
    Ok(links)
}

/// 从 HTML 中挑出文本包含 `resolution` 的 `<a>`，按文档顺序返回它们的 href
///
/// 只做子串匹配，重复链接原样保留，没有 href 的锚点会被跳过。
pub fn extract_links(html: &str, resolution: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    let anchors = Selector::parse("a").expect("valid anchor selector");

    document
        .select(&anchors)
        // text() 遍历元素内所有文本节点，拼起来就是锚点的可见文字
        .filter(|a| a.text().collect::<String>().contains(resolution))
        // attr() 返回 Option<&str>，filter_map 顺便丢掉没有 href 的锚点
        .filter_map(|a| a.value().attr("href"))
        .map(str::to_string)
        .collect()
}
