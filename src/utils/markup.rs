//! 题干标记处理工具
//!
//! 题干是 HTML 标记文本，日志展示时去掉标签，
//! 判分报告和图片核对时提取内嵌图片URL。

use regex::Regex;

/// 去除 HTML 标签，保留纯文本
pub fn strip_tags(markup: &str) -> String {
    if let Ok(re) = Regex::new(r"<[^>]+>") {
        re.replace_all(markup, "").trim().to_string()
    } else {
        markup.to_string()
    }
}

/// 提取标记中内嵌的图片URL
pub fn extract_image_urls(markup: &str) -> Vec<String> {
    let mut urls = Vec::new();
    if let Ok(re) = Regex::new(r#"<img\s+[^>]*src="([^"]+)""#) {
        for captures in re.captures_iter(markup) {
            if let Some(url) = captures.get(1) {
                urls.push(url.as_str().to_string());
            }
        }
    }
    urls
}
