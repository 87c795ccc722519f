// ==========================================
// 国际化 (i18n) 模块
// ==========================================
// 使用 rust-i18n 库
// 支持匈牙利语（默认数据语言）、英文、中文
// 翻译一律按用户语言显式查找，不修改进程全局语言
// ==========================================
// 注意: rust_i18n::i18n! 宏已在 lib.rs 中初始化
// ==========================================

/// 默认语言
pub const DEFAULT_LOCALE: &str = "hu";

/// 已提供翻译的语言
pub const SUPPORTED_LOCALES: [&str; 3] = ["hu", "en", "zh-CN"];

/// 是否为已提供翻译的语言
pub fn is_supported(locale: &str) -> bool {
    SUPPORTED_LOCALES.contains(&locale)
}

/// 翻译消息（指定语言）
///
/// # 示例
/// ```no_run
/// use pantry_tracker::i18n::t_in;
/// let msg = t_in("status.expired", "en");
/// ```
pub fn t_in(key: &str, locale: &str) -> String {
    rust_i18n::t!(key, locale = locale).to_string()
}
