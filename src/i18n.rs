// ==========================================
// 国际化 (i18n) 模块
// ==========================================
// 使用 rust-i18n 库
// 支持英文（默认）和印地语
// ==========================================
// 注意: rust_i18n::i18n! 宏已在 lib.rs 中初始化
// ==========================================

/// 支持的界面语言
pub const SUPPORTED_LOCALES: [&str; 2] = ["en", "hi"];

pub fn is_supported_locale(locale: &str) -> bool {
    SUPPORTED_LOCALES.contains(&locale)
}

/// 翻译消息（指定语言，带参数）
///
/// 不修改全局语言，供每个请求按自身语言渲染
///
/// # 示例
/// ```no_run
/// use annapurna_agri::i18n::t_in;
/// let msg = t_in("hi", "disease.none_found", &[("crop", "Rice")]);
/// ```
pub fn t_in(locale: &str, key: &str, args: &[(&str, &str)]) -> String {
    let mut result = rust_i18n::t!(key, locale = locale).to_string();
    for (k, v) in args {
        let placeholder = format!("%{{{}}}", k);
        result = result.replace(&placeholder, v);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translate_in_explicit_locale() {
        let msg = t_in("en", "variety.none_found", &[]);
        assert_eq!(msg, "No variety data found for this selection.");

        let msg = t_in("hi", "variety.none_found", &[]);
        assert!(msg.contains("किस्म"));
    }

    #[test]
    fn test_translate_with_args() {
        let msg = t_in("en", "disease.none_found", &[("crop", "Barley")]);
        assert_eq!(msg, "No active disease threats logged for Barley.");

        let msg = t_in("hi", "disease.none_found", &[("crop", "Barley")]);
        assert!(msg.contains("Barley"));
    }

    #[test]
    fn test_supported_locales() {
        assert!(is_supported_locale("en"));
        assert!(is_supported_locale("hi"));
        assert!(!is_supported_locale("zh-CN"));
    }
}
