/// 由品牌名推测域名：小写、去掉 `[a-z0-9-]` 以外的所有字符（包括空白），
/// 再加上 `www.` 前缀和 `.com` 后缀。
///
/// 这只是一个启发式的猜测，不做任何解析校验，结果不能当作权威域名使用。
/// 非 ASCII 字符会被直接丢弃，名称全部由此类字符组成时结果为 `www..com`。
pub fn normalize_domain(brand_name: &str) -> String {
    let slug: String = brand_name
        .chars()
        .flat_map(char::to_lowercase)
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '-')
        .collect();
    format!("www.{}.com", slug)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_normalization() {
        assert_eq!(normalize_domain("Acme Corp"), "www.acmecorp.com");
        assert_eq!(normalize_domain("Globex"), "www.globex.com");
    }

    #[test]
    fn test_strips_punctuation_and_whitespace() {
        assert_eq!(normalize_domain("Ben & Jerry's"), "www.benjerrys.com");
        assert_eq!(normalize_domain("  Coca-Cola\tCompany "), "www.coca-colacompany.com");
        assert_eq!(normalize_domain("7-Eleven, Inc."), "www.7-eleveninc.com");
    }

    #[test]
    fn test_non_ascii_is_dropped() {
        assert_eq!(normalize_domain("Nestlé"), "www.nestl.com");
        assert_eq!(normalize_domain("株式会社"), "www..com");
    }

    #[test]
    fn test_is_deterministic() {
        let name = "Wayne Enterprises";
        assert_eq!(normalize_domain(name), normalize_domain(name));
    }
}
