/// Shorten a token for display and logs, keeping the prefix and the last few characters
pub fn mask_token(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    let len = chars.len();
    if len <= 15 {
        // Too short to safely show, just show dots
        return "*".repeat(len);
    }

    let first: String = chars[..7].iter().collect();
    let last: String = chars[len - 6..].iter().collect();
    format!("{first}...{last}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_long_token() {
        let token = format!("sk-{}", "abcd".repeat(12));
        assert_eq!(mask_token(&token), "sk-abcd...cdabcd");
    }

    #[test]
    fn test_mask_short_token() {
        assert_eq!(mask_token("sk-short"), "********");
        assert_eq!(mask_token(""), "");
    }
}
