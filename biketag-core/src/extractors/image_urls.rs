//! Markdown image link extraction

/// Hosts accepted as tag images
const ALLOWED_IMAGE_HOSTS: &[&str] = &["imgur"];

text_pattern!(
    IMAGE_LINK_PATTERN,
    r"(?i)\]\((https?://.*?\.[a-z]{2,4}/[^\s)]*)"
);

/// URLs of `[label](url)` links pointing at an allowed image host
pub fn parse_image_urls(text: &str) -> Vec<String> {
    let Some(pattern) = IMAGE_LINK_PATTERN.as_ref() else {
        return Vec::new();
    };

    pattern
        .captures_iter(text)
        .filter_map(|captures| captures.get(1))
        .map(|url| url.as_str())
        .filter(|url| ALLOWED_IMAGE_HOSTS.iter().any(|host| url.contains(host)))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markdown_links_in_order() {
        let text = "[#5 tag](https://i.imgur.com/abc.jpg) and [#4 proof](https://i.imgur.com/def.png)";
        assert_eq!(
            parse_image_urls(text),
            vec!["https://i.imgur.com/abc.jpg", "https://i.imgur.com/def.png"]
        );
    }

    #[test]
    fn test_other_hosts_filtered() {
        let text = "[x](https://example.com/a.jpg) [y](https://imgur.com/a/xyz)";
        assert_eq!(parse_image_urls(text), vec!["https://imgur.com/a/xyz"]);
    }

    #[test]
    fn test_bare_urls_ignored() {
        assert!(parse_image_urls("see https://i.imgur.com/abc.jpg").is_empty());
        assert!(parse_image_urls("").is_empty());
    }
}
