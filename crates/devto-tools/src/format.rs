//! Pure formatters turning API payloads into Markdown text.
//!
//! These are total over sparse payloads: every field falls back to a
//! display default, and empty collections yield a sentinel line instead of
//! empty output.

use devto_core::{Article, User};

use crate::DISPLAY_LIMIT;

const NO_ARTICLES: &str = "No articles found.";
const NO_ARTICLE: &str = "Article not found.";
const UNTITLED: &str = "Untitled";
const UNKNOWN_AUTHOR: &str = "Unknown Author";
const UNKNOWN_DATE: &str = "Unknown date";
const NO_DESCRIPTION: &str = "No description available.";
const NO_CONTENT: &str = "No content available.";

fn author_name(article: &Article) -> &str {
    article
        .user
        .as_ref()
        .and_then(|u| u.name.as_deref())
        .unwrap_or(UNKNOWN_AUTHOR)
}

fn tags_line(article: &Article) -> String {
    article
        .tags
        .as_ref()
        .map(|t| t.to_string())
        .unwrap_or_default()
}

/// Render a list of articles, capped at `DISPLAY_LIMIT` entries.
pub fn format_articles(articles: &[Article]) -> String {
    if articles.is_empty() {
        return NO_ARTICLES.to_string();
    }

    let mut result = String::from("# Dev.to Articles\n\n");
    for article in articles.iter().take(DISPLAY_LIMIT) {
        let title = article.title.as_deref().unwrap_or(UNTITLED);
        let id = article.id.map(|i| i.to_string()).unwrap_or_default();
        let published = article
            .readable_publish_date
            .as_deref()
            .unwrap_or(UNKNOWN_DATE);
        let description = article.description.as_deref().unwrap_or(NO_DESCRIPTION);

        result.push_str(&format!("## {title}\n"));
        result.push_str(&format!("ID: {id}\n"));
        result.push_str(&format!("Author: {}\n", author_name(article)));
        result.push_str(&format!("Published: {published}\n"));
        result.push_str(&format!("Tags: {}\n", tags_line(article)));
        result.push_str(&format!("Description: {description}\n\n"));
    }

    result
}

/// Render a single article with its full body.
pub fn format_article_details(article: Option<&Article>) -> String {
    let Some(article) = article else {
        return NO_ARTICLE.to_string();
    };

    let title = article.title.as_deref().unwrap_or(UNTITLED);
    let published = article
        .readable_publish_date
        .as_deref()
        .unwrap_or(UNKNOWN_DATE);
    let body = article.body_markdown.as_deref().unwrap_or(NO_CONTENT);

    let mut result = format!("# {title}\n\n");
    result.push_str(&format!("Author: {}\n", author_name(article)));
    result.push_str(&format!("Published: {published}\n"));
    result.push_str(&format!("Tags: {}\n\n", tags_line(article)));
    result.push_str("## Content\n\n");
    result.push_str(body);

    result
}

/// Render a user profile. Detail and link lines are only emitted for
/// fields that are present.
pub fn format_user_profile(user: &User) -> String {
    let username = user.username.as_deref().unwrap_or("Unknown");
    let name = user.name.as_deref().unwrap_or("Unknown");
    let bio = user.summary.as_deref().unwrap_or("No bio available.");

    let mut result = format!("# {name} (@{username})\n\n");
    result.push_str(&format!("Bio: {bio}\n\n"));

    result.push_str("## Details\n");
    if let Some(location) = user.location.as_deref().filter(|s| !s.is_empty()) {
        result.push_str(&format!("Location: {location}\n"));
    }
    if let Some(joined) = user.joined_at.as_deref().filter(|s| !s.is_empty()) {
        result.push_str(&format!("Member since: {joined}\n"));
    }

    result.push_str("\n## Links\n");
    if let Some(twitter) = user.twitter_username.as_deref().filter(|s| !s.is_empty()) {
        result.push_str(&format!("Twitter: @{twitter}\n"));
    }
    if let Some(github) = user.github_username.as_deref().filter(|s| !s.is_empty()) {
        result.push_str(&format!("GitHub: {github}\n"));
    }
    if let Some(website) = user.website_url.as_deref().filter(|s| !s.is_empty()) {
        result.push_str(&format!("Website: {website}\n"));
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use devto_core::{ArticleAuthor, Tags};

    fn article(id: u64, title: &str) -> Article {
        Article {
            id: Some(id),
            title: Some(title.to_string()),
            description: Some(format!("About {title}")),
            readable_publish_date: Some("Apr 1".to_string()),
            tags: Some(Tags::Csv("rust".to_string())),
            user: Some(ArticleAuthor {
                name: Some("Ferris".to_string()),
                username: Some("ferris".to_string()),
            }),
            ..Default::default()
        }
    }

    #[test]
    fn empty_list_yields_sentinel() {
        assert_eq!(format_articles(&[]), "No articles found.");
    }

    #[test]
    fn list_output_starts_with_header_and_caps_at_limit() {
        let articles: Vec<Article> = (0..25).map(|i| article(i, &format!("Post {i}"))).collect();
        let output = format_articles(&articles);

        assert!(output.starts_with("# Dev.to Articles\n\n"));
        assert_eq!(output.matches("## ").count(), DISPLAY_LIMIT);
    }

    #[test]
    fn list_block_has_fields_in_order() {
        let output = format_articles(&[article(7, "Ownership")]);
        let block = output.strip_prefix("# Dev.to Articles\n\n").unwrap();

        let expected = "## Ownership\n\
                        ID: 7\n\
                        Author: Ferris\n\
                        Published: Apr 1\n\
                        Tags: rust\n\
                        Description: About Ownership\n\n";
        assert_eq!(block, expected);
    }

    #[test]
    fn missing_fields_substitute_defaults() {
        let output = format_articles(&[Article::default()]);

        assert!(output.contains("## Untitled\n"));
        assert!(output.contains("ID: \n"));
        assert!(output.contains("Author: Unknown Author\n"));
        assert!(output.contains("Published: Unknown date\n"));
        assert!(output.contains("Description: No description available.\n"));
    }

    #[test]
    fn detail_includes_body_under_content_heading() {
        let mut a = article(3, "Lifetimes");
        a.body_markdown = Some("Some long body".to_string());

        let output = format_article_details(Some(&a));
        assert!(output.starts_with("# Lifetimes\n\n"));
        assert!(output.contains("## Content\n\nSome long body"));
    }

    #[test]
    fn detail_of_nothing_yields_sentinel() {
        assert_eq!(format_article_details(None), "Article not found.");
        assert!(format_article_details(Some(&Article::default()))
            .contains("No content available."));
    }

    #[test]
    fn user_profile_conditional_lines() {
        let user = User {
            username: Some("ferris".to_string()),
            name: Some("Ferris".to_string()),
            summary: Some("Crab things".to_string()),
            github_username: Some("ferris".to_string()),
            twitter_username: Some(String::new()),
            ..Default::default()
        };

        let output = format_user_profile(&user);
        assert!(output.starts_with("# Ferris (@ferris)\n\n"));
        assert!(output.contains("Bio: Crab things\n"));
        assert!(output.contains("GitHub: ferris\n"));
        assert!(!output.contains("Twitter:"));
        assert!(!output.contains("Location:"));
    }

    #[test]
    fn user_profile_defaults() {
        let output = format_user_profile(&User::default());
        assert!(output.starts_with("# Unknown (@Unknown)\n\n"));
        assert!(output.contains("Bio: No bio available.\n"));
    }
}
