//! Output formatting for CLI
//!
//! Provides consistent output formatting across all commands:
//! - Human-readable default output
//! - JSON output (--json flag)
//! - Quiet mode for scripting (--quiet flag)

use modtasty_core::Link;
use serde::Serialize;

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output (default)
    Human,
    /// JSON output
    Json,
    /// Quiet mode - minimal output
    Quiet,
}

impl OutputFormat {
    /// Create format from CLI flags
    pub fn from_flags(json: bool, quiet: bool) -> Self {
        if quiet {
            OutputFormat::Quiet
        } else if json {
            OutputFormat::Json
        } else {
            OutputFormat::Human
        }
    }
}

/// Output helper for consistent formatting
pub struct Output {
    /// The output format
    pub format: OutputFormat,
}

impl Output {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Print a single link
    pub fn print_link(&self, link: &Link) {
        match self.format {
            OutputFormat::Human => {
                println!("ID:      {}", format_id(link));
                println!("Title:   {}", link.display_title());
                println!("URL:     {}", link.url);
                if let Some(domain) = link.domain() {
                    println!("Domain:  {}", domain);
                }
                if !link.tags.is_empty() {
                    println!("Tags:    {}", link.tags.join(", "));
                }
                if let Some(date) = link.created_date() {
                    println!("Created: {}", date);
                }
            }
            OutputFormat::Json => print_json(link),
            OutputFormat::Quiet => {
                println!("{}", format_id(link));
            }
        }
    }

    /// Print a list of links
    pub fn print_links(&self, links: &[Link]) {
        match self.format {
            OutputFormat::Human => {
                if links.is_empty() {
                    println!("No links found.");
                    return;
                }
                for link in links {
                    println!(
                        "{:>5} | {} | {} | {}",
                        format_id(link),
                        link.created_date().unwrap_or_default(),
                        truncate(&link.display_title(), 40),
                        link.domain().unwrap_or_default()
                    );
                }
                println!("\n{} link(s)", links.len());
            }
            OutputFormat::Json => print_json(links),
            OutputFormat::Quiet => {
                for link in links {
                    println!("{}", format_id(link));
                }
            }
        }
    }

    /// Print tag names with their link counts
    pub fn print_tags(&self, names: &[String], counts: &[i64]) {
        match self.format {
            OutputFormat::Human => {
                if names.is_empty() {
                    println!("No tags found.");
                    return;
                }
                for (name, count) in names.iter().zip(counts) {
                    println!("{} ({})", name, count);
                }
                println!("\n{} tag(s)", names.len());
            }
            OutputFormat::Json => {
                let json_tags: Vec<_> = names
                    .iter()
                    .zip(counts)
                    .map(|(name, count)| serde_json::json!({"name": name, "count": count}))
                    .collect();
                print_json(&json_tags);
            }
            OutputFormat::Quiet => {
                for name in names {
                    println!("{}", name);
                }
            }
        }
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        match self.format {
            OutputFormat::Human => println!("✓ {}", message),
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::json!({"status": "success", "message": message})
                );
            }
            OutputFormat::Quiet => {}
        }
    }

    /// Check if we should prompt for confirmation
    pub fn should_prompt(&self) -> bool {
        self.format == OutputFormat::Human
    }

    /// Print an informational message
    pub fn message(&self, msg: &str) {
        match self.format {
            OutputFormat::Human => println!("{}", msg),
            OutputFormat::Json => {
                println!("{}", serde_json::json!({"message": msg}));
            }
            OutputFormat::Quiet => {}
        }
    }
}

/// Print any serializable value as pretty JSON
pub fn print_json<T: Serialize + ?Sized>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize output: {}", e),
    }
}

fn format_id(link: &Link) -> String {
    link.id.map(|id| id.to_string()).unwrap_or_else(|| "-".to_string())
}

/// Truncate a string to max characters, adding "..." if truncated
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", head)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_flags() {
        assert_eq!(OutputFormat::from_flags(false, false), OutputFormat::Human);
        assert_eq!(OutputFormat::from_flags(true, false), OutputFormat::Json);
        assert_eq!(OutputFormat::from_flags(false, true), OutputFormat::Quiet);
        // Quiet takes precedence
        assert_eq!(OutputFormat::from_flags(true, true), OutputFormat::Quiet);
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("this is a long string", 10), "this is...");
        // Multi-byte characters are not split
        assert_eq!(truncate("ünïcödé títlé", 8), "ünïcö...");
    }

    #[test]
    fn test_format_id() {
        let mut link = Link::new("http://example.com");
        assert_eq!(format_id(&link), "-");
        link.id = Some(12);
        assert_eq!(format_id(&link), "12");
    }
}
