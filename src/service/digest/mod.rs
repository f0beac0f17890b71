mod model;

use std::{fmt, str::FromStr};

use teloxide::utils::html;
use url::Url;

pub use model::*;

use crate::platform::{problem_url, Difficulty};

use super::stats::{DayBucket, DaySummary, EnrichedEntry};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DigestStyle {
    Panel,
    Text,
}

impl FromStr for DigestStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "panel" | "rich" => Ok(DigestStyle::Panel),
            "text" | "plain" => Ok(DigestStyle::Text),
            _ => Err(format!("Unknown digest style: {}", s)),
        }
    }
}

impl fmt::Display for DigestStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DigestStyle::Panel => write!(f, "panel"),
            DigestStyle::Text => write!(f, "text"),
        }
    }
}

pub trait DigestFormatter: Send + Sync {
    fn format(&self, display_name: &str, summary: &DaySummary) -> RenderedMessage;
}

pub fn create_formatter(style: DigestStyle, problem_base_url: Url) -> Box<dyn DigestFormatter> {
    info!("Using {} digest formatter", style);
    match style {
        DigestStyle::Panel => Box::new(PanelFormatter::new(problem_base_url)),
        DigestStyle::Text => Box::new(TextFormatter::new(problem_base_url)),
    }
}

fn entry_url(base: &Url, entry: &EnrichedEntry) -> Url {
    problem_url(base, &entry.title_slug).unwrap_or_else(|e| {
        warn!("Falling back to problem index for {}: {}", entry.title_slug, e);
        base.clone()
    })
}

fn difficulty_marker(difficulty: &Difficulty) -> Option<&'static str> {
    match difficulty {
        Difficulty::Easy => Some("🟩"),
        Difficulty::Medium => Some("🟧"),
        Difficulty::Hard => Some("🟥"),
        Difficulty::Other(_) => None,
    }
}

fn bucket_label(bucket: DayBucket) -> String {
    t!(bucket.label_key()).to_string()
}

fn summary_lines(summary: &DaySummary) -> Vec<String> {
    DayBucket::ALL
        .iter()
        .map(|bucket| {
            t!(
                "digest.summary_line",
                bucket = bucket_label(*bucket),
                count = summary.entries(*bucket).len()
            )
            .to_string()
        })
        .collect()
}

/// Rich panel: one field per day plus a summary field, sent as Telegram HTML.
pub struct PanelFormatter {
    problem_base_url: Url,
}

impl PanelFormatter {
    pub fn new(problem_base_url: Url) -> Self {
        Self { problem_base_url }
    }

    fn entry_line(&self, entry: &EnrichedEntry) -> String {
        let difficulty = html::bold(&html::escape(&entry.difficulty.to_string()));
        let difficulty = match difficulty_marker(&entry.difficulty) {
            Some(marker) => format!("{} {}", marker, difficulty),
            None => difficulty,
        };
        let url = entry_url(&self.problem_base_url, entry);

        format!(
            "{} - {} | {}: {}",
            difficulty,
            html::link(url.as_str(), &entry.title),
            t!("digest.date"),
            html::code_inline(&entry.date.to_string())
        )
    }
}

impl DigestFormatter for PanelFormatter {
    fn format(&self, display_name: &str, summary: &DaySummary) -> RenderedMessage {
        let mut panel = Panel::new(t!("digest.title", name = display_name));

        for bucket in DayBucket::ALL {
            let entries = summary.entries(bucket);
            let value = if entries.is_empty() {
                html::escape(&t!("digest.no_problems"))
            } else {
                entries
                    .iter()
                    .map(|entry| self.entry_line(entry))
                    .collect::<Vec<_>>()
                    .join("\n")
            };
            panel.add_field(format!("📅 {}:", bucket_label(bucket)), value);
        }

        let summary_text = summary_lines(summary)
            .iter()
            .map(|line| html::escape(line))
            .collect::<Vec<_>>()
            .join("\n");
        panel.add_field(format!("📝 {}:", t!("digest.summary")), summary_text);

        RenderedMessage::Panel(panel)
    }
}

/// Flat text block with the same sections as the panel, no markup.
pub struct TextFormatter {
    problem_base_url: Url,
}

impl TextFormatter {
    pub fn new(problem_base_url: Url) -> Self {
        Self { problem_base_url }
    }

    fn entry_line(&self, entry: &EnrichedEntry) -> String {
        let difficulty = match difficulty_marker(&entry.difficulty) {
            Some(marker) => format!("{} {}", marker, entry.difficulty),
            None => entry.difficulty.to_string(),
        };

        format!(
            "{} - {} ({}) | {}: {}",
            difficulty,
            entry.title,
            entry_url(&self.problem_base_url, entry),
            t!("digest.date"),
            entry.date
        )
    }
}

impl DigestFormatter for TextFormatter {
    fn format(&self, display_name: &str, summary: &DaySummary) -> RenderedMessage {
        let mut lines = vec![t!("digest.title", name = display_name).to_string()];

        for bucket in DayBucket::ALL {
            lines.push(String::new());
            lines.push(format!("📅 {}:", bucket_label(bucket)));

            let entries = summary.entries(bucket);
            if entries.is_empty() {
                lines.push(t!("digest.no_problems").to_string());
            } else {
                lines.extend(entries.iter().map(|entry| self.entry_line(entry)));
            }
        }

        lines.push(String::new());
        lines.push(format!("📝 {}:", t!("digest.summary")));
        lines.extend(summary_lines(summary));

        RenderedMessage::Text(lines.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn base_url() -> Url {
        Url::parse("https://leetcode.com/problems/").unwrap()
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 10).unwrap()
    }

    fn entry(title: &str, slug: &str, difficulty: Difficulty, date: NaiveDate) -> EnrichedEntry {
        EnrichedEntry {
            title: title.to_string(),
            title_slug: slug.to_string(),
            difficulty,
            date,
        }
    }

    fn alice_summary() -> DaySummary {
        let mut summary = DaySummary::empty(today());
        summary.push(DayBucket::Today, entry("Two Sum", "two-sum", Difficulty::Easy, today()));
        summary
    }

    fn panel(message: RenderedMessage) -> Panel {
        match message {
            RenderedMessage::Panel(panel) => panel,
            RenderedMessage::Text(_) => panic!("expected a panel"),
        }
    }

    fn text(message: RenderedMessage) -> String {
        match message {
            RenderedMessage::Text(text) => text,
            RenderedMessage::Panel(_) => panic!("expected text"),
        }
    }

    #[test]
    fn test_digest_style_from_str() {
        assert_eq!("panel".parse::<DigestStyle>().unwrap(), DigestStyle::Panel);
        assert_eq!("TEXT".parse::<DigestStyle>().unwrap(), DigestStyle::Text);
        assert!("embed".parse::<DigestStyle>().is_err());
    }

    #[test]
    fn test_panel_single_entry_today() {
        let panel = panel(PanelFormatter::new(base_url()).format("alice", &alice_summary()));

        assert_eq!(panel.title, "🚀 alice's LeetCode Stats");
        let names = panel.fields.iter().map(|f| f.name.as_str()).collect::<Vec<_>>();
        assert_eq!(names, vec!["📅 Today:", "📅 Yesterday:", "📅 Two days ago:", "📝 Summary:"]);

        assert_eq!(
            panel.fields[0].value,
            "🟩 <b>Easy</b> - <a href=\"https://leetcode.com/problems/two-sum\">Two Sum</a> | Date: <code>2024-03-10</code>"
        );
        assert_eq!(panel.fields[1].value, "No problems solved.");
        assert_eq!(panel.fields[2].value, "No problems solved.");
        assert_eq!(
            panel.fields[3].value,
            "Today -&gt; Total: 1 problems solved.\nYesterday -&gt; Total: 0 problems solved.\nTwo days ago -&gt; Total: 0 problems solved."
        );
    }

    #[test]
    fn test_panel_unrecognized_difficulty_has_no_marker() {
        let mut summary = DaySummary::empty(today());
        summary.push(
            DayBucket::Yesterday,
            entry(
                "Mystery",
                "mystery",
                Difficulty::Other("Insane".to_string()),
                NaiveDate::from_ymd_opt(2024, 3, 9).unwrap(),
            ),
        );

        let panel = panel(PanelFormatter::new(base_url()).format("bob", &summary));
        assert!(panel.fields[1].value.starts_with("<b>Insane</b> - "));
    }

    #[test]
    fn test_panel_escapes_titles() {
        let mut summary = DaySummary::empty(today());
        summary.push(DayBucket::Today, entry("A < B", "a-less-b", Difficulty::Hard, today()));

        let panel = panel(PanelFormatter::new(base_url()).format("bob", &summary));
        assert!(panel.fields[0].value.contains(">A &lt; B</a>"));
        assert!(panel.fields[0].value.starts_with("🟥 <b>Hard</b>"));
    }

    #[test]
    fn test_panel_titles_are_escaped_once() {
        let mut summary = DaySummary::empty(today());
        summary.push(DayBucket::Today, entry("Sum & Product", "sum-and-product", Difficulty::Easy, today()));

        let panel = panel(PanelFormatter::new(base_url()).format("bob", &summary));
        assert!(panel.fields[0]
            .value
            .contains("<a href=\"https://leetcode.com/problems/sum-and-product\">Sum &amp; Product</a>"));
        assert!(!panel.fields[0].value.contains("&amp;amp;"));
    }

    #[test]
    fn test_text_single_entry_today() {
        let text = text(TextFormatter::new(base_url()).format("alice", &alice_summary()));

        let expected = [
            "🚀 alice's LeetCode Stats",
            "",
            "📅 Today:",
            "🟩 Easy - Two Sum (https://leetcode.com/problems/two-sum) | Date: 2024-03-10",
            "",
            "📅 Yesterday:",
            "No problems solved.",
            "",
            "📅 Two days ago:",
            "No problems solved.",
            "",
            "📝 Summary:",
            "Today -> Total: 1 problems solved.",
            "Yesterday -> Total: 0 problems solved.",
            "Two days ago -> Total: 0 problems solved.",
        ]
        .join("\n");
        assert_eq!(text, expected);
    }

    #[test]
    fn test_bucket_order_is_fixed() {
        let mut summary = DaySummary::empty(today());
        summary.push(
            DayBucket::TwoDaysAgo,
            entry("Old", "old", Difficulty::Medium, NaiveDate::from_ymd_opt(2024, 3, 8).unwrap()),
        );
        summary.push(DayBucket::Today, entry("New", "new", Difficulty::Easy, today()));

        let text = text(TextFormatter::new(base_url()).format("carol", &summary));
        let today_at = text.find("📅 Today:").unwrap();
        let yesterday_at = text.find("📅 Yesterday:").unwrap();
        let two_days_at = text.find("📅 Two days ago:").unwrap();
        let summary_at = text.find("📝 Summary:").unwrap();

        assert!(today_at < yesterday_at && yesterday_at < two_days_at && two_days_at < summary_at);
        assert!(text.find("New").unwrap() < yesterday_at);
        assert!(text.find("Old").unwrap() > two_days_at);
    }

    #[test]
    fn test_empty_summary_renders_every_bucket() {
        let summary = DaySummary::empty(today());

        let panel = panel(PanelFormatter::new(base_url()).format("dave", &summary));
        let text = text(TextFormatter::new(base_url()).format("dave", &summary));

        assert_eq!(panel.fields.len(), 4);
        assert!(panel.fields[..3].iter().all(|f| f.value == "No problems solved."));
        assert_eq!(text.matches("No problems solved.").count(), 3);
        assert_eq!(text.matches("Total: 0 problems solved.").count(), 3);
    }
}
