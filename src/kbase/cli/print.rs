use chrono::{DateTime, Utc};
use colored::Colorize;
use console::Term;
use kbase::api::{CmdMessage, MessageLevel};
use kbase::config::KbConfig;
use kbase::model::Post;
use kbase::tree::{NodeId, PostTree};
use timeago::Formatter;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const LINE_WIDTH: usize = 100;
const TIME_WIDTH: usize = 14;
const ID_WIDTH: usize = 12;
const INDENT: &str = "  ";

pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

pub(super) fn print_full_posts(posts: &[Post]) {
    for (i, post) in posts.iter().enumerate() {
        if i > 0 {
            println!("\n================================\n");
        }
        println!("{} {}", post.id.to_string().yellow(), post.title.bold());
        if !post.tags.is_empty() {
            println!("{}", post.tags.join(", ").cyan());
        }
        println!("--------------------------------");
        println!("{}", post.content);
    }
}

/// Terminal width, capped at `LINE_WIDTH`.
fn line_width() -> usize {
    let (_, cols) = Term::stdout().size();
    (cols as usize).clamp(40, LINE_WIDTH)
}

pub(super) fn print_posts(posts: &[Post]) {
    if posts.is_empty() {
        println!("No posts found.");
        return;
    }

    let width = line_width();
    for post in posts {
        println!("{}", format_post_line(post, width, Utc::now()));
    }
}

/// One listing row: short id, title + tags preview, right-aligned age.
fn format_post_line(post: &Post, width: usize, now: DateTime<Utc>) -> String {
    let id_str = format!("{:<w$} ", short_id(post.id.as_str()), w = ID_WIDTH);

    let tags = post
        .tags
        .iter()
        .map(|t| format!("#{}", t))
        .collect::<Vec<_>>()
        .join(" ");
    let title_tags = if tags.is_empty() {
        post.title.clone()
    } else {
        format!("{} {}", post.title, tags)
    };

    let available = width.saturating_sub(id_str.width() + TIME_WIDTH);
    let body = truncate_to_width(&title_tags, available);
    let padding = available.saturating_sub(body.width());

    format!(
        "{}{}{}{}",
        id_str.yellow(),
        body,
        " ".repeat(padding),
        format_time_ago(post.modified_time, now).dimmed()
    )
}

/// Trailing characters of the id: the leading ones are the timestamp and are
/// shared by posts created close together.
fn short_id(id: &str) -> &str {
    let start = id.len().saturating_sub(ID_WIDTH);
    id.get(start..).unwrap_or(id)
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            break;
        }
        result.push(c);
        current_width += char_width;
    }
    result.push('…');
    result
}

fn format_time_ago(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let duration = now.signed_duration_since(timestamp);
    let time_str = Formatter::new().convert(duration.to_std().unwrap_or_default());
    format!("{:>width$}", time_str, width = TIME_WIDTH)
}

pub(super) fn print_tags(tags: &[String]) {
    if tags.is_empty() {
        println!("No tags found.");
        return;
    }
    for tag in tags {
        println!("{}", tag);
    }
}

pub(super) fn print_tree(tree: &PostTree) {
    for line in tree_lines(tree) {
        println!("{}", line);
    }
}

/// Folders come before the posts filed directly in them, at every level.
fn tree_lines(tree: &PostTree) -> Vec<String> {
    let mut lines = Vec::new();
    push_node_lines(tree, tree.root(), 0, &mut lines);
    lines
}

fn push_node_lines(tree: &PostTree, node: NodeId, depth: usize, lines: &mut Vec<String>) {
    let indent = INDENT.repeat(depth);
    for &child in tree.children(node) {
        lines.push(format!("{}{}/", indent, tree.label(child).bold()));
        push_node_lines(tree, child, depth + 1, lines);
    }
    for post in tree.value(node) {
        lines.push(format!(
            "{}{} {}",
            indent,
            short_id(post.id.as_str()).yellow(),
            post.title
        ));
    }
}

pub(super) fn print_config(config: &KbConfig) {
    for (key, value) in config.entries() {
        println!("{} = {}", key, value);
    }
}
