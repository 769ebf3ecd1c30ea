//! Markdown rendering for chat replies.
//!
//! Walks the pulldown-cmark event stream and emits ANSI-styled text for a
//! line-oriented terminal: headings in bold cyan, inline and block code in
//! yellow, quotes dimmed, lists with bullets or numbers.

use colored::Colorize;
use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};

#[derive(Default)]
struct RenderState {
    out: String,
    bold: usize,
    italic: usize,
    heading: bool,
    code_block: bool,
    quote: usize,
    list_counters: Vec<Option<u64>>,
    link_dest: Option<String>,
}

impl RenderState {
    fn block_break(&mut self) {
        if self.out.is_empty() {
            return;
        }
        while !self.out.ends_with("\n\n") {
            self.out.push('\n');
        }
    }

    fn push_text(&mut self, text: &str) {
        if self.code_block {
            for line in text.lines() {
                self.out.push_str("    ");
                self.out.push_str(&line.yellow().to_string());
                self.out.push('\n');
            }
            return;
        }

        let mut styled = text.normal();
        if self.heading {
            styled = styled.cyan().bold();
        }
        if self.bold > 0 {
            styled = styled.bold();
        }
        if self.italic > 0 {
            styled = styled.italic();
        }
        if self.quote > 0 {
            styled = styled.dimmed();
        }
        self.out.push_str(&styled.to_string());
    }
}

/// Converts a markdown reply into terminal-formatted text.
pub fn render_markdown(input: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_STRIKETHROUGH);

    let mut state = RenderState::default();

    for event in Parser::new_ext(input, options) {
        match event {
            Event::Start(tag) => start_tag(&mut state, tag),
            Event::End(tag) => end_tag(&mut state, tag),
            Event::Text(text) => state.push_text(&text),
            Event::Code(code) => {
                let styled = code.yellow().to_string();
                state.out.push_str(&styled);
            }
            Event::SoftBreak | Event::HardBreak => state.out.push('\n'),
            Event::Rule => {
                state.block_break();
                state.out.push_str(&"─".repeat(40).dimmed().to_string());
                state.out.push('\n');
            }
            _ => {}
        }
    }

    state.out.trim_end().to_string()
}

fn start_tag(state: &mut RenderState, tag: Tag<'_>) {
    match tag {
        Tag::Paragraph => {
            if state.list_counters.is_empty() {
                state.block_break();
            }
        }
        Tag::Heading { .. } => {
            state.block_break();
            state.heading = true;
        }
        Tag::Strong => state.bold += 1,
        Tag::Emphasis => state.italic += 1,
        Tag::BlockQuote(_) => {
            state.block_break();
            state.quote += 1;
        }
        Tag::CodeBlock(_) => {
            state.block_break();
            state.code_block = true;
        }
        Tag::List(start) => {
            if state.list_counters.is_empty() {
                state.block_break();
            }
            state.list_counters.push(start);
        }
        Tag::Item => {
            if !state.out.is_empty() && !state.out.ends_with('\n') {
                state.out.push('\n');
            }
            let depth = state.list_counters.len().saturating_sub(1);
            state.out.push_str(&"  ".repeat(depth));
            match state.list_counters.last_mut() {
                Some(Some(number)) => {
                    state.out.push_str(&format!("{number}. "));
                    *number += 1;
                }
                _ => state.out.push_str("• "),
            }
        }
        Tag::Link { dest_url, .. } => state.link_dest = Some(dest_url.to_string()),
        _ => {}
    }
}

fn end_tag(state: &mut RenderState, tag: TagEnd) {
    match tag {
        TagEnd::Paragraph => {
            if state.list_counters.is_empty() {
                state.out.push('\n');
            }
        }
        TagEnd::Heading(_) => {
            state.heading = false;
            state.out.push('\n');
        }
        TagEnd::Strong => state.bold = state.bold.saturating_sub(1),
        TagEnd::Emphasis => state.italic = state.italic.saturating_sub(1),
        TagEnd::BlockQuote(_) => {
            state.quote = state.quote.saturating_sub(1);
            state.out.push('\n');
        }
        TagEnd::CodeBlock => {
            state.code_block = false;
        }
        TagEnd::List(_) => {
            state.list_counters.pop();
            if state.list_counters.is_empty() {
                state.out.push('\n');
            }
        }
        TagEnd::Item => {
            if !state.out.ends_with('\n') {
                state.out.push('\n');
            }
        }
        TagEnd::Link => {
            if let Some(dest) = state.link_dest.take() {
                let suffix = format!(" ({dest})").dimmed().to_string();
                state.out.push_str(&suffix);
            }
        }
        _ => {}
    }
}
