// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
//! Line-oriented console frontend.
//!
//! Drives the same [`ViewController`] as the TUI.  The optional prompt and
//! every non-blank stdin line are submitted in turn; each request is awaited
//! before the next line is read, so replies print in the order they were
//! asked for.

use std::io::Write;

use anyhow::Context;
use shopchat_config::WidgetConfig;
use shopchat_core::render::{HtmlRenderer, TextRenderer};
use shopchat_core::{ChatClient, Clock, Effect, FeedEntry, Form, UiEvent, ViewController, ViewState};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::debug;

use crate::cli::OutputFormatArg;

/// Renders feed entries in the selected output format.
pub struct EntryPrinter {
    format: OutputFormatArg,
    text: TextRenderer,
    html: HtmlRenderer,
}

impl EntryPrinter {
    pub fn new(format: OutputFormatArg, widget: &WidgetConfig) -> Self {
        Self {
            format,
            text: TextRenderer::new(widget),
            html: HtmlRenderer::new(widget),
        }
    }

    pub fn print(&self, out: &mut impl Write, entry: &FeedEntry) -> anyhow::Result<()> {
        match self.format {
            OutputFormatArg::Text => writeln!(out, "{}", self.text.entry(entry))?,
            OutputFormatArg::Html => writeln!(out, "{}", self.html.entry(entry))?,
            OutputFormatArg::Json => writeln!(out, "{}", serde_json::to_string(entry)?)?,
        }
        Ok(())
    }
}

/// Run the console loop until `/quit` or end of input.
pub async fn run<R, W>(
    client: ChatClient,
    widget: &WidgetConfig,
    format: OutputFormatArg,
    prompt: Option<String>,
    input: R,
    out: &mut W,
) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let printer = EntryPrinter::new(format, widget);
    let mut controller = ViewController::new(Clock::local(widget.clock_24h));

    if let Some(prompt) = prompt {
        submit(&client, &mut controller, &printer, &prompt, out).await?;
    }

    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await.context("reading stdin")? {
        match line.trim() {
            "" => continue,
            "/quit" => break,
            "/close" => {
                let effects = controller.handle(UiEvent::Close);
                if !effects.is_empty() && format == OutputFormatArg::Text {
                    writeln!(out, "-- chat closed --")?;
                }
            }
            text => submit(&client, &mut controller, &printer, text, out).await?,
        }
        out.flush()?;
    }
    Ok(())
}

/// Submit one message from whichever form the current view shows, wait for
/// the reply and print every entry it added to the feed.
async fn submit<W: Write>(
    client: &ChatClient,
    controller: &mut ViewController,
    printer: &EntryPrinter,
    text: &str,
    out: &mut W,
) -> anyhow::Result<()> {
    let form = match controller.state() {
        ViewState::Landing => Form::Search,
        ViewState::Chatting => Form::Chat,
    };
    let before = controller.feed().len();
    let effects = controller.handle(UiEvent::Submit { form, text: text.to_string() });
    print_range(controller, printer, before, out)?;

    for effect in effects {
        if let Effect::Dispatch(outbound) = effect {
            let done = client.deliver(outbound).await;
            match controller.complete(done) {
                Some(added) => print_range(controller, printer, added.start, out)?,
                None => debug!("reply dropped"),
            }
        }
    }
    Ok(())
}

fn print_range<W: Write>(
    controller: &ViewController,
    printer: &EntryPrinter,
    from: usize,
    out: &mut W,
) -> anyhow::Result<()> {
    for entry in controller.feed().entries().iter().skip(from) {
        printer.print(out, entry)?;
    }
    Ok(())
}

// ─── Unit tests ──────────────────────────────────────────────────────────────
