//! Reusable prompts using Handlebars for templating. Handlebars adds
//! additional security controls since it can't do much out of the box
//! without registering your own helpers.

use std::fmt;

use anyhow::{Error, Result};
use chrono::{Local, NaiveDate};
use handlebars::Handlebars;
use serde_json::json;

/// Date format used in the system message e.g. "Saturday, October 17, 2026"
pub const DATE_FORMAT: &str = "%A, %B %d, %Y";

#[derive(Debug)]
pub enum Prompt {
    SystemMessage,
}

impl fmt::Display for Prompt {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

// The base prompt is passed in as data rather than compiled into the
// template so braces in the prompt file are left alone.
const SYSTEM_MESSAGE_PROMPT: &str = "{{prompt}}\n\nToday's date is {{today}}";

pub fn templates<'a>() -> Result<Handlebars<'a>, Error> {
    let mut registry = Handlebars::new();
    registry.set_strict_mode(true);
    // Output goes to an LLM, not a browser
    registry.register_escape_fn(handlebars::no_escape);
    registry.register_template_string(&Prompt::SystemMessage.to_string(), SYSTEM_MESSAGE_PROMPT)?;
    Ok(registry)
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub fn today() -> String {
    format_date(Local::now().date_naive())
}

/// Render the system message from the base prompt text and a
/// formatted date.
pub fn system_message(prompt: &str, today: &str) -> Result<String, Error> {
    let rendered = templates()?.render(
        &Prompt::SystemMessage.to_string(),
        &json!({"prompt": prompt, "today": today}),
    )?;
    Ok(rendered)
}
