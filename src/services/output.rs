use crate::domain::models::JsonOut;
use crossterm::style::Stylize;
use serde::Serialize;
use std::io::Write;

pub const INDENT: &str = "          ";

pub fn print_json<T: Serialize>(ok: bool, data: T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(&JsonOut { ok, data })?);
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tag {
    Info,
    Warn,
    Ok,
    Err,
    Attention,
}

/// Tagged, optionally colored console lines.
#[derive(Debug, Clone, Copy)]
pub struct Console {
    pub color: bool,
}

impl Console {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    fn tag(&self, tag: Tag) -> String {
        let (text, pad) = match tag {
            Tag::Info => ("[info]", "  "),
            Tag::Warn => ("[warn]", "  "),
            Tag::Ok => ("[ok]", "    "),
            Tag::Err => ("[err]", "   "),
            Tag::Attention => ("[??]", "    "),
        };
        if !self.color {
            return format!("{text}{pad}");
        }
        let styled = match tag {
            Tag::Info => text.cyan(),
            Tag::Warn | Tag::Attention => text.yellow().bold(),
            Tag::Ok => text.green(),
            Tag::Err => text.red(),
        };
        format!("{styled}{pad}")
    }

    pub fn bold(&self, text: &str) -> String {
        if self.color {
            text.bold().to_string()
        } else {
            text.to_string()
        }
    }

    pub fn line(&self, tag: Tag, msg: &str) -> String {
        format!("{}{}", self.tag(tag), msg)
    }

    pub fn write(&self, out: &mut impl Write, tag: Tag, msg: &str) -> std::io::Result<()> {
        writeln!(out, "{}", self.line(tag, msg))
    }

    pub fn info(&self, msg: &str) {
        println!("{}", self.line(Tag::Info, msg));
    }
}
