//! Purpose: Interactive line-oriented view over the post store.
//! Exports: `Shell`.
//! Role: Owns the form state (title, body, edit target), parses commands,
//! renders the first ten posts after every store-touching command.
//! Invariants: A blank title or body (after trimming) submits nothing.
//! Invariants: The form returns to create mode only after a successful submit.

use crate::api::{Draft, Error, ErrorKind, OpStatus, PostPatch, Store};
use std::io::{BufRead, Write};

const VISIBLE_POSTS: usize = 10;

pub struct Shell {
    store: Store,
    title: String,
    body: String,
    edit_id: Option<u64>,
}

#[derive(Debug, PartialEq, Eq)]
enum Command<'a> {
    Title(&'a str),
    Body(&'a str),
    Edit(u64),
    Submit,
    Delete(u64),
    Fetch,
    List,
    Help,
    Quit,
    Blank,
    BadId(&'a str),
    Unknown(&'a str),
}

fn parse_command(line: &str) -> Command<'_> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };
    match word {
        "" => Command::Blank,
        "title" => Command::Title(rest),
        "body" => Command::Body(rest),
        "edit" => parse_id(rest).map_or(Command::BadId(rest), Command::Edit),
        "submit" => Command::Submit,
        "delete" => parse_id(rest).map_or(Command::BadId(rest), Command::Delete),
        "fetch" => Command::Fetch,
        "list" => Command::List,
        "help" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => Command::Unknown(other),
    }
}

fn parse_id(text: &str) -> Option<u64> {
    text.parse().ok()
}

fn form_ready(title: &str, body: &str) -> bool {
    !title.trim().is_empty() && !body.trim().is_empty()
}

impl Shell {
    pub fn new(store: Store) -> Self {
        Self {
            store,
            title: String::new(),
            body: String::new(),
            edit_id: None,
        }
    }

    /// Fetch once, then process commands until `quit` or end of input.
    pub fn run(&mut self, input: impl BufRead, mut out: impl Write) -> Result<(), Error> {
        self.store.fetch();
        self.render(&mut out)?;
        write_line(&mut out, "type `help` for commands")?;

        for line in input.lines() {
            let line = line.map_err(|err| {
                Error::new(ErrorKind::Internal)
                    .with_message("failed to read command input")
                    .with_source(err)
            })?;
            match parse_command(&line) {
                Command::Blank => {}
                Command::Title(text) => self.title = text.to_string(),
                Command::Body(text) => self.body = text.to_string(),
                Command::Edit(id) => {
                    match self.store.post(id) {
                        Some(post) => {
                            self.title = post.title.clone();
                            self.body = post.body.clone();
                            self.edit_id = Some(id);
                        }
                        None => write_line(&mut out, &format!("no listed post with id {id}"))?,
                    }
                    self.render(&mut out)?;
                }
                Command::Submit => {
                    self.submit(&mut out)?;
                    self.render(&mut out)?;
                }
                Command::Delete(id) => {
                    self.store.delete(id);
                    self.render(&mut out)?;
                }
                Command::Fetch => {
                    self.store.fetch();
                    self.render(&mut out)?;
                }
                Command::List => self.render(&mut out)?,
                Command::Help => self.help(&mut out)?,
                Command::Quit => break,
                Command::BadId(text) => {
                    write_line(&mut out, &format!("expected a numeric post id, got `{text}`"))?;
                }
                Command::Unknown(word) => {
                    write_line(&mut out, &format!("unknown command `{word}`; try `help`"))?;
                }
            }
        }
        Ok(())
    }

    fn submit(&mut self, out: &mut impl Write) -> Result<(), Error> {
        if !form_ready(&self.title, &self.body) {
            return write_line(out, "title and body must both be non-blank; nothing submitted");
        }
        let op = match self.edit_id {
            Some(id) => self
                .store
                .update(id, PostPatch::text(self.title.trim(), self.body.trim())),
            None => self
                .store
                .add(Draft::new(self.title.trim(), self.body.trim())),
        };
        if self.store.status(op) == Some(&OpStatus::Done) {
            self.title.clear();
            self.body.clear();
            self.edit_id = None;
        }
        Ok(())
    }

    fn render(&self, out: &mut impl Write) -> Result<(), Error> {
        let posts = self.store.posts();
        let shown = posts.len().min(VISIBLE_POSTS);
        write_line(out, &format!("== posts ({shown} of {}) ==", posts.len()))?;
        for post in &posts[..shown] {
            write_line(out, &format!("[{}] {}", post.id, post.title))?;
            write_line(out, &format!("    {}", post.body))?;
        }
        if self.store.is_loading() {
            write_line(out, "loading...")?;
        }
        if let Some(error) = self.store.last_error() {
            write_line(out, &format!("error: {error}"))?;
        }
        let mode = match self.edit_id {
            Some(id) => format!("update post #{id}"),
            None => "add post".to_string(),
        };
        write_line(
            out,
            &format!("form [{mode}] title={:?} body={:?}", self.title, self.body),
        )
    }

    fn help(&self, out: &mut impl Write) -> Result<(), Error> {
        for line in [
            "title <text>   set the form title",
            "body <text>    set the form body",
            "edit <id>      load a post into the form; submit then updates it",
            "submit         add or update from the form",
            "delete <id>    delete a post",
            "fetch          reload the collection",
            "list           re-render without a network call",
            "quit           leave the shell",
        ] {
            write_line(out, line)?;
        }
        Ok(())
    }
}

fn write_line(out: &mut impl Write, line: &str) -> Result<(), Error> {
    writeln!(out, "{line}").map_err(|err| {
        Error::new(ErrorKind::Internal)
            .with_message("failed to write shell output")
            .with_source(err)
    })
}
