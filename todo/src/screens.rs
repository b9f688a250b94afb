//! Terminal screens for the todo list.
//!
//! Three screens, as on the phone: Home lists pending todos and, under
//! `Genomfört:`, completed ones; Details shows one todo with its toggle and
//! delete actions; Add collects a title and a description. Screens only read
//! the [`TodoStore`] and hand it [`Intent`]s. Every intent returns to Home.

use crate::store::{Intent, TodoStore};
use crate::types::{TodoId, TodoRecord};
use std::fmt::Write as _;
use std::io::{self, BufRead, Write};

/// Label above the completed list
pub const COMPLETED_HEADING: &str = "Genomfört:";

/// Toggle label for a pending todo
pub const COMPLETE_LABEL: &str = "Klar";

/// Toggle label for a done todo
pub const UNDO_LABEL: &str = "Ångra";

/// Line that ends the description on the Add screen
pub const END_OF_DESCRIPTION: &str = ".";

/// Input collected so far on the Add screen
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AddForm {
    title: Option<String>,
    description: Vec<String>,
}

/// The screen currently shown
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Screen {
    /// Pending and completed lists
    Home,
    /// One todo
    Details(TodoId),
    /// The new-todo form
    Add(AddForm),
}

/// What the input loop should do after a line was handled
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    /// Keep reading input
    Continue,
    /// Leave the application
    Quit,
}

/// Returns the todo shown at a 1-based list number on Home
///
/// Numbers run through the pending list first, then the completed list.
#[must_use]
pub fn todo_at(todos: &TodoStore, number: usize) -> Option<&TodoRecord> {
    let index = number.checked_sub(1)?;
    todos
        .pending()
        .iter()
        .chain(todos.completed())
        .nth(index)
}

fn heading(out: &mut String, title: &str) {
    let _ = writeln!(out, "{title}");
    let _ = writeln!(out, "{}", "=".repeat(title.chars().count().max(1)));
}

/// Renders the Home screen
#[must_use]
pub fn render_home(todos: &TodoStore) -> String {
    let mut out = String::new();
    heading(&mut out, "Todos");

    let mut number = 0;
    for record in todos.pending() {
        number += 1;
        let _ = writeln!(out, "{number:>3}. {} >", record.title);
    }

    let _ = writeln!(out, "\n{COMPLETED_HEADING}");
    for record in todos.completed() {
        number += 1;
        let _ = writeln!(out, "{number:>3}. ~~{}~~ >", record.title);
    }

    let _ = write!(out, "\n[a] add");
    if number > 0 {
        let _ = write!(out, "  [1-{number}] details");
    }
    let _ = writeln!(out, "  [q] quit");
    out
}

/// Renders the Details screen for one todo
#[must_use]
pub fn render_details(record: &TodoRecord) -> String {
    let mut out = String::new();
    heading(&mut out, &record.title);

    if !record.description.is_empty() {
        let _ = writeln!(out, "{}", record.description);
    }

    let toggle = if record.done { UNDO_LABEL } else { COMPLETE_LABEL };
    let _ = writeln!(out, "\n[k] {toggle}");
    let _ = writeln!(out, "--------");
    let _ = writeln!(out, "Created: {}    [d] delete", record.created);
    let _ = writeln!(out, "[b] back");
    out
}

/// Renders the Add screen
#[must_use]
pub fn render_add(form: &AddForm) -> String {
    let mut out = String::new();
    heading(&mut out, "New Todo");

    match &form.title {
        None => {
            let _ = writeln!(out, "Title:");
        },
        Some(title) => {
            let _ = writeln!(out, "Title: {title}");
            let _ = writeln!(
                out,
                "Description (finish with a line containing only \"{END_OF_DESCRIPTION}\"):"
            );
            for line in &form.description {
                let _ = writeln!(out, "{line}");
            }
        },
    }
    out
}

/// Screen state and input handling
#[derive(Clone, Debug)]
pub struct Navigator {
    screen: Screen,
    notice: Option<String>,
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new()
    }
}

impl Navigator {
    /// Starts on Home
    #[must_use]
    pub const fn new() -> Self {
        Self {
            screen: Screen::Home,
            notice: None,
        }
    }

    /// The current screen
    #[must_use]
    pub const fn screen(&self) -> &Screen {
        &self.screen
    }

    /// Message from the last handled line, if any
    #[must_use]
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// Renders the current screen, followed by an input prompt
    #[must_use]
    pub fn render(&self, todos: &TodoStore) -> String {
        let mut out = String::new();
        if let Some(notice) = &self.notice {
            let _ = writeln!(out, "! {notice}\n");
        }

        let body = match &self.screen {
            Screen::Home => render_home(todos),
            Screen::Details(id) => match todos.get(*id) {
                Some(record) => render_details(record),
                None => render_home(todos),
            },
            Screen::Add(form) => render_add(form),
        };
        out.push_str(&body);
        out.push_str("> ");
        out
    }

    /// Handles one line of user input
    pub fn handle(&mut self, todos: &mut TodoStore, line: &str) -> Step {
        self.notice = None;
        let line = line.trim_end_matches(['\r', '\n']);

        match self.screen {
            Screen::Home => return self.handle_home(todos, line.trim()),
            Screen::Details(id) => self.handle_details(todos, id, line.trim()),
            Screen::Add(_) => self.handle_add(todos, line),
        }
        Step::Continue
    }

    fn handle_home(&mut self, todos: &TodoStore, command: &str) -> Step {
        match command {
            "" => {},
            "q" => return Step::Quit,
            "a" => self.screen = Screen::Add(AddForm::default()),
            other => match other.parse::<usize>() {
                Ok(number) => match todo_at(todos, number) {
                    Some(record) => self.screen = Screen::Details(record.id),
                    None => self.notice = Some(format!("no todo number {number}")),
                },
                Err(_) => self.notice = Some(format!("unknown command {other:?}")),
            },
        }
        Step::Continue
    }

    fn handle_details(&mut self, todos: &mut TodoStore, id: TodoId, command: &str) {
        let Some(done) = todos.get(id).map(|record| record.done) else {
            self.screen = Screen::Home;
            return;
        };

        match command {
            "k" if done => self.submit(todos, Intent::RequestUndo { id }),
            "k" => self.submit(todos, Intent::RequestComplete { id }),
            "d" => self.submit(todos, Intent::RequestDelete { id }),
            "b" => self.screen = Screen::Home,
            "" => {},
            other => self.notice = Some(format!("unknown command {other:?}")),
        }
    }

    fn handle_add(&mut self, todos: &mut TodoStore, line: &str) {
        let Screen::Add(form) = &mut self.screen else {
            return;
        };

        if form.title.is_none() {
            form.title = Some(line.to_string());
        } else if line.trim() == END_OF_DESCRIPTION {
            let AddForm { title, description } = std::mem::take(form);
            self.submit(
                todos,
                Intent::SubmitAdd {
                    title: title.unwrap_or_default(),
                    description: description.join("\n"),
                },
            );
        } else {
            form.description.push(line.to_string());
        }
    }

    fn submit(&mut self, todos: &mut TodoStore, intent: Intent) {
        if let Err(error) = todos.dispatch(intent) {
            self.notice = Some(error.to_string());
        }
        self.screen = Screen::Home;
    }
}

/// Runs the screen flow over line-based input until `q` or end of input
///
/// # Errors
///
/// Returns any I/O error from reading `input` or writing `output`.
pub fn run<R, W>(todos: &mut TodoStore, input: R, mut output: W) -> io::Result<()>
where
    R: BufRead,
    W: Write,
{
    let mut navigator = Navigator::new();
    write!(output, "{}", navigator.render(todos))?;
    output.flush()?;

    for line in input.lines() {
        let line = line?;
        if navigator.handle(todos, &line) == Step::Quit {
            writeln!(output)?;
            break;
        }
        write!(output, "\n{}", navigator.render(todos))?;
        output.flush()?;
    }
    Ok(())
}
