//! Line-oriented table session.
//!
//! Each stdin line is one command. Text and range filters go through the
//! view's debounced inputs, so they only take effect once the loop's
//! deadline fires; everything else applies at once.

use std::fmt::Write as _;
use std::str::FromStr;
use std::time::Instant;

use log::{debug, info};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::time::{Instant as TokioInstant, sleep_until};
use virtable_lib::model::Person;
use virtable_lib::virtualizer::{ScrollRequest, ViewportMetrics};
use virtable_lib::{FieldId, FieldPart, TableView};

use crate::data;
use crate::error::{CliError, CommandError};
use crate::layout::Layout;

const HELP: &str = "\
filter <col> [text]      text filter (debounced)
min <col> [n]            range lower bound (debounced)
max <col> [n]            range upper bound (debounced)
select <col> <opt|all>   select filter
sort <col>               cycle ascending, descending, unsorted
scroll <px>              scroll to an offset
viewport <px>            set the viewport height
pgup | pgdn | home | end
goto <row>               scroll a row into view
unmount <col> [part]     tear down a filter control
mount <col> [part]       bring it back
reset                    clear filters and sort
state                    print the filter and sort state as JSON
show                     print the current window
quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Filter { column: String, text: String },
    Min { column: String, value: String },
    Max { column: String, value: String },
    Select { column: String, option: String },
    Sort(String),
    Scroll(i64),
    Viewport(i64),
    Page(ScrollRequest),
    Goto(usize),
    Unmount(FieldId),
    Mount(FieldId),
    Reset,
    State,
    Show,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (name, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim();
        let (arg, tail) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
        let tail = tail.trim();

        let column = |command: &'static str| {
            if arg.is_empty() {
                Err(CommandError::MissingArgument {
                    command,
                    argument: "column",
                })
            } else {
                Ok(arg.to_string())
            }
        };

        let command = match name.to_ascii_lowercase().as_str() {
            "filter" => Command::Filter {
                column: column("filter")?,
                text: tail.to_string(),
            },
            "min" => Command::Min {
                column: column("min")?,
                value: tail.to_string(),
            },
            "max" => Command::Max {
                column: column("max")?,
                value: tail.to_string(),
            },
            "select" => {
                let column = column("select")?;
                let option = match tail {
                    "" => {
                        return Err(CommandError::MissingArgument {
                            command: "select",
                            argument: "option",
                        });
                    }
                    "all" => String::new(),
                    option => option.to_string(),
                };
                Command::Select { column, option }
            }
            "sort" => Command::Sort(column("sort")?),
            "scroll" => Command::Scroll(number("scroll", arg)?),
            "viewport" => Command::Viewport(number("viewport", arg)?),
            "pgup" => Command::Page(ScrollRequest::PageUp),
            "pgdn" => Command::Page(ScrollRequest::PageDown),
            "home" => Command::Page(ScrollRequest::Home),
            "end" => Command::Page(ScrollRequest::End),
            "goto" => Command::Goto(number("goto", arg)?),
            "unmount" => Command::Unmount(field(column("unmount")?, tail)?),
            "mount" => Command::Mount(field(column("mount")?, tail)?),
            "reset" => Command::Reset,
            "state" => Command::State,
            "show" => Command::Show,
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            _ => return Err(CommandError::Unknown(name.to_string())),
        };
        Ok(command)
    }
}

fn number<N: FromStr>(command: &'static str, arg: &str) -> Result<N, CommandError> {
    if arg.is_empty() {
        return Err(CommandError::MissingArgument {
            command,
            argument: "number",
        });
    }
    arg.parse()
        .map_err(|_| CommandError::InvalidNumber(arg.to_string()))
}

fn field(column: String, part: &str) -> Result<FieldId, CommandError> {
    let part = match part {
        "" | "value" => FieldPart::Value,
        "min" => FieldPart::Min,
        "max" => FieldPart::Max,
        other => return Err(CommandError::UnknownPart(other.to_string())),
    };
    Ok(FieldId::new(column, part))
}

/// What to do after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Print(String),
    Quiet,
    Quit,
}

pub struct Session {
    view: TableView<Person>,
    layout: Layout,
}

impl Session {
    pub fn new(view: TableView<Person>, layout: Layout) -> Self {
        Self { view, layout }
    }

    pub fn view(&self) -> &TableView<Person> {
        &self.view
    }

    /// Parse and apply one input line.
    pub fn handle(&mut self, line: &str, now: Instant) -> Result<Reply, CliError> {
        let command: Command = line.parse()?;
        debug!("Command: {:?}", command);
        self.execute(command, now)
    }

    pub fn execute(&mut self, command: Command, now: Instant) -> Result<Reply, CliError> {
        let redraw = match command {
            Command::Filter { column, text } => self.view.input(&FieldId::value(column), text, now)?,
            Command::Min { column, value } => self.view.input(&FieldId::min(column), value, now)?,
            Command::Max { column, value } => self.view.input(&FieldId::max(column), value, now)?,
            Command::Select { column, option } => {
                self.view.input(&FieldId::value(column), option, now)?
            }
            Command::Sort(column) => {
                self.view.toggle_sort(&column)?;
                true
            }
            Command::Scroll(offset) => {
                let viewport = self.view.scroll().viewport as i64;
                self.view
                    .set_viewport(ViewportMetrics::from_signed(offset, viewport));
                true
            }
            Command::Viewport(height) => {
                let offset = self.view.scroll().offset as i64;
                self.view
                    .set_viewport(ViewportMetrics::from_signed(offset, height));
                true
            }
            Command::Page(request) => {
                self.view.scroll_by(request);
                true
            }
            Command::Goto(row) => {
                self.view.scroll_by(ScrollRequest::IntoView(row));
                true
            }
            Command::Unmount(field) => {
                let text = if self.view.unmount_input(&field) {
                    format!("Unmounted {field}")
                } else {
                    format!("{field} is not mounted")
                };
                return Ok(Reply::Print(text));
            }
            Command::Mount(field) => {
                self.view.mount_input(&field)?;
                return Ok(Reply::Print(format!("Mounted {field}")));
            }
            Command::Reset => {
                self.view.clear_filters();
                self.view.set_sort(None)?;
                true
            }
            Command::State => {
                let json = serde_json::to_string_pretty(&self.view.snapshot())?;
                return Ok(Reply::Print(json));
            }
            Command::Show => true,
            Command::Help => return Ok(Reply::Print(HELP.to_string())),
            Command::Quit => return Ok(Reply::Quit),
        };

        Ok(if redraw {
            Reply::Print(self.render())
        } else {
            Reply::Quiet
        })
    }

    /// Commit due debounced edits. Returns the redrawn window if anything
    /// changed.
    pub fn tick(&mut self, now: Instant) -> Option<String> {
        self.view.tick(now).then(|| self.render())
    }

    /// Draw the visible rows, then report their heights back to the view.
    pub fn render(&mut self) -> String {
        let window = self.view.window();
        let mut out = String::new();

        let headers: Vec<String> = self
            .view
            .columns()
            .iter()
            .map(|column| match self.view.sort() {
                Some(sort) if sort.column == column.key() => {
                    format!("{} {}", column.header(), sort.direction.arrow())
                }
                _ => column.header().to_string(),
            })
            .collect();
        for line in self.layout.render_row(&headers).lines {
            let _ = writeln!(out, "{:>7}  {line}", "");
        }

        let mut heights = Vec::with_capacity(window.items.len());
        for (item, person) in self.view.rows_in(&window) {
            let cells: Vec<String> = self
                .view
                .columns()
                .iter()
                .map(|column| data::cell(column, person))
                .collect();
            let row = self.layout.render_row(&cells);
            if window.visible.contains(&item.index) {
                for (i, line) in row.lines.iter().enumerate() {
                    if i == 0 {
                        let _ = writeln!(out, "{:>7}  {line}", item.start);
                    } else {
                        let _ = writeln!(out, "{:>7}  {line}", "");
                    }
                }
            }
            heights.push((item.index, item.key, row.height));
        }

        let scroll = self.view.scroll();
        let _ = write!(
            out,
            "rows {}..{} of {} ({} total) | offset {}/{} ({:.0}%) | viewport {}",
            window.visible.start,
            window.visible.end,
            self.view.len(),
            self.view.store().len(),
            scroll.offset,
            window.total_extent,
            scroll.progress() * 100.0,
            scroll.viewport,
        );

        let mut changed = 0;
        for (index, key, height) in heights {
            if self.view.measured(index, &key, height) {
                changed += 1;
            }
        }
        if changed > 0 {
            debug!("{changed} row height(s) changed after render");
        }
        out
    }

    /// Read commands from stdin until `quit` or end of input.
    ///
    /// After end of input, pending debounced edits still get committed.
    pub async fn run(mut self) -> Result<(), CliError> {
        let mut stdout = tokio::io::stdout();
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        let mut input_open = true;

        print(&mut stdout, &self.render()).await?;

        loop {
            let deadline = self.view.next_deadline();
            if !input_open && deadline.is_none() {
                break;
            }
            let wake = deadline.map_or_else(TokioInstant::now, TokioInstant::from_std);

            tokio::select! {
                line = lines.next_line(), if input_open => {
                    let Some(line) = line? else {
                        debug!("Input closed");
                        input_open = false;
                        continue;
                    };
                    if line.trim().is_empty() {
                        continue;
                    }
                    match self.handle(&line, Instant::now()) {
                        Ok(Reply::Print(text)) => print(&mut stdout, &text).await?,
                        Ok(Reply::Quiet) => {}
                        Ok(Reply::Quit) => break,
                        Err(e) if !e.is_fatal() => {
                            print(&mut stdout, &format!("error: {e}")).await?
                        }
                        Err(e) => return Err(e),
                    }
                }
                _ = sleep_until(wake), if deadline.is_some() => {
                    if let Some(text) = self.tick(Instant::now()) {
                        print(&mut stdout, &text).await?;
                    }
                }
            }
        }

        info!("Session ended at version {}", self.view().version());
        Ok(())
    }
}

async fn print(stdout: &mut tokio::io::Stdout, text: &str) -> Result<(), CliError> {
    stdout.write_all(text.as_bytes()).await?;
    stdout.write_all(b"\n").await?;
    stdout.flush().await?;
    Ok(())
}
