//! Application - Console Front End
//!
//! Reads commands from stdin, applies them to the [`Dashboard`], waits for the
//! views to settle and prints the dashboard.

use std::io::{self, BufRead, Write};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context as _;

use crate::domain::config::AppConfig;
use crate::domain::month::Month;
use crate::error::Error;
use crate::services::{HttpSalesApi, ServiceHub};
use crate::state::Dashboard;
use crate::views::DashboardDisplay;

const PROMPT: &str = "dashboard> ";

const HELP: &str = "\
Commands:
  month <m>      select a month (Jan, march, 3, ...)
  next           next table page
  prev           previous table page
  search <text>  filter the current page by title or category
  clear          clear the search
  show           print the dashboard again
  months         list the months
  help           show this help
  quit           exit";

/// One line of console input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    Month(Month),
    Next,
    Prev,
    Search(String),
    Clear,
    Show,
    Months,
    Help,
    Quit,
}

impl FromStr for ConsoleCommand {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let line = s.trim();
        let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim_start();

        match word.to_ascii_lowercase().as_str() {
            "month" | "m" if !rest.is_empty() => Ok(ConsoleCommand::Month(rest.parse()?)),
            "month" | "m" => Err(Error::Invalid {
                message: "usage: month <m>".to_string(),
            }),
            "next" | "n" => Ok(ConsoleCommand::Next),
            "prev" | "p" => Ok(ConsoleCommand::Prev),
            "search" | "s" => Ok(ConsoleCommand::Search(rest.to_string())),
            "clear" => Ok(ConsoleCommand::Clear),
            "show" | "" => Ok(ConsoleCommand::Show),
            "months" => Ok(ConsoleCommand::Months),
            "help" | "?" => Ok(ConsoleCommand::Help),
            "quit" | "exit" | "q" => Ok(ConsoleCommand::Quit),
            other => Err(Error::Invalid {
                message: format!("unknown command: {other}"),
            }),
        }
    }
}

/// Console session over one dashboard
pub struct Console {
    dashboard: Dashboard,
    histogram_width: usize,
    settle_timeout: Duration,
}

impl Console {
    pub fn new(dashboard: Dashboard, config: &AppConfig) -> Self {
        Self {
            dashboard,
            histogram_width: config.dashboard.histogram_width,
            settle_timeout: config.api.timeout(),
        }
    }

    pub fn dashboard(&self) -> &Dashboard {
        &self.dashboard
    }

    /// Wait for in-flight requests, then print every view
    pub fn show(&mut self, out: &mut impl Write) -> io::Result<()> {
        if !self.dashboard.settle(self.settle_timeout) {
            tracing::warn!(timeout = ?self.settle_timeout, "Views still loading");
        }
        let display = DashboardDisplay::project(&self.dashboard, self.histogram_width);
        writeln!(out, "{display}")
    }

    /// Run one command; returns `false` on quit
    pub fn execute(&mut self, command: ConsoleCommand, out: &mut impl Write) -> io::Result<bool> {
        tracing::debug!(?command, "Console command");
        match command {
            ConsoleCommand::Month(month) => {
                if !self.dashboard.select_month(month) {
                    writeln!(out, "{} is already selected", month.name())?;
                }
                self.show(out)?;
            }
            ConsoleCommand::Next => {
                if !self.dashboard.next_page() {
                    writeln!(out, "Already on the last page")?;
                }
                self.show(out)?;
            }
            ConsoleCommand::Prev => {
                if !self.dashboard.prev_page() {
                    writeln!(out, "Already on the first page")?;
                }
                self.show(out)?;
            }
            ConsoleCommand::Search(query) => {
                self.dashboard.set_search(query);
                self.show(out)?;
            }
            ConsoleCommand::Clear => {
                self.dashboard.set_search("");
                self.show(out)?;
            }
            ConsoleCommand::Show => self.show(out)?,
            ConsoleCommand::Months => {
                let current = self.dashboard.current_month();
                for month in Month::ALL {
                    let marker = if month == current { '*' } else { ' ' };
                    writeln!(out, " {marker} {:<3} {}", month.label(), month.name())?;
                }
            }
            ConsoleCommand::Help => writeln!(out, "{HELP}")?,
            ConsoleCommand::Quit => return Ok(false),
        }
        Ok(true)
    }
}

/// Run the console dashboard
pub fn run_app(config: AppConfig, once: bool) -> anyhow::Result<()> {
    let api = HttpSalesApi::new(&config.api).context("Failed to create sales API client")?;
    tracing::info!(base_url = api.base_url(), "Using sales service");
    let hub = ServiceHub::with_shared_runtime(Arc::new(api))?;
    let dashboard = Dashboard::new(hub, config.dashboard.default_month);
    let mut console = Console::new(dashboard, &config);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    console.show(&mut out)?;
    if once {
        return Ok(());
    }

    writeln!(out, "Type `help` for commands.")?;
    write!(out, "{PROMPT}")?;
    out.flush()?;

    for line in io::stdin().lock().lines() {
        let line = line.context("Failed to read from stdin")?;
        match line.parse::<ConsoleCommand>() {
            Ok(command) => {
                if !console.execute(command, &mut out)? {
                    break;
                }
            }
            Err(e) => writeln!(out, "{e}. Type `help` for commands.")?,
        }
        write!(out, "{PROMPT}")?;
        out.flush()?;
    }

    tracing::info!("Console closed");
    Ok(())
}
