//! Interactive commands read from stdin, one per line.

use std::str::FromStr;

use anyhow::{anyhow, bail};

pub const HELP: &str = "\
commands:
  open | close | toggle      show or hide the picker
  branches | tags            switch listing mode
  filter [text]              filter by name prefix (empty clears)
  next | reset | page <c>    paginate
  log <branch>               browse a branch's commits
  back                       return to the listing
  pick <n>                   choose row n
  cancel                     cancel the current selection
  show                       redraw
  quit";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Input {
    Open,
    Close,
    Toggle,
    Branches,
    Tags,
    Filter(String),
    Next,
    Reset,
    Page(String),
    Log(String),
    Back,
    /// 1-based row number as displayed.
    Pick(usize),
    Cancel,
    Show,
    Help,
    Quit,
}

impl FromStr for Input {
    type Err = anyhow::Error;

    fn from_str(line: &str) -> anyhow::Result<Self> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };
        let input = match word {
            "open" => Input::Open,
            "close" => Input::Close,
            "toggle" => Input::Toggle,
            "branches" => Input::Branches,
            "tags" => Input::Tags,
            "filter" => Input::Filter(rest.to_string()),
            "next" => Input::Next,
            "reset" => Input::Reset,
            "page" => Input::Page(rest.to_string()),
            "log" if rest.is_empty() => bail!("usage: log <branch>"),
            "log" => Input::Log(rest.to_string()),
            "back" => Input::Back,
            "pick" => {
                let n: usize = rest.parse().map_err(|_| anyhow!("usage: pick <n>"))?;
                if n == 0 {
                    bail!("rows are numbered from 1");
                }
                Input::Pick(n)
            }
            "cancel" => Input::Cancel,
            "show" | "" => Input::Show,
            "help" | "?" => Input::Help,
            "quit" | "exit" | "q" => Input::Quit,
            other => bail!("unknown command {other:?} (try help)"),
        };
        Ok(input)
    }
}
