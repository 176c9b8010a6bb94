use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use colored::Colorize;
use refsel_core::{DropdownError, RefDropdown, SelectorOptions};
use refsel_provider::{FetchExecutor, FetchRequest, InMemoryRepositoryStore, Providers, RepositoryFixture};
use refsel_types::{Ref, RefType};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::debug;

use crate::cli::{Cli, OutputFormat};
use crate::input::{Input, HELP};
use crate::render;

/// Caller-side events raised by the dropdown callbacks.
#[derive(Debug)]
enum Notice {
    Selected(Ref),
    Cancelled,
}

#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let options = match &cli.config {
        Some(path) => SelectorOptions::load(path).with_context(|| format!("loading options from {}", path.display()))?,
        None => SelectorOptions::default(),
    };
    let fixture = RepositoryFixture::load(&cli.fixture)
        .with_context(|| format!("loading fixture {}", cli.fixture.display()))?;

    let store = InMemoryRepositoryStore::new().with_latency(Duration::from_millis(cli.latency_ms));
    let repository = fixture.install(&store).context("installing fixture")?;
    let mut executor = FetchExecutor::new(Providers::in_memory(Arc::new(store)), options.fetch_timeout());

    let (notices, mut notice_rx) = mpsc::unbounded_channel();
    let select_tx = notices.clone();
    let mut dropdown = RefDropdown::new(options, repository, move |r| {
        let _ = select_tx.send(Notice::Selected(r));
    });
    if let Some(selected) = cli.selected.clone() {
        dropdown = dropdown.with_selected(selected);
    }
    if cli.cancellable {
        dropdown = dropdown.with_on_cancel(move || {
            let _ = notices.send(Notice::Cancelled);
        });
    }

    println!("{}", render::button(&dropdown));
    println!("{}", "type `open` to browse, `help` for commands".dimmed());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                let flow = match line.parse::<Input>() {
                    Ok(input) => handle(input, &mut dropdown, &executor),
                    Err(err) => {
                        println!("{} {}", "error:".red().bold(), err);
                        Flow::Continue
                    }
                };
                while let Ok(notice) = notice_rx.try_recv() {
                    report(notice, &mut dropdown, cli.format)?;
                }
                if flow == Flow::Quit {
                    break;
                }
            }
            Some(outcome) = executor.next_outcome() => {
                if dropdown.apply(outcome) {
                    draw(&dropdown);
                }
            }
        }
    }
    Ok(())
}

/// Run one command. Dropdown errors are reported and the session continues.
fn handle(input: Input, dropdown: &mut RefDropdown, executor: &FetchExecutor) -> Flow {
    match dispatch(input, dropdown) {
        Ok(Step::Fetch(request)) => {
            if let Some(request) = request {
                debug!(seq = request.seq(), "spawning fetch");
                executor.spawn(request);
            }
            draw(dropdown);
        }
        Ok(Step::Redraw) => draw(dropdown),
        Ok(Step::Help) => println!("{HELP}"),
        Ok(Step::Quit) => return Flow::Quit,
        Err(err) => println!("{} {}", "error:".red().bold(), err),
    }
    Flow::Continue
}

#[derive(Debug)]
enum Step {
    Fetch(Option<FetchRequest>),
    Redraw,
    Help,
    Quit,
}

fn dispatch(input: Input, dropdown: &mut RefDropdown) -> anyhow::Result<Step> {
    let step = match input {
        Input::Open => Step::Fetch(dropdown.open()?),
        Input::Close => {
            dropdown.close();
            Step::Redraw
        }
        Input::Toggle => Step::Fetch(dropdown.toggle()?),
        Input::Branches => Step::Fetch(dropdown.selector_mut()?.set_ref_type(RefType::Branch)?),
        Input::Tags => Step::Fetch(dropdown.selector_mut()?.set_ref_type(RefType::Tag)?),
        Input::Filter(text) => Step::Fetch(dropdown.selector_mut()?.set_filter(text)?),
        Input::Next => Step::Fetch(dropdown.selector_mut()?.next_page()?),
        Input::Reset => Step::Fetch(dropdown.selector_mut()?.reset_page()?),
        Input::Page(cursor) => Step::Fetch(dropdown.selector_mut()?.paginate(cursor)?),
        Input::Log(branch) => Step::Fetch(Some(dropdown.selector_mut()?.drill_into(&branch)?)),
        Input::Back => {
            dropdown.selector_mut()?.back()?;
            Step::Redraw
        }
        Input::Pick(n) => {
            let view = dropdown.view().ok_or(DropdownError::Closed)?;
            let target = view
                .target(n - 1)
                .cloned()
                .with_context(|| format!("row {n} cannot be picked"))?;
            dropdown.choose(target)?;
            Step::Redraw
        }
        Input::Cancel => {
            dropdown.cancel()?;
            Step::Redraw
        }
        Input::Show => Step::Redraw,
        Input::Help => Step::Help,
        Input::Quit => Step::Quit,
    };
    Ok(step)
}

fn report(notice: Notice, dropdown: &mut RefDropdown, format: OutputFormat) -> anyhow::Result<()> {
    match notice {
        Notice::Selected(reference) => {
            match format {
                OutputFormat::Text => println!("{} {}", "selected".green().bold(), reference),
                OutputFormat::Json => println!("{}", serde_json::to_string(&reference)?),
            }
            dropdown.set_selected(Some(reference));
        }
        Notice::Cancelled => {
            match format {
                OutputFormat::Text => println!("{}", "cancelled".yellow()),
                OutputFormat::Json => println!("null"),
            }
            dropdown.set_selected(None);
        }
    }
    println!("{}", render::button(dropdown));
    Ok(())
}

fn draw(dropdown: &RefDropdown) {
    if let Some(view) = dropdown.view() {
        println!("{}", render::button(dropdown));
        for line in render::view(&view) {
            println!("{line}");
        }
    }
}

#[cfg(test)]
mod tests {
    use refsel_core::SelectionState;
    use refsel_provider::FetchOutcome;
    use refsel_types::{RefRecord, RepositoryContext, ResultPage};

    use super::*;

    fn dropdown() -> RefDropdown {
        RefDropdown::new(SelectorOptions::default(), RepositoryContext::new("repo", "main"), |_| {})
    }

    fn fetched(step: Step) -> FetchRequest {
        match step {
            Step::Fetch(Some(request)) => request,
            other => panic!("expected a fetch, got {other:?}"),
        }
    }

    #[test]
    fn commands_need_an_open_dropdown() {
        let mut dropdown = dropdown();
        let err = dispatch(Input::Filter("fe".into()), &mut dropdown).unwrap_err();
        assert_eq!(err.downcast_ref::<DropdownError>(), Some(&DropdownError::Closed));
    }

    #[test]
    fn open_filter_and_pick() {
        let mut dropdown = dropdown();
        fetched(dispatch(Input::Open, &mut dropdown).unwrap());
        let request = fetched(dispatch(Input::Filter("fe".into()), &mut dropdown).unwrap());
        let FetchRequest::Refs { seq, ref_type, ref query, .. } = request else {
            panic!("expected refs request");
        };
        assert_eq!(query.prefix_filter, "fe");

        dropdown.apply(FetchOutcome::Refs {
            seq,
            ref_type,
            result: Ok(ResultPage::new(vec![RefRecord::new("feature")], false)),
        });
        assert!(matches!(
            dropdown.selector().map(|s| s.state()),
            Some(SelectionState::Listing(_))
        ));

        assert!(dispatch(Input::Pick(2), &mut dropdown).is_err());
        dispatch(Input::Pick(1), &mut dropdown).unwrap();
        assert!(!dropdown.is_open());
    }

    #[test]
    fn quit_and_help_do_not_fetch() {
        let mut dropdown = dropdown();
        assert!(matches!(dispatch(Input::Quit, &mut dropdown).unwrap(), Step::Quit));
        assert!(matches!(dispatch(Input::Help, &mut dropdown).unwrap(), Step::Help));
        assert!(!dropdown.is_open());
    }

    #[tokio::test]
    async fn fixture_drives_a_full_session() {
        let fixture = RepositoryFixture::from_toml_str(
            r#"
            id = "demo"
            default_branch = "main"

            [[commits]]
            id = "a1b2c3d4e5f6a7b8"
            message = ""

            [[commits]]
            id = "b2c3d4e5f6a7b8c9"
            message = "Add readme"
            parents = ["a1b2c3d4e5f6a7b8"]

            [branches]
            main = "b2c3d4e5f6a7b8c9"
            dev = "a1b2c3d4e5f6a7b8"
            "#,
        )
        .unwrap();
        let store = InMemoryRepositoryStore::new();
        let repository = fixture.install(&store).unwrap();
        let mut executor = FetchExecutor::new(Providers::in_memory(Arc::new(store)), Duration::from_secs(5));

        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut dropdown = RefDropdown::new(SelectorOptions::default(), repository, move |r| {
            let _ = tx.send(r);
        });

        assert_eq!(handle(Input::Open, &mut dropdown, &executor), Flow::Continue);
        let outcome = executor.next_outcome().await.unwrap();
        assert!(dropdown.apply(outcome));

        handle(Input::Log("main".into()), &mut dropdown, &executor);
        let outcome = executor.next_outcome().await.unwrap();
        assert!(dropdown.apply(outcome));

        // Row 1 is the workspace entry, row 2 the branch head.
        handle(Input::Pick(2), &mut dropdown, &executor);
        assert_eq!(rx.try_recv().unwrap(), Ref::commit("b2c3d4e5f6a7b8c9"));
        assert!(!dropdown.is_open());
    }
}
